//! Wire encoding: [`Descriptor`] values → JSON-Schema-compatible objects.
//!
//! Emits the discriminators (`type`, plus `format` for the date variants)
//! and then only the fields legal for the variant; absent options and empty
//! sets are omitted. `properties` and `definitions` serialize in insertion
//! order, so decode → encode is stable.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::property::{Descriptor, Document, Property, Reference};

impl Serialize for Reference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("$ref", &self.pointer)?;
        map.end()
    }
}

impl Serialize for Descriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Descriptor::Ref(r) => r.serialize(serializer),
            Descriptor::Inline(p) => p.serialize(serializer),
        }
    }
}

impl Serialize for Property {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        write_property(self, &mut map)?;
        map.end()
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        match &self.root {
            Descriptor::Ref(r) => map.serialize_entry("$ref", &r.pointer)?,
            Descriptor::Inline(p) => write_property(p, &mut map)?,
        }
        if !self.definitions.is_empty() {
            map.serialize_entry("definitions", &self.definitions)?;
        }
        map.end()
    }
}

/// Shared entry writer so a property can serialize standalone or splatted
/// into a document root alongside `definitions`.
fn write_property<M>(p: &Property, map: &mut M) -> Result<(), M::Error>
where
    M: SerializeMap,
{
    let kind = p.kind();
    map.serialize_entry("type", kind.type_tag())?;
    if let Some(format) = kind.format_tag() {
        map.serialize_entry("format", format)?;
    }
    if let Some(description) = p.description() {
        map.serialize_entry("description", description)?;
    }

    match p {
        Property::String { enum_, .. } => {
            if let Some(lits) = enum_ {
                map.serialize_entry("enum", lits)?;
            }
        }
        Property::Date { .. } | Property::DateTime { .. } | Property::Boolean { .. } => {}
        Property::Integer { minimum, maximum, monetary, .. } => {
            if let Some(min) = minimum {
                map.serialize_entry("minimum", min)?;
            }
            if let Some(max) = maximum {
                map.serialize_entry("maximum", max)?;
            }
            if let Some(monetary) = monetary {
                map.serialize_entry("monetary", monetary)?;
            }
        }
        Property::Number { minimum, maximum, .. } => {
            if let Some(min) = minimum {
                map.serialize_entry("minimum", min)?;
            }
            if let Some(max) = maximum {
                map.serialize_entry("maximum", max)?;
            }
        }
        Property::Array { items, min_items, unique_items, .. } => {
            map.serialize_entry("items", items)?;
            if let Some(min) = min_items {
                map.serialize_entry("minItems", min)?;
            }
            if let Some(unique) = unique_items {
                map.serialize_entry("uniqueItems", unique)?;
            }
        }
        Property::Object { title, properties, required, additional_properties, .. } => {
            if let Some(title) = title {
                map.serialize_entry("title", title)?;
            }
            if !properties.is_empty() {
                map.serialize_entry("properties", properties)?;
            }
            if !required.is_empty() {
                map.serialize_entry("required", required)?;
            }
            if let Some(additional) = additional_properties {
                map.serialize_entry("additionalProperties", additional)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::property::{Descriptor, Property, Reference};
    use serde_json::json;

    #[test]
    fn emits_only_legal_fields() {
        let p = Property::Integer {
            description: Some("count".into()),
            minimum: Some(0),
            maximum: None,
            monetary: Some(true),
        };
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            json!({"type": "integer", "description": "count", "minimum": 0, "monetary": true})
        );
    }

    #[test]
    fn date_variants_carry_their_format_tag() {
        assert_eq!(
            serde_json::to_value(Property::Date { description: None }).unwrap(),
            json!({"type": "string", "format": "date"})
        );
        assert_eq!(
            serde_json::to_value(Property::DateTime { description: None }).unwrap(),
            json!({"type": "string", "format": "date-time"})
        );
        assert_eq!(
            serde_json::to_value(Property::String { description: None, enum_: None }).unwrap(),
            json!({"type": "string"})
        );
    }

    #[test]
    fn reference_is_a_single_field_object() {
        let d = Descriptor::Ref(Reference::new("#/definitions/leaf"));
        assert_eq!(
            serde_json::to_value(&d).unwrap(),
            json!({"$ref": "#/definitions/leaf"})
        );
    }

    #[test]
    fn round_trips_every_variant() {
        // decode → encode → decode, structural equality
        let samples = [
            json!({"type": "string", "enum": ["a", "b"]}),
            json!({"type": "string", "format": "date", "description": "birth"}),
            json!({"type": "string", "format": "date-time"}),
            json!({"type": "integer", "minimum": -3, "maximum": 9, "monetary": false}),
            json!({"type": "number", "minimum": 0.25}),
            json!({"type": "boolean"}),
            json!({"type": "array", "items": {"$ref": "#/definitions/x"}, "minItems": 2, "uniqueItems": true}),
            json!({"type": "object", "title": "Row", "properties": {"id": {"type": "integer"}}, "required": ["id"], "additionalProperties": false}),
        ];
        for sample in samples {
            let first: Descriptor = serde_json::from_value(sample.clone()).unwrap();
            let emitted = serde_json::to_value(&first).unwrap();
            let second: Descriptor = serde_json::from_value(emitted.clone()).unwrap();
            assert_eq!(first, second, "lossy round trip for {sample}");
        }
    }

    #[test]
    fn property_key_order_is_stable() {
        let v = json!({
            "type": "object",
            "properties": {
                "zulu": {"type": "boolean"},
                "alpha": {"type": "boolean"},
                "mike": {"type": "boolean"}
            }
        });
        let d: Descriptor = serde_json::from_value(v).unwrap();
        let out = serde_json::to_value(&d).unwrap();
        let keys: Vec<&String> = out["properties"].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zulu", "alpha", "mike"]);
    }
}
