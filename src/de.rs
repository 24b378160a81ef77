//! Wire decoding: JSON-Schema-compatible object trees → [`Descriptor`] values.
//!
//! Two-level discrimination, exactly: `type` picks the variant, and for
//! `type=string` the `format` sub-tag selects Date (`date`), DateTime
//! (`date-time`) or plain String (absent). A `$ref` object is a [`Reference`]
//! and must contain exactly that one field.
//!
//! Every wire field is first captured into a raw mirror struct (unknown keys
//! are a hard error), then classified. A field that is present but not legal
//! for the resolved variant is rejected, never silently dropped. References
//! are represented, not resolved, so cyclic documents decode fine.

use std::collections::HashSet;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::Deserialize;
use serde::de::Error as _;

use crate::property::{Descriptor, Document, Property, PropertyKind, Reference};

/// Rejections produced while classifying a raw wire object into a variant.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("missing 'type' (or '$ref') discriminator")]
    MissingType,
    #[error("unknown type '{0}'")]
    UnknownType(String),
    #[error("unknown format '{0}' for type 'string'")]
    UnknownFormat(String),
    #[error("'format' is not legal for type '{ty}'")]
    FormatOnNonString { ty: String },
    #[error("a reference is exactly one '$ref' field; found '{field}' alongside it")]
    RefWithExtraField { field: &'static str },
    #[error("field '{field}' is not legal for a {kind} property")]
    IllegalField { field: &'static str, kind: PropertyKind },
    #[error("'{field}' on an integer property must be an integer, got {value}")]
    NonIntegerBound { field: &'static str, value: serde_json::Number },
    #[error("'{field}' is not representable as a float")]
    UnrepresentableBound { field: &'static str },
    #[error("duplicate enum literal '{0}'")]
    DuplicateEnumLiteral(String),
    #[error("an array property requires 'items'")]
    MissingItems,
    #[error("expected an inline property, found a '$ref'")]
    UnexpectedReference,
}

/// Raw mirror of one wire object: every legal field, all optional.
/// `deny_unknown_fields` makes any key outside the taxonomy a decode error
/// before classification even starts.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSchema {
    #[serde(rename = "$ref")]
    reference: Option<String>,
    #[serde(rename = "type")]
    ty: Option<String>,
    format: Option<String>,
    description: Option<String>,
    title: Option<String>,
    #[serde(rename = "enum")]
    enum_: Option<Vec<String>>,
    minimum: Option<serde_json::Number>,
    maximum: Option<serde_json::Number>,
    monetary: Option<bool>,
    items: Option<Box<Descriptor>>,
    #[serde(rename = "minItems")]
    min_items: Option<u32>,
    #[serde(rename = "uniqueItems")]
    unique_items: Option<bool>,
    properties: Option<IndexMap<String, Descriptor>>,
    required: Option<Vec<String>>,
    #[serde(rename = "additionalProperties")]
    additional_properties: Option<bool>,
    // Legal at the document root only; Document::deserialize takes it out
    // before classification.
    definitions: Option<IndexMap<String, Descriptor>>,
}

/// Wire fields legal for each variant, beyond the discriminators and the
/// universal `description`.
fn allowed_fields(kind: PropertyKind) -> &'static [&'static str] {
    match kind {
        PropertyKind::String => &["enum"],
        PropertyKind::Date | PropertyKind::DateTime => &[],
        PropertyKind::Integer => &["minimum", "maximum", "monetary"],
        PropertyKind::Number => &["minimum", "maximum"],
        PropertyKind::Boolean => &[],
        PropertyKind::Array => &["items", "minItems", "uniqueItems"],
        PropertyKind::Object => &["title", "properties", "required", "additionalProperties"],
    }
}

impl RawSchema {
    /// Variant-specific fields that are actually present, by wire name.
    fn present_fields(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.enum_.is_some() { out.push("enum"); }
        if self.minimum.is_some() { out.push("minimum"); }
        if self.maximum.is_some() { out.push("maximum"); }
        if self.monetary.is_some() { out.push("monetary"); }
        if self.items.is_some() { out.push("items"); }
        if self.min_items.is_some() { out.push("minItems"); }
        if self.unique_items.is_some() { out.push("uniqueItems"); }
        if self.title.is_some() { out.push("title"); }
        if self.properties.is_some() { out.push("properties"); }
        if self.required.is_some() { out.push("required"); }
        if self.additional_properties.is_some() { out.push("additionalProperties"); }
        if self.definitions.is_some() { out.push("definitions"); }
        out
    }

    fn resolve_kind(&self) -> Result<PropertyKind, DecodeError> {
        let ty = self.ty.as_deref().ok_or(DecodeError::MissingType)?;
        match (ty, self.format.as_deref()) {
            ("string", None) => Ok(PropertyKind::String),
            ("string", Some("date")) => Ok(PropertyKind::Date),
            ("string", Some("date-time")) => Ok(PropertyKind::DateTime),
            ("string", Some(other)) => Err(DecodeError::UnknownFormat(other.to_string())),
            (_, Some(_)) => Err(DecodeError::FormatOnNonString { ty: ty.to_string() }),
            ("integer", None) => Ok(PropertyKind::Integer),
            ("number", None) => Ok(PropertyKind::Number),
            ("boolean", None) => Ok(PropertyKind::Boolean),
            ("array", None) => Ok(PropertyKind::Array),
            ("object", None) => Ok(PropertyKind::Object),
            (other, None) => Err(DecodeError::UnknownType(other.to_string())),
        }
    }

    fn classify(self) -> Result<Descriptor, DecodeError> {
        if self.reference.is_some() {
            if self.ty.is_some() {
                return Err(DecodeError::RefWithExtraField { field: "type" });
            }
            if self.format.is_some() {
                return Err(DecodeError::RefWithExtraField { field: "format" });
            }
            if self.description.is_some() {
                return Err(DecodeError::RefWithExtraField { field: "description" });
            }
            if let Some(field) = self.present_fields().first().copied() {
                return Err(DecodeError::RefWithExtraField { field });
            }
        }
        if let Some(pointer) = self.reference {
            return Ok(Descriptor::Ref(Reference { pointer }));
        }

        let kind = self.resolve_kind()?;
        for field in self.present_fields() {
            if !allowed_fields(kind).contains(&field) {
                return Err(DecodeError::IllegalField { field, kind });
            }
        }

        let prop = match kind {
            PropertyKind::String => {
                if let Some(lits) = &self.enum_ {
                    let mut seen = HashSet::new();
                    for lit in lits {
                        if !seen.insert(lit.as_str()) {
                            return Err(DecodeError::DuplicateEnumLiteral(lit.clone()));
                        }
                    }
                }
                Property::String { description: self.description, enum_: self.enum_ }
            }
            PropertyKind::Date => Property::Date { description: self.description },
            PropertyKind::DateTime => Property::DateTime { description: self.description },
            PropertyKind::Integer => Property::Integer {
                description: self.description,
                minimum: int_bound(self.minimum, "minimum")?,
                maximum: int_bound(self.maximum, "maximum")?,
                monetary: self.monetary,
            },
            PropertyKind::Number => Property::Number {
                description: self.description,
                minimum: float_bound(self.minimum, "minimum")?,
                maximum: float_bound(self.maximum, "maximum")?,
            },
            PropertyKind::Boolean => Property::Boolean { description: self.description },
            PropertyKind::Array => Property::Array {
                description: self.description,
                items: self.items.ok_or(DecodeError::MissingItems)?,
                min_items: self.min_items,
                unique_items: self.unique_items,
            },
            PropertyKind::Object => Property::Object {
                description: self.description,
                title: self.title,
                properties: self.properties.unwrap_or_default(),
                required: self.required.unwrap_or_default(),
                additional_properties: self.additional_properties,
            },
        };
        Ok(Descriptor::Inline(prop))
    }

    fn classify_document(mut self) -> Result<Document, DecodeError> {
        let definitions = self.definitions.take().unwrap_or_default();
        let root = self.classify()?;
        Ok(Document { root, definitions })
    }
}

/// The bound's numeric domain must match the variant: integer bounds on an
/// integer property.
fn int_bound(
    n: Option<serde_json::Number>,
    field: &'static str,
) -> Result<Option<i64>, DecodeError> {
    match n {
        None => Ok(None),
        Some(n) => match n.as_i64() {
            Some(i) => Ok(Some(i)),
            None => Err(DecodeError::NonIntegerBound { field, value: n }),
        },
    }
}

fn float_bound(
    n: Option<serde_json::Number>,
    field: &'static str,
) -> Result<Option<OrderedFloat<f64>>, DecodeError> {
    match n {
        None => Ok(None),
        Some(n) => n
            .as_f64()
            .map(|f| Some(OrderedFloat(f)))
            .ok_or(DecodeError::UnrepresentableBound { field }),
    }
}

impl<'de> Deserialize<'de> for Descriptor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawSchema::deserialize(deserializer)?;
        raw.classify().map_err(D::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Property {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawSchema::deserialize(deserializer)?;
        match raw.classify().map_err(D::Error::custom)? {
            Descriptor::Inline(p) => Ok(p),
            Descriptor::Ref(_) => Err(D::Error::custom(DecodeError::UnexpectedReference)),
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawSchema::deserialize(deserializer)?;
        raw.classify_document().map_err(D::Error::custom)
    }
}
