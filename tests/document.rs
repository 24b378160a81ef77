//! End-to-end document tests: decode → lint → re-encode over realistic
//! schema documents with definitions.

use pretty_assertions::assert_eq;
use serde_json::json;

use propdesc::lint::{Violation, check_document};
use propdesc::property::{Document, Property, PropertyKind, Reference};
use propdesc::resolver::Resolver;

const INVOICE_SCHEMA: &str = r##"{
    "type": "object",
    "title": "Invoice",
    "properties": {
        "id": {"type": "integer", "minimum": 0},
        "issued": {"type": "string", "format": "date"},
        "settled_at": {"type": "string", "format": "date-time"},
        "total_cents": {"type": "integer", "minimum": 0, "monetary": true},
        "vat_rate": {"type": "number", "minimum": 0.0, "maximum": 1.0},
        "paid": {"type": "boolean"},
        "currency": {"type": "string", "enum": ["EUR", "USD", "GBP"]},
        "lines": {
            "type": "array",
            "items": {"$ref": "#/definitions/line"},
            "minItems": 1
        }
    },
    "required": ["id", "issued", "total_cents", "lines"],
    "additionalProperties": false,
    "definitions": {
        "line": {
            "type": "object",
            "properties": {
                "description": {"type": "string"},
                "amount_cents": {"type": "integer", "monetary": true},
                "sub_lines": {
                    "type": "array",
                    "items": {"$ref": "#/definitions/line"},
                    "uniqueItems": true
                }
            },
            "required": ["description", "amount_cents"]
        }
    }
}"##;

#[test]
fn decode_lint_reencode() {
    let document: Document = propdesc::from_str_with_path(INVOICE_SCHEMA).unwrap();

    // all eight variants show up and the document lints clean
    assert!(check_document(&document).is_empty());
    let root = document.root.as_inline().unwrap();
    assert_eq!(root.kind(), PropertyKind::Object);

    // the self-referential `line` definition resolves step by step
    let line = Resolver::new(&document)
        .resolve(&Reference::new("#/definitions/line"))
        .unwrap();
    assert_eq!(line.kind(), PropertyKind::Object);

    // re-encode, decode again: structurally equal (round-trip law)
    let emitted = serde_json::to_string_pretty(&document).unwrap();
    let again: Document = propdesc::from_str_with_path(&emitted).unwrap();
    assert_eq!(document, again);

    // property and definition order survives the trip
    let value = serde_json::to_value(&document).unwrap();
    let keys: Vec<&String> = value["properties"].as_object().unwrap().keys().collect();
    assert_eq!(
        keys,
        ["id", "issued", "settled_at", "total_cents", "vat_rate", "paid", "currency", "lines"]
    );
}

#[test]
fn worked_examples() {
    // {"type":"string","format":"date"} is a Date, not a generic String
    let date: Property =
        serde_json::from_value(json!({"type": "string", "format": "date"})).unwrap();
    assert_eq!(date, Property::Date { description: None });

    let doc: Document = serde_json::from_value(json!({
        "type": "object",
        "properties": {
            "id": {"type": "integer", "minimum": 0},
            "tags": {"type": "array", "items": {"type": "string"}}
        },
        "required": ["id"]
    }))
    .unwrap();
    let Property::Object { properties, required, .. } = doc.root.as_inline().unwrap() else {
        panic!("expected an object root");
    };
    assert_eq!(required, &["id".to_string()]);
    assert_eq!(properties.len(), 2);

    let emitted = serde_json::to_value(&doc).unwrap();
    let again: Document = serde_json::from_value(emitted).unwrap();
    assert_eq!(doc, again);
}

#[test]
fn undeclared_required_is_reported_not_rejected() {
    // shape-legal, so it decodes; the cross-field check reports it
    let doc: Document = serde_json::from_value(json!({
        "type": "object",
        "properties": {"id": {"type": "integer"}},
        "required": ["id", "missing"]
    }))
    .unwrap();
    assert_eq!(
        check_document(&doc),
        vec![Violation::RequiredNotDeclared { at: "#".into(), name: "missing".into() }]
    );
}
