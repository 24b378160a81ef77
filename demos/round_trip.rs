//! Decode a schema document, lint it, and re-emit its canonical form.
//!
//! Run with: `cargo run --example round_trip`

use propdesc::property::Document;

const SCHEMA: &str = r##"{
    "$ref": "#/definitions/tree",
    "definitions": {
        "tree": {
            "type": "object",
            "title": "Tree",
            "properties": {
                "label": {"type": "string"},
                "children": {
                    "type": "array",
                    "items": {"$ref": "#/definitions/tree"}
                }
            },
            "required": ["label"]
        }
    }
}"##;

fn main() -> anyhow::Result<()> {
    let document: Document = propdesc::from_str_with_path(SCHEMA)?;

    for violation in propdesc::check_document(&document) {
        eprintln!("violation: {violation}");
    }

    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
