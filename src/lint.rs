//! Cross-field checks the descriptor shape cannot enforce on its own.
//!
//! A decoded document is always shape-legal; this pass reports the
//! consumer-level violations: `required` entries that name undeclared
//! fields, inverted numeric bounds, empty enums, and references that do not
//! resolve. Walks the inline tree only and never follows references, so it
//! terminates on cyclic descriptor graphs.

use std::collections::HashSet;

use crate::property::{Descriptor, Document, Property};
use crate::resolver::{ResolveError, Resolver};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Violation {
    #[error("{at}: 'required' names '{name}', which is not declared in 'properties'")]
    RequiredNotDeclared { at: String, name: String },
    #[error("{at}: duplicate 'required' entry '{name}'")]
    DuplicateRequired { at: String, name: String },
    #[error("{at}: minimum {minimum} is greater than maximum {maximum}")]
    BoundsInverted { at: String, minimum: String, maximum: String },
    #[error("{at}: empty 'enum' allows no value")]
    EmptyEnum { at: String },
    #[error("{at}: {error}")]
    Reference { at: String, error: ResolveError },
}

/// Run every check over the root subtree, each definition, and all
/// reachable references. Empty result means clean.
pub fn check_document(document: &Document) -> Vec<Violation> {
    let mut out = Vec::new();
    walk(&document.root, "", &mut out);
    for (name, desc) in &document.definitions {
        walk(desc, &format!("/definitions/{name}"), &mut out);
    }
    for (at, error) in Resolver::new(document).check(document) {
        out.push(Violation::Reference { at: here(&at), error });
    }
    out
}

/// Locations render as local fragments: `#`, `#/properties/id`, ...
fn here(at: &str) -> String {
    format!("#{at}")
}

fn walk(desc: &Descriptor, at: &str, out: &mut Vec<Violation>) {
    let Descriptor::Inline(p) = desc else { return };
    check_property(p, at, out);
    match p {
        Property::Array { items, .. } => walk(items, &format!("{at}/items"), out),
        Property::Object { properties, .. } => {
            for (name, d) in properties {
                walk(d, &format!("{at}/properties/{name}"), out);
            }
        }
        _ => {}
    }
}

fn check_property(p: &Property, at: &str, out: &mut Vec<Violation>) {
    match p {
        Property::String { enum_: Some(lits), .. } if lits.is_empty() => {
            out.push(Violation::EmptyEnum { at: here(at) });
        }
        Property::Integer { minimum: Some(min), maximum: Some(max), .. } if min > max => {
            out.push(Violation::BoundsInverted {
                at: here(at),
                minimum: min.to_string(),
                maximum: max.to_string(),
            });
        }
        Property::Number { minimum: Some(min), maximum: Some(max), .. } if min > max => {
            out.push(Violation::BoundsInverted {
                at: here(at),
                minimum: min.to_string(),
                maximum: max.to_string(),
            });
        }
        Property::Object { properties, required, .. } => {
            let mut seen = HashSet::new();
            for name in required {
                if !seen.insert(name.as_str()) {
                    out.push(Violation::DuplicateRequired {
                        at: here(at),
                        name: name.clone(),
                    });
                    continue;
                }
                if !properties.contains_key(name) {
                    out.push(Violation::RequiredNotDeclared {
                        at: here(at),
                        name: name.clone(),
                    });
                }
            }
        }
        _ => {}
    }
}
