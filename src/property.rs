//! The property descriptor taxonomy: a closed, tagged vocabulary for the
//! shape of data (strings, numbers, booleans, dates, arrays, objects),
//! including nesting and cross-references.
//!
//! Design goals:
//! - Exhaustive matching everywhere: adding a variant is a compile error in
//!   every consumer, not a silent structural gap.
//! - References are lookup keys, never owning pointers, so cyclic descriptor
//!   graphs are representable without ownership cycles.
//! - Values are immutable after construction; share and traverse freely.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

/// A pointer to a descriptor defined elsewhere in the same document,
/// e.g. `#/definitions/address`. Wire form is `{"$ref": "..."}` with exactly
/// that one field. The taxonomy never resolves it; see [`crate::resolver`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub pointer: String,
}

impl Reference {
    pub fn new(pointer: impl Into<String>) -> Self {
        Self { pointer: pointer.into() }
    }
}

/// Either an inline property or a reference to one. This is the type of
/// `Array.items` and of each `Object.properties` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    Ref(Reference),
    Inline(Property),
}

/// One shape a property may take. Closed union of exactly 8 variants,
/// discriminated on the wire by `type` plus, for the string-shaped trio,
/// `format` (`date`, `date-time`, or absent for plain String).
///
/// Every variant carries an optional human-readable `description`. The other
/// fields are legal only for their own variant; the decoder rejects a field
/// on the wrong variant rather than dropping it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Property {
    String {
        description: Option<String>,
        /// Ordered set of allowed literal strings. `None` means unconstrained.
        enum_: Option<Vec<String>>,
    },
    /// Calendar date, no time component. `type=string, format=date`.
    Date { description: Option<String> },
    /// Timestamp with time component. `type=string, format=date-time`.
    DateTime { description: Option<String> },
    Integer {
        description: Option<String>,
        minimum: Option<i64>,
        maximum: Option<i64>,
        /// Presentation hint only; does not change bounds.
        monetary: Option<bool>,
    },
    Number {
        description: Option<String>,
        minimum: Option<OrderedFloat<f64>>,
        maximum: Option<OrderedFloat<f64>>,
    },
    Boolean { description: Option<String> },
    Array {
        description: Option<String>,
        /// Shape of every element. Mandatory: a homogeneous sequence without
        /// an element shape describes nothing.
        items: Box<Descriptor>,
        min_items: Option<u32>,
        unique_items: Option<bool>,
    },
    Object {
        description: Option<String>,
        title: Option<String>,
        /// Field name → shape. Insertion order is preserved so re-encoding
        /// round-trips stably; order carries no meaning.
        properties: IndexMap<String, Descriptor>,
        /// Names that must be present. Absent on the wire ⇔ empty here.
        required: Vec<String>,
        additional_properties: Option<bool>,
    },
}

/// Discriminator for [`Property`]: which of the 8 variants a value is.
/// Dispatch uses only the `type` tag plus `format` for the string trio;
/// no other field combination participates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    String,
    Date,
    DateTime,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl PropertyKind {
    /// The wire `type` tag for this variant.
    pub fn type_tag(&self) -> &'static str {
        match self {
            PropertyKind::String | PropertyKind::Date | PropertyKind::DateTime => "string",
            PropertyKind::Integer => "integer",
            PropertyKind::Number => "number",
            PropertyKind::Boolean => "boolean",
            PropertyKind::Array => "array",
            PropertyKind::Object => "object",
        }
    }

    /// The wire `format` sub-tag, for the two string sub-variants that carry one.
    pub fn format_tag(&self) -> Option<&'static str> {
        match self {
            PropertyKind::Date => Some("date"),
            PropertyKind::DateTime => Some("date-time"),
            _ => None,
        }
    }

    /// Human-readable name, for diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::String => "string",
            PropertyKind::Date => "date",
            PropertyKind::DateTime => "date-time",
            PropertyKind::Integer => "integer",
            PropertyKind::Number => "number",
            PropertyKind::Boolean => "boolean",
            PropertyKind::Array => "array",
            PropertyKind::Object => "object",
        }
    }
}

impl std::fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Property {
    pub fn kind(&self) -> PropertyKind {
        match self {
            Property::String { .. } => PropertyKind::String,
            Property::Date { .. } => PropertyKind::Date,
            Property::DateTime { .. } => PropertyKind::DateTime,
            Property::Integer { .. } => PropertyKind::Integer,
            Property::Number { .. } => PropertyKind::Number,
            Property::Boolean { .. } => PropertyKind::Boolean,
            Property::Array { .. } => PropertyKind::Array,
            Property::Object { .. } => PropertyKind::Object,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Property::String { description, .. }
            | Property::Date { description }
            | Property::DateTime { description }
            | Property::Integer { description, .. }
            | Property::Number { description, .. }
            | Property::Boolean { description }
            | Property::Array { description, .. }
            | Property::Object { description, .. } => description.as_deref(),
        }
    }

    /// Visit every [`Reference`] in this property's inline subtree, paired
    /// with a JSON-pointer-ish location. Does not follow references, so this
    /// terminates even when the document's descriptor graph is cyclic.
    pub fn for_each_reference<'a>(&'a self, at: &str, f: &mut impl FnMut(&str, &'a Reference)) {
        match self {
            Property::Array { items, .. } => {
                items.for_each_reference(&format!("{at}/items"), f);
            }
            Property::Object { properties, .. } => {
                for (name, desc) in properties {
                    desc.for_each_reference(&format!("{at}/properties/{name}"), f);
                }
            }
            _ => {}
        }
    }
}

impl Descriptor {
    pub fn as_inline(&self) -> Option<&Property> {
        match self {
            Descriptor::Inline(p) => Some(p),
            Descriptor::Ref(_) => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Descriptor::Ref(r) => Some(r),
            Descriptor::Inline(_) => None,
        }
    }

    /// See [`Property::for_each_reference`].
    pub fn for_each_reference<'a>(&'a self, at: &str, f: &mut impl FnMut(&str, &'a Reference)) {
        match self {
            Descriptor::Ref(r) => f(at, r),
            Descriptor::Inline(p) => p.for_each_reference(at, f),
        }
    }
}

impl From<Property> for Descriptor {
    fn from(p: Property) -> Self {
        Descriptor::Inline(p)
    }
}

impl From<Reference> for Descriptor {
    fn from(r: Reference) -> Self {
        Descriptor::Ref(r)
    }
}

/// A schema document: one top-level descriptor plus the arena of named
/// descriptors that `#/definitions/<name>` pointers resolve against.
/// Definitions keep insertion order for stable re-encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Descriptor,
    pub definitions: IndexMap<String, Descriptor>,
}

impl Document {
    /// Visit every reference in the document: the root's subtree and each
    /// definition's subtree.
    pub fn for_each_reference<'a>(&'a self, f: &mut impl FnMut(&str, &'a Reference)) {
        self.root.for_each_reference("", f);
        for (name, desc) in &self.definitions {
            desc.for_each_reference(&format!("/definitions/{name}"), f);
        }
    }
}
