//! Property descriptor taxonomy: a closed, JSON-Schema-compatible vocabulary
//! for describing the shape of data, with nesting and cross-references.
//!
//! - [`property`] is the data model: the 8-variant [`Property`] union,
//!   [`Reference`] lookup keys, and the [`Document`] arena they resolve in.
//! - [`de`] / [`ser`] are the wire codec: two-level `type`/`format`
//!   discrimination in, only variant-legal fields out.
//! - [`resolver`] dereferences `#/definitions/<name>` pointers and reports
//!   dangling or cyclic ones.
//! - [`lint`] reports the cross-field violations the shape alone cannot
//!   rule out (e.g. `required` naming an undeclared field).

pub mod cli;
pub mod de;
pub mod lint;
pub mod path_de;
pub mod property;
pub mod resolver;
pub mod ser;

pub use de::DecodeError;
pub use lint::{Violation, check_document};
pub use path_de::{PathError, from_slice_with_path, from_str_with_path};
pub use property::{Descriptor, Document, Property, PropertyKind, Reference};
pub use resolver::{ResolveError, Resolver};
