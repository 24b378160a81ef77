//! Reference resolution against a document's definitions table.
//!
//! Pointers are local fragments of the form `#/definitions/<name>`. The
//! resolver only follows ref → ref alias chains; it never descends into a
//! resolved property's children, so descriptor graphs that are cyclic
//! through inline structure (a tree node whose property refers back to the
//! node's own definition) resolve without any cycle bookkeeping. Only a
//! cycle in the alias chain itself is an error.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::property::{Descriptor, Document, Property, Reference};

static POINTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#/definitions/([^/]+)$").expect("pointer regex"));

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("pointer '{0}' is not of the form '#/definitions/<name>'")]
    BadPointer(String),
    #[error("dangling reference: no definition named '{0}'")]
    Dangling(String),
    #[error("reference cycle through definitions: {}", chain.join(" -> "))]
    Cycle { chain: Vec<String> },
}

pub struct Resolver<'a> {
    definitions: &'a IndexMap<String, Descriptor>,
}

impl<'a> Resolver<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { definitions: &document.definitions }
    }

    pub fn with_definitions(definitions: &'a IndexMap<String, Descriptor>) -> Self {
        Self { definitions }
    }

    /// Parse the definition name out of a pointer.
    pub fn definition_name(reference: &Reference) -> Result<&str, ResolveError> {
        POINTER_RE
            .captures(&reference.pointer)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| ResolveError::BadPointer(reference.pointer.clone()))
    }

    /// One dereference step. The result may itself be a reference.
    pub fn lookup(&self, reference: &Reference) -> Result<&'a Descriptor, ResolveError> {
        let name = Self::definition_name(reference)?;
        self.definitions
            .get(name)
            .ok_or_else(|| ResolveError::Dangling(name.to_string()))
    }

    /// Follow alias chains until an inline property. A chain that revisits a
    /// name is reported with the full chain.
    pub fn resolve(&self, reference: &Reference) -> Result<&'a Property, ResolveError> {
        let mut chain: Vec<String> = Vec::new();
        let mut current = reference;
        loop {
            let name = Self::definition_name(current)?;
            if chain.iter().any(|seen| seen == name) {
                chain.push(name.to_string());
                return Err(ResolveError::Cycle { chain });
            }
            chain.push(name.to_string());
            let target = self
                .definitions
                .get(name)
                .ok_or_else(|| ResolveError::Dangling(name.to_string()))?;
            match target {
                Descriptor::Inline(p) => return Ok(p),
                Descriptor::Ref(next) => current = next,
            }
        }
    }

    /// Resolve every reference reachable from the document (root subtree and
    /// each definition), collecting failures with their location.
    pub fn check(&self, document: &Document) -> Vec<(String, ResolveError)> {
        let mut out = Vec::new();
        document.for_each_reference(&mut |at, reference| {
            if let Err(err) = self.resolve(reference) {
                out.push((at.to_string(), err));
            }
        });
        out
    }
}
