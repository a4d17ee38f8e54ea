#![allow(dead_code)]

//! Rendered-preview surface. The shell publishes the live preview here
//! under an element id; capture reads from the registry without ever
//! touching what the user is looking at. This is the crate's stand-in for
//! the DOM, which keeps the slicing and capture logic testable with
//! synthetic documents.

pub mod metrics;
pub mod render;

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

pub use render::render_preview;

/// A rendered preview: standalone SVG markup plus its natural (unclipped)
/// pixel dimensions at 1× scale.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewDocument {
    pub svg: String,
    pub width: u32,
    pub height: u32,
}

/// Named render targets, keyed by element id.
#[derive(Default)]
pub struct PreviewRegistry {
    entries: RwLock<HashMap<String, PreviewDocument>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes (or replaces) the preview rendered under `id`.
    pub fn publish(&self, id: impl Into<String>, document: PreviewDocument) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.into(), document);
    }

    /// A point-in-time copy of the target, so capture never works against
    /// markup that a later edit is rewriting.
    pub fn snapshot(&self, id: &str) -> Option<PreviewDocument> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub fn remove(&self, id: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
    }
}
