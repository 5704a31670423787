//! Host leaf (editor pane) identity as seen by the core.

use crate::model::note::NoteRef;
use std::fmt::{Display, Formatter};

/// Opaque host identifier of one editor leaf.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LeafId(String);

impl LeafId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for LeafId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of one leaf at event time.
///
/// `file` is `None` for leaves whose view shows no file (empty tab, graph view).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafView {
    pub id: LeafId,
    pub file: Option<NoteRef>,
    pub is_markdown: bool,
}

impl LeafView {
    /// Markdown leaf showing `file`.
    pub fn markdown(id: impl Into<String>, file: NoteRef) -> Self {
        Self {
            id: LeafId::new(id),
            file: Some(file),
            is_markdown: true,
        }
    }

    /// Leaf without a file view.
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: LeafId::new(id),
            file: None,
            is_markdown: false,
        }
    }
}
