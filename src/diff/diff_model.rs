use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A value before and after an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub from: String,
    pub to: String,
}

impl Change {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Change {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassChanges {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl ClassChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Structural change set. Only constructed when at least one part is
/// non-empty; "no change" is `None` at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiffRecord {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Change>,

    #[serde(default, skip_serializing_if = "ClassChanges::is_empty")]
    pub classes: ClassChanges,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Change>,
}

impl DiffRecord {
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.classes.is_empty() && self.text.is_none()
    }
}

/// Significant style changes keyed by property. Empty means "no change".
pub type StyleDiff = BTreeMap<String, Change>;
