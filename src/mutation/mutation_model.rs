use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dom::dom_model::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationKind {
    #[serde(rename = "attributes")]
    Attributes,
    #[serde(rename = "childList")]
    ChildList,
}

/// One raw DOM-mutation notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationRecord {
    pub kind: MutationKind,
    #[serde(default)]
    pub attribute_name: Option<String>,
    pub target: NodeId,
    #[serde(default)]
    pub added_count: usize,
    #[serde(default)]
    pub removed_count: usize,
}

impl MutationRecord {
    pub fn attribute(target: NodeId, name: &str) -> Self {
        MutationRecord {
            kind: MutationKind::Attributes,
            attribute_name: Some(name.to_string()),
            target,
            added_count: 0,
            removed_count: 0,
        }
    }

    pub fn child_list(target: NodeId, added: usize, removed: usize) -> Self {
        MutationRecord {
            kind: MutationKind::ChildList,
            attribute_name: None,
            target,
            added_count: added,
            removed_count: removed,
        }
    }
}

/// Mutations observed in one scheduling tick, in arrival order.
pub type MutationBatch = Vec<MutationRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    StyleChange,
    ContentUpdate,
    DomRestructure,
    AttributeChange,
    Unknown,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::StyleChange => "style-change",
            Intent::ContentUpdate => "content-update",
            Intent::DomRestructure => "dom-restructure",
            Intent::AttributeChange => "attribute-change",
            Intent::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressedIntent {
    pub intent: Intent,
    pub summary: String,
    pub affected_element_count: usize,
}

/// A compressed batch as stored by a capture session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRecord {
    pub timestamp: u64,
    #[serde(flatten)]
    pub intent: CompressedIntent,
}
