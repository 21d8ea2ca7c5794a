use serde::{Deserialize, Serialize};

use crate::{
    diff::diff_model::{DiffRecord, StyleDiff},
    selector::selector_model::Selector,
    snapshot::snapshot_model::{ElementSnapshot, StyleSnapshot},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Event metadata attached by the event-capture layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionEvent {
    pub kind: String,
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl InteractionEvent {
    pub fn new(kind: impl Into<String>, timestamp: u64) -> Self {
        InteractionEvent {
            kind: kind.into(),
            timestamp,
            coordinates: None,
            value: None,
            key: None,
        }
    }

    pub fn with_coordinates(mut self, x: f64, y: f64) -> Self {
        self.coordinates = Some(Point { x, y });
        self
    }

    pub fn with_value(mut self, value: impl ToString) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn with_key(mut self, key: impl ToString) -> Self {
        self.key = Some(key.to_string());
        self
    }
}

/// One observed interaction with before/after snapshots. Never mutated once
/// built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub timestamp: u64,
    pub event_kind: String,
    pub selector: Selector,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default)]
    pub before_structural: Option<ElementSnapshot>,
    #[serde(default)]
    pub before_style: Option<StyleSnapshot>,
    #[serde(default)]
    pub after_structural: Option<ElementSnapshot>,
    #[serde(default)]
    pub after_style: Option<StyleSnapshot>,

    /// Structural changes computed at capture time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<DiffRecord>,

    /// Significant style changes computed at capture time
    #[serde(default, skip_serializing_if = "StyleDiff::is_empty")]
    pub style_changes: StyleDiff,
}
