use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::selector::selector_model::Selector;

/// Computed-style properties captured for every element.
pub const STYLE_WHITELIST: &[&str] = &[
    "display",
    "visibility",
    "opacity",
    "transform",
    "transition",
    "animation",
    "position",
    "top",
    "left",
    "right",
    "bottom",
    "width",
    "height",
    "z-index",
    "overflow",
    "clip-path",
    "filter",
    "backdrop-filter",
    // timing longhands read by profile synthesis
    "transition-duration",
    "transition-timing-function",
    "transition-delay",
    "animation-name",
    "animation-duration",
];

/// Structure of one element at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    pub selector: Selector,

    /// Outer markup, truncated
    pub html: String,

    /// Attributes minus noise, `class` and `style`
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    /// Meaningful class names only
    #[serde(default)]
    pub classes: BTreeSet<String>,

    /// Direct text children, trimmed and truncated
    #[serde(default)]
    pub text: String,
}

/// Whitelisted computed style of one element at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSnapshot {
    pub selector: Selector,
    #[serde(default)]
    pub styles: BTreeMap<String, String>,
}

impl StyleSnapshot {
    pub fn get(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }
}
