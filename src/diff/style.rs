use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::{
    diff::diff_model::{Change, StyleDiff},
    snapshot::snapshot_model::{STYLE_WHITELIST, StyleSnapshot},
};

const GEOMETRY_PROPERTIES: &[&str] = &["width", "height", "top", "left", "right", "bottom"];

const GEOMETRY_THRESHOLD: f64 = 1.0;
const OPACITY_THRESHOLD: f64 = 0.01;

// absorbs binary rounding, e.g. 0.21 - 0.2
const EPSILON: f64 = 1e-9;

static CSS_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)\s*([A-Za-z%]*)\s*$")
        .expect("valid regex")
});

/// Leading number of a CSS value with any unit ignored: `"12.5px"` → 12.5.
pub fn parse_css_number(value: &str) -> Option<f64> {
    CSS_NUMBER
        .captures(value)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn exceeds(from: &str, to: &str, threshold: f64) -> bool {
    match (parse_css_number(from), parse_css_number(to)) {
        (Some(a), Some(b)) => (a - b).abs() + EPSILON >= threshold,
        _ => true,
    }
}

/// Whether a change of `property` from `from` to `to` is worth reporting.
/// Pure in its three arguments.
pub fn is_significant(property: &str, from: &str, to: &str) -> bool {
    if from == to {
        return false;
    }
    if GEOMETRY_PROPERTIES.contains(&property) {
        exceeds(from, to, GEOMETRY_THRESHOLD)
    } else if property == "opacity" {
        exceeds(from, to, OPACITY_THRESHOLD)
    } else {
        true
    }
}

/// Significant computed-style changes between two snapshots. A property
/// missing on one side compares as the empty string.
pub fn diff_style(before: &StyleSnapshot, after: &StyleSnapshot) -> StyleDiff {
    let present: BTreeSet<&str> = before
        .styles
        .keys()
        .chain(after.styles.keys())
        .map(String::as_str)
        .collect();

    let mut diff = StyleDiff::new();
    for property in STYLE_WHITELIST.iter().filter(|p| present.contains(*p)) {
        let from = before.get(property).unwrap_or("");
        let to = after.get(property).unwrap_or("");

        if from == to {
            continue;
        }
        if !is_significant(property, from, to) {
            trace!(property, from, to, "insignificant style change");
            continue;
        }
        diff.insert(property.to_string(), Change::new(from, to));
    }
    diff
}
