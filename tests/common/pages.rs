#![allow(dead_code)]

use std::collections::BTreeMap;

use interaction_profiler::{
    dom::dom_model::{NodeId, PageDocument},
    selector::selector_model::Selector,
    snapshot::snapshot_model::{ElementSnapshot, StyleSnapshot},
    trace::record::InteractionRecord,
};

/// `<html><body></body></html>`; returns the document and the body id.
pub fn blank_page() -> (PageDocument, NodeId) {
    let mut doc = PageDocument::new();
    let html = doc.append_element(doc.document(), "html");
    let body = doc.append_element(html, "body");
    (doc, body)
}

pub fn element(doc: &mut PageDocument, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let id = doc.append_element(parent, tag);
    for (name, value) in attrs {
        doc.set_attribute(id, name, value);
    }
    id
}

pub fn style_snapshot(selector: &str, styles: &[(&str, &str)]) -> StyleSnapshot {
    StyleSnapshot {
        selector: Selector::from(selector),
        styles: styles
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

pub fn element_snapshot(selector: &str, classes: &[&str]) -> ElementSnapshot {
    ElementSnapshot {
        selector: Selector::from(selector),
        html: String::new(),
        attributes: BTreeMap::new(),
        classes: classes.iter().map(|c| c.to_string()).collect(),
        text: String::new(),
    }
}

/// A complete record with the given class sets and styles.
pub fn record(
    event: &str,
    selector: &str,
    before_styles: &[(&str, &str)],
    after_styles: &[(&str, &str)],
) -> InteractionRecord {
    record_with_classes(event, selector, &[], &[], before_styles, after_styles)
}

pub fn record_with_classes(
    event: &str,
    selector: &str,
    before_classes: &[&str],
    after_classes: &[&str],
    before_styles: &[(&str, &str)],
    after_styles: &[(&str, &str)],
) -> InteractionRecord {
    InteractionRecord {
        timestamp: 0,
        event_kind: event.to_string(),
        selector: Selector::from(selector),
        coordinates: None,
        value: None,
        key: None,
        before_structural: Some(element_snapshot(selector, before_classes)),
        before_style: Some(style_snapshot(selector, before_styles)),
        after_structural: Some(element_snapshot(selector, after_classes)),
        after_style: Some(style_snapshot(selector, after_styles)),
        changes: None,
        style_changes: BTreeMap::new(),
    }
}
