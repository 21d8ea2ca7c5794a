use std::collections::{BTreeMap, BTreeSet};

use crate::{
    dom::dom_model::NodeRef,
    selector::{
        filters::{filter_classes, is_noise_attribute},
        resolver::SelectorResolver,
    },
    snapshot::snapshot_model::{ElementSnapshot, STYLE_WHITELIST, StyleSnapshot},
};

pub const DEFAULT_MAX_MARKUP_LEN: usize = 500;
pub const DEFAULT_MAX_TEXT_LEN: usize = 100;

/// Takes structural and style snapshots of elements, labelling each with a
/// resolved selector.
#[derive(Debug, Clone)]
pub struct SnapshotCapturer {
    resolver: SelectorResolver,
    max_markup_len: usize,
    max_text_len: usize,
}

impl Default for SnapshotCapturer {
    fn default() -> Self {
        Self::new(
            SelectorResolver::default(),
            DEFAULT_MAX_MARKUP_LEN,
            DEFAULT_MAX_TEXT_LEN,
        )
    }
}

impl SnapshotCapturer {
    pub fn new(resolver: SelectorResolver, max_markup_len: usize, max_text_len: usize) -> Self {
        Self {
            resolver,
            max_markup_len,
            max_text_len,
        }
    }

    pub fn resolver(&self) -> &SelectorResolver {
        &self.resolver
    }

    /// `None` for anything that is not an element.
    pub fn capture_structural(&self, node: NodeRef<'_>) -> Option<ElementSnapshot> {
        let element = node.as_element()?;

        let attributes: BTreeMap<String, String> = element
            .attributes()
            .filter(|(name, _)| !matches!(*name, "class" | "style") && !is_noise_attribute(name))
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        let classes: BTreeSet<String> = filter_classes(element.class_list())
            .into_iter()
            .map(str::to_string)
            .collect();

        Some(ElementSnapshot {
            selector: self.resolver.generate(element),
            html: truncate(&element.outer_html(), self.max_markup_len),
            attributes,
            classes,
            text: truncate(element.direct_text().trim(), self.max_text_len),
        })
    }

    /// `None` for anything that is not an element.
    pub fn capture_style(&self, node: NodeRef<'_>) -> Option<StyleSnapshot> {
        let element = node.as_element()?;

        let styles = STYLE_WHITELIST
            .iter()
            .filter_map(|property| {
                element
                    .computed_style(property)
                    .map(|value| (property.to_string(), value.to_string()))
            })
            .collect();

        Some(StyleSnapshot {
            selector: self.resolver.generate(element),
            styles,
        })
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => s[..byte_idx].to_string(),
        None => s.to_string(),
    }
}
