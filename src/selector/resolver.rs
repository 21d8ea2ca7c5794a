use tracing::{debug, trace};

use crate::{
    dom::dom_model::ElementRef,
    selector::{
        filters::{PREFERRED_ATTRIBUTES, filter_classes, strip_framework_prefix},
        selector_model::{ResolvedSelector, Selector, SelectorTier},
    },
};

pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Derives a durable selector for an element. Three tiers are tried in
/// order (attribute, class, structural); the first candidate that matches
/// exactly the element wins, and the structural path is accepted as is.
#[derive(Debug, Clone)]
pub struct SelectorResolver {
    max_depth: usize,
}

impl Default for SelectorResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl SelectorResolver {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn generate(&self, element: ElementRef<'_>) -> Selector {
        self.resolve(element).selector
    }

    pub fn resolve(&self, element: ElementRef<'_>) -> ResolvedSelector {
        let resolved = if let Some(selector) = attribute_candidate(element) {
            ResolvedSelector {
                selector,
                tier: SelectorTier::Attribute,
            }
        } else if let Some(selector) = class_candidate(element) {
            ResolvedSelector {
                selector,
                tier: SelectorTier::Class,
            }
        } else {
            ResolvedSelector {
                selector: self.structural_path(element),
                tier: SelectorTier::Structural,
            }
        };

        debug!(
            node = element.id().0,
            tier = ?resolved.tier,
            selector = %resolved.selector,
            "resolved selector"
        );
        resolved
    }

    fn structural_path(&self, element: ElementRef<'_>) -> Selector {
        let mut segments = Vec::new();
        let mut cursor = Some(element);

        while let Some(el) = cursor {
            if segments.len() >= self.max_depth {
                break;
            }
            let tag = match el.tag_name() {
                "" => "*",
                name => name,
            };
            let (index, total) = el.type_position();
            if total > 1 {
                segments.push(format!("{}:nth-of-type({})", tag, index));
            } else {
                segments.push(tag.to_string());
            }
            cursor = el.parent_element();
        }

        segments.reverse();
        Selector(segments.join(" "))
    }
}

fn attribute_candidate(element: ElementRef<'_>) -> Option<Selector> {
    let (name, value) = PREFERRED_ATTRIBUTES.iter().find_map(|name| {
        element
            .attribute(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| (*name, v))
    })?;

    let (value, stripped) = strip_framework_prefix(value);
    let op = if stripped { "$=" } else { "=" };
    let candidate = format!("{}[{}{}\"{}\"]", element.tag_name(), name, op, value);

    is_unique(element, &candidate).then(|| Selector(candidate))
}

fn class_candidate(element: ElementRef<'_>) -> Option<Selector> {
    let classes = filter_classes(element.class_list());
    if classes.is_empty() {
        return None;
    }

    let tag = element.tag_name();
    for class in &classes {
        let candidate = format!("{}.{}", tag, class);
        if is_unique(element, &candidate) {
            return Some(Selector(candidate));
        }
    }

    if classes.len() > 1 {
        let candidate = format!("{}.{}", tag, classes.join("."));
        if is_unique(element, &candidate) {
            return Some(Selector(candidate));
        }
    }

    None
}

/// Exactly one match in the document, and it is `element`. Parse errors
/// count as "not unique".
fn is_unique(element: ElementRef<'_>, candidate: &str) -> bool {
    match element.document().query_selector_all(candidate) {
        Ok(matches) => matches.len() == 1 && matches[0] == element.id(),
        Err(e) => {
            trace!(candidate, error = %e, "candidate selector rejected");
            false
        }
    }
}
