use std::collections::HashSet;

use crate::mutation::mutation_model::{CompressedIntent, Intent, MutationKind, MutationRecord};

/// Classify a batch of raw mutations into a coarse intent. Total over any
/// batch, including an empty one.
pub fn compress(batch: &[MutationRecord]) -> CompressedIntent {
    let affected: HashSet<_> = batch.iter().map(|m| m.target).collect();

    let is_class = |m: &MutationRecord| m.attribute_name.as_deref() == Some("class");

    let has_class_change = batch
        .iter()
        .any(|m| m.kind == MutationKind::Attributes && is_class(m));
    let has_child_list_change = batch.iter().any(|m| m.kind == MutationKind::ChildList);
    let has_other_attribute_change = batch
        .iter()
        .any(|m| m.kind == MutationKind::Attributes && !is_class(m));

    let intent = if has_class_change && !has_child_list_change {
        Intent::StyleChange
    } else if has_child_list_change && affected.len() == 1 {
        Intent::ContentUpdate
    } else if has_child_list_change && affected.len() > 1 {
        Intent::DomRestructure
    } else if has_other_attribute_change {
        Intent::AttributeChange
    } else {
        Intent::Unknown
    };

    CompressedIntent {
        intent,
        summary: format!(
            "{} mutations across {} elements",
            batch.len(),
            affected.len()
        ),
        affected_element_count: affected.len(),
    }
}
