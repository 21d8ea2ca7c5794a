use std::collections::{BTreeMap, BTreeSet};

use crate::{
    diff::diff_model::{Change, ClassChanges, DiffRecord},
    snapshot::snapshot_model::ElementSnapshot,
};

fn diff_sets<T: Ord + Clone>(before: &BTreeSet<T>, after: &BTreeSet<T>) -> (Vec<T>, Vec<T>) {
    let added = after.difference(before).cloned().collect();
    let removed = before.difference(after).cloned().collect();

    (added, removed)
}

fn diff_attributes(
    before: &BTreeMap<String, String>,
    after: &BTreeMap<String, String>,
) -> BTreeMap<String, Change> {
    let names: BTreeSet<&String> = before.keys().chain(after.keys()).collect();

    names
        .into_iter()
        .filter_map(|name| {
            let from = before.get(name).map(String::as_str).unwrap_or("");
            let to = after.get(name).map(String::as_str).unwrap_or("");
            (from != to).then(|| (name.clone(), Change::new(from, to)))
        })
        .collect()
}

fn diff_text(before: &str, after: &str) -> Option<Change> {
    let (from, to) = (before.trim(), after.trim());

    if from == to || (from.is_empty() && to.is_empty()) {
        return None;
    }
    Some(Change::new(from, to))
}

/// Attribute, class and text changes between two snapshots of the same
/// element, or `None` when nothing changed.
pub fn diff_structural(before: &ElementSnapshot, after: &ElementSnapshot) -> Option<DiffRecord> {
    let (added, removed) = diff_sets(&before.classes, &after.classes);

    let record = DiffRecord {
        attributes: diff_attributes(&before.attributes, &after.attributes),
        classes: ClassChanges { added, removed },
        text: diff_text(&before.text, &after.text),
    };

    if record.is_empty() { None } else { Some(record) }
}
