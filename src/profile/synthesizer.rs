use std::collections::HashMap;

use tracing::debug;

use crate::{
    diff::{diff_model::StyleDiff, style::diff_style},
    profile::profile_model::{AnimationProfile, Effect, EffectType, Timing, Trigger},
    selector::selector_model::Selector,
    snapshot::snapshot_model::{ElementSnapshot, StyleSnapshot},
    trace::record::InteractionRecord,
};

/// Turn interaction records into animation profiles.
///
/// Records are grouped by selector in order of first appearance, keeping
/// their original order inside each group. Each record with complete
/// snapshots and a non-empty style diff yields one profile; identical
/// records yield identical profiles.
pub fn synthesize(records: &[InteractionRecord]) -> Vec<AnimationProfile> {
    let mut index: HashMap<&Selector, usize> = HashMap::new();
    let mut groups: Vec<Vec<&InteractionRecord>> = Vec::new();
    for record in records {
        let slot = *index.entry(&record.selector).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(record);
    }

    groups
        .into_iter()
        .flatten()
        .filter_map(profile_for)
        .collect()
}

fn profile_for(record: &InteractionRecord) -> Option<AnimationProfile> {
    let (Some(before), Some(before_style), Some(after), Some(after_style)) = (
        &record.before_structural,
        &record.before_style,
        &record.after_structural,
        &record.after_style,
    ) else {
        debug!(selector = %record.selector, "skipping record with missing snapshots");
        return None;
    };

    let properties = diff_style(before_style, after_style);
    if properties.is_empty() {
        return None;
    }

    Some(AnimationProfile {
        name: format!("{}-on-{}", record.event_kind, record.selector.last_token()),
        trigger: Trigger {
            event_kind: record.event_kind.clone(),
            selector: record.selector.clone(),
        },
        effect: Effect {
            effect_type: classify_effect(before, after, &properties),
            target: record.selector.clone(),
            timing: extract_timing(&properties, after_style),
            properties,
        },
    })
}

pub fn classify_effect(
    before: &ElementSnapshot,
    after: &ElementSnapshot,
    properties: &StyleDiff,
) -> EffectType {
    if before.classes.len() != after.classes.len() {
        EffectType::ClassToggle
    } else if properties.contains_key("animation-name") {
        EffectType::Animation
    } else {
        EffectType::Transition
    }
}

/// Timing is only read when the `transition` shorthand itself changed.
pub fn extract_timing(properties: &StyleDiff, after: &StyleSnapshot) -> Option<Timing> {
    if !properties.contains_key("transition") {
        return None;
    }

    Some(Timing {
        duration: after.get("transition-duration").unwrap_or("0s").to_string(),
        easing: Some(
            after
                .get("transition-timing-function")
                .unwrap_or("ease")
                .to_string(),
        ),
        delay: after.get("transition-delay").map(str::to_string),
    })
}
