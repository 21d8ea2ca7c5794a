use std::collections::BTreeMap;

use interaction_profiler::{
    diff::diff_model::Change,
    profile::{
        profile_model::{EffectType, Timing},
        synthesizer::synthesize,
    },
};

use crate::common::pages::{record, record_with_classes};

mod common;

#[test]
fn click_scale_down_becomes_transition_profile() {
    let records = vec![record(
        "click",
        "button.cta",
        &[("transform", "scale(1)"), ("opacity", "1")],
        &[("transform", "scale(0.95)"), ("opacity", "0.8")],
    )];

    let profiles = synthesize(&records);

    assert_eq!(profiles.len(), 1);
    let profile = &profiles[0];
    assert_eq!(profile.name, "click-on-cta");
    assert_eq!(profile.trigger.event_kind, "click");
    assert_eq!(profile.trigger.selector.as_str(), "button.cta");
    assert_eq!(profile.effect.effect_type, EffectType::Transition);
    assert_eq!(profile.effect.target.as_str(), "button.cta");

    let expected: BTreeMap<String, Change> = [
        ("transform".to_string(), Change::new("scale(1)", "scale(0.95)")),
        ("opacity".to_string(), Change::new("1", "0.8")),
    ]
    .into_iter()
    .collect();
    assert_eq!(profile.effect.properties, expected);
    assert_eq!(profile.effect.timing, None);

    let json = serde_json::to_value(profile).unwrap();
    assert!(json["effect"].get("timing").is_none(), "No timing field when absent");
    assert_eq!(json["effect"]["type"], "transition");
    assert_eq!(json["trigger"]["eventKind"], "click");
}

#[test]
fn duplicated_records_yield_duplicated_profiles() {
    let one = record("hover", "a.link", &[("opacity", "1")], &[("opacity", "0.5")]);
    let profiles = synthesize(&[one.clone(), one]);

    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0], profiles[1]);
    assert_eq!(profiles[0].name, "hover-on-link");
}

#[test]
fn records_are_grouped_by_first_appearance_of_selector() {
    let records = vec![
        record("click", "a", &[("opacity", "1")], &[("opacity", "0.5")]),
        record("click", "b", &[("opacity", "1")], &[("opacity", "0.4")]),
        record("hover", "a", &[("opacity", "0.5")], &[("opacity", "1")]),
    ];

    let profiles = synthesize(&records);
    let order: Vec<_> = profiles
        .iter()
        .map(|p| (p.trigger.selector.as_str(), p.trigger.event_kind.as_str()))
        .collect();

    assert_eq!(order, vec![("a", "click"), ("a", "hover"), ("b", "click")]);
}

#[test]
fn incomplete_and_insignificant_records_are_skipped() {
    let mut missing_after = record("click", "div.box", &[("opacity", "1")], &[("opacity", "0")]);
    missing_after.after_style = None;

    let mut missing_structural = record("click", "div.box", &[("opacity", "1")], &[("opacity", "0")]);
    missing_structural.before_structural = None;

    let insignificant = record("click", "div.box", &[("width", "100px")], &[("width", "100.4px")]);

    assert!(synthesize(&[missing_after, missing_structural, insignificant]).is_empty());
    assert!(synthesize(&[]).is_empty());
}

#[test]
fn class_count_change_is_a_class_toggle() {
    let records = vec![record_with_classes(
        "click",
        "nav.menu",
        &["menu"],
        &["menu", "open"],
        &[("height", "0px")],
        &[("height", "240px")],
    )];

    let profiles = synthesize(&records);

    assert_eq!(profiles[0].effect.effect_type, EffectType::ClassToggle);
}

#[test]
fn animation_name_change_is_an_animation() {
    let records = vec![record(
        "mouseenter",
        "div.badge",
        &[("animation-name", "none")],
        &[("animation-name", "pulse"), ("animation-duration", "1s")],
    )];

    let profiles = synthesize(&records);

    assert_eq!(profiles[0].effect.effect_type, EffectType::Animation);
    assert_eq!(profiles[0].name, "mouseenter-on-badge");
}

#[test]
fn timing_is_read_from_after_style_when_transition_changes() {
    let records = vec![record(
        "focus",
        r#"input[name="email"]"#,
        &[("transition", "none"), ("transform", "none")],
        &[
            ("transition", "transform 0.3s ease-in-out 0.1s"),
            ("transform", "translateY(-2px)"),
            ("transition-duration", "0.3s"),
            ("transition-timing-function", "ease-in-out"),
            ("transition-delay", "0.1s"),
        ],
    )];

    let profiles = synthesize(&records);

    assert_eq!(
        profiles[0].effect.timing,
        Some(Timing {
            duration: "0.3s".into(),
            easing: Some("ease-in-out".into()),
            delay: Some("0.1s".into()),
        })
    );
    assert_eq!(profiles[0].name, "focus-on-email");
}

#[test]
fn timing_defaults_when_longhands_are_missing() {
    let records = vec![record(
        "click",
        "div.panel",
        &[("transition", "none")],
        &[("transition", "all 0.2s")],
    )];

    let timing = synthesize(&records)[0].effect.timing.clone().unwrap();

    assert_eq!(timing.duration, "0s");
    assert_eq!(timing.easing.as_deref(), Some("ease"));
    assert_eq!(timing.delay, None);
}

#[test]
fn duration_change_alone_does_not_produce_timing() {
    let records = vec![record(
        "click",
        "div.panel",
        &[("transition-duration", "0s")],
        &[("transition-duration", "0.5s")],
    )];

    let profiles = synthesize(&records);

    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].effect.timing, None, "Timing keys off the transition shorthand");
}
