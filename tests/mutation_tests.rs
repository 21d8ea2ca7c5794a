use interaction_profiler::{
    dom::dom_model::NodeId,
    mutation::{
        compressor::compress,
        mutation_model::{Intent, MutationBatch, MutationRecord},
    },
};

#[test]
fn class_mutations_on_one_element_are_a_style_change() {
    let batch: MutationBatch = (0..5).map(|_| MutationRecord::attribute(NodeId(7), "class")).collect();

    let intent = compress(&batch);

    assert_eq!(intent.intent, Intent::StyleChange);
    assert_eq!(intent.affected_element_count, 1);
    assert_eq!(intent.summary, "5 mutations across 1 elements");
}

#[test]
fn child_list_on_several_elements_is_a_restructure() {
    let batch = vec![
        MutationRecord::child_list(NodeId(1), 1, 0),
        MutationRecord::child_list(NodeId(2), 0, 2),
        MutationRecord::child_list(NodeId(3), 1, 1),
    ];

    let intent = compress(&batch);

    assert_eq!(intent.intent, Intent::DomRestructure);
    assert_eq!(intent.affected_element_count, 3);
}

#[test]
fn empty_batch_is_unknown() {
    let intent = compress(&[]);

    assert_eq!(intent.intent, Intent::Unknown);
    assert_eq!(intent.affected_element_count, 0);
    assert_eq!(intent.summary, "0 mutations across 0 elements");
}

#[test]
fn child_list_on_one_element_is_a_content_update() {
    let batch = vec![
        MutationRecord::child_list(NodeId(4), 3, 3),
        MutationRecord::attribute(NodeId(4), "data-count"),
    ];

    assert_eq!(compress(&batch).intent, Intent::ContentUpdate);
}

#[test]
fn child_list_outranks_class_changes() {
    let batch = vec![
        MutationRecord::attribute(NodeId(1), "class"),
        MutationRecord::child_list(NodeId(2), 1, 0),
    ];

    let intent = compress(&batch);

    assert_eq!(intent.intent, Intent::DomRestructure);
    assert_eq!(intent.affected_element_count, 2);
}

#[test]
fn other_attributes_are_an_attribute_change() {
    let batch = vec![
        MutationRecord::attribute(NodeId(1), "aria-expanded"),
        MutationRecord::attribute(NodeId(2), "hidden"),
    ];

    let intent = compress(&batch);

    assert_eq!(intent.intent, Intent::AttributeChange);
    assert_eq!(intent.affected_element_count, 2);
}

#[test]
fn batch_decodes_from_instrumentation_json() {
    let json = r#"[
        {"kind": "attributes", "attributeName": "class", "target": 3},
        {"kind": "childList", "target": 3, "addedCount": 2, "removedCount": 0}
    ]"#;

    let batch: MutationBatch = serde_json::from_str(json).unwrap();
    let intent = compress(&batch);

    assert_eq!(batch[1].added_count, 2);
    assert_eq!(intent.intent, Intent::ContentUpdate);
    assert_eq!(
        serde_json::to_value(&intent).unwrap()["intent"],
        serde_json::json!("content-update")
    );
}
