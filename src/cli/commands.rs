use serde::de::DeserializeOwned;
use tracing::info;

use crate::cli::config::ProfilerConfig;
use crate::dom::dom_model::{NodeId, NodeRef, PageDocument};
use crate::error::ProfilerError;
use crate::mutation::compressor::compress;
use crate::mutation::mutation_model::MutationRecord;
use crate::profile::synthesizer::synthesize;
use crate::trace::record::{InteractionEvent, InteractionRecord};

// ============================================================================
// resolve subcommand
// ============================================================================

pub fn cmd_resolve(
    config: &ProfilerConfig,
    document_path: &str,
    node: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = load_document(document_path)?;
    let element = document
        .node(NodeId(node))
        .ok_or(ProfilerError::NodeNotFound(node))?
        .as_element()
        .ok_or(ProfilerError::NotAnElement(node))?;

    let resolved = config.build_resolver().resolve(element);
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

// ============================================================================
// capture subcommand
// ============================================================================

pub fn cmd_capture(
    config: &ProfilerConfig,
    before_path: &str,
    after_path: &str,
    node: usize,
    event: &str,
    timestamp: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let before = load_document(before_path)?;
    let after = load_document(after_path)?;
    let mut session = config.build_session();

    let token = session
        .capture_before(node_ref(&before, node)?, InteractionEvent::new(event, timestamp))
        .ok_or(ProfilerError::NotAnElement(node))?;

    info!(
        settle_delay_ms = session.settle_delay().as_millis() as u64,
        "after-document stands in for the settled page"
    );

    match session.capture_after(token, node_ref(&after, node)?) {
        Some(record) => println!("{}", serde_json::to_string_pretty(record)?),
        None => println!("null"),
    }
    Ok(())
}

// ============================================================================
// compress subcommand
// ============================================================================

pub fn cmd_compress(batch_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let batch: Vec<MutationRecord> = load_json(batch_path, "mutation batch")?;
    let intent = compress(&batch);
    println!("{}", serde_json::to_string_pretty(&intent)?);
    Ok(())
}

// ============================================================================
// synthesize subcommand
// ============================================================================

pub fn cmd_synthesize(records_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let records: Vec<InteractionRecord> = load_json(records_path, "interaction records")?;
    let profiles = synthesize(&records);
    info!(records = records.len(), profiles = profiles.len(), "synthesized profiles");
    println!("{}", serde_json::to_string_pretty(&profiles)?);
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn read_file(path: &str) -> Result<String, ProfilerError> {
    std::fs::read_to_string(path).map_err(|source| ProfilerError::Io {
        path: path.to_string(),
        source,
    })
}

/// Read and decode a JSON input file.
pub fn load_json<T: DeserializeOwned>(path: &str, context: &str) -> Result<T, ProfilerError> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|source| ProfilerError::Json {
        context: format!("{} ({})", context, path),
        source,
    })
}

pub fn load_document(path: &str) -> Result<PageDocument, ProfilerError> {
    PageDocument::from_json(&read_file(path)?)
}

fn node_ref(document: &PageDocument, node: usize) -> Result<NodeRef<'_>, ProfilerError> {
    document
        .node(NodeId(node))
        .ok_or(ProfilerError::NodeNotFound(node))
}
