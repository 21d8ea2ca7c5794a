use std::io::Write;

use clap::Parser;
use interaction_profiler::cli::commands::{load_document, load_json};
use interaction_profiler::cli::config::{Cli, Commands, ProfilerConfig, load_config};
use interaction_profiler::error::ProfilerError;
use interaction_profiler::trace::record::InteractionRecord;

fn temp_file(name: &str, content: &str) -> String {
    let dir = std::env::temp_dir().join("interaction_profiler_cli_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    path.display().to_string()
}

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_capture_defaults() {
    let cli = Cli::parse_from([
        "interaction-profiler",
        "capture",
        "--before",
        "a.json",
        "--after",
        "b.json",
        "--node",
        "14",
    ]);
    match cli.command {
        Commands::Capture {
            before,
            after,
            node,
            event,
            timestamp,
        } => {
            assert_eq!(before, "a.json");
            assert_eq!(after, "b.json");
            assert_eq!(node, 14);
            assert_eq!(event, "click");
            assert_eq!(timestamp, 0);
        }
        _ => panic!("Expected Capture command"),
    }
    assert_eq!(cli.verbose, 0);
}

#[test]
fn cli_parse_global_flags() {
    let cli = Cli::parse_from([
        "interaction-profiler",
        "-vv",
        "synthesize",
        "--records",
        "trace.json",
        "--config",
        "custom.yaml",
    ]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config.as_deref(), Some("custom.yaml"));
    assert!(matches!(cli.command, Commands::Synthesize { records } if records == "trace.json"));
}

#[test]
fn cli_requires_node_for_resolve() {
    let result = Cli::try_parse_from(["interaction-profiler", "resolve", "--document", "page.json"]);
    assert!(result.is_err());
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn missing_config_falls_back_to_defaults() {
    let config = load_config(Some("nonexistent_file_that_does_not_exist.yaml"));
    assert_eq!(config, ProfilerConfig::default());
    assert_eq!(config.settle_delay_ms, 50);
    assert_eq!(config.max_ancestor_depth, 5);
}

#[test]
fn partial_config_keeps_other_defaults() {
    let path = temp_file("partial.yaml", "settle_delay_ms: 120\nmax_ancestor_depth: 3\n");
    let config = load_config(Some(&path));

    assert_eq!(config.settle_delay_ms, 120);
    assert_eq!(config.max_ancestor_depth, 3);
    assert_eq!(config.max_markup_len, 500);
    assert_eq!(config.build_session().settle_delay().as_millis(), 120);
    assert_eq!(config.build_resolver().max_depth(), 3);
}

#[test]
fn malformed_config_falls_back_to_defaults() {
    let path = temp_file("malformed.yaml", "settle_delay_ms: [not, a, number]\n");
    assert_eq!(load_config(Some(&path)), ProfilerConfig::default());
}

// ============================================================================
// Input Loading Tests
// ============================================================================

#[test]
fn records_load_from_json() {
    let path = temp_file(
        "records.json",
        r#"[{
            "timestamp": 10,
            "eventKind": "click",
            "selector": "button.cta",
            "beforeStructural": {"selector": "button.cta", "html": "<button>"},
            "beforeStyle": {"selector": "button.cta", "styles": {"opacity": "1"}},
            "afterStructural": {"selector": "button.cta", "html": "<button>"},
            "afterStyle": {"selector": "button.cta", "styles": {"opacity": "0.5"}}
        }]"#,
    );

    let records: Vec<InteractionRecord> = load_json(&path, "interaction records").unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].selector.as_str(), "button.cta");
    assert!(records[0].changes.is_none());
    assert_eq!(interaction_profiler::synthesize(&records).len(), 1);
}

#[test]
fn loading_errors_name_their_cause() {
    let missing = load_document("definitely/not/here.json");
    assert!(matches!(missing, Err(ProfilerError::Io { .. })));

    let path = temp_file("broken.json", "{ not json");
    let broken = load_document(&path);
    match broken {
        Err(ProfilerError::Json { context, .. }) => assert_eq!(context, "page document"),
        other => panic!("Expected JSON error, got {:?}", other.map(|d| d.len())),
    }
}
