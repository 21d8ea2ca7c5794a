use thiserror::Error;

/// Errors raised at the edges of the profiler: reading inputs and decoding
/// the JSON shapes handed over by the instrumentation layer. The core
/// algorithms themselves are total and never produce these.
#[derive(Debug, Error)]
pub enum ProfilerError {
    /// Input file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON decoding failed
    #[error("JSON parse error ({context}): {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Node id outside the document
    #[error("node {0} not found in document")]
    NodeNotFound(usize),

    /// Node exists but is not an element
    #[error("node {0} is not an element")]
    NotAnElement(usize),
}
