use std::path::PathBuf;

pub use crate::complex::ParseComplexError;

/// A document failed to deserialize; `path` locates the offending node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("at JSON path {path} → {message}")]
pub struct DecodeError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("invalid glob pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("glob pattern matched no files: {0}")]
    NoMatches(String),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse JSON ({}{}): {source}", path.display(), line_suffix(*line))]
    Json {
        path: PathBuf,
        /// 1-based line for NDJSON input.
        line: Option<usize>,
        #[source]
        source: serde_json::Error,
    },
    #[error("JSON pointer {pointer:?} selects nothing in {}", path.display())]
    Pointer { path: PathBuf, pointer: String },
    #[error("jq: {0}")]
    Jq(String),
}

fn line_suffix(line: Option<usize>) -> String {
    line.map(|n| format!(":{n}")).unwrap_or_default()
}
