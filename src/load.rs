//! Input resolution and record decoding.
//!
//! Pipeline per input file: read → split (whole file or NDJSON lines) →
//! JSON Pointer selection → jq filter → decode each document as one tagged
//! record or an array of them. Files are independent and processed on the
//! rayon pool; results come back in input order.
use std::path::{Path, PathBuf};

use clap::Args;
use rayon::prelude::*;
use serde_json::Value;

use crate::error::{DecodeError, LoadError};
use crate::path_de::decode_record;
use crate::records::Record;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Args, Debug, Clone, Default)]
pub struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    pub ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/segments)
    #[arg(long)]
    pub json_pointer: Option<String>,

    /// JQ pre-process filter for each document.
    #[arg(long)]
    pub jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    pub input: Vec<String>,
}

/// Documents read from one input file, after pointer/jq processing.
#[derive(Debug, Clone)]
pub struct SourceDocuments {
    pub source: PathBuf,
    pub documents: Vec<Value>,
}

/// Outcome of decoding a single record.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub source: PathBuf,
    /// Position of the record among all records of `source`.
    pub index: usize,
    pub outcome: Result<Record, DecodeError>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    pub fn new(input: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { input: input.into_iter().map(Into::into).collect(), ..Self::default() }
    }

    pub fn load_documents(&self) -> Result<Vec<SourceDocuments>, LoadError> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        tracing::info!(files = source_paths.len(), "loading inputs");
        source_paths
            .into_par_iter()
            .map(|source| {
                let documents = self.load_file(&source)?;
                Ok(SourceDocuments { source, documents })
            })
            .collect()
    }

    pub fn decode_records(&self) -> Result<Vec<Decoded>, LoadError> {
        let sources = self.load_documents()?;
        let decoded = sources
            .into_par_iter()
            .flat_map_iter(|SourceDocuments { source, documents }| {
                documents
                    .into_iter()
                    .flat_map(split_records)
                    .enumerate()
                    .map(move |(index, value)| Decoded {
                        source: source.clone(),
                        index,
                        outcome: decode_record(&value),
                    })
            })
            .collect::<Vec<_>>();
        let failed = decoded.iter().filter(|d| d.outcome.is_err()).count();
        tracing::info!(records = decoded.len(), failed, "decoded records");
        Ok(decoded)
    }

    fn load_file(&self, source_path: &Path) -> Result<Vec<Value>, LoadError> {
        let source = std::fs::read_to_string(source_path).map_err(|source| LoadError::Io {
            path: source_path.to_path_buf(),
            source,
        })?;
        let raw = if self.ndjson {
            parse_ndjson(source_path, &source)?
        } else {
            let value = serde_json::from_str::<Value>(&source).map_err(|source| LoadError::Json {
                path: source_path.to_path_buf(),
                line: None,
                source,
            })?;
            vec![value]
        };
        let mut out = Vec::with_capacity(raw.len());
        for value in raw {
            let value = match self.json_pointer.as_deref() {
                None => value,
                Some(pointer) => value.pointer(pointer).cloned().ok_or_else(|| LoadError::Pointer {
                    path: source_path.to_path_buf(),
                    pointer: pointer.to_string(),
                })?,
            };
            match self.jq_expr.as_deref() {
                None => out.push(value),
                Some(jq_expr) => out.extend(crate::jq_exec::run_jaq(jq_expr, &value)?),
            }
        }
        tracing::debug!(path = %source_path.display(), documents = out.len(), "loaded input");
        Ok(out)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn parse_ndjson(source_path: &Path, source: &str) -> Result<Vec<Value>, LoadError> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(ix, line)| {
            serde_json::from_str::<Value>(line).map_err(|source| LoadError::Json {
                path: source_path.to_path_buf(),
                line: Some(ix + 1),
                source,
            })
        })
        .collect()
}

/// A document is one tagged record or an array of them.
fn split_records(document: Value) -> Vec<Value> {
    match document {
        Value::Array(xs) => xs,
        other => vec![other],
    }
}

pub fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, LoadError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let entries = glob::glob(pattern).map_err(|source| LoadError::Pattern {
                pattern: pattern.to_string(),
                source,
            })?;
            let before = out.len();
            for entry in entries {
                match entry {
                    Ok(p) => out.push(p),
                    Err(e) => {
                        let path = e.path().to_path_buf();
                        return Err(LoadError::Io { path, source: e.into_error() });
                    }
                }
            }
            if out.len() == before {
                return Err(LoadError::NoMatches(pattern.to_string()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
