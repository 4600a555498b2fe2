//! Minimal CLI: shapes | check
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::load::{Decoded, InputSettings};
use crate::records::Record;
use crate::shape;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// inspect the declared record shapes and validate JSON documents against them
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print the declared record shapes (fields, types, docs) as JSON
    Shapes(ShapesOut),
    /// decode `__typename`-tagged records and report failures
    Check(CheckOut),
}

#[derive(clap::Parser, Debug)]
struct ShapesOut {
    /// only these record names (declaration order is kept)
    #[arg(long, num_args = 1..)]
    only: Vec<String>,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct CheckOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// re-serialize the decoded records as a JSON array
    #[arg(long)]
    normalize: bool,

    /// output .json file for --normalize (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// Result of a `check` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSummary {
    pub ok: usize,
    pub failed: usize,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Returns `false` when some input failed validation.
    pub fn run(&self) -> Result<bool> {
        tracing::debug!(cli = ?self, "running");
        match &self.cmd {
            Command::Shapes(target) => {
                let selected = select_shapes(&target.only)?;
                let json = serde_json::to_string_pretty(&shape::emit_shapes(selected))?;
                write_output(target.out.as_deref(), &json)?;
                Ok(true)
            }
            Command::Check(target) => {
                let decoded = target
                    .input_settings
                    .decode_records()
                    .context("failed to load inputs")?;
                let summary = report(&decoded);
                if target.normalize {
                    let records = decoded
                        .into_iter()
                        .filter_map(|d| d.outcome.ok())
                        .collect::<Vec<Record>>();
                    let json = serde_json::to_string_pretty(&records)?;
                    write_output(target.out.as_deref(), &json)?;
                }
                eprintln!("{} ok, {} failed", summary.ok, summary.failed);
                Ok(summary.failed == 0)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn select_shapes(only: &[String]) -> Result<Vec<&'static shape::RecordShape>> {
    if let Some(unknown) = only.iter().find(|n| shape::shape_of(n).is_none()) {
        anyhow::bail!("unknown record name: {unknown}");
    }
    Ok(shape::shapes()
        .into_iter()
        .filter(|s| only.is_empty() || only.iter().any(|n| n == s.name))
        .collect())
}

/// One ✅/❌ line per record on stderr.
fn report(decoded: &[Decoded]) -> CheckSummary {
    let mut summary = CheckSummary { ok: 0, failed: 0 };
    for d in decoded {
        let at = format!("{}#{}", d.source.display(), d.index);
        match &d.outcome {
            Ok(record) => {
                summary.ok += 1;
                eprintln!("✅ {} {}", at, record.typename().green());
            }
            Err(error) => {
                summary.failed += 1;
                eprintln!("❌ {} {}", at, error.to_string().red());
            }
        }
    }
    summary
}

fn write_output(out: Option<&Path>, contents: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, contents)
                .with_context(|| format!("failed to write {}", out.display()))?;
            tracing::info!(path = %out.display(), "wrote output");
        }
        None => println!("{contents}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{A, MyType};
    use std::path::PathBuf;

    fn decoded(outcome: Result<Record, crate::error::DecodeError>) -> Decoded {
        Decoded { source: PathBuf::from("in.json"), index: 0, outcome }
    }

    #[test]
    fn parses_check_flags() {
        let cli = CommandLineInterface::try_parse_from([
            "dataclass-records", "check", "--ndjson", "--json-pointer", "/data", "-i", "a.json", "b.json",
            "--normalize",
        ])
        .unwrap();
        let Command::Check(check) = cli.cmd else { panic!("expected check") };
        assert!(check.input_settings.ndjson);
        assert!(check.normalize);
        assert_eq!(check.input_settings.json_pointer.as_deref(), Some("/data"));
        assert_eq!(check.input_settings.input, ["a.json", "b.json"]);
    }

    #[test]
    fn check_requires_inputs() {
        assert!(CommandLineInterface::try_parse_from(["dataclass-records", "check"]).is_err());
    }

    #[test]
    fn shape_selection_keeps_declaration_order() {
        let picked = select_shapes(&["B".into(), "MyType".into()]).unwrap();
        let names: Vec<_> = picked.iter().map(|s| s.name).collect();
        assert_eq!(names, ["MyType", "B"]);
        assert_eq!(select_shapes(&[]).unwrap().len(), 5);
        assert!(select_shapes(&["Nope".into()]).is_err());
    }

    #[test]
    fn report_counts_outcomes() {
        let err = crate::error::DecodeError { path: "real".into(), message: "bad".into() };
        let summary = report(&[
            decoded(Ok(MyType::new(1).into())),
            decoded(Ok(A::new("x").into())),
            decoded(Err(err)),
        ]);
        assert_eq!(summary, CheckSummary { ok: 2, failed: 1 });
    }

    #[test]
    fn shapes_and_normalize_write_to_out_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        std::fs::write(&input, r#"[{"__typename": "A", "a_string": "x"}, {"__typename": "A"}]"#).unwrap();
        let shapes_out = dir.path().join("nested/shapes.json");
        let normalized_out = dir.path().join("nested/records.json");

        let shapes = CommandLineInterface::try_parse_from([
            "dataclass-records", "shapes", "--only", "A", "--out", shapes_out.to_str().unwrap(),
        ])
        .unwrap();
        assert!(shapes.run().unwrap());
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&shapes_out).unwrap()).unwrap();
        assert!(written.get("A").is_some());
        assert!(written.get("B").is_none());

        let check = CommandLineInterface::try_parse_from([
            "dataclass-records", "check", "-i", input.to_str().unwrap(), "--normalize",
            "--out", normalized_out.to_str().unwrap(),
        ])
        .unwrap();
        assert!(!check.run().unwrap());
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&normalized_out).unwrap()).unwrap();
        assert_eq!(written, serde_json::json!([{"__typename": "A", "a_string": "x"}]));
    }
}
