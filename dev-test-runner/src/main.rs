//! Decode every sample under `samples/` and print one line per record.
//!
//! `records.json` must decode cleanly (segment values included);
//! `broken.json` must fail on every entry.
use std::path::Path;

use anyhow::{Context, Result, bail};
use dataclass_records::path_de::decode_record;
use dataclass_records::Record;
use serde_json::Value;

fn load(path: &Path) -> Result<Vec<Value>> {
    let source = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str::<Value>(&source).with_context(|| format!("parse {}", path.display()))?;
    match value {
        Value::Array(xs) => Ok(xs),
        other => Ok(vec![other]),
    }
}

fn segment_value(record: &Record) -> Option<String> {
    let parsed = match record {
        Record::ComplexSegment(s) => s.complex_value(),
        Record::ComplexSegment22(s) => s.complex_value(),
        _ => return None,
    };
    Some(match parsed {
        Ok(c) => c.to_string(),
        Err(error) => format!("<{error}>"),
    })
}

fn main() -> Result<()> {
    let samples = Path::new(env!("CARGO_MANIFEST_DIR")).join("samples");

    let mut bad = 0;
    for value in load(&samples.join("records.json"))? {
        match decode_record(&value) {
            Ok(record) => {
                let extra = segment_value(&record).unwrap_or_default();
                if extra.starts_with('<') {
                    bad += 1;
                }
                eprintln!("✅ {} {extra}", record.typename());
            }
            Err(error) => {
                bad += 1;
                eprintln!("❌ {error}");
            }
        }
    }

    for value in load(&samples.join("broken.json"))? {
        match decode_record(&value) {
            Ok(record) if segment_value(&record).is_some_and(|v| v.starts_with('<')) => {
                eprintln!("✅ rejected value of {}", record.typename());
            }
            Ok(record) => {
                bad += 1;
                eprintln!("❌ unexpectedly decoded {}", record.typename());
            }
            Err(error) => eprintln!("✅ rejected: {error}"),
        }
    }

    if bad > 0 {
        bail!("{bad} sample(s) misbehaved");
    }
    Ok(())
}
