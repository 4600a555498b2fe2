//! jq pre-processing of input documents (via jaq).
use jaq_core::{load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

use crate::error::LoadError;

/// Run `filter_src` over `input`; every output of the filter is a separate document.
pub fn run_jaq(filter_src: &str, input: &Value) -> Result<Vec<Value>, LoadError> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader
        .load(&arena, program)
        .map_err(|errs| jq_error("parse error", errs))?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(|errs| jq_error("undefined", errs))?;

    let inputs = RcIter::new(core::iter::empty());
    let outputs = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut out = Vec::new();
    for item in outputs {
        let v = item.map_err(|e| LoadError::Jq(format!("{e:?}")))?;
        // Val renders as JSON text
        let v = serde_json::from_str::<Value>(&v.to_string())
            .map_err(|e| LoadError::Jq(format!("filter produced invalid JSON: {e}")))?;
        out.push(v);
    }
    tracing::debug!(filter = filter_src, outputs = out.len(), "applied jq filter");
    Ok(out)
}

/// Loader and compiler both report `(file, detail)` pairs; flatten them into one message.
fn jq_error<E: std::fmt::Debug>(stage: &str, errs: Vec<(load::File<&str, ()>, E)>) -> LoadError {
    let lines = errs
        .iter()
        .map(|(file, detail)| format!("{stage}: {detail:?} in `{}`", file.code))
        .collect::<Vec<_>>();
    LoadError::Jq(lines.join("\n"))
}
