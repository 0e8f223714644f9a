//! End-to-end scaffolding pipeline: resolve → substitute → materialize.
//!
//! The pipeline is deliberately sequential. Template sets are tens to low
//! hundreds of entries, so deterministic output ordering matters more than
//! throughput. Every entry is substituted before anything touches the
//! destination: an unresolved token therefore aborts with zero files
//! written, and the only mid-run failures are write failures, which are
//! reported per entry.

use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::error::Result;
use crate::loader::TemplateSet;
use crate::materialize::{MaterializationResult, Materializer};
use crate::subst::{ResolvedEntry, SubstitutionEngine};
use crate::vars::{ProjectName, VariableTable};

/// Options controlling a scaffolding run.
#[derive(Default)]
pub struct ScaffoldOptions {
    /// Replace files that already exist at final paths.
    pub overwrite: bool,
    /// Cooperative cancellation flag, checked at entry boundaries.
    pub cancel: Option<Arc<AtomicBool>>,
}

/// Materialize `set` under `dest` with all placeholder values derived from
/// `name`.
pub fn scaffold(
    set: &TemplateSet,
    name: &ProjectName,
    dest: &Path,
    options: &ScaffoldOptions,
) -> Result<MaterializationResult> {
    let vars = VariableTable::new(name);
    let engine = SubstitutionEngine::new();

    let resolved: Vec<ResolvedEntry> = set
        .entries()
        .iter()
        .map(|entry| engine.resolve(entry, &vars))
        .collect::<Result<_>>()?;

    tracing::info!(
        entries = resolved.len(),
        dest = %dest.display(),
        "materializing project '{name}'"
    );

    let mut materializer = Materializer::new(dest).overwrite(options.overwrite);
    if let Some(cancel) = &options.cancel {
        materializer = materializer.with_cancel_flag(Arc::clone(cancel));
    }
    materializer.run(&resolved)
}
