//! End-to-end generation pipeline.
//!
//! Load the archive root, classify every registered declaration,
//! synthesize the contract artifact, render all sources, and replace
//! the output tree.

use crate::{
    contract::{self, ContractArtifact},
    logic,
    plaindata::{PlainDataEmitter, SerdeStructEmitter},
    project::{self, EmitError},
};
use inkforge_schema::{
    classify::{Classification, Diagnostic},
    loader::{self, LoadError},
};
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;
use tracing::{info, warn};

///
/// PipelineError
///

#[derive(Debug, ThisError)]
pub enum PipelineError {
    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Load(#[from] LoadError),
}

///
/// Report
/// summary of a completed generation run
///

#[derive(Debug)]
pub struct Report {
    pub contract_name: String,
    pub diagnostics: Vec<Diagnostic>,
    pub emitted: Vec<PathBuf>,
}

/// Run the whole pipeline with the default serde emitter.
pub fn run(archive_root: &Path, out_dir: &Path) -> Result<Report, PipelineError> {
    run_with(archive_root, out_dir, &SerdeStructEmitter)
}

/// Run the pipeline with a caller-supplied plain-data emitter.
pub fn run_with(
    archive_root: &Path,
    out_dir: &Path,
    emitter: &dyn PlainDataEmitter,
) -> Result<Report, PipelineError> {
    let loaded = loader::load(archive_root)?;
    let classification = Classification::from_registry(&loaded.registry);

    if classification.is_empty() {
        warn!(root = %archive_root.display(), "no classifiable declarations; emitting minimal contract");
    }

    let artifact = ContractArtifact::synthesize(&classification);
    let source = contract::render::render(&artifact);
    let scaffold = logic::generate(&classification);
    let model_files = emitter.emit(&loaded.registry);

    let files = project::assemble(&artifact, &source, &scaffold, &model_files);
    let emitted = project::write(out_dir, &files)?;

    info!(
        contract = %artifact.contract_name,
        dropped = classification.diagnostics.len(),
        "generation complete"
    );

    Ok(Report {
        contract_name: artifact.contract_name,
        diagnostics: classification.diagnostics,
        emitted,
    })
}
