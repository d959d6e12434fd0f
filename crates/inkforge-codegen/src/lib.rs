//! ## Crate layout
//! - `contract`: contract artifact synthesis and ink! source rendering.
//! - `logic`: business-logic scaffold and its synthetic-data test.
//! - `plaindata`: serde data-type emission, one file per namespace.
//! - `project`: output-tree assembly and wholesale writing.
//! - `pipeline`: load, classify, synthesize, render, emit.

pub mod contract;
pub mod logic;
pub mod pipeline;
pub mod plaindata;
pub mod project;

use crate::{pipeline::PipelineError, project::EmitError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        contract::{ContractArtifact, Event, Message, State, StorageField, StorageLayout, render},
        logic::LogicArtifact,
        pipeline::{Report, run, run_with},
        plaindata::{PlainDataEmitter, SerdeStructEmitter},
        project::GeneratedFile,
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}
