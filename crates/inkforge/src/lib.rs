//! Inkforge: Concerto model archives in, ink! contract projects out
//!
//! This is the public meta-crate. Downstream users depend on **inkforge**
//! only.
//!
//! It re-exports the stable public API from:
//!   - `inkforge-schema`  (archive loading, validation, classification)
//!   - `inkforge-codegen` (synthesis, rendering, project emission)

pub use inkforge_codegen as codegen;
pub use inkforge_schema as schema;

pub use codegen::pipeline::{Report, run, run_with};

use thiserror::Error as ThisError;

//
// Prelude
//

pub mod prelude {
    pub use inkforge_codegen::prelude::*;
    pub use inkforge_schema::prelude::*;
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Codegen(#[from] inkforge_codegen::Error),

    #[error(transparent)]
    Schema(#[from] inkforge_schema::Error),
}
