//! ## Crate layout
//! - `document`: archives and pre-scanned schema documents.
//! - `loader`: archive discovery, import-graph ordering, registration.
//! - `registry`: the validator seam and the built-in text registry.
//! - `classify`: role tagging of declarations into five ordered lists.
//! - `mapper`: the pure domain-to-target type mapping.
//! - `types`: closed enums shared across the compiler.

pub mod classify;
pub mod document;
pub mod loader;
pub mod mapper;
pub mod registry;
pub mod types;

use crate::{loader::LoadError, registry::RegistryError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        classify::{Classification, Declaration, Diagnostic, EnumDecl, Property},
        document::{Archive, SchemaDocument},
        loader::{LoadedModel, load, load_with},
        mapper,
        registry::{ModelRegistry, RawDeclaration, RawProperty, TextRegistry},
        types::{Category, DomainType, KnownBase, Profile, Role},
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
