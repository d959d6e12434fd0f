//! Output-project assembly and writing.
//!
//! Mechanical: collects every generated file into one list, then replaces
//! the output tree wholesale. There is no merge; regeneration overwrites
//! everything, scaffolds included.

use crate::{contract::ContractArtifact, logic::LogicArtifact};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use tracing::info;

///
/// EmitError
///

#[derive(Debug, ThisError)]
pub enum EmitError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

///
/// GeneratedFile
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedFile {
    /// path relative to the output project's `src/`
    pub path: String,
    pub content: String,
}

/// Assemble the full output file list: manifest, contract, logic
/// scaffold, model files, utilities, readme.
#[must_use]
pub fn assemble(
    artifact: &ContractArtifact,
    contract_source: &str,
    logic: &LogicArtifact,
    model_files: &[GeneratedFile],
) -> Vec<GeneratedFile> {
    let mut files = vec![
        GeneratedFile {
            path: "../Cargo.toml".to_string(),
            content: manifest(artifact),
        },
        GeneratedFile {
            path: "../README.md".to_string(),
            content: readme(artifact),
        },
        GeneratedFile {
            path: "lib.rs".to_string(),
            content: contract_source.to_string(),
        },
        GeneratedFile {
            path: "main.rs".to_string(),
            content: logic.main.clone(),
        },
        GeneratedFile {
            path: "logic.rs".to_string(),
            content: logic.logic.clone(),
        },
        GeneratedFile {
            path: "logic_test.rs".to_string(),
            content: logic.test.clone(),
        },
        GeneratedFile {
            path: "utils.rs".to_string(),
            content: UTILS.to_string(),
        },
    ];
    files.extend(model_files.iter().cloned());
    files
}

/// Replace `out_dir` with the generated tree; returns written paths in
/// emit order for the success report.
pub fn write(out_dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, EmitError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| EmitError::Io { path, source }
    };

    if out_dir.exists() {
        fs::remove_dir_all(out_dir).map_err(io_err(out_dir))?;
    }

    let src = out_dir.join("src");
    fs::create_dir_all(&src).map_err(io_err(&src))?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = src.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }
        fs::write(&path, &file.content).map_err(io_err(&path))?;
        written.push(path);
    }

    info!(files = written.len(), out = %out_dir.display(), "project emitted");
    Ok(written)
}

fn manifest(artifact: &ContractArtifact) -> String {
    format!(
        "[package]\n\
         name = \"{module}\"\n\
         version = \"0.1.0\"\n\
         edition = \"2021\"\n\
         publish = false\n\n\
         [dependencies]\n\
         ink = {{ version = \"4.3\", default-features = false }}\n\
         scale = {{ package = \"parity-scale-codec\", version = \"3\", default-features = false, features = [\"derive\"] }}\n\
         scale-info = {{ version = \"2.6\", default-features = false, features = [\"derive\"], optional = true }}\n\
         serde = {{ version = \"1.0\", features = [\"derive\"], optional = true }}\n\
         serde_json = {{ version = \"1.0\", optional = true }}\n\
         chrono = {{ version = \"0.4\", features = [\"serde\"], optional = true }}\n\
         futures = {{ version = \"0.3\", optional = true }}\n\n\
         [lib]\n\
         path = \"src/lib.rs\"\n\n\
         [[bin]]\n\
         name = \"{module}-logic\"\n\
         path = \"src/main.rs\"\n\
         required-features = [\"std\"]\n\n\
         [features]\n\
         default = [\"std\"]\n\
         std = [\n\
             \"ink/std\",\n\
             \"scale/std\",\n\
             \"scale-info/std\",\n\
             \"dep:serde\",\n\
             \"dep:serde_json\",\n\
             \"dep:chrono\",\n\
             \"dep:futures\",\n\
         ]\n\
         ink-as-dependency = []\n",
        module = artifact.module_name
    )
}

fn readme(artifact: &ContractArtifact) -> String {
    format!(
        "# {name}\n\n\
         Generated ink! contract scaffold for the `{name}` template.\n\n\
         - `src/lib.rs`: the contract (storage, events, messages, errors).\n\
         - `src/main.rs`: host runner mounting the module tree; feeds `trigger` from JSON inputs.\n\
         - `src/model/`: plain serde data types, one file per namespace.\n\
         - `src/logic.rs`: business-logic stub. Fill in the marked TODOs.\n\
         - `src/logic_test.rs`: synthetic-data smoke test for the stub.\n\n\
         Run it with `cargo run --bin {module}-logic template.json request.json`.\n\n\
         Request ids derive from the block number and are not collision-free\n\
         for calls landing in the same block.\n\n\
         Regeneration overwrites this whole tree, including any edits to the\n\
         logic scaffold; keep your changes under version control.\n",
        name = artifact.contract_name,
        module = artifact.module_name
    )
}

const UTILS: &str = "\
//! Shared helpers for generated code.\n\n\
/// Milliseconds per day, for duration arithmetic in logic code.\n\
pub const MS_PER_DAY: u64 = 86_400_000;\n\n\
/// Convert a percentage expressed as fixed-point hundredths into a\n\
/// multiplier over an amount.\n\
#[must_use]\n\
pub fn apply_percentage(amount: u128, hundredths: u128) -> u128 {\n\
    amount.saturating_mul(hundredths) / 10_000\n\
}\n";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{contract, logic};
    use inkforge_schema::{
        classify::Classification,
        registry::{ModelRegistry, TextRegistry},
    };

    fn artifacts() -> (ContractArtifact, String, LogicArtifact) {
        let mut registry = TextRegistry::new();
        registry
            .register(inkforge_fixtures::LATE_DELIVERY_AND_PENALTY, "penalty.cto")
            .unwrap();
        registry.validate_all().unwrap();
        let classification = Classification::from_registry(&registry);
        let artifact = ContractArtifact::synthesize(&classification);
        let source = contract::render::render(&artifact);
        let scaffold = logic::generate(&classification);
        (artifact, source, scaffold)
    }

    #[test]
    fn assemble_includes_fixed_auxiliary_files() {
        let (artifact, source, scaffold) = artifacts();
        let files = assemble(&artifact, &source, &scaffold, &[]);
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();

        assert!(paths.contains(&"../Cargo.toml"));
        assert!(paths.contains(&"../README.md"));
        assert!(paths.contains(&"lib.rs"));
        assert!(paths.contains(&"main.rs"));
        assert!(paths.contains(&"logic.rs"));
        assert!(paths.contains(&"logic_test.rs"));
        assert!(paths.contains(&"utils.rs"));
    }

    #[test]
    fn scaffold_files_are_reachable_from_the_binary_root() {
        let (artifact, source, scaffold) = artifacts();
        let files = assemble(&artifact, &source, &scaffold, &[]);

        let main = files.iter().find(|f| f.path == "main.rs").unwrap();
        assert!(main.content.contains("mod logic;"));
        assert!(main.content.contains("mod logic_test;"));
        assert!(main.content.contains("mod model;"));
        assert!(main.content.contains("mod utils;"));

        // the manifest declares the runner as a second build target
        let manifest = &files[0];
        assert!(manifest.content.contains("[[bin]]"));
        assert!(manifest.content.contains("name = \"latedeliveryandpenalty-logic\""));
        assert!(manifest.content.contains("path = \"src/main.rs\""));
    }

    #[test]
    fn write_replaces_the_output_tree() {
        let (artifact, source, scaffold) = artifacts();
        let files = assemble(&artifact, &source, &scaffold, &[]);

        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("generated");

        // a stale file from a previous run must not survive
        fs::create_dir_all(out.join("src")).unwrap();
        fs::write(out.join("src/stale.rs"), "// stale").unwrap();

        let written = write(&out, &files).unwrap();
        assert_eq!(written.len(), files.len());
        assert!(!out.join("src/stale.rs").exists());
        assert!(out.join("Cargo.toml").exists());
        assert!(out.join("src/lib.rs").exists());
    }

    #[test]
    fn scaffold_overwrite_is_unconditional() {
        let (artifact, source, scaffold) = artifacts();
        let files = assemble(&artifact, &source, &scaffold, &[]);

        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("generated");
        write(&out, &files).unwrap();

        // simulate a hand edit, then regenerate
        fs::write(out.join("src/logic.rs"), "// my edits\n").unwrap();
        write(&out, &files).unwrap();

        let logic = fs::read_to_string(out.join("src/logic.rs")).unwrap();
        assert!(!logic.contains("my edits"));
        assert!(logic.contains("pub async fn trigger("));
    }

    #[test]
    fn manifest_names_the_contract_module() {
        let (artifact, source, scaffold) = artifacts();
        let files = assemble(&artifact, &source, &scaffold, &[]);
        let manifest = &files[0];
        assert!(manifest.content.contains("name = \"latedeliveryandpenalty\""));
    }
}
