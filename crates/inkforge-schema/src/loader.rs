//! Archive discovery and registration.
//!
//! Each immediate subdirectory of the root is one archive; each archive
//! must hold a `model/` directory of `.cto` documents. Documents are
//! ordered by an explicit namespace-import dependency graph, topologically
//! sorted and stable with respect to discovery order, then registered
//! all-or-nothing: the first registration failure aborts the run, and one
//! cross-document validation pass follows.

use crate::{
    document::{Archive, SchemaDocument},
    registry::{ModelRegistry, RegistryError, TextRegistry},
};
use std::{
    collections::{BTreeMap, VecDeque},
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use tracing::{debug, info, warn};

pub const MODEL_DIR: &str = "model";
pub const DOCUMENT_EXTENSION: &str = "cto";

///
/// LoadError
///

#[derive(Debug, ThisError)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("import cycle across namespaces: {}", .0.join(" -> "))]
    ImportCycle(Vec<String>),

    #[error("registration failed for '{document}': {source}")]
    Registration {
        document: String,
        #[source]
        source: RegistryError,
    },

    #[error("model validation failed: {0}")]
    Validation(#[source] RegistryError),
}

///
/// LoadedModel
///

#[derive(Debug)]
pub struct LoadedModel {
    pub archives: Vec<Archive>,
    pub registry: TextRegistry,
}

/// Load every archive under `root` into a fresh [`TextRegistry`].
pub fn load(root: &Path) -> Result<LoadedModel, LoadError> {
    let mut registry = TextRegistry::new();
    let archives = load_with(root, &mut registry)?;

    Ok(LoadedModel { archives, registry })
}

/// Load every archive under `root` into the given registry. The registry
/// seam lets a production validator replace the built-in one.
pub fn load_with(
    root: &Path,
    registry: &mut dyn ModelRegistry,
) -> Result<Vec<Archive>, LoadError> {
    if !root.exists() {
        warn!(root = %root.display(), "archive root missing, creating it empty");
        fs::create_dir_all(root).map_err(|source| LoadError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        return Ok(Vec::new());
    }

    let mut archives = discover(root)?;
    let order = sort_documents(&archives)?;

    for (archive_idx, doc_idx) in &order {
        let doc = &archives[*archive_idx].documents[*doc_idx];
        debug!(document = %doc.filename, namespace = %doc.namespace, "registering");
        registry
            .register(&doc.text, &doc.filename)
            .map_err(|source| LoadError::Registration {
                document: doc.filename.clone(),
                source,
            })?;
    }

    registry.validate_all().map_err(LoadError::Validation)?;

    // reorder each archive's documents to the registration order
    for (archive_idx, archive) in archives.iter_mut().enumerate() {
        let mut ordered = Vec::with_capacity(archive.documents.len());
        for (a, d) in &order {
            if *a == archive_idx {
                ordered.push(archive.documents[*d].clone());
            }
        }
        archive.documents = ordered;
    }

    info!(
        archives = archives.len(),
        documents = order.len(),
        "model loaded"
    );

    Ok(archives)
}

fn discover(root: &Path) -> Result<Vec<Archive>, LoadError> {
    let read = |path: &Path| {
        fs::read_dir(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    let mut dirs: Vec<PathBuf> = read(root)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();

    let mut archives = Vec::new();
    for dir in dirs {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let model_dir = dir.join(MODEL_DIR);
        if !model_dir.is_dir() {
            warn!(archive = %name, "no '{MODEL_DIR}' directory, archive skipped");
            continue;
        }

        let mut files: Vec<PathBuf> = read(&model_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == DOCUMENT_EXTENSION))
            .collect();
        files.sort();

        let mut documents = Vec::new();
        for file in files {
            let text = fs::read_to_string(&file).map_err(|source| LoadError::Io {
                path: file.clone(),
                source,
            })?;
            let filename = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            documents.push(SchemaDocument::scan(filename, text));
        }

        archives.push(Archive { name, documents });
    }

    Ok(archives)
}

/// Stable topological sort of all discovered documents by namespace
/// imports. Edges only exist toward namespaces present in this run, so
/// system imports never constrain the order. Ties keep discovery order.
fn sort_documents(archives: &[Archive]) -> Result<Vec<(usize, usize)>, LoadError> {
    // discovery order of (archive, document) keys
    let mut keys: Vec<(usize, usize)> = Vec::new();
    let mut by_namespace: BTreeMap<&str, usize> = BTreeMap::new();

    for (a, archive) in archives.iter().enumerate() {
        for (d, doc) in archive.documents.iter().enumerate() {
            by_namespace.entry(&doc.namespace).or_insert(keys.len());
            keys.push((a, d));
        }
    }

    let doc = |idx: usize| -> &SchemaDocument {
        let (a, d) = keys[idx];
        &archives[a].documents[d]
    };

    // dependency edges: importer depends on imported
    let mut in_degree = vec![0_usize; keys.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); keys.len()];

    for idx in 0..keys.len() {
        for import in &doc(idx).imports {
            if let Some(&dep) = by_namespace.get(import.as_str()) {
                if dep != idx {
                    dependents[dep].push(idx);
                    in_degree[idx] += 1;
                }
            }
        }
    }

    let mut ready: VecDeque<usize> = (0..keys.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(keys.len());

    while let Some(idx) = ready.pop_front() {
        order.push(keys[idx]);
        for &dependent in &dependents[idx] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                // keep the ready set in discovery order for stability
                let pos = ready.partition_point(|&r| r < dependent);
                ready.insert(pos, dependent);
            }
        }
    }

    if order.len() < keys.len() {
        let mut cycle: Vec<String> = (0..keys.len())
            .filter(|&i| in_degree[i] > 0)
            .map(|i| doc(i).namespace.clone())
            .collect();
        cycle.sort();
        cycle.dedup();
        return Err(LoadError::ImportCycle(cycle));
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_archive(root: &Path, archive: &str, docs: &[(&str, &str)]) {
        let model = root.join(archive).join(MODEL_DIR);
        fs::create_dir_all(&model).unwrap();
        for (name, text) in docs {
            fs::write(model.join(name), text).unwrap();
        }
    }

    #[test]
    fn loaded_model_is_debuggable() {
        // unwrap_err on a load result needs the whole model to format
        let tmp = tempfile::tempdir().unwrap();
        write_archive(
            tmp.path(),
            "one",
            &[("a.cto", "namespace org.one\nconcept A {\n  o String x\n}\n")],
        );

        let loaded = load(tmp.path()).unwrap();
        assert!(format!("{loaded:?}").contains("org.one"));
    }

    #[test]
    fn missing_root_is_created_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("archives");

        let loaded = load(&root).unwrap();
        assert!(loaded.archives.is_empty());
        assert!(root.is_dir());
    }

    #[test]
    fn archive_without_model_dir_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("empty-archive")).unwrap();
        write_archive(
            tmp.path(),
            "good",
            &[("a.cto", "namespace org.good\nconcept Thing {\n  o String name\n}\n")],
        );

        let loaded = load(tmp.path()).unwrap();
        assert_eq!(loaded.archives.len(), 1);
        assert_eq!(loaded.archives[0].name, "good");
    }

    #[test]
    fn imports_order_documents_topologically() {
        let tmp = tempfile::tempdir().unwrap();
        // discovery order puts the importer first; toposort must flip it
        write_archive(
            tmp.path(),
            "pack",
            &[
                (
                    "a_main.cto",
                    "namespace org.pack.main\nimport org.pack.defs.*\nconcept Outer {\n  o Inner inner\n}\n",
                ),
                (
                    "b_defs.cto",
                    "namespace org.pack.defs\nconcept Inner {\n  o String value\n}\n",
                ),
            ],
        );

        let loaded = load(tmp.path()).unwrap();
        let names: Vec<&str> = loaded.archives[0]
            .documents
            .iter()
            .map(|d| d.filename.as_str())
            .collect();
        assert_eq!(names, vec!["b_defs.cto", "a_main.cto"]);
    }

    #[test]
    fn independent_archives_register_regardless_of_order() {
        let alpha = ("alpha", "namespace org.alpha\nconcept A {\n  o String x\n}\n");
        let beta = ("beta", "namespace org.beta\nconcept B {\n  o String y\n}\n");

        let mut sets = Vec::new();
        for pair in [[alpha, beta], [beta, alpha]] {
            let tmp = tempfile::tempdir().unwrap();
            for (name, text) in pair {
                write_archive(tmp.path(), name, &[("m.cto", text)]);
            }
            let loaded = load(tmp.path()).unwrap();
            let mut namespaces = loaded.registry.namespaces();
            namespaces.sort();
            sets.push(namespaces);
        }

        assert_eq!(sets[0], sets[1]);
        assert_eq!(sets[0], vec!["org.alpha", "org.beta"]);
    }

    #[test]
    fn import_cycle_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        write_archive(
            tmp.path(),
            "cyclic",
            &[
                ("a.cto", "namespace org.a\nimport org.b.*\nconcept A {\n  o String x\n}\n"),
                ("b.cto", "namespace org.b\nimport org.a.*\nconcept B {\n  o String y\n}\n"),
            ],
        );

        let err = load(tmp.path()).unwrap_err();
        match err {
            LoadError::ImportCycle(namespaces) => {
                assert_eq!(namespaces, vec!["org.a", "org.b"]);
            }
            other => panic!("expected cycle error, got {other}"),
        }
    }

    #[test]
    fn registration_failure_names_the_document() {
        let tmp = tempfile::tempdir().unwrap();
        write_archive(
            tmp.path(),
            "broken",
            &[("bad.cto", "namespace org.broken\nconcept Foo {\n  not a field\n}\n")],
        );

        let err = load(tmp.path()).unwrap_err();
        match err {
            LoadError::Registration { document, .. } => assert_eq!(document, "bad.cto"),
            other => panic!("expected registration error, got {other}"),
        }
    }

    #[test]
    fn unresolved_cross_document_reference_fails_validation() {
        let tmp = tempfile::tempdir().unwrap();
        write_archive(
            tmp.path(),
            "dangling",
            &[(
                "m.cto",
                "namespace org.dangling\nconcept Holder {\n  o Elsewhere thing\n}\n",
            )],
        );

        let err = load(tmp.path()).unwrap_err();
        assert!(matches!(err, LoadError::Validation(_)));
    }
}
