use serde::Serialize;

///
/// SchemaDocument
/// one model file; namespace and imports are pre-scanned here so the
/// loader can order documents before the registry ever parses them
///

#[derive(Clone, Debug, Serialize)]
pub struct SchemaDocument {
    pub filename: String,
    pub text: String,
    pub namespace: String,
    pub imports: Vec<String>,
}

impl SchemaDocument {
    /// Shallow scan of the raw text for `namespace` and `import` lines.
    /// A missing namespace is left empty and rejected later by the
    /// registry with a proper registration error.
    #[must_use]
    pub fn scan(filename: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let mut namespace = String::new();
        let mut imports = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if let Some(rest) = line.strip_prefix("namespace ") {
                if namespace.is_empty() {
                    namespace = strip_version(rest.trim());
                }
            } else if let Some(rest) = line.strip_prefix("import ") {
                imports.push(import_namespace(rest.trim()));
            }
        }

        Self {
            filename: filename.into(),
            text,
            namespace,
            imports,
        }
    }

    #[must_use]
    pub fn has_imports(&self) -> bool {
        !self.imports.is_empty()
    }
}

/// Reduce an import target to the namespace it pulls from:
/// `org.acme.Foo` and `org.acme.*` both import from `org.acme`.
fn import_namespace(target: &str) -> String {
    // `import x.y.Foo from <url>`: the locator is irrelevant here
    let target = target.split_whitespace().next().unwrap_or(target);
    let target = strip_version(target);

    let Some((head, last)) = target.rsplit_once('.') else {
        return target.to_string();
    };

    if last == "*" || last.starts_with(|c: char| c.is_ascii_uppercase()) {
        head.to_string()
    } else {
        target.to_string()
    }
}

// namespaces may carry an `@major.minor.patch` suffix
fn strip_version(name: &str) -> String {
    name.split('@').next().unwrap_or(name).to_string()
}

///
/// Archive
/// a named bundle of documents for one domain/template
///

#[derive(Clone, Debug, Serialize)]
pub struct Archive {
    pub name: String,
    pub documents: Vec<SchemaDocument>,
}

impl Archive {
    #[must_use]
    pub fn namespaces(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.namespace.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_extracts_namespace_and_imports() {
        let doc = SchemaDocument::scan(
            "penalty.cto",
            "namespace org.acme.penalty@1.2.0\n\
             import org.accordproject.time.*\n\
             import org.acme.defs.Shipment\n\
             transaction Foo {}\n",
        );

        assert_eq!(doc.namespace, "org.acme.penalty");
        assert_eq!(
            doc.imports,
            vec!["org.accordproject.time", "org.acme.defs"]
        );
        assert!(doc.has_imports());
    }

    #[test]
    fn scan_tolerates_missing_namespace() {
        let doc = SchemaDocument::scan("bad.cto", "concept Foo {}\n");
        assert!(doc.namespace.is_empty());
        assert!(!doc.has_imports());
    }

    #[test]
    fn lowercase_import_tail_is_kept_whole() {
        let doc = SchemaDocument::scan("a.cto", "namespace a\nimport org.acme.defs\n");
        assert_eq!(doc.imports, vec!["org.acme.defs"]);
    }
}
