//! Registry seam between the loader and the classifier.
//!
//! The production system treats the validator/registry as a third-party
//! collaborator; [`ModelRegistry`] is the seam, and [`TextRegistry`] is the
//! built-in implementation covering the document subset the fixtures use.
//! A namespace registers exactly once per run; cross-document validation
//! only runs after every document has been registered.

use crate::types::{Category, DomainType};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// RegistryError
///

#[derive(Debug, ThisError)]
pub enum RegistryError {
    #[error("{document}:{line}: {message}")]
    Parse {
        document: String,
        line: usize,
        message: String,
    },

    #[error("document '{document}' declares no namespace")]
    MissingNamespace { document: String },

    #[error("namespace '{namespace}' is registered twice ('{previous}' and '{document}')")]
    DuplicateNamespace {
        namespace: String,
        previous: String,
        document: String,
    },

    #[error("unresolved type '{type_name}' referenced by {fqn}")]
    Unresolved { fqn: String, type_name: String },
}

///
/// RawProperty
/// one field as the registry saw it, before any mapping
///

#[derive(Clone, Debug, Serialize)]
pub struct RawProperty {
    pub name: String,
    pub declared_type: String,
    pub optional: bool,
    pub array: bool,
    pub reference: bool,
}

///
/// RawDeclaration
///

#[derive(Clone, Debug, Serialize)]
pub struct RawDeclaration {
    pub name: String,
    pub namespace: String,
    pub category: Category,
    /// supertype as written in the document, if any
    pub supertype: Option<String>,
    /// supertype resolved to a fully-qualified name, where resolution
    /// succeeded; unresolvable supertypes stay `None` and surface in
    /// `validate_all`
    pub supertype_fqn: Option<String>,
    pub properties: Vec<RawProperty>,
    /// enum declarations carry variants instead of properties
    pub variants: Vec<String>,
}

impl RawDeclaration {
    #[must_use]
    pub fn fqn(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }
}

///
/// ModelRegistry
/// the validator collaborator: register every document of the run, then
/// validate cross-document references in one pass
///

pub trait ModelRegistry {
    /// Parse and register one document. The first failure aborts the run.
    fn register(&mut self, text: &str, name: &str) -> Result<(), RegistryError>;

    /// Cross-document validation; only meaningful once every document of
    /// the run has been registered.
    fn validate_all(&self) -> Result<(), RegistryError>;

    /// Registered non-system namespaces, in registration order.
    fn namespaces(&self) -> Vec<String>;

    /// Every registered namespace, system models included; the plain-data
    /// emitter uses this so referenced builtin concepts get emitted too.
    fn all_namespaces(&self) -> Vec<String> {
        self.namespaces()
    }

    /// Declarations of one namespace, in document order, with supertypes
    /// resolved to fully-qualified names where possible.
    fn declarations_of(&self, namespace: &str) -> Vec<RawDeclaration>;
}

///
/// TextRegistry
///

#[derive(Debug)]
struct NamespaceModel {
    imports: Vec<String>,
    declarations: Vec<RawDeclaration>,
    document: String,
    system: bool,
}

#[derive(Debug, Default)]
pub struct TextRegistry {
    namespaces: BTreeMap<String, NamespaceModel>,
    order: Vec<String>,
}

impl TextRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.seed_system_namespaces();
        registry
    }

    /// Resolve a type name written inside `namespace` to a fully-qualified
    /// name: qualified names resolve as written, unqualified names resolve
    /// against the namespace itself and then its imports, in order.
    #[must_use]
    pub fn resolve(&self, namespace: &str, type_name: &str) -> Option<String> {
        if type_name.contains('.') {
            let (ns, name) = type_name.rsplit_once('.')?;
            return self.lookup(ns, name).then(|| type_name.to_string());
        }

        if self.lookup(namespace, type_name) {
            return Some(format!("{namespace}.{type_name}"));
        }

        let model = self.namespaces.get(namespace)?;
        model
            .imports
            .iter()
            .find(|import| self.lookup(import, type_name))
            .map(|import| format!("{import}.{type_name}"))
    }

    fn lookup(&self, namespace: &str, name: &str) -> bool {
        self.namespaces
            .get(namespace)
            .is_some_and(|model| model.declarations.iter().any(|d| d.name == name))
    }

    fn insert(
        &mut self,
        namespace: String,
        model: NamespaceModel,
        document: &str,
    ) -> Result<(), RegistryError> {
        if let Some(previous) = self.namespaces.get(&namespace) {
            return Err(RegistryError::DuplicateNamespace {
                namespace,
                previous: previous.document.clone(),
                document: document.to_string(),
            });
        }
        self.order.push(namespace.clone());
        self.namespaces.insert(namespace, model);
        Ok(())
    }

    // The Accord runtime/contract/time/money namespaces ship with the
    // compiler so archives can extend them without bundling the documents.
    fn seed_system_namespaces(&mut self) {
        for (namespace, text) in SYSTEM_MODELS {
            let mut model = parse_document(text, namespace).expect("builtin model parses");
            model.system = true;
            self.order.push((*namespace).to_string());
            self.namespaces.insert((*namespace).to_string(), model);
        }
    }
}

impl ModelRegistry for TextRegistry {
    fn register(&mut self, text: &str, name: &str) -> Result<(), RegistryError> {
        let model = parse_document(text, name)?;
        let namespace = model
            .declarations
            .first()
            .map(|d| d.namespace.clone())
            .or_else(|| first_namespace(text))
            .ok_or_else(|| RegistryError::MissingNamespace {
                document: name.to_string(),
            })?;

        self.insert(namespace, model, name)
    }

    fn validate_all(&self) -> Result<(), RegistryError> {
        for model in self.namespaces.values().filter(|m| !m.system) {
            for decl in &model.declarations {
                if let (Some(supertype), None) = (&decl.supertype, &decl.supertype_fqn) {
                    if self.resolve(&decl.namespace, supertype).is_none() {
                        return Err(RegistryError::Unresolved {
                            fqn: decl.fqn(),
                            type_name: supertype.clone(),
                        });
                    }
                }

                for prop in &decl.properties {
                    if DomainType::parse(&prop.declared_type).is_scalar() {
                        continue;
                    }
                    if self.resolve(&decl.namespace, &prop.declared_type).is_none() {
                        return Err(RegistryError::Unresolved {
                            fqn: decl.fqn(),
                            type_name: prop.declared_type.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    fn namespaces(&self) -> Vec<String> {
        self.order
            .iter()
            .filter(|ns| self.namespaces.get(*ns).is_some_and(|m| !m.system))
            .cloned()
            .collect()
    }

    fn all_namespaces(&self) -> Vec<String> {
        self.order.clone()
    }

    fn declarations_of(&self, namespace: &str) -> Vec<RawDeclaration> {
        let Some(model) = self.namespaces.get(namespace) else {
            return Vec::new();
        };

        model
            .declarations
            .iter()
            .map(|decl| {
                let mut decl = decl.clone();
                if decl.supertype_fqn.is_none() {
                    decl.supertype_fqn = decl
                        .supertype
                        .as_deref()
                        .and_then(|s| self.resolve(namespace, s));
                }
                decl
            })
            .collect()
    }
}

///
/// document parsing
///

fn first_namespace(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("namespace "))
        .map(|ns| ns.split('@').next().unwrap_or(ns).trim().to_string())
}

fn parse_document(text: &str, document: &str) -> Result<NamespaceModel, RegistryError> {
    let mut namespace = String::new();
    let mut imports = Vec::new();
    let mut declarations: Vec<RawDeclaration> = Vec::new();
    let mut current: Option<RawDeclaration> = None;
    let mut in_block_comment = false;

    let err = |line: usize, message: String| RegistryError::Parse {
        document: document.to_string(),
        line,
        message,
    };

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let mut line = raw_line.trim();

        if in_block_comment {
            match line.find("*/") {
                Some(end) => {
                    line = line[end + 2..].trim();
                    in_block_comment = false;
                }
                None => continue,
            }
        }
        if let Some(start) = line.find("/*") {
            // single-line block comments collapse in place
            match line[start..].find("*/") {
                Some(end) => {
                    let tail = line[start + end + 2..].to_string();
                    line = line[..start].trim();
                    if !tail.trim().is_empty() {
                        return Err(err(line_no, format!("unexpected trailing text '{tail}'")));
                    }
                }
                None => {
                    line = line[..start].trim();
                    in_block_comment = true;
                }
            }
        }
        if let Some(comment) = line.find("//") {
            line = line[..comment].trim();
        }
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("namespace ") {
            namespace = rest.split('@').next().unwrap_or(rest).trim().to_string();
            continue;
        }
        if let Some(rest) = line.strip_prefix("import ") {
            imports.push(import_target(rest.trim()));
            continue;
        }

        if current.is_some() {
            if line == "}" {
                declarations.extend(current.take());
            } else if let Some(decl) = current.as_mut() {
                if decl.category == Category::Enum {
                    let variant = line.strip_prefix("o ").ok_or_else(|| {
                        err(line_no, format!("expected enum variant, got '{line}'"))
                    })?;
                    decl.variants.push(variant.trim().to_string());
                } else {
                    decl.properties
                        .push(parse_property(line).map_err(|m| err(line_no, m))?);
                }
            }
            continue;
        }

        if namespace.is_empty() {
            return Err(err(line_no, "declaration before namespace".to_string()));
        }
        current = Some(parse_header(line, &namespace).map_err(|m| err(line_no, m))?);
        // single-line empty body: `concept Foo {}`
        if line.ends_with("{}") {
            declarations.extend(current.take());
        }
    }

    if let Some(decl) = current {
        return Err(err(
            text.lines().count(),
            format!("unterminated declaration '{}'", decl.name),
        ));
    }
    if namespace.is_empty() && !declarations.is_empty() {
        return Err(RegistryError::MissingNamespace {
            document: document.to_string(),
        });
    }

    Ok(NamespaceModel {
        imports,
        declarations,
        document: document.to_string(),
        system: false,
    })
}

fn import_target(rest: &str) -> String {
    let target = rest.split_whitespace().next().unwrap_or(rest);
    let target = target.split('@').next().unwrap_or(target);
    match target.rsplit_once('.') {
        Some((head, last)) if last == "*" || last.starts_with(|c: char| c.is_ascii_uppercase()) => {
            head.to_string()
        }
        _ => target.to_string(),
    }
}

fn parse_header(line: &str, namespace: &str) -> Result<RawDeclaration, String> {
    let mut tokens = line
        .trim_end_matches("{}")
        .trim_end_matches('{')
        .split_whitespace();

    let mut keyword = tokens.next().ok_or("empty declaration header")?;
    if keyword == "abstract" {
        keyword = tokens.next().ok_or("dangling 'abstract'")?;
    }

    let category = keyword
        .parse::<Category>()
        .ok()
        .or_else(|| {
            let mut chars = keyword.chars();
            let upper = chars.next()?.to_ascii_uppercase().to_string() + chars.as_str();
            upper.parse::<Category>().ok()
        })
        .ok_or_else(|| format!("unknown declaration keyword '{keyword}'"))?;

    let name = tokens
        .next()
        .ok_or_else(|| format!("{category} declaration without a name"))?
        .to_string();

    let supertype = match (tokens.next(), tokens.next()) {
        (Some("extends"), Some(supertype)) => Some(supertype.to_string()),
        (Some("identified"), _) | (None, _) => None,
        (Some(token), _) => return Err(format!("unexpected token '{token}'")),
    };

    Ok(RawDeclaration {
        name,
        namespace: namespace.to_string(),
        category,
        supertype,
        supertype_fqn: None,
        properties: Vec::new(),
        variants: Vec::new(),
    })
}

fn parse_property(line: &str) -> Result<RawProperty, String> {
    let (reference, rest) = if let Some(rest) = line.strip_prefix("o ") {
        (false, rest)
    } else if let Some(rest) = line.strip_prefix("--> ") {
        (true, rest)
    } else {
        return Err(format!("expected field or relationship, got '{line}'"));
    };

    let mut tokens = rest.split_whitespace();
    let mut declared_type = tokens.next().ok_or("field without a type")?.to_string();
    let array = declared_type.ends_with("[]");
    if array {
        declared_type.truncate(declared_type.len() - 2);
    }

    let name = tokens.next().ok_or("field without a name")?.to_string();
    // remaining tokens: `optional`, `default=..`, `range=..`, `regex=..`
    let optional = tokens.any(|t| t == "optional");

    Ok(RawProperty {
        name,
        declared_type,
        optional,
        array,
        reference,
    })
}

///
/// SYSTEM MODELS
/// seeded once per registry; always registered before user documents.
/// Invariant: every entry parses; `system_models_all_parse` holds the
/// table to it, so seeding treats a parse failure as a bug
///

const SYSTEM_MODELS: &[(&str, &str)] = &[
    (
        "org.accordproject.contract",
        "namespace org.accordproject.contract\n\
         abstract asset Clause identified by clauseId {\n\
         o String clauseId\n\
         }\n\
         abstract asset Contract identified by contractId {\n\
         o String contractId\n\
         }\n",
    ),
    (
        "org.accordproject.runtime",
        "namespace org.accordproject.runtime\n\
         abstract transaction Request {}\n\
         abstract transaction Response {}\n\
         abstract event Obligation {}\n\
         asset State identified by stateId {\n\
         o String stateId\n\
         }\n",
    ),
    (
        "org.accordproject.time",
        "namespace org.accordproject.time\n\
         enum TemporalUnit {\n\
         o seconds\n\
         o minutes\n\
         o hours\n\
         o days\n\
         o weeks\n\
         }\n\
         enum PeriodUnit {\n\
         o days\n\
         o weeks\n\
         o months\n\
         o quarters\n\
         o years\n\
         }\n\
         concept Duration {\n\
         o Long amount\n\
         o TemporalUnit unit\n\
         }\n\
         concept Period {\n\
         o Long amount\n\
         o PeriodUnit unit\n\
         }\n",
    ),
    (
        "org.accordproject.money",
        "namespace org.accordproject.money\n\
         enum CurrencyCode {\n\
         o USD\n\
         o EUR\n\
         o GBP\n\
         o JPY\n\
         o CHF\n\
         }\n\
         concept MonetaryAmount {\n\
         o Double doubleValue\n\
         o CurrencyCode currencyCode\n\
         }\n",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    const PENALTY: &str = "\
namespace org.acme.penalty

import org.accordproject.contract.*
import org.accordproject.runtime.*
import org.accordproject.time.*

transaction PenaltyRequest extends Request {
  o Boolean forceMajeure
  o DateTime agreedDelivery
  o DateTime deliveredAt optional
  o Double goodsValue
}

transaction PenaltyResponse extends Response {
  o Double penalty
  o Boolean buyerMayTerminate
}

asset PenaltyClause extends Clause {
  o Boolean forceMajeure
  o Duration penaltyDuration
  o Double penaltyPercentage
}
";

    #[test]
    fn system_models_all_parse() {
        for (namespace, text) in SYSTEM_MODELS {
            let model = parse_document(text, namespace)
                .unwrap_or_else(|e| panic!("builtin model '{namespace}' failed to parse: {e}"));
            assert!(!model.declarations.is_empty(), "{namespace} is empty");
        }
    }

    #[test]
    fn registers_and_resolves_against_system_namespaces() {
        let mut registry = TextRegistry::new();
        registry.register(PENALTY, "penalty.cto").unwrap();
        registry.validate_all().unwrap();

        assert_eq!(registry.namespaces(), vec!["org.acme.penalty"]);

        let decls = registry.declarations_of("org.acme.penalty");
        assert_eq!(decls.len(), 3);
        assert_eq!(
            decls[0].supertype_fqn.as_deref(),
            Some("org.accordproject.runtime.Request")
        );
        assert_eq!(
            decls[2].supertype_fqn.as_deref(),
            Some("org.accordproject.contract.Clause")
        );
    }

    #[test]
    fn unresolved_reference_fails_validation() {
        let mut registry = TextRegistry::new();
        registry
            .register(
                "namespace org.acme.broken\nconcept Holder {\n  o Missing thing\n}\n",
                "broken.cto",
            )
            .unwrap();

        let err = registry.validate_all().unwrap_err();
        assert!(matches!(err, RegistryError::Unresolved { ref type_name, .. } if type_name == "Missing"));
    }

    #[test]
    fn parse_error_names_document_and_line() {
        let mut registry = TextRegistry::new();
        let err = registry
            .register("namespace a.b\nconcept Foo {\n  banana\n}\n", "foo.cto")
            .unwrap_err();

        match err {
            RegistryError::Parse { document, line, .. } => {
                assert_eq!(document, "foo.cto");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_namespace_rejected() {
        let mut registry = TextRegistry::new();
        registry
            .register("namespace a.b\nconcept Foo {}\n", "one.cto")
            .unwrap();
        let err = registry
            .register("namespace a.b\nconcept Bar {}\n", "two.cto")
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateNamespace { .. }));
    }

    #[test]
    fn enum_variants_collected() {
        let mut registry = TextRegistry::new();
        registry
            .register(
                "namespace a.b\nenum Color {\n  o RED\n  o GREEN\n}\n",
                "color.cto",
            )
            .unwrap();
        let decls = registry.declarations_of("a.b");
        assert_eq!(decls[0].category, Category::Enum);
        assert_eq!(decls[0].variants, vec!["RED", "GREEN"]);
    }

    #[test]
    fn relationship_parsed_as_reference_property() {
        let mut registry = TextRegistry::new();
        registry
            .register(
                "namespace a.b\nparticipant Buyer identified by id {\n  o String id\n}\n\
                 asset Order identified by id {\n  o String id\n  --> Buyer buyer\n}\n",
                "order.cto",
            )
            .unwrap();
        registry.validate_all().unwrap();

        let decls = registry.declarations_of("a.b");
        let order = &decls[1];
        assert!(order.properties[1].reference);
        assert_eq!(order.properties[1].declared_type, "Buyer");
    }
}
