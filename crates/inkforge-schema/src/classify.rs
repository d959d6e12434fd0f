//! Declaration classification.
//!
//! Every declaration of every registered namespace is tagged with exactly
//! one role, by exact match of its resolved supertype against the closed
//! [`KnownBase`] set plus its structural category. Declarations that fit
//! no role are dropped tolerantly, each with a structured diagnostic.

use crate::{
    mapper,
    registry::{ModelRegistry, RawDeclaration, RawProperty},
    types::{Category, DomainType, KnownBase, Profile, Role},
};
use convert_case::{Case, Casing};
use serde::Serialize;
use tracing::warn;

///
/// Property
///

#[derive(Clone, Debug, Serialize)]
pub struct Property {
    pub name: String,
    pub declared_type: DomainType,
    pub optional: bool,
    pub array: bool,
    /// generated-code field name, snake case
    pub field_name: String,
}

impl Property {
    fn from_raw(raw: &RawProperty) -> Self {
        Self {
            name: raw.name.clone(),
            declared_type: DomainType::parse(&raw.declared_type),
            optional: raw.optional,
            array: raw.array,
            field_name: raw.name.trim_start_matches('$').to_case(Case::Snake),
        }
    }

    #[must_use]
    pub fn target_type(&self, profile: Profile) -> String {
        mapper::map(&self.declared_type, self.optional, self.array, profile)
    }

    #[must_use]
    pub fn is_metadata(&self) -> bool {
        mapper::is_metadata(&self.name)
    }
}

///
/// Declaration
///

#[derive(Clone, Debug, Serialize)]
pub struct Declaration {
    pub name: String,
    pub fqn: String,
    pub namespace: String,
    pub role: Role,
    pub properties: Vec<Property>,
}

impl Declaration {
    fn from_raw(raw: &RawDeclaration, role: Role) -> Self {
        Self {
            name: raw.name.clone(),
            fqn: raw.fqn(),
            namespace: raw.namespace.clone(),
            role,
            properties: raw.properties.iter().map(Property::from_raw).collect(),
        }
    }

    /// Properties that represent domain state, excluding registry
    /// metadata.
    pub fn domain_properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter().filter(|p| !p.is_metadata())
    }
}

///
/// EnumDecl
///

#[derive(Clone, Debug, Serialize)]
pub struct EnumDecl {
    pub name: String,
    pub fqn: String,
    pub namespace: String,
    pub variants: Vec<String>,
}

///
/// Diagnostic
/// dropped declarations surface here instead of disappearing into logs
///

#[derive(Clone, Debug, Serialize)]
pub struct Diagnostic {
    pub fqn: String,
    pub reason: String,
}

///
/// Classification
/// five role lists plus enums and drop diagnostics, all in
/// registration/document order
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct Classification {
    pub requests: Vec<Declaration>,
    pub responses: Vec<Declaration>,
    pub templates: Vec<Declaration>,
    pub concepts: Vec<Declaration>,
    pub participants: Vec<Declaration>,
    pub enums: Vec<EnumDecl>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Classification {
    #[must_use]
    pub fn from_registry(registry: &dyn ModelRegistry) -> Self {
        let mut out = Self::default();

        for namespace in registry.namespaces() {
            for decl in registry.declarations_of(&namespace) {
                out.classify(&decl);
            }
        }

        out
    }

    fn classify(&mut self, decl: &RawDeclaration) {
        let base = decl.supertype_fqn.as_deref().and_then(KnownBase::from_fqn);

        match (decl.category, base) {
            (Category::Transaction, Some(KnownBase::Request)) => {
                self.requests.push(Declaration::from_raw(decl, Role::Request));
            }
            (Category::Transaction, Some(KnownBase::Response)) => {
                self.responses
                    .push(Declaration::from_raw(decl, Role::Response));
            }
            (Category::Asset, Some(KnownBase::Clause | KnownBase::Contract)) => {
                self.templates
                    .push(Declaration::from_raw(decl, Role::Template));
            }
            (Category::Concept, _) => {
                self.concepts.push(Declaration::from_raw(decl, Role::Concept));
            }
            (Category::Participant, _) => {
                self.participants
                    .push(Declaration::from_raw(decl, Role::Participant));
            }
            (Category::Enum, _) => {
                self.enums.push(EnumDecl {
                    name: decl.name.clone(),
                    fqn: decl.fqn(),
                    namespace: decl.namespace.clone(),
                    variants: decl.variants.clone(),
                });
            }
            (category, _) => self.drop(decl, category),
        }
    }

    fn drop(&mut self, decl: &RawDeclaration, category: Category) {
        let reason = match (&decl.supertype, category) {
            (None, Category::Transaction) => {
                "transaction extends no known Request/Response base".to_string()
            }
            (None, Category::Asset) => "asset extends no known Clause/Contract base".to_string(),
            (Some(supertype), _) => format!(
                "{} '{supertype}' is not a known base type",
                category.to_string().to_lowercase()
            ),
            (None, category) => format!(
                "{} declarations are not compiled",
                category.to_string().to_lowercase()
            ),
        };

        warn!(fqn = %decl.fqn(), %reason, "declaration dropped");
        self.diagnostics.push(Diagnostic {
            fqn: decl.fqn(),
            reason,
        });
    }

    /// Primary selection is the first declaration in enumeration order.
    #[must_use]
    pub fn primary_request(&self) -> Option<&Declaration> {
        self.requests.first()
    }

    #[must_use]
    pub fn primary_response(&self) -> Option<&Declaration> {
        self.responses.first()
    }

    #[must_use]
    pub fn primary_template(&self) -> Option<&Declaration> {
        self.templates.first()
    }

    /// True when nothing classifiable was found; the synthesizer then
    /// falls back to a minimal contract.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
            && self.responses.is_empty()
            && self.templates.is_empty()
            && self.concepts.is_empty()
            && self.participants.is_empty()
            && self.enums.is_empty()
    }
}
