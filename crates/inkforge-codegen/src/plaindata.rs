//! Plain-data emission.
//!
//! One serde-derived source file per registered namespace, under the
//! PlainData profile. The emitter is a collaborator seam; the default
//! [`SerdeStructEmitter`] delegates every scalar decision to the shared
//! mapper so contract and plain profiles cannot diverge.

use crate::project::GeneratedFile;
use convert_case::{Case, Casing};
use inkforge_schema::{
    mapper,
    registry::{ModelRegistry, RawDeclaration},
    types::{Category, DomainType, Profile},
};

///
/// PlainDataEmitter
///

pub trait PlainDataEmitter {
    /// Emit one file per namespace; paths are relative to the output
    /// project's `src/`.
    fn emit(&self, registry: &dyn ModelRegistry) -> Vec<GeneratedFile>;
}

///
/// SerdeStructEmitter
///

#[derive(Debug, Default)]
pub struct SerdeStructEmitter;

impl PlainDataEmitter for SerdeStructEmitter {
    fn emit(&self, registry: &dyn ModelRegistry) -> Vec<GeneratedFile> {
        let mut files = Vec::new();
        let mut modules = Vec::new();

        for namespace in registry.all_namespaces() {
            let declarations = registry.declarations_of(&namespace);
            if declarations.is_empty() {
                continue;
            }

            let module = module_name(&namespace);
            files.push(GeneratedFile {
                path: format!("model/{module}.rs"),
                content: render_namespace(&namespace, &declarations),
            });
            modules.push(module);
        }

        files.push(GeneratedFile {
            path: "model/mod.rs".to_string(),
            content: render_mod(&modules),
        });

        files
    }
}

fn module_name(namespace: &str) -> String {
    namespace.replace('.', "_").to_case(Case::Snake)
}

fn render_mod(modules: &[String]) -> String {
    let mut out = String::new();
    out.push_str("//! Generated data model. Regeneration overwrites this tree.\n\n");
    for module in modules {
        out.push_str(&format!("pub mod {module};\n"));
    }
    out.push('\n');
    for module in modules {
        out.push_str(&format!("pub use {module}::*;\n"));
    }
    out
}

fn render_namespace(namespace: &str, declarations: &[RawDeclaration]) -> String {
    let mut out = String::with_capacity(4 * 1024);

    out.push_str(&format!("//! Generated from namespace `{namespace}`.\n\n"));
    if uses_datetime(declarations) {
        out.push_str("use chrono::{DateTime, Utc};\n");
    }
    out.push_str("use serde::{Deserialize, Serialize};\n\n");

    for decl in declarations {
        if decl.category == Category::Enum {
            render_enum(&mut out, decl);
        } else {
            render_struct(&mut out, decl);
        }
    }

    out
}

fn uses_datetime(declarations: &[RawDeclaration]) -> bool {
    declarations.iter().any(|decl| {
        decl.properties
            .iter()
            .any(|p| DomainType::parse(&p.declared_type) == DomainType::DateTime)
    })
}

fn render_struct(out: &mut String, decl: &RawDeclaration) {
    let derives = if derives_default(decl) {
        "#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]"
    } else {
        "#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]"
    };

    out.push_str(derives);
    out.push('\n');
    out.push_str("#[serde(rename_all = \"camelCase\")]\n");
    out.push_str(&format!("pub struct {} {{\n", decl.name));
    for property in &decl.properties {
        let domain = DomainType::parse(&property.declared_type);
        let ty = mapper::map(&domain, property.optional, property.array, Profile::PlainData);
        let field = property.name.trim_start_matches('$').to_case(Case::Snake);
        out.push_str(&format!("    pub {field}: {ty},\n"));
    }
    out.push_str("}\n\n");
}

// `DateTime<Utc>` has no Default; a struct with a required timestamp
// field cannot derive it.
fn derives_default(decl: &RawDeclaration) -> bool {
    decl.properties.iter().all(|p| {
        p.optional || p.array || DomainType::parse(&p.declared_type) != DomainType::DateTime
    })
}

fn render_enum(out: &mut String, decl: &RawDeclaration) {
    out.push_str("#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]\n");
    out.push_str(&format!("pub enum {} {{\n", decl.name));
    for (idx, variant) in decl.variants.iter().enumerate() {
        if idx == 0 {
            out.push_str("    #[default]\n");
        }
        out.push_str(&format!("    {},\n", variant.to_case(Case::Pascal)));
    }
    out.push_str("}\n\n");
}
