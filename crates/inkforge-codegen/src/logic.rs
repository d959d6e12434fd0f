//! Logic scaffold generation.
//!
//! Produces `logic.rs` (one async `trigger` stub whose body assigns every
//! response field a type-driven default under the PlainData profile), a
//! companion `logic_test.rs` constructing synthetic template/request
//! values, and `main.rs`, the host entry point that declares the module
//! tree and runs the stub over JSON inputs. All three files are
//! overwritten unconditionally on regeneration; hand edits do not
//! survive.

use inkforge_schema::{
    classify::{Classification, Declaration, Property},
    types::{DomainType, Profile},
};

///
/// LogicArtifact
///

#[derive(Clone, Debug)]
pub struct LogicArtifact {
    pub logic: String,
    pub test: String,
    /// `main.rs`: the only file that declares `logic`/`model`/`utils`,
    /// so dropping it would orphan the whole scaffold
    pub main: String,
}

/// Generate the scaffold for the primary template/request/response.
/// Without a full trio there is no business operation to stub, and a
/// placeholder module is emitted instead.
#[must_use]
pub fn generate(classification: &Classification) -> LogicArtifact {
    let (Some(template), Some(request), Some(response)) = (
        classification.primary_template(),
        classification.primary_request(),
        classification.primary_response(),
    ) else {
        return placeholder();
    };

    LogicArtifact {
        logic: render_logic(template, request, response),
        test: render_test(template, request),
        main: render_main(template, request),
    }
}

fn placeholder() -> LogicArtifact {
    let logic = "\
//! Business logic scaffold.\n\
//!\n\
//! No template/request/response trio was found in the model archives, so\n\
//! there is no operation to stub yet.\n"
        .to_string();
    let test = "// No logic scaffold was generated for this model set.\n".to_string();

    let mut main = String::new();
    main.push_str(MODULE_TREE);
    main.push_str("fn main() {\n");
    main.push_str("    eprintln!(\"no template/request/response trio in the model set; nothing to run\");\n");
    main.push_str("    std::process::exit(1);\n");
    main.push_str("}\n");

    LogicArtifact { logic, test, main }
}

const MODULE_TREE: &str = "\
mod logic;\n\
#[cfg(test)]\n\
mod logic_test;\n\
#[allow(dead_code)]\n\
mod model;\n\
#[allow(dead_code)]\n\
mod utils;\n\n";

fn render_main(template: &Declaration, request: &Declaration) -> String {
    let mut out = String::with_capacity(2 * 1024);

    out.push_str("//! Host entry point: reads a template and a request as JSON, runs\n");
    out.push_str("//! `logic::trigger`, and prints the response as JSON.\n\n");
    out.push_str(MODULE_TREE);
    out.push_str(&format!(
        "use model::{{{}, {}}};\n",
        template.name, request.name
    ));
    out.push_str("use std::{env, fs, process};\n\n");

    out.push_str("fn main() {\n");
    out.push_str("    let mut args = env::args().skip(1);\n");
    out.push_str("    let (Some(template_path), Some(request_path)) = (args.next(), args.next()) else {\n");
    out.push_str("        eprintln!(\"usage: <template.json> <request.json>\");\n");
    out.push_str("        process::exit(2);\n");
    out.push_str("    };\n\n");
    out.push_str(&format!(
        "    let template: {} = load(&template_path);\n",
        template.name
    ));
    out.push_str(&format!(
        "    let request: {} = load(&request_path);\n\n",
        request.name
    ));
    out.push_str("    match futures::executor::block_on(logic::trigger(&template, &request)) {\n");
    out.push_str("        Ok(response) => match serde_json::to_string_pretty(&response) {\n");
    out.push_str("            Ok(json) => println!(\"{json}\"),\n");
    out.push_str("            Err(err) => {\n");
    out.push_str("                eprintln!(\"cannot serialize response: {err}\");\n");
    out.push_str("                process::exit(1);\n");
    out.push_str("            }\n");
    out.push_str("        },\n");
    out.push_str("        Err(err) => {\n");
    out.push_str("            eprintln!(\"trigger failed: {err:?}\");\n");
    out.push_str("            process::exit(1);\n");
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n\n");

    out.push_str("fn load<T: serde::de::DeserializeOwned>(path: &str) -> T {\n");
    out.push_str("    let text = fs::read_to_string(path).unwrap_or_else(|err| {\n");
    out.push_str("        eprintln!(\"cannot read {path}: {err}\");\n");
    out.push_str("        process::exit(2);\n");
    out.push_str("    });\n");
    out.push_str("    serde_json::from_str(&text).unwrap_or_else(|err| {\n");
    out.push_str("        eprintln!(\"cannot parse {path}: {err}\");\n");
    out.push_str("        process::exit(2);\n");
    out.push_str("    })\n");
    out.push_str("}\n");

    out
}

fn render_logic(template: &Declaration, request: &Declaration, response: &Declaration) -> String {
    let mut out = String::with_capacity(4 * 1024);

    out.push_str("//! Business logic scaffold. Regeneration overwrites this file.\n\n");
    out.push_str("use crate::model::*;\n");
    out.push_str("use chrono::Utc;\n\n");

    out.push_str("#[derive(Debug, PartialEq, Eq)]\n");
    out.push_str("pub enum LogicError {\n    InvalidInput,\n    ProcessingFailed,\n}\n\n");

    out.push_str(&format!(
        "pub async fn trigger(\n    template: &{},\n    request: &{},\n) -> Result<{}, LogicError> {{\n",
        template.name, request.name, response.name
    ));
    out.push_str("    let _ = (template, request);\n\n");
    out.push_str(&format!("    let response = {} {{\n", response.name));
    for property in response.domain_properties() {
        let ty = property.target_type(Profile::PlainData);
        let optionality = if property.optional { ", optional" } else { "" };
        out.push_str(&format!(
            "        // TODO: compute {} ({ty}{optionality})\n",
            property.name
        ));
        out.push_str(&format!(
            "        {}: {},\n",
            property.field_name,
            default_value(property)
        ));
    }
    out.push_str("    };\n\n");
    out.push_str("    Ok(response)\n}\n");

    out
}

fn render_test(template: &Declaration, request: &Declaration) -> String {
    let mut out = String::with_capacity(4 * 1024);

    out.push_str("//! Synthetic-data smoke test for the logic scaffold. Asserts only\n");
    out.push_str("//! that `trigger` completes; behavior is yours to implement.\n\n");
    out.push_str("#[cfg(test)]\n");
    out.push_str("mod tests {\n");
    out.push_str("    use crate::logic::trigger;\n");
    out.push_str("    use crate::model::*;\n");
    out.push_str("    use chrono::Utc;\n\n");
    out.push_str("    #[test]\n");
    out.push_str("    fn trigger_completes() {\n");

    render_fixture(&mut out, "template", template);
    render_fixture(&mut out, "request", request);

    out.push_str("        let result = futures::executor::block_on(trigger(&template, &request));\n");
    out.push_str("        assert!(result.is_ok());\n");
    out.push_str("    }\n");
    out.push_str("}\n");

    out
}

fn render_fixture(out: &mut String, binding: &str, decl: &Declaration) {
    out.push_str(&format!("        let {binding} = {} {{\n", decl.name));
    for property in decl.domain_properties() {
        out.push_str(&format!(
            "            {}: {},\n",
            property.field_name,
            test_value(property)
        ));
    }
    out.push_str("        };\n");
}

/// Default-value policy: zero/empty/now per target type.
fn default_value(property: &Property) -> String {
    if property.optional {
        return "None".to_string();
    }
    if property.array {
        return "Vec::new()".to_string();
    }
    scalar_default(&property.declared_type)
}

fn scalar_default(domain: &DomainType) -> String {
    match domain {
        DomainType::Boolean => "false".to_string(),
        DomainType::Double | DomainType::Long => "0.0".to_string(),
        DomainType::Integer => "0".to_string(),
        DomainType::Text => "String::new()".to_string(),
        DomainType::DateTime => "Utc::now()".to_string(),
        DomainType::Other(_) => "Default::default()".to_string(),
    }
}

/// Test-value policy: nonzero numeric sentinels, readable string
/// placeholders, a 1-day duration literal.
fn test_value(property: &Property) -> String {
    if property.optional {
        return "None".to_string();
    }
    if property.array {
        return format!("vec![{}]", scalar_test(property));
    }
    scalar_test(property)
}

fn scalar_test(property: &Property) -> String {
    match &property.declared_type {
        DomainType::Boolean => "true".to_string(),
        DomainType::Double | DomainType::Long => "42.0".to_string(),
        DomainType::Integer => "42".to_string(),
        DomainType::Text => format!("\"Sample {}\".to_string()", property.name),
        DomainType::DateTime => "Utc::now()".to_string(),
        DomainType::Other(name) if name.ends_with("Duration") => {
            "Duration { amount: 1.0, unit: TemporalUnit::Days }".to_string()
        }
        DomainType::Other(_) => "Default::default()".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkforge_schema::registry::{ModelRegistry, TextRegistry};

    fn classify(text: &str) -> Classification {
        let mut registry = TextRegistry::new();
        registry.register(text, "test.cto").unwrap();
        registry.validate_all().unwrap();
        Classification::from_registry(&registry)
    }

    #[test]
    fn stub_assigns_type_driven_defaults_with_markers() {
        let artifact = generate(&classify(inkforge_fixtures::LATE_DELIVERY_AND_PENALTY));

        assert!(artifact.logic.contains("pub async fn trigger("));
        assert!(artifact.logic.contains("penalty: 0.0,"));
        assert!(artifact.logic.contains("buyer_may_terminate: false,"));
        assert!(artifact.logic.contains("// TODO: compute penalty (f64)"));
        assert!(artifact
            .logic
            .contains("// TODO: compute buyerMayTerminate (bool)"));
    }

    #[test]
    fn companion_test_uses_sentinel_values() {
        let artifact = generate(&classify(inkforge_fixtures::LATE_DELIVERY_AND_PENALTY));

        assert!(artifact.test.contains("goods_value: 42.0,"));
        assert!(artifact.test.contains("force_majeure: true,"));
        // optional datetime stays unset in the synthetic request
        assert!(artifact.test.contains("delivered_at: None,"));
        // the 1-day duration literal for the template's penaltyDuration
        assert!(artifact
            .test
            .contains("Duration { amount: 1.0, unit: TemporalUnit::Days }"));
        assert!(artifact.test.contains("assert!(result.is_ok());"));
    }

    #[test]
    fn missing_trio_yields_placeholder() {
        let artifact = generate(&classify(
            "namespace org.acme\nconcept Lone {\n  o String name\n}\n",
        ));
        assert!(artifact.logic.contains("No template/request/response trio"));
        // the module tree still mounts so the emitted model files compile
        assert!(artifact.main.contains("mod model;"));
        assert!(artifact.main.contains("fn main() {"));
    }

    #[test]
    fn entry_point_mounts_the_scaffold_modules() {
        let artifact = generate(&classify(inkforge_fixtures::LATE_DELIVERY_AND_PENALTY));

        // every emitted scaffold file is reachable from the binary root
        assert!(artifact.main.contains("mod logic;"));
        assert!(artifact.main.contains("mod logic_test;"));
        assert!(artifact.main.contains("mod model;"));
        assert!(artifact.main.contains("mod utils;"));

        assert!(artifact.main.contains(
            "use model::{LateDeliveryAndPenaltyClause, LateDeliveryAndPenaltyRequest};"
        ));
        assert!(artifact.main.contains("let template: LateDeliveryAndPenaltyClause = load(&template_path);"));
        assert!(artifact
            .main
            .contains("futures::executor::block_on(logic::trigger(&template, &request))"));
    }
}
