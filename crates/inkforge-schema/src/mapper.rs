//! Domain-to-target type mapping.
//!
//! `map` is pure and total: every domain type yields a target type string
//! under both profiles, and names the mapper does not recognize pass
//! through unchanged so declarations may reference types that are emitted
//! later (or not at all).

use crate::types::{DomainType, Profile};

/// Properties excluded from contract storage: class discriminators,
/// registry timestamps, and clause/contract identifiers are metadata, not
/// domain state.
pub const METADATA_PROPERTIES: &[&str] =
    &["$class", "$identifier", "$timestamp", "clauseId", "contractId"];

#[must_use]
pub fn is_metadata(property_name: &str) -> bool {
    METADATA_PROPERTIES.contains(&property_name)
}

/// Map one domain type (plus optional/array flags) to a target type.
///
/// Wrapping order is fixed: array first, then optional. An optional array
/// is `Option<Vec<T>>`, never `Vec<Option<T>>`.
#[must_use]
pub fn map(domain: &DomainType, optional: bool, array: bool, profile: Profile) -> String {
    let mut target = scalar(domain, profile);
    if array {
        target = format!("Vec<{target}>");
    }
    if optional {
        target = format!("Option<{target}>");
    }
    target
}

fn scalar(domain: &DomainType, profile: Profile) -> String {
    match (domain, profile) {
        (DomainType::Text, _) => "String".to_string(),
        (DomainType::Boolean, _) => "bool".to_string(),

        (DomainType::Double | DomainType::Long, Profile::PlainData) => "f64".to_string(),
        // fixed-point monetary convention on chain
        (DomainType::Double | DomainType::Long, Profile::ContractStorage) => "u128".to_string(),

        (DomainType::Integer, Profile::PlainData) => "i64".to_string(),
        (DomainType::Integer, Profile::ContractStorage) => "u64".to_string(),

        (DomainType::DateTime, Profile::PlainData) => "DateTime<Utc>".to_string(),
        (DomainType::DateTime, Profile::ContractStorage) => "u64".to_string(),

        (DomainType::Other(name), Profile::PlainData) => unqualified(name).to_string(),
        (DomainType::Other(name), Profile::ContractStorage) => collapse(unqualified(name)),
    }
}

// Known complex concepts flatten for on-chain storage; everything else is
// identity.
fn collapse(name: &str) -> String {
    match name {
        "MonetaryAmount" => "u128".to_string(),
        "Duration" | "Period" => "u64".to_string(),
        "CurrencyCode" | "TemporalUnit" => "String".to_string(),
        other => other.to_string(),
    }
}

fn unqualified(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}
