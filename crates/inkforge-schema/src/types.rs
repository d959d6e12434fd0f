use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

///
/// Category
/// structural category of a declaration, as written in the document
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
#[remain::sorted]
pub enum Category {
    Asset,
    Concept,
    Enum,
    Event,
    Participant,
    Transaction,
}

///
/// Role
/// compiler-assigned role of a classified declaration
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
#[remain::sorted]
pub enum Role {
    Concept,
    Participant,
    Request,
    Response,
    Template,
}

///
/// Profile
/// type-mapping policy; the same domain type renders differently
/// depending on whether it lands in a serde struct or in contract storage
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
pub enum Profile {
    PlainData,
    ContractStorage,
}

///
/// DomainType
/// the scalar universe of the modeling language, plus pass-through
/// for declared (or forward-referenced) complex types
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum DomainType {
    Boolean,
    DateTime,
    Double,
    Integer,
    Long,
    Text,
    Other(String),
}

impl DomainType {
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "Boolean" => Self::Boolean,
            "DateTime" => Self::DateTime,
            "Double" => Self::Double,
            "Integer" => Self::Integer,
            "Long" => Self::Long,
            "String" => Self::Text,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Double | Self::Integer | Self::Long)
    }

    #[must_use]
    pub const fn is_temporal(&self) -> bool {
        matches!(self, Self::DateTime)
    }
}

impl From<&str> for DomainType {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

///
/// KnownBase
/// the closed, versioned set of fully-qualified base types that drive
/// classification; exact matches only
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum KnownBase {
    Clause,
    Contract,
    Request,
    Response,
}

impl KnownBase {
    /// Every fully-qualified name this base is known under. The set is
    /// closed on purpose: new runtime versions are added here, never
    /// matched by substring.
    #[must_use]
    pub const fn fqns(self) -> &'static [&'static str] {
        match self {
            Self::Clause => &["org.accordproject.contract.Clause"],
            Self::Contract => &["org.accordproject.contract.Contract"],
            Self::Request => &[
                "org.accordproject.runtime.Request",
                "org.accordproject.cicero.runtime.Request",
            ],
            Self::Response => &[
                "org.accordproject.runtime.Response",
                "org.accordproject.cicero.runtime.Response",
            ],
        }
    }

    #[must_use]
    pub fn from_fqn(fqn: &str) -> Option<Self> {
        [Self::Clause, Self::Contract, Self::Request, Self::Response]
            .into_iter()
            .find(|base| base.fqns().contains(&fqn))
    }
}
