//! Contract synthesis.
//!
//! Builds a [`ContractArtifact`] from the classified declarations: storage
//! layout, event set, message set with the Active/Paused state machine,
//! and the fixed error taxonomy. Synthesis is deterministic: identical
//! classified input yields an identical artifact, and rendering embeds no
//! timestamps or randomness.

pub mod render;

use convert_case::{Case, Casing};
use inkforge_schema::{
    classify::{Classification, Declaration},
    types::Profile,
};
use serde::Serialize;

/// Fixed error taxonomy of every synthesized contract. All failure paths
/// return one of these; generated code never panics.
pub const ERROR_VARIANTS: &[&str] = &[
    "Unauthorized",
    "ContractPaused",
    "InvalidInput",
    "ProcessingFailed",
];

///
/// StorageField
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StorageField {
    /// property name as declared in the model
    pub property: String,
    pub field_name: String,
    pub ty: String,
}

///
/// StorageLayout
/// owner + paused + audit bookkeeping are implicit; these are the
/// domain fields only
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct StorageLayout {
    pub fields: Vec<StorageField>,
}

///
/// EventField
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EventField {
    pub name: String,
    pub ty: String,
    pub topic: bool,
}

///
/// Event
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Event {
    pub name: String,
    pub fields: Vec<EventField>,
}

impl Event {
    fn new(name: impl Into<String>, fields: Vec<EventField>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

fn topic(name: &str, ty: &str) -> EventField {
    EventField {
        name: name.to_string(),
        ty: ty.to_string(),
        topic: true,
    }
}

fn plain(name: &str, ty: &str) -> EventField {
    EventField {
        name: name.to_string(),
        ty: ty.to_string(),
        topic: false,
    }
}

///
/// Message
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Message {
    GetOwner,
    IsPaused,
    Pause,
    Unpause,
    /// present only when a Request/Response pair exists
    ProcessRequest,
    RequestDraft,
    SubmitDraftResult,
    SubmitDraftError,
    GetDraftRequest,
    GetUserDrafts,
    GetMyDrafts,
    Getter {
        field: StorageField,
    },
    Setter {
        field: StorageField,
    },
    GetAuditLogCount,
    GetAuditLog,
}

///
/// State
/// the embedded state machine: pause/unpause are owner-only transitions,
/// process_request is permitted only while Active; there is no terminal
/// state
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum State {
    Active,
    Paused,
}

impl State {
    #[must_use]
    pub const fn can_process(self) -> bool {
        matches!(self, Self::Active)
    }

    #[must_use]
    pub const fn transitions(self) -> &'static [(&'static str, Self)] {
        match self {
            Self::Active => &[("pause", Self::Paused)],
            Self::Paused => &[("unpause", Self::Active)],
        }
    }
}

///
/// EmbeddedType
/// request/response/concept structs rendered inside the contract module
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EmbeddedType {
    pub name: String,
    pub fields: Vec<(String, String)>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EmbeddedEnum {
    pub name: String,
    pub variants: Vec<String>,
}

///
/// ContractArtifact
///

#[derive(Clone, Debug, Serialize)]
pub struct ContractArtifact {
    pub contract_name: String,
    pub module_name: String,
    pub storage: StorageLayout,
    pub events: Vec<Event>,
    pub messages: Vec<Message>,
    pub errors: Vec<&'static str>,
    pub request: Option<EmbeddedType>,
    pub response: Option<EmbeddedType>,
    pub concepts: Vec<EmbeddedType>,
    pub enums: Vec<EmbeddedEnum>,
}

impl ContractArtifact {
    /// Synthesize from the primary template/request/response. A run with
    /// no classifiable declarations still yields a minimal contract with
    /// no domain fields.
    #[must_use]
    pub fn synthesize(classification: &Classification) -> Self {
        let template = classification.primary_template();
        let request = classification.primary_request();
        let response = classification.primary_response();
        let paired = request.is_some() && response.is_some();

        let contract_name = contract_name(template, request);
        let module_name = contract_name.to_case(Case::Flat);

        let storage = StorageLayout {
            fields: template
                .map(|t| {
                    t.domain_properties()
                        .map(|p| StorageField {
                            property: p.name.clone(),
                            field_name: p.field_name.clone(),
                            ty: p.target_type(Profile::ContractStorage),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        };

        let mut events = vec![
            Event::new("ContractCreated", vec![topic("owner", "AccountId")]),
            Event::new("ContractPaused", vec![topic("by", "AccountId")]),
            Event::new("ContractUnpaused", vec![topic("by", "AccountId")]),
            Event::new(
                "DraftRequested",
                vec![
                    topic("requester", "AccountId"),
                    plain("request_id", "u64"),
                    plain("template_data", "String"),
                    plain("timestamp", "u64"),
                ],
            ),
            Event::new(
                "DraftReady",
                vec![
                    topic("requester", "AccountId"),
                    plain("request_id", "u64"),
                    plain("ipfs_hash", "String"),
                    plain("timestamp", "u64"),
                ],
            ),
            Event::new(
                "DraftError",
                vec![
                    topic("requester", "AccountId"),
                    plain("request_id", "u64"),
                    plain("error_message", "String"),
                    plain("timestamp", "u64"),
                ],
            ),
        ];
        if paired {
            if let (Some(req), Some(resp)) = (request, response) {
                events.push(Event::new(
                    format!("{}Submitted", req.name),
                    vec![topic("submitter", "AccountId"), topic("request_id", "u64")],
                ));
                events.push(Event::new(
                    format!("{}Generated", resp.name),
                    vec![topic("request_id", "u64"), plain("success", "bool")],
                ));
            }
        }
        events.push(Event::new(
            "FunctionCalled",
            vec![
                topic("caller", "AccountId"),
                topic("function_name", "String"),
                plain("request_id", "u64"),
                plain("timestamp", "u64"),
            ],
        ));
        events.push(Event::new(
            "ContractDataChanged",
            vec![
                topic("field_name", "String"),
                topic("changed_by", "AccountId"),
                plain("old_value", "String"),
                plain("new_value", "String"),
                plain("block_number", "u64"),
                plain("timestamp", "u64"),
            ],
        ));

        let mut messages = vec![
            Message::GetOwner,
            Message::IsPaused,
            Message::Pause,
            Message::Unpause,
        ];
        if paired {
            messages.push(Message::ProcessRequest);
        }
        messages.extend([
            Message::RequestDraft,
            Message::SubmitDraftResult,
            Message::SubmitDraftError,
            Message::GetDraftRequest,
            Message::GetUserDrafts,
            Message::GetMyDrafts,
        ]);
        for field in &storage.fields {
            messages.push(Message::Getter {
                field: field.clone(),
            });
        }
        for field in &storage.fields {
            messages.push(Message::Setter {
                field: field.clone(),
            });
        }
        messages.push(Message::GetAuditLogCount);
        messages.push(Message::GetAuditLog);

        Self {
            contract_name,
            module_name,
            storage,
            events,
            messages,
            errors: ERROR_VARIANTS.to_vec(),
            request: request.map(embedded),
            response: response.map(embedded),
            concepts: classification.concepts.iter().map(embedded).collect(),
            enums: classification
                .enums
                .iter()
                .map(|e| EmbeddedEnum {
                    name: e.name.clone(),
                    variants: e
                        .variants
                        .iter()
                        .map(|v| v.to_case(Case::Pascal))
                        .collect(),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn has_request_pair(&self) -> bool {
        self.request.is_some() && self.response.is_some()
    }
}

// Storage-profile struct body for a declaration embedded in the contract.
fn embedded(decl: &Declaration) -> EmbeddedType {
    EmbeddedType {
        name: decl.name.clone(),
        fields: decl
            .properties
            .iter()
            .filter(|p| !p.is_metadata())
            .map(|p| {
                (
                    p.field_name.clone(),
                    p.target_type(Profile::ContractStorage),
                )
            })
            .collect(),
    }
}

// Template name minus its Clause/Contract suffix; falls back to the
// request name minus Request, then to a fixed default.
fn contract_name(template: Option<&Declaration>, request: Option<&Declaration>) -> String {
    if let Some(template) = template {
        let name = template.name.as_str();
        let trimmed = name
            .strip_suffix("Clause")
            .or_else(|| name.strip_suffix("Contract"))
            .unwrap_or(name);
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    if let Some(request) = request {
        let trimmed = request.name.strip_suffix("Request").unwrap_or(&request.name);
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    "GeneratedContract".to_string()
}
