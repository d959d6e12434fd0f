//! Renders a [`ContractArtifact`] to one ink! `lib.rs`.
//!
//! Output is plain source text, built top to bottom so identical artifacts
//! render byte-identically.

use super::{ContractArtifact, EmbeddedEnum, EmbeddedType, Event, Message, StorageField};

#[must_use]
pub fn render(artifact: &ContractArtifact) -> String {
    let mut out = String::with_capacity(16 * 1024);

    out.push_str("#![cfg_attr(not(feature = \"std\"), no_std, no_main)]\n\n");
    out.push_str("#[ink::contract]\n");
    out.push_str(&format!("mod {} {{\n", artifact.module_name));
    out.push_str("    use ink::prelude::string::{String, ToString};\n");
    out.push_str("    use ink::prelude::vec::Vec;\n\n");

    render_errors(&mut out, artifact);
    render_draft_types(&mut out);
    for ty in artifact
        .request
        .iter()
        .chain(artifact.response.iter())
        .chain(artifact.concepts.iter())
    {
        render_struct(&mut out, ty, artifact.concepts.contains(ty));
    }
    for en in &artifact.enums {
        render_enum(&mut out, en);
    }
    render_audit_entry(&mut out);
    render_storage(&mut out, artifact);
    for event in &artifact.events {
        render_event(&mut out, event);
    }
    render_impl(&mut out, artifact);
    render_tests(&mut out, artifact);

    out.push_str("}\n");
    out
}

fn render_errors(out: &mut String, artifact: &ContractArtifact) {
    out.push_str("    // Error types\n");
    out.push_str("    #[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]\n");
    out.push_str("    #[cfg_attr(feature = \"std\", derive(scale_info::TypeInfo))]\n");
    out.push_str("    pub enum ContractError {\n");
    for variant in &artifact.errors {
        out.push_str(&format!("        {variant},\n"));
    }
    out.push_str("    }\n\n");
    out.push_str("    pub type Result<T> = core::result::Result<T, ContractError>;\n\n");
}

const STRUCT_DERIVES: &str = "    #[derive(scale::Decode, scale::Encode, Clone, PartialEq, Eq, Debug)]\n\
     #[cfg_attr(\n        feature = \"std\",\n        derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)\n    )]\n";

fn render_struct(out: &mut String, ty: &EmbeddedType, default: bool) {
    if default {
        out.push_str(
            "    #[derive(scale::Decode, scale::Encode, Clone, PartialEq, Eq, Debug, Default)]\n",
        );
        out.push_str("    #[cfg_attr(\n        feature = \"std\",\n        derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)\n    )]\n");
    } else {
        out.push_str(STRUCT_DERIVES);
    }
    out.push_str(&format!("    pub struct {} {{\n", ty.name));
    for (field, field_ty) in &ty.fields {
        out.push_str(&format!("        pub {field}: {field_ty},\n"));
    }
    out.push_str("    }\n\n");
}

fn render_enum(out: &mut String, en: &EmbeddedEnum) {
    out.push_str(
        "    #[derive(scale::Decode, scale::Encode, Clone, PartialEq, Eq, Debug, Default)]\n",
    );
    out.push_str("    #[cfg_attr(\n        feature = \"std\",\n        derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)\n    )]\n");
    out.push_str(&format!("    pub enum {} {{\n", en.name));
    for (idx, variant) in en.variants.iter().enumerate() {
        if idx == 0 {
            out.push_str("        #[default]\n");
        }
        out.push_str(&format!("        {variant},\n"));
    }
    out.push_str("    }\n\n");
}

fn render_draft_types(out: &mut String) {
    out.push_str(STRUCT_DERIVES);
    out.push_str("    pub struct DraftRequest {\n");
    out.push_str("        pub requester: AccountId,\n");
    out.push_str("        pub template_data: String,\n");
    out.push_str("        pub status: DraftStatus,\n");
    out.push_str("        pub ipfs_hash: Option<String>,\n");
    out.push_str("        pub error_message: Option<String>,\n");
    out.push_str("        pub created_at: u64,\n");
    out.push_str("        pub updated_at: u64,\n");
    out.push_str("    }\n\n");

    out.push_str(STRUCT_DERIVES);
    out.push_str("    pub enum DraftStatus {\n");
    out.push_str("        Pending,\n");
    out.push_str("        Processing,\n");
    out.push_str("        Ready,\n");
    out.push_str("        Failed,\n");
    out.push_str("    }\n\n");
}

fn render_audit_entry(out: &mut String) {
    out.push_str(STRUCT_DERIVES);
    out.push_str("    pub struct AuditLogEntry {\n");
    out.push_str("        pub caller: AccountId,\n");
    out.push_str("        pub timestamp: u64,\n");
    out.push_str("        pub function_name: String,\n");
    out.push_str("        pub request_id: u64,\n");
    out.push_str("    }\n\n");
}

fn render_storage(out: &mut String, artifact: &ContractArtifact) {
    out.push_str("    #[ink(storage)]\n");
    out.push_str(&format!("    pub struct {} {{\n", artifact.contract_name));
    out.push_str("        owner: AccountId,\n");
    out.push_str("        paused: bool,\n");
    out.push_str("        next_request_id: u64,\n");
    out.push_str("        draft_requests: ink::storage::Mapping<u64, DraftRequest>,\n");
    out.push_str("        user_drafts: ink::storage::Mapping<AccountId, Vec<u64>>,\n");
    out.push_str("        audit_log: ink::storage::Mapping<u64, AuditLogEntry>,\n");
    out.push_str("        audit_log_count: u64,\n");
    for field in &artifact.storage.fields {
        out.push_str(&format!("        {}: {},\n", field.field_name, field.ty));
    }
    out.push_str("    }\n\n");
}

fn render_event(out: &mut String, event: &Event) {
    out.push_str("    #[ink(event)]\n");
    out.push_str(&format!("    pub struct {} {{\n", event.name));
    for field in &event.fields {
        if field.topic {
            out.push_str("        #[ink(topic)]\n");
        }
        out.push_str(&format!("        pub {}: {},\n", field.name, field.ty));
    }
    out.push_str("    }\n\n");
}

fn render_impl(out: &mut String, artifact: &ContractArtifact) {
    out.push_str(&format!("    impl {} {{\n", artifact.contract_name));
    render_constructors(out, artifact);

    for message in &artifact.messages {
        match message {
            Message::GetOwner => {
                out.push_str("        #[ink(message)]\n");
                out.push_str("        pub fn get_owner(&self) -> AccountId {\n");
                out.push_str("            self.owner\n        }\n\n");
            }
            Message::IsPaused => {
                out.push_str("        #[ink(message)]\n");
                out.push_str("        pub fn is_paused(&self) -> bool {\n");
                out.push_str("            self.paused\n        }\n\n");
            }
            Message::Pause => render_toggle(out, "pause", true),
            Message::Unpause => render_toggle(out, "unpause", false),
            Message::ProcessRequest => render_process_request(out, artifact),
            Message::RequestDraft => render_request_draft(out),
            Message::SubmitDraftResult => render_submit_draft(out, true),
            Message::SubmitDraftError => render_submit_draft(out, false),
            Message::GetDraftRequest => {
                out.push_str("        #[ink(message)]\n");
                out.push_str(
                    "        pub fn get_draft_request(&self, request_id: u64) -> Option<DraftRequest> {\n",
                );
                out.push_str("            self.draft_requests.get(request_id)\n        }\n\n");
            }
            Message::GetUserDrafts => {
                out.push_str("        #[ink(message)]\n");
                out.push_str(
                    "        pub fn get_user_drafts(&self, user: AccountId) -> Vec<u64> {\n",
                );
                out.push_str("            self.user_drafts.get(user).unwrap_or_default()\n        }\n\n");
            }
            Message::GetMyDrafts => {
                out.push_str("        #[ink(message)]\n");
                out.push_str("        pub fn get_my_drafts(&self) -> Vec<u64> {\n");
                out.push_str("            let caller = self.env().caller();\n");
                out.push_str("            self.user_drafts.get(caller).unwrap_or_default()\n        }\n\n");
            }
            Message::Getter { field } => render_getter(out, field),
            Message::Setter { field } => render_setter(out, field),
            Message::GetAuditLogCount => {
                out.push_str("        #[ink(message)]\n");
                out.push_str("        pub fn get_audit_log_count(&self) -> u64 {\n");
                out.push_str("            self.audit_log_count\n        }\n\n");
            }
            Message::GetAuditLog => render_audit_log(out),
        }
    }

    render_audit_helpers(out);
    out.push_str("    }\n\n");
}

fn render_constructors(out: &mut String, artifact: &ContractArtifact) {
    let fields = &artifact.storage.fields;

    out.push_str("        #[ink(constructor)]\n");
    if fields.is_empty() {
        out.push_str("        pub fn new() -> Self {\n");
    } else {
        out.push_str("        pub fn new(\n");
        for field in fields {
            out.push_str(&format!("            {}: {},\n", field.field_name, field.ty));
        }
        out.push_str("        ) -> Self {\n");
    }
    out.push_str("            let caller = Self::env().caller();\n\n");
    out.push_str("            Self::env().emit_event(ContractCreated { owner: caller });\n\n");
    out.push_str("            Self {\n");
    out.push_str("                owner: caller,\n");
    out.push_str("                paused: false,\n");
    out.push_str("                next_request_id: 1,\n");
    out.push_str("                draft_requests: ink::storage::Mapping::default(),\n");
    out.push_str("                user_drafts: ink::storage::Mapping::default(),\n");
    out.push_str("                audit_log: ink::storage::Mapping::default(),\n");
    out.push_str("                audit_log_count: 0,\n");
    for field in fields {
        out.push_str(&format!("                {},\n", field.field_name));
    }
    out.push_str("            }\n        }\n\n");

    out.push_str("        #[ink(constructor)]\n");
    out.push_str("        pub fn default() -> Self {\n");
    if fields.is_empty() {
        out.push_str("            Self::new()\n");
    } else {
        out.push_str("            Self::new(\n");
        for field in fields {
            out.push_str(&format!("                {},\n", zero_value(&field.ty)));
        }
        out.push_str("            )\n");
    }
    out.push_str("        }\n\n");
}

fn render_toggle(out: &mut String, name: &str, pause: bool) {
    let (value, event) = if pause {
        ("true", "ContractPaused")
    } else {
        ("false", "ContractUnpaused")
    };

    out.push_str("        #[ink(message)]\n");
    out.push_str(&format!("        pub fn {name}(&mut self) -> Result<()> {{\n"));
    out.push_str("            let caller = self.env().caller();\n");
    out.push_str("            if caller != self.owner {\n");
    out.push_str("                return Err(ContractError::Unauthorized);\n");
    out.push_str("            }\n\n");
    out.push_str(&format!("            self.paused = {value};\n"));
    out.push_str(&format!(
        "            self.env().emit_event({event} {{ by: caller }});\n"
    ));
    out.push_str("            Ok(())\n        }\n\n");
}

fn render_process_request(out: &mut String, artifact: &ContractArtifact) {
    let (Some(request), Some(response)) = (&artifact.request, &artifact.response) else {
        return;
    };

    out.push_str("        #[ink(message)]\n");
    out.push_str(&format!(
        "        pub fn process_request(&mut self, _request: {}) -> Result<{}> {{\n",
        request.name, response.name
    ));
    out.push_str("            if self.paused {\n");
    out.push_str("                return Err(ContractError::ContractPaused);\n");
    out.push_str("            }\n\n");
    out.push_str("            // request ids derive from the block number; not collision-free\n");
    out.push_str("            // for calls landing in the same block\n");
    out.push_str("            let request_id = self.env().block_number() as u64;\n\n");
    out.push_str(&format!(
        "            self.env().emit_event({}Submitted {{\n",
        request.name
    ));
    out.push_str("                submitter: self.env().caller(),\n");
    out.push_str("                request_id,\n");
    out.push_str("            });\n\n");
    out.push_str("            // === BEGIN CUSTOM LOGIC ===\n");
    out.push_str(&format!(
        "            // TODO: Implement your {} logic here\n",
        artifact.module_name
    ));
    out.push_str(&format!("            let response = {} {{\n", response.name));
    for (field, ty) in &response.fields {
        out.push_str(&format!("                {field}: {},\n", zero_value(ty)));
    }
    out.push_str("            };\n");
    out.push_str("            // === END CUSTOM LOGIC ===\n\n");
    out.push_str("            self.log_function_call(\"process_request\", request_id);\n\n");
    out.push_str(&format!(
        "            self.env().emit_event({}Generated {{\n",
        response.name
    ));
    out.push_str("                request_id,\n");
    out.push_str("                success: true,\n");
    out.push_str("            });\n\n");
    out.push_str("            Ok(response)\n        }\n\n");
}

fn render_request_draft(out: &mut String) {
    out.push_str("        #[ink(message)]\n");
    out.push_str("        pub fn request_draft(&mut self, template_data: String) -> Result<u64> {\n");
    out.push_str("            if self.paused {\n");
    out.push_str("                return Err(ContractError::ContractPaused);\n");
    out.push_str("            }\n\n");
    out.push_str("            let caller = self.env().caller();\n");
    out.push_str("            let request_id = self.next_request_id;\n");
    out.push_str("            let timestamp = self.env().block_timestamp();\n\n");
    out.push_str("            let draft_request = DraftRequest {\n");
    out.push_str("                requester: caller,\n");
    out.push_str("                template_data: template_data.clone(),\n");
    out.push_str("                status: DraftStatus::Pending,\n");
    out.push_str("                ipfs_hash: None,\n");
    out.push_str("                error_message: None,\n");
    out.push_str("                created_at: timestamp,\n");
    out.push_str("                updated_at: timestamp,\n");
    out.push_str("            };\n\n");
    out.push_str("            self.draft_requests.insert(request_id, &draft_request);\n\n");
    out.push_str("            let mut user_drafts = self.user_drafts.get(caller).unwrap_or_default();\n");
    out.push_str("            user_drafts.push(request_id);\n");
    out.push_str("            self.user_drafts.insert(caller, &user_drafts);\n\n");
    out.push_str("            self.next_request_id = self.next_request_id.saturating_add(1);\n\n");
    out.push_str("            // off-chain drafting services subscribe to this event\n");
    out.push_str("            self.env().emit_event(DraftRequested {\n");
    out.push_str("                requester: caller,\n");
    out.push_str("                request_id,\n");
    out.push_str("                template_data,\n");
    out.push_str("                timestamp,\n");
    out.push_str("            });\n\n");
    out.push_str("            Ok(request_id)\n        }\n\n");
}

// `success` selects ready-vs-failed: same owner guard, same lookup, a
// different status/payload/event triple
fn render_submit_draft(out: &mut String, success: bool) {
    let (fn_name, param, status, event) = if success {
        ("submit_draft_result", "ipfs_hash", "Ready", "DraftReady")
    } else {
        ("submit_draft_error", "error_message", "Failed", "DraftError")
    };

    out.push_str("        #[ink(message)]\n");
    out.push_str(&format!(
        "        pub fn {fn_name}(&mut self, request_id: u64, {param}: String) -> Result<()> {{\n"
    ));
    out.push_str("            let caller = self.env().caller();\n");
    out.push_str("            if caller != self.owner {\n");
    out.push_str("                return Err(ContractError::Unauthorized);\n");
    out.push_str("            }\n\n");
    out.push_str("            let mut draft_request = self\n");
    out.push_str("                .draft_requests\n");
    out.push_str("                .get(request_id)\n");
    out.push_str("                .ok_or(ContractError::InvalidInput)?;\n\n");
    out.push_str(&format!("            draft_request.status = DraftStatus::{status};\n"));
    out.push_str(&format!("            draft_request.{param} = Some({param}.clone());\n"));
    out.push_str("            draft_request.updated_at = self.env().block_timestamp();\n\n");
    out.push_str("            self.draft_requests.insert(request_id, &draft_request);\n\n");
    out.push_str(&format!("            self.env().emit_event({event} {{\n"));
    out.push_str("                requester: draft_request.requester,\n");
    out.push_str("                request_id,\n");
    out.push_str(&format!("                {param},\n"));
    out.push_str("                timestamp: draft_request.updated_at,\n");
    out.push_str("            });\n\n");
    out.push_str("            Ok(())\n        }\n\n");
}

fn render_getter(out: &mut String, field: &StorageField) {
    out.push_str("        #[ink(message)]\n");
    out.push_str(&format!(
        "        pub fn get_{}(&self) -> {} {{\n",
        field.field_name, field.ty
    ));
    if is_copy(&field.ty) {
        out.push_str(&format!("            self.{}\n", field.field_name));
    } else {
        out.push_str(&format!("            self.{}.clone()\n", field.field_name));
    }
    out.push_str("        }\n\n");
}

fn render_setter(out: &mut String, field: &StorageField) {
    let name = &field.field_name;

    out.push_str("        #[ink(message)]\n");
    out.push_str(&format!(
        "        pub fn set_{name}(&mut self, new_value: {}) -> Result<()> {{\n",
        field.ty
    ));
    out.push_str("            if self.paused {\n");
    out.push_str("                return Err(ContractError::ContractPaused);\n");
    out.push_str("            }\n\n");
    out.push_str("            let caller = self.env().caller();\n");
    out.push_str("            if caller != self.owner {\n");
    out.push_str("                return Err(ContractError::Unauthorized);\n");
    out.push_str("            }\n\n");
    out.push_str(&format!("            if self.{name} != new_value {{\n"));
    out.push_str(&format!(
        "                let old_value = {};\n",
        display_value(&format!("self.{name}"), &field.ty)
    ));
    out.push_str(&format!(
        "                let new_str = {};\n",
        display_value("new_value", &field.ty)
    ));
    out.push_str(&format!(
        "                self.log_field_change(\"{name}\", &old_value, &new_str);\n"
    ));
    out.push_str("            }\n");
    out.push_str(&format!("            self.{name} = new_value;\n"));
    out.push_str("            Ok(())\n        }\n\n");
}

fn render_audit_log(out: &mut String) {
    out.push_str("        #[ink(message)]\n");
    out.push_str(
        "        pub fn get_audit_log(&self, start: u64, limit: u64) -> Vec<AuditLogEntry> {\n",
    );
    out.push_str("            let mut entries = Vec::new();\n");
    out.push_str(
        "            let end = start.saturating_add(limit).min(self.audit_log_count);\n\n",
    );
    out.push_str("            for i in start..end {\n");
    out.push_str("                if let Some(entry) = self.audit_log.get(i) {\n");
    out.push_str("                    entries.push(entry);\n");
    out.push_str("                }\n            }\n\n");
    out.push_str("            entries\n        }\n\n");
}

fn render_audit_helpers(out: &mut String) {
    out.push_str("        /// Record a function call in the audit log\n");
    out.push_str(
        "        fn log_function_call(&mut self, function_name: &str, request_id: u64) {\n",
    );
    out.push_str("            let caller = self.env().caller();\n");
    out.push_str("            let timestamp = self.env().block_timestamp();\n\n");
    out.push_str("            let log_entry = AuditLogEntry {\n");
    out.push_str("                caller,\n");
    out.push_str("                timestamp,\n");
    out.push_str("                function_name: function_name.to_string(),\n");
    out.push_str("                request_id,\n");
    out.push_str("            };\n\n");
    out.push_str("            self.audit_log.insert(self.audit_log_count, &log_entry);\n");
    out.push_str(
        "            self.audit_log_count = self.audit_log_count.saturating_add(1);\n\n",
    );
    out.push_str("            self.env().emit_event(FunctionCalled {\n");
    out.push_str("                caller,\n");
    out.push_str("                function_name: function_name.to_string(),\n");
    out.push_str("                request_id,\n");
    out.push_str("                timestamp,\n");
    out.push_str("            });\n        }\n\n");

    out.push_str("        /// Record a field change with before/after values\n");
    out.push_str("        fn log_field_change(&mut self, field_name: &str, old_value: &str, new_value: &str) {\n");
    out.push_str("            let caller = self.env().caller();\n");
    out.push_str("            let timestamp = self.env().block_timestamp();\n");
    out.push_str("            let block_number = self.env().block_number() as u64;\n\n");
    out.push_str("            self.env().emit_event(ContractDataChanged {\n");
    out.push_str("                field_name: field_name.to_string(),\n");
    out.push_str("                changed_by: caller,\n");
    out.push_str("                old_value: old_value.to_string(),\n");
    out.push_str("                new_value: new_value.to_string(),\n");
    out.push_str("                block_number,\n");
    out.push_str("                timestamp,\n");
    out.push_str("            });\n        }\n");
}

fn render_tests(out: &mut String, artifact: &ContractArtifact) {
    let name = &artifact.contract_name;

    out.push_str("    #[cfg(test)]\n");
    out.push_str("    mod tests {\n");
    out.push_str("        use super::*;\n\n");
    out.push_str("        #[ink::test]\n");
    out.push_str("        fn default_works() {\n");
    out.push_str(&format!("            let contract = {name}::default();\n"));
    out.push_str("            assert_eq!(contract.is_paused(), false);\n");
    out.push_str("        }\n\n");
    out.push_str("        #[ink::test]\n");
    out.push_str("        fn pause_works() {\n");
    out.push_str(&format!("            let mut contract = {name}::default();\n"));
    out.push_str("            assert_eq!(contract.pause(), Ok(()));\n");
    out.push_str("            assert_eq!(contract.is_paused(), true);\n");
    out.push_str("        }\n\n");
    out.push_str("        #[ink::test]\n");
    out.push_str("        fn unpause_works() {\n");
    out.push_str(&format!("            let mut contract = {name}::default();\n"));
    out.push_str("            assert_eq!(contract.pause(), Ok(()));\n");
    out.push_str("            assert_eq!(contract.unpause(), Ok(()));\n");
    out.push_str("            assert_eq!(contract.is_paused(), false);\n");
    out.push_str("        }\n");
    out.push_str("    }\n");
}

// storage types that implement Copy in the generated code
fn is_copy(ty: &str) -> bool {
    let core = ty
        .strip_prefix("Option<")
        .and_then(|t| t.strip_suffix('>'))
        .unwrap_or(ty);
    matches!(core, "bool" | "u8" | "u16" | "u32" | "u64" | "u128" | "i64" | "AccountId")
}

/// Zero/default literal for a rendered storage type, per the
/// generate-default-value policy.
#[must_use]
pub fn zero_value(ty: &str) -> String {
    if ty.starts_with("Option<") {
        return "None".to_string();
    }
    if ty.starts_with("Vec<") {
        return "Vec::new()".to_string();
    }
    match ty {
        "bool" => "false".to_string(),
        "String" => "String::new()".to_string(),
        "u8" | "u16" | "u32" | "u64" | "u128" | "i64" => "0".to_string(),
        "f64" => "0.0".to_string(),
        _ => "Default::default()".to_string(),
    }
}

// expression rendering a storage value as a String for change logs
fn display_value(expr: &str, ty: &str) -> String {
    match ty {
        "String" => format!("{expr}.clone()"),
        "bool" | "u8" | "u16" | "u32" | "u64" | "u128" | "i64" => format!("{expr}.to_string()"),
        _ => format!("format!(\"{{:?}}\", {expr})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkforge_schema::{
        classify::Classification,
        registry::{ModelRegistry, TextRegistry},
    };

    fn rendered(text: &str) -> String {
        let mut registry = TextRegistry::new();
        registry.register(text, "test.cto").unwrap();
        registry.validate_all().unwrap();
        let classification = Classification::from_registry(&registry);
        render(&ContractArtifact::synthesize(&classification))
    }

    const PENALTY: &str = inkforge_fixtures::LATE_DELIVERY_AND_PENALTY;

    #[test]
    fn penalty_contract_has_documented_shape() {
        let src = rendered(PENALTY);

        // storage: owner + paused + audit pair + six domain fields
        assert!(src.contains("pub struct LateDeliveryAndPenalty {"));
        assert!(src.contains("owner: AccountId,"));
        assert!(src.contains("penalty_duration: u64,"));
        assert!(src.contains("penalty_percentage: u128,"));
        assert!(src.contains("termination: u64,"));
        assert!(src.contains("fractional_part: String,"));

        // events for the request/response pair
        assert!(src.contains("pub struct LateDeliveryAndPenaltyRequestSubmitted {"));
        assert!(src.contains("pub struct LateDeliveryAndPenaltyResponseGenerated {"));
    }

    #[test]
    fn request_shapes_map_under_storage_profile() {
        let src = rendered(PENALTY);

        assert!(src.contains("pub force_majeure: bool,"));
        assert!(src.contains("pub agreed_delivery: u64,"));
        assert!(src.contains("pub delivered_at: Option<u64>,"));
        assert!(src.contains("pub goods_value: u128,"));
    }

    #[test]
    fn stub_returns_zero_valued_response() {
        let src = rendered(PENALTY);

        assert!(src.contains("let response = LateDeliveryAndPenaltyResponse {"));
        assert!(src.contains("penalty: 0,"));
        assert!(src.contains("buyer_may_terminate: false,"));
        assert!(src.contains("Ok(response)"));
    }

    #[test]
    fn draft_lifecycle_is_rendered() {
        let src = rendered(PENALTY);

        assert!(src.contains("pub struct DraftRequest {"));
        assert!(src.contains("pub enum DraftStatus {"));
        assert!(src.contains("next_request_id: u64,"));
        assert!(src.contains("draft_requests: ink::storage::Mapping<u64, DraftRequest>,"));
        assert!(src.contains("user_drafts: ink::storage::Mapping<AccountId, Vec<u64>>,"));

        assert!(src.contains("pub fn request_draft(&mut self, template_data: String) -> Result<u64> {"));
        assert!(src.contains("pub fn submit_draft_result(&mut self, request_id: u64, ipfs_hash: String) -> Result<()> {"));
        assert!(src.contains("pub fn submit_draft_error(&mut self, request_id: u64, error_message: String) -> Result<()> {"));
        assert!(src.contains("pub fn get_draft_request(&self, request_id: u64) -> Option<DraftRequest> {"));
        assert!(src.contains("pub fn get_my_drafts(&self) -> Vec<u64> {"));

        // submitting a result flips the status and notifies the requester
        assert!(src.contains("draft_request.status = DraftStatus::Ready;"));
        assert!(src.contains("self.env().emit_event(DraftReady {"));
        assert!(src.contains("draft_request.status = DraftStatus::Failed;"));
    }

    #[test]
    fn pause_guards_are_rendered() {
        let src = rendered(PENALTY);

        // pause/unpause check the owner before toggling
        assert!(src.contains("pub fn pause(&mut self) -> Result<()> {"));
        assert!(src.contains("return Err(ContractError::Unauthorized);"));
        // process_request refuses while paused
        assert!(src.contains("return Err(ContractError::ContractPaused);"));
    }

    #[test]
    fn rendering_is_byte_identical_across_runs() {
        assert_eq!(rendered(PENALTY), rendered(PENALTY));
    }

    #[test]
    fn minimal_contract_renders_without_domain_fields() {
        let artifact = ContractArtifact::synthesize(&Classification::default());
        let src = render(&artifact);

        assert!(src.contains("pub struct GeneratedContract {"));
        assert!(src.contains("pub fn new() -> Self {"));
        assert!(!src.contains("process_request"));
    }

    #[test]
    fn zero_values_follow_type_policy() {
        assert_eq!(zero_value("bool"), "false");
        assert_eq!(zero_value("u128"), "0");
        assert_eq!(zero_value("f64"), "0.0");
        assert_eq!(zero_value("String"), "String::new()");
        assert_eq!(zero_value("Option<Vec<u64>>"), "None");
        assert_eq!(zero_value("Vec<u64>"), "Vec::new()");
        assert_eq!(zero_value("Address"), "Default::default()");
    }
}
