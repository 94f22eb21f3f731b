use std::borrow::Cow;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::entities::{GenerationRecord, UserSummary};
use crate::error::ServerError;
use crate::schemas::language::Language;

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GenerateRequest {
    /// Natural-language description of the code to write.
    #[validate(required(message = "Prompt is required"), custom(function = "validate_prompt"))]
    pub prompt: Option<String>,
    /// One of `Python`, `JavaScript`, `C++`, `TypeScript`.
    #[validate(required(message = "Language is required"), custom(function = "validate_language"))]
    pub language: Option<String>,
    /// Owner of the generation; when present, must reference an existing user.
    pub user_id: Option<String>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateInput {
    /// Trimmed prompt, never empty.
    pub prompt: String,
    pub language: Language,
    pub user_id: Option<String>,
}

impl GenerateRequest {
    pub fn into_input(self) -> Result<GenerateInput, ServerError> {
        self.validate()
            .map_err(|e| ServerError::BadRequest(first_message(&e)))?;

        let language = self.language.unwrap_or_default();
        let language = Language::from_str(&language)
            .map_err(|_| ServerError::BadRequest(unsupported_language(&language)))?;

        Ok(GenerateInput {
            prompt: self.prompt.unwrap_or_default().trim().to_owned(),
            language,
            user_id: self.user_id,
        })
    }
}

fn validate_prompt(prompt: &str) -> Result<(), ValidationError> {
    if prompt.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("Prompt must not be empty")));
    }
    Ok(())
}

fn validate_language(language: &str) -> Result<(), ValidationError> {
    if language.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("Language is required")));
    }
    if Language::from_str(language).is_err() {
        return Err(ValidationError::new("unsupported").with_message(Cow::Owned(unsupported_language(language))));
    }
    Ok(())
}

fn unsupported_language(language: &str) -> String {
    format!(
        "Unsupported language '{language}'. Supported languages: {}",
        Language::supported_list()
    )
}

/// The message of the first failing field, checked in declaration order.
fn first_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    ["prompt", "language"]
        .iter()
        .filter_map(|name| fields.get(*name))
        .chain(fields.values())
        .filter_map(|errs| errs.first())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

/// Owner fields attached to history entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// A persisted generation as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub id: String,
    pub prompt: String,
    pub language: String,
    pub code: String,
    pub user_id: Option<String>,
    /// RFC 3339, millisecond precision, UTC.
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl GenerationRecord {
    pub fn to_response(&self, owner: Option<&UserSummary>) -> GenerationResponse {
        GenerationResponse {
            id: self.id.clone(),
            prompt: self.prompt.clone(),
            language: self.language.clone(),
            code: self.code.clone(),
            user_id: self.user_id.clone(),
            created_at: self
                .created_at
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            user: owner.map(|u| UserResponse {
                id: u.id.clone(),
                name: u.name.clone(),
                email: u.email.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: Option<&str>, language: Option<&str>) -> GenerateRequest {
        GenerateRequest {
            prompt: prompt.map(str::to_owned),
            language: language.map(str::to_owned),
            user_id: None,
        }
    }

    fn bad_request_message(req: GenerateRequest) -> String {
        match req.into_input() {
            Err(ServerError::BadRequest(m)) => m,
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn trims_prompt_and_parses_language() {
        let input = request(Some("  sort a list \n"), Some("C++")).into_input().unwrap();
        assert_eq!(input.prompt, "sort a list");
        assert_eq!(input.language, Language::Cpp);
        assert_eq!(input.user_id, None);
    }

    #[test]
    fn missing_or_blank_prompt_is_rejected() {
        assert_eq!(bad_request_message(request(None, Some("Python"))), "Prompt is required");
        assert_eq!(
            bad_request_message(request(Some(" \t\n"), Some("Python"))),
            "Prompt must not be empty"
        );
    }

    #[test]
    fn prompt_errors_win_over_language_errors() {
        assert_eq!(bad_request_message(request(Some(""), Some("Rust"))), "Prompt must not be empty");
    }

    #[test]
    fn unsupported_language_lists_the_allowed_set() {
        let msg = bad_request_message(request(Some("hello"), Some("javascript")));
        assert_eq!(
            msg,
            "Unsupported language 'javascript'. Supported languages: Python, JavaScript, C++, TypeScript"
        );
        assert_eq!(bad_request_message(request(Some("hello"), Some(""))), "Language is required");
        assert_eq!(bad_request_message(request(Some("hello"), None)), "Language is required");
    }

    #[test]
    fn present_user_id_is_kept_verbatim() {
        for id in ["u-1", "  ", ""] {
            let mut req = request(Some("x"), Some("Python"));
            req.user_id = Some(id.into());
            assert_eq!(req.into_input().unwrap().user_id.as_deref(), Some(id));
        }
    }

    #[test]
    fn unknown_fields_and_wrong_types_fail_to_deserialize() {
        assert!(serde_json::from_str::<GenerateRequest>(
            r#"{"prompt":"x","language":"Python","model":"gpt"}"#
        )
        .is_err());
        assert!(serde_json::from_str::<GenerateRequest>(
            r#"{"prompt":"x","language":"Python","userId":42}"#
        )
        .is_err());
    }
}
