//! Generation and history workflows behind the `/api` routes.
//!
//! Both are generic over the store traits so the HTTP layer never touches
//! SQL directly.

use chrono::Utc;
use codegen_gemini::GeminiClient;
use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::{GenerationRecord, GenerationStore, UserStore};
use crate::error::ServerError;
use crate::schemas::generation::GenerateInput;
use crate::schemas::history::{HistoryResponse, PageRequest, Pagination};
use crate::schemas::language::Language;

/// The instruction sent upstream for a validated request.
pub fn build_instruction(language: Language, prompt: &str) -> String {
    format!(
        "You are an expert {language} programmer. Write {language} code for the request below.\n\
         Respond with ONLY the raw {language} source code. Do not add explanations or commentary, \
         and do not wrap the code in markdown fences (no ```).\n\n\
         Request: {prompt}"
    )
}

/// Validate the owner, call upstream once, and persist the result.
///
/// The store is written only after a successful upstream call, and the
/// upstream is only called once the owner (if any) is known to exist.
pub async fn generate<S>(
    store: &S,
    gemini: &GeminiClient,
    input: GenerateInput,
) -> Result<GenerationRecord, ServerError>
where
    S: UserStore + GenerationStore,
{
    if let Some(user_id) = input.user_id.as_deref() {
        let owner = store
            .find_user(user_id)
            .await?
            .ok_or_else(|| ServerError::NotFound(format!("User '{user_id}' not found")))?;
        debug!(user_id = %owner.id, email = ?owner.email, "owner verified");
    }

    let instruction = build_instruction(input.language, &input.prompt);
    debug!(language = %input.language, prompt_len = input.prompt.len(), model = gemini.model(), "requesting generation");
    let code = gemini.generate_text(&instruction).await?;

    let record = GenerationRecord {
        id: Uuid::new_v4().to_string(),
        prompt: input.prompt,
        language: input.language.to_string(),
        code,
        user_id: input.user_id,
        created_at: Utc::now(),
    };
    store.insert_generation(record.clone()).await?;

    info!(id = %record.id, language = %record.language, code_len = record.code.len(), "generation stored");
    Ok(record)
}

/// One page of history plus pagination metadata.
///
/// Pages past the end yield an empty list with accurate metadata.
pub async fn history<S>(store: &S, request: PageRequest) -> Result<HistoryResponse, ServerError>
where
    S: GenerationStore,
{
    let language = request.language.as_deref();
    let total = store.count_generations(language).await?;
    let entries = store
        .list_generations(language, request.limit, request.offset())
        .await?;

    Ok(HistoryResponse {
        generations: entries
            .iter()
            .map(|e| e.generation.to_response(e.owner.as_ref()))
            .collect(),
        pagination: Pagination::new(request.page, request.limit, total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_names_language_and_embeds_prompt() {
        let text = build_instruction(Language::Cpp, "reverse a linked list");
        assert!(text.contains("C++ source code"));
        assert!(text.ends_with("Request: reverse a linked list"));
        assert!(text.contains("markdown"));
    }
}
