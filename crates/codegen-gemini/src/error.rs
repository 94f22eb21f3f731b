use thiserror::Error;

/// Coarse classification of an upstream failure, used for user-facing messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The API key is missing, malformed or rejected.
    InvalidCredentials,
    /// Quota or rate limit exhausted.
    QuotaExceeded,
    /// Any other provider-side failure.
    Other,
}

/// Errors that can be returned by [`crate::GeminiClient`].
#[derive(Debug, Error)]
pub enum GeminiError {
    /// The request never produced an HTTP response, or the body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status or an `error` payload.
    #[error("Gemini API error (status {status:?}): {message}")]
    Api {
        status: Option<u16>,
        kind: ApiErrorKind,
        message: String,
    },

    /// No API key was configured, so no request was attempted.
    #[error("Gemini API key is not configured")]
    MissingApiKey,

    /// The call succeeded but the first candidate carried no text.
    #[error("Gemini returned an empty response")]
    EmptyResponse,
}

impl GeminiError {
    /// The failure class, or `None` for variants that are not provider failures.
    pub fn kind(&self) -> Option<ApiErrorKind> {
        match self {
            GeminiError::Api { kind, .. } => Some(*kind),
            GeminiError::MissingApiKey => Some(ApiErrorKind::InvalidCredentials),
            GeminiError::Http(_) => Some(ApiErrorKind::Other),
            GeminiError::EmptyResponse => None,
        }
    }

    /// HTTP status reported by the provider, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            GeminiError::Api { status, .. } => *status,
            _ => None,
        }
    }
}

/// Classify a provider failure from its HTTP status, provider status string and message.
pub(crate) fn classify(status: Option<u16>, provider_status: Option<&str>, message: &str) -> ApiErrorKind {
    let provider_status = provider_status.unwrap_or_default();
    let lowered = message.to_ascii_lowercase();

    if matches!(status, Some(401 | 403))
        || matches!(provider_status, "UNAUTHENTICATED" | "PERMISSION_DENIED")
        || lowered.contains("api key not valid")
        || lowered.contains("invalid api key")
    {
        return ApiErrorKind::InvalidCredentials;
    }

    if status == Some(429) || provider_status == "RESOURCE_EXHAUSTED" || lowered.contains("quota") {
        return ApiErrorKind::QuotaExceeded;
    }

    ApiErrorKind::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_statuses_are_credential_errors() {
        assert_eq!(classify(Some(401), None, "nope"), ApiErrorKind::InvalidCredentials);
        assert_eq!(classify(Some(403), None, "nope"), ApiErrorKind::InvalidCredentials);
    }

    #[test]
    fn bad_request_with_invalid_key_message_is_credential_error() {
        let kind = classify(
            Some(400),
            Some("INVALID_ARGUMENT"),
            "API key not valid. Please pass a valid API key.",
        );
        assert_eq!(kind, ApiErrorKind::InvalidCredentials);
    }

    #[test]
    fn resource_exhausted_is_quota_error() {
        assert_eq!(classify(Some(429), None, ""), ApiErrorKind::QuotaExceeded);
        assert_eq!(
            classify(None, Some("RESOURCE_EXHAUSTED"), "slow down"),
            ApiErrorKind::QuotaExceeded
        );
    }

    #[test]
    fn server_errors_are_generic() {
        assert_eq!(classify(Some(503), Some("UNAVAILABLE"), "overloaded"), ApiErrorKind::Other);
    }

    #[test]
    fn missing_key_reports_credential_kind() {
        assert_eq!(GeminiError::MissingApiKey.kind(), Some(ApiErrorKind::InvalidCredentials));
        assert_eq!(GeminiError::EmptyResponse.kind(), None);
    }
}
