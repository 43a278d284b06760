//! Mapping backend failures onto [`CollaboratorError`]

use serde::Deserialize;
use thiserror::Error;
use toolhub_core::CollaboratorError;

/// Postgres "undefined_table", plus PostgREST's own schema-cache miss
const MISSING_RELATION_CODES: &[&str] = &["42P01", "PGRST205"];

/// Non-2xx answer from the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiError {
    pub status: u16,
    pub code: Option<String>,
    pub message: String,
}

/// Error bodies differ between the auth service and the table API; this
/// accepts the union of their field names.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
    code: Option<serde_json::Value>,
    error_code: Option<String>,
}

impl ApiError {
    pub fn from_body(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let code = parsed.error_code.or_else(|| {
            parsed.code.map(|c| match c {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
        });
        let message = parsed
            .message
            .or(parsed.msg)
            .or(parsed.error_description)
            .or(parsed.error)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.trim().to_string()
                }
            });
        Self {
            status,
            code,
            message,
        }
    }

    pub fn is_missing_relation(&self) -> bool {
        self.code
            .as_deref()
            .is_some_and(|c| MISSING_RELATION_CODES.contains(&c))
    }
}

impl From<ApiError> for CollaboratorError {
    fn from(err: ApiError) -> Self {
        match err.status {
            401 | 403 => Self::Unauthorized(err.message),
            404 => Self::NotFound(err.message),
            409 => Self::Conflict(err.message),
            status => Self::Backend {
                status,
                message: err.message,
            },
        }
    }
}

#[derive(Error, Debug)]
pub(crate) enum RequestError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned {}: {}", .0.status, .0.message)]
    Api(ApiError),
}

impl RequestError {
    pub fn is_missing_relation(&self) -> bool {
        matches!(self, Self::Api(api) if api.is_missing_relation())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(api) => Some(api.status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

impl From<RequestError> for CollaboratorError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Transport(e) if e.is_decode() => Self::decode(e.to_string()),
            RequestError::Transport(e) => Self::network(e.to_string()),
            RequestError::Api(api) => api.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let map = |status| CollaboratorError::from(ApiError::from_body(status, "{}"));
        assert!(matches!(map(401), CollaboratorError::Unauthorized(_)));
        assert!(matches!(map(403), CollaboratorError::Unauthorized(_)));
        assert!(matches!(map(404), CollaboratorError::NotFound(_)));
        assert!(matches!(map(409), CollaboratorError::Conflict(_)));
        assert!(matches!(
            map(500),
            CollaboratorError::Backend { status: 500, .. }
        ));
    }

    #[test]
    fn test_message_field_variants() {
        let rest = ApiError::from_body(
            404,
            r#"{"code":"42P01","message":"relation \"public.notifications\" does not exist"}"#,
        );
        assert!(rest.is_missing_relation());
        assert!(rest.message.contains("does not exist"));

        let auth = ApiError::from_body(
            400,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );
        assert_eq!(auth.message, "Invalid login credentials");

        let gotrue = ApiError::from_body(422, r#"{"code":422,"msg":"User already registered"}"#);
        assert_eq!(gotrue.code.as_deref(), Some("422"));
        assert_eq!(gotrue.message, "User already registered");
    }

    #[test]
    fn test_plain_text_body_is_message() {
        let err = ApiError::from_body(502, "bad gateway");
        assert_eq!(err.message, "bad gateway");
        assert_eq!(ApiError::from_body(500, "").message, "HTTP 500");
    }
}
