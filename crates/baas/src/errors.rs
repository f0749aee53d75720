//! Conversion of backend responses and transport failures into core errors.

use budgetpal_core::errors::{Error, RemoteError};
use serde::Deserialize;

/// Longest slice of an unparseable error body kept in messages.
const MAX_BODY_EXCERPT: usize = 200;

/// Error payload; the REST and auth endpoints use different field names.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
}

/// Best human-readable message from an error body.
pub fn error_message(status: u16, body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(body) {
        let message = err
            .message
            .or(err.msg)
            .or(err.error_description)
            .or(err.error)
            .or(err.error_code);
        if let Some(message) = message {
            return message;
        }
    }
    let excerpt: String = body.trim().chars().take(MAX_BODY_EXCERPT).collect();
    if excerpt.is_empty() {
        format!("HTTP {}", status)
    } else {
        excerpt
    }
}

/// Maps a non-success status to the matching core error.
pub fn status_error(operation: &str, status: u16, body: &str) -> Error {
    let message = error_message(status, body);
    match status {
        401 => Error::Unauthorized(format!("{}: {}", operation, message)),
        403 => Error::Forbidden(format!("{}: {}", operation, message)),
        404 => Error::NotFound(format!("{}: {}", operation, message)),
        _ => Error::Remote(RemoteError::Rejected {
            operation: operation.to_string(),
            status,
            message,
        }),
    }
}

pub fn transport_error(operation: &str, err: reqwest::Error) -> Error {
    let message = if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("could not reach backend: {}", err)
    } else {
        err.to_string()
    };
    Error::Remote(RemoteError::RequestFailed {
        operation: operation.to_string(),
        message,
    })
}

pub fn decode_error(operation: &str, err: serde_json::Error, body: &str) -> Error {
    let excerpt: String = body.chars().take(MAX_BODY_EXCERPT).collect();
    Error::Remote(RemoteError::InvalidResponse {
        operation: operation.to_string(),
        message: format!("{} - {}", err, excerpt),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_fields_in_priority_order() {
        assert_eq!(
            error_message(400, r#"{"message":"violates check","code":"23514"}"#),
            "violates check"
        );
        assert_eq!(
            error_message(400, r#"{"msg":"Password should be at least 6 characters"}"#),
            "Password should be at least 6 characters"
        );
        assert_eq!(
            error_message(
                400,
                r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#
            ),
            "Invalid login credentials"
        );
        assert_eq!(error_message(502, "<html>bad gateway</html>"), "<html>bad gateway</html>");
        assert_eq!(error_message(500, ""), "HTTP 500");
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error("load expenses", 401, r#"{"message":"JWT expired"}"#),
            Error::Unauthorized(_)
        ));
        assert!(matches!(
            status_error("sign out", 403, r#"{"msg":"Auth session missing!"}"#),
            Error::Forbidden(_)
        ));
        assert!(matches!(
            status_error("scan todos", 404, r#"{"message":"relation does not exist"}"#),
            Error::NotFound(_)
        ));

        let err = status_error("add expense", 409, r#"{"message":"duplicate key"}"#);
        match &err {
            Error::Remote(remote) => {
                assert_eq!(remote.operation(), "add expense");
                assert_eq!(remote.status(), Some(409));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(
            err.to_string(),
            "failed to add expense: backend rejected the request (409): duplicate key"
        );
    }

    #[test]
    fn test_forbidden_sign_out_keeps_marker_text() {
        let err = status_error("sign out", 403, r#"{"msg":"Auth session missing!"}"#);
        assert!(err.to_string().contains("Auth session missing!"));
    }
}
