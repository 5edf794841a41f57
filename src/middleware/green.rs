use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

/// Green authentication verdict attached to every request. Handlers check
/// the flag and refuse on their own; the middleware itself never rejects.
#[derive(Clone, Debug)]
pub struct GreenAuth {
    pub valid: bool,
}

/// Resolve the `applicationKey:sharedSecret` bearer credential against the
/// application registry. The request continues down the pipeline whether or
/// not the credential checks out.
pub async fn green_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    let valid = match extract_credential(&headers) {
        Some((key, secret)) => match state.store.find_application_by_key(&key).await {
            Ok(Some(application)) => {
                application.green_usable() && application.green == secret
            }
            Ok(None) => false,
            Err(error) => {
                tracing::warn!(error = %error, "green credential lookup failed");
                false
            }
        },
        None => false,
    };

    request.extensions_mut().insert(GreenAuth { valid });
    next.run(request).await
}

/// Pull the credential out of the Authorization header. Anything malformed
/// resolves to `None`: no header, no Bearer prefix, or a credential that
/// does not split into exactly two colon-delimited parts.
fn extract_credential(headers: &HeaderMap) -> Option<(String, String)> {
    let header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))?;

    let value = header.to_str().ok()?;
    let credential = value.strip_prefix("Bearer ")?;

    let mut pieces = credential.split(':');
    match (pieces.next(), pieces.next(), pieces.next()) {
        (Some(key), Some(secret), None) => Some((key.to_string(), secret.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extracts_key_and_secret() {
        let headers = headers_with("Bearer portal:hunter2");
        assert_eq!(
            extract_credential(&headers),
            Some(("portal".to_string(), "hunter2".to_string())),
        );
    }

    #[test]
    fn test_missing_header_is_none() {
        assert_eq!(extract_credential(&HeaderMap::new()), None);
    }

    #[test]
    fn test_missing_bearer_prefix_is_none() {
        let headers = headers_with("portal:hunter2");
        assert_eq!(extract_credential(&headers), None);
    }

    #[test]
    fn test_wrong_piece_count_is_none() {
        assert_eq!(extract_credential(&headers_with("Bearer portal")), None);
        assert_eq!(
            extract_credential(&headers_with("Bearer portal:a:b")),
            None,
        );
    }

    #[test]
    fn test_empty_secret_still_splits() {
        let headers = headers_with("Bearer portal:");
        assert_eq!(
            extract_credential(&headers),
            Some(("portal".to_string(), String::new())),
        );
    }
}
