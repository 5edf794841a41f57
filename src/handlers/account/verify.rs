use axum::extract::State;
use axum::response::Json;
use axum::Extension;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::GreenError;
use crate::handlers::{ensure_green, parse_body};
use crate::middleware::GreenAuth;
use crate::pattern::Pattern;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct VerifyBody {
    username: String,
    namespace: String,
}

fn verify_pattern() -> Pattern {
    Pattern::strict_map(vec![
        ("username", Pattern::string()),
        ("namespace", Pattern::string()),
    ])
}

/// POST /account/verify - report whether an active account exists.
///
/// Absence is a regular `{valid: false}` answer, never an error.
pub async fn account_verify(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: VerifyBody = parse_body(body, &verify_pattern())?;

    let store = state.store.as_ref();
    let account = match store.find_namespace_by_namespace(&body.namespace).await? {
        Some(namespace) => store
            .find_account(&body.username, namespace.id)
            .await?
            .filter(|account| account.active),
        None => None,
    };

    match account {
        Some(account) => {
            let mut summary = json!({
                "username": account.username,
                "namespace": body.namespace,
            });
            if let Some(display_name) = &account.display_name {
                summary["displayName"] = json!(display_name);
            }
            Ok(Json(json!({ "valid": true, "account": summary })))
        }
        None => Ok(Json(json!({ "valid": false }))),
    }
}
