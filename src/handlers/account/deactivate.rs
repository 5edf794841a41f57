use axum::extract::State;
use axum::response::Json;
use axum::Extension;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::GreenError;
use crate::handlers::{ensure_green, parse_body, require_account};
use crate::middleware::GreenAuth;
use crate::pattern::Pattern;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct DeactivateBody {
    username: String,
    namespace: String,
}

fn deactivate_pattern() -> Pattern {
    Pattern::strict_map(vec![
        ("username", Pattern::string()),
        ("namespace", Pattern::string()),
    ])
}

/// POST /account/deactivate - turn an active account off
pub async fn account_deactivate(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: DeactivateBody = parse_body(body, &deactivate_pattern())?;

    let store = state.store.as_ref();
    let mut account = require_account(store, &body.username, &body.namespace).await?;

    if !account.active {
        return Err(GreenError::already_deactivated(body.username.as_str()));
    }

    account.active = false;
    store.save_account(&account).await?;

    Ok(Json(json!({ "deactivated": true })))
}
