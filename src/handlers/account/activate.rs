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
struct ActivateBody {
    username: String,
    namespace: String,
}

fn activate_pattern() -> Pattern {
    Pattern::strict_map(vec![
        ("username", Pattern::string()),
        ("namespace", Pattern::string()),
    ])
}

/// POST /account/activate - turn an inactive account back on
pub async fn account_activate(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: ActivateBody = parse_body(body, &activate_pattern())?;

    let store = state.store.as_ref();
    let mut account = require_account(store, &body.username, &body.namespace).await?;

    if account.active {
        return Err(GreenError::already_activated(body.username.as_str()));
    }

    account.active = true;
    store.save_account(&account).await?;

    Ok(Json(json!({ "activated": true })))
}
