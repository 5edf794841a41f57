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
use crate::util::password;

#[derive(Debug, Deserialize)]
struct LimboBody {
    username: String,
    namespace: String,
}

fn limbo_pattern() -> Pattern {
    Pattern::strict_map(vec![
        ("username", Pattern::string()),
        ("namespace", Pattern::string()),
    ])
}

/// POST /account/limbo - force an account back to a temporary password
pub async fn account_limbo(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: LimboBody = parse_body(body, &limbo_pattern())?;

    let store = state.store.as_ref();
    let mut account = require_account(store, &body.username, &body.namespace).await?;

    let temp_password = password::create_temp_password();
    account.reset_to_limbo(password::digest_password(&temp_password));
    store.save_account(&account).await?;

    Ok(Json(json!({
        "limbo": true,
        "tempPassword": temp_password,
    })))
}
