use axum::extract::State;
use axum::response::Json;
use axum::Extension;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::GreenError;
use crate::handlers::validate::split_credential;
use crate::handlers::{ensure_green, parse_body};
use crate::middleware::GreenAuth;
use crate::pattern::Pattern;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct DirectBody {
    key: String,
}

fn direct_pattern() -> Pattern {
    Pattern::strict_map(vec![("key", Pattern::string())])
}

/// POST /validate/direct - bare secret comparison for a known application.
///
/// Unlike the bridge check, activity and green access are not consulted;
/// the application must exist, though.
pub async fn validate_direct(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: DirectBody = parse_body(body, &direct_pattern())?;

    let (application_key, secret) = split_credential(&body.key)?;

    let store = state.store.as_ref();
    let application = store
        .find_application_by_key(application_key)
        .await?
        .ok_or_else(|| GreenError::application_not_found(application_key))?;

    Ok(Json(json!({
        "valid": application.green == secret,
        "name": application.name,
        "key": application.key,
    })))
}
