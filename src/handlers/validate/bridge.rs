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
struct BridgeBody {
    key: String,
}

fn bridge_pattern() -> Pattern {
    Pattern::strict_map(vec![("key", Pattern::string())])
}

/// POST /validate/bridge - check another application's green credential.
///
/// The answer follows the same rule as the gate on this service: the
/// application must exist, be active, hold green access and present the
/// matching secret. An unknown application is a plain `{valid: false}`.
pub async fn validate_bridge(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: BridgeBody = parse_body(body, &bridge_pattern())?;

    let (application_key, secret) = split_credential(&body.key)?;

    let store = state.store.as_ref();
    match store.find_application_by_key(application_key).await? {
        Some(application) => {
            let valid = application.green_usable() && application.green == secret;
            Ok(Json(json!({
                "valid": valid,
                "name": application.name,
                "key": application.key,
            })))
        }
        None => Ok(Json(json!({ "valid": false }))),
    }
}
