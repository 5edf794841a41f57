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
#[serde(rename_all = "camelCase")]
struct PublicKeyBody {
    application_key: String,
}

fn public_key_pattern() -> Pattern {
    Pattern::strict_map(vec![(
        "applicationKey",
        Pattern::string().minimum_length(1),
    )])
}

/// POST /application/public-key/fetch - hand out an application's
/// token-verification key
pub async fn application_public_key(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: PublicKeyBody = parse_body(body, &public_key_pattern())?;

    let store = state.store.as_ref();
    let application = store
        .find_application_by_key(&body.application_key)
        .await?
        .ok_or_else(|| GreenError::application_not_found(body.application_key.as_str()))?;

    Ok(Json(json!({
        "applicationKey": application.key,
        "publicKey": application.public_key,
    })))
}
