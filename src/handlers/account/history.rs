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
use crate::util::validate;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryRecordBody {
    target: String,
    target_namespace: String,
    #[serde(rename = "type")]
    kind: String,
    application: String,
    by: String,
    by_namespace: String,
    content: Value,
}

fn history_record_pattern() -> Pattern {
    Pattern::strict_map(vec![
        ("target", Pattern::string()),
        ("targetNamespace", Pattern::string()),
        ("type", Pattern::string()),
        ("application", Pattern::string()),
        ("by", Pattern::string()),
        ("byNamespace", Pattern::string()),
        ("content", Pattern::scalar()),
    ])
}

/// POST /account/history/record - append an audit entry to an account
pub async fn account_history_record(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: HistoryRecordBody = parse_body(body, &history_record_pattern())?;

    if !validate::validate_account_action(&body.kind) {
        return Err(GreenError::invalid_account_action(body.kind.as_str()));
    }

    let store = state.store.as_ref();
    let mut target = require_account(store, &body.target, &body.target_namespace).await?;
    let actor = require_account(store, &body.by, &body.by_namespace).await?;

    let application = store
        .find_application_by_key(&body.application)
        .await?
        .ok_or_else(|| GreenError::application_not_found(body.application.as_str()))?;

    target.push_history(body.kind, application.id, actor.id, body.content);
    store.save_account(&target).await?;

    Ok(Json(json!({ "account": target.id.to_hex() })))
}
