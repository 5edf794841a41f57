use axum::extract::{Path, State};
use axum::response::Json;
use axum::Extension;
use serde_json::{json, Value};

use crate::database::{AccountQuery, IdListMatch};
use crate::error::GreenError;
use crate::handlers::account::account_list_payload;
use crate::handlers::ensure_green;
use crate::middleware::GreenAuth;
use crate::state::AppState;

/// GET /account/group/:group - active accounts holding the group
pub async fn account_list_by_group(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    Path(group): Path<String>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;

    let store = state.store.as_ref();
    let group = store
        .find_group_by_name(&group)
        .await?
        .ok_or_else(|| GreenError::group_not_found(group.as_str()))?;

    let query = AccountQuery {
        active: Some(true),
        groups: Some(IdListMatch::any(vec![group.id])),
        ..AccountQuery::default()
    };
    let accounts = store.query_accounts(&query).await?;
    let entries = account_list_payload(store, &accounts).await?;

    Ok(Json(json!({ "accounts": entries })))
}
