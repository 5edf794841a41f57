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

/// GET /account/specific/:organization/:group - active members of the
/// organization that also hold the group
pub async fn account_list_specific(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    Path((organization, group)): Path<(String, String)>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;

    let store = state.store.as_ref();
    let group = store
        .find_group_by_name(&group)
        .await?
        .ok_or_else(|| GreenError::group_not_found(group.as_str()))?;
    let organization = store
        .find_organization_by_name(&organization)
        .await?
        .ok_or_else(|| GreenError::organization_not_found(organization.as_str()))?;

    let query = AccountQuery {
        active: Some(true),
        organizations: vec![organization.id],
        groups: Some(IdListMatch::any(vec![group.id])),
        ..AccountQuery::default()
    };
    let accounts = store.query_accounts(&query).await?;
    let entries = account_list_payload(store, &accounts).await?;

    Ok(Json(json!({ "accounts": entries })))
}
