use axum::extract::{Path, State};
use axum::response::Json;
use axum::Extension;
use serde_json::{json, Value};

use crate::database::AccountQuery;
use crate::error::GreenError;
use crate::handlers::account::account_list_payload;
use crate::handlers::ensure_green;
use crate::middleware::GreenAuth;
use crate::state::AppState;

/// GET /account/organization/:organization - every member, active or not
pub async fn account_list_by_organization(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    Path(organization): Path<String>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;

    let store = state.store.as_ref();
    let organization = store
        .find_organization_by_name(&organization)
        .await?
        .ok_or_else(|| GreenError::organization_not_found(organization.as_str()))?;

    let query = AccountQuery {
        organizations: vec![organization.id],
        ..AccountQuery::default()
    };
    let accounts = store.query_accounts(&query).await?;
    let entries = account_list_payload(store, &accounts).await?;

    Ok(Json(json!({ "accounts": entries })))
}
