use axum::extract::{Path, State};
use axum::response::Json;
use axum::Extension;
use serde_json::{json, Value};

use crate::error::GreenError;
use crate::handlers::ensure_green;
use crate::middleware::GreenAuth;
use crate::state::AppState;

/// GET /organization/single/:name - one organization with its owner
/// resolved to a username
pub async fn organization_single(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    Path(name): Path<String>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;

    let store = state.store.as_ref();
    let organization = store
        .find_organization_by_name(&name)
        .await?
        .ok_or_else(|| GreenError::organization_not_found(name.as_str()))?;

    let owner = store
        .find_account_by_id(organization.owner)
        .await?
        .ok_or_else(|| GreenError::account_not_found(organization.owner.to_hex()))?;

    Ok(Json(json!({
        "name": organization.name,
        "owner": owner.username,
    })))
}
