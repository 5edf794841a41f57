use axum::extract::State;
use axum::response::Json;
use axum::Extension;
use serde_json::{json, Value};

use crate::database::OrganizationQuery;
use crate::error::GreenError;
use crate::handlers::ensure_green;
use crate::middleware::GreenAuth;
use crate::state::AppState;

/// GET /organization/list - names of every active organization
pub async fn organization_list_all(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;

    let query = OrganizationQuery {
        active: Some(true),
        ..OrganizationQuery::default()
    };
    let organizations = state.store.query_organizations(&query).await?;
    let names: Vec<String> = organizations
        .into_iter()
        .map(|organization| organization.name)
        .collect();

    Ok(Json(json!({ "names": names })))
}
