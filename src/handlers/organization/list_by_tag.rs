use axum::extract::{Path, State};
use axum::response::Json;
use axum::Extension;
use serde_json::{json, Value};

use crate::database::OrganizationQuery;
use crate::error::GreenError;
use crate::handlers::ensure_green;
use crate::middleware::GreenAuth;
use crate::state::AppState;

/// GET /organization/list/:tag - names of active organizations holding
/// the tag
pub async fn organization_list_by_tag(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    Path(tag): Path<String>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;

    let store = state.store.as_ref();
    let tag = store
        .find_tag_by_name(&tag)
        .await?
        .ok_or_else(|| GreenError::tag_not_found(tag.as_str()))?;

    let query = OrganizationQuery {
        active: Some(true),
        tags: vec![tag.id],
    };
    let organizations = store.query_organizations(&query).await?;
    let names: Vec<String> = organizations
        .into_iter()
        .map(|organization| organization.name)
        .collect();

    Ok(Json(json!({ "names": names })))
}
