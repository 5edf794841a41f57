use axum::extract::{Path, State};
use axum::response::Json;
use axum::Extension;
use serde_json::{json, Value};

use crate::error::GreenError;
use crate::handlers::ensure_green;
use crate::middleware::GreenAuth;
use crate::state::AppState;

/// GET /organization/verify/:organization - report whether an
/// organization exists. Absence is `{valid: false}`, never an error.
pub async fn organization_verify(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    Path(organization): Path<String>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;

    let store = state.store.as_ref();
    match store.find_organization_by_name(&organization).await? {
        Some(organization) => Ok(Json(json!({
            "valid": true,
            "organization": { "name": organization.name },
        }))),
        None => Ok(Json(json!({ "valid": false }))),
    }
}
