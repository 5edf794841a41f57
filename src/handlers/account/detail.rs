use axum::extract::{Path, State};
use axum::response::Json;
use axum::Extension;
use serde_json::Value;

use crate::error::GreenError;
use crate::handlers::account::detail_payload;
use crate::handlers::{ensure_green, require_account};
use crate::middleware::GreenAuth;
use crate::state::AppState;

/// GET /account/detail/:username/:namespace
pub async fn account_detail(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    Path((username, namespace)): Path<(String, String)>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;

    let store = state.store.as_ref();
    let account = require_account(store, &username, &namespace).await?;

    Ok(Json(detail_payload(&account, &namespace)))
}
