use axum::extract::State;
use axum::response::Json;
use axum::Extension;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::GreenError;
use crate::handlers::{activation_flag, ensure_green, parse_body};
use crate::middleware::GreenAuth;
use crate::pattern::Pattern;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct TagQueryBody {
    activation: Option<String>,
}

fn tag_query_pattern() -> Pattern {
    Pattern::strict_map(vec![(
        "activation",
        Pattern::string_enum(&["active", "inactive"]).optional(),
    )])
}

/// POST /tag/query - tag catalog, optionally filtered by activation
pub async fn tag_query(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: TagQueryBody = parse_body(body, &tag_query_pattern())?;

    let tags = state
        .store
        .list_tags(activation_flag(body.activation.as_deref()))
        .await?;
    let elements: Vec<Value> = tags
        .into_iter()
        .map(|tag| json!({ "name": tag.name }))
        .collect();

    Ok(Json(json!({ "tags": elements })))
}
