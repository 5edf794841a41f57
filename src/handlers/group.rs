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
struct GroupQueryBody {
    activation: Option<String>,
}

fn group_query_pattern() -> Pattern {
    Pattern::strict_map(vec![(
        "activation",
        Pattern::string_enum(&["active", "inactive"]).optional(),
    )])
}

/// POST /group/query - group names, optionally filtered by activation
pub async fn group_query(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: GroupQueryBody = parse_body(body, &group_query_pattern())?;

    let groups = state
        .store
        .list_groups(activation_flag(body.activation.as_deref()))
        .await?;
    let names: Vec<String> = groups.into_iter().map(|group| group.name).collect();

    Ok(Json(json!({ "names": names })))
}
