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
struct DecoratorQueryBody {
    activation: Option<String>,
}

fn decorator_query_pattern() -> Pattern {
    Pattern::strict_map(vec![(
        "activation",
        Pattern::string_enum(&["active", "inactive"]).optional(),
    )])
}

/// POST /decorator/query - decorator catalog, optionally filtered by
/// activation
pub async fn decorator_query(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: DecoratorQueryBody = parse_body(body, &decorator_query_pattern())?;

    let decorators = state
        .store
        .list_decorators(activation_flag(body.activation.as_deref()))
        .await?;
    let elements: Vec<Value> = decorators
        .into_iter()
        .map(|decorator| json!({ "name": decorator.name }))
        .collect();

    Ok(Json(json!({ "decorators": elements })))
}
