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
struct NamespaceQueryBody {
    activation: Option<String>,
}

fn namespace_query_pattern() -> Pattern {
    Pattern::strict_map(vec![(
        "activation",
        Pattern::string_enum(&["active", "inactive"]).optional(),
    )])
}

/// POST /namespace/query - namespace strings, optionally filtered by
/// activation
pub async fn namespace_query(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: NamespaceQueryBody = parse_body(body, &namespace_query_pattern())?;

    let namespaces = state
        .store
        .list_namespaces(activation_flag(body.activation.as_deref()))
        .await?;
    let names: Vec<String> = namespaces
        .into_iter()
        .map(|namespace| namespace.namespace)
        .collect();

    Ok(Json(json!({ "namespaces": names })))
}
