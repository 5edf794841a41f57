use axum::extract::State;
use axum::response::Json;
use axum::Extension;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::OrganizationQuery;
use crate::error::GreenError;
use crate::handlers::{activation_flag, ensure_green, parse_body, resolve_tag_ids};
use crate::middleware::GreenAuth;
use crate::pattern::Pattern;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct QueryBody {
    activation: Option<String>,
    tags: Vec<String>,
}

fn query_pattern() -> Pattern {
    Pattern::strict_map(vec![
        (
            "activation",
            Pattern::string_enum(&["active", "inactive"]).optional(),
        ),
        ("tags", Pattern::list(Pattern::string())),
    ])
}

/// POST /organization/query - organization names filtered by activation
/// and tag membership
pub async fn organization_query(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: QueryBody = parse_body(body, &query_pattern())?;

    let store = state.store.as_ref();
    let mut query = OrganizationQuery {
        active: activation_flag(body.activation.as_deref()),
        ..OrganizationQuery::default()
    };

    if !body.tags.is_empty() {
        let ids = resolve_tag_ids(store, &body.tags).await?;
        if ids.is_empty() {
            return Ok(Json(json!({ "names": [] })));
        }
        query.tags = ids;
    }

    let organizations = store.query_organizations(&query).await?;
    let names: Vec<String> = organizations
        .into_iter()
        .map(|organization| organization.name)
        .collect();

    Ok(Json(json!({ "names": names })))
}
