use axum::extract::State;
use axum::response::Json;
use axum::Extension;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::GreenError;
use crate::handlers::{ensure_green, parse_body};
use crate::middleware::GreenAuth;
use crate::pattern::Pattern;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct AddTagBody {
    organization: String,
    tag: String,
}

fn add_tag_pattern() -> Pattern {
    Pattern::strict_map(vec![
        ("organization", Pattern::string()),
        ("tag", Pattern::string()),
    ])
}

/// POST /organization/add-tag - attach a tag to an organization
pub async fn organization_add_tag(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: AddTagBody = parse_body(body, &add_tag_pattern())?;

    let store = state.store.as_ref();
    let mut organization = store
        .find_organization_by_name(&body.organization)
        .await?
        .ok_or_else(|| GreenError::organization_not_found(body.organization.as_str()))?;

    let tag = store
        .find_tag_by_name(&body.tag)
        .await?
        .ok_or_else(|| GreenError::tag_not_found(body.tag.as_str()))?;

    if organization.tags.contains(&tag.id) {
        return Err(GreenError::duplicate_tag(body.tag.as_str()));
    }

    organization.tags.push(tag.id);
    store.save_organization(&organization).await?;

    Ok(Json(json!({ "organization": body.organization })))
}
