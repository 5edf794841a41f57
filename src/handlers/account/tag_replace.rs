use axum::extract::State;
use axum::response::Json;
use axum::Extension;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::Tag;
use crate::database::DataStore;
use crate::error::GreenError;
use crate::handlers::{ensure_green, parse_body, require_account};
use crate::middleware::GreenAuth;
use crate::pattern::Pattern;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct TagReplaceBody {
    username: String,
    namespace: String,
    tags: Vec<String>,
}

fn tag_replace_pattern() -> Pattern {
    Pattern::strict_map(vec![
        ("username", Pattern::string()),
        ("namespace", Pattern::string()),
        ("tags", Pattern::list(Pattern::string())),
    ])
}

/// POST /account/tag/replace - wholesale replacement of an account's tags
pub async fn account_tag_replace(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: TagReplaceBody = parse_body(body, &tag_replace_pattern())?;

    let store = state.store.as_ref();
    let mut account = require_account(store, &body.username, &body.namespace).await?;

    let tags = require_tags(store, &body.tags).await?;

    account.tags = tags.into_iter().map(|tag| tag.id).collect();
    store.save_account(&account).await?;

    Ok(Json(json!({ "tags": body.tags })))
}

async fn require_tags(store: &dyn DataStore, names: &[String]) -> Result<Vec<Tag>, GreenError> {
    let mut tags = Vec::new();
    for name in names {
        let tag = store
            .find_tag_by_name(name)
            .await?
            .ok_or_else(|| GreenError::tag_not_found("multiple"))?;
        tags.push(tag);
    }
    Ok(tags)
}
