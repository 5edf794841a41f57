use axum::extract::State;
use axum::response::Json;
use axum::Extension;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::Group;
use crate::database::DataStore;
use crate::error::GreenError;
use crate::handlers::{ensure_green, ensure_no_internal_group, parse_body, require_account};
use crate::middleware::GreenAuth;
use crate::pattern::Pattern;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct GroupReplaceBody {
    username: String,
    namespace: String,
    groups: Vec<String>,
}

fn group_replace_pattern() -> Pattern {
    Pattern::strict_map(vec![
        ("username", Pattern::string()),
        ("namespace", Pattern::string()),
        ("groups", Pattern::list(Pattern::string())),
    ])
}

/// POST /account/group/replace - wholesale replacement of an account's
/// groups. Every requested name must resolve before anything is written.
pub async fn account_group_replace(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: GroupReplaceBody = parse_body(body, &group_replace_pattern())?;

    let store = state.store.as_ref();
    let mut account = require_account(store, &body.username, &body.namespace).await?;

    let groups = require_groups(store, &body.groups).await?;
    ensure_no_internal_group(&groups)?;

    account.groups = groups.into_iter().map(|group| group.id).collect();
    store.save_account(&account).await?;

    Ok(Json(json!({ "groups": body.groups })))
}

async fn require_groups(store: &dyn DataStore, names: &[String]) -> Result<Vec<Group>, GreenError> {
    let mut groups = Vec::new();
    for name in names {
        let group = store
            .find_group_by_name(name)
            .await?
            .ok_or_else(|| GreenError::group_not_found("multiple"))?;
        groups.push(group);
    }
    Ok(groups)
}
