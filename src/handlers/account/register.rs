use axum::extract::State;
use axum::response::Json;
use axum::Extension;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::Account;
use crate::error::GreenError;
use crate::handlers::{
    check_display_name, check_email, check_phone, check_username, ensure_green,
    ensure_no_internal_group, parse_body, parse_infos, require_namespace, resolve_groups,
    resolve_tag_ids,
};
use crate::middleware::GreenAuth;
use crate::pattern::Pattern;
use crate::state::AppState;
use crate::util::password;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody {
    username: String,
    namespace: String,
    user_infos: Value,
    user_groups: Vec<String>,
    user_tags: Vec<String>,
    user_display_name: Option<String>,
    user_email: Option<String>,
    user_phone: Option<String>,
}

fn register_pattern() -> Pattern {
    Pattern::strict_map(vec![
        ("username", Pattern::string()),
        ("namespace", Pattern::string()),
        ("userInfos", Pattern::info()),
        ("userGroups", Pattern::list(Pattern::string())),
        ("userTags", Pattern::list(Pattern::string())),
        ("userDisplayName", Pattern::string().optional()),
        ("userEmail", Pattern::string().optional()),
        ("userPhone", Pattern::string().optional()),
    ])
}

/// POST /account/register - create a limbo account under a namespace
pub async fn account_register(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: RegisterBody = parse_body(body, &register_pattern())?;

    let infos = parse_infos(&body.user_infos)?;

    check_username(&body.username)?;
    if let Some(email) = &body.user_email {
        check_email(email)?;
    }
    if let Some(phone) = &body.user_phone {
        check_phone(phone)?;
    }
    if let Some(display_name) = &body.user_display_name {
        check_display_name(display_name)?;
    }

    let store = state.store.as_ref();
    let namespace = require_namespace(store, &body.namespace).await?;

    if store
        .find_account(&body.username, namespace.id)
        .await?
        .is_some()
    {
        return Err(GreenError::duplicate_account(body.username.as_str()));
    }

    let tag_ids = resolve_tag_ids(store, &body.user_tags).await?;
    let groups = resolve_groups(store, &body.user_groups).await?;
    ensure_no_internal_group(&groups)?;

    let temp_password = password::create_temp_password();
    let mut account = Account::create_limbo(
        body.username.clone(),
        namespace.id,
        password::digest_password(&temp_password),
        infos,
    );
    account.tags = tag_ids;
    account.groups = groups.into_iter().map(|group| group.id).collect();
    account.display_name = body.user_display_name;
    account.email = body.user_email;
    account.phone = body.user_phone;

    store.insert_account(&account).await?;

    Ok(Json(json!({
        "account": account.username,
        "tempPassword": temp_password,
    })))
}
