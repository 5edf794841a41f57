use axum::extract::State;
use axum::response::Json;
use axum::Extension;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::{Account, Organization};
use crate::error::GreenError;
use crate::handlers::{
    check_common_name, check_display_name, check_email, check_phone, check_username, ensure_green,
    ensure_no_internal_group, parse_body, parse_infos, require_namespace, resolve_groups,
    resolve_tag_ids,
};
use crate::middleware::GreenAuth;
use crate::pattern::Pattern;
use crate::state::AppState;
use crate::util::password;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InplodeBody {
    organization_name: String,
    organization_tags: Vec<String>,
    owner_username: String,
    owner_namespace: String,
    owner_infos: Value,
    owner_groups: Vec<String>,
    owner_display_name: Option<String>,
    owner_email: Option<String>,
    owner_phone: Option<String>,
    owner_password: Option<String>,
}

fn inplode_pattern() -> Pattern {
    Pattern::strict_map(vec![
        ("organizationName", Pattern::string()),
        ("organizationTags", Pattern::list(Pattern::string())),
        ("ownerUsername", Pattern::string()),
        ("ownerNamespace", Pattern::string()),
        ("ownerInfos", Pattern::info()),
        ("ownerGroups", Pattern::list(Pattern::string())),
        ("ownerDisplayName", Pattern::string().optional()),
        ("ownerEmail", Pattern::string().optional()),
        ("ownerPhone", Pattern::string().optional()),
        ("ownerPassword", Pattern::string().optional()),
    ])
}

/// POST /organization/inplode - bootstrap an organization together with
/// its owner account.
///
/// Everything is validated and resolved before any write. The two final
/// inserts run concurrently; there is no compensation when one of them
/// fails.
pub async fn organization_inplode(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: InplodeBody = parse_body(body, &inplode_pattern())?;

    check_username(&body.owner_username)?;
    check_common_name(&body.organization_name)?;
    if let Some(email) = &body.owner_email {
        check_email(email)?;
    }
    if let Some(phone) = &body.owner_phone {
        check_phone(phone)?;
    }
    if let Some(display_name) = &body.owner_display_name {
        check_display_name(display_name)?;
    }

    let infos = parse_infos(&body.owner_infos)?;

    let store = state.store.as_ref();
    let namespace = require_namespace(store, &body.owner_namespace).await?;

    if store
        .find_account(&body.owner_username, namespace.id)
        .await?
        .is_some()
    {
        return Err(GreenError::duplicate_account(body.owner_username.as_str()));
    }
    if store
        .find_organization_by_name(&body.organization_name)
        .await?
        .is_some()
    {
        return Err(GreenError::duplicate_organization(
            body.organization_name.as_str(),
        ));
    }

    let tag_ids = resolve_tag_ids(store, &body.organization_tags).await?;
    let groups = resolve_groups(store, &body.owner_groups).await?;
    ensure_no_internal_group(&groups)?;

    let mut temp_password = None;
    let mut account = match body.owner_password {
        Some(owner_password) => Account::create_with_password(
            body.owner_username.clone(),
            namespace.id,
            password::digest_password(&owner_password),
            infos,
        ),
        None => {
            let generated = password::create_temp_password();
            let account = Account::create_limbo(
                body.owner_username.clone(),
                namespace.id,
                password::digest_password(&generated),
                infos,
            );
            temp_password = Some(generated);
            account
        }
    };

    let mut organization = Organization::create(body.organization_name.clone(), account.id);
    organization.tags = tag_ids;
    account.groups = groups.into_iter().map(|group| group.id).collect();
    account.organization = Some(organization.id);
    account.display_name = body.owner_display_name;
    account.email = body.owner_email;
    account.phone = body.owner_phone;

    tokio::try_join!(
        store.insert_account(&account),
        store.insert_organization(&organization),
    )?;

    let mut payload = json!({
        "account": account.username,
        "organization": organization.name,
    });
    if let Some(temp_password) = temp_password {
        payload["tempPassword"] = json!(temp_password);
    }
    Ok(Json(payload))
}
