use axum::extract::State;
use axum::response::Json;
use axum::Extension;
use bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::agent::{GroupAgent, NamespaceAgent, OrganizationAgent, TagAgent};
use crate::database::{AccountQuery, DataStore, IdListMatch, MatchMode};
use crate::error::GreenError;
use crate::handlers::{activation_flag, ensure_green, parse_body, resolve_tag_ids};
use crate::middleware::GreenAuth;
use crate::pattern::Pattern;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryBody {
    activation: Option<String>,
    namespace: Option<String>,
    organizations: Vec<String>,
    groups: Vec<String>,
    groups_mode: Option<String>,
    tags: Vec<String>,
    tags_mode: Option<String>,
}

fn query_pattern() -> Pattern {
    Pattern::strict_map(vec![
        (
            "activation",
            Pattern::string_enum(&["active", "inactive"]).optional(),
        ),
        ("namespace", Pattern::string().optional()),
        ("organizations", Pattern::list(Pattern::string())),
        ("groups", Pattern::list(Pattern::string())),
        ("groupsMode", Pattern::string_enum(&["and", "or"]).optional()),
        ("tags", Pattern::list(Pattern::string())),
        ("tagsMode", Pattern::string_enum(&["and", "or"]).optional()),
    ])
}

fn match_mode(mode: Option<&str>) -> MatchMode {
    match mode {
        Some("and") => MatchMode::All,
        _ => MatchMode::Any,
    }
}

fn empty_result() -> Json<Value> {
    Json(json!({ "count": 0, "accounts": [] }))
}

/// POST /account/query - faceted account search.
///
/// Facet names resolve to ids before the filter is built. An empty facet
/// list leaves the facet out entirely; a facet whose names all fail to
/// resolve can match nothing, so the handler answers with an empty page
/// without touching the store.
pub async fn account_query(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: QueryBody = parse_body(body, &query_pattern())?;

    let store = state.store.as_ref();
    let mut query = AccountQuery {
        active: activation_flag(body.activation.as_deref()),
        ..AccountQuery::default()
    };

    // Unresolvable namespace names skip the facet instead of erroring.
    if let Some(namespace) = &body.namespace {
        if let Some(namespace) = store.find_namespace_by_namespace(namespace).await? {
            query.namespace = Some(namespace.id);
        }
    }

    if !body.organizations.is_empty() {
        let ids = resolve_organization_ids(store, &body.organizations).await?;
        if ids.is_empty() {
            return Ok(empty_result());
        }
        query.organizations = ids;
    }

    if !body.groups.is_empty() {
        let ids = resolve_group_ids(store, &body.groups).await?;
        if ids.is_empty() {
            return Ok(empty_result());
        }
        query.groups = Some(IdListMatch {
            ids,
            mode: match_mode(body.groups_mode.as_deref()),
        });
    }

    if !body.tags.is_empty() {
        let ids = resolve_tag_ids(store, &body.tags).await?;
        if ids.is_empty() {
            return Ok(empty_result());
        }
        query.tags = Some(IdListMatch {
            ids,
            mode: match_mode(body.tags_mode.as_deref()),
        });
    }

    let accounts = store.query_accounts(&query).await?;

    let mut group_agent = GroupAgent::new(store);
    let mut tag_agent = TagAgent::new(store);
    let mut organization_agent = OrganizationAgent::new(store);
    let mut namespace_agent = NamespaceAgent::new(store);

    let mut entries = Vec::new();
    for account in &accounts {
        let group_names: Vec<String> = group_agent
            .get_many(&account.groups)
            .await?
            .into_iter()
            .map(|group| group.name)
            .collect();
        let tag_names: Vec<String> = tag_agent
            .get_many(&account.tags)
            .await?
            .into_iter()
            .map(|tag| tag.name)
            .collect();

        let organization = match account.organization {
            Some(id) => organization_agent.get_one(id).await?,
            None => None,
        };

        let namespace = namespace_agent
            .get_one(account.namespace)
            .await?
            .ok_or_else(|| GreenError::namespace_not_found(account.namespace.to_hex()))?;

        let mut entry = json!({
            "username": account.username,
            "namespace": namespace.namespace,
            "groups": group_names,
            "tags": tag_names,
        });
        if let Some(organization) = organization {
            entry["organization"] = json!(organization.name);
        }
        if let Some(display_name) = &account.display_name {
            entry["displayName"] = json!(display_name);
        }
        if let Some(email) = &account.email {
            entry["email"] = json!(email);
        }
        if let Some(phone) = &account.phone {
            entry["phone"] = json!(phone);
        }
        entries.push(entry);
    }

    Ok(Json(json!({
        "count": entries.len(),
        "accounts": entries,
    })))
}

async fn resolve_organization_ids(
    store: &dyn DataStore,
    names: &[String],
) -> Result<Vec<ObjectId>, GreenError> {
    let mut ids = Vec::new();
    for name in names {
        if let Some(organization) = store.find_organization_by_name(name).await? {
            ids.push(organization.id);
        }
    }
    Ok(ids)
}

async fn resolve_group_ids(
    store: &dyn DataStore,
    names: &[String],
) -> Result<Vec<ObjectId>, GreenError> {
    let mut ids = Vec::new();
    for name in names {
        if let Some(group) = store.find_group_by_name(name).await? {
            ids.push(group.id);
        }
    }
    Ok(ids)
}
