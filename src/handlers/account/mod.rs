// handlers/account/mod.rs - Account lifecycle and lookup routes

pub mod activate;
pub mod deactivate;
pub mod detail;
pub mod group_replace;
pub mod history;
pub mod limbo;
pub mod list_by_group;
pub mod list_by_organization;
pub mod list_specific;
pub mod query;
pub mod register;
pub mod tag_replace;
pub mod update;
pub mod verify;

pub use activate::account_activate;
pub use deactivate::account_deactivate;
pub use detail::account_detail;
pub use group_replace::account_group_replace;
pub use history::account_history_record;
pub use limbo::account_limbo;
pub use list_by_group::account_list_by_group;
pub use list_by_organization::account_list_by_organization;
pub use list_specific::account_list_specific;
pub use query::account_query;
pub use register::account_register;
pub use tag_replace::account_tag_replace;
pub use update::account_update;
pub use verify::account_verify;

use serde_json::{json, Value};

use crate::agent::{GroupAgent, NamespaceAgent};
use crate::database::models::Account;
use crate::database::DataStore;
use crate::error::GreenError;

/// Detail payload shared by the detail and update routes.
pub(crate) fn detail_payload(account: &Account, namespace: &str) -> Value {
    let mut payload = json!({
        "active": account.active,
        "username": account.username,
        "namespace": namespace,
        "limbo": account.limbo,
    });
    if let Some(email) = &account.email {
        payload["email"] = json!(email);
    }
    if let Some(phone) = &account.phone {
        payload["phone"] = json!(phone);
    }
    if let Some(display_name) = &account.display_name {
        payload["displayName"] = json!(display_name);
    }
    if let Some(avatar) = &account.avatar {
        payload["avatar"] = json!(avatar);
    }
    payload
}

/// List-element payload shared by the by-group, by-organization and
/// specific listing routes. Group and namespace names resolve through
/// per-request agents so repeated ids hit the store once.
pub(crate) async fn account_list_payload(
    store: &dyn DataStore,
    accounts: &[Account],
) -> Result<Vec<Value>, GreenError> {
    let mut group_agent = GroupAgent::new(store);
    let mut namespace_agent = NamespaceAgent::new(store);

    let mut entries = Vec::new();
    for account in accounts {
        let group_names: Vec<String> = group_agent
            .get_many(&account.groups)
            .await?
            .into_iter()
            .map(|group| group.name)
            .collect();

        let namespace = namespace_agent
            .get_one(account.namespace)
            .await?
            .ok_or_else(|| GreenError::namespace_not_found(account.namespace.to_hex()))?;

        let mut entry = json!({
            "username": account.username,
            "namespace": namespace.namespace,
            "groups": group_names,
        });
        if let Some(display_name) = &account.display_name {
            entry["displayName"] = json!(display_name);
        }
        entries.push(entry);
    }
    Ok(entries)
}
