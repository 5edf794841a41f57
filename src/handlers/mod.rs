// handlers/mod.rs - Green route handler tree
//
// Every route follows the same spine: green gate -> body validation ->
// business logic -> JSON response. The shared pieces of that spine live
// here; each route keeps its own file below.

pub mod account;
pub mod application;
pub mod decorator;
pub mod group;
pub mod health;
pub mod namespace;
pub mod organization;
pub mod tag;
pub mod validate;

use axum::response::Json;
use bson::oid::ObjectId;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::database::models::{Account, Group, Namespace};
use crate::database::DataStore;
use crate::error::GreenError;
use crate::middleware::GreenAuth;
use crate::pattern::{self, Pattern};
use crate::util::infos;

/// Refuse a request whose green credential did not check out.
pub(crate) fn ensure_green(auth: &GreenAuth) -> Result<(), GreenError> {
    if auth.valid {
        Ok(())
    } else {
        Err(GreenError::green_not_valid())
    }
}

/// Validate the JSON body against the route pattern, then deserialize it
/// into the route's typed body.
pub(crate) fn parse_body<T: DeserializeOwned>(
    body: Option<Json<Value>>,
    pattern: &Pattern,
) -> Result<T, GreenError> {
    let Json(value) = body.ok_or_else(GreenError::insufficient_information)?;
    let verdict = pattern::verify(pattern, &value);
    if !verdict.succeed() {
        return Err(GreenError::pattern_mismatch(verdict.first_invalid()));
    }
    serde_json::from_value(value).map_err(|_| GreenError::insufficient_information())
}

/// Normalize an info field, surfacing the offending line on parse failure.
pub(crate) fn parse_infos(value: &Value) -> Result<Map<String, Value>, GreenError> {
    infos::jsonify_info(value).map_err(|line| GreenError::info_line_format(line))
}

pub(crate) async fn require_namespace(
    store: &dyn DataStore,
    namespace: &str,
) -> Result<Namespace, GreenError> {
    store
        .find_namespace_by_namespace(namespace)
        .await?
        .ok_or_else(|| GreenError::namespace_not_found(namespace))
}

/// Look up an account by its (username, namespace) pair.
pub(crate) async fn require_account(
    store: &dyn DataStore,
    username: &str,
    namespace: &str,
) -> Result<Account, GreenError> {
    let namespace = require_namespace(store, namespace).await?;
    store
        .find_account(username, namespace.id)
        .await?
        .ok_or_else(|| GreenError::account_not_found(username))
}

/// Resolve tag names to ids. Unknown names are dropped, matching the
/// by-names bulk lookups of the registration flows.
pub(crate) async fn resolve_tag_ids(
    store: &dyn DataStore,
    names: &[String],
) -> Result<Vec<ObjectId>, GreenError> {
    let mut ids = Vec::new();
    for name in names {
        if let Some(tag) = store.find_tag_by_name(name).await? {
            ids.push(tag.id);
        }
    }
    Ok(ids)
}

/// Resolve group names, dropping unknown ones.
pub(crate) async fn resolve_groups(
    store: &dyn DataStore,
    names: &[String],
) -> Result<Vec<Group>, GreenError> {
    let mut groups = Vec::new();
    for name in names {
        if let Some(group) = store.find_group_by_name(name).await? {
            groups.push(group);
        }
    }
    Ok(groups)
}

/// Internal groups cannot be granted or removed through this gateway.
pub(crate) fn ensure_no_internal_group(groups: &[Group]) -> Result<(), GreenError> {
    if groups.iter().any(|group| group.internal) {
        return Err(GreenError::cannot_modify_internal_group());
    }
    Ok(())
}

/// Map the `activation` body field onto an active flag. Anything but the
/// two enum values leaves the filter open.
pub(crate) fn activation_flag(activation: Option<&str>) -> Option<bool> {
    match activation {
        Some("active") => Some(true),
        Some("inactive") => Some(false),
        _ => None,
    }
}

pub(crate) fn check_username(username: &str) -> Result<(), GreenError> {
    match crate::util::validate::validate_username(username) {
        Some(reason) => Err(GreenError::invalid_username(reason)),
        None => Ok(()),
    }
}

pub(crate) fn check_email(email: &str) -> Result<(), GreenError> {
    match crate::util::validate::validate_email(email) {
        Some(reason) => Err(GreenError::invalid_email(reason)),
        None => Ok(()),
    }
}

pub(crate) fn check_phone(phone: &str) -> Result<(), GreenError> {
    match crate::util::validate::validate_phone(phone) {
        Some(reason) => Err(GreenError::invalid_phone(reason)),
        None => Ok(()),
    }
}

pub(crate) fn check_display_name(display_name: &str) -> Result<(), GreenError> {
    match crate::util::validate::validate_display_name(display_name) {
        Some(reason) => Err(GreenError::invalid_display_name(reason)),
        None => Ok(()),
    }
}

pub(crate) fn check_common_name(name: &str) -> Result<(), GreenError> {
    match crate::util::validate::validate_common_name(name) {
        Some(reason) => Err(GreenError::invalid_common_name(reason)),
        None => Ok(()),
    }
}
