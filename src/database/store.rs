use async_trait::async_trait;
use bson::oid::ObjectId;
use thiserror::Error;

use super::models::{Account, Application, Decorator, Group, Namespace, Organization, Tag};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("store access error: {0}")]
    Access(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Entity holds at least one of the ids.
    Any,
    /// Entity holds every id.
    All,
}

#[derive(Debug, Clone)]
pub struct IdListMatch {
    pub ids: Vec<ObjectId>,
    pub mode: MatchMode,
}

impl IdListMatch {
    pub fn any(ids: Vec<ObjectId>) -> Self {
        Self {
            ids,
            mode: MatchMode::Any,
        }
    }

    pub fn all(ids: Vec<ObjectId>) -> Self {
        Self {
            ids,
            mode: MatchMode::All,
        }
    }
}

/// Composable account filter. Unset fields and empty id lists do not
/// constrain the result.
#[derive(Debug, Clone, Default)]
pub struct AccountQuery {
    pub active: Option<bool>,
    pub namespace: Option<ObjectId>,
    pub organizations: Vec<ObjectId>,
    pub groups: Option<IdListMatch>,
    pub tags: Option<IdListMatch>,
}

#[derive(Debug, Clone, Default)]
pub struct OrganizationQuery {
    pub active: Option<bool>,
    pub tags: Vec<ObjectId>,
}

/// The complete lookup and mutation surface the handlers need. Production
/// runs against MongoDB; tests run the same routes against the in-memory
/// implementation.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn find_application_by_key(&self, key: &str) -> Result<Option<Application>, StoreError>;

    async fn find_namespace_by_namespace(
        &self,
        namespace: &str,
    ) -> Result<Option<Namespace>, StoreError>;
    async fn find_namespace_by_id(&self, id: ObjectId) -> Result<Option<Namespace>, StoreError>;
    async fn list_namespaces(&self, active: Option<bool>) -> Result<Vec<Namespace>, StoreError>;

    async fn find_account(
        &self,
        username: &str,
        namespace: ObjectId,
    ) -> Result<Option<Account>, StoreError>;
    async fn find_account_by_id(&self, id: ObjectId) -> Result<Option<Account>, StoreError>;
    async fn insert_account(&self, account: &Account) -> Result<(), StoreError>;
    async fn save_account(&self, account: &Account) -> Result<(), StoreError>;
    async fn count_accounts_by_organization(
        &self,
        organization: ObjectId,
    ) -> Result<u64, StoreError>;
    async fn query_accounts(&self, query: &AccountQuery) -> Result<Vec<Account>, StoreError>;

    async fn find_organization_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Organization>, StoreError>;
    async fn find_organization_by_id(
        &self,
        id: ObjectId,
    ) -> Result<Option<Organization>, StoreError>;
    async fn insert_organization(&self, organization: &Organization) -> Result<(), StoreError>;
    async fn save_organization(&self, organization: &Organization) -> Result<(), StoreError>;
    async fn query_organizations(
        &self,
        query: &OrganizationQuery,
    ) -> Result<Vec<Organization>, StoreError>;

    async fn find_group_by_name(&self, name: &str) -> Result<Option<Group>, StoreError>;
    async fn find_group_by_id(&self, id: ObjectId) -> Result<Option<Group>, StoreError>;
    async fn list_groups(&self, active: Option<bool>) -> Result<Vec<Group>, StoreError>;

    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>, StoreError>;
    async fn find_tag_by_id(&self, id: ObjectId) -> Result<Option<Tag>, StoreError>;
    async fn list_tags(&self, active: Option<bool>) -> Result<Vec<Tag>, StoreError>;

    async fn list_decorators(&self, active: Option<bool>) -> Result<Vec<Decorator>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
