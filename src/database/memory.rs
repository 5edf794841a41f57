use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use bson::oid::ObjectId;

use super::models::{Account, Application, Decorator, Group, Namespace, Organization, Tag};
use super::store::{
    AccountQuery, DataStore, IdListMatch, MatchMode, OrganizationQuery, StoreError,
};

/// Hashmap-backed store with the same trait surface as the MongoDB
/// implementation. Integration tests seed it through the `seed_*` helpers
/// and drive the full router against it.
#[derive(Default)]
pub struct MemoryStore {
    applications: Mutex<HashMap<ObjectId, Application>>,
    accounts: Mutex<HashMap<ObjectId, Account>>,
    namespaces: Mutex<HashMap<ObjectId, Namespace>>,
    organizations: Mutex<HashMap<ObjectId, Organization>>,
    groups: Mutex<HashMap<ObjectId, Group>>,
    tags: Mutex<HashMap<ObjectId, Tag>>,
    decorators: Mutex<HashMap<ObjectId, Decorator>>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex
        .lock()
        .map_err(|e| StoreError::Access(format!("store mutex poisoned: {}", e)))
}

fn matches_id_list(held: &[ObjectId], wanted: &IdListMatch) -> bool {
    if wanted.ids.is_empty() {
        return true;
    }
    match wanted.mode {
        MatchMode::Any => wanted.ids.iter().any(|id| held.contains(id)),
        MatchMode::All => wanted.ids.iter().all(|id| held.contains(id)),
    }
}

fn matches_account(account: &Account, query: &AccountQuery) -> bool {
    if let Some(active) = query.active {
        if account.active != active {
            return false;
        }
    }
    if let Some(namespace) = query.namespace {
        if account.namespace != namespace {
            return false;
        }
    }
    if !query.organizations.is_empty() {
        match account.organization {
            Some(organization) if query.organizations.contains(&organization) => {}
            _ => return false,
        }
    }
    if let Some(groups) = &query.groups {
        if !matches_id_list(&account.groups, groups) {
            return false;
        }
    }
    if let Some(tags) = &query.tags {
        if !matches_id_list(&account.tags, tags) {
            return false;
        }
    }
    true
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_application(&self, application: Application) {
        self.applications
            .lock()
            .expect("store mutex poisoned")
            .insert(application.id, application);
    }

    pub fn seed_account(&self, account: Account) {
        self.accounts
            .lock()
            .expect("store mutex poisoned")
            .insert(account.id, account);
    }

    pub fn seed_namespace(&self, namespace: Namespace) {
        self.namespaces
            .lock()
            .expect("store mutex poisoned")
            .insert(namespace.id, namespace);
    }

    pub fn seed_organization(&self, organization: Organization) {
        self.organizations
            .lock()
            .expect("store mutex poisoned")
            .insert(organization.id, organization);
    }

    pub fn seed_group(&self, group: Group) {
        self.groups
            .lock()
            .expect("store mutex poisoned")
            .insert(group.id, group);
    }

    pub fn seed_tag(&self, tag: Tag) {
        self.tags
            .lock()
            .expect("store mutex poisoned")
            .insert(tag.id, tag);
    }

    pub fn seed_decorator(&self, decorator: Decorator) {
        self.decorators
            .lock()
            .expect("store mutex poisoned")
            .insert(decorator.id, decorator);
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn find_application_by_key(&self, key: &str) -> Result<Option<Application>, StoreError> {
        let applications = lock(&self.applications)?;
        Ok(applications
            .values()
            .find(|application| application.key == key)
            .cloned())
    }

    async fn find_namespace_by_namespace(
        &self,
        namespace: &str,
    ) -> Result<Option<Namespace>, StoreError> {
        let namespaces = lock(&self.namespaces)?;
        Ok(namespaces
            .values()
            .find(|entry| entry.namespace == namespace)
            .cloned())
    }

    async fn find_namespace_by_id(&self, id: ObjectId) -> Result<Option<Namespace>, StoreError> {
        let namespaces = lock(&self.namespaces)?;
        Ok(namespaces.get(&id).cloned())
    }

    async fn list_namespaces(&self, active: Option<bool>) -> Result<Vec<Namespace>, StoreError> {
        let namespaces = lock(&self.namespaces)?;
        let mut listed: Vec<Namespace> = namespaces
            .values()
            .filter(|entry| active.map_or(true, |wanted| entry.active == wanted))
            .cloned()
            .collect();
        listed.sort_by(|a, b| a.namespace.cmp(&b.namespace));
        Ok(listed)
    }

    async fn find_account(
        &self,
        username: &str,
        namespace: ObjectId,
    ) -> Result<Option<Account>, StoreError> {
        let accounts = lock(&self.accounts)?;
        Ok(accounts
            .values()
            .find(|account| account.username == username && account.namespace == namespace)
            .cloned())
    }

    async fn find_account_by_id(&self, id: ObjectId) -> Result<Option<Account>, StoreError> {
        let accounts = lock(&self.accounts)?;
        Ok(accounts.get(&id).cloned())
    }

    async fn insert_account(&self, account: &Account) -> Result<(), StoreError> {
        lock(&self.accounts)?.insert(account.id, account.clone());
        Ok(())
    }

    async fn save_account(&self, account: &Account) -> Result<(), StoreError> {
        lock(&self.accounts)?.insert(account.id, account.clone());
        Ok(())
    }

    async fn count_accounts_by_organization(
        &self,
        organization: ObjectId,
    ) -> Result<u64, StoreError> {
        let accounts = lock(&self.accounts)?;
        Ok(accounts
            .values()
            .filter(|account| account.organization == Some(organization))
            .count() as u64)
    }

    async fn query_accounts(&self, query: &AccountQuery) -> Result<Vec<Account>, StoreError> {
        let accounts = lock(&self.accounts)?;
        let mut matched: Vec<Account> = accounts
            .values()
            .filter(|account| matches_account(account, query))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(matched)
    }

    async fn find_organization_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Organization>, StoreError> {
        let organizations = lock(&self.organizations)?;
        Ok(organizations
            .values()
            .find(|organization| organization.name == name)
            .cloned())
    }

    async fn find_organization_by_id(
        &self,
        id: ObjectId,
    ) -> Result<Option<Organization>, StoreError> {
        let organizations = lock(&self.organizations)?;
        Ok(organizations.get(&id).cloned())
    }

    async fn insert_organization(&self, organization: &Organization) -> Result<(), StoreError> {
        lock(&self.organizations)?.insert(organization.id, organization.clone());
        Ok(())
    }

    async fn save_organization(&self, organization: &Organization) -> Result<(), StoreError> {
        lock(&self.organizations)?.insert(organization.id, organization.clone());
        Ok(())
    }

    async fn query_organizations(
        &self,
        query: &OrganizationQuery,
    ) -> Result<Vec<Organization>, StoreError> {
        let organizations = lock(&self.organizations)?;
        let mut matched: Vec<Organization> = organizations
            .values()
            .filter(|organization| {
                if let Some(active) = query.active {
                    if organization.active != active {
                        return false;
                    }
                }
                if query.tags.is_empty() {
                    return true;
                }
                query.tags.iter().any(|tag| organization.tags.contains(tag))
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matched)
    }

    async fn find_group_by_name(&self, name: &str) -> Result<Option<Group>, StoreError> {
        let groups = lock(&self.groups)?;
        Ok(groups.values().find(|group| group.name == name).cloned())
    }

    async fn find_group_by_id(&self, id: ObjectId) -> Result<Option<Group>, StoreError> {
        let groups = lock(&self.groups)?;
        Ok(groups.get(&id).cloned())
    }

    async fn list_groups(&self, active: Option<bool>) -> Result<Vec<Group>, StoreError> {
        let groups = lock(&self.groups)?;
        let mut listed: Vec<Group> = groups
            .values()
            .filter(|group| active.map_or(true, |wanted| group.active == wanted))
            .cloned()
            .collect();
        listed.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(listed)
    }

    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>, StoreError> {
        let tags = lock(&self.tags)?;
        Ok(tags.values().find(|tag| tag.name == name).cloned())
    }

    async fn find_tag_by_id(&self, id: ObjectId) -> Result<Option<Tag>, StoreError> {
        let tags = lock(&self.tags)?;
        Ok(tags.get(&id).cloned())
    }

    async fn list_tags(&self, active: Option<bool>) -> Result<Vec<Tag>, StoreError> {
        let tags = lock(&self.tags)?;
        let mut listed: Vec<Tag> = tags
            .values()
            .filter(|tag| active.map_or(true, |wanted| tag.active == wanted))
            .cloned()
            .collect();
        listed.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(listed)
    }

    async fn list_decorators(&self, active: Option<bool>) -> Result<Vec<Decorator>, StoreError> {
        let decorators = lock(&self.decorators)?;
        let mut listed: Vec<Decorator> = decorators
            .values()
            .filter(|decorator| active.map_or(true, |wanted| decorator.active == wanted))
            .cloned()
            .collect();
        listed.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(listed)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
