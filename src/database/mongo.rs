use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::Document;
use futures::TryStreamExt;
use mongodb::options::IndexOptions;
use mongodb::{bson::doc, Client, Collection, Database, IndexModel};

use super::models::{Account, Application, Decorator, Group, Namespace, Organization, Tag};
use super::store::{
    AccountQuery, DataStore, IdListMatch, MatchMode, OrganizationQuery, StoreError,
};

/// MongoDB-backed store. One client, one database, typed collection
/// accessors per entity.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(database);
        tracing::info!(database = %database, "connected to mongodb");
        Ok(Self { client, db })
    }

    /// Create the lookup indexes. Uniqueness of application keys, namespace
    /// strings, (username, namespace) pairs and organization names is
    /// enforced here rather than in handler code.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        ensure_index(
            &self.applications(),
            doc! { "key": 1 },
            "key_unique",
            true,
        )
        .await?;
        ensure_index(
            &self.namespaces(),
            doc! { "namespace": 1 },
            "namespace_unique",
            true,
        )
        .await?;
        ensure_index(
            &self.accounts(),
            doc! { "username": 1, "namespace": 1 },
            "username_namespace_unique",
            true,
        )
        .await?;
        ensure_index(
            &self.organizations(),
            doc! { "name": 1 },
            "name_unique",
            true,
        )
        .await?;
        ensure_index(&self.groups(), doc! { "name": 1 }, "name_lookup", false).await?;
        ensure_index(&self.tags(), doc! { "name": 1 }, "name_lookup", false).await?;
        ensure_index(&self.decorators(), doc! { "name": 1 }, "name_lookup", false).await?;
        tracing::info!("mongodb indexes ensured");
        Ok(())
    }

    fn applications(&self) -> Collection<Application> {
        self.db.collection("applications")
    }

    fn accounts(&self) -> Collection<Account> {
        self.db.collection("accounts")
    }

    fn namespaces(&self) -> Collection<Namespace> {
        self.db.collection("namespaces")
    }

    fn organizations(&self) -> Collection<Organization> {
        self.db.collection("organizations")
    }

    fn groups(&self) -> Collection<Group> {
        self.db.collection("groups")
    }

    fn tags(&self) -> Collection<Tag> {
        self.db.collection("tags")
    }

    fn decorators(&self) -> Collection<Decorator> {
        self.db.collection("decorators")
    }
}

async fn ensure_index<T>(
    collection: &Collection<T>,
    keys: Document,
    name: &str,
    unique: bool,
) -> Result<(), StoreError> {
    let options = IndexOptions::builder()
        .name(name.to_string())
        .unique(unique)
        .build();
    let index = IndexModel::builder().keys(keys).options(options).build();
    collection.create_index(index, None).await?;
    Ok(())
}

fn activation_filter(active: Option<bool>) -> Document {
    let mut filter = Document::new();
    if let Some(active) = active {
        filter.insert("active", active);
    }
    filter
}

fn id_list_clause(list: &IdListMatch) -> Option<Document> {
    if list.ids.is_empty() {
        return None;
    }
    let clause = match list.mode {
        MatchMode::Any => doc! { "$in": list.ids.clone() },
        MatchMode::All => doc! { "$all": list.ids.clone() },
    };
    Some(clause)
}

fn account_filter(query: &AccountQuery) -> Document {
    let mut filter = Document::new();
    if let Some(active) = query.active {
        filter.insert("active", active);
    }
    if let Some(namespace) = query.namespace {
        filter.insert("namespace", namespace);
    }
    if !query.organizations.is_empty() {
        filter.insert("organization", doc! { "$in": query.organizations.clone() });
    }
    if let Some(groups) = &query.groups {
        if let Some(clause) = id_list_clause(groups) {
            filter.insert("groups", clause);
        }
    }
    if let Some(tags) = &query.tags {
        if let Some(clause) = id_list_clause(tags) {
            filter.insert("tags", clause);
        }
    }
    filter
}

fn organization_filter(query: &OrganizationQuery) -> Document {
    let mut filter = activation_filter(query.active);
    if !query.tags.is_empty() {
        filter.insert("tags", doc! { "$in": query.tags.clone() });
    }
    filter
}

#[async_trait]
impl DataStore for MongoStore {
    async fn find_application_by_key(&self, key: &str) -> Result<Option<Application>, StoreError> {
        Ok(self.applications().find_one(doc! { "key": key }, None).await?)
    }

    async fn find_namespace_by_namespace(
        &self,
        namespace: &str,
    ) -> Result<Option<Namespace>, StoreError> {
        Ok(self
            .namespaces()
            .find_one(doc! { "namespace": namespace }, None)
            .await?)
    }

    async fn find_namespace_by_id(&self, id: ObjectId) -> Result<Option<Namespace>, StoreError> {
        Ok(self.namespaces().find_one(doc! { "_id": id }, None).await?)
    }

    async fn list_namespaces(&self, active: Option<bool>) -> Result<Vec<Namespace>, StoreError> {
        let cursor = self.namespaces().find(activation_filter(active), None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_account(
        &self,
        username: &str,
        namespace: ObjectId,
    ) -> Result<Option<Account>, StoreError> {
        Ok(self
            .accounts()
            .find_one(doc! { "username": username, "namespace": namespace }, None)
            .await?)
    }

    async fn find_account_by_id(&self, id: ObjectId) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts().find_one(doc! { "_id": id }, None).await?)
    }

    async fn insert_account(&self, account: &Account) -> Result<(), StoreError> {
        self.accounts().insert_one(account, None).await?;
        Ok(())
    }

    async fn save_account(&self, account: &Account) -> Result<(), StoreError> {
        self.accounts()
            .replace_one(doc! { "_id": account.id }, account, None)
            .await?;
        Ok(())
    }

    async fn count_accounts_by_organization(
        &self,
        organization: ObjectId,
    ) -> Result<u64, StoreError> {
        Ok(self
            .accounts()
            .count_documents(doc! { "organization": organization }, None)
            .await?)
    }

    async fn query_accounts(&self, query: &AccountQuery) -> Result<Vec<Account>, StoreError> {
        let cursor = self.accounts().find(account_filter(query), None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_organization_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Organization>, StoreError> {
        Ok(self
            .organizations()
            .find_one(doc! { "name": name }, None)
            .await?)
    }

    async fn find_organization_by_id(
        &self,
        id: ObjectId,
    ) -> Result<Option<Organization>, StoreError> {
        Ok(self.organizations().find_one(doc! { "_id": id }, None).await?)
    }

    async fn insert_organization(&self, organization: &Organization) -> Result<(), StoreError> {
        self.organizations().insert_one(organization, None).await?;
        Ok(())
    }

    async fn save_organization(&self, organization: &Organization) -> Result<(), StoreError> {
        self.organizations()
            .replace_one(doc! { "_id": organization.id }, organization, None)
            .await?;
        Ok(())
    }

    async fn query_organizations(
        &self,
        query: &OrganizationQuery,
    ) -> Result<Vec<Organization>, StoreError> {
        let cursor = self
            .organizations()
            .find(organization_filter(query), None)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_group_by_name(&self, name: &str) -> Result<Option<Group>, StoreError> {
        Ok(self.groups().find_one(doc! { "name": name }, None).await?)
    }

    async fn find_group_by_id(&self, id: ObjectId) -> Result<Option<Group>, StoreError> {
        Ok(self.groups().find_one(doc! { "_id": id }, None).await?)
    }

    async fn list_groups(&self, active: Option<bool>) -> Result<Vec<Group>, StoreError> {
        let cursor = self.groups().find(activation_filter(active), None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>, StoreError> {
        Ok(self.tags().find_one(doc! { "name": name }, None).await?)
    }

    async fn find_tag_by_id(&self, id: ObjectId) -> Result<Option<Tag>, StoreError> {
        Ok(self.tags().find_one(doc! { "_id": id }, None).await?)
    }

    async fn list_tags(&self, active: Option<bool>) -> Result<Vec<Tag>, StoreError> {
        let cursor = self.tags().find(activation_filter(active), None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn list_decorators(&self, active: Option<bool>) -> Result<Vec<Decorator>, StoreError> {
        let cursor = self.decorators().find(activation_filter(active), None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_filter_skips_empty_facets() {
        let filter = account_filter(&AccountQuery::default());
        assert!(filter.is_empty());
    }

    #[test]
    fn test_account_filter_any_uses_in() {
        let id = ObjectId::new();
        let query = AccountQuery {
            groups: Some(IdListMatch::any(vec![id])),
            ..AccountQuery::default()
        };
        let filter = account_filter(&query);
        assert_eq!(filter.get_document("groups").unwrap(), &doc! { "$in": [id] });
    }

    #[test]
    fn test_account_filter_all_uses_all() {
        let id = ObjectId::new();
        let query = AccountQuery {
            tags: Some(IdListMatch::all(vec![id])),
            ..AccountQuery::default()
        };
        let filter = account_filter(&query);
        assert_eq!(filter.get_document("tags").unwrap(), &doc! { "$all": [id] });
    }

    #[test]
    fn test_account_filter_empty_id_list_is_noop() {
        let query = AccountQuery {
            groups: Some(IdListMatch::any(Vec::new())),
            ..AccountQuery::default()
        };
        assert!(account_filter(&query).is_empty());
    }

    #[test]
    fn test_organization_filter_combines_activation_and_tags() {
        let id = ObjectId::new();
        let query = OrganizationQuery {
            active: Some(true),
            tags: vec![id],
        };
        let filter = organization_filter(&query);
        assert_eq!(filter.get_bool("active").unwrap(), true);
        assert_eq!(filter.get_document("tags").unwrap(), &doc! { "$in": [id] });
    }
}
