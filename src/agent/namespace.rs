use std::collections::HashMap;

use bson::oid::ObjectId;

use crate::database::models::Namespace;
use crate::database::{DataStore, StoreError};

pub struct NamespaceAgent<'a> {
    store: &'a dyn DataStore,
    cache: HashMap<ObjectId, Namespace>,
}

impl<'a> NamespaceAgent<'a> {
    pub fn new(store: &'a dyn DataStore) -> Self {
        Self {
            store,
            cache: HashMap::new(),
        }
    }

    pub async fn get_one(&mut self, id: ObjectId) -> Result<Option<Namespace>, StoreError> {
        if let Some(found) = self.cache.get(&id) {
            return Ok(Some(found.clone()));
        }
        match self.store.find_namespace_by_id(id).await? {
            Some(found) => {
                self.cache.insert(id, found.clone());
                Ok(Some(found))
            }
            None => Ok(None),
        }
    }
}
