use std::collections::HashMap;

use bson::oid::ObjectId;

use crate::database::models::Tag;
use crate::database::{DataStore, StoreError};

pub struct TagAgent<'a> {
    store: &'a dyn DataStore,
    cache: HashMap<ObjectId, Tag>,
}

impl<'a> TagAgent<'a> {
    pub fn new(store: &'a dyn DataStore) -> Self {
        Self {
            store,
            cache: HashMap::new(),
        }
    }

    pub async fn get_one(&mut self, id: ObjectId) -> Result<Option<Tag>, StoreError> {
        if let Some(found) = self.cache.get(&id) {
            return Ok(Some(found.clone()));
        }
        match self.store.find_tag_by_id(id).await? {
            Some(found) => {
                self.cache.insert(id, found.clone());
                Ok(Some(found))
            }
            None => Ok(None),
        }
    }

    pub async fn get_many(&mut self, ids: &[ObjectId]) -> Result<Vec<Tag>, StoreError> {
        let mut found = Vec::new();
        for id in ids {
            if let Some(tag) = self.get_one(*id).await? {
                found.push(tag);
            }
        }
        Ok(found)
    }
}
