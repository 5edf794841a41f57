use std::collections::HashMap;

use bson::oid::ObjectId;

use crate::database::models::Group;
use crate::database::{DataStore, StoreError};

/// Per-request group resolver. Successful lookups are memoized so that
/// assembling a list response hits the store once per distinct id.
pub struct GroupAgent<'a> {
    store: &'a dyn DataStore,
    cache: HashMap<ObjectId, Group>,
}

impl<'a> GroupAgent<'a> {
    pub fn new(store: &'a dyn DataStore) -> Self {
        Self {
            store,
            cache: HashMap::new(),
        }
    }

    pub async fn get_one(&mut self, id: ObjectId) -> Result<Option<Group>, StoreError> {
        if let Some(found) = self.cache.get(&id) {
            return Ok(Some(found.clone()));
        }
        match self.store.find_group_by_id(id).await? {
            Some(found) => {
                self.cache.insert(id, found.clone());
                Ok(Some(found))
            }
            None => Ok(None),
        }
    }

    /// Resolve a batch of ids, silently skipping the unresolvable ones.
    pub async fn get_many(&mut self, ids: &[ObjectId]) -> Result<Vec<Group>, StoreError> {
        let mut found = Vec::new();
        for id in ids {
            if let Some(group) = self.get_one(*id).await? {
                found.push(group);
            }
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    #[tokio::test]
    async fn test_memoizes_successful_lookups() {
        let store = MemoryStore::new();
        let group = Group::new("blue".to_string());
        let id = group.id;
        store.seed_group(group);

        let mut agent = GroupAgent::new(&store);
        assert_eq!(agent.get_one(id).await.unwrap().unwrap().name, "blue");

        // Overwrite the stored entity; the agent keeps serving the first read.
        let mut renamed = Group::new("navy".to_string());
        renamed.id = id;
        store.seed_group(renamed);
        assert_eq!(agent.get_one(id).await.unwrap().unwrap().name, "blue");
    }

    #[tokio::test]
    async fn test_get_many_skips_unresolvable_ids() {
        let store = MemoryStore::new();
        let group = Group::new("blue".to_string());
        let id = group.id;
        store.seed_group(group);

        let mut agent = GroupAgent::new(&store);
        let found = agent.get_many(&[id, ObjectId::new(), id]).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|group| group.name == "blue"));
    }
}
