use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub key: String,
    pub name: String,
    pub active: bool,
    pub green_access: bool,
    pub green: String,
    pub public_key: String,
}

impl Application {
    pub fn new(key: String, name: String, green: String, public_key: String) -> Self {
        Self {
            id: ObjectId::new(),
            key,
            name,
            active: true,
            green_access: true,
            green,
            public_key,
        }
    }

    /// An application can authenticate green requests only while it is both
    /// active and granted green access.
    pub fn green_usable(&self) -> bool {
        self.active && self.green_access
    }
}
