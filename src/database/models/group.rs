use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub active: bool,
    /// Internal groups carry platform roles and cannot be assigned or
    /// removed through this gateway.
    pub internal: bool,
}

impl Group {
    pub fn new(name: String) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            active: true,
            internal: false,
        }
    }

    pub fn internal(name: String) -> Self {
        Self {
            internal: true,
            ..Self::new(name)
        }
    }
}
