use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decorator {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub active: bool,
}

impl Decorator {
    pub fn new(name: String) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            active: true,
        }
    }
}
