use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Unique tenant scope string, e.g. "portal.phosphorus".
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub active: bool,
}

impl Namespace {
    pub fn new(namespace: String) -> Self {
        Self {
            id: ObjectId::new(),
            namespace,
            name: None,
            active: true,
        }
    }
}
