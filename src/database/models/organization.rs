use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Member cap applied to organizations created without an explicit limit.
pub const DEFAULT_MEMBER_LIMIT: u32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub active: bool,
    pub tags: Vec<ObjectId>,
    /// Owner account id.
    pub owner: ObjectId,
    pub limit: u32,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Organization {
    pub fn create(name: String, owner: ObjectId) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            active: true,
            tags: Vec::new(),
            owner,
            limit: DEFAULT_MEMBER_LIMIT,
            created_at: Utc::now(),
        }
    }
}
