use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub application: ObjectId,
    pub by: ObjectId,
    pub content: Value,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub namespace: ObjectId,
    pub active: bool,
    pub limbo: bool,
    pub password: String,
    pub attempts: u32,
    pub groups: Vec<ObjectId>,
    pub tags: Vec<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub infos: Map<String, Value>,
    pub history: Vec<HistoryEntry>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Fresh account in limbo: it carries a temporary password digest and
    /// must reset it before regular use.
    pub fn create_limbo(
        username: String,
        namespace: ObjectId,
        password_digest: String,
        infos: Map<String, Value>,
    ) -> Self {
        Self {
            id: ObjectId::new(),
            username,
            namespace,
            active: true,
            limbo: true,
            password: password_digest,
            attempts: 0,
            groups: Vec::new(),
            tags: Vec::new(),
            organization: None,
            email: None,
            phone: None,
            display_name: None,
            avatar: None,
            infos,
            history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Fresh account with a caller-chosen password, skipping limbo.
    pub fn create_with_password(
        username: String,
        namespace: ObjectId,
        password_digest: String,
        infos: Map<String, Value>,
    ) -> Self {
        Self {
            limbo: false,
            ..Self::create_limbo(username, namespace, password_digest, infos)
        }
    }

    /// Force the account back into limbo with a new temporary password
    /// digest. Failed-login attempts start over.
    pub fn reset_to_limbo(&mut self, password_digest: String) {
        self.password = password_digest;
        self.limbo = true;
        self.attempts = 0;
    }

    pub fn push_history(
        &mut self,
        kind: String,
        application: ObjectId,
        by: ObjectId,
        content: Value,
    ) {
        self.history.push(HistoryEntry {
            kind,
            application,
            by,
            content,
            at: Utc::now(),
        });
    }

    pub fn update_email(&mut self, email: String) -> bool {
        if self.email.as_deref() == Some(email.as_str()) {
            return false;
        }
        self.email = Some(email);
        true
    }

    pub fn update_phone(&mut self, phone: String) -> bool {
        if self.phone.as_deref() == Some(phone.as_str()) {
            return false;
        }
        self.phone = Some(phone);
        true
    }

    pub fn update_display_name(&mut self, display_name: String) -> bool {
        if self.display_name.as_deref() == Some(display_name.as_str()) {
            return false;
        }
        self.display_name = Some(display_name);
        true
    }

    pub fn update_avatar(&mut self, avatar: String) -> bool {
        if self.avatar.as_deref() == Some(avatar.as_str()) {
            return false;
        }
        self.avatar = Some(avatar);
        true
    }
}
