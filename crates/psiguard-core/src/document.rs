use crate::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Store-managed metadata attached to every document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(rename = "lastUpdated")]
    pub last_updated: Timestamp,
    #[serde(rename = "versionId", skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl DocumentMeta {
    pub fn new() -> Self {
        Self {
            last_updated: crate::time::now_utc(),
            version_id: None,
            created_at: None,
        }
    }

    pub fn with_version_id(mut self, version_id: String) -> Self {
        self.version_id = Some(version_id);
        self
    }

    pub fn update_timestamp(&mut self) {
        self.last_updated = crate::time::now_utc();
    }
}

impl Default for DocumentMeta {
    fn default() -> Self {
        Self::new()
    }
}

/// A document as held by a store backend: its ID, store metadata, and the
/// caller-supplied fields flattened alongside them.
///
/// The owning collection is not part of the payload; it lives in the
/// storage key (`collection/id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEnvelope {
    pub id: String,
    pub meta: DocumentMeta,
    #[serde(flatten)]
    pub data: HashMap<String, Value>,
}

impl DocumentEnvelope {
    pub fn new(id: String) -> Self {
        Self {
            id,
            meta: DocumentMeta::new(),
            data: HashMap::new(),
        }
    }

    pub fn with_meta(mut self, meta: DocumentMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_data(mut self, data: HashMap<String, Value>) -> Self {
        self.data = data;
        self
    }

    pub fn add_field(&mut self, key: String, value: Value) {
        self.data.insert(key, value);
    }

    pub fn get_field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn remove_field(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    pub fn update_meta(&mut self) {
        self.meta.update_timestamp();
    }
}
