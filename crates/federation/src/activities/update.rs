//! Update activity.

use activitypub_federation::kinds::activity::UpdateType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::objects::{ACTIVITY_STREAMS_CONTEXT, ApObject};

/// `ActivityPub` Update activity.
/// Used to replace an item that was published before.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivity {
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub ld_context: Option<Value>,
    #[serde(rename = "type")]
    pub kind: UpdateType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Url>,
    pub actor: Url,
    /// The updated object, carrying its existing id.
    pub object: ApObject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

impl UpdateActivity {
    /// Create a new Update activity identified by the object's id.
    #[must_use]
    pub fn new(actor: Url, object: ApObject) -> Self {
        Self {
            ld_context: Some(Value::from(ACTIVITY_STREAMS_CONTEXT)),
            kind: UpdateType::Update,
            id: object.id.clone(),
            actor,
            updated: object.updated,
            object,
        }
    }
}
