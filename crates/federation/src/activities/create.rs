//! Create activity.

use activitypub_federation::kinds::activity::CreateType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::objects::{ACTIVITY_STREAMS_CONTEXT, ApObject};

/// `ActivityPub` Create activity wrapping a new item.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivity {
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub ld_context: Option<Value>,
    #[serde(rename = "type")]
    pub kind: CreateType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Url>,
    pub actor: Url,
    pub object: ApObject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
}

impl CreateActivity {
    /// Create a new Create activity. The endpoint assigns the id.
    #[must_use]
    pub fn new(actor: Url, object: ApObject) -> Self {
        Self {
            ld_context: Some(Value::from(ACTIVITY_STREAMS_CONTEXT)),
            kind: CreateType::Create,
            id: None,
            actor,
            published: object.published,
            object,
        }
    }
}
