//! Item <-> `ApObject` conversion.

use littr_models::{Account, Hash, Item, ItemMetadata};
use url::Url;

use crate::error::{FederationError, FederationResult};
use crate::objects::{ApObject, ApObjectType, ApReference, LangString, last_segment};

use super::urls::UrlConfig;

/// Extension trait for converting Item to `ApObject`.
pub trait ItemToApObject {
    /// Convert to `ApObject`. The object's id is the item's previously
    /// assigned remote id, if any.
    fn to_ap_object(&self, config: &UrlConfig) -> ApObject;
}

impl ItemToApObject for Item {
    fn to_ap_object(&self, config: &UrlConfig) -> ApObject {
        let mut object = ApObject::new(ApObjectType::Article);

        object.id = self.remote_id().cloned();
        object.name = non_empty(&self.title).map(LangString::from);
        object.content = non_empty(&self.data).map(LangString::from);
        object.media_type = non_empty(&self.mime_type).map(str::to_string);
        object.published = Some(self.submitted_at);
        object.updated = self.updated_at;
        object.attributed_to = self
            .submitted_by
            .as_ref()
            .map(|author| ApReference::Link(config.account_url(author.url_id())));
        object.in_reply_to = self
            .parent_hash()
            .map(|parent| ApReference::Link(config.item_url(parent.as_str())));
        object.context = self
            .op_hash()
            .map(|op| ApReference::Link(config.item_url(op.as_str())));
        object.url = self
            .metadata
            .as_ref()
            .and_then(|m| m.url.as_deref())
            .and_then(|url| Url::parse(url).ok());
        object.score = Some(self.score);
        object.key = non_empty(self.key.as_str()).map(str::to_string);

        object
    }
}

/// Extension trait for `ApObject`.
pub trait ApObjectExt {
    /// Convert to an Item. Author, parent and thread root become weak
    /// references carrying only an identifier.
    fn to_item(&self) -> FederationResult<Item>;
}

impl ApObjectExt for ApObject {
    fn to_item(&self) -> FederationResult<Item> {
        let id = self
            .id
            .as_ref()
            .ok_or_else(|| FederationError::Translation(format!("{} has no id", self.kind.as_str())))?;
        let key = last_segment(id)
            .ok_or_else(|| FederationError::Translation(format!("no item key in {id}")))?;

        let mut item = Item::with_key(Hash::from(key));
        item.title = self.name.as_ref().and_then(LangString::first).unwrap_or_default().to_string();
        item.data = self.content.as_ref().and_then(LangString::first).unwrap_or_default().to_string();
        item.mime_type = self.media_type.clone().unwrap_or_default();
        item.submitted_at = self.published.unwrap_or_default();
        item.updated_at = self.updated;
        item.score = self.score.unwrap_or_default();
        item.submitted_by = self
            .attributed_to
            .as_ref()
            .and_then(ApReference::last_segment)
            .map(Account::with_handle);
        item.parent = self
            .in_reply_to
            .as_ref()
            .and_then(ApReference::last_segment)
            .map(Hash::from);

        // A reply may know its thread root without its direct parent, so the
        // two are tracked separately.
        if self.context.as_ref().map(ApReference::id) != self.in_reply_to.as_ref().map(ApReference::id) {
            item.op = self
                .context
                .as_ref()
                .and_then(ApReference::last_segment)
                .map(Hash::from);
        }

        item.metadata = Some(ItemMetadata {
            id: Some(id.clone()),
            url: self.url.as_ref().map(Url::to_string),
        });

        Ok(item)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}
