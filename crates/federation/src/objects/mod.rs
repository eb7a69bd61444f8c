//! `ActivityPub` object types.

#![allow(missing_docs)]

mod article;
mod collection;
mod document;
mod lang;
mod reference;

pub use article::{ApObject, ApObjectType};
pub use collection::{ApCollectionType, ApOrderedCollection};
pub use document::ApDocument;
pub use lang::{LangMap, LangString};
pub use reference::{ApReference, EmbeddedRef, last_segment};

/// JSON-LD context attached to documents this crate produces.
pub const ACTIVITY_STREAMS_CONTEXT: &str = "https://www.w3.org/ns/activitystreams";

/// Content type of activity documents sent to the federation endpoint.
pub const ACTIVITY_CONTENT_TYPE: &str = "application/json+activity";
