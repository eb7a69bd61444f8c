//! Natural language values.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Text that is either plain or keyed by language tag.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LangString {
    Plain(String),
    Tagged(LangMap),
}

/// Language tagged variants in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LangMap(Vec<(String, String)>);

impl LangMap {
    /// Text of the first entry.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(|(_, text)| text.as_str())
    }

    /// Text for an exact language tag.
    #[must_use]
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(tag, _)| tag == lang)
            .map(|(_, text)| text.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LangMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Serialize for LangMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (tag, text) in &self.0 {
            map.serialize_entry(tag, text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LangMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LangMapVisitor;

        impl<'de> Visitor<'de> for LangMapVisitor {
            type Value = LangMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of language tags to text")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<LangMap, A::Error> {
                let mut entries: Vec<(String, String)> =
                    Vec::with_capacity(access.size_hint().unwrap_or_default());
                while let Some((tag, text)) = access.next_entry::<String, String>()? {
                    // A repeated tag keeps its first position and last value.
                    if let Some(entry) = entries.iter_mut().find(|entry| entry.0 == tag) {
                        entry.1 = text;
                    } else {
                        entries.push((tag, text));
                    }
                }
                Ok(LangMap(entries))
            }
        }

        deserializer.deserialize_map(LangMapVisitor)
    }
}

impl LangString {
    /// First available variant, in document order for tagged values.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Plain(text) => Some(text),
            Self::Tagged(map) => map.first(),
        }
    }

    /// Variant for a specific language tag, falling back to [`Self::first`].
    #[must_use]
    pub fn get(&self, lang: &str) -> Option<&str> {
        match self {
            Self::Plain(text) => Some(text),
            Self::Tagged(map) => map.get(lang).or_else(|| map.first()),
        }
    }
}

impl From<String> for LangString {
    fn from(text: String) -> Self {
        Self::Plain(text)
    }
}

impl From<&str> for LangString {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_tagged() {
        let plain: LangString = serde_json::from_str(r#""hello""#).unwrap();
        assert_eq!(plain.first(), Some("hello"));

        let tagged: LangString = serde_json::from_str(r#"{"fr":"salut","en":"hi"}"#).unwrap();
        assert_eq!(tagged.first(), Some("salut"));
        assert_eq!(tagged.get("en"), Some("hi"));
        assert_eq!(tagged.get("de"), Some("salut"));
    }

    #[test]
    fn test_tagged_keeps_document_order() {
        let tagged: LangString =
            serde_json::from_str(r#"{"zh":"ni hao","en":"hi","de":"hallo"}"#).unwrap();
        assert_eq!(tagged.first(), Some("ni hao"));
        assert_eq!(
            serde_json::to_string(&tagged).unwrap(),
            r#"{"zh":"ni hao","en":"hi","de":"hallo"}"#
        );
    }

    #[test]
    fn test_empty_map_has_no_first() {
        let empty: LangString = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.first(), None);
    }

    #[test]
    fn test_plain_serializes_as_string() {
        let value = serde_json::to_value(LangString::from("text")).unwrap();
        assert_eq!(value, serde_json::json!("text"));

        let tagged = LangString::Tagged([("en", "hi")].into_iter().collect());
        assert_eq!(serde_json::to_value(tagged).unwrap(), serde_json::json!({ "en": "hi" }));
    }
}
