//! Account <-> `ApPerson` conversion.

use littr_models::{Account, AccountKey, AccountMetadata, Hash};
use url::Url;

use crate::actors::{ApPerson, ApPublicKey};
use crate::error::{FederationError, FederationResult};
use crate::objects::{LangString, last_segment};

use super::urls::UrlConfig;

/// Extension trait for converting Account to `ApPerson`.
pub trait AccountToApPerson {
    /// Convert to `ApPerson`. Only public key material is projected.
    fn to_ap_person(&self, config: &UrlConfig) -> ApPerson;
}

impl AccountToApPerson for Account {
    fn to_ap_person(&self, config: &UrlConfig) -> ApPerson {
        let id_segment = self.url_id();
        let id = config.account_url(id_segment);

        let mut person = ApPerson::new(id.clone());
        if !self.handle.is_empty() {
            person.name = Some(LangString::from(self.handle.as_str()));
            person.preferred_username = Some(self.handle.clone());
        }
        person.outbox = Some(config.account_outbox_url(id_segment));
        person.liked = Some(config.account_liked_url(id_segment));
        person.url = self
            .metadata
            .as_ref()
            .and_then(|m| m.url.as_deref())
            .and_then(|url| Url::parse(url).ok());
        person.published = self.created_at;
        person.score = Some(self.score);
        person.public_key = self
            .key()
            .filter(|key| !key.public.is_empty())
            .map(|key| ApPublicKey {
                id: config.public_key_url(id_segment),
                owner: id,
                public_key_pem: key.public.clone(),
            });

        person
    }
}

/// Extension trait for `ApPerson`.
pub trait ApPersonExt {
    /// Convert to an Account.
    fn to_account(&self) -> FederationResult<Account>;

    /// Username segment of the actor id.
    fn extract_username(&self) -> Option<String>;
}

impl ApPersonExt for ApPerson {
    fn to_account(&self) -> FederationResult<Account> {
        let hash = self
            .extract_username()
            .ok_or_else(|| FederationError::Translation(format!("no account id in {}", self.id)))?;

        let handle = self
            .display_name()
            .map_or_else(|| hash.clone(), str::to_string);

        let key = self.public_key.as_ref().map(|key| AccountKey {
            id: String::new(),
            public: key.public_key_pem.clone(),
            private: None,
        });

        Ok(Account {
            hash: Hash::from(hash),
            handle,
            score: self.score.unwrap_or_default(),
            created_at: self.published,
            metadata: Some(AccountMetadata {
                key,
                url: Some(self.url.as_ref().unwrap_or(&self.id).to_string()),
            }),
            ..Account::default()
        })
    }

    fn extract_username(&self) -> Option<String> {
        last_segment(&self.id).map(str::to_string)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn urls() -> UrlConfig {
        UrlConfig::new(Url::parse("http://localhost/api").unwrap()).unwrap()
    }

    #[test]
    fn test_account_to_person() {
        let mut account = Account::with_handle("alice");
        account.metadata = Some(AccountMetadata {
            key: Some(AccountKey::rsa("PUBLIC PEM", "PRIVATE PEM")),
            url: None,
        });

        let person = account.to_ap_person(&urls());

        assert_eq!(person.id.as_str(), "http://localhost/api/accounts/alice");
        assert_eq!(person.display_name(), Some("alice"));
        let key = person.public_key.unwrap();
        assert_eq!(key.public_key_pem, "PUBLIC PEM");
        assert_eq!(key.id, "http://localhost/api/accounts/alice#main-key");

        let json = serde_json::to_string(&account.to_ap_person(&urls())).unwrap();
        assert!(!json.contains("PRIVATE PEM"));
    }

    #[test]
    fn test_person_to_account() {
        let person: ApPerson = serde_json::from_value(json!({
            "type": "Person",
            "id": "http://localhost/api/accounts/9f86d081",
            "name": "alice",
            "publicKey": {
                "id": "http://localhost/api/accounts/9f86d081#main-key",
                "owner": "http://localhost/api/accounts/9f86d081",
                "publicKeyPem": "PUBLIC PEM"
            },
            "score": 3
        }))
        .unwrap();

        let account = person.to_account().unwrap();

        assert_eq!(account.hash.as_str(), "9f86d081");
        assert_eq!(account.handle, "alice");
        assert_eq!(account.score, 3);
        assert_eq!(account.key().unwrap().public, "PUBLIC PEM");
        assert!(account.key().unwrap().private.is_none());
        assert_eq!(account.permalink(), "http://localhost/api/accounts/9f86d081");
    }

    #[test]
    fn test_person_without_name_uses_id() {
        let person = ApPerson::new(Url::parse("http://localhost/api/accounts/bob").unwrap());
        assert_eq!(person.to_account().unwrap().handle, "bob");
    }
}
