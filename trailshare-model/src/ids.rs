use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use uuid::Uuid;

use crate::error::ModelError;

const KEY_SEPARATOR: char = '\0';

/// Stable identity of the account that owns trails.
///
/// Every trail key is nested under an account, so the account id doubles as
/// the partition used by all trail queries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountId(pub Uuid);

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountId {
    pub fn new() -> Self {
        AccountId(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for AccountId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for AccountId {
    fn from(id: Uuid) -> Self {
        AccountId(id)
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key of a single trail: the `Trails` kind, the trail revision as string id,
/// and the owning account as parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrailKey {
    pub account: AccountId,
    pub revision: String,
}

impl TrailKey {
    pub const KIND: &'static str = "Trails";

    pub fn new(account: AccountId, revision: impl Into<String>) -> Self {
        Self {
            account,
            revision: revision.into(),
        }
    }

    /// Opaque, URL-safe form handed out to clients as the trail identifier.
    pub fn encode(&self) -> String {
        let raw = format!(
            "{kind}{sep}{account}{sep}{revision}",
            kind = Self::KIND,
            sep = KEY_SEPARATOR,
            account = self.account,
            revision = self.revision,
        );
        URL_SAFE_NO_PAD.encode(raw.as_bytes())
    }

    pub fn decode(encoded: &str) -> Result<Self, ModelError> {
        let bytes = URL_SAFE_NO_PAD.decode(encoded.trim()).map_err(|err| {
            ModelError::InvalidKey(format!("not base64url: {err}"))
        })?;
        let raw = String::from_utf8(bytes).map_err(|_| {
            ModelError::InvalidKey("key is not valid utf-8".to_string())
        })?;

        let mut parts = raw.splitn(3, KEY_SEPARATOR);
        let (Some(kind), Some(account), Some(revision)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(ModelError::InvalidKey(
                "expected kind, account and revision".to_string(),
            ));
        };

        if kind != Self::KIND {
            return Err(ModelError::InvalidKey(format!(
                "unexpected kind {kind:?}"
            )));
        }

        let account = Uuid::parse_str(account).map_err(|err| {
            ModelError::InvalidKey(format!("bad account id: {err}"))
        })?;

        if revision.is_empty() {
            return Err(ModelError::InvalidKey(
                "revision cannot be empty".to_string(),
            ));
        }

        Ok(Self::new(AccountId(account), revision))
    }
}

impl std::fmt::Display for TrailKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.account, Self::KIND, self.revision)
    }
}
