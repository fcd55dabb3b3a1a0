//! Wire types exchanged with the vault server.
//!
//! Field names follow the server's snake_case JSON. Unknown fields
//! (`user_id`, `password_masked`, ...) are ignored on input.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

/// The authenticated user as reported by `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A stored credential as listed by the server. Never carries the secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultItem {
    pub id: Uuid,
    pub account_name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /vault/`.
#[derive(Serialize)]
pub struct NewItem<'a> {
    pub account_name: &'a str,
    pub url: Option<&'a str>,
    pub login: Option<&'a str>,
    pub password: &'a str,
}

/// Body of `PUT /vault/{id}`. An absent password keeps the stored one.
#[derive(Serialize)]
pub struct ItemChanges<'a> {
    pub account_name: &'a str,
    pub url: Option<&'a str>,
    pub login: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
}

/// Response body of `POST /auth/login`.
#[derive(Deserialize)]
pub struct LoginToken {
    pub access_token: String,
    pub token_type: String,
}

impl fmt::Debug for LoginToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginToken")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Response body of `POST /vault/{id}/reveal`.
#[derive(Deserialize)]
pub struct RevealedPassword {
    pub password: Zeroizing<String>,
}

/// `{"msg": ...}` acknowledgement returned by logout and delete.
#[derive(Debug, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub msg: Option<String>,
}

/// `GET /health` body.
#[derive(Debug, Deserialize)]
pub struct Health {
    pub status: String,
}

/// Timestamps come back as RFC 3339, but rows written without a zone
/// serialize as naive ISO 8601; those are read as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
    }

    pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'"))),
        }
    }
}
