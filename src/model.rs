//! User records, the persisted document, and input shapes.

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A single stored user. Field names on the wire and on disk are camelCase,
/// matching the persisted file layout `{ "users": [ {id, email, name,
/// createdAt, updatedAt}, ... ] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Opaque unique identifier, assigned at creation, immutable.
    pub id: String,
    /// Trimmed, lowercased; unique across the store (enforced upstream).
    pub email: String,
    /// Trimmed; no uniqueness constraint.
    pub name: String,
    /// Set once at creation.
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful mutation. Never earlier than `created_at`.
    #[serde(with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

/// The whole persisted document, and the unit of locking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsersDocument {
    /// All records, in storage order: creations append, deletions filter
    /// in place, so this is insertion order.
    pub users: Vec<UserRecord>,
}

/// Input for the create use case.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Email address; normalized before storage.
    pub email: String,
    /// Display name; trimmed before storage.
    pub name: String,
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    /// Replacement email, normalized before storage.
    pub email: Option<String>,
    /// Replacement name, trimmed before storage.
    pub name: Option<String>,
}

/// Trim and lowercase, applied before storage and before comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trim only; names keep their case.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_string()
}

/// Current UTC time truncated to millisecond precision, so a timestamp
/// round-trips unchanged through the persisted representation.
pub fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    now.with_nanosecond(now.timestamp_subsec_millis() * 1_000_000)
        .unwrap_or(now)
}

/// RFC 3339 with exactly three fractional digits and a `Z` suffix,
/// e.g. `2026-08-30T12:34:56.789Z`.
mod iso_millis {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
