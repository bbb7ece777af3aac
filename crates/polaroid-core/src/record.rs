//! Photo records as stored in the hosted table.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque record identifier, used only as a stable display key.
///
/// Hosted tables use either integer or text/uuid primary keys, so both
/// are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

/// A photo row from the record store.
///
/// Records are read-only: they are created and deleted by the store and
/// replaced wholesale on every successful fetch.
///
/// The serialized form uses the hosted table's column names (`links`,
/// `arweave_link`); `image_url` and `external_link` are accepted as aliases.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    /// Stable display key.
    pub id: RecordId,

    /// Public URL of the displayable image.
    #[serde(rename = "links", alias = "image_url")]
    pub image_url: String,

    /// Optional link the card opens instead of the image itself.
    #[serde(
        rename = "arweave_link",
        alias = "external_link",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub external_link: Option<String>,

    /// Creation time, used only for ordering.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl PhotoRecord {
    /// Returns the URL a card for this record links to.
    ///
    /// An unset or empty external link falls back to the image URL.
    pub fn link_target(&self) -> &str {
        self.external_link
            .as_deref()
            .filter(|link| !link.is_empty())
            .unwrap_or(&self.image_url)
    }
}

/// Sort records newest first by `created_at`.
///
/// The sort is stable, so rows sharing a timestamp keep the store's order.
pub fn sort_newest_first(records: &mut [PhotoRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Accepts RFC 3339 timestamps as well as offset-less ones, which
/// `timestamp without time zone` columns produce; the latter are read as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;

    if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid created_at '{}': {}", s, e)))
}
