//! Collection (table) name type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Longest identifier Postgres accepts without truncation.
const MAX_LEN: usize = 63;

/// A validated collection name.
///
/// Collections map to tables on a hosted store and to file names on a local
/// one, so only plain identifiers are accepted.
///
/// # Example
///
/// ```
/// use polaroid_core::Collection;
///
/// let links = Collection::new("links").unwrap();
/// assert_eq!(links.as_str(), "links");
/// assert!(Collection::new("../etc").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Collection(String);

impl Collection {
    /// Create a new collection name, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a plain identifier.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the collection name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        let invalid = |reason: &str| {
            Error::from(InvalidInputError::Collection {
                value: s.to_string(),
                reason: reason.to_string(),
            })
        };

        let mut chars = s.chars();
        let Some(first) = chars.next() else {
            return Err(invalid("must not be empty"));
        };

        if s.len() > MAX_LEN {
            return Err(invalid("must be at most 63 bytes"));
        }

        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(invalid("must start with a letter or underscore"));
        }

        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("may only contain letters, digits and underscores"));
        }

        Ok(())
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self("links".to_string())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Collection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Collection {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Collection> for String {
    fn from(collection: Collection) -> Self {
        collection.0
    }
}

impl AsRef<str> for Collection {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
