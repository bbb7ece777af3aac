//! Store URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

use super::Collection;
use crate::error::{Error, InvalidInputError};

/// A validated record store URL.
///
/// This type supports both hosted store URLs (HTTPS/HTTP) and local
/// filesystem store URLs (`file://`).
///
/// # Network URLs
///
/// Network URLs must use HTTPS (or HTTP for localhost) and point at the
/// project root of a PostgREST-style service; table endpoints live under
/// `/rest/v1/`.
///
/// # File URLs
///
/// File URLs (`file:///path/to/store`) point at a directory holding one
/// JSON file per collection.
///
/// # Example
///
/// ```
/// use polaroid_core::{Collection, StoreUrl};
///
/// let store = StoreUrl::new("https://abc.supabase.co").unwrap();
/// let links = Collection::new("links").unwrap();
/// assert_eq!(store.rest_url(&links), "https://abc.supabase.co/rest/v1/links");
///
/// let local = StoreUrl::new("file:///tmp/gallery").unwrap();
/// assert!(local.is_local());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoreUrl(Url);

impl StoreUrl {
    /// Create a new store URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::StoreUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the REST endpoint URL for a collection.
    pub fn rest_url(&self, collection: &Collection) -> String {
        // Url always renders a root path as "/", and project URLs may carry a prefix
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/rest/v1/{}", base, collection)
    }

    /// Returns true if this is a local filesystem store (file:// URL).
    pub fn is_local(&self) -> bool {
        self.0.scheme() == "file"
    }

    /// Returns the filesystem path for file:// URLs.
    ///
    /// Returns `None` for non-file URLs.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.is_local() {
            self.0.to_file_path().ok()
        } else {
            None
        }
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        let reject = |reason: &str| -> Error {
            InvalidInputError::StoreUrl {
                value: original.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        if url.cannot_be_a_base() {
            return Err(reject("must be an absolute URL"));
        }

        match url.scheme() {
            "file" if matches!(url.path(), "" | "/") => {
                Err(reject("file:// URL must name a directory"))
            }
            "file" => Ok(()),
            "https" => Self::validate_endpoint(url, reject),
            "http" if url.host_str().is_some_and(is_loopback) => {
                Self::validate_endpoint(url, reject)
            }
            _ => Err(reject("must use HTTPS (HTTP allowed only for localhost)")),
        }
    }

    /// Table endpoints are appended to the URL, so it cannot carry its own
    /// query or fragment.
    fn validate_endpoint(url: &Url, reject: impl Fn(&str) -> Error) -> Result<(), Error> {
        if url.host_str().is_none() {
            return Err(reject("must have a host"));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(reject("must not carry a query or fragment"));
        }
        Ok(())
    }
}

fn is_loopback(host: &str) -> bool {
    matches!(host, "localhost" | "127.0.0.1" | "[::1]")
}

impl fmt::Display for StoreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StoreUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for StoreUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for StoreUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        StoreUrl::new(&s).map_err(serde::de::Error::custom)
    }
}
