//! PostgREST HTTP client implementation.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};

use polaroid_core::error::{Error, InvalidInputError, ProtocolError, TransportError};
use polaroid_core::{ApiKey, Collection, StoreUrl};

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Error body returned by PostgREST.
#[derive(Debug, serde::Deserialize)]
struct RestErrorResponse {
    code: Option<String>,
    message: Option<String>,
}

/// HTTP client for PostgREST table reads.
#[derive(Debug, Clone)]
pub(crate) struct RestClient {
    client: reqwest::Client,
    store: StoreUrl,
    headers: HeaderMap,
    timeout: Duration,
}

impl RestClient {
    /// Create a new client for the given store, authenticating with `api_key`.
    pub fn new(store: StoreUrl, api_key: &ApiKey, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("polaroid/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::Transport(TransportError::Http {
                    message: format!("failed to build HTTP client: {}", e),
                })
            })?;

        let headers = Self::auth_headers(api_key)?;

        Ok(Self {
            client,
            store,
            headers,
            timeout,
        })
    }

    /// Returns the store URL this client is configured for.
    pub fn store(&self) -> &StoreUrl {
        &self.store
    }

    /// Read rows from a collection (GET request).
    #[instrument(skip(self), fields(store = %self.store))]
    pub async fn select<Q, R>(&self, collection: &Collection, params: &Q) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.store.rest_url(collection);
        debug!(%collection, "PostgREST select");
        trace!(?params, "query parameters");

        let response = self
            .client
            .get(&url)
            .query(params)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.handle_response(response).await
    }

    /// Create the headers PostgREST expects on every request.
    fn auth_headers(api_key: &ApiKey) -> Result<HeaderMap, Error> {
        let invalid = || {
            Error::InvalidInput(InvalidInputError::Other {
                message: "API key contains characters not allowed in a header".to_string(),
            })
        };

        let mut apikey = HeaderValue::from_str(api_key.as_str()).map_err(|_| invalid())?;
        apikey.set_sensitive(true);

        let mut bearer =
            HeaderValue::from_str(&format!("Bearer {}", api_key.as_str())).map_err(|_| invalid())?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", apikey);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Handle a response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "PostgREST response");

        if status.is_success() {
            let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            let error = self.parse_error_response(response).await;
            Err(Error::Protocol(error))
        }
    }

    /// Parse a PostgREST error response.
    async fn parse_error_response(&self, response: reqwest::Response) -> ProtocolError {
        let status = response.status().as_u16();

        match response.json::<RestErrorResponse>().await {
            Ok(body) => ProtocolError::new(status, body.code, body.message),
            Err(_) => ProtocolError::new(status, None, None),
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        let err = if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: self.timeout.as_millis() as u64,
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        };
        Error::Transport(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let store = StoreUrl::new("https://abc.supabase.co").unwrap();
        let client = RestClient::new(store.clone(), &ApiKey::new("anon"), DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.store(), &store);
    }

    #[test]
    fn auth_headers_are_sensitive() {
        let headers = RestClient::auth_headers(&ApiKey::new("anon")).unwrap();
        assert!(headers["apikey"].is_sensitive());
        assert_eq!(headers[AUTHORIZATION], "Bearer anon");
    }

    #[test]
    fn rejects_key_with_newline() {
        assert!(RestClient::auth_headers(&ApiKey::new("bad\nkey")).is_err());
    }
}
