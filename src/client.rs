use std::fmt;

use crate::{
    legacy_v2::LegacyV2, v3::V3, ClientConfig, ClientOptions, HttpClient, Payload,
    RequestDescriptor, Result,
};

/// Client for the Are.na API.
///
/// Cheap to clone; clones share configuration and the token set through
/// [`ArenaClient::set_token`].
#[derive(Clone)]
pub struct ArenaClient {
    http: HttpClient,
}

impl fmt::Debug for ArenaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.http.config();
        f.debug_struct("ArenaClient")
            .field("base_url", &config.base_url())
            .field("legacy_base_url", &config.legacy_base_url())
            .field("token", &self.http.has_token().then_some("<redacted>"))
            .field("timeout", &config.timeout())
            .field("retry", config.retry())
            .finish()
    }
}

impl ArenaClient {
    /// Creates a client, resolving defaults for every unset option.
    ///
    /// Fails with [`ArenaError::Config`](crate::ArenaError::Config) when no
    /// transport is available or the token/user agent is not a valid header value.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let config = ClientConfig::from_options(&options)?;
        Ok(Self {
            http: HttpClient::new(config, options.token.as_deref())?,
        })
    }

    /// Creates a client from `ARENA_TOKEN`, `ARENA_BASE_URL` and `ARENA_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientOptions::from_env()?)
    }

    /// Replaces the token for this client and all of its clones.
    pub fn set_token(&self, token: Option<&str>) -> Result<()> {
        self.http.set_token(token)
    }

    /// Returns a new client with `token` and otherwise identical settings.
    pub fn with_token(&self, token: Option<&str>) -> Result<Self> {
        Ok(Self {
            http: self.http.with_token(token)?,
        })
    }

    pub fn v3(&self) -> V3<'_> {
        V3::new(&self.http)
    }

    pub fn legacy_v2(&self) -> LegacyV2<'_> {
        LegacyV2::new(&self.http)
    }

    /// Executes an arbitrary request, for endpoints without a typed method.
    pub async fn execute(&self, descriptor: &RequestDescriptor) -> Result<Payload> {
        self.http.execute(descriptor).await
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::{HeaderMap, StatusCode};

    use super::ArenaClient;
    use crate::{BoxError, ClientOptions, HttpRequest, HttpResponse};

    async fn empty_transport(_request: HttpRequest) -> Result<HttpResponse, BoxError> {
        Ok(HttpResponse {
            status: StatusCode::NO_CONTENT,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        })
    }

    #[test]
    fn debug_redacts_token() {
        let client = ArenaClient::new(
            ClientOptions::new()
                .token("super-secret")
                .transport(empty_transport),
        )
        .expect("client builds");
        let debug = format!("{client:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("https://api.are.na"));
    }

    #[test]
    fn invalid_token_fails_construction() {
        let err = ArenaClient::new(
            ClientOptions::new()
                .token("line\nbreak")
                .transport(empty_transport),
        )
        .expect_err("token is not a header value");
        assert!(matches!(err, crate::ArenaError::Config(_)));
    }

    #[test]
    fn with_token_keeps_configuration() {
        let client = ArenaClient::new(
            ClientOptions::new()
                .base_url("http://localhost:4000")
                .transport(empty_transport),
        )
        .expect("client builds");
        let derived = client.with_token(Some("other")).expect("valid token");
        assert_eq!(derived.config().base_url(), "http://localhost:4000");
        assert!(derived.http().has_token());
        assert!(!client.http().has_token());
    }
}
