use crate::{resource::Resource, Query, RequestDescriptor, RequestOptions, Result};

use super::{ExchangeTokenInput, TokenResponse};

/// OAuth endpoints.
#[derive(Clone, Debug)]
pub struct AuthApi<'a> {
    resource: Resource<'a>,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(resource: Resource<'a>) -> Self {
        Self { resource }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.resource.set_options(options);
        self
    }

    /// Exchanges a grant for an access token.
    ///
    /// Sent form-encoded and without the client's bearer token.
    pub async fn exchange_token(&self, input: &ExchangeTokenInput) -> Result<TokenResponse> {
        let descriptor = RequestDescriptor::post("/v3/oauth/token")
            .form(Query::from_serialize(input)?)
            .without_auth();
        self.resource.json(descriptor).await
    }
}
