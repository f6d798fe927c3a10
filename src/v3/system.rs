use http::{header, HeaderValue};
use serde_json::Value as JsonValue;

use crate::{resource::Resource, Entity, RequestDescriptor, RequestOptions, ResponseMode, Result};

const OPENAPI_ACCEPT: &str = "application/yaml, text/yaml, text/plain, */*";

/// Health check and API description.
#[derive(Clone, Debug)]
pub struct SystemApi<'a> {
    resource: Resource<'a>,
}

impl<'a> SystemApi<'a> {
    pub(crate) fn new(resource: Resource<'a>) -> Self {
        Self { resource }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.resource.set_options(options);
        self
    }

    pub async fn ping(&self) -> Result<Entity> {
        self.resource.json(RequestDescriptor::get("/v3/ping")).await
    }

    /// OpenAPI document as YAML text.
    pub async fn openapi(&self) -> Result<String> {
        let descriptor = RequestDescriptor::get("/v3/openapi")
            .header(header::ACCEPT, HeaderValue::from_static(OPENAPI_ACCEPT))
            .response_mode(ResponseMode::Text);
        self.resource.text(descriptor).await
    }

    pub async fn openapi_json(&self) -> Result<JsonValue> {
        self.resource
            .json(RequestDescriptor::get("/v3/openapi.json"))
            .await
    }
}
