use serde::de::DeserializeOwned;

use crate::{HttpClient, RequestDescriptor, RequestOptions, ResourceId, Result};

/// Shared state of a resource namespace: the executor and per-call options.
#[derive(Clone, Debug)]
pub(crate) struct Resource<'a> {
    http: &'a HttpClient,
    options: RequestOptions,
}

impl<'a> Resource<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self {
            http,
            options: RequestOptions::default(),
        }
    }

    pub(crate) fn set_options(&mut self, options: RequestOptions) {
        self.options = options;
    }

    pub(crate) fn legacy_base_url(&self) -> &str {
        self.http.config().legacy_base_url()
    }

    /// Applies the per-call options last, so their headers win.
    fn prepare(&self, descriptor: RequestDescriptor) -> RequestDescriptor {
        descriptor.options(&self.options)
    }

    pub(crate) async fn json<T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<T> {
        self.http.execute_json(&self.prepare(descriptor)).await
    }

    pub(crate) async fn void(&self, descriptor: RequestDescriptor) -> Result<()> {
        self.http.execute_void(&self.prepare(descriptor)).await
    }

    pub(crate) async fn text(&self, descriptor: RequestDescriptor) -> Result<String> {
        let payload = self.http.execute(&self.prepare(descriptor)).await?;
        Ok(payload.into_text().unwrap_or_default())
    }
}

/// `{prefix}/{id}{suffix}` with `id` encoded as one path segment.
pub(crate) fn id_path(prefix: &str, id: &ResourceId, suffix: &str) -> String {
    format!("{prefix}/{}{suffix}", id.to_path_segment())
}

#[cfg(test)]
mod tests {
    use super::id_path;
    use crate::ResourceId;

    #[test]
    fn id_paths_encode_the_id() {
        assert_eq!(id_path("/v3/blocks", &ResourceId::from(7), ""), "/v3/blocks/7");
        assert_eq!(
            id_path("/v3/channels", &ResourceId::from("a b"), "/contents"),
            "/v3/channels/a%20b/contents"
        );
    }
}
