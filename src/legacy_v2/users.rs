use crate::{
    resource::{id_path, Resource},
    Entity, RequestDescriptor, RequestOptions, ResourceId, Result,
};

/// `/v2/users` endpoints.
#[derive(Clone, Debug)]
pub struct UsersApi<'a> {
    resource: Resource<'a>,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(resource: Resource<'a>) -> Self {
        Self { resource }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.resource.set_options(options);
        self
    }

    /// The user's primary channel.
    #[deprecated(note = "use the v3 endpoints where possible")]
    pub async fn primary_channel(&self, id: impl Into<ResourceId>) -> Result<Entity> {
        let path = id_path("/v2/users", &id.into(), "/channel");
        let descriptor = RequestDescriptor::get(path).base_url(self.resource.legacy_base_url());
        self.resource.json(descriptor).await
    }
}
