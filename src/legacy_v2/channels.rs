use serde::Serialize;

use crate::{
    resource::{id_path, Resource},
    Body, Entity, Query, RequestDescriptor, RequestOptions, ResourceId, Result,
};

const CHANNELS: &str = "/v2/channels";

#[derive(Serialize)]
struct CollaboratorInput {
    user_id: ResourceId,
}

/// `/v2/channels` endpoints.
#[derive(Clone, Debug)]
pub struct ChannelsApi<'a> {
    resource: Resource<'a>,
}

impl<'a> ChannelsApi<'a> {
    pub(crate) fn new(resource: Resource<'a>) -> Self {
        Self { resource }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.resource.set_options(options);
        self
    }

    fn descriptor(&self, descriptor: RequestDescriptor) -> RequestDescriptor {
        descriptor.base_url(self.resource.legacy_base_url())
    }

    #[deprecated(note = "use the v3 endpoints where possible")]
    pub async fn list(&self) -> Result<Entity> {
        let descriptor = self.descriptor(RequestDescriptor::get(CHANNELS));
        self.resource.json(descriptor).await
    }

    #[deprecated(note = "use the v3 endpoints where possible")]
    pub async fn thumb(&self, slug: &str) -> Result<Entity> {
        let path = id_path(CHANNELS, &ResourceId::from(slug), "/thumb");
        let descriptor = self.descriptor(RequestDescriptor::get(path));
        self.resource.json(descriptor).await
    }

    #[deprecated(note = "use the v3 endpoints where possible")]
    pub async fn collaborators(&self, id: impl Into<ResourceId>) -> Result<Entity> {
        let path = id_path(CHANNELS, &id.into(), "/collaborators");
        let descriptor = self.descriptor(RequestDescriptor::get(path));
        self.resource.json(descriptor).await
    }

    #[deprecated(note = "use the v3 endpoints where possible")]
    pub async fn add_collaborator(
        &self,
        id: impl Into<ResourceId>,
        user_id: impl Into<ResourceId>,
    ) -> Result<Entity> {
        let path = id_path(CHANNELS, &id.into(), "/collaborators");
        let body = Body::json(&CollaboratorInput {
            user_id: user_id.into(),
        })?;
        let descriptor = self.descriptor(RequestDescriptor::post(path).body(body));
        self.resource.json(descriptor).await
    }

    #[deprecated(note = "use the v3 endpoints where possible")]
    pub async fn remove_collaborator(
        &self,
        id: impl Into<ResourceId>,
        user_id: impl Into<ResourceId>,
    ) -> Result<()> {
        let path = id_path(CHANNELS, &id.into(), "/collaborators");
        let query = Query::new().set("user_id", user_id.into().to_string());
        let descriptor = self.descriptor(RequestDescriptor::delete(path).query(query));
        self.resource.void(descriptor).await
    }
}
