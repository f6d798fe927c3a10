use crate::{
    resource::{id_path, Resource},
    Body, Entity, RequestDescriptor, RequestOptions, ResourceId, Result,
};

use super::{types::CreateConnectionResponse, CreateConnectionInput, MoveConnectionInput};

const CONNECTIONS: &str = "/v3/connections";

/// `/v3/connections` endpoints.
#[derive(Clone, Debug)]
pub struct ConnectionsApi<'a> {
    resource: Resource<'a>,
}

impl<'a> ConnectionsApi<'a> {
    pub(crate) fn new(resource: Resource<'a>) -> Self {
        Self { resource }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.resource.set_options(options);
        self
    }

    pub async fn get(&self, id: impl Into<ResourceId>) -> Result<Entity> {
        let path = id_path(CONNECTIONS, &id.into(), "");
        self.resource.json(RequestDescriptor::get(path)).await
    }

    /// Connects a block or channel to each channel in `channel_ids`.
    ///
    /// Returns one connection per target channel.
    pub async fn create(&self, input: &CreateConnectionInput) -> Result<Vec<Entity>> {
        let descriptor = RequestDescriptor::post(CONNECTIONS).body(Body::json(input)?);
        let response: CreateConnectionResponse = self.resource.json(descriptor).await?;
        Ok(response.data)
    }

    pub async fn move_connection(
        &self,
        id: impl Into<ResourceId>,
        input: &MoveConnectionInput,
    ) -> Result<Entity> {
        let descriptor = RequestDescriptor::post(id_path(CONNECTIONS, &id.into(), "/move"))
            .body(Body::json(input)?);
        self.resource.json(descriptor).await
    }

    pub async fn remove(&self, id: impl Into<ResourceId>) -> Result<()> {
        let path = id_path(CONNECTIONS, &id.into(), "");
        self.resource.void(RequestDescriptor::delete(path)).await
    }
}
