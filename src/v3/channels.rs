use crate::{
    resource::{id_path, Resource},
    Body, Entity, Query, RequestDescriptor, RequestOptions, ResourceId, Result,
};

use super::{
    ChannelContentsQuery, CreateChannelInput, PaginatedEntities, PaginationSortQuery,
    UpdateChannelInput,
};

const CHANNELS: &str = "/v3/channels";

/// `/v3/channels` endpoints. Ids may be numeric or a channel slug.
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

    pub async fn get(&self, id: impl Into<ResourceId>) -> Result<Entity> {
        let path = id_path(CHANNELS, &id.into(), "");
        self.resource.json(RequestDescriptor::get(path)).await
    }

    pub async fn create(&self, input: &CreateChannelInput) -> Result<Entity> {
        let descriptor = RequestDescriptor::post(CHANNELS).body(Body::json(input)?);
        self.resource.json(descriptor).await
    }

    pub async fn update(
        &self,
        id: impl Into<ResourceId>,
        input: &UpdateChannelInput,
    ) -> Result<Entity> {
        let descriptor =
            RequestDescriptor::put(id_path(CHANNELS, &id.into(), "")).body(Body::json(input)?);
        self.resource.json(descriptor).await
    }

    pub async fn remove(&self, id: impl Into<ResourceId>) -> Result<()> {
        let path = id_path(CHANNELS, &id.into(), "");
        self.resource.void(RequestDescriptor::delete(path)).await
    }

    pub async fn list_contents(
        &self,
        id: impl Into<ResourceId>,
        query: &ChannelContentsQuery,
    ) -> Result<PaginatedEntities> {
        let descriptor = RequestDescriptor::get(id_path(CHANNELS, &id.into(), "/contents"))
            .query(Query::from_serialize(query)?);
        self.resource.json(descriptor).await
    }

    /// Channels this channel is connected to.
    pub async fn list_connections(
        &self,
        id: impl Into<ResourceId>,
        query: &PaginationSortQuery,
    ) -> Result<PaginatedEntities> {
        let descriptor = RequestDescriptor::get(id_path(CHANNELS, &id.into(), "/connections"))
            .query(Query::from_serialize(query)?);
        self.resource.json(descriptor).await
    }

    pub async fn list_followers(
        &self,
        id: impl Into<ResourceId>,
        query: &PaginationSortQuery,
    ) -> Result<PaginatedEntities> {
        let descriptor = RequestDescriptor::get(id_path(CHANNELS, &id.into(), "/followers"))
            .query(Query::from_serialize(query)?);
        self.resource.json(descriptor).await
    }
}
