use crate::{
    resource::{id_path, Resource},
    Body, Entity, Query, RequestDescriptor, RequestOptions, ResourceId, Result,
};

use super::{
    BlockConnectionsQuery, CreateBatchInput, CreateBlockInput, CreateCommentInput,
    PaginatedEntities, PaginationQuery, UpdateBlockInput,
};

const BLOCKS: &str = "/v3/blocks";

/// `/v3/blocks` endpoints.
#[derive(Clone, Debug)]
pub struct BlocksApi<'a> {
    resource: Resource<'a>,
}

impl<'a> BlocksApi<'a> {
    pub(crate) fn new(resource: Resource<'a>) -> Self {
        Self { resource }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.resource.set_options(options);
        self
    }

    pub async fn get(&self, id: impl Into<ResourceId>) -> Result<Entity> {
        let path = id_path(BLOCKS, &id.into(), "");
        self.resource.json(RequestDescriptor::get(path)).await
    }

    pub async fn create(&self, input: &CreateBlockInput) -> Result<Entity> {
        let descriptor = RequestDescriptor::post(BLOCKS).body(Body::json(input)?);
        self.resource.json(descriptor).await
    }

    pub async fn update(
        &self,
        id: impl Into<ResourceId>,
        input: &UpdateBlockInput,
    ) -> Result<Entity> {
        let descriptor =
            RequestDescriptor::put(id_path(BLOCKS, &id.into(), "")).body(Body::json(input)?);
        self.resource.json(descriptor).await
    }

    pub async fn list_comments(
        &self,
        id: impl Into<ResourceId>,
        query: &PaginationQuery,
    ) -> Result<PaginatedEntities> {
        let descriptor = RequestDescriptor::get(id_path(BLOCKS, &id.into(), "/comments"))
            .query(Query::from_serialize(query)?);
        self.resource.json(descriptor).await
    }

    pub async fn create_comment(
        &self,
        id: impl Into<ResourceId>,
        input: &CreateCommentInput,
    ) -> Result<Entity> {
        let descriptor = RequestDescriptor::post(id_path(BLOCKS, &id.into(), "/comments"))
            .body(Body::json(input)?);
        self.resource.json(descriptor).await
    }

    /// Channels the block is connected to.
    pub async fn list_connections(
        &self,
        id: impl Into<ResourceId>,
        query: &BlockConnectionsQuery,
    ) -> Result<PaginatedEntities> {
        let descriptor = RequestDescriptor::get(id_path(BLOCKS, &id.into(), "/connections"))
            .query(Query::from_serialize(query)?);
        self.resource.json(descriptor).await
    }

    /// Queues several blocks for asynchronous creation.
    pub async fn create_batch(&self, input: &CreateBatchInput) -> Result<Entity> {
        let descriptor = RequestDescriptor::post("/v3/blocks/batch").body(Body::json(input)?);
        self.resource.json(descriptor).await
    }

    pub async fn get_batch(&self, batch_id: impl Into<ResourceId>) -> Result<Entity> {
        let path = id_path("/v3/blocks/batch", &batch_id.into(), "");
        self.resource.json(RequestDescriptor::get(path)).await
    }
}
