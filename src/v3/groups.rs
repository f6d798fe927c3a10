use crate::{
    resource::{id_path, Resource},
    Entity, Query, RequestDescriptor, RequestOptions, ResourceId, Result,
};

use super::{GroupContentsQuery, PaginatedEntities, PaginationSortQuery};

const GROUPS: &str = "/v3/groups";

/// `/v3/groups` endpoints.
#[derive(Clone, Debug)]
pub struct GroupsApi<'a> {
    resource: Resource<'a>,
}

impl<'a> GroupsApi<'a> {
    pub(crate) fn new(resource: Resource<'a>) -> Self {
        Self { resource }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.resource.set_options(options);
        self
    }

    pub async fn get(&self, id: impl Into<ResourceId>) -> Result<Entity> {
        let path = id_path(GROUPS, &id.into(), "");
        self.resource.json(RequestDescriptor::get(path)).await
    }

    pub async fn list_contents(
        &self,
        id: impl Into<ResourceId>,
        query: &GroupContentsQuery,
    ) -> Result<PaginatedEntities> {
        let descriptor = RequestDescriptor::get(id_path(GROUPS, &id.into(), "/contents"))
            .query(Query::from_serialize(query)?);
        self.resource.json(descriptor).await
    }

    pub async fn list_followers(
        &self,
        id: impl Into<ResourceId>,
        query: &PaginationSortQuery,
    ) -> Result<PaginatedEntities> {
        let descriptor = RequestDescriptor::get(id_path(GROUPS, &id.into(), "/followers"))
            .query(Query::from_serialize(query)?);
        self.resource.json(descriptor).await
    }
}
