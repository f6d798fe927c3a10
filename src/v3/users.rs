use crate::{
    resource::{id_path, Resource},
    Entity, Query, RequestDescriptor, RequestOptions, ResourceId, Result,
};

use super::{PaginatedEntities, PaginationSortQuery, UserContentsQuery, UserFollowingQuery};

const USERS: &str = "/v3/users";

/// `/v3/users` endpoints. Ids may be numeric or a user slug.
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

    /// The authenticated user.
    pub async fn current(&self) -> Result<Entity> {
        self.resource.json(RequestDescriptor::get("/v3/me")).await
    }

    pub async fn get(&self, id: impl Into<ResourceId>) -> Result<Entity> {
        let path = id_path(USERS, &id.into(), "");
        self.resource.json(RequestDescriptor::get(path)).await
    }

    pub async fn list_contents(
        &self,
        id: impl Into<ResourceId>,
        query: &UserContentsQuery,
    ) -> Result<PaginatedEntities> {
        let descriptor = RequestDescriptor::get(id_path(USERS, &id.into(), "/contents"))
            .query(Query::from_serialize(query)?);
        self.resource.json(descriptor).await
    }

    pub async fn list_followers(
        &self,
        id: impl Into<ResourceId>,
        query: &PaginationSortQuery,
    ) -> Result<PaginatedEntities> {
        let descriptor = RequestDescriptor::get(id_path(USERS, &id.into(), "/followers"))
            .query(Query::from_serialize(query)?);
        self.resource.json(descriptor).await
    }

    /// Users, channels and groups the user follows.
    pub async fn list_following(
        &self,
        id: impl Into<ResourceId>,
        query: &UserFollowingQuery,
    ) -> Result<PaginatedEntities> {
        let descriptor = RequestDescriptor::get(id_path(USERS, &id.into(), "/following"))
            .query(Query::from_serialize(query)?);
        self.resource.json(descriptor).await
    }
}
