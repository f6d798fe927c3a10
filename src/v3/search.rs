use crate::{resource::Resource, Query, RequestDescriptor, RequestOptions, Result};

use super::{PaginatedEntities, SearchQuery};

#[derive(Clone, Debug)]
pub struct SearchApi<'a> {
    resource: Resource<'a>,
}

impl<'a> SearchApi<'a> {
    pub(crate) fn new(resource: Resource<'a>) -> Self {
        Self { resource }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.resource.set_options(options);
        self
    }

    /// Searches blocks, channels, users and groups.
    pub async fn query(&self, query: &SearchQuery) -> Result<PaginatedEntities> {
        let descriptor = RequestDescriptor::get("/v3/search").query(Query::from_serialize(query)?);
        self.resource.json(descriptor).await
    }
}
