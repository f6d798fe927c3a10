use crate::{
    resource::{id_path, Resource},
    RequestDescriptor, RequestOptions, ResourceId, Result,
};

/// `/v3/comments` endpoints. Comments are created through
/// [`BlocksApi::create_comment`](super::BlocksApi::create_comment).
#[derive(Clone, Debug)]
pub struct CommentsApi<'a> {
    resource: Resource<'a>,
}

impl<'a> CommentsApi<'a> {
    pub(crate) fn new(resource: Resource<'a>) -> Self {
        Self { resource }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.resource.set_options(options);
        self
    }

    pub async fn remove(&self, id: impl Into<ResourceId>) -> Result<()> {
        let path = id_path("/v3/comments", &id.into(), "");
        self.resource.void(RequestDescriptor::delete(path)).await
    }
}
