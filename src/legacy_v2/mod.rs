//! Legacy v2 endpoints that have no v3 equivalent yet.
//!
//! Every call goes to the legacy base URL. Prefer [`crate::v3`] where possible.

mod channels;
mod users;

pub use channels::ChannelsApi;
pub use users::UsersApi;

use crate::{resource::Resource, HttpClient};

#[derive(Clone, Copy, Debug)]
pub struct LegacyV2<'a> {
    http: &'a HttpClient,
}

impl<'a> LegacyV2<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub fn channels(&self) -> ChannelsApi<'a> {
        ChannelsApi::new(Resource::new(self.http))
    }

    pub fn users(&self) -> UsersApi<'a> {
        UsersApi::new(Resource::new(self.http))
    }
}
