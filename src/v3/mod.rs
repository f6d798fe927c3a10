//! Are.na v3 API.
//!
//! Namespaces borrow the client and are cheap to create:
//!
//! ```no_run
//! # async fn run(client: arena_http::ArenaClient) -> arena_http::Result<()> {
//! let block = client.v3().blocks().get(12345).await?;
//! println!("{}", block["title"]);
//! # Ok(())
//! # }
//! ```

mod auth;
mod blocks;
mod channels;
mod comments;
mod connections;
mod groups;
mod search;
mod system;
mod types;
mod uploads;
mod users;

pub use auth::AuthApi;
pub use blocks::BlocksApi;
pub use channels::ChannelsApi;
pub use comments::CommentsApi;
pub use connections::ConnectionsApi;
pub use groups::GroupsApi;
pub use search::SearchApi;
pub use system::SystemApi;
pub use types::*;
pub use uploads::{to_temp_source_url, UploadsApi};
pub use users::UsersApi;

use crate::{resource::Resource, HttpClient};

/// Entry point for the v3 resource namespaces.
#[derive(Clone, Copy, Debug)]
pub struct V3<'a> {
    http: &'a HttpClient,
}

impl<'a> V3<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    fn resource(&self) -> Resource<'a> {
        Resource::new(self.http)
    }

    pub fn auth(&self) -> AuthApi<'a> {
        AuthApi::new(self.resource())
    }

    pub fn blocks(&self) -> BlocksApi<'a> {
        BlocksApi::new(self.resource())
    }

    pub fn channels(&self) -> ChannelsApi<'a> {
        ChannelsApi::new(self.resource())
    }

    pub fn comments(&self) -> CommentsApi<'a> {
        CommentsApi::new(self.resource())
    }

    pub fn connections(&self) -> ConnectionsApi<'a> {
        ConnectionsApi::new(self.resource())
    }

    pub fn groups(&self) -> GroupsApi<'a> {
        GroupsApi::new(self.resource())
    }

    pub fn search(&self) -> SearchApi<'a> {
        SearchApi::new(self.resource())
    }

    pub fn system(&self) -> SystemApi<'a> {
        SystemApi::new(self.resource())
    }

    pub fn uploads(&self) -> UploadsApi<'a> {
        UploadsApi::new(self.resource())
    }

    pub fn users(&self) -> UsersApi<'a> {
        UsersApi::new(self.resource())
    }
}
