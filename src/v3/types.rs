//! Request inputs, query shapes and typed responses for the v3 API.
//!
//! `Option` fields are left out of JSON bodies and query strings when `None`.

use serde::{Deserialize, Serialize};

use crate::{Entity, PaginatedResult, ResourceId};

pub type PaginatedEntities = PaginatedResult<Entity>;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionSort {
    CreatedAtDesc,
    CreatedAtAsc,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSort {
    CreatedAtAsc,
    CreatedAtDesc,
    UpdatedAtAsc,
    UpdatedAtDesc,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelContentSort {
    PositionAsc,
    PositionDesc,
    CreatedAtAsc,
    CreatedAtDesc,
    UpdatedAtAsc,
    UpdatedAtDesc,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ContentTypeFilter {
    Text,
    Image,
    Link,
    Attachment,
    Embed,
    Channel,
    Block,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum FollowableType {
    User,
    Channel,
    Group,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ConnectableType {
    Block,
    Channel,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    InsertAt,
    MoveToTop,
    MoveToBottom,
    MoveUp,
    MoveDown,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum SearchTypeFilter {
    All,
    Text,
    Image,
    Link,
    Attachment,
    Embed,
    Channel,
    Block,
    User,
    Group,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    All,
    My,
    Following,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchSort {
    ScoreDesc,
    CreatedAtDesc,
    CreatedAtAsc,
    UpdatedAtDesc,
    UpdatedAtAsc,
    NameAsc,
    NameDesc,
    ConnectionsCountDesc,
    Random,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionFilter {
    All,
    Own,
    ExcludeOwn,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelVisibility {
    Public,
    Private,
    Closed,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OAuthGrantType {
    AuthorizationCode,
    ClientCredentials,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
    pub per: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PaginationSortQuery {
    pub page: Option<u32>,
    pub per: Option<u32>,
    pub sort: Option<ConnectionSort>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChannelContentsQuery {
    pub page: Option<u32>,
    pub per: Option<u32>,
    pub sort: Option<ChannelContentSort>,
    pub user_id: Option<i64>,
}

/// Query for user and group contents.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ContentsQuery {
    pub page: Option<u32>,
    pub per: Option<u32>,
    pub sort: Option<ContentSort>,
    #[serde(rename = "type")]
    pub content_type: Option<ContentTypeFilter>,
}

pub type UserContentsQuery = ContentsQuery;
pub type GroupContentsQuery = ContentsQuery;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UserFollowingQuery {
    pub page: Option<u32>,
    pub per: Option<u32>,
    pub sort: Option<ConnectionSort>,
    #[serde(rename = "type")]
    pub followable_type: Option<FollowableType>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BlockConnectionsQuery {
    pub page: Option<u32>,
    pub per: Option<u32>,
    pub sort: Option<ConnectionSort>,
    pub filter: Option<ConnectionFilter>,
}

/// Search parameters. List filters are sent comma-joined.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SearchQuery {
    pub page: Option<u32>,
    pub per: Option<u32>,
    pub query: Option<String>,
    #[serde(rename = "type")]
    pub types: Vec<SearchTypeFilter>,
    pub scope: Option<SearchScope>,
    pub user_id: Option<i64>,
    pub group_id: Option<i64>,
    pub channel_id: Option<i64>,
    /// File extensions, e.g. `pdf`.
    pub ext: Vec<String>,
    pub sort: Option<SearchSort>,
    /// Cursor, usually an ISO-8601 timestamp.
    pub after: Option<String>,
    /// Seed for `SearchSort::Random`.
    pub seed: Option<i64>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockInput {
    /// Text content or a URL.
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_source_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateBlockInput {
    #[serde(flatten)]
    pub block: BlockInput,
    pub channel_ids: Vec<ResourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_at: Option<i64>,
}

impl CreateBlockInput {
    pub fn new(value: impl Into<String>, channel_ids: Vec<ResourceId>) -> Self {
        Self {
            block: BlockInput {
                value: value.into(),
                ..BlockInput::default()
            },
            channel_ids,
            insert_at: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateBatchInput {
    pub channel_ids: Vec<ResourceId>,
    pub blocks: Vec<BlockInput>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBlockInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateCommentInput {
    pub body: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateChannelInput {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<ChannelVisibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateChannelInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<ChannelVisibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateConnectionInput {
    pub connectable_id: i64,
    pub connectable_type: ConnectableType,
    pub channel_ids: Vec<ResourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub(crate) struct CreateConnectionResponse {
    pub data: Vec<Entity>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveConnectionInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement: Option<Movement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignFile {
    pub filename: String,
    pub content_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignInput {
    pub files: Vec<PresignFile>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedFile {
    /// Target of the direct `PUT` upload.
    pub upload_url: String,
    /// Storage key; see [`to_temp_source_url`](super::to_temp_source_url).
    pub key: String,
    pub content_type: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignResponse {
    pub files: Vec<PresignedFile>,
    /// Lifetime of the upload URLs in seconds.
    pub expires_in: i64,
}

/// OAuth token exchange, sent form-encoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeTokenInput {
    pub grant_type: OAuthGrantType,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub code: Option<String>,
    pub redirect_uri: Option<String>,
    pub code_verifier: Option<String>,
}

impl ExchangeTokenInput {
    pub fn client_credentials(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            grant_type: OAuthGrantType::ClientCredentials,
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            code: None,
            redirect_uri: None,
            code_verifier: None,
        }
    }

    pub fn authorization_code(code: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        Self {
            grant_type: OAuthGrantType::AuthorizationCode,
            client_id: None,
            client_secret: None,
            code: Some(code.into()),
            redirect_uri: Some(redirect_uri.into()),
            code_verifier: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub created_at: i64,
    /// Any other fields returned by the server.
    #[serde(flatten)]
    pub extra: Entity,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::Query;

    #[test]
    fn search_query_joins_filters() {
        let query = Query::from_serialize(&SearchQuery {
            types: vec![SearchTypeFilter::Channel, SearchTypeFilter::User],
            ext: vec!["pdf".to_owned(), "png".to_owned()],
            sort: Some(SearchSort::ConnectionsCountDesc),
            ..SearchQuery::new("brutalism")
        })
        .expect("search query serializes");
        assert_eq!(
            query.encode(),
            "query=brutalism&type=Channel%2CUser&ext=pdf%2Cpng&sort=connections_count_desc"
        );
    }

    #[test]
    fn enum_wire_names() {
        assert_eq!(json!(ConnectionFilter::ExcludeOwn), json!("EXCLUDE_OWN"));
        assert_eq!(json!(Movement::MoveToTop), json!("move_to_top"));
        assert_eq!(json!(ContentTypeFilter::Attachment), json!("Attachment"));
        assert_eq!(json!(OAuthGrantType::ClientCredentials), json!("client_credentials"));
    }

    #[test]
    fn create_block_body_flattens_and_skips_unset() {
        let mut input = CreateBlockInput::new("https://example.com", vec![12.into(), "my-channel".into()]);
        input.block.title = Some("Example".to_owned());
        assert_eq!(
            json!(input),
            json!({
                "value": "https://example.com",
                "title": "Example",
                "channel_ids": [12, "my-channel"]
            })
        );
    }

    #[test]
    fn token_response_keeps_extra_fields() {
        let token: TokenResponse = serde_json::from_value(json!({
            "access_token": "abc",
            "token_type": "Bearer",
            "scope": "read",
            "created_at": 1_700_000_000,
            "expires_in": 7200
        }))
        .expect("token response");
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.extra["expires_in"], 7200);
    }
}
