use crate::{
    request::encode_component, resource::Resource, Body, RequestDescriptor, RequestOptions, Result,
};

use super::{PresignInput, PresignResponse};

const TEMP_SOURCE_BASE_URL: &str = "https://s3.amazonaws.com/arena_images-temp";

/// Public URL of an uploaded object in the temporary bucket.
///
/// Leading slashes are dropped and every `/`-separated segment of `key` is
/// percent-encoded on its own, so the separators survive.
pub fn to_temp_source_url(key: &str) -> String {
    let encoded = key
        .trim_start_matches('/')
        .split('/')
        .map(encode_component)
        .collect::<Vec<_>>()
        .join("/");
    format!("{TEMP_SOURCE_BASE_URL}/{encoded}")
}

/// Two-step uploads: presign here, then `PUT` the file to `upload_url`
/// and create a block from [`to_temp_source_url`].
#[derive(Clone, Debug)]
pub struct UploadsApi<'a> {
    resource: Resource<'a>,
}

impl<'a> UploadsApi<'a> {
    pub(crate) fn new(resource: Resource<'a>) -> Self {
        Self { resource }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.resource.set_options(options);
        self
    }

    pub async fn presign(&self, input: &PresignInput) -> Result<PresignResponse> {
        let descriptor = RequestDescriptor::post("/v3/uploads/presign").body(Body::json(input)?);
        self.resource.json(descriptor).await
    }

    pub fn to_temp_source_url(&self, key: &str) -> String {
        to_temp_source_url(key)
    }
}

#[cfg(test)]
mod tests {
    use super::to_temp_source_url;

    #[test]
    fn encodes_each_segment() {
        assert_eq!(
            to_temp_source_url("uploads/abc/image 41.png"),
            "https://s3.amazonaws.com/arena_images-temp/uploads/abc/image%2041.png"
        );
        assert_eq!(
            to_temp_source_url("a#b?.png"),
            "https://s3.amazonaws.com/arena_images-temp/a%23b%3F.png"
        );
    }

    #[test]
    fn keeps_component_safe_punctuation() {
        assert_eq!(
            to_temp_source_url("uploads/draft (1)!.png"),
            "https://s3.amazonaws.com/arena_images-temp/uploads/draft%20(1)!.png"
        );
    }

    #[test]
    fn strips_leading_slashes() {
        assert_eq!(
            to_temp_source_url("//uploads/x.png"),
            "https://s3.amazonaws.com/arena_images-temp/uploads/x.png"
        );
    }

    #[test]
    fn percent_encodes_unicode() {
        assert_eq!(
            to_temp_source_url("uploads/café.png"),
            "https://s3.amazonaws.com/arena_images-temp/uploads/caf%C3%A9.png"
        );
    }
}
