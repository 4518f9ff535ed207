//! Encoder configuration

use formpart_common::HttpMethod;

/// Default URL of the synthetic request used to drive the encoder
pub const DEFAULT_REQUEST_URL: &str = "http://localhost/";

/// Filename given to blobs appended without one
pub const DEFAULT_BLOB_FILENAME: &str = "blob";

/// MIME type given to blobs appended without one
pub const DEFAULT_BLOB_MIME_TYPE: &str = "application/octet-stream";

/// Configuration for the native multipart encoder
///
/// The synthetic request built from this configuration is never sent; the
/// URL and method only need to be acceptable to the request builder.
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// URL of the synthetic request
    pub request_url: String,

    /// Method of the synthetic request (must carry a body)
    pub method: HttpMethod,

    /// Filename used for blobs that have none
    pub blob_filename: String,

    /// MIME type used for blobs that have none
    pub blob_mime_type: String,

    /// User-Agent of the underlying client
    pub user_agent: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            request_url: DEFAULT_REQUEST_URL.to_string(),
            method: HttpMethod::Post,
            blob_filename: DEFAULT_BLOB_FILENAME.to_string(),
            blob_mime_type: DEFAULT_BLOB_MIME_TYPE.to_string(),
            user_agent: format!("formpart/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl EncoderConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the synthetic request URL
    pub fn request_url(mut self, url: impl Into<String>) -> Self {
        self.request_url = url.into();
        self
    }

    /// Set the synthetic request method
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the filename used for unnamed blobs
    pub fn blob_filename(mut self, filename: impl Into<String>) -> Self {
        self.blob_filename = filename.into();
        self
    }

    /// Set the MIME type used for untyped blobs
    pub fn blob_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.blob_mime_type = mime_type.into();
        self
    }

    /// Set the User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
