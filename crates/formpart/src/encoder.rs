//! Multipart encoders
//!
//! [`MultipartEncoder`] is the seam between the preview component and the
//! code that actually frames the multipart body. [`NativeEncoder`] hands the
//! framing to reqwest by building a request that is never sent.

use crate::config::EncoderConfig;
use crate::error::FormResult;
use crate::form_data::FormData;
use crate::request::{
    build_form, closing_delimiter, read_request, to_reqwest_method, EncodedMessage,
};
use async_trait::async_trait;
use formpart_common::CONTENT_LENGTH;
use std::sync::Arc;
use tracing::debug;

/// Produces a multipart body and matching Content-Type for form data
#[async_trait]
pub trait MultipartEncoder: Send + Sync {
    /// Encode the form. The form is only read.
    async fn encode(&self, form: &FormData) -> FormResult<EncodedMessage>;
}

#[async_trait]
impl<T: MultipartEncoder + ?Sized> MultipartEncoder for Arc<T> {
    async fn encode(&self, form: &FormData) -> FormResult<EncodedMessage> {
        (**self).encode(form).await
    }
}

/// Encoder backed by reqwest's multipart body writer
///
/// # Example
///
/// ```ignore
/// use formpart::{FormData, MultipartEncoder, NativeEncoder};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let encoder = NativeEncoder::default_encoder()?;
///
///     let mut form = FormData::new();
///     form.append_text("name", "Alice");
///
///     let message = encoder.encode(&form).await?;
///     println!("{} ({} bytes)", message.content_type, message.body.len());
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct NativeEncoder {
    inner: Arc<NativeEncoderInner>,
}

struct NativeEncoderInner {
    client: reqwest::Client,
    method: reqwest::Method,
    url: url::Url,
    config: EncoderConfig,
}

impl NativeEncoder {
    /// Create a new encoder with the given configuration
    pub fn new(config: EncoderConfig) -> FormResult<Self> {
        let method = to_reqwest_method(config.method)?;
        let url = url::Url::parse(&config.request_url)?;

        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            inner: Arc::new(NativeEncoderInner {
                client,
                method,
                url,
                config,
            }),
        })
    }

    /// Create an encoder with default configuration
    pub fn default_encoder() -> FormResult<Self> {
        Self::new(EncoderConfig::default())
    }

    /// Get the configuration
    pub fn config(&self) -> &EncoderConfig {
        &self.inner.config
    }
}

#[async_trait]
impl MultipartEncoder for NativeEncoder {
    async fn encode(&self, form: &FormData) -> FormResult<EncodedMessage> {
        let config = &self.inner.config;
        let multipart = build_form(form, config)?;

        let request = self
            .inner
            .client
            .request(self.inner.method.clone(), self.inner.url.clone())
            .multipart(multipart)
            .build()?;

        let mut message = read_request(request, config.method).await?;

        // reqwest streams nothing for a form without parts
        if form.is_empty() && message.body.is_empty() {
            if let Some(boundary) = message.boundary() {
                let body = closing_delimiter(boundary);
                if let Some(length) = message.headers.get_mut(CONTENT_LENGTH) {
                    *length = body.len().to_string();
                }
                message.body = body;
            }
        }

        debug!(
            fields = form.len(),
            body_len = message.body.len(),
            content_type = %message.content_type,
            "Encoded multipart form"
        );

        Ok(message)
    }
}

impl std::fmt::Debug for NativeEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeEncoder")
            .field("method", &self.inner.config.method)
            .field("url", &self.inner.config.request_url)
            .finish()
    }
}
