//! Stateful multipart preview component
//!
//! [`MultipartPreview`] runs form data through a [`MultipartEncoder`],
//! publishes the resulting Content-Type and boundary, and notifies
//! registered listeners. Published values are replaced wholesale on every
//! successful encode and left untouched when an encode fails.

use crate::decoder::Decoder;
use crate::encoder::{MultipartEncoder, NativeEncoder};
use crate::error::{FormError, FormResult};
use crate::events::{Listeners, MultipartEvent};
use crate::form_data::FormData;
use crate::request::EncodedMessage;
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, trace};

/// Structured result of one encode call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOutcome {
    /// Encoded multipart body
    pub body: Bytes,
    /// Content-Type header value
    pub content_type: String,
    /// Boundary token, when the content type carries one
    pub boundary: Option<String>,
}

/// Encodes form data and publishes the content type and boundary
pub struct MultipartPreview {
    encoder: Arc<dyn MultipartEncoder>,
    decoder: Decoder,
    form_data: Option<FormData>,
    content_type: String,
    boundary: String,
    listeners: Listeners,
}

impl MultipartPreview {
    /// Create a component around an encoder
    pub fn new<E: MultipartEncoder + 'static>(encoder: E) -> Self {
        Self::with_encoder(Arc::new(encoder))
    }

    /// Create a component around a shared encoder
    pub fn with_encoder(encoder: Arc<dyn MultipartEncoder>) -> Self {
        Self {
            encoder,
            decoder: Decoder::global(),
            form_data: None,
            content_type: String::new(),
            boundary: String::new(),
            listeners: Listeners::default(),
        }
    }

    /// Create a component backed by the default native encoder
    pub fn native() -> FormResult<Self> {
        Ok(Self::new(NativeEncoder::default_encoder()?))
    }

    /// Use an explicit decoder for previews instead of the process-wide one
    pub fn decoder(mut self, decoder: Decoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Latest published Content-Type (empty before the first encode)
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Latest published boundary (empty until an encode yields one)
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Form data used by [`preview`](Self::preview)
    pub fn form_data(&self) -> Option<&FormData> {
        self.form_data.as_ref()
    }

    /// Set the form data used by [`preview`](Self::preview)
    pub fn set_form_data(&mut self, form: FormData) {
        self.form_data = Some(form);
    }

    /// Unset the form data
    pub fn clear_form_data(&mut self) -> Option<FormData> {
        self.form_data.take()
    }

    /// Register a listener for every event
    pub fn on_event<F>(&mut self, listener: F)
    where
        F: Fn(&MultipartEvent) + Send + Sync + 'static,
    {
        self.listeners.on_event(Box::new(listener));
    }

    /// Register a listener for `content-type-changed`
    pub fn on_content_type_changed<F>(&mut self, listener: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.listeners.on_content_type(Box::new(listener));
    }

    /// Register a listener for `multipart-boundary-changed`
    pub fn on_boundary_changed<F>(&mut self, listener: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.listeners.on_boundary(Box::new(listener));
    }

    /// Encode `form` and return the raw multipart body
    pub async fn encode(&mut self, form: &FormData) -> FormResult<Bytes> {
        Ok(self.encode_with_outcome(form).await?.body)
    }

    /// Encode `form` and return body, content type and boundary together
    pub async fn encode_with_outcome(&mut self, form: &FormData) -> FormResult<EncodeOutcome> {
        let message = self.encoder.encode(form).await?;
        Ok(self.publish(message))
    }

    /// Encode the current form data and decode the body as text
    ///
    /// Fails with [`FormError::PreconditionFailed`] before the encoder is
    /// called when no form data is set.
    pub async fn preview(&mut self) -> FormResult<String> {
        let form = self.form_data.clone();
        self.preview_form(form.as_ref()).await
    }

    /// Same as [`preview`](Self::preview), with the form data passed in
    pub async fn preview_form(&mut self, form: Option<&FormData>) -> FormResult<String> {
        let Some(form) = form else {
            return Err(FormError::PreconditionFailed("form data is not set".to_string()));
        };
        let body = self.encode(form).await?;
        Ok(self.decoder.decode(body))
    }

    fn publish(&mut self, message: EncodedMessage) -> EncodeOutcome {
        let boundary = message.boundary().map(str::to_string);

        self.content_type = message.content_type.clone();
        self.listeners.emit(&MultipartEvent::ContentTypeChanged(self.content_type.clone()));

        match &boundary {
            Some(token) => {
                self.boundary = token.clone();
                self.listeners.emit(&MultipartEvent::BoundaryChanged(token.clone()));
            }
            None => trace!(content_type = %self.content_type, "Content type has no boundary"),
        }

        debug!(
            content_type = %self.content_type,
            listeners = self.listeners.len(),
            "Published encode result"
        );

        EncodeOutcome {
            body: message.body,
            content_type: message.content_type,
            boundary,
        }
    }
}

impl std::fmt::Debug for MultipartPreview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultipartPreview")
            .field("content_type", &self.content_type)
            .field("boundary", &self.boundary)
            .field("has_form_data", &self.form_data.is_some())
            .field("decoder", &self.decoder)
            .finish()
    }
}
