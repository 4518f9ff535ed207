//! Synthetic request construction and encoded message types

use crate::config::EncoderConfig;
use crate::error::{FormError, FormResult};
use crate::form_data::{Blob, FormData, FormValue};
use bytes::Bytes;
use formpart_common::{HttpMethod, HttpRequestLike, CONTENT_TYPE};
use http_body_util::BodyExt;
use reqwest::multipart::{Form, Part};
use std::collections::HashMap;

/// Parameter marker searched for in the Content-Type header
const BOUNDARY_PARAM: &str = "boundary=";

/// Convert HttpMethod to reqwest Method
///
/// Only methods that can carry a multipart body are accepted.
pub(crate) fn to_reqwest_method(method: HttpMethod) -> FormResult<reqwest::Method> {
    match method {
        HttpMethod::Post => Ok(reqwest::Method::POST),
        HttpMethod::Put => Ok(reqwest::Method::PUT),
        HttpMethod::Patch => Ok(reqwest::Method::PATCH),
        other => Err(FormError::InvalidConfig(format!(
            "{} requests cannot carry a multipart body",
            other
        ))),
    }
}

/// Closing delimiter of a multipart body, `--<boundary>--\r\n`
///
/// This is the whole body of a multipart message with no parts.
pub fn closing_delimiter(boundary: &str) -> Bytes {
    Bytes::from(format!("--{}--\r\n", boundary))
}

/// Extract the boundary token from a Content-Type header value
///
/// Returns the text after the first `boundary=` up to the end of the
/// string, or `None` when the header has no boundary assignment.
pub fn extract_boundary(content_type: &str) -> Option<&str> {
    content_type
        .find(BOUNDARY_PARAM)
        .map(|index| &content_type[index + BOUNDARY_PARAM.len()..])
}

/// Body bytes and headers produced by one encode call
#[derive(Debug, Clone)]
pub struct EncodedMessage {
    /// Method of the request that produced the body
    pub method: HttpMethod,
    /// Request headers, keyed by lowercase name
    pub headers: HashMap<String, String>,
    /// Encoded multipart body
    pub body: Bytes,
    /// Content-Type header value
    pub content_type: String,
}

impl EncodedMessage {
    /// Create a message from a body and content type
    pub fn new(body: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        let content_type = content_type.into();
        let mut headers = HashMap::new();
        headers.insert(CONTENT_TYPE.to_string(), content_type.clone());
        Self {
            method: HttpMethod::Post,
            headers,
            body: body.into(),
            content_type,
        }
    }

    /// Boundary token carried by the content type, if any
    pub fn boundary(&self) -> Option<&str> {
        extract_boundary(&self.content_type)
    }
}

impl HttpRequestLike for EncodedMessage {
    fn method(&self) -> HttpMethod {
        self.method
    }

    fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    fn body_bytes(&self) -> Option<&[u8]> {
        Some(&self.body)
    }
}

/// Build a reqwest multipart form from form data
pub(crate) fn build_form(form_data: &FormData, config: &EncoderConfig) -> FormResult<Form> {
    let mut form = Form::new();

    for (name, value) in form_data.iter() {
        let part = match value {
            FormValue::Text(text) => Part::text(text.clone()),
            FormValue::Blob(blob) => blob_part(blob, config)?,
        };
        form = form.part(name.to_string(), part);
    }

    Ok(form)
}

fn blob_part(blob: &Blob, config: &EncoderConfig) -> FormResult<Part> {
    let filename = blob
        .filename
        .clone()
        .unwrap_or_else(|| config.blob_filename.clone());
    let mime_type = blob
        .mime_type
        .as_deref()
        .unwrap_or(&config.blob_mime_type);

    Part::bytes(blob.data.to_vec())
        .file_name(filename)
        .mime_str(mime_type)
        .map_err(|e| FormError::InvalidPart(format!("Invalid MIME type '{}': {}", mime_type, e)))
}

/// Read back the headers and body of a built request
///
/// The body is collected from the request's stream, which is how the
/// multipart encoder hands out its output.
pub(crate) async fn read_request(
    mut request: reqwest::Request,
    method: HttpMethod,
) -> FormResult<EncodedMessage> {
    let mut headers = HashMap::new();
    for (name, value) in request.headers().iter() {
        if let Ok(v) = value.to_str() {
            headers.insert(name.to_string(), v.to_string());
        }
    }

    let content_type = match request.headers().get(reqwest::header::CONTENT_TYPE) {
        Some(value) => value
            .to_str()
            .map_err(|e| {
                FormError::UnsupportedOperation(format!("Content-Type is not readable: {}", e))
            })?
            .to_string(),
        None => {
            return Err(FormError::UnsupportedOperation(
                "Request carries no Content-Type header".to_string(),
            ))
        }
    };

    let body = request.body_mut().take().ok_or_else(|| {
        FormError::UnsupportedOperation("Request has no body to read".to_string())
    })?;
    let body = body.collect().await?.to_bytes();

    Ok(EncodedMessage {
        method,
        headers,
        body,
        content_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_boundary() {
        assert_eq!(
            extract_boundary("multipart/form-data; boundary=abc123"),
            Some("abc123")
        );
        assert_eq!(extract_boundary("multipart/form-data"), None);
        assert_eq!(extract_boundary("multipart/form-data; boundary="), Some(""));
    }

    #[test]
    fn test_extract_boundary_takes_rest_of_string() {
        assert_eq!(
            extract_boundary("multipart/form-data; boundary=abc; charset=utf-8"),
            Some("abc; charset=utf-8")
        );
        assert_eq!(
            extract_boundary("multipart/mixed; boundary=x; boundary=y"),
            Some("x; boundary=y")
        );
    }

    #[test]
    fn test_encoded_message_boundary() {
        let message =
            EncodedMessage::new(closing_delimiter("abc"), "multipart/form-data; boundary=abc");
        assert_eq!(message.boundary(), Some("abc"));
        assert_eq!(
            HttpRequestLike::content_type(&message),
            Some("multipart/form-data; boundary=abc")
        );
        assert_eq!(message.body_bytes(), Some(&b"--abc--\r\n"[..]));

        let message = EncodedMessage::new(Bytes::new(), "multipart/form-data");
        assert_eq!(message.boundary(), None);
    }

    #[test]
    fn test_invalid_blob_mime_type() {
        let mut form_data = FormData::new();
        form_data.append_blob("file", Blob::new(vec![1u8]).mime_type("not a mime"));

        let err = build_form(&form_data, &EncoderConfig::default()).unwrap_err();
        assert!(matches!(err, FormError::InvalidPart(_)));
    }

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(to_reqwest_method(HttpMethod::Post).unwrap(), reqwest::Method::POST);
        assert_eq!(to_reqwest_method(HttpMethod::Put).unwrap(), reqwest::Method::PUT);
        assert_eq!(to_reqwest_method(HttpMethod::Patch).unwrap(), reqwest::Method::PATCH);
    }

    #[test]
    fn test_to_reqwest_method_rejects_bodiless() {
        for method in [
            HttpMethod::Get,
            HttpMethod::Delete,
            HttpMethod::Head,
            HttpMethod::Options,
        ] {
            let err = to_reqwest_method(method).unwrap_err();
            assert!(matches!(err, FormError::InvalidConfig(_)));
        }
    }

    #[test]
    fn test_closing_delimiter() {
        assert_eq!(closing_delimiter("abc").as_ref(), b"--abc--\r\n");
    }

    #[tokio::test]
    async fn test_read_request_without_body() {
        let client = reqwest::Client::new();
        let request = client
            .post("http://localhost/")
            .header(reqwest::header::CONTENT_TYPE, "multipart/form-data; boundary=x")
            .build()
            .unwrap();

        let err = read_request(request, HttpMethod::Post).await.unwrap_err();
        assert!(err.is_unsupported());
    }

    #[tokio::test]
    async fn test_read_request_without_content_type() {
        let client = reqwest::Client::new();
        let request = client
            .post("http://localhost/")
            .body("payload")
            .build()
            .unwrap();

        let err = read_request(request, HttpMethod::Post).await.unwrap_err();
        assert!(err.is_unsupported());
    }

    #[tokio::test]
    async fn test_read_request_collects_body() {
        let client = reqwest::Client::new();
        let request = client
            .post("http://localhost/")
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body("payload")
            .build()
            .unwrap();

        let message = read_request(request, HttpMethod::Post).await.unwrap();
        assert_eq!(message.body.as_ref(), b"payload");
        assert_eq!(message.content_type, "text/plain");
        assert_eq!(message.header("Content-Type"), Some("text/plain"));
    }
}
