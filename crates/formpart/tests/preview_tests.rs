//! Component contract tests against a recording encoder

use async_trait::async_trait;
use bytes::Bytes;
use formpart::{
    EncodedMessage, FormData, FormError, FormResult, MultipartEncoder, MultipartEvent,
    MultipartPreview,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Test double
// ============================================================================

/// Encoder returning queued responses and counting calls
#[derive(Default)]
struct RecordingEncoder {
    responses: Mutex<Vec<FormResult<EncodedMessage>>>,
    calls: AtomicUsize,
}

impl RecordingEncoder {
    fn with_content_types(content_types: &[&str]) -> Arc<Self> {
        let responses = content_types
            .iter()
            .rev()
            .map(|ct| Ok(EncodedMessage::new(Bytes::from_static(b"--x\r\n"), *ct)))
            .collect();
        Arc::new(Self {
            responses: Mutex::new(responses),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(vec![Err(FormError::UnsupportedOperation(
                "no body".to_string(),
            ))]),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MultipartEncoder for RecordingEncoder {
    async fn encode(&self, _form: &FormData) -> FormResult<EncodedMessage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(FormError::UnsupportedOperation("exhausted".to_string())))
    }
}

fn event_log(preview: &mut MultipartPreview) -> Arc<Mutex<Vec<MultipartEvent>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    preview.on_event(move |event| sink.lock().unwrap().push(event.clone()));
    log
}

fn sample_form() -> FormData {
    let mut form = FormData::new();
    form.append_text("name", "Alice");
    form
}

// ============================================================================
// Boundary publishing
// ============================================================================

#[tokio::test]
async fn test_boundary_published_and_notified() {
    let encoder =
        RecordingEncoder::with_content_types(&["multipart/form-data; boundary=----abc123"]);
    let mut preview = MultipartPreview::with_encoder(encoder.clone());
    let events = event_log(&mut preview);

    let boundaries = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&boundaries);
    preview.on_boundary_changed(move |value| sink.lock().unwrap().push(value.to_string()));

    let body = preview.encode(&sample_form()).await.unwrap();

    assert!(!body.is_empty());
    assert_eq!(preview.content_type(), "multipart/form-data; boundary=----abc123");
    assert_eq!(preview.boundary(), "----abc123");
    assert_eq!(*boundaries.lock().unwrap(), vec!["----abc123".to_string()]);
    assert_eq!(
        *events.lock().unwrap(),
        vec![
            MultipartEvent::ContentTypeChanged(
                "multipart/form-data; boundary=----abc123".to_string()
            ),
            MultipartEvent::BoundaryChanged("----abc123".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_missing_boundary_is_silent() {
    let encoder = RecordingEncoder::with_content_types(&[
        "multipart/form-data; boundary=first",
        "multipart/form-data",
    ]);
    let mut preview = MultipartPreview::with_encoder(encoder);
    let form = sample_form();

    preview.encode(&form).await.unwrap();
    let events = event_log(&mut preview);

    let outcome = preview.encode_with_outcome(&form).await.unwrap();

    assert_eq!(outcome.boundary, None);
    assert_eq!(preview.content_type(), "multipart/form-data");
    assert_eq!(preview.boundary(), "first");
    assert_eq!(
        *events.lock().unwrap(),
        vec![MultipartEvent::ContentTypeChanged("multipart/form-data".to_string())]
    );
}

#[tokio::test]
async fn test_second_encode_supersedes_first() {
    let encoder = RecordingEncoder::with_content_types(&[
        "multipart/form-data; boundary=one",
        "multipart/form-data; boundary=two",
    ]);
    let mut preview = MultipartPreview::with_encoder(encoder);

    let content_types = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&content_types);
    preview.on_content_type_changed(move |value| sink.lock().unwrap().push(value.to_string()));

    let mut first = FormData::new();
    first.append_text("a", "1");
    let mut second = FormData::new();
    second.append_text("b", "2");

    preview.encode(&first).await.unwrap();
    preview.encode(&second).await.unwrap();

    assert_eq!(preview.content_type(), "multipart/form-data; boundary=two");
    assert_eq!(preview.boundary(), "two");
    assert_eq!(
        *content_types.lock().unwrap(),
        vec![
            "multipart/form-data; boundary=one".to_string(),
            "multipart/form-data; boundary=two".to_string(),
        ]
    );
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_failed_encode_publishes_nothing() {
    let encoder = RecordingEncoder::failing();
    let mut preview = MultipartPreview::with_encoder(encoder.clone());
    let events = event_log(&mut preview);

    let err = preview.encode(&sample_form()).await.unwrap_err();

    assert!(err.is_unsupported());
    assert_eq!(encoder.calls(), 1);
    assert_eq!(preview.content_type(), "");
    assert_eq!(preview.boundary(), "");
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_preview_without_form_data_skips_encoder() {
    let encoder = RecordingEncoder::with_content_types(&["multipart/form-data; boundary=x"]);
    let mut preview = MultipartPreview::with_encoder(encoder.clone());
    let events = event_log(&mut preview);

    let err = preview.preview().await.unwrap_err();
    assert!(matches!(err, FormError::PreconditionFailed(_)));

    let err = preview.preview_form(None).await.unwrap_err();
    assert!(err.is_precondition());

    assert_eq!(encoder.calls(), 0);
    assert!(events.lock().unwrap().is_empty());
}

// ============================================================================
// Preview
// ============================================================================

#[tokio::test]
async fn test_preview_decodes_body() {
    let encoder = RecordingEncoder::with_content_types(&[
        "multipart/form-data; boundary=x",
        "multipart/form-data; boundary=y",
    ]);
    let mut preview = MultipartPreview::with_encoder(encoder.clone());

    preview.set_form_data(sample_form());
    assert_eq!(preview.preview().await.unwrap(), "--x\r\n");
    assert_eq!(preview.boundary(), "x");

    let form = sample_form();
    assert_eq!(preview.preview_form(Some(&form)).await.unwrap(), "--x\r\n");
    assert_eq!(preview.boundary(), "y");
    assert_eq!(encoder.calls(), 2);
}
