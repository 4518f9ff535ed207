//! Change notifications published by the preview component

use serde::{Deserialize, Serialize};

/// Name of the event fired on every successful encode
pub const CONTENT_TYPE_CHANGED: &str = "content-type-changed";

/// Name of the event fired when an encode yields a boundary
pub const BOUNDARY_CHANGED: &str = "multipart-boundary-changed";

/// A change to published component state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum MultipartEvent {
    /// New Content-Type header value
    #[serde(rename = "content-type-changed")]
    ContentTypeChanged(String),
    /// New boundary token
    #[serde(rename = "multipart-boundary-changed")]
    BoundaryChanged(String),
}

impl MultipartEvent {
    /// Event name
    pub fn name(&self) -> &'static str {
        match self {
            MultipartEvent::ContentTypeChanged(_) => CONTENT_TYPE_CHANGED,
            MultipartEvent::BoundaryChanged(_) => BOUNDARY_CHANGED,
        }
    }

    /// String payload carried by the event
    pub fn payload(&self) -> &str {
        match self {
            MultipartEvent::ContentTypeChanged(value) | MultipartEvent::BoundaryChanged(value) => {
                value
            }
        }
    }
}

/// Listener invoked for every event
pub type EventListener = Box<dyn Fn(&MultipartEvent) + Send + Sync>;

/// Listener invoked with the payload of one event kind
pub type ValueListener = Box<dyn Fn(&str) + Send + Sync>;

/// Registered listeners, dispatched in registration order
#[derive(Default)]
pub(crate) struct Listeners {
    any: Vec<EventListener>,
    content_type: Vec<ValueListener>,
    boundary: Vec<ValueListener>,
}

impl Listeners {
    pub(crate) fn on_event(&mut self, listener: EventListener) {
        self.any.push(listener);
    }

    pub(crate) fn on_content_type(&mut self, listener: ValueListener) {
        self.content_type.push(listener);
    }

    pub(crate) fn on_boundary(&mut self, listener: ValueListener) {
        self.boundary.push(listener);
    }

    pub(crate) fn len(&self) -> usize {
        self.any.len() + self.content_type.len() + self.boundary.len()
    }

    pub(crate) fn emit(&self, event: &MultipartEvent) {
        for listener in &self.any {
            listener(event);
        }

        let kind = match event {
            MultipartEvent::ContentTypeChanged(_) => &self.content_type,
            MultipartEvent::BoundaryChanged(_) => &self.boundary,
        };
        for listener in kind {
            listener(event.payload());
        }
    }
}
