//! formpart: multipart/form-data encoding and preview
//!
//! Turns form data into a `multipart/form-data` body without framing the
//! multipart message itself: the body and its Content-Type header are taken
//! from reqwest's request encoder, and the boundary is read back from that
//! header.
//!
//! # Architecture
//!
//! - `FormData`: ordered multimap of text and blob fields
//! - `MultipartEncoder`: encoder seam; `NativeEncoder` is the reqwest-backed one
//! - `MultipartPreview`: publishes content type and boundary, notifies listeners
//! - `decode`: binary-to-text decoding for previews
//!
//! Shared HTTP types live in `formpart-common`.

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod events;
pub mod form_data;
pub mod preview;
pub mod request;

pub use config::EncoderConfig;
pub use decoder::{decode, BinaryInput, DecodeStrategy, Decoder};
pub use encoder::{MultipartEncoder, NativeEncoder};
pub use error::{ErrorCategory, FormError, FormResult};
pub use events::{MultipartEvent, BOUNDARY_CHANGED, CONTENT_TYPE_CHANGED};
pub use form_data::{Blob, FormData, FormValue};
pub use preview::{EncodeOutcome, MultipartPreview};
pub use request::{closing_delimiter, extract_boundary, EncodedMessage};

pub use formpart_common::{HttpMethod, HttpRequestLike};
