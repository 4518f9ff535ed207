//! Common utilities for formpart
//!
//! This crate provides the HTTP vocabulary shared across the formpart crates.

pub mod http;

pub use http::{HttpMethod, HttpRequestLike, CONTENT_LENGTH, CONTENT_TYPE};
