//! Tag relay GitHub infrastructure adapter.
//!
//! Implements the port traits defined in the [`pipeline`] crate over plain
//! HTTPS:
//!
//! - [`RawContentFetcher`] implements [`pipeline::ContentFetcher`] against the
//!   raw content host (`raw.githubusercontent.com`).
//! - [`DispatchClient`] implements [`pipeline::DispatchSender`] against the
//!   REST `repository_dispatch` endpoint.
//!
//! Both share one pooled [`reqwest::Client`] built by [`build_http_client`].
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. URL layout,
//! headers, status-code interpretation and transport error classification
//! live here; the [`pipeline`] crate never sees them.

pub mod client;
pub mod content;
pub mod dispatch;

pub use client::{
    build_http_client, ClientBuildError, DEFAULT_API_URL, DEFAULT_RAW_URL, DEFAULT_TIMEOUT,
    USER_AGENT,
};
pub use content::RawContentFetcher;
pub use dispatch::DispatchClient;
