//! Tag relay inbound HTTP surface.
//!
//! Exposes two routes over [`axum`]:
//!
//! | Route | Method | Purpose |
//! |-------|--------|---------|
//! | `/dispatch` | `POST` | Deployment-completion webhook; drives [`pipeline::Relay`] |
//! | `/health` | `GET` | Liveness/readiness probe; no dependencies |
//!
//! Any other method on `/dispatch` is answered with 405.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Body decoding, status-code mapping and server lifecycle
//! live here. Business rules stay in [`pipeline`].

pub mod handlers;
pub mod response;
pub mod routes;
pub mod server;

pub use response::{ApiError, DispatchResponse, ErrorResponse, HealthResponse};
pub use routes::create_router;
pub use server::{serve, serve_with_shutdown, shutdown_signal, ListenerError};
