//! Web API module for filegate.
//!
//! Exposes the three storage operations (upload, list, delete) over
//! HTTP, plus static retrieval of stored files and the Swagger UI.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
