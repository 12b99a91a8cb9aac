//! HTTP server module
//!
//! - Axum router and middleware
//! - Handlers for the upload page and subtitle generation
//! - The single HTML page

pub mod handlers;
pub mod page;
pub mod routes;

pub use routes::create_router;
