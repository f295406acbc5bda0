//! HTTP surface for the inventory item store.
//!
//! # Responsibility
//! - Expose the six item endpoints plus a health probe.
//! - Map service outcomes to status codes and `{"detail": ...}` bodies.
//!
//! # Invariants
//! - Handlers hold no item state; every request opens and drops its own
//!   database connection.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
