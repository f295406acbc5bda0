//! Core use-case services.
//!
//! # Responsibility
//! - Give the item store a validated, well-typed boundary.
//! - Keep HTTP/UI layers decoupled from storage details.

pub mod item_service;
