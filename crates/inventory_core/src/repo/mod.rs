//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the item store contract.
//! - Isolate SQLite query details from the service layer.
//!
//! # Invariants
//! - Repository writes call `ItemDraft::validate()` before SQL mutations.
//! - "Not found" is an absent result; only storage faults are errors.

pub mod item_repo;
