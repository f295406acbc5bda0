//! Domain model for inventory records.
//!
//! # Invariants
//! - Item ids are dense: the stored set is always `1..=N`.
//! - Ids are positional handles, not stable identities; a delete shifts
//!   every later id down by one.

pub mod item;
