//! Service layer owning the in-memory to-do collection.
//! - Separates collection handling from the HTTP boundary.
//! - Reuses validation and domain types from the `models` crate.
//! - Provides clear error types for the boundary layer to map.

pub mod errors;
pub mod storage;
