//! Core engine for the field-service operations console.
//!
//! The crate owns the service-request record model and the pure logic
//! around it (filtering, ordering, billing derivation, visibility and
//! audit policy). Persistence, notification, and map rendering are
//! collaborator traits the embedding application implements.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
