//! Core business logic - framework-agnostic entry, profile and reporting operations.

/// Entry data access (create, list, update, delete)
pub mod entry;
/// User profile reads and merges
pub mod profile;
/// Dashboard aggregation
pub mod report;
