//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions that are not commands
//! themselves, such as parameter autocomplete.

/// Autocomplete handlers for entry kinds, payment methods and categories
pub mod autocomplete;
