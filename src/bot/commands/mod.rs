//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Sign-in and sign-out commands
pub mod auth;

/// Dashboard command and message layout
pub mod dashboard;

/// Entry recording command
pub mod entry;

/// General utility commands
pub mod general;

// Export commands
pub use auth::*;
pub use dashboard::*;
pub use entry::*;
pub use general::*;
