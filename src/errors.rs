//! Unified error type for `FinanceBuddy`.
//!
//! Field-level form validation is not represented here: it lives as inline
//! form state (see [`crate::ui::form::FieldError`]) and only blocks submission.

use poise::serenity_prelude as serenity;
use thiserror::Error;

/// Every failure a store, provider, renderer or the Discord transport can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Startup or configuration problem (missing file, bad TOML, bad env)
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description
        message: String,
    },

    /// Any failure reported by the document store
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Amount was zero, negative, NaN or infinite
    #[error("Invalid amount: {amount} (must be a finite value greater than zero)")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Entry content that cannot be stored or read back
    #[error("Invalid entry: {message}")]
    InvalidEntry {
        /// What was wrong with it
        message: String,
    },

    /// Update or delete addressed an id the store does not hold
    #[error("Entry not found: {id}")]
    EntryNotFound {
        /// The missing identifier
        id: String,
    },

    /// The identity provider refused or failed a sign-in / sign-out
    #[error("Authentication error: {message}")]
    Auth {
        /// Provider-supplied detail
        message: String,
    },

    /// The user abandoned an interactive sign-in
    #[error("Sign-in was cancelled by the user")]
    SignInCancelled,

    /// A view that needs a signed-in user was opened while signed out
    #[error("{message}")]
    LoginRequired {
        /// Prompt shown to the user
        message: String,
    },

    /// A chart could not be drawn
    #[error("Chart rendering error: {message}")]
    Chart {
        /// Renderer-supplied detail
        message: String,
    },

    /// Writing formatted text into a buffer failed
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise transport error
    #[error("Discord framework error: {0}")]
    Framework(Box<serenity::Error>),
}

impl From<serenity::Error> for Error {
    fn from(value: serenity::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
