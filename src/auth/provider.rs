//! Identity provider seam.
//!
//! Anything that can sign a user in interactively and sign them out again can back
//! the [`super::AuthBridge`]. The Discord surface implements this with the command
//! author's account; tests use scripted providers.

use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// The user handle an identity provider hands back after sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderUser {
    /// Stable provider-side user id
    pub uid: String,
    /// Display name the provider knows, if any
    pub display_name: Option<String>,
    /// Email the provider knows, if any
    pub email: Option<String>,
}

/// External identity service.
///
/// Failures are reported as [`crate::errors::Error::Auth`], or
/// [`crate::errors::Error::SignInCancelled`] when the user abandoned the flow.
pub trait IdentityProvider: Send + Sync {
    /// Runs the interactive sign-in and returns the signed-in user.
    fn sign_in(&self) -> impl Future<Output = Result<ProviderUser>> + Send;

    /// Ends the provider session.
    fn sign_out(&self) -> impl Future<Output = Result<()>> + Send;
}
