//! The bridge between provider sessions and subscribed components.
//!
//! The bridge is the only writer of the current [`AuthenticatedUser`]; subscribers
//! only ever read it through their callbacks. A new subscriber immediately receives
//! the current state, then every later change.

use crate::{
    auth::{
        provider::{IdentityProvider, ProviderUser},
        subscription::{Listeners, Subscription},
    },
    core::profile,
    errors::{Error, Result},
    models::AuthenticatedUser,
};
use sea_orm::DatabaseConnection;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info, instrument, warn};

/// Alert shown when the user closed the sign-in flow.
pub const SIGN_IN_CANCELLED_ALERT: &str = "A janela de login foi fechada. Tente novamente.";
/// Alert shown for any other sign-in failure.
pub const SIGN_IN_FAILED_ALERT: &str = "Ocorreu um erro durante o login. Tente novamente.";
/// Alert shown when sign-out fails.
pub const SIGN_OUT_FAILED_ALERT: &str = "Ocorreu um erro ao sair. Tente novamente.";

/// Picks the user-facing alert for a failed sign-in.
#[must_use]
pub fn sign_in_alert(error: &Error) -> &'static str {
    match error {
        Error::SignInCancelled => SIGN_IN_CANCELLED_ALERT,
        _ => SIGN_IN_FAILED_ALERT,
    }
}

/// Session state shared with every subscribed component.
pub struct AuthBridge {
    database: DatabaseConnection,
    current: Mutex<Option<AuthenticatedUser>>,
    listeners: Listeners<Option<AuthenticatedUser>>,
}

impl AuthBridge {
    /// Creates a signed-out bridge backed by `database` for profile records.
    #[must_use]
    pub fn new(database: DatabaseConnection) -> Self {
        Self {
            database,
            current: Mutex::new(None),
            listeners: Listeners::new(),
        }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<AuthenticatedUser> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Registers `callback` for session changes and replays the current state to it.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Option<AuthenticatedUser>) + Send + Sync + 'static,
    {
        let callback = Arc::new(callback);
        callback(&self.current_user());
        self.listeners.subscribe_shared(callback)
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Entry point for provider session notifications.
    ///
    /// `Some` resolves the user's profile and publishes the signed-in user;
    /// `None` publishes the signed-out state.
    pub async fn handle_session_change(
        &self,
        provider_user: Option<ProviderUser>,
    ) -> Option<AuthenticatedUser> {
        let resolved = match provider_user {
            Some(user) => Some(self.resolve_user(user).await),
            None => None,
        };
        self.publish(resolved.clone());
        resolved
    }

    /// Signs in through `provider`, mirrors the profile, then publishes the user.
    #[instrument(skip_all)]
    pub async fn sign_in<P>(&self, provider: &P) -> Result<AuthenticatedUser>
    where
        P: IdentityProvider,
    {
        let provider_user = provider.sign_in().await.inspect_err(|e| {
            error!("Sign-in error: {}", e);
        })?;

        self.update_user_data(&provider_user).await;
        info!("Sign-in successful for {}", provider_user.uid);

        let user = self.resolve_user(provider_user).await;
        self.publish(Some(user.clone()));
        Ok(user)
    }

    /// Signs out through `provider`, then publishes the signed-out state.
    #[instrument(skip_all)]
    pub async fn sign_out<P>(&self, provider: &P) -> Result<()>
    where
        P: IdentityProvider,
    {
        provider.sign_out().await.inspect_err(|e| {
            error!("Sign out error: {}", e);
        })?;

        info!("User signed out successfully");
        self.publish(None);
        Ok(())
    }

    fn publish(&self, user: Option<AuthenticatedUser>) {
        {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            current.clone_from(&user);
        }
        self.listeners.notify(&user);
    }

    /// Creates or merges the profile record; failures are logged, never fatal.
    async fn update_user_data(&self, user: &ProviderUser) {
        if let Err(e) = profile::merge_profile(
            &self.database,
            &user.uid,
            user.display_name.clone(),
            user.email.clone(),
        )
        .await
        {
            error!("Error updating user data for {}: {}", user.uid, e);
        }
    }

    /// Stored profile first, provider fields as fallback.
    async fn resolve_user(&self, user: ProviderUser) -> AuthenticatedUser {
        match profile::get_profile(&self.database, &user.uid).await {
            Ok(Some(stored)) => AuthenticatedUser {
                display_name: stored.display_name.or(user.display_name),
                email: stored.email.or(user.email),
                id: user.uid,
            },
            Ok(None) => {
                self.update_user_data(&user).await;
                into_authenticated(user)
            }
            Err(e) => {
                warn!(
                    "Error fetching profile for {}, using provider data: {}",
                    user.uid, e
                );
                into_authenticated(user)
            }
        }
    }
}

fn into_authenticated(user: ProviderUser) -> AuthenticatedUser {
    AuthenticatedUser {
        id: user.uid,
        display_name: user.display_name,
        email: user.email,
    }
}
