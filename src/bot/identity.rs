//! Identity provider backed by the Discord account invoking a command.
//!
//! Discord has already authenticated the author by the time a command runs, so
//! signing in cannot be cancelled and never fails; the provider only reports who
//! the author is.

use crate::{
    auth::{IdentityProvider, ProviderUser},
    config::users,
    errors::Result,
};
use poise::serenity_prelude as serenity;

/// Display name for an account: configured nickname, else global name, else user name.
#[must_use]
pub fn resolve_display_name(
    nickname: Option<String>,
    global_name: Option<&str>,
    user_name: &str,
) -> String {
    nickname
        .or_else(|| global_name.map(ToString::to_string))
        .unwrap_or_else(|| user_name.to_string())
}

/// The command author as an identity provider user.
#[derive(Debug, Clone)]
pub struct DiscordIdentity {
    user: ProviderUser,
}

impl DiscordIdentity {
    /// Builds the identity of `author`.
    #[must_use]
    pub fn from_author(author: &serenity::User) -> Self {
        let uid = author.id.to_string();
        let display_name = resolve_display_name(
            users::get_nickname(&uid),
            author.global_name.as_deref(),
            &author.name,
        );
        Self {
            user: ProviderUser {
                uid,
                display_name: Some(display_name),
                // Discord does not share e-mail addresses with bots
                email: None,
            },
        }
    }
}

impl IdentityProvider for DiscordIdentity {
    async fn sign_in(&self) -> Result<ProviderUser> {
        Ok(self.user.clone())
    }

    async fn sign_out(&self) -> Result<()> {
        Ok(())
    }
}
