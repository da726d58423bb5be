//! Session Discord commands - `login` and `logout`.
//!
//! Both commands act on the author's own client session; the bridge inside it
//! notifies the form and the dashboard.

use crate::{auth::bridge::SIGN_OUT_FAILED_ALERT, errors::Result};

/// Reply text for a `/logout` attempt.
#[must_use]
pub fn sign_out_reply(result: &Result<()>) -> String {
    match result {
        Ok(()) => "👋 Você saiu da sua conta.".to_string(),
        Err(_) => format!("❌ {SIGN_OUT_FAILED_ALERT}"),
    }
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::sign_out_reply;
    use crate::{
        auth::bridge::sign_in_alert,
        bot::{BotData, commands::login_message, identity::DiscordIdentity, today},
        errors::{Error, Result},
    };

    /// Signs you in with your Discord account and shows your dashboard.
    #[poise::command(slash_command, prefix_command)]
    pub async fn login(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let author_id = ctx.author().id.to_string();
        let session = ctx.data().session_for(&author_id, today()).await;

        if let Some(user) = session.current_user() {
            ctx.say(format!("ℹ️ Você já está logado como {}.", user.label()))
                .await?;
            return Ok(());
        }

        let provider = DiscordIdentity::from_author(ctx.author());
        let user = match session.sign_in(&provider, today()).await {
            Ok(user) => user,
            Err(e) => {
                ctx.say(format!("❌ {}", sign_in_alert(&e))).await?;
                return Ok(());
            }
        };

        let reply = session
            .dashboard()
            .with_view(|view| login_message(user.label(), view))?;
        ctx.say(reply).await?;
        Ok(())
    }

    /// Signs you out and clears your dashboard.
    #[poise::command(slash_command, prefix_command)]
    pub async fn logout(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let author_id = ctx.author().id.to_string();
        let session = ctx.data().session_for(&author_id, today()).await;

        if session.current_user().is_none() {
            ctx.say("ℹ️ Você não está logado.").await?;
            return Ok(());
        }

        let provider = DiscordIdentity::from_author(ctx.author());
        let result = session.sign_out(&provider).await;
        ctx.say(sign_out_reply(&result)).await?;
        Ok(())
    }
}

pub use inner::*;
