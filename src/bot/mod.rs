//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the FinanceBuddy application,
//! including all slash commands, autocomplete handlers, per-user sessions and the
//! framework bootstrap.

/// Discord command implementations (auth, entries, dashboard, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;
/// Discord-backed identity provider
pub mod identity;

use crate::{
    config::AppConfig,
    errors::{Error, Result},
    ui::{ClientSession, TextChartRenderer},
};
use chrono::NaiveDate;
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};

/// Session type every Discord user gets.
pub type UserSession = ClientSession<TextChartRenderer>;

/// Client sessions keyed by Discord user id.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<UserSession>>>,
}

impl SessionRegistry {
    /// Returns the user's session, creating a signed-out one on first use.
    pub async fn get_or_create(
        &self,
        user_id: &str,
        database: &DatabaseConnection,
        config: &AppConfig,
        today: NaiveDate,
    ) -> Arc<UserSession> {
        if let Some(session) = self.sessions.read().await.get(user_id) {
            return Arc::clone(session);
        }

        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(user_id.to_string()).or_insert_with(|| {
            debug!("Creating client session for {}", user_id);
            Arc::new(ClientSession::new(
                database.clone(),
                TextChartRenderer::new(&config.dashboard),
                config.dashboard.clone(),
                today,
            ))
        });
        Arc::clone(session)
    }

    /// Number of sessions created so far.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// True before any user has interacted with the bot.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Shared data available to all bot commands.
/// This structure holds the database connection, the loaded settings and the
/// per-user sessions that commands need to access.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Settings loaded at startup
    pub config: Arc<AppConfig>,
    /// One client session per Discord user
    pub sessions: SessionRegistry,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection and settings.
    #[must_use]
    pub fn new(database: DatabaseConnection, config: Arc<AppConfig>) -> Self {
        Self {
            database,
            config,
            sessions: SessionRegistry::default(),
        }
    }

    /// The invoking user's session.
    pub async fn session_for(&self, user_id: &str, today: NaiveDate) -> Arc<UserSession> {
        self.sessions
            .get_or_create(user_id, &self.database, &self.config, today)
            .await
    }
}

/// Poise context used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Current local date, used as "today" by forms and dashboards.
#[must_use]
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ Ocorreu um erro: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework and runs the Discord client until it stops.
#[instrument(skip_all)]
pub async fn run_bot(
    token: String,
    config: Arc<AppConfig>,
    database: DatabaseConnection,
) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::login(),
                commands::logout(),
                commands::lancamento(),
                commands::dashboard(),
                commands::ping(),
                commands::help(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(database, config))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}
