//! Shared test utilities for `FinanceBuddy`.
//!
//! This module provides helpers for setting up test databases, building entries with
//! sensible defaults, and stand-ins for the identity provider and chart renderer.

use crate::{
    auth::{IdentityProvider, ProviderUser},
    core::entry,
    core::report::{CategoryTotals, MonthlyTotals},
    errors::{Error, Result},
    models::{AuthenticatedUser, EntryKind, FinancialEntry, NewEntry, PaymentMethod},
    ui::chart::{ChartHandle, ChartRenderer},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all store-backed tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Connects to an in-memory database without creating any table, so every query fails.
pub async fn setup_broken_db() -> Result<DatabaseConnection> {
    Ok(sea_orm::Database::connect("sqlite::memory:").await?)
}

/// Builds a new entry with sensible defaults.
///
/// # Defaults
/// * `description`: `"Test entry"`
/// * `date`: 2026-10-01
/// * `payment_method`: PIX
/// * `owner_name`: `"Test User"`
/// * `category`: `"Test"` for expenses, none for income
#[must_use]
pub fn test_new_entry(owner_id: &str, kind: EntryKind, amount: f64) -> NewEntry {
    NewEntry {
        description: "Test entry".to_string(),
        amount,
        date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap_or_default(),
        kind,
        payment_method: PaymentMethod::Pix,
        owner_id: owner_id.to_string(),
        owner_name: Some("Test User".to_string()),
        category: match kind {
            EntryKind::Expense => Some("Test".to_string()),
            EntryKind::Income => None,
        },
    }
}

/// Stores a default entry dated `year-month-day` and returns its id.
pub async fn create_dated_entry(
    db: &DatabaseConnection,
    owner_id: &str,
    kind: EntryKind,
    amount: f64,
    year: i32,
    month: u32,
    day: u32,
) -> Result<String> {
    let mut new_entry = test_new_entry(owner_id, kind, amount);
    new_entry.date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| Error::InvalidEntry {
        message: format!("bad test date {year}-{month}-{day}"),
    })?;
    entry::create_entry(db, new_entry).await
}

/// Builds an in-memory entry for the aggregation tests.
#[must_use]
pub fn sample_entry(
    kind: EntryKind,
    amount: f64,
    category: Option<&str>,
    date: NaiveDate,
) -> FinancialEntry {
    FinancialEntry {
        id: format!("sample-{amount}"),
        description: "Sample".to_string(),
        amount,
        date,
        kind,
        payment_method: PaymentMethod::Cash,
        owner_id: "sample_owner".to_string(),
        owner_name: None,
        category: category.map(ToString::to_string),
        created_at: chrono::Utc::now(),
    }
}

/// Builds a provider-side user record.
#[must_use]
pub fn provider_user(uid: &str, display_name: Option<&str>, email: Option<&str>) -> ProviderUser {
    ProviderUser {
        uid: uid.to_string(),
        display_name: display_name.map(ToString::to_string),
        email: email.map(ToString::to_string),
    }
}

/// Builds a signed-in user without going through the bridge.
#[must_use]
pub fn test_user(id: &str, display_name: Option<&str>) -> AuthenticatedUser {
    AuthenticatedUser {
        id: id.to_string(),
        display_name: display_name.map(ToString::to_string),
        email: None,
    }
}

/// Identity provider that replays a fixed sign-in result.
#[derive(Debug, Clone)]
pub enum ScriptedIdentity {
    /// Sign-in succeeds with this user
    SignedIn(ProviderUser),
    /// The user closes the sign-in flow
    Cancelled,
    /// The provider reports an error
    Failing,
}

impl ScriptedIdentity {
    #[must_use]
    pub fn signed_in(uid: &str, display_name: &str) -> Self {
        Self::SignedIn(provider_user(uid, Some(display_name), None))
    }

    #[must_use]
    pub const fn cancelled() -> Self {
        Self::Cancelled
    }

    #[must_use]
    pub const fn failing() -> Self {
        Self::Failing
    }
}

impl IdentityProvider for ScriptedIdentity {
    async fn sign_in(&self) -> Result<ProviderUser> {
        match self {
            Self::SignedIn(user) => Ok(user.clone()),
            Self::Cancelled => Err(Error::SignInCancelled),
            Self::Failing => Err(Error::Auth {
                message: "provider unavailable".to_string(),
            }),
        }
    }

    async fn sign_out(&self) -> Result<()> {
        match self {
            Self::Failing => Err(Error::Auth {
                message: "provider unavailable".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// Chart handle that reports its destruction to the renderer that made it.
#[derive(Debug)]
pub struct RecordingHandle {
    live: Arc<AtomicUsize>,
}

impl ChartHandle for RecordingHandle {
    fn destroy(self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Renderer counting the charts it created and the ones still alive.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    created: Arc<AtomicUsize>,
    live: Arc<AtomicUsize>,
    fail: bool,
}

impl RecordingRenderer {
    /// A renderer whose every draw fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Charts created so far.
    #[must_use]
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    /// Charts created and not yet destroyed.
    #[must_use]
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    fn draw(&self) -> Result<RecordingHandle> {
        if self.fail {
            return Err(Error::Chart {
                message: "canvas unavailable".to_string(),
            });
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(RecordingHandle {
            live: Arc::clone(&self.live),
        })
    }
}

impl ChartRenderer for RecordingRenderer {
    type Handle = RecordingHandle;

    fn render_pie(&self, _data: &CategoryTotals) -> Result<RecordingHandle> {
        self.draw()
    }

    fn render_bar(&self, _data: &MonthlyTotals) -> Result<RecordingHandle> {
        self.draw()
    }
}
