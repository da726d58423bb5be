//! Autocomplete handlers for Discord slash command parameters.
//!
//! This module suggests entry kinds, payment methods and the categories a user has
//! already recorded, so the free-text parameters of `/lancamento` stay consistent.

use crate::{
    bot::BotData,
    core::entry,
    errors::Error,
    models::{EntryKind, PaymentMethod},
};
use tracing::warn;

/// Discord shows at most this many suggestions
const MAX_SUGGESTIONS: usize = 25;

/// Keeps the options containing `partial`, ignoring case.
#[must_use]
pub fn filter_options<I>(options: I, partial: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let partial_lower = partial.to_lowercase();
    options
        .into_iter()
        .filter(|option| option.to_lowercase().contains(&partial_lower))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Suggests "despesa" / "receita".
pub async fn autocomplete_entry_kind(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_options(EntryKind::ALL.iter().map(|k| k.code().to_string()), partial)
}

/// Suggests payment method labels.
pub async fn autocomplete_payment_method(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_options(PaymentMethod::ALL.iter().map(|m| m.label().to_string()), partial)
}

/// Suggests the expense categories the author has used before.
pub async fn autocomplete_category(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;
    let owner_id = ctx.author().id.to_string();

    match entry::known_categories(db, &owner_id).await {
        Ok(categories) => {
            let mut matching = filter_options(categories, partial);
            matching.sort();
            matching
        }
        Err(e) => {
            warn!("Category autocomplete failed for {}: {}", owner_id, e);
            Vec::new()
        }
    }
}
