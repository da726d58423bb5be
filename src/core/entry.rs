//! Entry data access - create, read, update and delete "lançamentos".
//!
//! Every write validates what it stores: amounts must be finite and greater than zero,
//! descriptions must not be blank, and income never carries a category. Errors from the
//! store are returned to the caller untouched; nothing here retries.

use crate::{
    entities::{Entry, entry},
    errors::{Error, Result},
    models::{EntryKind, EntryPatch, FinancialEntry, NewEntry, normalize_category},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};
use uuid::Uuid;

fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidEntry {
            message: "description cannot be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

fn into_entries(models: Vec<entry::Model>) -> Result<Vec<FinancialEntry>> {
    models.into_iter().map(FinancialEntry::try_from).collect()
}

/// Returns every entry in the collection, oldest date first.
///
/// This is a full scan with no owner filter; the dashboard uses
/// [`list_entries_for_owner`] instead.
pub async fn list_entries<C>(db: &C) -> Result<Vec<FinancialEntry>>
where
    C: ConnectionTrait,
{
    let models = Entry::find()
        .order_by_asc(entry::Column::Date)
        .order_by_asc(entry::Column::CreatedAt)
        .all(db)
        .await?;
    debug!("Fetched {} entries", models.len());
    into_entries(models)
}

/// Returns the entries created by `owner_id`, oldest date first.
///
/// The owner filter runs in the store, so other users' entries never leave it.
pub async fn list_entries_for_owner<C>(db: &C, owner_id: &str) -> Result<Vec<FinancialEntry>>
where
    C: ConnectionTrait,
{
    let models = Entry::find()
        .filter(entry::Column::OwnerId.eq(owner_id))
        .order_by_asc(entry::Column::Date)
        .order_by_asc(entry::Column::CreatedAt)
        .all(db)
        .await?;
    debug!("Fetched {} entries for owner {}", models.len(), owner_id);
    into_entries(models)
}

/// Finds a single entry by id.
pub async fn get_entry<C>(db: &C, id: &str) -> Result<Option<FinancialEntry>>
where
    C: ConnectionTrait,
{
    Entry::find_by_id(id.to_string())
        .one(db)
        .await?
        .map(FinancialEntry::try_from)
        .transpose()
}

/// Inserts a new entry and returns the identifier assigned to it.
///
/// The category is dropped for income and stored as absent when blank.
#[instrument(skip(db, new_entry), fields(owner_id = %new_entry.owner_id))]
pub async fn create_entry<C>(db: &C, new_entry: NewEntry) -> Result<String>
where
    C: ConnectionTrait,
{
    validate_amount(new_entry.amount)?;
    let description = validate_description(&new_entry.description)?;

    let category = match new_entry.kind {
        EntryKind::Income => None,
        EntryKind::Expense => normalize_category(new_entry.category.as_deref()),
    };

    let id = Uuid::new_v4().simple().to_string();
    let model = entry::ActiveModel {
        id: Set(id.clone()),
        description: Set(description),
        amount: Set(new_entry.amount),
        date: Set(new_entry.date),
        kind: Set(new_entry.kind.code().to_string()),
        payment_method: Set(new_entry.payment_method.label().to_string()),
        owner_id: Set(new_entry.owner_id),
        owner_name: Set(new_entry.owner_name),
        category: Set(category),
        created_at: Set(chrono::Utc::now()),
    };

    model.insert(db).await?;
    info!("Entry added with ID: {}", id);
    Ok(id)
}

/// Applies a partial update to an existing entry.
///
/// Changing the kind to income clears any stored category.
#[instrument(skip(db, patch))]
pub async fn update_entry<C>(db: &C, id: &str, patch: EntryPatch) -> Result<FinancialEntry>
where
    C: ConnectionTrait,
{
    let existing = Entry::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::EntryNotFound { id: id.to_string() })?;

    let kind = match patch.kind {
        Some(kind) => kind,
        None => existing.kind.parse()?,
    };

    let mut active: entry::ActiveModel = existing.into();

    if let Some(description) = patch.description {
        active.description = Set(validate_description(&description)?);
    }
    if let Some(amount) = patch.amount {
        validate_amount(amount)?;
        active.amount = Set(amount);
    }
    if let Some(date) = patch.date {
        active.date = Set(date);
    }
    if let Some(method) = patch.payment_method {
        active.payment_method = Set(method.label().to_string());
    }
    if patch.kind.is_some() {
        active.kind = Set(kind.code().to_string());
    }
    if kind == EntryKind::Income {
        active.category = Set(None);
    } else if let Some(category) = patch.category {
        active.category = Set(normalize_category(category.as_deref()));
    }

    let updated = active.update(db).await?;
    info!("Entry updated for ID: {}", id);
    FinancialEntry::try_from(updated)
}

/// Removes an entry.
#[instrument(skip(db))]
pub async fn delete_entry<C>(db: &C, id: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Entry::delete_by_id(id.to_string()).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::EntryNotFound { id: id.to_string() });
    }
    info!("Entry deleted with ID: {}", id);
    Ok(())
}

/// Distinct expense categories the owner has used, in first-use order.
pub async fn known_categories<C>(db: &C, owner_id: &str) -> Result<Vec<String>>
where
    C: ConnectionTrait,
{
    let models = Entry::find()
        .filter(entry::Column::OwnerId.eq(owner_id))
        .filter(entry::Column::Kind.eq(EntryKind::Expense.code()))
        .filter(entry::Column::Category.is_not_null())
        .order_by_asc(entry::Column::CreatedAt)
        .all(db)
        .await?;

    let mut categories: Vec<String> = Vec::new();
    for category in models.into_iter().filter_map(|m| m.category) {
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    Ok(categories)
}
