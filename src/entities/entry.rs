//! Entry entity - One recorded income or expense ("lançamento").
//!
//! `kind` and `payment_method` are stored as their display codes and parsed back
//! into [`crate::models::EntryKind`] / [`crate::models::PaymentMethod`] by the
//! core layer. `owner_name` is copied from the profile when the row is created
//! and never refreshed afterwards.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lancamentos")]
pub struct Model {
    /// Opaque identifier assigned by the store layer on creation
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Non-empty description
    pub description: String,
    /// Strictly positive amount
    pub amount: f64,
    /// Calendar date of the entry (no time of day)
    pub date: Date,
    /// `"receita"` or `"despesa"`
    pub kind: String,
    /// Payment method label, e.g. `"PIX"`
    pub payment_method: String,
    /// Identity-provider id of the user who created the entry
    pub owner_id: String,
    /// Owner display name at creation time
    pub owner_name: Option<String>,
    /// Expense category; always `None` for income
    pub category: Option<String>,
    /// Insertion time, used as a stable tiebreaker when listing
    pub created_at: DateTimeUtc,
}

/// Entries carry no foreign keys: the owner lives in the identity provider
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
