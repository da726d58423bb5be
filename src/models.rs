//! Domain types shared by the core, the components and the bot layer.

use crate::{
    entities::entry,
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Income or expense classification of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Money received ("receita")
    Income,
    /// Money spent ("despesa")
    Expense,
}

impl EntryKind {
    /// Both kinds, in the order a picker lists them.
    pub const ALL: [Self; 2] = [Self::Expense, Self::Income];

    /// Code written to the store.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Income => "receita",
            Self::Expense => "despesa",
        }
    }

    /// Label shown to users.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Income => "Receita",
            Self::Expense => "Despesa",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for EntryKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "receita" | "income" => Ok(Self::Income),
            "despesa" | "expense" => Ok(Self::Expense),
            other => Err(Error::InvalidEntry {
                message: format!("unknown entry kind '{other}'"),
            }),
        }
    }
}

/// How an entry was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// "Cartão de Crédito"
    CreditCard,
    /// "Boleto" (invoice slip)
    Boleto,
    /// "PIX" (instant transfer)
    Pix,
    /// "Dinheiro"
    Cash,
    /// "Transferência Bancária"
    BankTransfer,
    /// "Outro"
    Other,
}

impl PaymentMethod {
    /// Every method, in display order.
    pub const ALL: [Self; 6] = [
        Self::CreditCard,
        Self::Boleto,
        Self::Pix,
        Self::Cash,
        Self::BankTransfer,
        Self::Other,
    ];

    /// Label shown to users and written to the store.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreditCard => "Cartão de Crédito",
            Self::Boleto => "Boleto",
            Self::Pix => "PIX",
            Self::Cash => "Dinheiro",
            Self::BankTransfer => "Transferência Bancária",
            Self::Other => "Outro",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|method| method.label().to_lowercase() == wanted)
            .ok_or_else(|| Error::InvalidEntry {
                message: format!("unknown payment method '{}'", s.trim()),
            })
    }
}

/// Typed view of a stored entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialEntry {
    /// Store-assigned identifier
    pub id: String,
    /// Description
    pub description: String,
    /// Amount, always > 0
    pub amount: f64,
    /// Calendar date
    pub date: NaiveDate,
    /// Income or expense
    pub kind: EntryKind,
    /// Payment method
    pub payment_method: PaymentMethod,
    /// Creating user's id
    pub owner_id: String,
    /// Creating user's name as it was at creation time
    pub owner_name: Option<String>,
    /// Expense category, `None` for income
    pub category: Option<String>,
    /// Insertion time
    pub created_at: DateTime<Utc>,
}

impl FinancialEntry {
    /// Strips the store-assigned fields, leaving what was originally submitted.
    #[must_use]
    pub fn to_new_entry(&self) -> NewEntry {
        NewEntry {
            description: self.description.clone(),
            amount: self.amount,
            date: self.date,
            kind: self.kind,
            payment_method: self.payment_method,
            owner_id: self.owner_id.clone(),
            owner_name: self.owner_name.clone(),
            category: self.category.clone(),
        }
    }
}

impl TryFrom<entry::Model> for FinancialEntry {
    type Error = Error;

    fn try_from(model: entry::Model) -> Result<Self> {
        Ok(Self {
            kind: model.kind.parse()?,
            payment_method: model.payment_method.parse()?,
            id: model.id,
            description: model.description,
            amount: model.amount,
            date: model.date,
            owner_id: model.owner_id,
            owner_name: model.owner_name,
            category: model.category,
            created_at: model.created_at,
        })
    }
}

/// An entry as submitted, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntry {
    /// Description
    pub description: String,
    /// Amount, must be > 0
    pub amount: f64,
    /// Calendar date
    pub date: NaiveDate,
    /// Income or expense
    pub kind: EntryKind,
    /// Payment method
    pub payment_method: PaymentMethod,
    /// Creating user's id
    pub owner_id: String,
    /// Creating user's display name (denormalized)
    pub owner_name: Option<String>,
    /// Expense category; ignored for income
    pub category: Option<String>,
}

/// Partial update of an entry. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryPatch {
    /// New description
    pub description: Option<String>,
    /// New amount
    pub amount: Option<f64>,
    /// New date
    pub date: Option<NaiveDate>,
    /// New kind; switching to income clears the category
    pub kind: Option<EntryKind>,
    /// New payment method
    pub payment_method: Option<PaymentMethod>,
    /// New category (`Some(None)` clears it)
    pub category: Option<Option<String>>,
}

/// The signed-in user as the components see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Identity-provider user id
    pub id: String,
    /// Display name, if known
    pub display_name: Option<String>,
    /// Email, if known
    pub email: Option<String>,
}

impl AuthenticatedUser {
    /// Name to greet the user with: display name, else email, else id.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }

    /// Name copied onto new entries: display name, else email.
    #[must_use]
    pub fn denormalized_name(&self) -> Option<String> {
        self.display_name.clone().or_else(|| self.email.clone())
    }
}

/// Trims a free-text category, mapping blank input to `None`.
#[must_use]
pub fn normalize_category(category: Option<&str>) -> Option<String> {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(ToString::to_string)
}
