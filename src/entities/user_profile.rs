//! User profile entity - Mirror of the identity provider's user record.
//!
//! Created or merged on first sign-in. Every field but the id is optional
//! because providers do not always expose a display name or an email.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User profile database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Identity-provider user id
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name, if known
    pub display_name: Option<String>,
    /// Email, if known
    pub email: Option<String>,
    /// Last time the profile was created or merged
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
