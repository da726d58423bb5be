//! User profile business logic.
//!
//! Profiles mirror the identity provider's user record in the `users` collection.
//! Writes follow document-store merge semantics: a field passed as `None` keeps
//! whatever the stored profile already holds.

use crate::{
    entities::{UserProfile, user_profile},
    errors::Result,
};
use sea_orm::{Set, prelude::*};
use tracing::{debug, info, instrument};

/// Reads the profile stored for `user_id`, if any.
pub async fn get_profile<C>(db: &C, user_id: &str) -> Result<Option<user_profile::Model>>
where
    C: ConnectionTrait,
{
    let profile = UserProfile::find_by_id(user_id.to_string()).one(db).await?;
    debug!(
        "Profile lookup for {}: {}",
        user_id,
        if profile.is_some() { "found" } else { "absent" }
    );
    Ok(profile)
}

/// Creates the profile, or merges the supplied fields into the existing one.
#[instrument(skip(db, display_name, email))]
pub async fn merge_profile<C>(
    db: &C,
    user_id: &str,
    display_name: Option<String>,
    email: Option<String>,
) -> Result<user_profile::Model>
where
    C: ConnectionTrait,
{
    let now = chrono::Utc::now();

    let existing = UserProfile::find_by_id(user_id.to_string()).one(db).await?;
    let profile = if let Some(existing) = existing {
        let mut active: user_profile::ActiveModel = existing.into();
        if display_name.is_some() {
            active.display_name = Set(display_name);
        }
        if email.is_some() {
            active.email = Set(email);
        }
        active.updated_at = Set(now);
        active.update(db).await?
    } else {
        user_profile::ActiveModel {
            id: Set(user_id.to_string()),
            display_name: Set(display_name),
            email: Set(email),
            updated_at: Set(now),
        }
        .insert(db)
        .await?
    };

    info!("User data updated/created for {}", user_id);
    Ok(profile)
}
