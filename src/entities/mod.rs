//! Entity module - Contains all SeaORM entity definitions for the store.
//! These entities represent the two collections the application reads and writes.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod entry;
pub mod user_profile;

// Re-export specific types to avoid conflicts
pub use entry::{Column as EntryColumn, Entity as Entry, Model as EntryModel};
pub use user_profile::{
    Column as UserProfileColumn, Entity as UserProfile, Model as UserProfileModel,
};
