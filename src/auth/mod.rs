//! Authentication layer - bridges an external identity provider to the components.
//!
//! The provider only knows about opaque user handles. The [`AuthBridge`] turns those
//! into [`crate::models::AuthenticatedUser`] values (reading or creating the stored
//! profile on the way) and pushes every change to its subscribers.

/// The bridge between provider sessions and subscribed components
pub mod bridge;
/// Identity provider seam
pub mod provider;
/// Callback registry with unsubscribe handles
pub mod subscription;

pub use bridge::AuthBridge;
pub use provider::{IdentityProvider, ProviderUser};
pub use subscription::{Listeners, Subscription};
