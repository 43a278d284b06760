//! Collaborator traits
//!
//! Every external service the catalog talks to sits behind one of these
//! traits. The backend crate implements them over HTTP; [`crate::memory`]
//! implements them in-process.

mod auth;
mod catalog;
mod preferences;
mod user_data;

pub use auth::{AuthProvider, SignInRequest, SignUpRequest};
pub use catalog::CatalogRepository;
pub use preferences::PreferenceStore;
pub use user_data::{
    ActivityRepository, FavoritesRepository, NotificationRepository, ProfileRepository,
    RoleRepository,
};
