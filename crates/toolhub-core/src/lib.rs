//! # Toolhub Core
//!
//! Domain model for the AI tool catalog: the Catalog Store and its filter
//! predicate, the card presentation binder, the Session and Role gates, and
//! the collaborator traits every external service is reached through.
//!
//! Persistence, authentication and authorization live in the external
//! backend. This crate only defines the seams (see [`traits`]) and ships
//! in-memory implementations in [`memory`] for tests and offline serving.

pub mod activity;
pub mod boundary;
pub mod card;
pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod favorites;
pub mod file_store;
pub mod gate;
pub mod identity;
pub mod memory;
pub mod notification;
pub mod sample;
pub mod settings;
pub mod tool;
pub mod traits;
pub mod validation;

pub use activity::{Activity, NewActivity};
pub use boundary::{LoadBoundary, LoadError};
pub use card::{bind_cards, PriceBadge, ToolCard};
pub use catalog::{filter_tools, CatalogStore, CategoryCount, CategorySelector, ToolFilter};
pub use dashboard::{DashboardStats, DashboardSummary};
pub use error::{CatalogError, CollaboratorError, CollaboratorResult, GateError};
pub use favorites::Favorite;
pub use file_store::JsonFilePreferenceStore;
pub use gate::{AuthenticatedUser, RoleGate, SessionGate};
pub use identity::{
    AccessToken, Profile, ProfileSummary, Role, RoleRecord, RoleSummary, Session, User,
};
pub use memory::{MemoryBackend, MemoryPreferenceStore};
pub use notification::{relative_age, unread_count, Notification, NotificationKind};
pub use sample::sample_catalog;
pub use settings::{DisplayPreferences, PreferencesUpdate, UserSettings};
pub use tool::{Tool, ToolDraft};
pub use traits::{
    ActivityRepository, AuthProvider, CatalogRepository, FavoritesRepository,
    NotificationRepository, PreferenceStore, ProfileRepository, RoleRepository, SignInRequest,
    SignUpRequest,
};
pub use validation::{
    PasswordResetForm, PasswordUpdateForm, SignInForm, SignUpForm, ValidationError,
};
