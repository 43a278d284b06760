mod account;
mod admin;
mod auth;
mod health;
mod settings;
mod tools;

pub use account::account_routes;
pub use admin::admin_routes;
pub use auth::auth_routes;
pub use health::health_routes;
pub use settings::settings_routes;
pub use tools::tool_routes;
