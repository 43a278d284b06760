//! # Toolhub Web
//!
//! JSON API over the catalog and the per-user pages. Handlers resolve the
//! caller through the Session Gate, run their collaborator calls inside a
//! request-scoped `LoadBoundary`, and flatten failures into `{ "error" }`
//! bodies.

pub mod routes;
pub mod server;
pub mod state;

mod assets;
mod error;
mod extract;

pub use error::{Result, ResultExt, WebError};
pub use extract::BearerToken;
pub use server::{build_router, serve_until, start_server};
pub use state::{open_preferences, AppState, Backend};
