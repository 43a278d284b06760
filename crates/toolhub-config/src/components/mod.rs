//! Configuration sections
//!
//! One small struct per concern, each with safe defaults.

pub mod backend;
pub mod catalog;
pub mod logging;
pub mod server;
pub mod storage;

pub use backend::*;
pub use catalog::*;
pub use logging::*;
pub use server::*;
pub use storage::*;
