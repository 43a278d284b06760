//! Table API (`/rest/v1`) repositories

mod catalog;
mod user_data;

/// Ask the table API to echo written rows back
pub(crate) const RETURN_REPRESENTATION: &str = "return=representation";
pub(crate) const RETURN_MINIMAL: &str = "return=minimal";
