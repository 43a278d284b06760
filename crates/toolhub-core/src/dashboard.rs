//! Personal dashboard composition

use crate::{Activity, Favorite, Profile, User};
use serde::{Deserialize, Serialize};

/// Rows fetched for each dashboard panel
pub const DASHBOARD_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub tools_explored: usize,
    pub favorites: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub display_name: String,
    pub email: Option<String>,
    pub stats: DashboardStats,
    pub favorites: Vec<Favorite>,
    pub recent_activity: Vec<Activity>,
}

impl DashboardSummary {
    /// Build the summary. Stats count what was fetched, so both are capped
    /// at [`DASHBOARD_LIMIT`].
    pub fn compose(
        user: &User,
        profile: Option<Profile>,
        favorites: Vec<Favorite>,
        recent_activity: Vec<Activity>,
    ) -> Self {
        let display_name = profile
            .as_ref()
            .and_then(|p| p.full_name.clone())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "User".to_string());

        Self {
            display_name,
            email: user.email.clone(),
            stats: DashboardStats {
                tools_explored: recent_activity.len(),
                favorites: favorites.len(),
            },
            favorites,
            recent_activity,
        }
    }
}
