//! Backend-as-a-service connection settings

use serde::{Deserialize, Serialize};

/// Connection settings for the external auth/data collaborator
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`
    pub url: String,
    /// Public (anon) API key sent as `apikey` on every request
    pub anon_key: String,
    /// Public site URL used to build email redirect links
    pub site_url: String,
    pub timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:54321".to_string(),
            anon_key: String::new(),
            site_url: "http://localhost:5173".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("anon_key", &if self.anon_key.is_empty() { "" } else { "<redacted>" })
            .field("site_url", &self.site_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl BackendConfig {
    /// Redirect target embedded in sign-up confirmation emails
    pub fn signup_redirect(&self) -> String {
        format!("{}/dashboard", self.site_url.trim_end_matches('/'))
    }

    /// Redirect target embedded in password-reset emails
    pub fn password_reset_redirect(&self) -> String {
        format!("{}/reset-password", self.site_url.trim_end_matches('/'))
    }
}
