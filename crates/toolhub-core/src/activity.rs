//! User activity log entries

use crate::Tool;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Logged when the user follows a tool's outbound link
pub const VISIT: &str = "visit";
pub const VIEW: &str = "view";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub user_id: String,
    pub activity_type: String,
    #[serde(default)]
    pub activity_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `user_activity`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewActivity {
    pub user_id: String,
    pub activity_type: String,
    pub activity_data: serde_json::Value,
}

impl NewActivity {
    /// Activity about a specific tool, carrying its id and name
    pub fn for_tool(user_id: impl Into<String>, action: impl Into<String>, tool: &Tool) -> Self {
        Self {
            user_id: user_id.into(),
            activity_type: action.into(),
            activity_data: serde_json::json!({
                "tool_id": tool.id,
                "tool_name": tool.name,
            }),
        }
    }
}

impl Activity {
    pub fn tool_name(&self) -> Option<&str> {
        self.activity_data.get("tool_name").and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_catalog;

    #[test]
    fn test_for_tool_payload() {
        let tool = &sample_catalog()[1];
        let activity = NewActivity::for_tool("u1", VISIT, tool);
        assert_eq!(activity.activity_data["tool_id"], "2");
        assert_eq!(activity.activity_data["tool_name"], "Midjourney");
    }
}
