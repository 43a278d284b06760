//! Favorite rows joined with their tool

use crate::Tool;
use serde::{Deserialize, Serialize};

/// One `(user, tool)` favorite. `tool` is present when the row was fetched
/// with its `ai_tools` embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub tool_id: String,
    #[serde(default, alias = "ai_tools", skip_serializing_if = "Option::is_none")]
    pub tool: Option<Tool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_tool_alias() {
        let fav: Favorite = serde_json::from_str(
            r#"{"id":"f1","user_id":"u1","tool_id":"t1",
                "ai_tools":{"id":"t1","name":"Loom AI","category":"Video & Media"}}"#,
        )
        .unwrap();
        assert_eq!(fav.tool.map(|t| t.name), Some("Loom AI".to_string()));
    }

    #[test]
    fn test_embed_may_be_null() {
        let fav: Favorite =
            serde_json::from_str(r#"{"id":"f1","tool_id":"t1","ai_tools":null}"#).unwrap();
        assert!(fav.tool.is_none());
        assert_eq!(fav.user_id, "");
    }
}
