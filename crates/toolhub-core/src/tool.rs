//! Tool records mirrored from the `ai_tools` table

use serde::{Deserialize, Deserializer, Serialize};

/// One third-party AI product in the catalog.
///
/// `rating` is nominally 0-5 but is never validated; out-of-range values are
/// carried through and rendered as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: String,
    #[serde(default, alias = "isPremium", deserialize_with = "null_as_default")]
    pub is_premium: bool,
    #[serde(default, alias = "image", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, alias = "url", skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

/// Admin payload for creating or replacing a tool row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ToolDraft {
    /// Materialize the draft under a concrete identifier
    pub fn into_tool(self, id: impl Into<String>) -> Tool {
        Tool {
            id: id.into(),
            name: self.name,
            description: self.description,
            category: self.category,
            rating: self.rating,
            price: self.price,
            is_premium: self.is_premium,
            image_url: self.image_url,
            website_url: self.website_url,
            tags: self.tags,
        }
    }
}

impl From<&Tool> for ToolDraft {
    fn from(tool: &Tool) -> Self {
        Self {
            name: tool.name.clone(),
            description: tool.description.clone(),
            category: tool.category.clone(),
            rating: tool.rating,
            price: tool.price.clone(),
            is_premium: tool.is_premium,
            image_url: tool.image_url.clone(),
            website_url: tool.website_url.clone(),
            tags: tool.tags.clone(),
        }
    }
}

/// PostgREST returns `null` for unset columns; treat it like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
