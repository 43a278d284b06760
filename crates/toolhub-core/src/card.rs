//! Presentation binder: maps tools to display cards

use crate::Tool;
use serde::{Deserialize, Serialize};

/// Tags shown on a card before collapsing into "+N"
pub const VISIBLE_TAGS: usize = 3;

/// Stars rendered per card
pub const MAX_STARS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceBadge {
    Free,
    Paid,
}

impl PriceBadge {
    /// Any price label mentioning "free" (Free, Freemium, ...) gets the free badge
    pub fn for_price(price: &str) -> Self {
        if price.to_lowercase().contains("free") {
            Self::Free
        } else {
            Self::Paid
        }
    }
}

/// Display unit for one tool in a grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCard {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub is_premium: bool,
    pub stars: [bool; MAX_STARS],
    pub rating_label: String,
    pub price: String,
    pub price_badge: PriceBadge,
    pub visible_tags: Vec<String>,
    pub hidden_tag_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
}

impl From<&Tool> for ToolCard {
    fn from(tool: &Tool) -> Self {
        let mut stars = [false; MAX_STARS];
        for (i, star) in stars.iter_mut().enumerate() {
            *star = (i as i64) < i64::from(tool.rating);
        }

        Self {
            id: tool.id.clone(),
            name: tool.name.clone(),
            category: tool.category.clone(),
            description: tool.description.clone(),
            is_premium: tool.is_premium,
            stars,
            rating_label: format!("{}.0", tool.rating),
            price: tool.price.clone(),
            price_badge: PriceBadge::for_price(&tool.price),
            visible_tags: tool.tags.iter().take(VISIBLE_TAGS).cloned().collect(),
            hidden_tag_count: tool.tags.len().saturating_sub(VISIBLE_TAGS),
            image_url: tool.image_url.clone(),
            website_url: tool.website_url.clone(),
        }
    }
}

/// Bind a filtered subset to cards, keeping order
pub fn bind_cards<'a, I>(tools: I) -> Vec<ToolCard>
where
    I: IntoIterator<Item = &'a Tool>,
{
    tools.into_iter().map(ToolCard::from).collect()
}
