//! Catalog Store and the search/category filter predicate

use crate::{CatalogError, Tool};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

/// Sentinel selecting every category
pub const ALL_CATEGORIES: &str = "all";

/// Category filter selection: the `"all"` sentinel or an exact label
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategorySelector {
    #[default]
    All,
    Category(String),
}

impl CategorySelector {
    /// Parse a raw selector; missing, empty and `"all"` select everything.
    /// Any other label is kept verbatim, whitespace included.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") | Some(ALL_CATEGORIES) => Self::All,
            Some(label) => Self::Category(label.to_string()),
        }
    }

    /// Case-sensitive exact label comparison
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(label) => label == category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Category(label) => label,
        }
    }
}

impl fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CategorySelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategorySelector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::parse(raw.as_deref()))
    }
}

/// Search query plus category selection.
///
/// A missing query deserializes to the empty string, which matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolFilter {
    #[serde(default, alias = "q")]
    pub query: String,
    #[serde(default)]
    pub category: CategorySelector,
}

impl ToolFilter {
    pub fn new(query: impl Into<String>, category: CategorySelector) -> Self {
        Self {
            query: query.into(),
            category,
        }
    }

    /// Does `tool` satisfy both the category and the text condition?
    pub fn matches(&self, tool: &Tool) -> bool {
        self.category.matches(&tool.category) && text_matches(tool, &self.query.to_lowercase())
    }
}

fn text_matches(tool: &Tool, needle: &str) -> bool {
    needle.is_empty()
        || tool.name.to_lowercase().contains(needle)
        || tool.description.to_lowercase().contains(needle)
        || tool.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}

/// Order-preserving subsequence of `tools` matching `filter`.
///
/// Literal case-insensitive substring test only: no ranking, fuzzing or
/// stemming. Never mutates its input.
pub fn filter_tools<'a>(tools: &'a [Tool], filter: &ToolFilter) -> Vec<&'a Tool> {
    let needle = filter.query.to_lowercase();
    tools
        .iter()
        .filter(|tool| filter.category.matches(&tool.category) && text_matches(tool, &needle))
        .collect()
}

/// Per-category entry for the category browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub id: String,
    pub name: String,
    pub count: usize,
}

/// Ordered, read-only collection of tools with unique identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStore {
    tools: Vec<Tool>,
}

impl CatalogStore {
    pub fn new(tools: Vec<Tool>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(tools.len());
        for tool in &tools {
            if !seen.insert(tool.id.as_str()) {
                return Err(CatalogError::DuplicateId(tool.id.clone()));
            }
        }
        Ok(Self { tools })
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.id == id)
    }

    pub fn filter(&self, filter: &ToolFilter) -> Vec<&Tool> {
        filter_tools(&self.tools, filter)
    }

    /// `"all"` first, then each distinct label in first-seen order
    pub fn categories(&self) -> Vec<CategoryCount> {
        let mut counts: Vec<CategoryCount> = Vec::new();
        for tool in &self.tools {
            match counts.iter_mut().find(|c| c.id == tool.category) {
                Some(entry) => entry.count += 1,
                None => counts.push(CategoryCount {
                    id: tool.category.clone(),
                    name: tool.category.clone(),
                    count: 1,
                }),
            }
        }

        let mut result = Vec::with_capacity(counts.len() + 1);
        result.push(CategoryCount {
            id: ALL_CATEGORIES.to_string(),
            name: "All Tools".to_string(),
            count: self.tools.len(),
        });
        result.extend(counts);
        result
    }

    pub fn into_tools(self) -> Vec<Tool> {
        self.tools
    }
}
