//! Property tests for the catalog filter predicate

use proptest::prelude::*;
use toolhub_core::{filter_tools, CategorySelector, Tool, ToolFilter};

const CATEGORIES: &[&str] = &["Language Models", "Image Generation", "Coding", "coding", "Audio"];

fn arb_tool() -> impl Strategy<Value = Tool> {
    (
        "[a-zA-Z ]{1,12}",
        "[a-zA-Z ]{0,30}",
        prop::sample::select(CATEGORIES),
        prop::collection::vec("[a-zA-Z]{1,8}", 0..4),
    )
        .prop_map(|(name, description, category, tags)| Tool {
            id: String::new(),
            name,
            description,
            category: category.to_string(),
            rating: 4,
            price: "Free".to_string(),
            is_premium: false,
            image_url: None,
            website_url: None,
            tags,
        })
}

fn arb_catalog() -> impl Strategy<Value = Vec<Tool>> {
    prop::collection::vec(arb_tool(), 0..20).prop_map(|mut tools| {
        for (i, tool) in tools.iter_mut().enumerate() {
            tool.id = i.to_string();
        }
        tools
    })
}

fn text_hit(tool: &Tool, query: &str) -> bool {
    let q = query.to_lowercase();
    tool.name.to_lowercase().contains(&q)
        || tool.description.to_lowercase().contains(&q)
        || tool.tags.iter().any(|t| t.to_lowercase().contains(&q))
}

fn ids(tools: &[&Tool]) -> Vec<String> {
    tools.iter().map(|t| t.id.clone()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn named_category_matches_exactly(
        tools in arb_catalog(),
        category in prop::sample::select(CATEGORIES),
        query in "[a-z]{0,3}",
    ) {
        let filter = ToolFilter::new(query, CategorySelector::parse(Some(category)));
        for tool in filter_tools(&tools, &filter) {
            prop_assert_eq!(tool.category.as_str(), category);
        }
    }

    #[test]
    fn all_sentinel_never_excludes(tools in arb_catalog()) {
        let filter = ToolFilter::new("", CategorySelector::All);
        prop_assert_eq!(filter_tools(&tools, &filter).len(), tools.len());
    }

    #[test]
    fn empty_query_is_category_filter_only(
        tools in arb_catalog(),
        category in prop::sample::select(CATEGORIES),
    ) {
        let filter = ToolFilter::new("", CategorySelector::parse(Some(category)));
        let expected: Vec<String> = tools
            .iter()
            .filter(|t| t.category == category)
            .map(|t| t.id.clone())
            .collect();
        prop_assert_eq!(ids(&filter_tools(&tools, &filter)), expected);
    }

    #[test]
    fn query_partitions_catalog(tools in arb_catalog(), query in "[a-zA-Z]{1,3}") {
        let filter = ToolFilter::new(query.clone(), CategorySelector::All);
        let kept = ids(&filter_tools(&tools, &filter));

        for tool in &tools {
            prop_assert_eq!(kept.contains(&tool.id), text_hit(tool, &query));
        }
    }

    #[test]
    fn filtering_is_idempotent_and_ordered(
        tools in arb_catalog(),
        query in "[a-z]{0,2}",
        category in prop::option::of(prop::sample::select(CATEGORIES)),
    ) {
        let snapshot = tools.clone();
        let filter = ToolFilter::new(query, CategorySelector::parse(category));

        let first = ids(&filter_tools(&tools, &filter));
        let second = ids(&filter_tools(&tools, &filter));
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&tools, &snapshot);

        let positions: Vec<usize> = first.iter().map(|id| id.parse().unwrap()).collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
