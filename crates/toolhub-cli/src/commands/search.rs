use super::load_catalog;
use crate::cli::OutputFormat;
use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use toolhub_config::AppConfig;
use toolhub_core::{bind_cards, CategoryCount, CategorySelector, PriceBadge, ToolCard, ToolFilter};

pub async fn execute(
    config: AppConfig,
    query: Option<String>,
    category: Option<String>,
    format: OutputFormat,
    offline: bool,
) -> Result<()> {
    let store = load_catalog(&config, offline).await?;
    let filter = ToolFilter::new(
        query.unwrap_or_default(),
        CategorySelector::parse(category.as_deref()),
    );
    let cards = bind_cards(store.filter(&filter));

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cards)?),
        OutputFormat::Table => {
            if cards.is_empty() {
                println!("{}", "No tools match your search.".yellow());
                return Ok(());
            }
            println!("{}", tools_table(&cards));
            println!(
                "{}",
                format!("{} of {} tools", cards.len(), store.len()).dimmed()
            );
        }
    }
    Ok(())
}

pub async fn categories(config: AppConfig, format: OutputFormat, offline: bool) -> Result<()> {
    let store = load_catalog(&config, offline).await?;
    let categories = store.categories();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&categories)?),
        OutputFormat::Table => println!("{}", categories_table(&categories)),
    }
    Ok(())
}

fn stars(card: &ToolCard) -> String {
    card.stars
        .iter()
        .map(|lit| if *lit { '★' } else { '☆' })
        .collect()
}

fn tags(card: &ToolCard) -> String {
    let mut label = card.visible_tags.join(", ");
    if card.hidden_tag_count > 0 {
        label.push_str(&format!(" +{}", card.hidden_tag_count));
    }
    label
}

pub(crate) fn tools_table(cards: &[ToolCard]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Name", "Category", "Rating", "Price", "Tags"]);

    for card in cards {
        let name = if card.is_premium {
            Cell::new(format!("{} (premium)", card.name)).fg(Color::Magenta)
        } else {
            Cell::new(&card.name)
        };
        let price = match card.price_badge {
            PriceBadge::Free => Cell::new(&card.price).fg(Color::Green),
            PriceBadge::Paid => Cell::new(&card.price).fg(Color::Yellow),
        };
        table.add_row(vec![
            Cell::new(&card.id),
            name,
            Cell::new(&card.category),
            Cell::new(format!("{} {}", stars(card), card.rating_label)),
            price,
            Cell::new(tags(card)),
        ]);
    }
    table
}

fn categories_table(categories: &[CategoryCount]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Category", "Tools"]);
    for category in categories {
        table.add_row(vec![
            Cell::new(&category.name),
            Cell::new(category.count.to_string()),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolhub_core::sample_catalog;

    #[test]
    fn test_table_lists_every_card() {
        let tools = sample_catalog();
        let cards = bind_cards(&tools);
        let rendered = tools_table(&cards).to_string();
        for tool in &tools {
            assert!(rendered.contains(&tool.name), "{} missing", tool.name);
        }
    }

    #[test]
    fn test_hidden_tags_are_counted() {
        let tools = sample_catalog();
        let mut card = ToolCard::from(&tools[0]);
        card.visible_tags = vec!["a".to_string(), "b".to_string()];
        card.hidden_tag_count = 2;
        assert_eq!(tags(&card), "a, b +2");
    }

    #[tokio::test]
    async fn test_static_catalog_needs_no_backend() {
        let store = load_catalog(&AppConfig::default(), false).await.unwrap();
        assert_eq!(store.len(), sample_catalog().len());
    }
}
