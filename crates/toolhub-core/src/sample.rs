//! Built-in catalog used when no backend catalog is configured

use crate::Tool;

struct Seed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: &'static str,
    rating: i32,
    price: &'static str,
    premium: bool,
    icon: &'static str,
    url: &'static str,
    tags: &'static [&'static str],
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "1",
        name: "ChatGPT",
        description: "Advanced conversational AI for writing, coding, analysis, and creative tasks. Perfect for content creation, code review and problem-solving.",
        category: "Language Models",
        rating: 5,
        price: "Freemium",
        premium: true,
        icon: "chatgpt-icon.png",
        url: "https://chat.openai.com",
        tags: &["writing", "coding", "analysis", "conversation"],
    },
    Seed {
        id: "2",
        name: "Midjourney",
        description: "Create stunning artwork and images from text descriptions. Industry-leading AI art generator with incredible detail and style.",
        category: "Image Generation",
        rating: 5,
        price: "Paid",
        premium: true,
        icon: "midjourney-icon.png",
        url: "https://midjourney.com",
        tags: &["art", "images", "creative", "design"],
    },
    Seed {
        id: "3",
        name: "Notion AI",
        description: "Integrated AI assistant within Notion for writing, summarizing, and organizing your workspace content efficiently.",
        category: "Productivity",
        rating: 4,
        price: "Freemium",
        premium: false,
        icon: "notion-icon.png",
        url: "https://notion.so",
        tags: &["productivity", "writing", "organization", "workspace"],
    },
    Seed {
        id: "4",
        name: "Runway ML",
        description: "AI-powered video editing and generation platform. Create, edit, and enhance videos with cutting-edge machine learning.",
        category: "Video & Media",
        rating: 4,
        price: "Freemium",
        premium: true,
        icon: "runway-icon.png",
        url: "https://runwayml.com",
        tags: &["video", "editing", "generation", "creative"],
    },
    Seed {
        id: "5",
        name: "Jasper AI",
        description: "AI copywriting assistant for marketing teams. Generate high-converting copy, blog posts, and marketing materials.",
        category: "Marketing",
        rating: 4,
        price: "Paid",
        premium: false,
        icon: "jasper-icon.png",
        url: "https://jasper.ai",
        tags: &["copywriting", "marketing", "content", "business"],
    },
    Seed {
        id: "6",
        name: "Grammarly",
        description: "AI-powered writing assistant that helps with grammar, style, tone, and clarity improvements across all platforms.",
        category: "Writing",
        rating: 4,
        price: "Freemium",
        premium: false,
        icon: "grammarly-icon.png",
        url: "https://grammarly.com",
        tags: &["grammar", "writing", "editing", "proofreading"],
    },
    Seed {
        id: "7",
        name: "Stable Diffusion",
        description: "Open-source AI image generator. Create high-quality images from text prompts with complete creative control.",
        category: "Image Generation",
        rating: 4,
        price: "Free",
        premium: false,
        icon: "stablediffusion-icon.png",
        url: "https://stability.ai",
        tags: &["images", "open-source", "creative", "art"],
    },
    Seed {
        id: "8",
        name: "GitHub Copilot",
        description: "AI pair programmer that suggests code and entire functions in real-time. Boost your coding productivity significantly.",
        category: "Development",
        rating: 5,
        price: "Paid",
        premium: true,
        icon: "github-icon.png",
        url: "https://github.com/features/copilot",
        tags: &["coding", "programming", "development", "productivity"],
    },
    Seed {
        id: "9",
        name: "Canva AI",
        description: "Design platform with AI-powered features for creating presentations, social media graphics, and marketing materials.",
        category: "Design",
        rating: 4,
        price: "Freemium",
        premium: false,
        icon: "canva-icon.png",
        url: "https://canva.com",
        tags: &["design", "graphics", "presentations", "marketing"],
    },
    Seed {
        id: "10",
        name: "Copy.ai",
        description: "AI content generator for marketing copy, blog posts, product descriptions, and social media content.",
        category: "Marketing",
        rating: 4,
        price: "Freemium",
        premium: false,
        icon: "copyai-icon.png",
        url: "https://copy.ai",
        tags: &["copywriting", "content", "marketing", "social media"],
    },
    Seed {
        id: "11",
        name: "Loom AI",
        description: "Screen recording with AI-powered summaries, transcriptions, and video editing capabilities.",
        category: "Video & Media",
        rating: 4,
        price: "Freemium",
        premium: false,
        icon: "loom-icon.png",
        url: "https://loom.com",
        tags: &["screen recording", "video", "summaries", "transcription"],
    },
    Seed {
        id: "12",
        name: "Synthesia",
        description: "Create AI-generated videos with virtual presenters. Transform text into engaging video content without cameras.",
        category: "Video & Media",
        rating: 4,
        price: "Paid",
        premium: true,
        icon: "synthesia-icon.png",
        url: "https://synthesia.io",
        tags: &["video", "AI avatars", "presentation", "content creation"],
    },
];

/// The twelve featured tools shipped with the service
pub fn sample_catalog() -> Vec<Tool> {
    SEEDS
        .iter()
        .map(|s| Tool {
            id: s.id.to_string(),
            name: s.name.to_string(),
            description: s.description.to_string(),
            category: s.category.to_string(),
            rating: s.rating,
            price: s.price.to_string(),
            is_premium: s.premium,
            image_url: Some(format!("/assets/icons/{}", s.icon)),
            website_url: Some(s.url.to_string()),
            tags: s.tags.iter().map(|t| t.to_string()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CatalogStore;

    #[test]
    fn test_sample_ids_are_unique() {
        assert!(CatalogStore::new(sample_catalog()).is_ok());
    }

    #[test]
    fn test_sample_ratings_in_range() {
        assert!(sample_catalog().iter().all(|t| (0..=5).contains(&t.rating)));
    }
}
