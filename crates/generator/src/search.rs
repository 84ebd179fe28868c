use serde::{Deserialize, Serialize};

use crate::listing::Listing;

/// Contents of `search-index.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndex {
    pub posts: Vec<SearchEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub date: String,
}

impl SearchIndex {
    pub fn from_listing(listing: &Listing<'_>) -> Self {
        let posts = listing
            .posts
            .iter()
            .map(|post| SearchEntry {
                title: post.item.display_title().to_string(),
                slug: post.item.slug.clone(),
                excerpt: post.item.excerpt(),
                date: post.date.format("%Y-%m-%d").to_string(),
            })
            .collect();

        Self { posts }
    }
}
