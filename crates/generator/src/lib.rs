//! Static site generation for the blog.
//!
//! [`generate_site`] renders everything a build writes to disk: pages, the
//! RSS feed, the search index and the client assets. The preview server
//! calls it per request and serves the matching file.

pub mod assets;
pub mod escape;
pub mod feed;
pub mod filter;
pub mod listing;
pub mod markdown;
pub mod pages;
pub mod search;

use blogkit_core::{ContentItem, Error, Result, SiteConfig};

use crate::feed::{Channel, build_feed, render_rss};
use crate::listing::Listing;
use crate::search::SearchIndex;

pub const RSS_PATH: &str = "rss.xml";
pub const SEARCH_INDEX_PATH: &str = "search-index.json";
pub const SITE_JS_PATH: &str = "site.js";
pub const STYLES_PATH: &str = "styles.css";

pub struct GeneratedSite {
    pub pages: Vec<(String, String)>,   // (path, html)
    pub assets: Vec<(String, Vec<u8>)>, // (path, data)
    /// Posts left out of the listing or the feed, one line each
    pub warnings: Vec<String>,
}

impl GeneratedSite {
    /// Look up a generated file by its output path
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.pages
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, html)| html.as_bytes())
            .or_else(|| {
                self.assets
                    .iter()
                    .find(|(p, _)| p == path)
                    .map(|(_, data)| data.as_slice())
            })
    }
}

/// Render the whole site from its configuration and posts
pub fn generate_site(
    config: &SiteConfig,
    posts: &[ContentItem],
    is_preview: bool,
) -> Result<GeneratedSite> {
    let listing = Listing::new(posts);
    let mut warnings: Vec<String> = listing
        .skipped
        .iter()
        .map(|slug| format!("{}: missing or malformed date, not listed", slug))
        .collect();

    let mut pages = vec![
        (
            "index.html".to_string(),
            pages::render_home(config, &listing, is_preview),
        ),
        (
            "blog/index.html".to_string(),
            pages::render_blog_index(config, &listing, is_preview),
        ),
    ];
    for (index, post) in listing.posts.iter().enumerate() {
        if let Some(html) = pages::render_post_page(config, &listing, index, is_preview) {
            pages.push((format!("blog/{}/index.html", post.item.slug), html));
        }
    }

    let search_index = serde_json::to_vec_pretty(&SearchIndex::from_listing(&listing))
        .map_err(|e| Error::InvalidData(format!("search index: {}", e)))?;

    let mut assets = vec![
        (SEARCH_INDEX_PATH.to_string(), search_index),
        (
            SITE_JS_PATH.to_string(),
            assets::generate_site_js().as_bytes().to_vec(),
        ),
        (
            STYLES_PATH.to_string(),
            assets::generate_styles_css(&config.theme).into_bytes(),
        ),
    ];

    if config.feed.enabled {
        let feed = build_feed(posts, &config.site.url).limit(config.feed.limit);
        warnings.extend(
            feed.skipped
                .iter()
                .map(|s| format!("{}: {}, left out of the feed", s.slug, s.error)),
        );
        let rss = render_rss(&feed, &Channel::from(&config.feed));
        assets.push((RSS_PATH.to_string(), rss.into_bytes()));
    }

    tracing::debug!(
        pages = pages.len(),
        assets = assets.len(),
        warnings = warnings.len(),
        "generated site"
    );

    Ok(GeneratedSite {
        pages,
        assets,
        warnings,
    })
}

/// Content type for a generated or static file, by extension
pub fn content_type(path: &str) -> &'static str {
    let ext = path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    match ext.to_ascii_lowercase().as_str() {
        "html" => "text/html; charset=utf-8",
        "xml" => "application/rss+xml; charset=utf-8",
        "json" => "application/json",
        "js" => "text/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        _ => "application/octet-stream",
    }
}
