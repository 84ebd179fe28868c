//! RSS feed generation.
//!
//! [`build_feed`] turns the content collection into an ordered list of
//! [`FeedEntry`] values: drafts are dropped, posts that cannot be converted
//! are skipped with a warning, and the rest are sorted newest first.
//! [`render_rss`] serialises the result as an RSS 2.0 document.

use blogkit_core::{ContentItem, FeedConfig, FeedEntry, parse_date};
use thiserror::Error;

use crate::escape::html_escape;

/// Path prefix of every post link
pub const BLOG_PREFIX: &str = "/blog/";

/// Why a single post was left out of the feed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedItemError {
    #[error("malformed date '{date}'")]
    MalformedDate { date: String },

    #[error("missing field '{field}'")]
    MissingField { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    pub slug: String,
    pub error: FeedItemError,
}

/// The entries of a feed plus the site they are relative to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    /// Absolute site URL without a trailing slash
    pub site: String,
    pub entries: Vec<FeedEntry>,
    pub skipped: Vec<SkippedItem>,
}

impl Feed {
    /// Keep at most `limit` of the newest entries
    pub fn limit(mut self, limit: usize) -> Self {
        self.entries.truncate(limit);
        self
    }

    /// Absolute URL for a site-relative link
    pub fn absolute(&self, link: &str) -> String {
        format!("{}{}", self.site, link)
    }
}

/// Channel-level strings of the feed document
#[derive(Debug, Clone)]
pub struct Channel {
    pub title: String,
    pub description: String,
}

impl From<&FeedConfig> for Channel {
    fn from(config: &FeedConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
        }
    }
}

/// Build the feed entries for `items`.
///
/// Equal dates keep their input order.
pub fn build_feed(items: &[ContentItem], site_base: &str) -> Feed {
    let mut entries = Vec::new();
    let mut skipped = Vec::new();

    for item in items.iter().filter(|item| !item.draft) {
        match feed_entry(item) {
            Ok(entry) => entries.push(entry),
            Err(error) => {
                tracing::warn!(slug = %item.slug, %error, "skipping post in feed");
                skipped.push(SkippedItem {
                    slug: item.slug.clone(),
                    error,
                });
            }
        }
    }

    entries.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));

    Feed {
        site: site_base.trim_end_matches('/').to_string(),
        entries,
        skipped,
    }
}

/// Convert one post into a feed entry
pub fn feed_entry(item: &ContentItem) -> Result<FeedEntry, FeedItemError> {
    if item.slug.trim().is_empty() {
        return Err(FeedItemError::MissingField { field: "slug" });
    }
    let title = item
        .title
        .as_ref()
        .ok_or(FeedItemError::MissingField { field: "title" })?;
    let summary = item
        .summary
        .as_ref()
        .ok_or(FeedItemError::MissingField { field: "summary" })?;
    let date = item
        .date
        .as_ref()
        .ok_or(FeedItemError::MissingField { field: "date" })?;
    let pub_date = parse_date(date).ok_or_else(|| FeedItemError::MalformedDate {
        date: date.clone(),
    })?;

    Ok(FeedEntry {
        link: format!("{}{}", BLOG_PREFIX, item.slug),
        title: title.clone(),
        pub_date,
        description: summary.clone(),
    })
}

/// Render `feed` as an RSS 2.0 document
pub fn render_rss(feed: &Feed, channel: &Channel) -> String {
    let mut buf = String::new();

    buf.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    buf.push_str("<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\">\n");
    buf.push_str("<channel>\n");
    buf.push_str(&format!("<title>{}</title>\n", html_escape(&channel.title)));
    buf.push_str(&format!(
        "<description>{}</description>\n",
        html_escape(&channel.description)
    ));
    buf.push_str(&format!("<link>{}/</link>\n", html_escape(&feed.site)));
    buf.push_str(&format!(
        "<atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>\n",
        html_escape(&feed.absolute("/rss.xml"))
    ));
    if let Some(newest) = feed.entries.first() {
        buf.push_str(&format!(
            "<lastBuildDate>{}</lastBuildDate>\n",
            newest.pub_date.to_rfc2822()
        ));
    }

    for entry in &feed.entries {
        let url = html_escape(&feed.absolute(&entry.link));
        buf.push_str("<item>\n");
        buf.push_str(&format!("<title>{}</title>\n", html_escape(&entry.title)));
        buf.push_str(&format!("<link>{}</link>\n", url));
        buf.push_str(&format!("<guid isPermaLink=\"true\">{}</guid>\n", url));
        buf.push_str(&format!("<pubDate>{}</pubDate>\n", entry.pub_date.to_rfc2822()));
        buf.push_str(&format!(
            "<description>{}</description>\n",
            html_escape(&entry.description)
        ));
        buf.push_str("</item>\n");
    }

    buf.push_str("</channel>\n</rss>\n");
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, title: &str, date: &str, draft: bool) -> ContentItem {
        ContentItem {
            slug: slug.to_string(),
            title: Some(title.to_string()),
            summary: Some(format!("about {}", title)),
            date: Some(date.to_string()),
            draft,
            body: String::new(),
        }
    }

    fn dates(feed: &Feed) -> Vec<String> {
        feed.entries
            .iter()
            .map(|e| e.pub_date.format("%Y-%m-%d").to_string())
            .collect()
    }

    #[test]
    fn test_drafts_are_excluded() {
        let mut neural = post("neural-nets", "Neural Nets", "2024-01-01", false);
        neural.summary = Some("intro to ML".to_string());
        let mut jazz = post("jazz-theory", "Jazz Theory", "2024-06-01", true);
        jazz.summary = Some("music notes".to_string());

        let feed = build_feed(&[neural, jazz], "https://example.com");

        assert_eq!(feed.entries.len(), 1);
        let entry = &feed.entries[0];
        assert_eq!(entry.title, "Neural Nets");
        assert_eq!(entry.link, "/blog/neural-nets");
        assert_eq!(entry.description, "intro to ML");
        assert_eq!(dates(&feed), vec!["2024-01-01"]);
        assert!(feed.skipped.is_empty());
    }

    #[test]
    fn test_sorted_newest_first() {
        let items = [
            post("a", "A", "2023-01-01", false),
            post("b", "B", "2024-01-01", false),
            post("c", "C", "2022-01-01", false),
        ];

        let feed = build_feed(&items, "https://example.com");
        assert_eq!(dates(&feed), vec!["2024-01-01", "2023-01-01", "2022-01-01"]);
        for pair in feed.entries.windows(2) {
            assert!(pair[0].pub_date >= pair[1].pub_date);
        }
    }

    #[test]
    fn test_equal_dates_keep_input_order() {
        let items = [
            post("first", "First", "2024-01-01", false),
            post("newer", "Newer", "2024-02-01", false),
            post("second", "Second", "2024-01-01", false),
        ];

        let feed = build_feed(&items, "https://example.com");
        let slugs: Vec<_> = feed.entries.iter().map(|e| e.link.as_str()).collect();
        assert_eq!(slugs, vec!["/blog/newer", "/blog/first", "/blog/second"]);
    }

    #[test]
    fn test_empty_input() {
        let feed = build_feed(&[], "https://example.com/");
        assert!(feed.entries.is_empty());
        assert!(feed.skipped.is_empty());
        assert_eq!(feed.site, "https://example.com");
    }

    #[test]
    fn test_idempotent() {
        let items = [
            post("a", "A", "2023-05-01", false),
            post("b", "B", "2023-05-01", false),
            post("c", "C", "not a date", false),
        ];
        assert_eq!(
            build_feed(&items, "https://example.com"),
            build_feed(&items, "https://example.com")
        );
    }

    #[test]
    fn test_malformed_date_is_skipped() {
        let items = [
            post("good", "Good", "2024-01-01", false),
            post("bad", "Bad", "someday", false),
        ];

        let feed = build_feed(&items, "https://example.com");
        assert_eq!(feed.entries.len(), 1);
        assert_eq!(
            feed.skipped,
            vec![SkippedItem {
                slug: "bad".to_string(),
                error: FeedItemError::MalformedDate {
                    date: "someday".to_string()
                },
            }]
        );
    }

    #[test]
    fn test_missing_fields_are_skipped() {
        let mut no_title = post("no-title", "x", "2024-01-01", false);
        no_title.title = None;
        let mut no_summary = post("no-summary", "y", "2024-01-01", false);
        no_summary.summary = None;
        let no_slug = post("  ", "z", "2024-01-01", false);

        let feed = build_feed(&[no_title, no_summary, no_slug], "https://example.com");
        assert!(feed.entries.is_empty());

        let fields: Vec<_> = feed
            .skipped
            .iter()
            .map(|s| match &s.error {
                FeedItemError::MissingField { field } => *field,
                other => panic!("unexpected error {other}"),
            })
            .collect();
        assert_eq!(fields, vec!["title", "summary", "slug"]);
    }

    #[test]
    fn test_draft_with_bad_date_is_not_reported() {
        let feed = build_feed(&[post("d", "D", "???", true)], "https://example.com");
        assert!(feed.entries.is_empty());
        assert!(feed.skipped.is_empty());
    }

    #[test]
    fn test_limit_keeps_newest() {
        let items = [
            post("a", "A", "2021-01-01", false),
            post("b", "B", "2023-01-01", false),
            post("c", "C", "2022-01-01", false),
        ];

        let feed = build_feed(&items, "https://example.com").limit(2);
        assert_eq!(dates(&feed), vec!["2023-01-01", "2022-01-01"]);
    }

    #[test]
    fn test_render_rss_document() {
        let items = [post("neural-nets", "Nets & <Graphs>", "2024-01-01", false)];
        let feed = build_feed(&items, "https://autumnnippert.com/");
        let channel = Channel {
            title: "Autumn – Blog".to_string(),
            description: "Notes on CS, AI/ML, and music".to_string(),
        };

        let xml = render_rss(&feed, &channel);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<title>Autumn – Blog</title>"));
        assert!(xml.contains("<link>https://autumnnippert.com/</link>"));
        assert!(xml.contains("<link>https://autumnnippert.com/blog/neural-nets</link>"));
        assert!(xml.contains("<title>Nets &amp; &lt;Graphs&gt;</title>"));
        assert!(xml.contains("<pubDate>Mon, "));
        assert!(xml.contains("Jan 2024 00:00:00 +0000</pubDate>"));
        assert!(xml.contains("<lastBuildDate>"));
        assert_eq!(xml.matches("<item>").count(), 1);
        assert!(xml.trim_end().ends_with("</rss>"));
    }

    #[test]
    fn test_render_rss_empty_feed() {
        let feed = build_feed(&[], "https://example.com");
        let channel = Channel {
            title: "Empty".to_string(),
            description: String::new(),
        };

        let xml = render_rss(&feed, &channel);
        assert!(!xml.contains("<item>"));
        assert!(!xml.contains("<lastBuildDate>"));
        assert!(xml.contains("<description></description>"));
    }
}
