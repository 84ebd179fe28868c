use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of body characters used when a post has no summary.
pub const EXCERPT_CHARS: usize = 200;

/// Complete site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site: SiteMeta,
    pub feed: FeedConfig,
    pub theme: ThemeConfig,
}

/// Site-wide metadata used for pages and absolute links
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteMeta {
    /// Absolute base URL, stored without a trailing slash
    pub url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// RSS feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub enabled: bool,
    pub title: String,
    pub description: String,
    /// Maximum number of entries written to the feed
    pub limit: usize,
}

/// Colour tokens emitted as CSS custom properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub bg: String,
    pub bg_soft: String,
    pub bg_card: String,
    pub text: String,
    pub text_muted: String,
    pub accent: String,
    pub accent_soft: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            bg: "#0B0F14".to_string(),
            bg_soft: "#0F1520".to_string(),
            bg_card: "#121927".to_string(),
            text: "#E6ECF1".to_string(),
            text_muted: "#B7C2CC".to_string(),
            accent: "#7C6FF4".to_string(),
            accent_soft: "#A3BFFA".to_string(),
        }
    }
}

/// A post as supplied by the content directory.
///
/// Front matter fields stay optional so that a post missing one of them can
/// be reported and skipped by whoever consumes it instead of failing the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub slug: String,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub date: Option<String>,
    #[serde(default)]
    pub draft: bool,
    /// Markdown source following the front matter
    #[serde(default)]
    pub body: String,
}

impl ContentItem {
    /// Title for display, falling back to "Untitled"
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    /// Summary if present, otherwise the leading body text
    pub fn excerpt(&self) -> String {
        if let Some(summary) = &self.summary {
            return summary.clone();
        }

        let text = self.body.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.chars().count() > EXCERPT_CHARS {
            let truncated: String = text.chars().take(EXCERPT_CHARS).collect();
            format!("{}...", truncated.trim_end())
        } else {
            text
        }
    }

    /// Parsed publication date, `None` if absent or malformed
    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(parse_date)
    }
}

/// One syndicated entry derived from a [`ContentItem`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedEntry {
    /// Site-relative link, `/blog/<slug>`
    pub link: String,
    pub title: String,
    pub pub_date: DateTime<Utc>,
    pub description: String,
}

/// Whether a rendered list entry is currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Shown,
    Hidden,
}

/// A rendered blog list entry the search box filters over.
///
/// `title` and `excerpt` hold the lowercase text written to the
/// `data-title` and `data-excerpt` attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayableItem {
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub visibility: Visibility,
}

impl DisplayableItem {
    pub fn new(slug: impl Into<String>, title: &str, excerpt: &str) -> Self {
        Self {
            slug: slug.into(),
            title: title.to_lowercase(),
            excerpt: excerpt.to_lowercase(),
            visibility: Visibility::Shown,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Shown
    }
}

impl From<&ContentItem> for DisplayableItem {
    fn from(item: &ContentItem) -> Self {
        DisplayableItem::new(
            item.slug.clone(),
            item.display_title(),
            &item.excerpt(),
        )
    }
}

/// Parse a front matter date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]`, RFC 3339 and RFC 2822.
/// Dates without an offset are taken as UTC.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn item(summary: Option<&str>, body: &str) -> ContentItem {
        ContentItem {
            slug: "post".to_string(),
            title: Some("Post".to_string()),
            summary: summary.map(str::to_string),
            date: Some("2024-01-01".to_string()),
            draft: false,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_parse_date_formats() {
        let d = parse_date("2024-01-01").unwrap();
        assert_eq!((d.year(), d.month(), d.day(), d.hour()), (2024, 1, 1, 0));

        let d = parse_date("2024-06-01 13:45").unwrap();
        assert_eq!((d.hour(), d.minute()), (13, 45));

        let d = parse_date("2024-06-01T10:00:00+02:00").unwrap();
        assert_eq!(d.hour(), 8);

        let d = parse_date("Mon, 01 Jan 2024 12:00:00 +0000").unwrap();
        assert_eq!(d.day(), 1);

        assert!(parse_date("  2024-01-01  ").is_some());
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("").is_none());
        assert!(parse_date("yesterday").is_none());
        assert!(parse_date("2024-13-01").is_none());
        assert!(parse_date("2024-02-30").is_none());
    }

    #[test]
    fn test_excerpt_prefers_summary() {
        assert_eq!(item(Some("short"), "long body").excerpt(), "short");
    }

    #[test]
    fn test_excerpt_falls_back_to_body() {
        assert_eq!(item(None, "Hello\n\nworld").excerpt(), "Hello world");

        let long = "word ".repeat(100);
        let excerpt = item(None, &long).excerpt();
        assert!(excerpt.ends_with("..."));
        assert!(excerpt.chars().count() <= EXCERPT_CHARS + 3);
    }

    #[test]
    fn test_display_title_default() {
        let mut post = item(None, "");
        post.title = None;
        assert_eq!(post.display_title(), "Untitled");
    }

    #[test]
    fn test_displayable_item_lowercases() {
        let shown = DisplayableItem::from(&item(Some("Intro to ML"), ""));
        assert_eq!(shown.title, "post");
        assert_eq!(shown.excerpt, "intro to ml");
        assert!(shown.is_visible());
    }

    #[test]
    fn test_displayable_item_uses_display_title() {
        let mut post = item(None, "");
        post.title = None;
        assert_eq!(DisplayableItem::from(&post).title, "untitled");
    }

    #[test]
    fn test_published_none_for_missing_date() {
        let mut post = item(None, "");
        post.date = None;
        assert!(post.published().is_none());
    }
}
