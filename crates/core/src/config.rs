use crate::error::{Error, Result};
use crate::types::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_FEED_LIMIT: usize = 50;

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly
#[derive(Debug, Deserialize)]
struct RawConfig {
    site: RawSite,
    #[serde(default)]
    feed: RawFeed,
    #[serde(default)]
    theme: RawTheme,
}

#[derive(Debug, Deserialize)]
struct RawSite {
    url: String,
    title: String,
    author: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFeed {
    enabled: Option<bool>,
    title: Option<String>,
    description: Option<String>,
    limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTheme {
    bg: Option<String>,
    bg_soft: Option<String>,
    bg_card: Option<String>,
    text: Option<String>,
    text_muted: Option<String>,
    accent: Option<String>,
    accent_soft: Option<String>,
}

/// Parse site.toml from a file path
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<SiteConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let url = validate_url(&raw.site.url)?;

    let limit = raw.feed.limit.unwrap_or(DEFAULT_FEED_LIMIT);
    if limit == 0 {
        return Err(Error::ConfigParse(
            "feed.limit must be greater than 0".to_string(),
        ));
    }

    let feed = FeedConfig {
        enabled: raw.feed.enabled.unwrap_or(true),
        title: raw.feed.title.unwrap_or_else(|| raw.site.title.clone()),
        description: raw.feed.description.unwrap_or_default(),
        limit,
    };

    let defaults = ThemeConfig::default();
    let theme = ThemeConfig {
        bg: theme_color(raw.theme.bg, defaults.bg, "theme.bg")?,
        bg_soft: theme_color(raw.theme.bg_soft, defaults.bg_soft, "theme.bg_soft")?,
        bg_card: theme_color(raw.theme.bg_card, defaults.bg_card, "theme.bg_card")?,
        text: theme_color(raw.theme.text, defaults.text, "theme.text")?,
        text_muted: theme_color(raw.theme.text_muted, defaults.text_muted, "theme.text_muted")?,
        accent: theme_color(raw.theme.accent, defaults.accent, "theme.accent")?,
        accent_soft: theme_color(raw.theme.accent_soft, defaults.accent_soft, "theme.accent_soft")?,
    };

    Ok(SiteConfig {
        site: SiteMeta {
            url,
            title: raw.site.title,
            author: raw.site.author,
        },
        feed,
        theme,
    })
}

/// Require an absolute http(s) URL and strip any trailing slash.
fn validate_url(url: &str) -> Result<String> {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| {
            Error::ConfigParse(format!(
                "site.url must start with http:// or https://, got '{}'",
                url
            ))
        })?;

    if rest.trim_end_matches('/').is_empty() {
        return Err(Error::ConfigParse("site.url has no host".to_string()));
    }

    Ok(url.trim_end_matches('/').to_string())
}

fn theme_color(value: Option<String>, default: String, field_name: &str) -> Result<String> {
    let Some(value) = value else {
        return Ok(default);
    };

    let hex = value.strip_prefix('#').unwrap_or("");
    let valid = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(Error::ConfigParse(format!(
            "Invalid colour in '{}': '{}'. Use #RGB or #RRGGBB.",
            field_name, value
        )));
    }

    Ok(value)
}
