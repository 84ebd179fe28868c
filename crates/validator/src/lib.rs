//! Site validation.
//!
//! Checks `site.toml` and every post under `blog/` without writing anything,
//! collecting problems into a [`ValidationReport`] instead of stopping at the
//! first one.

use blogkit_core::config::parse_site_toml;
use blogkit_core::content::{load_post, post_paths};
use blogkit_core::ContentItem;
use blogkit_generator::feed::{FeedItemError, feed_entry};
use std::collections::HashMap;
use std::path::Path;

pub const SITE_TOML: &str = "site.toml";
pub const CONTENT_DIR: &str = "blog";

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate the site rooted at `path`
pub fn validate_site(path: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();

    let config_path = path.join(SITE_TOML);
    if !config_path.exists() {
        report
            .errors
            .push(format!("{} not found in {}", SITE_TOML, path.display()));
    } else {
        match parse_site_toml(&config_path) {
            Ok(config) => {
                report.info.push(format!("Site: {} ({})", config.site.title, config.site.url));
                if !config.feed.enabled {
                    report.info.push("RSS feed disabled".to_string());
                }
            }
            Err(e) => report.errors.push(format!("{}: {}", SITE_TOML, e)),
        }
    }

    let content_dir = path.join(CONTENT_DIR);
    if !content_dir.exists() {
        report
            .warnings
            .push(format!("No {}/ directory, the site has no posts", CONTENT_DIR));
        return report;
    }

    let paths = match post_paths(&content_dir) {
        Ok(paths) => paths,
        Err(e) => {
            report.errors.push(format!("Cannot read {}/: {}", CONTENT_DIR, e));
            return report;
        }
    };

    let mut posts = Vec::new();
    for post_path in paths {
        match load_post(&post_path) {
            Ok(post) => posts.push(post),
            Err(e) => report.errors.push(e.to_string()),
        }
    }

    check_posts(&posts, &mut report);
    tracing::debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validation finished"
    );
    report
}

/// Per-post checks on already loaded content
pub fn check_posts(posts: &[ContentItem], report: &mut ValidationReport) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for post in posts {
        *seen.entry(post.slug.to_lowercase()).or_default() += 1;
    }
    let mut duplicates: Vec<_> = seen.into_iter().filter(|(_, n)| *n > 1).collect();
    duplicates.sort();
    for (slug, count) in duplicates {
        report
            .errors
            .push(format!("Duplicate slug '{}' used by {} posts", slug, count));
    }

    let mut drafts = 0;
    for post in posts {
        if post.draft {
            drafts += 1;
        }

        if post.title.is_none() {
            report.errors.push(format!("{}: missing title", post.slug));
        }

        match &post.date {
            None => report.errors.push(format!("{}: missing date", post.slug)),
            Some(date) if post.published().is_none() => report
                .errors
                .push(format!("{}: malformed date '{}'", post.slug, date)),
            Some(_) => {}
        }

        if !post.draft
            && let Err(FeedItemError::MissingField { field: "summary" }) = feed_entry(post)
        {
            report.warnings.push(format!(
                "{}: no summary, the post will be left out of the RSS feed",
                post.slug
            ));
        }

        if post.body.trim().is_empty() {
            report.warnings.push(format!("{}: empty body", post.slug));
        }
    }

    report.info.push(format!(
        "Posts: {} ({} published, {} drafts)",
        posts.len(),
        posts.len() - drafts,
        drafts
    ));
}
