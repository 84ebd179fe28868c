use anyhow::{Context, Result};
use blogkit_core::config::parse_site_toml_str;
use blogkit_validator::{CONTENT_DIR, SITE_TOML};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

use super::build::STATIC_DIR;

const DEFAULT_TITLE: &str = "My Blog";
const DEFAULT_URL: &str = "https://example.com";

/// Escape a string for safe inclusion in a TOML basic string
///
/// See: https://toml.io/en/v1.0.0#string
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Initialize a new site directory.
///
/// Creates `site.toml`, a first post in `blog/` and an empty `static/`
/// directory. The directory is created if it does not exist.
///
/// # Errors
///
/// Returns an error if site.toml already exists, the given URL is not an
/// absolute http(s) URL, or file operations fail.
pub async fn run(path: PathBuf, title: Option<String>, url: Option<String>) -> Result<()> {
    println!("Initializing site directory: {}", path.display());

    let site_toml_path = path.join(SITE_TOML);
    if site_toml_path.exists() {
        anyhow::bail!(
            "site.toml already exists at {}\nHint: Delete it first or use a different directory",
            site_toml_path.display()
        );
    }

    let site_toml = generate_site_toml(
        title.as_deref().unwrap_or(DEFAULT_TITLE),
        url.as_deref().unwrap_or(DEFAULT_URL),
    );
    parse_site_toml_str(&site_toml).context("Generated site.toml is invalid")?;

    create_directory_structure(&path)?;
    fs::write(&site_toml_path, site_toml).context("Failed to write site.toml")?;
    generate_first_post(&path)?;

    println!("\n✓ Initialization complete!");
    println!("\nGenerated structure:");
    println!("  {}/", path.display());
    println!("  ├── site.toml            ← Edit this to set title, URL and feed");
    println!("  ├── blog/");
    println!("  │   └── hello-world.md");
    println!("  └── static/              ← Files copied as-is (images, favicon)");

    println!("\nNext steps:");
    println!("  1. Edit site.toml");
    println!("  2. Write posts in blog/ (set draft: true to keep one unpublished)");
    println!("  3. Preview: blogkit preview {}", path.display());

    Ok(())
}

fn create_directory_structure(base: &Path) -> Result<()> {
    fs::create_dir_all(base.join(CONTENT_DIR)).context("Failed to create blog directory")?;
    fs::create_dir_all(base.join(STATIC_DIR)).context("Failed to create static directory")?;
    Ok(())
}

fn generate_site_toml(title: &str, url: &str) -> String {
    let title = toml_escape_string(title);
    let url = toml_escape_string(url);

    format!(
        r##"# Site configuration

[site]
url = "{url}"
title = "{title}"
# author = "Your Name"

[feed]
enabled = true
title = "{title} – Blog"
description = "Notes and writing"
limit = 50

# Colour tokens, all optional
[theme]
# bg = "#0B0F14"
# bg_soft = "#0F1520"
# bg_card = "#121927"
# text = "#E6ECF1"
# text_muted = "#B7C2CC"
# accent = "#7C6FF4"
# accent_soft = "#A3BFFA"
"##
    )
}

fn generate_first_post(base: &Path) -> Result<()> {
    let path = base.join(CONTENT_DIR).join("hello-world.md");
    if path.exists() {
        return Ok(());
    }

    let today = Local::now().format("%Y-%m-%d");
    let post = format!(
        r##"---
title: Hello, world
date: {today}
summary: The first post on this blog.
draft: false
---

Write your posts in markdown. Everything after the front matter is the body.

```rust
fn main() {{
    println!("hello");
}}
```
"##
    );

    fs::write(&path, post).context("Failed to write first post")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogkit_core::content::load_post;
    use tempfile::TempDir;

    #[test]
    fn test_toml_escape_string() {
        assert_eq!(toml_escape_string("plain"), "plain");
        assert_eq!(toml_escape_string("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(toml_escape_string("C:\\path"), "C:\\\\path");
        assert_eq!(toml_escape_string("a\nb\tc"), "a\\nb\\tc");
    }

    #[test]
    fn test_generate_site_toml_parses() {
        let toml = generate_site_toml("Autumn \"Nippert\"", "https://autumnnippert.com");
        let config = parse_site_toml_str(&toml).unwrap();
        assert_eq!(config.site.title, "Autumn \"Nippert\"");
        assert_eq!(config.site.url, "https://autumnnippert.com");
        assert_eq!(config.feed.title, "Autumn \"Nippert\" – Blog");
    }

    #[test]
    fn test_first_post_is_valid() {
        let dir = TempDir::new().unwrap();
        create_directory_structure(dir.path()).unwrap();
        generate_first_post(dir.path()).unwrap();

        let post = load_post(&dir.path().join("blog").join("hello-world.md")).unwrap();
        assert_eq!(post.title.as_deref(), Some("Hello, world"));
        assert!(post.published().is_some());
        assert!(!post.draft);
        assert!(post.body.contains("```rust"));
    }

    #[tokio::test]
    async fn test_init_creates_structure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site");

        run(path.clone(), Some("Autumn".to_string()), None).await.unwrap();

        assert!(path.join("site.toml").exists());
        assert!(path.join("blog").join("hello-world.md").exists());
        assert!(path.join("static").is_dir());
    }

    #[tokio::test]
    async fn test_init_refuses_existing_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("site.toml"), "").unwrap();

        let result = run(dir.path().to_path_buf(), None, None).await;
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_init_rejects_bad_url() {
        let dir = TempDir::new().unwrap();
        let result = run(dir.path().to_path_buf(), None, Some("example.com".to_string())).await;
        assert!(result.is_err());
        assert!(!dir.path().join("site.toml").exists());
    }
}
