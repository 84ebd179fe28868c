use anyhow::{Context, Result};
use blogkit_core::config::parse_site_toml;
use blogkit_core::content::load_posts;
use blogkit_core::{ContentItem, SiteConfig};
use blogkit_validator::{CONTENT_DIR, SITE_TOML};
use std::path::Path;

/// Configuration and posts of the site rooted at `path`
pub struct Site {
    pub config: SiteConfig,
    pub posts: Vec<ContentItem>,
}

/// Load site.toml and every post, failing with a hint when the site is missing
pub fn load_site(path: &Path) -> Result<Site> {
    if !path.exists() {
        anyhow::bail!(
            "Site directory does not exist: {}\nRun 'blogkit init {}' first",
            path.display(),
            path.display()
        );
    }

    let config_path = path.join(SITE_TOML);
    if !config_path.exists() {
        anyhow::bail!(
            "{} not found in {}\nRun 'blogkit init {}' first",
            SITE_TOML,
            path.display(),
            path.display()
        );
    }

    let config = parse_site_toml(&config_path).context("Failed to parse site.toml")?;
    let posts = load_posts(path.join(CONTENT_DIR)).context("Failed to load posts")?;

    Ok(Site { config, posts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_site_missing_dir() {
        let dir = TempDir::new().unwrap();
        let err = load_site(&dir.path().join("nope")).err().unwrap();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_load_site_missing_config() {
        let dir = TempDir::new().unwrap();
        let err = load_site(dir.path()).err().unwrap();
        assert!(err.to_string().contains("site.toml not found"));
    }

    #[test]
    fn test_load_site() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SITE_TOML),
            "[site]\nurl = \"https://example.com\"\ntitle = \"Example\"\n",
        )
        .unwrap();
        fs::create_dir(dir.path().join(CONTENT_DIR)).unwrap();
        fs::write(dir.path().join(CONTENT_DIR).join("a.md"), "---\ntitle: A\n---\n").unwrap();

        let site = load_site(dir.path()).unwrap();
        assert_eq!(site.config.site.title, "Example");
        assert_eq!(site.posts.len(), 1);
    }
}
