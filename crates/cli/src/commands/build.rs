use anyhow::{Context, Result};
use blogkit_generator::{GeneratedSite, generate_site};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::site::load_site;

pub const STATIC_DIR: &str = "static";

/// Build static site for deployment
pub async fn run(path: PathBuf, output: PathBuf) -> Result<()> {
    println!("🔨 Building static site...");
    println!("   Source: {}", path.display());
    println!("   Output: {}", output.display());
    println!();

    let site = load_site(&path)?;
    let drafts = site.posts.iter().filter(|p| p.draft).count();

    println!("✓ Loaded: {}", site.config.site.title);
    println!("  Posts: {} ({} drafts)", site.posts.len(), drafts);
    println!();

    let generated = generate_site(&site.config, &site.posts, false)?;
    if let Some(summary) = skipped_summary(&generated.warnings) {
        println!("{}", summary);
    }

    println!("📁 Creating output directory...");
    fs::create_dir_all(&output).context("Failed to create output directory")?;

    println!("🎨 Copying static files...");
    let copied = copy_static(&path.join(STATIC_DIR), &output)?;
    println!("   ✓ Copied {} static files", copied);

    println!("📄 Writing pages...");
    let written = write_site(&generated, &output)?;
    println!("   ✓ Wrote {} files", written);
    if site.config.feed.enabled {
        println!("   ✓ Generated rss.xml");
    }

    println!();
    println!("✅ Build complete!");
    println!("   Output: {}", output.display());
    println!();
    println!("To test locally:");
    println!("   blogkit preview {}", path.display());
    println!();

    Ok(())
}

/// Skipped posts as printed lines; the library has already logged each one
fn skipped_summary(warnings: &[String]) -> Option<String> {
    if warnings.is_empty() {
        return None;
    }

    let lines: Vec<String> = warnings.iter().map(|w| format!("⚠ {}", w)).collect();
    Some(lines.join("\n"))
}

/// Write every generated page and asset under `output`
pub fn write_site(site: &GeneratedSite, output: &Path) -> Result<usize> {
    let files = site
        .pages
        .iter()
        .map(|(p, html)| (p, html.as_bytes()))
        .chain(site.assets.iter().map(|(p, data)| (p, data.as_slice())));

    let mut written = 0;
    for (relative, data) in files {
        let dst = output.join(relative);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&dst, data).with_context(|| format!("Failed to write {}", dst.display()))?;
        written += 1;
    }

    Ok(written)
}

/// Copy the static directory tree into `output`, returning the file count
pub fn copy_static(static_dir: &Path, output: &Path) -> Result<usize> {
    if !static_dir.exists() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(static_dir).min_depth(1) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(static_dir)
            .context("Static file outside static directory")?;
        let dst = output.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dst)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
            copied += 1;
        }
    }

    Ok(copied)
}
