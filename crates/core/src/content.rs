//! Loading posts from the content directory.
//!
//! A post is a markdown file with an optional front matter block:
//!
//! ```text
//! ---
//! title: Neural Nets
//! date: 2024-01-01
//! summary: intro to ML
//! draft: false
//! ---
//! Body text...
//! ```
//!
//! The slug is the file stem.

use crate::error::{Error, Result};
use crate::types::ContentItem;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const FRONT_MATTER_DELIMITER: &str = "---";

/// Load every `*.md` file directly inside `dir`, ordered by file name.
///
/// A missing directory yields no posts.
pub fn load_posts<P: AsRef<Path>>(dir: P) -> Result<Vec<ContentItem>> {
    let dir = dir.as_ref();
    if !dir.exists() {
        tracing::debug!(dir = %dir.display(), "content directory missing, no posts loaded");
        return Ok(Vec::new());
    }

    let mut posts = Vec::new();
    for path in post_paths(dir)? {
        posts.push(load_post(&path)?);
    }

    tracing::debug!(dir = %dir.display(), count = posts.len(), "loaded posts");
    Ok(posts)
}

/// Markdown files directly inside `dir`, ordered by file name
pub fn post_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        let path = entry.path();
        let is_markdown = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("md"));
        if entry.file_type().is_file() && is_markdown {
            paths.push(path.to_path_buf());
        }
    }
    Ok(paths)
}

/// Load a single post file
pub fn load_post(path: &Path) -> Result<ContentItem> {
    let slug = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::InvalidData(format!("Invalid post filename: {}", path.display())))?
        .to_string();

    let content = fs::read_to_string(path)?;
    parse_post(&slug, &content).map_err(|message| Error::FrontMatter {
        path: path.to_path_buf(),
        message,
    })
}

/// Parse a post's front matter and body.
///
/// Errors are plain messages; [`load_post`] attaches the file path.
pub fn parse_post(slug: &str, content: &str) -> std::result::Result<ContentItem, String> {
    let (fields, body) = split_front_matter(content)?;

    let mut item = ContentItem {
        slug: slug.to_string(),
        title: None,
        summary: None,
        date: None,
        draft: false,
        body: body.to_string(),
    };

    for (key, value) in fields {
        match key.as_str() {
            "title" => item.title = non_empty(value),
            "summary" | "excerpt" => item.summary = non_empty(value),
            "date" => item.date = non_empty(value),
            "draft" => item.draft = parse_bool(&value)?,
            _ => {}
        }
    }

    Ok(item)
}

/// Split `content` into its front matter `key: value` pairs and the body.
fn split_front_matter(content: &str) -> std::result::Result<(Vec<(String, String)>, &str), String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let Some(first_line_end) = content.find('\n') else {
        return Ok((Vec::new(), content));
    };
    if content[..first_line_end].trim() != FRONT_MATTER_DELIMITER {
        return Ok((Vec::new(), content));
    }

    let mut fields = Vec::new();
    let mut offset = first_line_end + 1;
    for line in content[offset..].split_inclusive('\n') {
        offset += line.len();
        let trimmed = line.trim();

        if trimmed == FRONT_MATTER_DELIMITER {
            return Ok((fields, &content[offset..]));
        }
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (key, value) = trimmed
            .split_once(':')
            .ok_or_else(|| format!("Expected 'key: value', got '{}'", trimmed))?;
        fields.push((key.trim().to_lowercase(), unquote(value.trim()).to_string()));
    }

    Err("Front matter is not closed with '---'".to_string())
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_bool(value: &str) -> std::result::Result<bool, String> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" | "" => Ok(false),
        other => Err(format!("Invalid draft value '{}', expected true or false", other)),
    }
}
