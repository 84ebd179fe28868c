//! HTML page templates.
//!
//! The same templates serve `build` and `preview`; `is_preview` only adds the
//! live reload script.

use blogkit_core::{DisplayableItem, SiteConfig};

use crate::escape::html_escape;
use crate::listing::{ListedPost, Listing};
use crate::markdown::render_markdown;

/// Number of posts shown on the home page
pub const HOME_RECENT_POSTS: usize = 5;

fn display_date(post: &ListedPost<'_>) -> String {
    post.date.format("%B %-d, %Y").to_string()
}

/// Wrap page content in the shared site chrome (sidebar, header, scripts)
fn layout(config: &SiteConfig, page_title: &str, content: &str, is_preview: bool) -> String {
    let site_title = html_escape(&config.site.title);

    let feed_head = if config.feed.enabled {
        format!(
            r#"<link rel="alternate" type="application/rss+xml" title="{}" href="/rss.xml">"#,
            html_escape(&config.feed.title)
        )
    } else {
        String::new()
    };

    let feed_link = if config.feed.enabled {
        r#"<a href="/rss.xml">RSS</a>"#
    } else {
        ""
    };

    let reload_script = if is_preview {
        r#"<script>
        // Hot reload via Server-Sent Events
        const eventSource = new EventSource('/_reload');
        eventSource.onmessage = () => location.reload();
        eventSource.onerror = () => eventSource.close();
    </script>"#
    } else {
        ""
    };

    let author = config
        .site
        .author
        .as_deref()
        .map(|a| format!(r#"<meta name="author" content="{}">"#, html_escape(a)))
        .unwrap_or_default();

    format!(
        r##"<!DOCTYPE html>
<html lang="en" class="dark">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{page_title}</title>
    {author}
    <link rel="stylesheet" href="/styles.css">
    {feed_head}
</head>
<body>
    <nav class="sidebar" id="sidebar">
        <button class="sidebar-close" onclick="closeSidebar()" aria-label="Close menu">&times;</button>
        <a href="/">Home</a>
        <a href="/blog/">Blog</a>
        {feed_link}
    </nav>
    <div class="overlay" id="overlay" onclick="closeSidebar()"></div>

    <header class="topbar">
        <button class="menu-button" onclick="toggleSidebar()" aria-label="Open menu">&#9776;</button>
        <a class="brand" href="/">{site_title}</a>
    </header>

    <main class="content">
{content}
    </main>

    <script src="/site.js"></script>
    {reload_script}
</body>
</html>
"##,
        page_title = html_escape(page_title),
    )
}

/// Render one `<a class="blog-post">` entry with its search attributes
fn post_card(post: &ListedPost<'_>) -> String {
    let title = post.item.display_title();
    let excerpt = post.item.excerpt();
    let searchable = DisplayableItem::from(post.item);

    format!(
        r#"        <a href="{}" class="blog-post" data-title="{}" data-excerpt="{}">
            <h3>{}</h3>
            <p class="muted">{}</p>
            <p>{}</p>
        </a>
"#,
        html_escape(&post.url()),
        html_escape(&searchable.title),
        html_escape(&searchable.excerpt),
        html_escape(title),
        display_date(post),
        html_escape(&excerpt),
    )
}

/// Home page with the most recent posts
pub fn render_home(config: &SiteConfig, listing: &Listing<'_>, is_preview: bool) -> String {
    let recent: String = listing
        .posts
        .iter()
        .take(HOME_RECENT_POSTS)
        .map(post_card)
        .collect();

    let recent_section = if recent.is_empty() {
        r#"<p class="muted">No posts yet.</p>"#.to_string()
    } else {
        format!(
            r#"<div class="post-list">
{}        </div>
        <p><a href="/blog/">All posts &rarr;</a></p>"#,
            recent
        )
    };

    let content = format!(
        r#"        <section class="hero">
            <h1>{}</h1>
            <p class="muted">{}</p>
        </section>
        <section>
            <h2>Recent posts</h2>
            {}
        </section>"#,
        html_escape(&config.site.title),
        html_escape(&config.feed.description),
        recent_section
    );

    layout(config, &config.site.title, &content, is_preview)
}

/// Blog index with the search box and every published post
pub fn render_blog_index(config: &SiteConfig, listing: &Listing<'_>, is_preview: bool) -> String {
    let posts: String = listing.posts.iter().map(post_card).collect();

    let content = format!(
        r#"        <h1>Blog Posts</h1>
        <input type="search" id="search-input" class="search" placeholder="Search posts..." autocomplete="off">
        <div id="blog-list" class="post-list">
{}        </div>"#,
        posts
    );

    let title = format!("Blog - {}", config.site.title);
    layout(config, &title, &content, is_preview)
}

/// Full page for the post at `index` in `listing`, with older/newer links
pub fn render_post_page(
    config: &SiteConfig,
    listing: &Listing<'_>,
    index: usize,
    is_preview: bool,
) -> Option<String> {
    let post = listing.posts.get(index)?;
    let title = post.item.display_title();

    let mut nav = String::new();
    if let Some(older) = listing.older(index) {
        nav.push_str(&format!(
            r#"<a class="button" href="{}">&larr; {}</a>"#,
            html_escape(&older.url()),
            html_escape(older.item.display_title())
        ));
    }
    if let Some(newer) = listing.newer(index) {
        nav.push_str(&format!(
            r#"<a class="button" href="{}">{} &rarr;</a>"#,
            html_escape(&newer.url()),
            html_escape(newer.item.display_title())
        ));
    }

    let content = format!(
        r#"        <article class="post">
            <h1>{}</h1>
            <p class="muted">{}</p>
            <div class="prose">
{}
            </div>
        </article>
        <nav class="post-nav">{}</nav>"#,
        html_escape(title),
        display_date(post),
        render_markdown(&post.item.body),
        nav
    );

    let page_title = format!("{} - {}", title, config.site.title);
    Some(layout(config, &page_title, &content, is_preview))
}
