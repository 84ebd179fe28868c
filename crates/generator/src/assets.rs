use blogkit_core::ThemeConfig;

/// Generate the site JavaScript code
///
/// Sidebar toggling, smooth in-page scrolling and the blog search box.
/// `applyFilter` receives the list and query explicitly; only the
/// `DOMContentLoaded` hook looks elements up.
pub fn generate_site_js() -> &'static str {
    r##"// Sidebar
function toggleSidebar() {
    const sidebar = document.getElementById('sidebar');
    const overlay = document.getElementById('overlay');
    const open = !sidebar.classList.contains('open');
    sidebar.classList.toggle('open', open);
    overlay.classList.toggle('open', open);
}

function closeSidebar() {
    document.getElementById('sidebar').classList.remove('open');
    document.getElementById('overlay').classList.remove('open');
}

// Blog search: show posts whose title or excerpt contains the query
function applyFilter(list, query) {
    const needle = query.toLowerCase();
    for (const post of list.querySelectorAll('.blog-post')) {
        const title = (post.getAttribute('data-title') || '').toLowerCase();
        const excerpt = (post.getAttribute('data-excerpt') || '').toLowerCase();
        post.style.display = title.includes(needle) || excerpt.includes(needle) ? '' : 'none';
    }
}

document.addEventListener('DOMContentLoaded', () => {
    document.querySelectorAll('a[href^="#"]').forEach(anchor => {
        anchor.addEventListener('click', event => {
            const target = document.querySelector(anchor.getAttribute('href'));
            if (!target) return;
            event.preventDefault();
            target.scrollIntoView({ behavior: 'smooth' });
            if (window.innerWidth <= 768) {
                closeSidebar();
            }
        });
    });

    const input = document.getElementById('search-input');
    const list = document.getElementById('blog-list');
    if (input && list) {
        input.addEventListener('input', () => applyFilter(list, input.value));
    }
});
"##
}

/// Generate the stylesheet with the theme colours as CSS custom properties
pub fn generate_styles_css(theme: &ThemeConfig) -> String {
    format!(
        r#"/* Theme */
:root {{
    --bg: {bg};
    --bg-soft: {bg_soft};
    --bg-card: {bg_card};
    --text: {text};
    --text-muted: {text_muted};
    --accent: {accent};
    --accent-soft: {accent_soft};
    --border: color-mix(in srgb, var(--accent-soft) 12%, transparent);
}}

* {{ margin: 0; padding: 0; box-sizing: border-box; }}

body {{
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    line-height: 1.7;
    color: var(--text);
    background: var(--bg);
}}

a {{ color: var(--accent-soft); text-decoration: none; }}
a:hover {{ color: var(--accent); }}

.muted {{ color: var(--text-muted); font-size: 0.9rem; }}

.topbar {{
    display: flex;
    align-items: center;
    gap: 1rem;
    padding: 1rem 1.5rem;
    background: var(--bg-soft);
    border-bottom: 1px solid var(--border);
}}

.brand {{ font-weight: 700; color: var(--text); }}

.menu-button, .sidebar-close {{
    background: none;
    border: none;
    color: var(--text);
    font-size: 1.5rem;
    cursor: pointer;
}}

.sidebar {{
    position: fixed;
    top: 0;
    left: 0;
    bottom: 0;
    width: 240px;
    padding: 1.5rem;
    display: none;
    flex-direction: column;
    gap: 1rem;
    background: var(--bg-card);
    border-right: 1px solid var(--border);
    z-index: 20;
}}

.sidebar.open {{ display: flex; }}
.sidebar-close {{ align-self: flex-end; }}

.overlay {{
    position: fixed;
    inset: 0;
    display: none;
    background: rgba(0, 0, 0, 0.5);
    z-index: 10;
}}

.overlay.open {{ display: block; }}

.content {{
    max-width: 760px;
    margin: 0 auto;
    padding: 2rem 1.5rem 4rem;
}}

h1 {{ font-size: 2rem; margin-bottom: 0.5rem; }}
h2 {{ font-size: 1.3rem; margin: 2rem 0 1rem; }}

.hero {{ padding: 2rem 0; border-bottom: 1px solid var(--border); }}

.search {{
    width: 100%;
    margin: 1.5rem 0;
    padding: 0.75rem 1rem;
    color: var(--text);
    background: var(--bg-soft);
    border: 1px solid var(--border);
    border-radius: 6px;
}}

.post-list {{ display: flex; flex-direction: column; gap: 1rem; }}

.blog-post {{
    display: block;
    padding: 1.25rem;
    color: var(--text);
    background: var(--bg-card);
    border: 1px solid var(--border);
    border-radius: 8px;
}}

.blog-post:hover {{ border-color: var(--accent); color: var(--text); }}

.prose {{ margin-top: 1.5rem; }}
.prose p, .prose ul, .prose ol, .prose pre, .prose table {{ margin-bottom: 1rem; }}
.prose ul, .prose ol {{ padding-left: 1.5rem; }}
.prose pre {{
    padding: 1rem;
    overflow-x: auto;
    background: var(--bg-soft);
    border-radius: 6px;
}}

.post-nav {{
    display: flex;
    justify-content: space-between;
    gap: 1rem;
    margin-top: 3rem;
}}

.button {{
    padding: 0.5rem 1rem;
    border: 1px solid var(--accent);
    border-radius: 6px;
}}

@media (max-width: 768px) {{
    .post-nav {{ flex-direction: column; }}
}}
"#,
        bg = theme.bg,
        bg_soft = theme.bg_soft,
        bg_card = theme.bg_card,
        text = theme.text,
        text_muted = theme.text_muted,
        accent = theme.accent,
        accent_soft = theme.accent_soft,
    )
}
