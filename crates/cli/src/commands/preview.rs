use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Query, Request, State},
    http::{StatusCode, header},
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use blogkit_core::DisplayableItem;
use blogkit_generator::feed::{Channel, build_feed, render_rss};
use blogkit_generator::filter::{apply_filter, visible};
use blogkit_generator::listing::Listing;
use blogkit_generator::{content_type, generate_site};
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use serde::Deserialize;
use std::{io, net::SocketAddr, path::PathBuf};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::build::STATIC_DIR;
use super::site::load_site;

/// Number of consecutive ports tried when the requested one is taken
const MAX_PORT_ATTEMPTS: u16 = 20;

#[derive(Clone)]
struct AppState {
    site_path: PathBuf,
    reload_tx: broadcast::Sender<()>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

/// Start preview server with hot reload for local development.
///
/// Every request re-reads site.toml and the posts, so edits show up on the
/// next reload without a rebuild. `/rss.xml` is built fresh per request.
///
/// # Arguments
///
/// * `path` - Path to site directory containing site.toml
/// * `port` - Preferred port; the next free one is used if it is taken
pub async fn run(path: PathBuf, port: u16) -> Result<()> {
    println!("📝 Starting preview server...");
    println!("   Site: {}", path.display());

    let site = load_site(&path)?;
    println!("   ✓ Loaded: {}", site.config.site.title);
    println!("   ✓ Posts: {}", site.posts.len());

    // Create broadcast channel for reload events
    let (reload_tx, _) = broadcast::channel::<()>(100);

    let state = AppState {
        site_path: path.clone(),
        reload_tx: reload_tx.clone(),
    };

    let app = router(state);

    // Start file watcher
    let watcher_path = path.clone();
    let watcher_tx = reload_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = watch_files(watcher_path, watcher_tx).await {
            tracing::error!("File watcher error: {:#}", e);
        }
    });

    let (listener, bound_port) = bind_available(port).await?;
    println!("\n🚀 Preview ready at: http://localhost:{}", bound_port);
    println!("   Press Ctrl+C to stop\n");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/_reload", get(sse_handler))
        .route("/rss.xml", get(rss_handler))
        .route("/search", get(search_handler))
        .fallback(site_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to `port`, moving on to the following ports while they are in use
async fn bind_available(port: u16) -> Result<(TcpListener, u16)> {
    for offset in 0..MAX_PORT_ATTEMPTS {
        let Some(candidate) = port.checked_add(offset) else {
            break;
        };

        match TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], candidate))).await {
            Ok(listener) => return Ok((listener, candidate)),
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                println!("   Port {} is in use, trying the next one...", candidate);
            }
            Err(e) => return Err(e).context(format!("Failed to bind to port {}", candidate)),
        }
    }

    anyhow::bail!(
        "No free port found in {}..{}",
        port,
        port.saturating_add(MAX_PORT_ATTEMPTS)
    )
}

/// Watch for file changes and trigger reload
async fn watch_files(path: PathBuf, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher =
        notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;

    // Watch site directory recursively
    watcher.watch(&path, RecursiveMode::Recursive)?;

    while let Some(event) = rx.recv().await {
        match event.kind {
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) => {
                // Filter out temporary files and hidden files
                if event.paths.iter().any(|p| {
                    let filename = p.file_name().unwrap_or_default().to_string_lossy();
                    !filename.starts_with('.') && !filename.ends_with('~')
                }) {
                    tracing::info!("File changed, reloading");
                    let _ = reload_tx.send(());
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// SSE endpoint for hot reload
async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let mut rx = state.reload_tx.subscribe();

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(()) => yield Ok(Event::default().data("reload")),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Feed endpoint, rebuilt from the posts on every request
async fn rss_handler(State(state): State<AppState>) -> Response {
    let site = match load_site(&state.site_path) {
        Ok(site) => site,
        Err(e) => return error_page(&e),
    };

    if !site.config.feed.enabled {
        return (StatusCode::NOT_FOUND, "RSS feed is disabled in site.toml").into_response();
    }

    let feed = build_feed(&site.posts, &site.config.site.url).limit(site.config.feed.limit);
    let xml = render_rss(&feed, &Channel::from(&site.config.feed));

    ([(header::CONTENT_TYPE, content_type("rss.xml"))], xml).into_response()
}

/// Posts the search box would keep visible for `?q=`
async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let site = match load_site(&state.site_path) {
        Ok(site) => site,
        Err(e) => return error_page(&e),
    };

    let listing = Listing::new(&site.posts);
    let mut items = listing.displayable_items();
    apply_filter(&mut items, &params.q);

    let matches: Vec<DisplayableItem> = visible(&items).cloned().collect();
    Json(matches).into_response()
}

/// Serve a generated page, falling back to the static directory
async fn site_handler(State(state): State<AppState>, request: Request) -> Response {
    let site = match load_site(&state.site_path) {
        Ok(site) => site,
        Err(e) => return error_page(&e),
    };

    let generated = match generate_site(&site.config, &site.posts, true) {
        Ok(generated) => generated,
        Err(e) => return error_page(&anyhow::Error::from(e)),
    };

    if let Some(path) = output_path(request.uri().path())
        && let Some(data) = generated.get(&path)
    {
        return ([(header::CONTENT_TYPE, content_type(&path))], data.to_vec()).into_response();
    }

    let static_dir = ServeDir::new(state.site_path.join(STATIC_DIR));
    match static_dir.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// Map a request path to the generated file that answers it
fn output_path(uri_path: &str) -> Option<String> {
    let relative = uri_path.trim_start_matches('/');
    if relative.split('/').any(|segment| segment == "..") {
        return None;
    }

    if relative.is_empty() {
        return Some("index.html".to_string());
    }
    if relative.ends_with('/') {
        return Some(format!("{}index.html", relative));
    }

    let last = relative.rsplit('/').next().unwrap_or(relative);
    if last.contains('.') {
        Some(relative.to_string())
    } else {
        Some(format!("{}/index.html", relative))
    }
}

fn error_page(error: &anyhow::Error) -> Response {
    tracing::error!("{:#}", error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(format!(
            r#"<!DOCTYPE html>
<html><head><title>Error</title></head><body>
<h1>Configuration Error</h1>
<pre>{}</pre>
</body></html>"#,
            blogkit_generator::escape::html_escape(&format!("{:#}", error))
        )),
    )
        .into_response()
}
