//! Development server with live reload

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::net::SocketAddr;
use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::generator::Generator;
use crate::helpers::url_for;
use crate::routes::{Resolution, Route};
use crate::{Folio, Site};

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

/// Server state
struct ServerState {
    folio: Folio,
    /// Replaced wholesale after each regeneration
    site: RwLock<Arc<Site>>,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

impl ServerState {
    fn site(&self) -> Arc<Site> {
        match self.site.read() {
            Ok(site) => site.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn replace_site(&self, site: Site) {
        match self.site.write() {
            Ok(mut current) => *current = Arc::new(site),
            Err(poisoned) => *poisoned.into_inner() = Arc::new(site),
        }
    }
}

/// What a request path is answered with
#[derive(Debug, PartialEq, Eq)]
enum Target {
    /// An asset in the public directory, by its path below the site root
    File(String),
    /// A generated page
    Page { file: PathBuf, status: StatusCode },
    Redirect(String),
}

/// Load the site, write it out, and return it for serving
fn regenerate(folio: &Folio) -> Result<Site> {
    let site = Site::load(folio)?;
    Generator::new(folio)?.generate(&site)?;
    Ok(site)
}

/// Generate the site and start the development server
pub async fn start(folio: &Folio, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    tracing::info!("Generating static files...");
    let site = regenerate(folio)?;

    // Create broadcast channel for live reload notifications
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let state = Arc::new(ServerState {
        folio: folio.clone(),
        site: RwLock::new(Arc::new(site)),
        reload_tx,
        live_reload: watch,
    });

    // Create router with live reload endpoint
    let app = Router::new()
        .route("/__livereload", get(livereload_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}{}", ip, port, url_for(&folio.config, "/"));
    println!("Server running at {}", url);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    // Open browser if requested
    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    // Start file watcher if watch mode is enabled
    if watch {
        let state = state.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(state) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch for file changes, regenerate, and trigger reload
fn watch_and_reload(state: Arc<ServerState>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    let source_dir = &state.folio.source_dir;
    if source_dir.exists() {
        debouncer
            .watcher()
            .watch(source_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", source_dir);
    }

    let config_path = state.folio.config_path();
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    // Handle file change events
    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                // Filter out editor and VCS noise
                let relevant_events: Vec<_> = events
                    .iter()
                    .filter(|e| {
                        let path_str = e.path.to_string_lossy();
                        !path_str.contains(".git")
                            && !path_str.contains(".DS_Store")
                            && !path_str.ends_with('~')
                    })
                    .collect();

                if relevant_events.is_empty() {
                    continue;
                }

                for event in &relevant_events {
                    tracing::info!("File changed: {}", event.path.display());
                }

                // Configuration may have changed too
                let result = Folio::new(&state.folio.base_dir).and_then(|f| regenerate(&f));
                match result {
                    Ok(site) => {
                        state.replace_site(site);
                        tracing::info!("Regenerated successfully");
                        // Notify all connected clients to reload
                        let _ = state.reload_tx.send(());
                    }
                    Err(e) => {
                        tracing::error!("Generation failed: {:#}", e);
                    }
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

/// Handle WebSocket connection for live reload
async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            // Wait for reload signal
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            // Handle incoming messages (ping/pong)
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Decide how to answer a request path.
///
/// Files that exist in the public directory and are not pages are served
/// as they are; everything else goes through the routing table.
fn locate(folio: &Folio, site: &Site, path: &str) -> Target {
    let route_path = strip_root(&folio.config.root, path);

    let decoded = percent_decode_str(&route_path).decode_utf8_lossy();
    let relative = Path::new(decoded.trim_start_matches('/'));
    let is_plain = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    let is_page = relative
        .extension()
        .map(|ext| ext == "html")
        .unwrap_or(false);
    let has_name = relative.components().next().is_some();
    if is_plain && !is_page && has_name && folio.public_dir.join(relative).is_file() {
        return Target::File(route_path);
    }

    match site.resolve(&route_path) {
        Resolution::Page(route) => {
            let status = if route == Route::NotFound {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::OK
            };
            Target::Page {
                file: folio.public_dir.join(route.output_path()),
                status,
            }
        }
        Resolution::Redirect(target) => Target::Redirect(url_for(&folio.config, &target)),
    }
}

/// Remove the configured site root from a request path
fn strip_root(root: &str, path: &str) -> String {
    let root = root.trim_end_matches('/');
    match path.strip_prefix(root) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.to_string(),
        _ => path.to_string(),
    }
}

/// Fallback handler that serves files and injects the live reload script
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let site = state.site();
    let target = locate(&state.folio, &site, request.uri().path());

    match target {
        Target::File(path) => {
            let (mut parts, body) = request.into_parts();
            parts.uri = match path.parse() {
                Ok(uri) => uri,
                Err(_) => return (StatusCode::BAD_REQUEST, "Bad path").into_response(),
            };
            let request = Request::from_parts(parts, body);

            let mut service = ServeDir::new(&state.folio.public_dir);
            match service.try_call(request).await {
                Ok(response) => response.into_response(),
                Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
            }
        }
        Target::Page { file, status } => serve_page(&file, status, state.live_reload).await,
        Target::Redirect(location) => {
            tracing::debug!("Redirecting {} to {}", request.uri().path(), location);
            Redirect::temporary(&location).into_response()
        }
    }
}

async fn serve_page(file: &Path, status: StatusCode, live_reload: bool) -> Response {
    match tokio::fs::read_to_string(file).await {
        Ok(content) if live_reload => (status, Html(inject_live_reload(&content))).into_response(),
        Ok(content) => (status, Html(content)).into_response(),
        Err(e) => {
            tracing::warn!("Failed to read {:?}: {}", file, e);
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
    }
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replace("</body>", LIVE_RELOAD_SCRIPT)
    } else {
        // If no </body> tag, append to end
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
