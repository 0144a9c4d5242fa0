//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::{Folio, Site};

/// Generate the static site from a freshly loaded library
pub fn run(folio: &Folio) -> Result<()> {
    let start = Instant::now();

    let site = Site::load(folio)?;
    tracing::info!(
        "Loaded {} articles and {} sections",
        site.library().len(),
        site.catalogue().sections.len()
    );

    let generator = Generator::new(folio)?;
    generator.generate(&site)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Configuration is re-read on every rebuild so edits to it take effect
fn rebuild(folio: &Folio) -> Result<()> {
    let folio = Folio::new(&folio.base_dir)?;
    run(&folio)
}

/// Watch for file changes and regenerate.
///
/// Blocks the calling thread; async callers run it on a blocking task.
pub fn watch(folio: &Folio) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    // Watch source directory
    if folio.source_dir.exists() {
        watcher.watch(folio.source_dir.as_ref(), notify::RecursiveMode::Recursive)?;
    }

    // Watch config file
    let config_path = folio.config_path();
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");
    rebuild_on_events(folio, &rx);

    Ok(())
}

/// Rebuild for each burst of events until the sender goes away
fn rebuild_on_events<T>(folio: &Folio, rx: &Receiver<T>) {
    let mut last_rebuild: Option<Instant> = None;

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce: only rebuild if more than 500ms since last rebuild
                let due = last_rebuild
                    .map(|at| at.elapsed() > Duration::from_millis(500))
                    .unwrap_or(true);
                if due {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = rebuild(folio) {
                        tracing::error!("Generation failed: {}", e);
                    }
                    last_rebuild = Some(Instant::now());
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
