//! Rebuild the site when source files change

use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use notify::{Event, EventKind, RecursiveMode, Watcher};

use super::builder::{BuildError, BuildReport, SiteBuilder};

/// Quiet period that ends a burst of filesystem events
pub const DEBOUNCE: Duration = Duration::from_millis(200);

/// Build once, then rebuild after every burst of relevant changes.
///
/// `on_build` sees the result of each build. Failed builds are logged and
/// watching continues. Blocks until the event channel closes.
pub fn watch<F>(builder: &SiteBuilder, mut on_build: F) -> Result<()>
where
    F: FnMut(&Result<BuildReport, BuildError>),
{
    let source = builder.config().source.canonicalize()?;
    let output_dir = builder.config().output_dir();

    run_build(builder, &mut on_build);
    let output_dir = output_dir.canonicalize().unwrap_or(output_dir);

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx)?;
    watcher.watch(&source, RecursiveMode::Recursive)?;
    tracing::info!("Watching {} for changes", source.display());

    while let Ok(event) = rx.recv() {
        match event {
            Ok(event) if is_relevant(&event, &output_dir) => {
                let burst = drain_burst(&rx) + 1;
                tracing::info!("Change detected ({} events), rebuilding", burst);
                run_build(builder, &mut on_build);
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("Watch error: {}", e),
        }
    }

    Ok(())
}

/// Swallow events until the channel stays quiet for [`DEBOUNCE`]
fn drain_burst(rx: &mpsc::Receiver<notify::Result<Event>>) -> usize {
    let mut drained = 0;
    while let Ok(event) = rx.recv_timeout(DEBOUNCE) {
        if let Err(e) = event {
            tracing::warn!("Watch error: {}", e);
        }
        drained += 1;
    }
    drained
}

fn run_build<F>(builder: &SiteBuilder, on_build: &mut F)
where
    F: FnMut(&Result<BuildReport, BuildError>),
{
    let result = builder.build();
    if let Err(e) = &result {
        tracing::error!("Build failed: {}", e);
    }
    on_build(&result);
}

/// Whether an event should trigger a rebuild.
///
/// Reads and changes confined to the output directory or to hidden files
/// are ignored.
pub fn is_relevant(event: &Event, output_dir: &Path) -> bool {
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }

    event.paths.iter().any(|path| {
        let hidden = path
            .file_name()
            .map(|name| name.to_string_lossy().starts_with('.'))
            .unwrap_or(false);
        !hidden && !path.starts_with(output_dir)
    })
}
