use std::path::Path;
use std::sync::mpsc;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches the two store files for edits made outside this process.
///
/// The TUI holds the whole store in memory; when another `dose` invocation
/// or an editor rewrites `cabinet.json` or `dosette.toml`, a reload gets
/// queued. Everything else in `dosette/` (`.lock`, `.state.json`, save
/// tempfiles) is this process's own traffic and is ignored.
pub struct StoreWatcher {
    rx: mpsc::Receiver<()>,
    _watcher: RecommendedWatcher,
}

const TRACKED_FILES: [&str; 2] = ["cabinet.json", "dosette.toml"];

impl StoreWatcher {
    pub fn start(dosette_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let mut watcher =
            notify::recommended_watcher(move |result: Result<Event, notify::Error>| {
                let Ok(event) = result else { return };
                if !matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    return;
                }
                let tracked = event.paths.iter().any(|p| {
                    p.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| TRACKED_FILES.contains(&n))
                });
                if tracked {
                    let _ = tx.send(());
                }
            })?;
        // Both files live directly in dosette/
        watcher.watch(dosette_dir, RecursiveMode::NonRecursive)?;
        Ok(StoreWatcher {
            rx,
            _watcher: watcher,
        })
    }

    /// Whether a tracked file changed since the last call. Drains the queue,
    /// so a burst of events still means one reload.
    pub fn changed(&self) -> bool {
        let mut changed = false;
        while self.rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}
