//! Project tree watcher.
//!
//! Watches the project directory recursively and turns raw filesystem events
//! into debounced build triggers. Only changes that can affect the build are
//! interesting: source files and the pom itself. Editors save in bursts, so
//! events within the debounce window collapse into one trigger.

use anyhow::{Context, Result};
use notify::{Config as NotifyConfig, Event, PollWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::{Duration, Instant};

/// Source extensions that trigger a rebuild.
pub const SOURCE_EXTENSIONS: &[&str] = &["clj", "groovy", "java", "scala"];

/// The project descriptor file; changing it always triggers a rebuild.
pub const PROJECT_FILE: &str = "pom.xml";

/// A debounced, build-relevant change.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    /// The path that tripped the trigger (one of possibly several changed).
    pub path: PathBuf,
}

/// Watches a project tree and delivers [`ChangeEvent`]s on a channel.
///
/// Recursive mode picks up directories created after the watch started, so a
/// fresh package full of sources still triggers builds.
pub struct ProjectWatcher {
    /// Kept alive to maintain watching.
    _watcher: Box<dyn Watcher + Send>,
    event_receiver: Receiver<ChangeEvent>,
}

impl std::fmt::Debug for ProjectWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectWatcher").finish_non_exhaustive()
    }
}

/// Is a change to `path` worth a rebuild?
fn is_build_relevant(path: &Path) -> bool {
    if path.file_name() == Some(OsStr::new(PROJECT_FILE)) {
        return true;
    }
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => SOURCE_EXTENSIONS.contains(&ext),
        None => false,
    }
}

/// Build the event-handler closure shared by both watcher backends.
///
/// Filters to build-relevant paths, applies debouncing, and sends
/// [`ChangeEvent`]s on `tx`.
fn make_event_handler(
    debounce_delay: Duration,
    tx: Sender<ChangeEvent>,
    last_event_time: Arc<Mutex<Option<Instant>>>,
) -> impl Fn(std::result::Result<Event, notify::Error>) + Send + 'static {
    move |result| {
        let event = match result {
            Ok(event) => event,
            Err(err) => {
                log::warn!("watch error: {err}");
                return;
            }
        };

        if !matches!(
            event.kind,
            notify::EventKind::Create(_) | notify::EventKind::Modify(_) | notify::EventKind::Remove(_)
        ) {
            return;
        }

        let Some(path) = event.paths.iter().find(|path| is_build_relevant(path)) else {
            return;
        };

        let should_send = {
            let now = Instant::now();
            let mut last = last_event_time.lock();
            match *last {
                Some(last_time) if now.duration_since(last_time) < debounce_delay => {
                    log::trace!("debouncing change to {}", path.display());
                    false
                }
                _ => {
                    *last = Some(now);
                    true
                }
            }
        };

        if should_send {
            log::debug!("build-relevant change: {}", path.display());
            if let Err(err) = tx.send(ChangeEvent { path: path.clone() }) {
                log::error!("failed to deliver change event: {err}");
            }
        }
    }
}

impl ProjectWatcher {
    /// Watch `project_dir` recursively.
    ///
    /// Tries the platform-native backend first (inotify on Linux, kqueue on
    /// macOS, ReadDirectoryChanges on Windows); if that fails to initialize,
    /// as it can inside containers or on network filesystems, falls back to a
    /// `PollWatcher` checking every 500 ms.
    pub fn new(project_dir: &Path, debounce_ms: u64) -> Result<Self> {
        if !project_dir.is_dir() {
            anyhow::bail!("project directory not found: {}", project_dir.display());
        }

        let (tx, rx) = channel::<ChangeEvent>();
        let debounce_delay = Duration::from_millis(debounce_ms);
        let last_event_time: Arc<Mutex<Option<Instant>>> = Arc::new(Mutex::new(None));

        let mut watcher = Self::create_watcher(debounce_delay, tx, last_event_time)?;
        watcher
            .watch(project_dir, RecursiveMode::Recursive)
            .with_context(|| format!("failed to watch project directory: {}", project_dir.display()))?;

        log::info!("watching {} for source changes", project_dir.display());

        Ok(Self { _watcher: watcher, event_receiver: rx })
    }

    fn create_watcher(
        debounce_delay: Duration,
        tx: Sender<ChangeEvent>,
        last_event_time: Arc<Mutex<Option<Instant>>>,
    ) -> Result<Box<dyn Watcher + Send>> {
        let fallback_tx = tx.clone();
        let fallback_last = Arc::clone(&last_event_time);

        let handler = make_event_handler(debounce_delay, tx, last_event_time);
        match notify::recommended_watcher(handler) {
            Ok(watcher) => {
                log::debug!("project watcher: using the native backend");
                Ok(Box::new(watcher))
            }
            Err(err) => {
                log::warn!("project watcher: native backend unavailable ({err}); falling back to polling");
                let handler = make_event_handler(debounce_delay, fallback_tx, fallback_last);
                let watcher = PollWatcher::new(
                    handler,
                    NotifyConfig::default().with_poll_interval(Duration::from_millis(500)),
                )
                .context("failed to create the fallback PollWatcher")?;
                Ok(Box::new(watcher))
            }
        }
    }

    /// Wait for the next trigger. `None` once the watcher is gone.
    pub fn recv(&self) -> Option<ChangeEvent> {
        self.event_receiver.recv().ok()
    }

    /// Non-blocking check for a pending trigger. Draining pending triggers
    /// after a build collapses a save burst into at most one follow-up build.
    pub fn try_recv(&self) -> Option<ChangeEvent> {
        self.event_receiver.try_recv().ok()
    }
}
