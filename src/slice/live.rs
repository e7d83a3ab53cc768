//! Live slice data: file-backed streams with a single observer, and the
//! binder that owns the one active subscription.
//!
//! Subscribing resolves the identifier to its backing document, delivers
//! the current content once, then watches the file so edits reach the
//! viewer without rebinding. Dropping a subscription stops the watcher.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use anyhow::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use super::content::Slice;
use super::registry::PackageRegistry;
use super::uri::SliceUri;

/// An update pushed by a live slice stream.
#[derive(Debug, Clone, PartialEq)]
pub enum SliceUpdate {
    /// New content for the bound identifier.
    Content(Slice),
    /// The backing document is absent or stopped parsing.
    Gone,
}

/// A single live subscription to the slice behind one identifier.
pub struct LiveSlice {
    uri: SliceUri,
    backing: Option<PathBuf>,
    rx: Option<Receiver<()>>,
    _watcher: Option<RecommendedWatcher>,
    /// Current content is delivered on the first poll after subscribing.
    pending_initial: bool,
}

impl LiveSlice {
    /// Subscribe to the live stream for `uri`. Never fails: an identifier
    /// nothing serves yields an inert subscription that stays silent.
    pub fn subscribe(registry: &PackageRegistry, uri: &SliceUri) -> Self {
        let backing = registry
            .resolve(&uri.authority)
            .and_then(|provider| provider.content_path(uri));

        let (watcher, rx) = match &backing {
            Some(path) => match watch_file(path) {
                Ok((watcher, rx)) => (Some(watcher), Some(rx)),
                Err(e) => {
                    log::warn!("no watch on {uri}: {e:#}");
                    (None, None)
                }
            },
            None => (None, None),
        };

        Self {
            uri: uri.clone(),
            backing,
            rx,
            _watcher: watcher,
            pending_initial: true,
        }
    }

    pub fn uri(&self) -> &SliceUri {
        &self.uri
    }

    /// Drain the stream (non-blocking). Returns the freshest state when
    /// anything changed since the last poll.
    pub fn poll(&mut self) -> Option<SliceUpdate> {
        let mut dirty = std::mem::take(&mut self.pending_initial);
        if let Some(rx) = &self.rx {
            while rx.try_recv().is_ok() {
                dirty = true;
            }
        }
        if !dirty {
            return None;
        }
        Some(self.load())
    }

    fn load(&self) -> SliceUpdate {
        let Some(path) = &self.backing else {
            return SliceUpdate::Gone;
        };
        let Ok(text) = std::fs::read_to_string(path) else {
            return SliceUpdate::Gone;
        };
        match Slice::from_json(&text) {
            Ok(slice) => SliceUpdate::Content(slice),
            Err(e) => {
                log::warn!("dropping update for {}: {e:#}", self.uri);
                SliceUpdate::Gone
            }
        }
    }
}

/// Watch the parent directory and signal whenever the target file is
/// created, modified, or removed. The file itself may not exist yet.
fn watch_file(path: &Path) -> Result<(RecommendedWatcher, Receiver<()>)> {
    let (tx, rx) = mpsc::channel();
    let target = path.to_path_buf();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                let relevant =
                    event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove();
                if relevant && event.paths.iter().any(|p| p == &target) {
                    let _ = tx.send(());
                }
            }
        },
        Config::default().with_poll_interval(Duration::from_millis(500)),
    )?;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    watcher.watch(dir, RecursiveMode::NonRecursive)?;

    Ok((watcher, rx))
}

/// Owner of the single active binding between the display surface and a
/// live stream. All swaps and teardowns go through here so the invariant
/// holds in one place: the previous subscription is dropped before a new
/// one is installed, and at most one stream feeds the display.
#[derive(Default)]
pub struct SliceBinder {
    current: Mutex<Option<LiveSlice>>,
}

impl SliceBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new subscription, tearing the previous one down first.
    pub fn rebind(&self, live: LiveSlice) {
        let mut current = self.lock();
        drop(current.take());
        *current = Some(live);
    }

    /// Release the active subscription, if any.
    pub fn unbind(&self) {
        self.lock().take();
    }

    pub fn is_bound(&self) -> bool {
        self.lock().is_some()
    }

    /// Identifier of the active subscription.
    pub fn bound_uri(&self) -> Option<SliceUri> {
        self.lock().as_ref().map(|live| live.uri().clone())
    }

    /// Poll the active subscription for an update (non-blocking).
    pub fn poll(&self) -> Option<SliceUpdate> {
        self.lock().as_mut().and_then(LiveSlice::poll)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<LiveSlice>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn registry_with_provider(tmp: &TempDir) -> PackageRegistry {
        let package_dir = tmp.path().join("pkg");
        fs::create_dir_all(package_dir.join("slices")).unwrap();
        fs::write(
            package_dir.join("package.toml"),
            r#"
            name = "com.example"

            [[provider]]
            authority = "com.example.slices"
            exported = true
            "#,
        )
        .unwrap();
        PackageRegistry::new(tmp.path().to_path_buf())
    }

    fn write_slice(tmp: &TempDir, rel: &str, title: &str) {
        let path = tmp.path().join("pkg").join("slices").join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, format!(r#"{{"title": "{title}"}}"#)).unwrap();
    }

    #[test]
    fn initial_content_arrives_on_first_poll() {
        let tmp = TempDir::new().unwrap();
        let registry = registry_with_provider(&tmp);
        write_slice(&tmp, "today.json", "Weather");

        let mut live = LiveSlice::subscribe(&registry, &SliceUri::new("com.example.slices", "today"));
        match live.poll() {
            Some(SliceUpdate::Content(slice)) => assert_eq!(slice.title, "Weather"),
            other => panic!("expected content, got {other:?}"),
        }
        // Nothing changed since.
        assert_eq!(live.poll(), None);
    }

    #[test]
    fn unresolvable_identifier_yields_inert_subscription() {
        let tmp = TempDir::new().unwrap();
        let registry = registry_with_provider(&tmp);

        let mut live = LiveSlice::subscribe(&registry, &SliceUri::new("no.such.authority", "x"));
        assert_eq!(live.poll(), Some(SliceUpdate::Gone));
        assert_eq!(live.poll(), None);
    }

    #[test]
    fn file_edits_reach_an_established_subscription() {
        let tmp = TempDir::new().unwrap();
        let registry = registry_with_provider(&tmp);
        write_slice(&tmp, "today.json", "Before");

        let uri = SliceUri::new("com.example.slices", "today");
        let mut live = LiveSlice::subscribe(&registry, &uri);
        assert!(matches!(live.poll(), Some(SliceUpdate::Content(_))));

        write_slice(&tmp, "today.json", "After");

        // The watcher delivers asynchronously; poll until it does.
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        loop {
            match live.poll() {
                Some(SliceUpdate::Content(slice)) if slice.title == "After" => break,
                _ if std::time::Instant::now() > deadline => {
                    panic!("update never arrived");
                }
                _ => std::thread::sleep(Duration::from_millis(20)),
            }
        }
    }

    #[test]
    fn rebind_replaces_the_previous_subscription() {
        let tmp = TempDir::new().unwrap();
        let registry = registry_with_provider(&tmp);

        let binder = SliceBinder::new();
        let a = SliceUri::new("com.example.slices", "a");
        let b = SliceUri::new("com.example.slices", "b");

        binder.rebind(LiveSlice::subscribe(&registry, &a));
        binder.rebind(LiveSlice::subscribe(&registry, &b));

        assert_eq!(binder.bound_uri(), Some(b));
        assert!(binder.is_bound());

        binder.unbind();
        assert!(!binder.is_bound());
        assert_eq!(binder.poll(), None);
    }
}
