//! Periodic authority suggestions.
//!
//! A dedicated background thread enumerates installed packages' provider
//! authorities at a fixed rate and ships each result over a channel. The
//! interaction thread drains the channel on its event-loop tick and
//! replaces the suggestion list wholesale; the thread itself never touches
//! UI state. A failed enumeration skips that tick without disturbing the
//! schedule.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::slice::PackageRegistry;

/// Handle to the refresh thread. Dropping it cancels future ticks.
pub struct AuthoritySuggester {
    rx: Receiver<Vec<String>>,
    cancelled: Arc<AtomicBool>,
    _thread: thread::JoinHandle<()>,
}

impl AuthoritySuggester {
    /// Spawn the refresh thread; the first tick fires immediately.
    pub fn spawn(packages_dir: PathBuf, period: Duration) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let thread = thread::Builder::new()
            .name("authorities-refresh".to_string())
            .spawn(move || {
                let registry = PackageRegistry::new(packages_dir);
                while !flag.load(Ordering::SeqCst) {
                    // A failed scan is a skipped tick, not a dead schedule.
                    if let Ok(authorities) = registry.authorities() {
                        if tx.send(authorities).is_err() {
                            break;
                        }
                    }
                    sleep_cancellable(period, &flag);
                }
            })
            .context("Failed to spawn authorities-refresh thread")?;

        Ok(Self {
            rx,
            cancelled,
            _thread: thread,
        })
    }

    /// Freshest refresh result since the last call, if any (non-blocking).
    /// Intermediate results from missed ticks are discarded.
    pub fn try_recv(&self) -> Option<Vec<String>> {
        let mut latest = None;
        while let Ok(authorities) = self.rx.try_recv() {
            latest = Some(authorities);
        }
        latest
    }

    /// Stop future ticks. Non-interrupting: an enumeration already in
    /// flight runs to completion.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl Drop for AuthoritySuggester {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Sleep for `period` in short steps so cancellation takes effect promptly.
fn sleep_cancellable(period: Duration, flag: &AtomicBool) {
    let step = Duration::from_millis(50);
    let mut slept = Duration::ZERO;
    while slept < period && !flag.load(Ordering::SeqCst) {
        let chunk = step.min(period - slept);
        thread::sleep(chunk);
        slept += chunk;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Instant;
    use tempfile::TempDir;

    fn write_package(dir: &std::path::Path, name: &str, authorities: &[&str]) {
        let package_dir = dir.join(name);
        fs::create_dir_all(&package_dir).unwrap();
        let mut manifest = format!("name = \"{name}\"\n");
        for authority in authorities {
            manifest.push_str(&format!(
                "\n[[provider]]\nauthority = \"{authority}\"\nexported = true\n"
            ));
        }
        fs::write(package_dir.join("package.toml"), manifest).unwrap();
    }

    fn recv_within(suggester: &AuthoritySuggester, timeout: Duration) -> Option<Vec<String>> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(authorities) = suggester.try_recv() {
                return Some(authorities);
            }
            if Instant::now() > deadline {
                return None;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn ticks_deliver_flat_authority_list() {
        let tmp = TempDir::new().unwrap();
        write_package(tmp.path(), "a", &["com.a.one", "com.dup"]);
        write_package(tmp.path(), "b", &["com.dup"]);

        let suggester =
            AuthoritySuggester::spawn(tmp.path().to_path_buf(), Duration::from_millis(10)).unwrap();

        let first = recv_within(&suggester, Duration::from_secs(5)).expect("first tick");
        assert_eq!(first, vec!["com.a.one", "com.dup", "com.dup"]);

        // Full replacement each tick: a static package set keeps the list
        // length constant, duplicates and all.
        let later = recv_within(&suggester, Duration::from_secs(5)).expect("later tick");
        assert_eq!(later.len(), 3);
    }

    #[test]
    fn failed_enumeration_skips_the_tick() {
        let missing = PathBuf::from("/nonexistent/packages-dir");
        let suggester = AuthoritySuggester::spawn(missing, Duration::from_millis(10)).unwrap();

        thread::sleep(Duration::from_millis(100));
        assert_eq!(suggester.try_recv(), None);
    }

    #[test]
    fn cancel_stops_future_ticks() {
        let tmp = TempDir::new().unwrap();
        write_package(tmp.path(), "a", &["com.a"]);

        let period = Duration::from_millis(10);
        let suggester = AuthoritySuggester::spawn(tmp.path().to_path_buf(), period).unwrap();
        recv_within(&suggester, Duration::from_secs(5)).expect("first tick");

        suggester.cancel();
        // Let any in-flight tick land, then drain.
        thread::sleep(period * 10);
        suggester.try_recv();

        thread::sleep(period * 10);
        assert_eq!(suggester.try_recv(), None);
    }
}
