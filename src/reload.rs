//! Hot reload of JSON data files.
//!
//! The notify callback runs on its own thread and only forwards changed
//! paths over a channel; parsing and dispatch happen on the frame thread
//! when [`JsonWatcher::poll`] is called between frames.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub fn load_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(serde_json::from_str(&text)?)
}

/// Watches files under one directory and reports which keyed files changed.
pub struct JsonWatcher<K> {
    root: PathBuf,
    watches: HashMap<PathBuf, K>,
    rx: mpsc::Receiver<PathBuf>,
    #[allow(dead_code)]
    tx: mpsc::Sender<PathBuf>,
    // Dropping the watcher stops the notifications.
    _watcher: RecommendedWatcher,
}

impl<K: Clone> JsonWatcher<K> {
    pub fn new(root: &Path) -> Result<Self> {
        let root = fs::canonicalize(root).map_err(|e| Error::io(root, e))?;
        let (tx, rx) = mpsc::channel();
        let tx_for_watcher = tx.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| match res {
            Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                for path in event.paths {
                    let _ = tx_for_watcher.send(path);
                }
            }
            Ok(_) => {}
            Err(err) => warn!("watch error: {err}"),
        })?;
        watcher.watch(&root, RecursiveMode::Recursive)?;

        Ok(Self { root, watches: HashMap::new(), rx, tx, _watcher: watcher })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Registers `relative` under `key` and returns its current contents.
    ///
    /// The file stays registered even if it cannot be read yet, so creating
    /// it later still triggers a reload.
    pub fn watch(&mut self, relative: &Path, key: K) -> Result<Value> {
        let path = self.root.join(relative);
        let data = load_json(&path);
        self.watches.insert(path, key);
        data
    }

    /// Drains pending change notifications. Each changed file is read once
    /// per poll no matter how many events it produced.
    pub fn poll(&mut self) -> Vec<(K, Result<Value>)> {
        let mut seen = HashSet::new();
        let mut changed = Vec::new();

        for path in self.rx.try_iter() {
            let path = fs::canonicalize(&path).unwrap_or(path);
            if !seen.insert(path.clone()) {
                continue;
            }
            if let Some(key) = self.watches.get(&path) {
                debug!(path = %path.display(), "watched file changed");
                changed.push((key.clone(), load_json(&path)));
            }
        }

        changed
    }

    #[cfg(test)]
    fn notify_changed(&self, path: PathBuf) {
        let _ = self.tx.send(path);
    }
}
