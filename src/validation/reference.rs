use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

/// The two curated lists used for classification.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReferenceLists {
    pub free_providers: HashSet<String>,
    pub common_usernames: HashSet<String>,
}

impl ReferenceLists {
    pub fn is_free_provider(&self, hostname: &str) -> bool {
        self.free_providers.contains(hostname)
    }

    pub fn is_common_username(&self, username: &str) -> bool {
        self.common_usernames.contains(username)
    }
}

/// Load-once store for [`ReferenceLists`].
///
/// The first caller of [`ReferenceData::get`] reads both files; everyone after
/// that, on any thread, gets the same shared lists. A failed load leaves the
/// store empty so the next caller sees the same error.
#[derive(Debug)]
pub struct ReferenceData {
    free_providers_path: PathBuf,
    common_usernames_path: PathBuf,
    lists: Mutex<Option<Arc<ReferenceLists>>>,
    loads: AtomicUsize,
}

impl ReferenceData {
    pub fn new(free_providers_path: impl Into<PathBuf>, common_usernames_path: impl Into<PathBuf>) -> Self {
        Self {
            free_providers_path: free_providers_path.into(),
            common_usernames_path: common_usernames_path.into(),
            lists: Mutex::new(None),
            loads: AtomicUsize::new(0),
        }
    }

    /// A store that is already populated and never touches the filesystem.
    pub fn preloaded(lists: ReferenceLists) -> Self {
        Self {
            free_providers_path: PathBuf::new(),
            common_usernames_path: PathBuf::new(),
            lists: Mutex::new(Some(Arc::new(lists))),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn get(&self) -> Result<Arc<ReferenceLists>> {
        let mut guard = self.lists.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(lists) = guard.as_ref() {
            return Ok(Arc::clone(lists));
        }

        let lists = Arc::new(ReferenceLists {
            free_providers: read_list(&self.free_providers_path)?,
            common_usernames: read_list(&self.common_usernames_path)?,
        });
        self.loads.fetch_add(1, Ordering::SeqCst);
        info!(
            "Loaded {} free providers and {} common usernames",
            lists.free_providers.len(),
            lists.common_usernames.len()
        );

        *guard = Some(Arc::clone(&lists));
        Ok(lists)
    }

    pub fn is_loaded(&self) -> bool {
        self.lists
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or_else(|poisoned| poisoned.into_inner().is_some())
    }

    /// How many times the files have been read from disk.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

/// Reads a line-delimited list, skipping blank lines and `#` comments and
/// stripping trailing whitespace.
pub fn read_list(path: &Path) -> Result<HashSet<String>> {
    let to_error = |source| Error::ReferenceData {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(to_error)?;
    let mut entries = HashSet::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(to_error)?;
        if line.starts_with('#') {
            continue;
        }
        let entry = line.trim_end();
        if !entry.is_empty() {
            entries.insert(entry.to_string());
        }
    }
    Ok(entries)
}
