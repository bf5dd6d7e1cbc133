//! File-backed warp store.
//!
//! The whole table lives in memory behind one mutex. Every mutation rewrites
//! the bound file while still holding the lock, so the file always reflects
//! some complete state of the table.

use crate::format::{format_line, is_comment, parse_line};
use crate::table::WarpTable;
use parking_lot::Mutex;
use qdwarp_common::{WarpError, WarpPosition, validate_name};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Default file name inside the world save directory.
pub const WARPS_FILE_NAME: &str = "warps.ini";

#[derive(Debug, Default)]
struct Inner {
    /// Save target, bound by the last `load`.
    path: Option<PathBuf>,
    table: WarpTable,
}

/// Shared warp store. Wrap in an `Arc` to hand it to command handlers.
#[derive(Debug, Default)]
pub struct WarpStore {
    inner: Mutex<Inner>,
}

impl WarpStore {
    /// Create an empty store with no save target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store and load it from `path`.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let store = Self::new();
        store.load(path);
        store
    }

    /// Replace the contents with what is in `path` and bind it as the save
    /// target. Returns the number of warps loaded.
    ///
    /// A missing file yields an empty store. Other read errors are logged and
    /// whatever was read before the error stays loaded. Malformed lines are
    /// skipped with a warning.
    pub fn load(&self, path: impl AsRef<Path>) -> usize {
        let path = path.as_ref();
        let mut inner = self.inner.lock();
        inner.table.clear();
        inner.path = Some(path.to_path_buf());

        match read_into(&mut inner.table, path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no warps file, starting empty");
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Error while loading warps");
            }
        }

        let count = inner.table.len();
        tracing::info!("Loaded {count} warps");
        count
    }

    /// The file mutations are saved to, if one is bound.
    pub fn path(&self) -> Option<PathBuf> {
        self.inner.lock().path.clone()
    }

    pub fn get(&self, name: &str) -> Option<WarpPosition> {
        self.inner.lock().table.get(name).cloned()
    }

    /// All names in insertion order.
    pub fn list(&self) -> Vec<String> {
        self.inner.lock().table.names().map(str::to_owned).collect()
    }

    /// Names containing `partial`, in insertion order.
    pub fn suggest(&self, partial: &str) -> Vec<String> {
        self.inner
            .lock()
            .table
            .names()
            .filter(|n| n.contains(partial))
            .map(str::to_owned)
            .collect()
    }

    /// Copy of the current table.
    pub fn snapshot(&self) -> WarpTable {
        self.inner.lock().table.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().table.is_empty()
    }

    /// Insert or overwrite without a uniqueness check, then save.
    ///
    /// Fails with [`WarpError::InvalidName`] for names the file format cannot
    /// hold.
    pub fn put(&self, name: impl Into<String>, pos: WarpPosition) -> Result<(), WarpError> {
        let name = name.into();
        validate_name(&name)?;
        let mut inner = self.inner.lock();
        inner.table.insert(name, pos);
        persist(&inner);
        Ok(())
    }

    /// Insert a new warp, failing with [`WarpError::NameTaken`] if the name
    /// is already used. Nothing is saved on failure.
    pub fn create(&self, name: impl Into<String>, pos: WarpPosition) -> Result<(), WarpError> {
        let name = name.into();
        validate_name(&name)?;
        let mut inner = self.inner.lock();
        if inner.table.contains(&name) {
            return Err(WarpError::NameTaken(name));
        }
        tracing::info!(warp = %name, dimension = %pos.dimension, "created warp");
        inner.table.insert(name, pos);
        persist(&inner);
        Ok(())
    }

    /// Remove a warp. Saves only if something was removed.
    pub fn remove(&self, name: &str) -> Option<WarpPosition> {
        let mut inner = self.inner.lock();
        let removed = inner.table.remove(name);
        if removed.is_some() {
            tracing::info!(warp = %name, "deleted warp");
            persist(&inner);
        }
        removed
    }

    /// Write the table to the bound file. Does nothing if none is bound.
    pub fn save(&self) -> Result<(), WarpError> {
        let inner = self.inner.lock();
        match &inner.path {
            Some(path) => Ok(write_table(&inner.table, path)?),
            None => {
                tracing::debug!("warp store has no file bound, skipping save");
                Ok(())
            }
        }
    }

    /// Write the table to `path` without changing the bound file.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), WarpError> {
        let inner = self.inner.lock();
        Ok(write_table(&inner.table, path.as_ref())?)
    }
}

/// Save after a mutation. Failure is logged; the mutation stands.
fn persist(inner: &Inner) {
    let Some(path) = &inner.path else {
        tracing::debug!("warp store has no file bound, skipping save");
        return;
    };
    if let Err(e) = write_table(&inner.table, path) {
        tracing::warn!(path = %path.display(), error = %e, "Failed to save warps");
    }
}

fn read_into(table: &mut WarpTable, path: &Path) -> io::Result<()> {
    let reader = BufReader::new(File::open(path)?);
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() || is_comment(&line) {
            continue;
        }
        match parse_line(&line) {
            Ok(warp) => {
                table.insert(warp.name, warp.position);
            }
            Err(e) => {
                tracing::warn!(line = idx + 1, error = %e, "skipping malformed warp line");
            }
        }
    }
    Ok(())
}

fn write_table(table: &WarpTable, path: &Path) -> io::Result<()> {
    let mut out = String::new();
    for (name, pos) in table.iter() {
        out.push_str(&format_line(name, pos));
        out.push('\n');
    }
    std::fs::write(path, out)
}
