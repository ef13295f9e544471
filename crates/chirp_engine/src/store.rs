use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chirp_core::Category;
use chirp_logging::{chirp_debug, chirp_info};
use thiserror::Error;

use crate::persist::ensure_dir;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("photo '{0}' not found in pending directory")]
    MissingSource(String),
    #[error("destination {0:?} is missing or not writable: {1}")]
    Destination(PathBuf, io::Error),
    #[error("cannot relocate into the {0} directory")]
    InvalidDestination(Category),
    #[error("another run holds the lock at {0:?}")]
    Locked(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A pending photo: its file name and the directory containing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub name: String,
    pub dir: PathBuf,
}

impl Photo {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }
}

/// Directory-backed photo collection rooted at a working directory.
///
/// Nothing is cached; every listing reads the directory again.
#[derive(Debug, Clone)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn dir(&self, category: Category) -> PathBuf {
        self.root.join(category.dir_name())
    }

    pub fn pending_path(&self, name: &str) -> PathBuf {
        self.dir(Category::Pending).join(name)
    }

    /// Regular, non-hidden files in the pending directory, sorted by name.
    /// A missing pending directory lists as empty.
    pub fn list_pending(&self) -> Result<Vec<Photo>, StoreError> {
        let dir = self.dir(Category::Pending);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::Io(err)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(ToOwned::to_owned) else {
                chirp_debug!("Skipping non UTF-8 file name {:?}", entry.file_name());
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            names.push(name);
        }
        names.sort();

        Ok(names
            .into_iter()
            .map(|name| Photo {
                name,
                dir: dir.clone(),
            })
            .collect())
    }

    /// Move `name` out of the pending directory into `to`, creating it if needed.
    ///
    /// An existing file at the destination is never overwritten; the moved
    /// photo takes the first free `stem(N).ext` name instead.
    pub fn relocate(&self, name: &str, to: Category) -> Result<PathBuf, StoreError> {
        if to == Category::Pending {
            return Err(StoreError::InvalidDestination(to));
        }
        let source = self.pending_path(name);
        if !source.is_file() {
            return Err(StoreError::MissingSource(name.to_string()));
        }

        let dest_dir = self.dir(to);
        ensure_dir(&dest_dir).map_err(|err| StoreError::Destination(dest_dir.clone(), err))?;
        let target = free_target(&dest_dir, name);

        move_file(&source, &target)?;
        chirp_info!("Moved photo to {} directory: {}", to, target.display());
        Ok(target)
    }
}

fn free_target(dir: &Path, name: &str) -> PathBuf {
    let first = dir.join(name);
    if !first.exists() {
        return first;
    }
    let path = Path::new(name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");

    let mut counter = 0u32;
    loop {
        counter += 1;
        let candidate = if ext.is_empty() {
            dir.join(format!("{stem}({counter})"))
        } else {
            dir.join(format!("{stem}({counter}).{ext}"))
        };
        if !candidate.exists() {
            return candidate;
        }
    }
}

fn move_file(source: &Path, target: &Path) -> io::Result<()> {
    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        Err(err) if is_cross_device(&err) => {
            chirp_debug!("rename {:?} -> {:?} crosses filesystems, copying", source, target);
            copy_then_remove(source, target)
        }
        Err(err) => Err(err),
    }
}

fn is_cross_device(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::CrossesDevices
}

/// The photo must end up in exactly one place: if anything fails after the
/// copy starts, the copy is removed and the source stays pending.
fn copy_then_remove(source: &Path, target: &Path) -> io::Result<()> {
    let result = fs::copy(source, target).and_then(|_| fs::remove_file(source));
    if result.is_err() && target.exists() {
        if let Err(cleanup) = fs::remove_file(target) {
            chirp_debug!("Failed to remove partial copy {:?}: {}", target, cleanup);
        }
    }
    result
}
