use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chirp_logging::chirp_debug;
use fs2::FileExt;

use crate::StoreError;

pub const LOCK_FILENAME: &str = ".chirp.lock";

/// Advisory lock held for the duration of one workflow run.
///
/// Two runs against the same root would otherwise race on listing and
/// relocation and could select the same photo twice. The lock belongs to the
/// open file handle, so the OS releases it when the process exits, however it
/// exits. The file itself is left in place; only the lock matters.
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
    _file: File,
}

impl RunLock {
    pub fn acquire(root: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(root)?;
        let path = root.join(LOCK_FILENAME);
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        if let Err(err) = file.try_lock_exclusive() {
            if err.kind() == fs2::lock_contended_error().kind() {
                return Err(StoreError::Locked(path));
            }
            return Err(StoreError::Io(err));
        }

        // Holder pid, for humans inspecting a busy lock.
        file.set_len(0)?;
        writeln!(file, "{}", std::process::id())?;
        chirp_debug!("Acquired run lock {:?}", path);
        Ok(Self { path, _file: file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        // Closing `_file` releases the lock.
        chirp_debug!("Releasing run lock {:?}", self.path);
    }
}
