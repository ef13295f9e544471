use std::fs;
use std::io;
use std::path::Path;

use tempfile::NamedTempFile;

/// Ensure a directory exists and is writable; create it if missing.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    if dir.exists() {
        if !fs::metadata(dir)?.is_dir() {
            return Err(io::Error::other(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir)?;
    }
    // Basic writability probe: the temp file is removed on drop.
    NamedTempFile::new_in(dir)?;
    Ok(())
}
