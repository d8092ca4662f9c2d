//! Rotating log file writer.
//!
//! [`FileWriter`] appends formatted log records to a file and rotates it once
//! it grows past a size limit, keeping a fixed number of timestamped backups.
//! It implements `tracing_subscriber`'s `MakeWriter`, so a `fmt` layer can write
//! straight into it.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;

/// Size at which the log file is rotated (10 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Backups kept after rotation.
pub const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe, size-rotated log file.
///
/// The file is opened lazily on the first write, so construction never fails.
/// Backups are named `<file name>.<unix millis>`.
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    file: Mutex<Option<File>>,
}

impl FileWriter {
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            file: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Appends `buf`, rotating first if the file is over the limit.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if rotation, opening, or writing fails, or if the
    /// internal lock was poisoned.
    pub fn append(&self, buf: &[u8]) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::other(format!("log writer lock poisoned: {e}")))?;

        if self.over_limit() {
            *file = None;
            self.rotate()?;
        }

        if file.is_none() {
            *file = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            );
        }
        let handle = file
            .as_mut()
            .ok_or_else(|| io::Error::other("log file unavailable"))?;

        handle.write_all(buf)?;
        handle.flush()
    }

    fn over_limit(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|metadata| metadata.len() > self.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = chrono::Utc::now().timestamp_millis();
        let mut backup = self.file_path.clone().into_os_string();
        backup.push(format!(".{stamp}"));

        if self.file_path.exists() {
            fs::rename(&self.file_path, PathBuf::from(backup))?;
        }
        self.prune_backups()
    }

    fn prune_backups(&self) -> io::Result<()> {
        let parent = self
            .file_path
            .parent()
            .ok_or_else(|| io::Error::other("log file has no parent directory"))?;
        let prefix = self
            .file_path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| format!("{name}."))
            .ok_or_else(|| io::Error::other("log file name is not valid UTF-8"))?;

        let mut backups: Vec<PathBuf> = fs::read_dir(parent)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        // Newest first; the millisecond suffix sorts the same as age.
        backups.sort_by(|a, b| b.cmp(a));

        for stale in backups.iter().skip(self.max_backups) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

impl Write for &FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for FileWriter {
    type Writer = &'a Self;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileWriter::new(dir.path().join("jokebox.log"));

        writer.append(b"first\n").unwrap();
        writer.append(b"second\n").unwrap();

        let contents = fs::read_to_string(writer.path()).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn rotates_and_prunes_backups() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileWriter::with_limits(dir.path().join("jokebox.log"), 4, 1);

        for line in ["aaaaaa\n", "bbbbbb\n", "cccccc\n"] {
            writer.append(line.as_bytes()).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names.len(), 2, "current file plus one backup: {names:?}");
        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "cccccc\n");
    }
}
