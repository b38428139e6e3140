//! Rotating file writer with size-based rotation and backup retention.
//!
//! [`FileWriter`] is the sink behind the `fmt` layer. Each formatted event
//! arrives as one write; before it is appended the file size is checked, and
//! a file over the limit is renamed to `<name>.<ext>.<unix_timestamp>` so a
//! fresh one can start. A second rotation within the same second appends a
//! counter. Only the newest backups are kept.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// The file is opened lazily on the first write, so construction never fails.
/// An internal `Mutex` serializes writers.
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    writer: Mutex<Option<fs::File>>,
}

impl FileWriter {
    /// Creates a writer for `file_path` rotating at 10 MB.
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limit(file_path, MAX_FILE_SIZE_BYTES)
    }

    /// Creates a writer rotating once the file exceeds `max_bytes`.
    #[must_use]
    pub const fn with_limit(file_path: PathBuf, max_bytes: u64) -> Self {
        Self {
            file_path,
            max_bytes,
            writer: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Appends `bytes` to the file, rotating first if it has grown too large.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be rotated, opened, or written, or if the lock
    /// was poisoned by a panicking writer.
    pub fn append(&self, bytes: &[u8]) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}")))?;

        self.check_and_rotate(&mut writer)?;

        if writer.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *writer = Some(file);
        }

        let file = writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No file available"))?;

        file.write_all(bytes)?;
        file.flush()?;
        drop(writer);

        Ok(())
    }

    fn check_and_rotate(&self, writer: &mut Option<fs::File>) -> io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.file_path) {
            if metadata.len() > self.max_bytes {
                *writer = None;
                self.rotate_files()?;
            }
        }
        Ok(())
    }

    /// Extension of the live file, `log` when it has none.
    fn extension(&self) -> &str {
        self.file_path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("log")
    }

    fn rotate_files(&self) -> io::Result<()> {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or(std::time::Duration::from_secs(0))
            .as_secs();

        if self.file_path.exists() {
            fs::rename(&self.file_path, self.backup_path(timestamp))?;
        }

        self.cleanup_old_backups()
    }

    /// First free backup name for `timestamp`. Rotations within the same
    /// second get a `.1`, `.2`, ... suffix.
    fn backup_path(&self, timestamp: u64) -> PathBuf {
        let stem = format!("{}.{timestamp}", self.extension());
        let mut candidate = self.file_path.with_extension(&stem);
        let mut counter = 1_u32;
        while candidate.exists() {
            candidate = self.file_path.with_extension(format!("{stem}.{counter}"));
            counter += 1;
        }
        candidate
    }

    /// Deletes all but the newest [`MAX_BACKUP_FILES`] backups. Individual
    /// deletion errors are ignored.
    fn cleanup_old_backups(&self) -> io::Result<()> {
        let parent_dir = self
            .file_path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?;

        let file_name = self
            .file_path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Invalid file name"))?;
        let prefix = format!("{file_name}.");

        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        backups.sort_by(|a, b| {
            let a_time = fs::metadata(a).and_then(|m| m.modified()).ok();
            let b_time = fs::metadata(b).and_then(|m| m.modified()).ok();
            b_time.cmp(&a_time)
        });

        for old_backup in backups.iter().skip(MAX_BACKUP_FILES) {
            let _ = fs::remove_file(old_backup);
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

    fn backups(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.starts_with("bookscope.log."))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn appends_to_a_lazily_created_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileWriter::new(dir.path().join("bookscope.log"));
        assert!(!writer.path().exists());

        (&writer).write_all(b"first\n").unwrap();
        (&writer).write_all(b"second\n").unwrap();

        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn oversized_file_is_rotated_before_the_next_write() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileWriter::with_limit(dir.path().join("bookscope.log"), 8);

        writer.append(b"0123456789\n").unwrap();
        writer.append(b"fresh\n").unwrap();

        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "fresh\n");
        let rotated = backups(dir.path());
        assert_eq!(rotated.len(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join(&rotated[0])).unwrap(),
            "0123456789\n"
        );
    }

    #[test]
    fn same_second_backups_get_a_counter() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileWriter::new(dir.path().join("bookscope.log"));
        assert_eq!(writer.backup_path(42), dir.path().join("bookscope.log.42"));

        fs::write(dir.path().join("bookscope.log.42"), "first").unwrap();
        assert_eq!(writer.backup_path(42), dir.path().join("bookscope.log.42.1"));

        fs::write(dir.path().join("bookscope.log.42.1"), "second").unwrap();
        assert_eq!(writer.backup_path(42), dir.path().join("bookscope.log.42.2"));
    }

    #[test]
    fn back_to_back_rotations_keep_every_backup() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileWriter::with_limit(dir.path().join("bookscope.log"), 0);

        writer.append(b"one").unwrap();
        writer.append(b"two").unwrap();
        writer.append(b"three").unwrap();

        let mut contents: Vec<String> = backups(dir.path())
            .iter()
            .map(|name| fs::read_to_string(dir.path().join(name)).unwrap())
            .collect();
        contents.sort();
        assert_eq!(contents, vec!["one", "two"]);
        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "three");
    }

    #[test]
    fn only_three_backups_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        for stamp in 1..=5 {
            fs::write(dir.path().join(format!("bookscope.log.{stamp}")), "old").unwrap();
        }
        fs::write(dir.path().join("other.log.1"), "untouched").unwrap();

        let writer = FileWriter::with_limit(dir.path().join("bookscope.log"), 0);
        writer.append(b"x").unwrap();
        writer.append(b"y").unwrap();

        assert_eq!(backups(dir.path()).len(), MAX_BACKUP_FILES);
        assert!(dir.path().join("other.log.1").exists());
    }

    #[test]
    fn works_as_a_fmt_writer() {
        use tracing_subscriber::layer::SubscriberExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookscope.log");
        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(FileWriter::new(path.clone())),
        );

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(books = 3, "shelf loaded");
        });

        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("shelf loaded"));
        assert!(contents.contains("books=3"));
    }
}
