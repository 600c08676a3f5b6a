//! File-based storage backend for persistent storage.

use crate::backend::{validate_name, StorageBackend};
use crate::error::StorageResult;
use parking_lot::Mutex;
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Extension of collection files, without the leading dot.
pub const FILE_EXTENSION: &str = "json";

/// Suffix appended to the file name while a write is in flight.
const TEMP_SUFFIX: &str = ".tmp";

/// A directory-based storage backend.
///
/// Each collection lives in `<dir>/<name>.json`. Data survives process
/// restarts.
///
/// # Durability
///
/// `write()` uses the write-then-rename pattern:
/// 1. Write to `<name>.json.tmp`
/// 2. Sync the temporary file
/// 3. Rename it over `<name>.json`
///
/// Readers therefore see either the old or the new blob, never a torn one.
/// Nothing coordinates writers in different processes; the last rename wins.
///
/// # Example
///
/// ```no_run
/// use docdb_storage::{StorageBackend, FileBackend};
/// use std::path::Path;
///
/// let backend = FileBackend::open_with_create_dirs(Path::new("data")).unwrap();
/// backend.write("users", b"[]").unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileBackend {
    /// Opens a backend rooted at an existing directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` does not exist or is not a directory.
    pub fn open(dir: &Path) -> StorageResult<Self> {
        let metadata = fs::metadata(dir)?;
        if !metadata.is_dir() {
            return Err(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("not a directory: {}", dir.display()),
            )
            .into());
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            write_lock: Mutex::new(()),
        })
    }

    /// Opens a backend, creating the directory (and parents) if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open_with_create_dirs(dir: &Path) -> StorageResult<Self> {
        fs::create_dir_all(dir)?;
        Self::open(dir)
    }

    /// Returns the root directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path backing the collection `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a valid collection name.
    pub fn file_path(&self, name: &str) -> StorageResult<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.{FILE_EXTENSION}")))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, name: &str) -> StorageResult<Option<Vec<u8>>> {
        let path = self.file_path(name)?;
        match fs::read(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, name: &str, data: &[u8]) -> StorageResult<()> {
        let path = self.file_path(name)?;
        let mut temp_name = path.clone().into_os_string();
        temp_name.push(TEMP_SUFFIX);
        let temp_path = PathBuf::from(temp_name);

        let _guard = self.write_lock.lock();

        if let Err(e) = replace_file(&temp_path, &path, data) {
            // The temp file may or may not exist at this point.
            let _ = fs::remove_file(&temp_path);
            tracing::warn!(path = %path.display(), error = %e, "collection write failed");
            return Err(e.into());
        }

        tracing::trace!(path = %path.display(), bytes = data.len(), "wrote collection file");
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_name(stem).is_ok() {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn size(&self, name: &str) -> StorageResult<Option<u64>> {
        let path = self.file_path(name)?;
        match fs::metadata(&path) {
            Ok(metadata) => Ok(Some(metadata.len())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Writes `data` to `temp_path`, syncs it and renames it over `path`.
fn replace_file(temp_path: &Path, path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);
    fs::rename(temp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use tempfile::tempdir;

    #[test]
    fn file_missing_collection_reads_none() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        assert_eq!(backend.read("users").unwrap(), None);
        assert_eq!(backend.size("users").unwrap(), None);
    }

    #[test]
    fn file_write_and_read() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        backend.write("users", b"[1, 2]").unwrap();
        assert_eq!(backend.read("users").unwrap(), Some(b"[1, 2]".to_vec()));
        assert!(dir.path().join("users.json").exists());
        assert!(!dir.path().join("users.json.tmp").exists());
    }

    #[test]
    fn file_write_replaces_whole_blob() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        backend.write("users", b"a much longer first payload").unwrap();
        backend.write("users", b"short").unwrap();

        assert_eq!(backend.read("users").unwrap(), Some(b"short".to_vec()));
        assert_eq!(backend.size("users").unwrap(), Some(5));
    }

    #[test]
    fn file_collections_are_isolated() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        backend.write("a", b"first").unwrap();
        backend.write("b", b"second").unwrap();

        assert_eq!(backend.read("a").unwrap(), Some(b"first".to_vec()));
        assert_eq!(backend.read("b").unwrap(), Some(b"second".to_vec()));
    }

    #[test]
    fn file_persistence() {
        let dir = tempdir().unwrap();

        {
            let backend = FileBackend::open(dir.path()).unwrap();
            backend.write("notes", b"persistent data").unwrap();
        }

        {
            let backend = FileBackend::open(dir.path()).unwrap();
            assert_eq!(
                backend.read("notes").unwrap(),
                Some(b"persistent data".to_vec())
            );
        }
    }

    #[test]
    fn file_list_only_reports_collection_files() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        backend.write("zeta", b"[]").unwrap();
        backend.write("alpha", b"[]").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();

        assert_eq!(backend.list().unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn file_failed_rename_removes_temp() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        std::fs::create_dir(dir.path().join("users.json")).unwrap();

        let result = backend.write("users", b"[]");
        assert!(matches!(result, Err(StorageError::Io(_))));
        assert!(!dir.path().join("users.json.tmp").exists());
        assert!(dir.path().join("users.json").is_dir());
    }

    #[test]
    fn file_rejects_invalid_names() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        let result = backend.write("../escape", b"x");
        assert!(matches!(result, Err(StorageError::InvalidName { .. })));
    }

    #[test]
    fn file_open_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let result = FileBackend::open(&dir.path().join("missing"));
        assert!(matches!(result, Err(StorageError::Io(_))));
    }

    #[test]
    fn file_create_with_dirs() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("nested").join("data");

        let backend = FileBackend::open_with_create_dirs(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(backend.path(), root);
    }
}
