//! Local key-value file with atomic writes.
//!
//! All keys live in one JSON object file. Every write replaces the file via a
//! temporary file and rename in the same directory, so readers never observe
//! a partial write.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};

use crate::error::LayoutError;

/// File name of the key-value store inside its directory.
pub const STORE_FILE_NAME: &str = "property-client.json";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Key-value strings persisted in one JSON file.
#[derive(Debug)]
pub struct LocalStore {
    dir: Dir,
    root: Utf8PathBuf,
}

impl LocalStore {
    /// Open (creating if needed) the store directory `root`.
    ///
    /// # Errors
    /// Returns [`LayoutError::Io`] when the directory cannot be created or
    /// opened.
    pub fn open(root: &Utf8Path) -> Result<Self, LayoutError> {
        let io_error = |err: io::Error| LayoutError::Io {
            path: root.to_path_buf(),
            message: err.to_string(),
        };
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(io_error)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(io_error)?;
        Ok(Self {
            dir,
            root: root.to_path_buf(),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> Utf8PathBuf {
        self.root.join(STORE_FILE_NAME)
    }

    /// Value stored under `key`, if any.
    ///
    /// # Errors
    /// Returns [`LayoutError::Io`] when the file exists but cannot be read,
    /// and [`LayoutError::Encoding`] when it is not a JSON object of strings.
    pub fn get(&self, key: &str) -> Result<Option<String>, LayoutError> {
        Ok(self.read_all()?.remove(key))
    }

    /// Store `value` under `key`, replacing the file atomically.
    ///
    /// # Errors
    /// Returns [`LayoutError`] when the existing file cannot be read or the
    /// new one cannot be written.
    pub fn set(&self, key: &str, value: String) -> Result<(), LayoutError> {
        let mut entries = self.read_all().unwrap_or_default();
        entries.insert(key.to_owned(), value);
        let contents = serde_json::to_string_pretty(&entries).map_err(|err| {
            LayoutError::Encoding {
                message: err.to_string(),
            }
        })?;
        write_atomic(&self.dir, Utf8Path::new(STORE_FILE_NAME), &contents).map_err(|message| {
            LayoutError::Io {
                path: self.path(),
                message,
            }
        })
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, LayoutError> {
        let contents = match self.dir.read_to_string(STORE_FILE_NAME) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => {
                return Err(LayoutError::Io {
                    path: self.path(),
                    message: err.to_string(),
                });
            }
        };
        serde_json::from_str(&contents).map_err(|err| LayoutError::Encoding {
            message: err.to_string(),
        })
    }
}

/// Write `contents` to `path` inside `dir` via a hidden temporary file and
/// rename.
fn write_atomic(dir: &Dir, path: &Utf8Path, contents: &str) -> Result<(), String> {
    let file_name = path
        .file_name()
        .ok_or_else(|| format!("{path} does not name a file"))?;
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{file_name}.tmp.{}.{suffix}.{counter}",
        std::process::id()
    );

    write_to_temp_file(dir, &tmp_name, contents).map_err(|err| {
        drop(dir.remove_file(&tmp_name));
        err.to_string()
    })?;
    rename_temp_to_target(dir, &tmp_name, file_name).map_err(|err| {
        drop(dir.remove_file(&tmp_name));
        err.to_string()
    })?;
    // Best-effort directory sync.
    drop(dir.open(".").and_then(|parent| parent.sync_all()));
    Ok(())
}

fn write_to_temp_file(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(windows)]
fn rename_temp_to_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists, so remove it first.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_temp_to_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let temp = tempfile::tempdir().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().join("state")).expect("utf8 path");
        (temp, root)
    }

    #[rstest]
    fn missing_file_reads_as_empty(temp_root: (TempDir, Utf8PathBuf)) {
        let (_temp, root) = temp_root;
        let store = LocalStore::open(&root).expect("open store");
        assert_eq!(store.get("anything"), Ok(None));
    }

    #[rstest]
    fn values_persist_across_reopen(temp_root: (TempDir, Utf8PathBuf)) {
        let (_temp, root) = temp_root;
        let store = LocalStore::open(&root).expect("open store");
        store.set("alpha", "1".to_owned()).expect("write alpha");
        store.set("beta", "2".to_owned()).expect("write beta");

        let reopened = LocalStore::open(&root).expect("reopen store");
        assert_eq!(reopened.get("alpha"), Ok(Some("1".to_owned())));
        assert_eq!(reopened.get("beta"), Ok(Some("2".to_owned())));
    }

    #[rstest]
    fn writes_leave_no_temporary_files(temp_root: (TempDir, Utf8PathBuf)) {
        let (_temp, root) = temp_root;
        let store = LocalStore::open(&root).expect("open store");
        store.set("alpha", "1".to_owned()).expect("write alpha");

        let names: Vec<String> = std::fs::read_dir(&root)
            .expect("list dir")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![STORE_FILE_NAME.to_owned()]);
    }

    #[rstest]
    fn corrupt_file_is_an_encoding_error(temp_root: (TempDir, Utf8PathBuf)) {
        let (_temp, root) = temp_root;
        let store = LocalStore::open(&root).expect("open store");
        std::fs::write(store.path(), "not json").expect("write garbage");

        assert!(matches!(
            store.get("alpha"),
            Err(LayoutError::Encoding { .. })
        ));
        store.set("alpha", "1".to_owned()).expect("overwrite garbage");
        assert_eq!(store.get("alpha"), Ok(Some("1".to_owned())));
    }
}
