//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use hexaforge_core::{
    application::ports::FileSink,
    error::{HexaforgeError, HexaforgeResult},
};

/// In-memory file sink. Clones share the same tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSink {
    inner: Arc<RwLock<MemoryFileSinkInner>>,
}

#[derive(Debug, Default)]
struct MemoryFileSinkInner {
    files: BTreeMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFileSink {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path.as_ref()))
            .unwrap_or(false)
    }
}

fn poisoned() -> HexaforgeError {
    HexaforgeError::Internal {
        message: "memory file sink lock poisoned".into(),
    }
}

impl FileSink for MemoryFileSink {
    fn create_dir_all(&self, path: &Path) -> HexaforgeResult<()> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> HexaforgeResult<()> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(HexaforgeError::filesystem(
                    path,
                    "Parent directory does not exist",
                ));
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> HexaforgeResult<String> {
        self.read_file(path)
            .ok_or_else(|| HexaforgeError::filesystem(path, "File does not exist"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }
}
