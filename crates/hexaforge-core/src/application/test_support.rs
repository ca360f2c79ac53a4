//! In-process port doubles for unit tests.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::{
    application::ports::{DocumentStore, FileSink},
    domain::{Archetype, Document, ProjectInfo},
    error::{HexaforgeError, HexaforgeResult},
};

/// Files, directories and documents kept in memory.
#[derive(Default)]
pub struct Recorder {
    files: Mutex<BTreeMap<PathBuf, String>>,
    dirs: Mutex<BTreeSet<PathBuf>>,
    documents: Mutex<HashMap<PathBuf, Document>>,
}

impl Recorder {
    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.lock().unwrap().keys().cloned().collect()
    }

    pub fn has_dir(&self, path: impl AsRef<Path>) -> bool {
        self.dirs.lock().unwrap().contains(path.as_ref())
    }

    pub fn document(&self, path: impl AsRef<Path>) -> Option<Document> {
        self.documents.lock().unwrap().get(path.as_ref()).cloned()
    }
}

impl FileSink for Recorder {
    fn create_dir_all(&self, path: &Path) -> HexaforgeResult<()> {
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.ancestors() {
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> HexaforgeResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> HexaforgeResult<String> {
        self.file(path)
            .ok_or_else(|| HexaforgeError::filesystem(path, "file not found"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
            || self.dirs.lock().unwrap().contains(path)
            || self.documents.lock().unwrap().contains_key(path)
    }
}

impl DocumentStore for Recorder {
    fn open(&self, path: &Path) -> Option<Document> {
        self.document(path)
    }

    fn save(&self, path: &Path, document: &Document) -> HexaforgeResult<()> {
        self.documents
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), document.clone());
        Ok(())
    }
}

pub fn hexa_project() -> ProjectInfo {
    ProjectInfo::new(
        Archetype::Hexa,
        "com.acme",
        "shop",
        "com.acme",
        Path::new("/work/shop"),
    )
}
