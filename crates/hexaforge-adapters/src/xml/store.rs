//! [`DocumentStore`] over any [`FileSink`].

use std::path::Path;

use hexaforge_core::{
    application::ports::{DocumentStore, FileSink},
    domain::Document,
    error::{HexaforgeError, HexaforgeResult},
};
use tracing::{debug, warn};

use crate::filesystem::LocalFileSink;
use crate::xml::codec::{parse_document, write_document};

/// Reads and writes XML documents through a file sink.
#[derive(Debug, Clone, Default)]
pub struct XmlDocumentStore<S = LocalFileSink> {
    sink: S,
}

impl XmlDocumentStore {
    /// Store on the local filesystem.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: FileSink> XmlDocumentStore<S> {
    pub fn with_sink(sink: S) -> Self {
        Self { sink }
    }
}

impl<S: FileSink> DocumentStore for XmlDocumentStore<S> {
    fn open(&self, path: &Path) -> Option<Document> {
        if !self.sink.exists(path) {
            debug!(path = %path.display(), "No document to open");
            return None;
        }
        let content = match self.sink.read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Document unreadable");
                return None;
            }
        };
        match parse_document(&content) {
            Ok(document) => Some(document),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Document is not well-formed");
                None
            }
        }
    }

    fn save(&self, path: &Path, document: &Document) -> HexaforgeResult<()> {
        let xml = write_document(document)
            .map_err(|e| HexaforgeError::filesystem(path, format!("Failed to serialize: {e}")))?;
        self.sink.write_file(path, &xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFileSink;
    use hexaforge_core::domain::Element;

    fn store() -> (MemoryFileSink, XmlDocumentStore<MemoryFileSink>) {
        let sink = MemoryFileSink::new();
        sink.create_dir_all(Path::new("/p")).unwrap();
        (sink.clone(), XmlDocumentStore::with_sink(sink))
    }

    #[test]
    fn save_then_open() {
        let (sink, store) = store();
        let mut root = Element::new("project");
        root.append_child("artifactId", Some("shop"));
        store
            .save(Path::new("/p/pom.xml"), &Document::from_root(root))
            .unwrap();

        assert!(sink.read_file("/p/pom.xml").unwrap().starts_with("<?xml"));
        let opened = store.open(Path::new("/p/pom.xml")).unwrap();
        assert_eq!(opened.root().unwrap().child_text("artifactId"), Some("shop"));
    }

    #[test]
    fn missing_or_malformed_yield_none() {
        let (sink, store) = store();
        assert!(store.open(Path::new("/p/pom.xml")).is_none());

        sink.write_file(Path::new("/p/pom.xml"), "<project>").unwrap();
        assert!(store.open(Path::new("/p/pom.xml")).is_none());
    }
}
