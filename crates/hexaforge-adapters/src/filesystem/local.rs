//! Local filesystem adapter using std::fs.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use hexaforge_core::{
    application::ports::FileSink,
    error::{HexaforgeError, HexaforgeResult},
};
use tracing::trace;

/// Production file sink backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSink;

impl LocalFileSink {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl FileSink for LocalFileSink {
    fn create_dir_all(&self, path: &Path) -> HexaforgeResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> HexaforgeResult<()> {
        trace!(path = %path.display(), bytes = content.len(), "Writing file");
        let file = File::create(path).map_err(|e| map_io_error(path, e, "create file"))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(content.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> HexaforgeResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> HexaforgeError {
    HexaforgeError::filesystem(path, format!("Failed to {operation}: {e}"))
}
