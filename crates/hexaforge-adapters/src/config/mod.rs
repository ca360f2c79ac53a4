//! Remote configuration sources.

mod file;
mod http;

pub use file::FileConfigSource;
pub use http::HttpConfigSource;
