//! Markup adapters: the XML codec and the document store built on it.

mod codec;
mod store;

pub use codec::{XmlError, parse_document, write_document};
pub use store::XmlDocumentStore;
