//! Read-only browser for documentation trees such as the GNOME SDK docs.
//!
//! Navigation is confined to a document root. Files can be searched by name
//! or content, and HTML or Markdown pages are rendered as wrapped plain text
//! for reading in a terminal.

pub mod browser;
pub mod config;
pub mod error;
pub mod inspect;
pub mod render;
pub mod sandbox;
pub mod scan;

pub use browser::DocBrowser;
pub use config::Config;
pub use error::{LibrarianError, LibrarianResult};
