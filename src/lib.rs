//! Blockforge
//!
//! A typed page-block model and a deterministic HTML generation engine, with
//! a small pluggable project store.
//!
//! Pages are flat ordered lists of [`Block`]s. [`Block::new`] stamps out a
//! block with its type's registered defaults, [`generate_html`] serializes a
//! block list into one standalone HTML document string, and [`ProjectStore`]
//! persists named block lists behind interchangeable backends.
//!
//! # Example
//!
//! ```
//! use blockforge::{generate_html, Block, BlockType};
//!
//! # fn main() -> blockforge::Result<()> {
//! let page = vec![
//!     Block::new(BlockType::Heading)?,
//!     Block::new(BlockType::Paragraph)?,
//! ];
//!
//! let html = generate_html(&page);
//! assert!(html.starts_with("<!DOCTYPE html>"));
//! assert!(html.contains("<h2>Sample Heading</h2>"));
//! # Ok(())
//! # }
//! ```

pub mod block;
pub mod error;
pub mod project;
pub mod render;
pub mod store;

pub use block::{Block, BlockType, Content, Properties};
pub use error::{Error, Result};
pub use project::{Project, ProjectDraft, ProjectPatch};
pub use render::generate_html;
pub use store::{JsonFileStore, MemoryStore, ProjectStore};
