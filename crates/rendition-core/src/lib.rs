//! rendition-core - Pipeline machinery for rendition
//!
//! Everything that sits between a parser and a renderer:
//!
//! - [`CompositeListener`] and [`WrappingListener`] to assemble listeners
//! - [`chain`]: the chaining pipeline and its built-in stages
//! - [`reference`]: link and image reference resolution
//! - [`renderer`]: printers and the `event/1.0` renderer
//! - [`parser`] and [`registry`]: syntax-keyed parsers and renderers
//! - [`config`]: `rendition.toml` settings
//!
//! # Example
//!
//! ```
//! use rendition_ast::{Block, MetaData};
//! use rendition_core::renderer::{BlockRenderer, EventsBlockRenderer};
//!
//! let doc = Block::document(MetaData::new(), vec![
//!     Block::paragraph(vec![Block::word("Hello")]),
//! ]);
//!
//! let events = EventsBlockRenderer.render_to_string(&doc).unwrap();
//! assert!(events.contains("onWord [Hello]"));
//! ```

pub mod chain;
pub mod composite;
pub mod config;
pub mod parser;
pub mod reference;
pub mod registry;
pub mod renderer;
pub mod wrapping;

pub use chain::{ChainError, ChainingListener, ListenerChain, StageKind};
pub use composite::CompositeListener;
pub use config::{ConfigError, Settings};
pub use parser::{JsonTreeParser, ParseError, Parser};
pub use reference::{
    ImageReferenceParser, LinkReferenceParser, ReferenceError, ResourceReferenceParser,
};
pub use registry::{ParserRegistry, RegistryError, RendererRegistry};
pub use renderer::{BlockRenderer, EventsRenderer, Printer, StringPrinter};
pub use wrapping::WrappingListener;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
