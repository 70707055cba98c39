//! Input side: turning source text into a document tree

use std::io::{self, Read};

use rendition_ast::{
    metadata, Block, BlockKind, Listener, ListenerError, MetaData, StructureError, Syntax,
};
use thiserror::Error;

/// Errors raised while parsing input
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid JSON tree: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid tree structure: {0}")]
    Structure(#[from] StructureError),

    #[error("Listener failed: {0}")]
    Listener(#[from] ListenerError),
}

/// Result type for parsing
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parses one source syntax
pub trait Parser {
    fn syntax(&self) -> Syntax;

    /// Parse `source` into a document tree
    fn parse(&self, source: &str) -> Result<Block>;

    fn parse_reader(&self, reader: &mut dyn Read) -> Result<Block> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        self.parse(&source)
    }

    /// Parse `source` and stream its events into `listener`
    fn parse_events(&self, source: &str, listener: &mut dyn Listener) -> Result<()> {
        self.parse(source)?.traverse(listener)?;
        Ok(())
    }
}

/// Parser for the serialized tree form (`json/1.0`)
///
/// The root is always a document: a bare block is wrapped in one. The
/// document's metadata records the source syntax unless it already names one.
/// Trees with children under a leaf block, or with parameters that no event
/// would carry, are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTreeParser;

impl JsonTreeParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for JsonTreeParser {
    fn syntax(&self) -> Syntax {
        Syntax::json_1_0()
    }

    fn parse(&self, source: &str) -> Result<Block> {
        let block: Block = serde_json::from_str(source)?;
        block.validate()?;
        let mut document = if matches!(block.kind, BlockKind::Document { .. }) {
            block
        } else {
            Block::document(MetaData::new(), vec![block])
        };

        if let BlockKind::Document { meta_data } = &mut document.kind {
            if !meta_data.contains(metadata::SYNTAX) {
                meta_data.add_meta_data(metadata::SYNTAX, self.syntax().to_id_string());
            }
        }
        log::debug!("Parsed JSON tree with {} top-level blocks", document.children.len());
        Ok(document)
    }
}
