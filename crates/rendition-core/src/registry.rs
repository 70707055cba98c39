//! Parser and renderer lookup by syntax id
//!
//! Components are registered explicitly, as factories keyed by their
//! syntax id string (`event/1.0`, `json/1.0`). Nothing is discovered at
//! runtime: [`ParserRegistry::with_defaults`] and
//! [`RendererRegistry::with_defaults`] list the built-in components.

use std::collections::BTreeMap;

use rendition_ast::Syntax;
use thiserror::Error;

use crate::parser::{JsonTreeParser, Parser};
use crate::renderer::{BlockRenderer, EventsBlockRenderer};

/// Lookup failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("No parser registered for syntax [{0}]")]
    UnknownParser(String),

    #[error("No renderer registered for syntax [{0}]")]
    UnknownRenderer(String),
}

/// Result type for registry lookups
pub type Result<T> = std::result::Result<T, RegistryError>;

type ParserFactory = Box<dyn Fn() -> Box<dyn Parser>>;
type RendererFactory = Box<dyn Fn() -> Box<dyn BlockRenderer>>;

/// Parsers by source syntax
pub struct ParserRegistry {
    factories: BTreeMap<String, ParserFactory>,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ParserRegistry {
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registry holding the `json/1.0` tree parser
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(&Syntax::json_1_0(), || Box::new(JsonTreeParser::new()));
        registry
    }

    /// Register `factory` for `syntax`, replacing any previous one
    pub fn register<F>(&mut self, syntax: &Syntax, factory: F)
    where
        F: Fn() -> Box<dyn Parser> + 'static,
    {
        let id = syntax.to_id_string();
        log::debug!("Registered parser: {}", id);
        self.factories.insert(id, Box::new(factory));
    }

    /// A fresh parser for `syntax_id`
    pub fn parser(&self, syntax_id: &str) -> Result<Box<dyn Parser>> {
        self.factories
            .get(syntax_id)
            .map(|factory| factory())
            .ok_or_else(|| RegistryError::UnknownParser(syntax_id.to_string()))
    }

    pub fn contains(&self, syntax_id: &str) -> bool {
        self.factories.contains_key(syntax_id)
    }

    /// Registered syntax ids, sorted
    pub fn syntax_ids(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

/// Renderers by target syntax
pub struct RendererRegistry {
    factories: BTreeMap<String, RendererFactory>,
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl RendererRegistry {
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registry holding the `event/1.0` renderer
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(&Syntax::event_1_0(), || Box::new(EventsBlockRenderer));
        registry
    }

    pub fn register<F>(&mut self, syntax: &Syntax, factory: F)
    where
        F: Fn() -> Box<dyn BlockRenderer> + 'static,
    {
        let id = syntax.to_id_string();
        log::debug!("Registered renderer: {}", id);
        self.factories.insert(id, Box::new(factory));
    }

    pub fn renderer(&self, syntax_id: &str) -> Result<Box<dyn BlockRenderer>> {
        self.factories
            .get(syntax_id)
            .map(|factory| factory())
            .ok_or_else(|| RegistryError::UnknownRenderer(syntax_id.to_string()))
    }

    pub fn contains(&self, syntax_id: &str) -> bool {
        self.factories.contains_key(syntax_id)
    }

    pub fn syntax_ids(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Printer;
    use rendition_ast::{Block, EventResult};

    struct NodeCountRenderer;

    impl BlockRenderer for NodeCountRenderer {
        fn syntax(&self) -> Syntax {
            Syntax::plain_1_0()
        }

        fn render(&self, block: &Block, printer: &mut dyn Printer) -> EventResult {
            let nodes = block.paths().len();
            printer.print(&nodes.to_string())?;
            Ok(())
        }
    }

    #[test]
    fn test_default_parsers() {
        let registry = ParserRegistry::with_defaults();
        assert_eq!(registry.syntax_ids(), vec!["json/1.0"]);

        let parser = registry.parser("json/1.0").unwrap();
        assert_eq!(parser.syntax(), Syntax::json_1_0());
    }

    #[test]
    fn test_unknown_syntax() {
        assert_eq!(
            ParserRegistry::with_defaults().parser("xwiki/2.1").err(),
            Some(RegistryError::UnknownParser("xwiki/2.1".to_string()))
        );
        assert_eq!(
            RendererRegistry::empty().renderer("event/1.0").err(),
            Some(RegistryError::UnknownRenderer("event/1.0".to_string()))
        );
    }

    #[test]
    fn test_custom_renderer() {
        let mut registry = RendererRegistry::with_defaults();
        registry.register(&Syntax::plain_1_0(), || Box::new(NodeCountRenderer));

        assert!(registry.contains("plain/1.0"));
        assert_eq!(registry.syntax_ids(), vec!["event/1.0", "plain/1.0"]);

        let output = registry
            .renderer("plain/1.0")
            .unwrap()
            .render_to_string(&Block::paragraph(vec![Block::word("a")]))
            .unwrap();
        assert_eq!(output, "2");
    }
}
