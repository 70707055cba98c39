//! Renderers
//!
//! A renderer turns a document tree into text of a target syntax. Renderers
//! are listeners fed by [`Block::traverse`]; [`BlockRenderer`] packages one
//! together with its syntax so that it can be looked up by syntax id in a
//! [`RendererRegistry`](crate::registry::RendererRegistry).

pub mod events;
pub mod printer;

pub use events::{escape, format_event, EventsRenderer};
pub use printer::{Printer, StringPrinter, WriterPrinter};

use rendition_ast::{Block, EventResult, ListenerError, Syntax};

/// Renders a whole tree in one target syntax
pub trait BlockRenderer {
    /// Syntax produced
    fn syntax(&self) -> Syntax;

    fn render(&self, block: &Block, printer: &mut dyn Printer) -> EventResult;

    /// Render into a new `String`
    fn render_to_string(&self, block: &Block) -> Result<String, ListenerError> {
        let mut printer = StringPrinter::new();
        self.render(block, &mut printer)?;
        Ok(printer.into_string())
    }
}

/// [`BlockRenderer`] for `event/1.0`
#[derive(Debug, Clone, Copy, Default)]
pub struct EventsBlockRenderer;

impl BlockRenderer for EventsBlockRenderer {
    fn syntax(&self) -> Syntax {
        Syntax::event_1_0()
    }

    fn render(&self, block: &Block, printer: &mut dyn Printer) -> EventResult {
        let mut renderer = EventsRenderer::new(printer);
        block.traverse(&mut renderer)
    }
}
