use std::any::Any;
use std::cell::Cell;

use rendition_ast::{Event, EventResult};

use super::{ChainingListener, ListenerChain, StageKind};

/// Counts consecutive new-line events
///
/// The count is updated before the event is forwarded: a new line increments
/// it, any other event resets it to zero. Later stages read it through
/// [`ListenerChain::inspect`].
#[derive(Debug, Default)]
pub struct ConsecutiveNewLineStage {
    count: Cell<usize>,
}

impl ConsecutiveNewLineStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of new lines received since the last other event
    pub fn count(&self) -> usize {
        self.count.get()
    }
}

impl ChainingListener for ConsecutiveNewLineStage {
    fn kind(&self) -> StageKind {
        StageKind::NewLineState
    }

    fn on_event(&self, event: &Event<'_>, chain: &ListenerChain) -> EventResult {
        match event {
            Event::NewLine => self.count.set(self.count.get() + 1),
            _ => self.count.set(0),
        }
        chain.forward(self.kind(), event)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
