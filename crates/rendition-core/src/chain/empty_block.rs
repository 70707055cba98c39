use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use rendition_ast::{Event, EventResult};

use super::{ChainingListener, ListenerChain, StageKind};

/// Tells whether the current container block has received any content
///
/// Renderers use it on end events to skip or collapse empty blocks.
#[derive(Debug, Default)]
pub struct EmptyBlockStage {
    // One flag per open container: has it seen a child event yet
    containers: RefCell<Vec<bool>>,
}

impl EmptyBlockStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while the innermost open block has no child event yet
    pub fn is_current_container_block_empty(&self) -> bool {
        self.containers.borrow().last().is_some_and(|seen| !seen)
    }

    fn mark_content(&self) {
        if let Some(seen) = self.containers.borrow_mut().last_mut() {
            *seen = true;
        }
    }
}

impl ChainingListener for EmptyBlockStage {
    fn kind(&self) -> StageKind {
        StageKind::EmptyBlock
    }

    fn on_event(&self, event: &Event<'_>, chain: &ListenerChain) -> EventResult {
        let kind = event.kind();
        if kind.is_begin() {
            self.mark_content();
            self.containers.borrow_mut().push(false);
            chain.forward(self.kind(), event)
        } else if kind.is_end() {
            let result = chain.forward(self.kind(), event);
            self.containers.borrow_mut().pop();
            result
        } else {
            self.mark_content();
            chain.forward(self.kind(), event)
        }
    }

    fn is_stackable(&self) -> bool {
        true
    }

    fn create_instance(&self) -> Option<Rc<dyn ChainingListener>> {
        Some(Rc::new(EmptyBlockStage::new()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
