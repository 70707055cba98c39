use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use rendition_ast::{Event, EventResult, Listener};

use super::{ChainingListener, ListenerChain, StageKind};

/// Adapts a plain [`Listener`] (typically a renderer) into a chain stage
///
/// The listener handles the event first, then the event is forwarded to the
/// next stage, if any. The listener is shared: keep a [`handle`](Self::handle)
/// to read its output once the chain is done.
pub struct ListenerStage<L> {
    kind: StageKind,
    listener: Rc<RefCell<L>>,
}

impl<L: Listener + 'static> ListenerStage<L> {
    pub fn new(kind: StageKind, listener: L) -> Self {
        Self::shared(kind, Rc::new(RefCell::new(listener)))
    }

    pub fn shared(kind: StageKind, listener: Rc<RefCell<L>>) -> Self {
        Self { kind, listener }
    }

    /// Shared handle to the wrapped listener
    pub fn handle(&self) -> Rc<RefCell<L>> {
        Rc::clone(&self.listener)
    }

    pub fn listener(&self) -> Ref<'_, L> {
        self.listener.borrow()
    }

    pub fn listener_mut(&self) -> RefMut<'_, L> {
        self.listener.borrow_mut()
    }
}

impl<L: Listener + 'static> ChainingListener for ListenerStage<L> {
    fn kind(&self) -> StageKind {
        self.kind
    }

    fn on_event(&self, event: &Event<'_>, chain: &ListenerChain) -> EventResult {
        event.dispatch(&mut *self.listener.borrow_mut())?;
        chain.forward(self.kind, event)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
