//! Transparent delegate

use rendition_ast::{Event, EventResult, Listener};

/// Forwards every event, unchanged, to a single wrapped listener
///
/// Decorators embed a `WrappingListener`, handle the callbacks they care
/// about and pass everything else to [`Listener::on_event`] on the wrapper,
/// which re-dispatches it to the wrapped listener's matching callback.
#[derive(Debug, Default, Clone)]
pub struct WrappingListener<L> {
    wrapped: L,
}

impl<L: Listener> WrappingListener<L> {
    pub fn new(wrapped: L) -> Self {
        Self { wrapped }
    }

    pub fn wrapped(&self) -> &L {
        &self.wrapped
    }

    pub fn wrapped_mut(&mut self) -> &mut L {
        &mut self.wrapped
    }

    pub fn into_inner(self) -> L {
        self.wrapped
    }
}

impl<L: Listener> Listener for WrappingListener<L> {
    fn on_event(&mut self, event: &Event<'_>) -> EventResult {
        event.dispatch(&mut self.wrapped)
    }
}
