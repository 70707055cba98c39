//! Chaining pipeline
//!
//! A [`ListenerChain`] is an ordered list of stage kinds, each mapped to the
//! currently active stage instance for that kind. A stage receives an event,
//! updates its own state, then forwards the event to the stage that follows
//! its kind in the chain. Because the chain is handed to every stage call,
//! later stages can query the state of earlier ones while an event is in
//! flight.
//!
//! ```text
//! event ──▶ [NewLineState] ──▶ [BlockState] ──▶ [EmptyBlock] ──▶ [Printer]
//!                 ▲                   ▲
//!                 └── queried by ─────┴──────── later stages
//! ```
//!
//! Stackable stages can be shadowed with a fresh instance for a nested scope
//! ([`ListenerChain::push_stage`]) and restored when the scope ends
//! ([`ListenerChain::pop_stage`]).

mod block_state;
mod empty_block;
mod meta_data;
mod newline;
mod stage;

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use rendition_ast::{Event, EventResult, Listener};
use thiserror::Error;

pub use block_state::BlockStateStage;
pub use empty_block::EmptyBlockStage;
pub use meta_data::MetaDataStage;
pub use newline::ConsecutiveNewLineStage;
pub use stage::ListenerStage;

/// Token identifying the kind of a chain stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    NewLineState,
    BlockState,
    EmptyBlock,
    MetaDataState,
    Printer,
    /// A collaborator-defined stage
    Custom(&'static str),
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::NewLineState => f.write_str("new-line-state"),
            StageKind::BlockState => f.write_str("block-state"),
            StageKind::EmptyBlock => f.write_str("empty-block"),
            StageKind::MetaDataState => f.write_str("meta-data-state"),
            StageKind::Printer => f.write_str("printer"),
            StageKind::Custom(name) => f.write_str(name),
        }
    }
}

/// Errors raised while assembling or restacking a chain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("No stage of kind [{0}] in the chain")]
    UnknownStage(StageKind),

    #[error("Stage [{0}] is not stackable")]
    NotStackable(StageKind),

    #[error("Stage [{0}] is already part of the chain")]
    DuplicateStage(StageKind),

    #[error("Cannot push a [{found}] listener onto stage [{expected}]")]
    KindMismatch { expected: StageKind, found: StageKind },
}

/// Result type for chain operations
pub type Result<T> = std::result::Result<T, ChainError>;

/// A stage of a [`ListenerChain`]
///
/// Stages take `&self` and keep their state in cells, so that a later stage
/// may read an earlier stage's state while that stage is still forwarding.
pub trait ChainingListener: Any {
    /// Kind token this stage is registered under
    fn kind(&self) -> StageKind;

    /// Handle `event`, then forward it along `chain`
    fn on_event(&self, event: &Event<'_>, chain: &ListenerChain) -> EventResult {
        chain.forward(self.kind(), event)
    }

    /// Whether [`create_instance`](Self::create_instance) yields a fresh
    /// instance for a nested scope
    fn is_stackable(&self) -> bool {
        false
    }

    /// A fresh instance for a nested scope, or `None` if not stackable
    fn create_instance(&self) -> Option<Rc<dyn ChainingListener>> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// Ordered registry of chain stages with per-kind instance stacks
#[derive(Default)]
pub struct ListenerChain {
    order: Vec<StageKind>,
    stacks: RefCell<HashMap<StageKind, Vec<Rc<dyn ChainingListener>>>>,
}

impl ListenerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage at the end of the chain
    pub fn add_stage<S: ChainingListener>(&mut self, stage: S) -> Result<()> {
        self.add_shared_stage(Rc::new(stage))
    }

    /// Builder form of [`add_stage`](Self::add_stage)
    pub fn with_stage<S: ChainingListener>(mut self, stage: S) -> Result<Self> {
        self.add_stage(stage)?;
        Ok(self)
    }

    /// Append an already shared stage at the end of the chain
    pub fn add_shared_stage(&mut self, stage: Rc<dyn ChainingListener>) -> Result<()> {
        let kind = stage.kind();
        if self.order.contains(&kind) {
            return Err(ChainError::DuplicateStage(kind));
        }
        log::debug!("Added chain stage: {}", kind);
        self.order.push(kind);
        self.stacks.get_mut().insert(kind, vec![stage]);
        Ok(())
    }

    /// Stage kinds in chain order
    pub fn kinds(&self) -> &[StageKind] {
        &self.order
    }

    pub fn contains(&self, kind: StageKind) -> bool {
        self.order.contains(&kind)
    }

    /// Kind of the stage following `kind`
    pub fn next_kind(&self, kind: StageKind) -> Option<StageKind> {
        let position = self.order.iter().position(|k| *k == kind)?;
        self.order.get(position + 1).copied()
    }

    /// Active instance of the stage following `kind`, if any
    pub fn next_listener(&self, kind: StageKind) -> Option<Rc<dyn ChainingListener>> {
        self.next_kind(kind).and_then(|next| self.listener(next))
    }

    /// Active (top of stack) instance for `kind`
    pub fn listener(&self, kind: StageKind) -> Option<Rc<dyn ChainingListener>> {
        self.stacks
            .borrow()
            .get(&kind)
            .and_then(|stack| stack.last())
            .cloned()
    }

    pub fn first_listener(&self) -> Option<Rc<dyn ChainingListener>> {
        self.order.first().and_then(|kind| self.listener(*kind))
    }

    /// Run `f` against the active instance for `kind`, downcast to `T`
    ///
    /// Returns `None` when the kind is absent or the instance is not a `T`.
    pub fn inspect<T: ChainingListener, R>(
        &self,
        kind: StageKind,
        f: impl FnOnce(&T) -> R,
    ) -> Option<R> {
        let listener = self.listener(kind)?;
        let stage = listener.as_any().downcast_ref::<T>()?;
        Some(f(stage))
    }

    /// Number of instances stacked for `kind` (1 when never pushed)
    pub fn depth(&self, kind: StageKind) -> usize {
        self.stacks.borrow().get(&kind).map_or(0, Vec::len)
    }

    /// Deliver `event` to the stage following `kind`
    ///
    /// The last stage of the chain forwards to nobody.
    pub fn forward(&self, kind: StageKind, event: &Event<'_>) -> EventResult {
        match self.next_listener(kind) {
            Some(next) => next.on_event(event, self),
            None => Ok(()),
        }
    }

    /// Deliver `event` to the first stage of the chain
    pub fn send(&self, event: &Event<'_>) -> EventResult {
        match self.first_listener() {
            Some(first) => first.on_event(event, self),
            None => Ok(()),
        }
    }

    /// Shadow the active instance for `kind` with a fresh one
    pub fn push_stage(&self, kind: StageKind) -> Result<()> {
        let active = self.listener(kind).ok_or(ChainError::UnknownStage(kind))?;
        if !active.is_stackable() {
            return Err(ChainError::NotStackable(kind));
        }
        let fresh = active
            .create_instance()
            .ok_or(ChainError::NotStackable(kind))?;
        self.push_listener(kind, fresh)
    }

    /// Shadow the active instance for `kind` with `listener`
    pub fn push_listener(&self, kind: StageKind, listener: Rc<dyn ChainingListener>) -> Result<()> {
        if listener.kind() != kind {
            return Err(ChainError::KindMismatch {
                expected: kind,
                found: listener.kind(),
            });
        }
        let mut stacks = self.stacks.borrow_mut();
        let stack = stacks.get_mut(&kind).ok_or(ChainError::UnknownStage(kind))?;
        stack.push(listener);
        log::debug!("Pushed chain stage {} (depth {})", kind, stack.len());
        Ok(())
    }

    /// Restore the instance that was active before the last push for `kind`
    ///
    /// The instance registered when the chain was built is never popped:
    /// popping at depth 1 returns `Ok(None)`.
    pub fn pop_stage(&self, kind: StageKind) -> Result<Option<Rc<dyn ChainingListener>>> {
        let mut stacks = self.stacks.borrow_mut();
        let stack = stacks.get_mut(&kind).ok_or(ChainError::UnknownStage(kind))?;
        if stack.len() <= 1 {
            log::warn!("Ignored pop of base instance for chain stage {}", kind);
            return Ok(None);
        }
        let popped = stack.pop();
        log::debug!("Popped chain stage {} (depth {})", kind, stack.len());
        Ok(popped)
    }

    /// Push a fresh instance for every stackable stage
    ///
    /// Gives a nested document (e.g. macro content) isolated state.
    pub fn push_all_stackable(&self) {
        for kind in &self.order {
            let fresh = self
                .listener(*kind)
                .filter(|active| active.is_stackable())
                .and_then(|active| active.create_instance());
            if let Some(fresh) = fresh {
                if let Some(stack) = self.stacks.borrow_mut().get_mut(kind) {
                    stack.push(fresh);
                }
            }
        }
        log::debug!("Pushed all stackable chain stages");
    }

    /// Undo [`push_all_stackable`](Self::push_all_stackable)
    pub fn pop_all_stackable(&self) {
        let mut stacks = self.stacks.borrow_mut();
        for kind in self.order.iter().rev() {
            if let Some(stack) = stacks.get_mut(kind) {
                let stackable = stack.last().is_some_and(|active| active.is_stackable());
                if stackable && stack.len() > 1 {
                    stack.pop();
                }
            }
        }
        log::debug!("Popped all stackable chain stages");
    }
}

impl fmt::Debug for ListenerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depths: Vec<(StageKind, usize)> =
            self.order.iter().map(|kind| (*kind, self.depth(*kind))).collect();
        f.debug_struct("ListenerChain")
            .field("stages", &depths)
            .finish()
    }
}

impl Listener for ListenerChain {
    fn on_event(&mut self, event: &Event<'_>) -> EventResult {
        self.send(event)
    }
}
