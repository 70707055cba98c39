use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use rendition_ast::{Event, EventResult, MetaData};

use super::{ChainingListener, ListenerChain, StageKind};

/// Keeps the stack of open document and metadata scopes
///
/// A scope is pushed before its begin event is forwarded and popped after its
/// end event is forwarded.
#[derive(Debug, Default)]
pub struct MetaDataStage {
    scopes: RefCell<Vec<MetaData>>,
}

impl MetaDataStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `key` in the innermost scope that defines it
    pub fn meta_data(&self, key: &str) -> Option<String> {
        self.scopes
            .borrow()
            .iter()
            .rev()
            .find_map(|scope| scope.meta_data(key).map(str::to_string))
    }

    /// Every value of `key`, innermost scope first
    pub fn all_meta_data(&self, key: &str) -> Vec<String> {
        self.scopes
            .borrow()
            .iter()
            .rev()
            .filter_map(|scope| scope.meta_data(key).map(str::to_string))
            .collect()
    }

    pub fn depth(&self) -> usize {
        self.scopes.borrow().len()
    }
}

impl ChainingListener for MetaDataStage {
    fn kind(&self) -> StageKind {
        StageKind::MetaDataState
    }

    fn on_event(&self, event: &Event<'_>, chain: &ListenerChain) -> EventResult {
        match event {
            Event::BeginDocument(meta) | Event::BeginMetaData(meta) => {
                self.scopes.borrow_mut().push((*meta).clone());
                chain.forward(self.kind(), event)
            }
            Event::EndDocument(_) | Event::EndMetaData(_) => {
                let result = chain.forward(self.kind(), event);
                self.scopes.borrow_mut().pop();
                result
            }
            _ => chain.forward(self.kind(), event),
        }
    }

    fn is_stackable(&self) -> bool {
        true
    }

    fn create_instance(&self) -> Option<Rc<dyn ChainingListener>> {
        Some(Rc::new(MetaDataStage::new()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
