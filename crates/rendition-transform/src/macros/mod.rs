//! Macros and their expansion
//!
//! A macro call is a [`BlockKind::Macro`](rendition_ast::BlockKind::Macro)
//! leaf. [`MacroTransformation`] looks each call up in a [`MacroRegistry`],
//! executes it and replaces the call with a macro marker holding the
//! produced blocks.

mod transformation;

use std::collections::BTreeMap;
use std::rc::Rc;

use rendition_ast::{Block, BlockPath, Parameters};

use crate::context::TransformationContext;
use crate::error::MacroError;

pub use transformation::{MacroTransformation, DEFAULT_MAX_RECURSION};

/// Where a macro call sits while it executes
#[derive(Debug, Clone, Copy)]
pub struct MacroContext<'a> {
    /// Root of the tree being transformed
    pub root: &'a Block,
    /// Position of the call in `root`
    pub path: &'a BlockPath,
    pub transformation: &'a TransformationContext,
}

/// A named procedure expanding a macro call into blocks
pub trait Macro {
    /// Calls run by ascending priority
    fn priority(&self) -> u32 {
        1000
    }

    fn supports_inline_mode(&self) -> bool {
        true
    }

    /// Whether the macro may run on untrusted input
    fn is_restricted_safe(&self) -> bool {
        false
    }

    fn execute(
        &self,
        parameters: &Parameters,
        content: Option<&str>,
        inline: bool,
        context: &MacroContext<'_>,
    ) -> Result<Vec<Block>, MacroError>;
}

/// Macros by id
#[derive(Clone, Default)]
pub struct MacroRegistry {
    macros: BTreeMap<String, Rc<dyn Macro>>,
}

impl MacroRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `macro_impl` under `id`, replacing any previous one
    pub fn register(&mut self, id: impl Into<String>, macro_impl: impl Macro + 'static) {
        let id = id.into();
        log::debug!("Registered macro: {}", id);
        self.macros.insert(id, Rc::new(macro_impl));
    }

    pub fn with_macro(mut self, id: impl Into<String>, macro_impl: impl Macro + 'static) -> Self {
        self.register(id, macro_impl);
        self
    }

    pub fn get(&self, id: &str) -> Option<&dyn Macro> {
        self.macros.get(id).map(|m| m.as_ref())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.macros.contains_key(id)
    }

    /// Registered ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        self.macros.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}
