//! Transformation context

use std::sync::Arc;

use rendition_ast::{Block, Syntax};

/// Per-invocation information handed to every transformation
///
/// The tree being transformed is passed to passes separately, as the only
/// mutable reference. The context may additionally carry a shared snapshot
/// of the tree taken before the invocation started. Cloning is cheap: the
/// snapshot is shared.
#[derive(Debug, Clone, Default)]
pub struct TransformationContext {
    xdom: Option<Arc<Block>>,
    syntax: Option<Syntax>,
    target_syntax: Option<Syntax>,
    id: Option<String>,
    restricted: bool,
}

impl TransformationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a tree written in `syntax`
    pub fn for_syntax(syntax: Syntax) -> Self {
        Self {
            syntax: Some(syntax),
            ..Self::default()
        }
    }

    /// Attach a snapshot of the tree as it is now
    pub fn with_snapshot(mut self, xdom: &Block) -> Self {
        self.xdom = Some(Arc::new(xdom.clone()));
        self
    }

    pub fn with_target_syntax(mut self, target_syntax: Syntax) -> Self {
        self.target_syntax = Some(target_syntax);
        self
    }

    /// Opaque id, usable as a cache key by passes that cache artifacts
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_restricted(mut self, restricted: bool) -> Self {
        self.restricted = restricted;
        self
    }

    pub fn xdom(&self) -> Option<&Block> {
        self.xdom.as_deref()
    }

    pub fn syntax(&self) -> Option<&Syntax> {
        self.syntax.as_ref()
    }

    pub fn set_syntax(&mut self, syntax: Syntax) {
        self.syntax = Some(syntax);
    }

    pub fn target_syntax(&self) -> Option<&Syntax> {
        self.target_syntax.as_ref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Whether passes and macros unsafe for untrusted input must be skipped
    pub fn is_restricted(&self) -> bool {
        self.restricted
    }

    pub fn set_restricted(&mut self, restricted: bool) {
        self.restricted = restricted;
    }
}
