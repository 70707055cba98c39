//! Transformation passes and the manager running them

use rendition_ast::Block;

use crate::context::TransformationContext;
use crate::error::{Result, TransformationError};

/// A tree-mutating pass
pub trait Transformation {
    /// Name used in settings and error reports
    fn name(&self) -> &str;

    /// Passes run by ascending priority
    fn priority(&self) -> u32 {
        1000
    }

    /// Whether the pass may run on untrusted input
    fn is_restricted_safe(&self) -> bool {
        false
    }

    /// Transform `block` in place
    fn transform(&self, block: &mut Block, context: &TransformationContext) -> Result<()>;
}

/// Runs an ordered list of passes
pub trait TransformationManager {
    /// Run every pass against `block`
    ///
    /// Stops at the first failing pass. Changes made by the passes that ran
    /// before it stay on the tree.
    fn perform_transformations(
        &self,
        block: &mut Block,
        context: &TransformationContext,
    ) -> Result<()>;
}

/// Manager holding its passes sorted by priority
///
/// Passes of equal priority keep their insertion order. In a restricted
/// context, passes that are not restricted-safe are skipped.
#[derive(Default)]
pub struct DefaultTransformationManager {
    transformations: Vec<Box<dyn Transformation>>,
}

impl DefaultTransformationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_transformation(&mut self, transformation: Box<dyn Transformation>) {
        log::debug!(
            "Added transformation: {} (priority {})",
            transformation.name(),
            transformation.priority()
        );
        self.transformations.push(transformation);
        self.transformations.sort_by_key(|t| t.priority());
    }

    pub fn with_transformation(mut self, transformation: impl Transformation + 'static) -> Self {
        self.add_transformation(Box::new(transformation));
        self
    }

    /// Pass names in execution order
    pub fn names(&self) -> Vec<&str> {
        self.transformations.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.transformations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformations.is_empty()
    }
}

impl std::fmt::Debug for DefaultTransformationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultTransformationManager")
            .field("transformations", &self.names())
            .finish()
    }
}

impl TransformationManager for DefaultTransformationManager {
    fn perform_transformations(
        &self,
        block: &mut Block,
        context: &TransformationContext,
    ) -> Result<()> {
        for transformation in &self.transformations {
            let name = transformation.name();
            if context.is_restricted() && !transformation.is_restricted_safe() {
                log::debug!("Skipped transformation {} in restricted mode", name);
                continue;
            }

            log::debug!("Running transformation: {}", name);
            if let Err(err) = transformation.transform(block, context) {
                log::warn!("Transformation {} failed: {}", name, err);
                return Err(TransformationError::Pass {
                    name: name.to_string(),
                    source: Box::new(err),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Appends its name as a word to the root, or fails
    struct Mark {
        name: &'static str,
        priority: u32,
        safe: bool,
        fail: bool,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Mark {
        fn new(name: &'static str, priority: u32, log: &Rc<RefCell<Vec<&'static str>>>) -> Self {
            Self {
                name,
                priority,
                safe: true,
                fail: false,
                log: Rc::clone(log),
            }
        }
    }

    impl Transformation for Mark {
        fn name(&self) -> &str {
            self.name
        }

        fn priority(&self) -> u32 {
            self.priority
        }

        fn is_restricted_safe(&self) -> bool {
            self.safe
        }

        fn transform(&self, block: &mut Block, _context: &TransformationContext) -> Result<()> {
            self.log.borrow_mut().push(self.name);
            if self.fail {
                return Err(TransformationError::Failed(format!("{} broke", self.name)));
            }
            block.push_child(Block::word(self.name));
            Ok(())
        }
    }

    fn words(block: &Block) -> Vec<String> {
        block
            .children()
            .iter()
            .filter_map(|child| match child.kind() {
                rendition_ast::BlockKind::Word { text } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_priority_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let manager = DefaultTransformationManager::new()
            .with_transformation(Mark::new("late", 500, &log))
            .with_transformation(Mark::new("early", 100, &log))
            .with_transformation(Mark::new("also-late", 500, &log));

        assert_eq!(manager.names(), vec!["early", "late", "also-late"]);

        let mut tree = Block::paragraph(vec![]);
        manager
            .perform_transformations(&mut tree, &TransformationContext::new())
            .unwrap();
        assert_eq!(words(&tree), vec!["early", "late", "also-late"]);
    }

    #[test]
    fn test_fail_fast_without_rollback() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut failing = Mark::new("second", 2, &log);
        failing.fail = true;
        let manager = DefaultTransformationManager::new()
            .with_transformation(Mark::new("first", 1, &log))
            .with_transformation(failing)
            .with_transformation(Mark::new("third", 3, &log));

        let mut tree = Block::paragraph(vec![]);
        let err = manager
            .perform_transformations(&mut tree, &TransformationContext::new())
            .unwrap_err();

        assert_eq!(err.pass_name(), Some("second"));
        assert_eq!(err.to_string(), "Transformation [second] failed: second broke");
        // First pass's change stays, third pass never ran
        assert_eq!(words(&tree), vec!["first"]);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_restricted_skips_unsafe_passes() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut unsafe_pass = Mark::new("unsafe", 1, &log);
        unsafe_pass.safe = false;
        let manager = DefaultTransformationManager::new()
            .with_transformation(unsafe_pass)
            .with_transformation(Mark::new("safe", 2, &log));

        let mut tree = Block::paragraph(vec![]);
        manager
            .perform_transformations(
                &mut tree,
                &TransformationContext::new().with_restricted(true),
            )
            .unwrap();
        assert_eq!(words(&tree), vec!["safe"]);

        let mut tree = Block::paragraph(vec![]);
        manager
            .perform_transformations(&mut tree, &TransformationContext::new())
            .unwrap();
        assert_eq!(words(&tree), vec!["unsafe", "safe"]);
    }

    #[test]
    fn test_empty_manager() {
        let manager = DefaultTransformationManager::new();
        assert!(manager.is_empty());
        let mut tree = Block::word("x");
        manager
            .perform_transformations(&mut tree, &TransformationContext::new())
            .unwrap();
        assert_eq!(tree, Block::word("x"));
    }
}
