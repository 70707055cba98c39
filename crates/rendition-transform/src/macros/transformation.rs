use rendition_ast::{Block, BlockKind, BlockPath};

use super::{Macro, MacroContext, MacroRegistry};
use crate::context::TransformationContext;
use crate::error::{MacroError, Result, TransformationError};
use crate::transformation::Transformation;

/// Default bound on the number of expansions per invocation
pub const DEFAULT_MAX_RECURSION: usize = 100;

/// Expands macro calls, one at a time, until none is left
///
/// Each step picks the pending call with the lowest macro priority (the
/// first in document order on ties), executes it and replaces it with a
/// macro marker wrapping the produced blocks. Calls produced by a macro are
/// expanded by later steps. Calls to unregistered macros, and in a
/// restricted context calls to macros that are not restricted-safe, stay in
/// the tree as they are.
pub struct MacroTransformation {
    macros: MacroRegistry,
    max_recursion: usize,
}

/// A call selected for expansion
struct PendingCall {
    path: BlockPath,
    id: String,
    priority: u32,
}

impl MacroTransformation {
    pub fn new(macros: MacroRegistry) -> Self {
        Self {
            macros,
            max_recursion: DEFAULT_MAX_RECURSION,
        }
    }

    pub fn with_max_recursion(mut self, max_recursion: usize) -> Self {
        self.max_recursion = max_recursion;
        self
    }

    pub fn macros(&self) -> &MacroRegistry {
        &self.macros
    }

    fn is_expandable(&self, macro_impl: &dyn Macro, context: &TransformationContext) -> bool {
        !context.is_restricted() || macro_impl.is_restricted_safe()
    }

    /// Expandable calls in the subtree at `base`, with paths from the root
    fn pending_calls(
        &self,
        root: &Block,
        base: &BlockPath,
        context: &TransformationContext,
    ) -> Vec<PendingCall> {
        let Some(subtree) = root.get(base) else {
            return Vec::new();
        };
        subtree
            .paths()
            .into_iter()
            .filter_map(|relative| {
                let id = match subtree.get(&relative)?.kind() {
                    BlockKind::Macro { id, .. } => id,
                    _ => return None,
                };
                let macro_impl = self.macros.get(id)?;
                if !self.is_expandable(macro_impl, context) {
                    return None;
                }
                let indices = base.indices().iter().chain(relative.indices());
                Some(PendingCall {
                    priority: macro_impl.priority(),
                    id: id.clone(),
                    path: BlockPath::from_indices(indices.copied().collect()),
                })
            })
            .collect()
    }

    fn expand(
        &self,
        block: &mut Block,
        call: PendingCall,
        context: &TransformationContext,
    ) -> Result<()> {
        let macro_error = |source| TransformationError::Macro {
            id: call.id.clone(),
            source,
        };

        let (parameters, content, inline) = match block.get(&call.path) {
            Some(Block {
                kind: BlockKind::Macro {
                    content, inline, ..
                },
                parameters,
                ..
            }) => (parameters.clone(), content.clone(), *inline),
            _ => return Ok(()),
        };
        let Some(macro_impl) = self.macros.get(&call.id) else {
            return Ok(());
        };
        if inline && !macro_impl.supports_inline_mode() {
            return Err(macro_error(MacroError::InlineNotSupported));
        }

        let produced = {
            let macro_context = MacroContext {
                root: block,
                path: &call.path,
                transformation: context,
            };
            macro_impl
                .execute(&parameters, content.as_deref(), inline, &macro_context)
                .map_err(macro_error)?
        };
        log::debug!(
            "Expanded macro {} at {} into {} blocks",
            call.id,
            call.path,
            produced.len()
        );

        let marker = Block::macro_marker(call.id.as_str(), parameters, content, inline, produced);
        if call.path.is_root() {
            *block = marker;
        } else {
            block.replace_at(&call.path, vec![marker]);
        }
        Ok(())
    }
}

/// Remove and return the lowest priority call, the first in document order
/// on ties
fn take_next(pending: &mut Vec<PendingCall>) -> Option<PendingCall> {
    let index = pending
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.path.cmp(&b.path))
        })
        .map(|(index, _)| index)?;
    Some(pending.swap_remove(index))
}

impl Transformation for MacroTransformation {
    fn name(&self) -> &str {
        "macro"
    }

    fn priority(&self) -> u32 {
        100
    }

    /// Unsafe macros are filtered per call
    fn is_restricted_safe(&self) -> bool {
        true
    }

    /// A call is replaced by exactly one marker, so the paths of the other
    /// pending calls stay valid and only the new marker is scanned again.
    fn transform(&self, block: &mut Block, context: &TransformationContext) -> Result<()> {
        let mut pending = self.pending_calls(block, &BlockPath::root(), context);
        let mut expansions = 0;
        while let Some(call) = take_next(&mut pending) {
            if expansions >= self.max_recursion {
                log::warn!(
                    "Stopped macro expansion after {} expansions, [{}] left unexpanded",
                    expansions,
                    call.id
                );
                break;
            }
            let path = call.path.clone();
            self.expand(block, call, context)?;
            pending.extend(self.pending_calls(block, &path, context));
            expansions += 1;
        }

        for path in block.paths() {
            if let Some(BlockKind::Macro { id, .. }) = block.get(&path).map(Block::kind) {
                if !self.macros.contains(id) {
                    log::warn!("Unknown macro [{}] at {} left unexpanded", id, path);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rendition_ast::{Axes, BlockTag, Parameters, TagMatcher};

    /// Produces one word per call, optionally followed by another call
    struct Emit {
        word: &'static str,
        then: Option<&'static str>,
        priority: u32,
        safe: bool,
    }

    impl Emit {
        fn word(word: &'static str) -> Self {
            Self {
                word,
                then: None,
                priority: 1000,
                safe: false,
            }
        }
    }

    impl Macro for Emit {
        fn priority(&self) -> u32 {
            self.priority
        }

        fn is_restricted_safe(&self) -> bool {
            self.safe
        }

        fn execute(
            &self,
            _parameters: &Parameters,
            _content: Option<&str>,
            inline: bool,
            _context: &MacroContext<'_>,
        ) -> std::result::Result<Vec<Block>, MacroError> {
            let mut blocks = vec![Block::word(self.word)];
            if let Some(next) = self.then {
                blocks.push(Block::macro_call(next, Parameters::new(), None, inline));
            }
            Ok(blocks)
        }
    }

    /// Produces the number of markers already in the tree when it runs
    struct CountMarkers {
        priority: u32,
    }

    impl Macro for CountMarkers {
        fn priority(&self) -> u32 {
            self.priority
        }

        fn execute(
            &self,
            _parameters: &Parameters,
            _content: Option<&str>,
            _inline: bool,
            context: &MacroContext<'_>,
        ) -> std::result::Result<Vec<Block>, MacroError> {
            let done = markers(context.root);
            Ok(vec![Block::word(done.to_string())])
        }
    }

    fn markers(block: &Block) -> usize {
        block
            .blocks(&TagMatcher(BlockTag::MacroMarker), Axes::Descendant)
            .len()
    }

    fn call(id: &str) -> Block {
        Block::macro_call(id, Parameters::new(), None, false)
    }

    fn run(transformation: &MacroTransformation, tree: &mut Block) -> Result<()> {
        transformation.transform(tree, &TransformationContext::new())
    }

    #[test]
    fn test_call_replaced_by_marker() {
        let mut params = Parameters::new();
        params.insert("depth".to_string(), "2".to_string());
        let mut tree = Block::section(vec![Block::macro_call(
            "hello",
            params.clone(),
            Some("body".to_string()),
            false,
        )]);

        let transformation =
            MacroTransformation::new(MacroRegistry::new().with_macro("hello", Emit::word("hi")));
        run(&transformation, &mut tree).unwrap();

        assert_eq!(
            tree,
            Block::section(vec![Block::macro_marker(
                "hello",
                params,
                Some("body".to_string()),
                false,
                vec![Block::word("hi")],
            )])
        );
    }

    #[test]
    fn test_root_call() {
        let mut tree = call("hello");
        let transformation =
            MacroTransformation::new(MacroRegistry::new().with_macro("hello", Emit::word("hi")));
        run(&transformation, &mut tree).unwrap();

        assert_eq!(tree.tag(), BlockTag::MacroMarker);
        assert_eq!(tree.children(), &[Block::word("hi")]);
    }

    #[test]
    fn test_nested_calls_are_expanded() {
        let mut outer = Emit::word("outer");
        outer.then = Some("inner");
        let registry = MacroRegistry::new()
            .with_macro("outer", outer)
            .with_macro("inner", Emit::word("inner"));
        let mut tree = Block::section(vec![call("outer")]);

        run(&MacroTransformation::new(registry), &mut tree).unwrap();

        let marker = &tree.children()[0];
        assert_eq!(marker.tag(), BlockTag::MacroMarker);
        assert_eq!(marker.children()[0], Block::word("outer"));
        assert_eq!(marker.children()[1].tag(), BlockTag::MacroMarker);
        assert_eq!(marker.children()[1].children(), &[Block::word("inner")]);
    }

    #[test]
    fn test_recursion_is_bounded() {
        let mut looping = Emit::word("again");
        looping.then = Some("loop");
        let transformation =
            MacroTransformation::new(MacroRegistry::new().with_macro("loop", looping))
                .with_max_recursion(3);
        let mut tree = Block::section(vec![call("loop")]);

        run(&transformation, &mut tree).unwrap();

        assert_eq!(markers(&tree), 3);
        let pending = tree.blocks(&TagMatcher(BlockTag::Macro), Axes::Descendant);
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_unknown_macro_left_in_place() {
        let mut tree = Block::section(vec![call("missing"), call("hello")]);
        let transformation =
            MacroTransformation::new(MacroRegistry::new().with_macro("hello", Emit::word("hi")));

        run(&transformation, &mut tree).unwrap();

        assert_eq!(tree.children()[0], call("missing"));
        assert_eq!(tree.children()[1].tag(), BlockTag::MacroMarker);
    }

    #[test]
    fn test_priority_decides_order() {
        let registry = MacroRegistry::new()
            .with_macro("late", CountMarkers { priority: 2000 })
            .with_macro("early", CountMarkers { priority: 10 });
        // "late" comes first in the document but runs last
        let mut tree = Block::section(vec![call("late"), call("early")]);
        let transformation = MacroTransformation::new(registry);

        let mut pending =
            transformation.pending_calls(&tree, &BlockPath::root(), &TransformationContext::new());
        assert_eq!(pending.len(), 2);
        let first = take_next(&mut pending).unwrap();
        assert_eq!(first.id, "early");
        assert_eq!(first.path, BlockPath::from_indices(vec![1]));

        run(&transformation, &mut tree).unwrap();
        assert_eq!(tree.children()[0].children(), &[Block::word("1")]);
        assert_eq!(tree.children()[1].children(), &[Block::word("0")]);
    }

    #[test]
    fn test_produced_calls_follow_document_order() {
        let mut outer = Emit::word("outer");
        outer.then = Some("deep");
        let registry = MacroRegistry::new()
            .with_macro("outer", outer)
            .with_macro("deep", CountMarkers { priority: 1000 })
            .with_macro("tail", CountMarkers { priority: 1000 });
        let mut tree = Block::section(vec![call("outer"), call("tail")]);

        run(&MacroTransformation::new(registry), &mut tree).unwrap();

        // "deep" is produced by "outer" but precedes "tail" in the document
        let deep = &tree.children()[0].children()[1];
        assert_eq!(deep.children(), &[Block::word("1")]);
        assert_eq!(tree.children()[1].children(), &[Block::word("2")]);
    }

    #[test]
    fn test_pending_calls_below_path() {
        let tree = Block::section(vec![
            call("hello"),
            Block::paragraph(vec![Block::word("x"), call("hello"), call("missing")]),
        ]);
        let transformation =
            MacroTransformation::new(MacroRegistry::new().with_macro("hello", Emit::word("hi")));

        let pending = transformation.pending_calls(
            &tree,
            &BlockPath::from_indices(vec![1]),
            &TransformationContext::new(),
        );
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].path, BlockPath::from_indices(vec![1, 1]));

        let missing = transformation.pending_calls(
            &tree,
            &BlockPath::from_indices(vec![5]),
            &TransformationContext::new(),
        );
        assert!(missing.is_empty());
    }

    #[test]
    fn test_restricted_skips_unsafe_macros() {
        let mut safe = Emit::word("safe");
        safe.safe = true;
        let registry = MacroRegistry::new()
            .with_macro("safe", safe)
            .with_macro("unsafe", Emit::word("unsafe"));
        let mut tree = Block::section(vec![call("unsafe"), call("safe")]);

        MacroTransformation::new(registry)
            .transform(&mut tree, &TransformationContext::new().with_restricted(true))
            .unwrap();

        assert_eq!(tree.children()[0], call("unsafe"));
        assert_eq!(tree.children()[1].tag(), BlockTag::MacroMarker);
    }

    #[test]
    fn test_inline_not_supported() {
        struct Standalone;

        impl Macro for Standalone {
            fn supports_inline_mode(&self) -> bool {
                false
            }

            fn execute(
                &self,
                _parameters: &Parameters,
                _content: Option<&str>,
                _inline: bool,
                _context: &MacroContext<'_>,
            ) -> std::result::Result<Vec<Block>, MacroError> {
                Ok(vec![])
            }
        }

        let mut tree = Block::paragraph(vec![Block::macro_call(
            "standalone",
            Parameters::new(),
            None,
            true,
        )]);
        let err = run(
            &MacroTransformation::new(MacroRegistry::new().with_macro("standalone", Standalone)),
            &mut tree,
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to execute macro [standalone]: Macro cannot be used inline"
        );
    }
}
