//! Block search

use crate::block::{Block, BlockTag};

/// Predicate over blocks
pub trait BlockMatcher {
    fn matches(&self, block: &Block) -> bool;
}

/// Matches blocks of one kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagMatcher(pub BlockTag);

impl BlockMatcher for TagMatcher {
    fn matches(&self, block: &Block) -> bool {
        block.tag() == self.0
    }
}

/// Matches every block
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyMatcher;

impl BlockMatcher for AnyMatcher {
    fn matches(&self, _block: &Block) -> bool {
        true
    }
}

impl<F> BlockMatcher for F
where
    F: Fn(&Block) -> bool,
{
    fn matches(&self, block: &Block) -> bool {
        self(block)
    }
}

/// Which part of the tree a search covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axes {
    /// Direct children only
    Child,
    /// Every node below this one
    Descendant,
    /// This node and every node below it
    DescendantOrSelf,
}

impl Block {
    /// Blocks matching `matcher` along `axes`, in document order
    pub fn blocks<M: BlockMatcher + ?Sized>(&self, matcher: &M, axes: Axes) -> Vec<&Block> {
        let mut found = Vec::new();
        match axes {
            Axes::Child => {
                found.extend(self.children.iter().filter(|child| matcher.matches(child)));
            }
            Axes::Descendant => {
                for child in &self.children {
                    collect(child, matcher, &mut found);
                }
            }
            Axes::DescendantOrSelf => collect(self, matcher, &mut found),
        }
        found
    }

    /// First block matching `matcher` along `axes`
    pub fn first_block<M: BlockMatcher + ?Sized>(&self, matcher: &M, axes: Axes) -> Option<&Block> {
        match axes {
            Axes::Child => self.children.iter().find(|child| matcher.matches(child)),
            Axes::Descendant => self.children.iter().find_map(|child| first(child, matcher)),
            Axes::DescendantOrSelf => first(self, matcher),
        }
    }
}

fn collect<'a, M: BlockMatcher + ?Sized>(block: &'a Block, matcher: &M, found: &mut Vec<&'a Block>) {
    if matcher.matches(block) {
        found.push(block);
    }
    for child in &block.children {
        collect(child, matcher, found);
    }
}

fn first<'a, M: BlockMatcher + ?Sized>(block: &'a Block, matcher: &M) -> Option<&'a Block> {
    if matcher.matches(block) {
        return Some(block);
    }
    block.children.iter().find_map(|child| first(child, matcher))
}
