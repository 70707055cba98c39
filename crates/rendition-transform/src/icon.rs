//! Text to icon substitution
//!
//! Each mapping text (`:)`, `(y)`, ...) is split into the word, space and
//! special-symbol blocks a plain text parser would produce for it. Wherever
//! that run of siblings appears in the tree it is replaced by a free-standing
//! image of the icon.

use std::collections::BTreeMap;

use rendition_ast::{Block, BlockKind, ResourceReference, ResourceType};

use crate::context::TransformationContext;
use crate::error::Result;
use crate::transformation::Transformation;

/// Built-in text to icon name mappings
pub fn default_mappings() -> BTreeMap<String, String> {
    [
        (":)", "emoticon_smile"),
        (":(", "emoticon_unhappy"),
        (":P", "emoticon_tongue"),
        (":D", "emoticon_grin"),
        (";)", "emoticon_wink"),
        ("(y)", "thumb_up"),
        ("(n)", "thumb_down"),
        ("(i)", "information"),
        ("(/)", "accept"),
        ("(x)", "cancel"),
        ("(!)", "error"),
        ("(+)", "add"),
        ("(-)", "delete"),
        ("(?)", "help"),
        ("(on)", "lightbulb"),
        ("(off)", "lightbulb_off"),
        ("(*)", "star"),
    ]
    .into_iter()
    .map(|(text, icon)| (text.to_string(), icon.to_string()))
    .collect()
}

/// Split plain text into word, space and special-symbol blocks
///
/// ASCII punctuation characters are special symbols, whitespace runs are a
/// single space, anything else forms words.
pub fn plain_text_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut word = String::new();
    let mut in_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            flush_word(&mut word, &mut blocks);
            if !in_space {
                blocks.push(Block::space());
                in_space = true;
            }
            continue;
        }
        in_space = false;
        if c.is_ascii_punctuation() {
            flush_word(&mut word, &mut blocks);
            blocks.push(Block::special_symbol(c));
        } else {
            word.push(c);
        }
    }
    flush_word(&mut word, &mut blocks);
    blocks
}

fn flush_word(word: &mut String, blocks: &mut Vec<Block>) {
    if !word.is_empty() {
        blocks.push(Block::word(std::mem::take(word)));
    }
}

/// A mapping split into the sibling run it matches
struct IconMapping {
    pattern: Vec<BlockKind>,
    icon: String,
}

/// Replaces emoticon-like text runs with icon images
pub struct IconTransformation {
    // Longest patterns first
    mappings: Vec<IconMapping>,
}

impl Default for IconTransformation {
    fn default() -> Self {
        Self::new()
    }
}

impl IconTransformation {
    /// Transformation with the built-in mappings
    pub fn new() -> Self {
        Self::with_mappings(&BTreeMap::new())
    }

    /// Transformation with `extra` merged over the built-in mappings
    pub fn with_mappings(extra: &BTreeMap<String, String>) -> Self {
        let mut all = default_mappings();
        all.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));

        let mut mappings: Vec<IconMapping> = all
            .into_iter()
            .filter_map(|(text, icon)| {
                let pattern: Vec<BlockKind> = plain_text_blocks(&text)
                    .into_iter()
                    .map(|block| block.kind)
                    .collect();
                if pattern.is_empty() {
                    log::warn!("Ignored empty icon mapping for [{}]", icon);
                    return None;
                }
                Some(IconMapping { pattern, icon })
            })
            .collect();
        mappings.sort_by(|a, b| b.pattern.len().cmp(&a.pattern.len()));
        Self { mappings }
    }

    /// Number of active mappings
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    fn match_at(&self, siblings: &[Block], index: usize) -> Option<&IconMapping> {
        self.mappings.iter().find(|mapping| {
            let end = index + mapping.pattern.len();
            end <= siblings.len()
                && siblings[index..end]
                    .iter()
                    .zip(&mapping.pattern)
                    .all(|(block, kind)| block.kind() == kind)
        })
    }

    fn substitute(&self, block: &mut Block) -> usize {
        let mut replaced = 0;
        let mut index = 0;
        while index < block.children().len() {
            let matched = self
                .match_at(block.children(), index)
                .map(|mapping| (mapping.pattern.len(), mapping.icon.clone()));
            match matched {
                Some((len, icon)) => {
                    let image = Block::image(ResourceReference::new(icon, ResourceType::Icon), true);
                    block.children_mut().splice(index..index + len, [image]);
                    replaced += 1;
                }
                None => replaced += self.substitute(&mut block.children_mut()[index]),
            }
            index += 1;
        }
        replaced
    }
}

impl Transformation for IconTransformation {
    fn name(&self) -> &str {
        "icon"
    }

    fn priority(&self) -> u32 {
        500
    }

    fn is_restricted_safe(&self) -> bool {
        true
    }

    fn transform(&self, block: &mut Block, _context: &TransformationContext) -> Result<()> {
        let replaced = self.substitute(block);
        log::debug!("Replaced {} icon texts", replaced);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icon(name: &str) -> Block {
        Block::image(ResourceReference::new(name, ResourceType::Icon), true)
    }

    fn transform(mut tree: Block, transformation: &IconTransformation) -> Block {
        transformation
            .transform(&mut tree, &TransformationContext::new())
            .unwrap();
        tree
    }

    #[test]
    fn test_plain_text_blocks() {
        assert_eq!(
            plain_text_blocks("(on) a  b"),
            vec![
                Block::special_symbol('('),
                Block::word("on"),
                Block::special_symbol(')'),
                Block::space(),
                Block::word("a"),
                Block::space(),
                Block::word("b"),
            ]
        );
        assert!(plain_text_blocks("").is_empty());
    }

    #[test]
    fn test_default_mappings() {
        let transformation = IconTransformation::new();
        assert_eq!(transformation.len(), 17);

        let tree = Block::paragraph(plain_text_blocks("Nice :) (y)"));
        assert_eq!(
            transform(tree, &transformation),
            Block::paragraph(vec![
                Block::word("Nice"),
                Block::space(),
                icon("emoticon_smile"),
                Block::space(),
                icon("thumb_up"),
            ])
        );
    }

    #[test]
    fn test_nested_blocks() {
        let tree = Block::section(vec![Block::list(
            rendition_ast::ListType::Bulleted,
            vec![Block::list_item(plain_text_blocks("(off)"))],
        )]);

        let transformed = transform(tree, &IconTransformation::new());
        assert_eq!(
            transformed.children()[0].children()[0].children(),
            &[icon("lightbulb_off")]
        );
    }

    #[test]
    fn test_word_must_match_exactly() {
        // `:Party` is `:` followed by the word `Party`, not `:P` + `arty`
        let tree = Block::paragraph(plain_text_blocks(":Party"));
        let expected = tree.clone();
        assert_eq!(transform(tree, &IconTransformation::new()), expected);
    }

    #[test]
    fn test_extra_mappings() {
        let mut extra = BTreeMap::new();
        extra.insert(":party:".to_string(), "emoticon_party".to_string());
        extra.insert(":)".to_string(), "custom_smile".to_string());
        let transformation = IconTransformation::with_mappings(&extra);
        assert_eq!(transformation.len(), 18);

        let tree = Block::paragraph(plain_text_blocks(":party: :)"));
        assert_eq!(
            transform(tree, &transformation),
            Block::paragraph(vec![
                icon("emoticon_party"),
                Block::space(),
                icon("custom_smile"),
            ])
        );
    }

    #[test]
    fn test_adjacent_icons() {
        let tree = Block::paragraph(plain_text_blocks(":):("));
        assert_eq!(
            transform(tree, &IconTransformation::new()),
            Block::paragraph(vec![icon("emoticon_smile"), icon("emoticon_unhappy")])
        );
    }
}
