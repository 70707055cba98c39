//! Document tree nodes
//!
//! A document is a tree of [`Block`] values. Every block carries a kind, a
//! parameter map and an ordered list of children. Composite kinds (section,
//! paragraph, list, link, ...) emit a begin event, their children, then the
//! matching end event when traversed. Leaf kinds (word, space, image, macro
//! call, ...) emit a single event and never have children.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::Event;
use crate::listener::{EventResult, Listener};
use crate::metadata::MetaData;
use crate::reference::ResourceReference;
use crate::syntax::Syntax;

/// Event and block parameters
///
/// Ordering is irrelevant to the contract; a sorted map keeps printed output
/// deterministic. Absent parameters are an empty map.
pub type Parameters = BTreeMap<String, String>;

/// Inline formatting of a format span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    None,
    Bold,
    Italic,
    Underlined,
    Strikedout,
    Superscript,
    Subscript,
    Monospace,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::None => "NONE",
            Format::Bold => "BOLD",
            Format::Italic => "ITALIC",
            Format::Underlined => "UNDERLINED",
            Format::Strikedout => "STRIKEDOUT",
            Format::Superscript => "SUPERSCRIPT",
            Format::Subscript => "SUBSCRIPT",
            Format::Monospace => "MONOSPACE",
        };
        f.write_str(name)
    }
}

/// List flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Bulleted,
    Numbered,
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListType::Bulleted => f.write_str("BULLETED"),
            ListType::Numbered => f.write_str("NUMBERED"),
        }
    }
}

/// Header level outside of 1..=6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid header level [{0}]: expected a value between 1 and 6")]
pub struct HeaderLevelError(pub u8);

/// Header level, 1 (highest) to 6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HeaderLevel(u8);

impl HeaderLevel {
    pub const LEVEL1: HeaderLevel = HeaderLevel(1);
    pub const LEVEL2: HeaderLevel = HeaderLevel(2);
    pub const LEVEL3: HeaderLevel = HeaderLevel(3);
    pub const LEVEL4: HeaderLevel = HeaderLevel(4);
    pub const LEVEL5: HeaderLevel = HeaderLevel(5);
    pub const LEVEL6: HeaderLevel = HeaderLevel(6);

    pub fn new(level: u8) -> Result<Self, HeaderLevelError> {
        if (1..=6).contains(&level) {
            Ok(HeaderLevel(level))
        } else {
            Err(HeaderLevelError(level))
        }
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for HeaderLevel {
    type Error = HeaderLevelError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        HeaderLevel::new(level)
    }
}

impl From<HeaderLevel> for u8 {
    fn from(level: HeaderLevel) -> Self {
        level.0
    }
}

impl fmt::Display for HeaderLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LEVEL{}", self.0)
    }
}

/// Kind-specific payload of a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    // Composite kinds
    Document {
        #[serde(default)]
        meta_data: MetaData,
    },
    MetaData {
        #[serde(default)]
        meta_data: MetaData,
    },
    Section,
    Header {
        level: HeaderLevel,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
    Paragraph,
    List {
        list_type: ListType,
    },
    ListItem,
    DefinitionList,
    DefinitionTerm,
    DefinitionDescription,
    Table,
    TableRow,
    TableCell,
    TableHeadCell,
    Quotation,
    QuotationLine,
    Format {
        format: Format,
    },
    Group,
    Link {
        reference: ResourceReference,
        #[serde(default)]
        free_standing: bool,
    },
    MacroMarker {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default)]
        inline: bool,
    },

    // Leaf kinds
    Image {
        reference: ResourceReference,
        #[serde(default)]
        free_standing: bool,
    },
    /// A macro call; the block parameters are the macro parameters
    Macro {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default)]
        inline: bool,
    },
    Word {
        text: String,
    },
    Space,
    SpecialSymbol {
        symbol: char,
    },
    NewLine,
    RawText {
        content: String,
        syntax: Syntax,
    },
    Verbatim {
        content: String,
        #[serde(default)]
        inline: bool,
    },
    HorizontalLine,
    Id {
        name: String,
    },
    EmptyLines {
        count: usize,
    },
}

impl BlockKind {
    /// Payload-free tag of this kind
    pub fn tag(&self) -> BlockTag {
        match self {
            BlockKind::Document { .. } => BlockTag::Document,
            BlockKind::MetaData { .. } => BlockTag::MetaData,
            BlockKind::Section => BlockTag::Section,
            BlockKind::Header { .. } => BlockTag::Header,
            BlockKind::Paragraph => BlockTag::Paragraph,
            BlockKind::List { .. } => BlockTag::List,
            BlockKind::ListItem => BlockTag::ListItem,
            BlockKind::DefinitionList => BlockTag::DefinitionList,
            BlockKind::DefinitionTerm => BlockTag::DefinitionTerm,
            BlockKind::DefinitionDescription => BlockTag::DefinitionDescription,
            BlockKind::Table => BlockTag::Table,
            BlockKind::TableRow => BlockTag::TableRow,
            BlockKind::TableCell => BlockTag::TableCell,
            BlockKind::TableHeadCell => BlockTag::TableHeadCell,
            BlockKind::Quotation => BlockTag::Quotation,
            BlockKind::QuotationLine => BlockTag::QuotationLine,
            BlockKind::Format { .. } => BlockTag::Format,
            BlockKind::Group => BlockTag::Group,
            BlockKind::Link { .. } => BlockTag::Link,
            BlockKind::MacroMarker { .. } => BlockTag::MacroMarker,
            BlockKind::Image { .. } => BlockTag::Image,
            BlockKind::Macro { .. } => BlockTag::Macro,
            BlockKind::Word { .. } => BlockTag::Word,
            BlockKind::Space => BlockTag::Space,
            BlockKind::SpecialSymbol { .. } => BlockTag::SpecialSymbol,
            BlockKind::NewLine => BlockTag::NewLine,
            BlockKind::RawText { .. } => BlockTag::RawText,
            BlockKind::Verbatim { .. } => BlockTag::Verbatim,
            BlockKind::HorizontalLine => BlockTag::HorizontalLine,
            BlockKind::Id { .. } => BlockTag::Id,
            BlockKind::EmptyLines { .. } => BlockTag::EmptyLines,
        }
    }

    pub fn is_composite(&self) -> bool {
        self.tag().is_composite()
    }
}

/// Payload-free block kind, used by matchers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockTag {
    Document,
    MetaData,
    Section,
    Header,
    Paragraph,
    List,
    ListItem,
    DefinitionList,
    DefinitionTerm,
    DefinitionDescription,
    Table,
    TableRow,
    TableCell,
    TableHeadCell,
    Quotation,
    QuotationLine,
    Format,
    Group,
    Link,
    MacroMarker,
    Image,
    Macro,
    Word,
    Space,
    SpecialSymbol,
    NewLine,
    RawText,
    Verbatim,
    HorizontalLine,
    Id,
    EmptyLines,
}

impl BlockTag {
    /// Whether the events of this kind carry the block parameters
    pub fn emits_parameters(&self) -> bool {
        !matches!(
            self,
            BlockTag::Document
                | BlockTag::MetaData
                | BlockTag::Word
                | BlockTag::Space
                | BlockTag::SpecialSymbol
                | BlockTag::NewLine
                | BlockTag::RawText
                | BlockTag::Id
                | BlockTag::EmptyLines
        )
    }

    pub fn is_composite(&self) -> bool {
        !matches!(
            self,
            BlockTag::Image
                | BlockTag::Macro
                | BlockTag::Word
                | BlockTag::Space
                | BlockTag::SpecialSymbol
                | BlockTag::NewLine
                | BlockTag::RawText
                | BlockTag::Verbatim
                | BlockTag::HorizontalLine
                | BlockTag::Id
                | BlockTag::EmptyLines
        )
    }
}

/// A tree shape the event stream cannot express
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("{tag:?} block at {path} cannot have children")]
    LeafWithChildren { tag: BlockTag, path: BlockPath },

    #[error("{tag:?} block at {path} cannot have parameters")]
    UnemittedParameters { tag: BlockTag, path: BlockPath },
}

/// A document tree node
///
/// A block exclusively owns its children. Parents are reached through a
/// [`BlockPath`] from the root rather than a stored back-reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(flatten)]
    pub kind: BlockKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: Parameters,
}

/// The event(s) a block emits around its children
enum Emission<'a> {
    Leaf(Event<'a>),
    Pair(Event<'a>, Event<'a>),
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            parameters: Parameters::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn document(meta_data: MetaData, children: Vec<Block>) -> Self {
        Self::new(BlockKind::Document { meta_data }).with_children(children)
    }

    pub fn section(children: Vec<Block>) -> Self {
        Self::new(BlockKind::Section).with_children(children)
    }

    pub fn header(level: HeaderLevel, id: Option<String>, children: Vec<Block>) -> Self {
        Self::new(BlockKind::Header { level, id }).with_children(children)
    }

    pub fn paragraph(children: Vec<Block>) -> Self {
        Self::new(BlockKind::Paragraph).with_children(children)
    }

    pub fn list(list_type: ListType, items: Vec<Block>) -> Self {
        Self::new(BlockKind::List { list_type }).with_children(items)
    }

    pub fn list_item(children: Vec<Block>) -> Self {
        Self::new(BlockKind::ListItem).with_children(children)
    }

    pub fn format(format: Format, children: Vec<Block>) -> Self {
        Self::new(BlockKind::Format { format }).with_children(children)
    }

    pub fn group(children: Vec<Block>) -> Self {
        Self::new(BlockKind::Group).with_children(children)
    }

    pub fn link(reference: ResourceReference, free_standing: bool, label: Vec<Block>) -> Self {
        Self::new(BlockKind::Link {
            reference,
            free_standing,
        })
        .with_children(label)
    }

    pub fn image(reference: ResourceReference, free_standing: bool) -> Self {
        Self::new(BlockKind::Image {
            reference,
            free_standing,
        })
    }

    pub fn macro_call(
        id: impl Into<String>,
        parameters: Parameters,
        content: Option<String>,
        inline: bool,
    ) -> Self {
        Self::new(BlockKind::Macro {
            id: id.into(),
            content,
            inline,
        })
        .with_parameters(parameters)
    }

    pub fn macro_marker(
        name: impl Into<String>,
        parameters: Parameters,
        content: Option<String>,
        inline: bool,
        children: Vec<Block>,
    ) -> Self {
        Self::new(BlockKind::MacroMarker {
            name: name.into(),
            content,
            inline,
        })
        .with_parameters(parameters)
        .with_children(children)
    }

    pub fn word(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Word { text: text.into() })
    }

    pub fn space() -> Self {
        Self::new(BlockKind::Space)
    }

    pub fn special_symbol(symbol: char) -> Self {
        Self::new(BlockKind::SpecialSymbol { symbol })
    }

    pub fn new_line() -> Self {
        Self::new(BlockKind::NewLine)
    }

    pub fn raw_text(content: impl Into<String>, syntax: Syntax) -> Self {
        Self::new(BlockKind::RawText {
            content: content.into(),
            syntax,
        })
    }

    pub fn verbatim(content: impl Into<String>, inline: bool) -> Self {
        Self::new(BlockKind::Verbatim {
            content: content.into(),
            inline,
        })
    }

    pub fn horizontal_line() -> Self {
        Self::new(BlockKind::HorizontalLine)
    }

    pub fn id(name: impl Into<String>) -> Self {
        Self::new(BlockKind::Id { name: name.into() })
    }

    pub fn empty_lines(count: usize) -> Self {
        Self::new(BlockKind::EmptyLines { count })
    }

    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    pub fn tag(&self) -> BlockTag {
        self.kind.tag()
    }

    pub fn is_composite(&self) -> bool {
        self.kind.is_composite()
    }

    pub fn children(&self) -> &[Block] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Block> {
        &mut self.children
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parameters.insert(name.into(), value.into());
    }

    /// Append a child at the end
    pub fn push_child(&mut self, child: Block) {
        self.children.push(child);
    }

    /// Insert `blocks` before the child at `index`
    ///
    /// An index past the end appends.
    pub fn insert_children(&mut self, index: usize, blocks: Vec<Block>) {
        let index = index.min(self.children.len());
        self.children.splice(index..index, blocks);
    }

    /// Remove the child at `index`
    pub fn remove_child(&mut self, index: usize) -> Option<Block> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    /// Replace the child at `index` with `blocks`, returning the old child
    pub fn replace_child(&mut self, index: usize, blocks: Vec<Block>) -> Option<Block> {
        if index >= self.children.len() {
            return None;
        }
        let mut removed = self.children.splice(index..=index, blocks);
        removed.next()
    }

    /// Node at `path`, relative to this block
    pub fn get(&self, path: &BlockPath) -> Option<&Block> {
        path.indices()
            .iter()
            .try_fold(self, |block, &index| block.children.get(index))
    }

    pub fn get_mut(&mut self, path: &BlockPath) -> Option<&mut Block> {
        path.indices()
            .iter()
            .try_fold(self, |block, &index| block.children.get_mut(index))
    }

    /// Parent of the node at `path`
    pub fn parent_of(&self, path: &BlockPath) -> Option<&Block> {
        path.parent().and_then(|parent| self.get(&parent))
    }

    /// Replace the node at `path` with `blocks` inside its parent
    ///
    /// The root itself cannot be replaced.
    pub fn replace_at(&mut self, path: &BlockPath, blocks: Vec<Block>) -> Option<Block> {
        let index = path.last()?;
        let parent = path.parent()?;
        self.get_mut(&parent)?.replace_child(index, blocks)
    }

    /// Paths of every node below (and including) this one, in document order
    pub fn paths(&self) -> Vec<BlockPath> {
        let mut paths = Vec::new();
        collect_paths(self, &mut BlockPath::root(), &mut paths);
        paths
    }

    /// Check that traversal emits every child and parameter of this subtree
    ///
    /// Leaf kinds must have no children, and kinds whose events carry no
    /// parameters must have none.
    pub fn validate(&self) -> Result<(), StructureError> {
        validate_at(self, &mut BlockPath::root())
    }

    fn emission(&self) -> Emission<'_> {
        let p = &self.parameters;
        match &self.kind {
            BlockKind::Document { meta_data } => {
                Emission::Pair(Event::BeginDocument(meta_data), Event::EndDocument(meta_data))
            }
            BlockKind::MetaData { meta_data } => {
                Emission::Pair(Event::BeginMetaData(meta_data), Event::EndMetaData(meta_data))
            }
            BlockKind::Section => Emission::Pair(Event::BeginSection(p), Event::EndSection(p)),
            BlockKind::Header { level, id } => Emission::Pair(
                Event::BeginHeader {
                    level: *level,
                    id: id.as_deref(),
                    parameters: p,
                },
                Event::EndHeader {
                    level: *level,
                    id: id.as_deref(),
                    parameters: p,
                },
            ),
            BlockKind::Paragraph => {
                Emission::Pair(Event::BeginParagraph(p), Event::EndParagraph(p))
            }
            BlockKind::List { list_type } => Emission::Pair(
                Event::BeginList(*list_type, p),
                Event::EndList(*list_type, p),
            ),
            BlockKind::ListItem => Emission::Pair(Event::BeginListItem(p), Event::EndListItem(p)),
            BlockKind::DefinitionList => Emission::Pair(
                Event::BeginDefinitionList(p),
                Event::EndDefinitionList(p),
            ),
            BlockKind::DefinitionTerm => Emission::Pair(
                Event::BeginDefinitionTerm(p),
                Event::EndDefinitionTerm(p),
            ),
            BlockKind::DefinitionDescription => Emission::Pair(
                Event::BeginDefinitionDescription(p),
                Event::EndDefinitionDescription(p),
            ),
            BlockKind::Table => Emission::Pair(Event::BeginTable(p), Event::EndTable(p)),
            BlockKind::TableRow => Emission::Pair(Event::BeginTableRow(p), Event::EndTableRow(p)),
            BlockKind::TableCell => {
                Emission::Pair(Event::BeginTableCell(p), Event::EndTableCell(p))
            }
            BlockKind::TableHeadCell => Emission::Pair(
                Event::BeginTableHeadCell(p),
                Event::EndTableHeadCell(p),
            ),
            BlockKind::Quotation => {
                Emission::Pair(Event::BeginQuotation(p), Event::EndQuotation(p))
            }
            BlockKind::QuotationLine => Emission::Pair(
                Event::BeginQuotationLine(p),
                Event::EndQuotationLine(p),
            ),
            BlockKind::Format { format } => {
                Emission::Pair(Event::BeginFormat(*format, p), Event::EndFormat(*format, p))
            }
            BlockKind::Group => Emission::Pair(Event::BeginGroup(p), Event::EndGroup(p)),
            BlockKind::Link {
                reference,
                free_standing,
            } => Emission::Pair(
                Event::BeginLink {
                    reference,
                    free_standing: *free_standing,
                    parameters: p,
                },
                Event::EndLink {
                    reference,
                    free_standing: *free_standing,
                    parameters: p,
                },
            ),
            BlockKind::MacroMarker {
                name,
                content,
                inline,
            } => Emission::Pair(
                Event::BeginMacroMarker {
                    name,
                    parameters: p,
                    content: content.as_deref(),
                    inline: *inline,
                },
                Event::EndMacroMarker {
                    name,
                    parameters: p,
                    content: content.as_deref(),
                    inline: *inline,
                },
            ),
            BlockKind::Image {
                reference,
                free_standing,
            } => Emission::Leaf(Event::Image {
                reference,
                free_standing: *free_standing,
                parameters: p,
            }),
            BlockKind::Macro {
                id,
                content,
                inline,
            } => Emission::Leaf(Event::Macro {
                id,
                parameters: p,
                content: content.as_deref(),
                inline: *inline,
            }),
            BlockKind::Word { text } => Emission::Leaf(Event::Word(text)),
            BlockKind::Space => Emission::Leaf(Event::Space),
            BlockKind::SpecialSymbol { symbol } => Emission::Leaf(Event::SpecialSymbol(*symbol)),
            BlockKind::NewLine => Emission::Leaf(Event::NewLine),
            BlockKind::RawText { content, syntax } => {
                Emission::Leaf(Event::RawText { content, syntax })
            }
            BlockKind::Verbatim { content, inline } => Emission::Leaf(Event::Verbatim {
                content,
                inline: *inline,
                parameters: p,
            }),
            BlockKind::HorizontalLine => Emission::Leaf(Event::HorizontalLine(p)),
            BlockKind::Id { name } => Emission::Leaf(Event::Id(name)),
            BlockKind::EmptyLines { count } => Emission::Leaf(Event::EmptyLines(*count)),
        }
    }

    /// Begin event of a composite block
    pub fn begin_event(&self) -> Option<Event<'_>> {
        match self.emission() {
            Emission::Pair(begin, _) => Some(begin),
            Emission::Leaf(_) => None,
        }
    }

    /// End event of a composite block
    pub fn end_event(&self) -> Option<Event<'_>> {
        match self.emission() {
            Emission::Pair(_, end) => Some(end),
            Emission::Leaf(_) => None,
        }
    }

    /// Single event of a leaf block
    pub fn leaf_event(&self) -> Option<Event<'_>> {
        match self.emission() {
            Emission::Leaf(event) => Some(event),
            Emission::Pair(..) => None,
        }
    }

    /// Emit this subtree to `listener`, depth-first and pre-order
    ///
    /// The tree is not modified, so traversing it again yields the same
    /// events. The first listener error stops the traversal.
    pub fn traverse<L: Listener + ?Sized>(&self, listener: &mut L) -> EventResult {
        match self.emission() {
            Emission::Leaf(event) => event.dispatch(listener),
            Emission::Pair(begin, end) => {
                begin.dispatch(listener)?;
                for child in &self.children {
                    child.traverse(listener)?;
                }
                end.dispatch(listener)
            }
        }
    }
}

fn validate_at(block: &Block, current: &mut BlockPath) -> Result<(), StructureError> {
    let tag = block.tag();
    if !tag.is_composite() && !block.children.is_empty() {
        return Err(StructureError::LeafWithChildren {
            tag,
            path: current.clone(),
        });
    }
    if !tag.emits_parameters() && !block.parameters.is_empty() {
        return Err(StructureError::UnemittedParameters {
            tag,
            path: current.clone(),
        });
    }
    for (index, child) in block.children.iter().enumerate() {
        current.push(index);
        validate_at(child, current)?;
        current.pop();
    }
    Ok(())
}

fn collect_paths(block: &Block, current: &mut BlockPath, paths: &mut Vec<BlockPath>) {
    paths.push(current.clone());
    for (index, child) in block.children.iter().enumerate() {
        current.push(index);
        collect_paths(child, current, paths);
        current.pop();
    }
}

/// Position of a node as child indices from a root
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BlockPath(Vec<usize>);

impl BlockPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Index within the parent
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn parent(&self) -> Option<BlockPath> {
        if self.0.is_empty() {
            None
        } else {
            Some(BlockPath(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    pub fn child(&self, index: usize) -> BlockPath {
        let mut indices = self.0.clone();
        indices.push(index);
        BlockPath(indices)
    }

    fn push(&mut self, index: usize) {
        self.0.push(index);
    }

    fn pop(&mut self) {
        self.0.pop();
    }
}

impl fmt::Display for BlockPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "/{}", parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use crate::reference::ResourceType;

    #[derive(Default)]
    struct Recorder {
        kinds: Vec<EventKind>,
    }

    impl Listener for Recorder {
        fn on_event(&mut self, event: &Event<'_>) -> EventResult {
            self.kinds.push(event.kind());
            Ok(())
        }
    }

    fn sample() -> Block {
        Block::document(
            MetaData::new(),
            vec![
                Block::header(
                    HeaderLevel::LEVEL1,
                    Some("Htitle".to_string()),
                    vec![Block::word("title")],
                ),
                Block::paragraph(vec![
                    Block::word("hello"),
                    Block::space(),
                    Block::format(Format::Bold, vec![Block::word("world")]),
                ]),
            ],
        )
    }

    #[test]
    fn test_traversal_order() {
        let mut recorder = Recorder::default();
        sample().traverse(&mut recorder).unwrap();
        assert_eq!(
            recorder.kinds,
            vec![
                EventKind::BeginDocument,
                EventKind::BeginHeader,
                EventKind::Word,
                EventKind::EndHeader,
                EventKind::BeginParagraph,
                EventKind::Word,
                EventKind::Space,
                EventKind::BeginFormat,
                EventKind::Word,
                EventKind::EndFormat,
                EventKind::EndParagraph,
                EventKind::EndDocument,
            ]
        );
    }

    #[test]
    fn test_leaf_emits_single_event() {
        let image = Block::image(ResourceReference::new("a.png", ResourceType::Url), true);
        assert!(image.leaf_event().is_some());
        assert!(image.begin_event().is_none());
        assert!(!image.is_composite());
    }

    #[test]
    fn test_end_event_carries_same_parameters() {
        let block = Block::paragraph(vec![]).with_parameter("class", "note");
        let begin = block.begin_event().unwrap();
        let end = block.end_event().unwrap();
        assert_eq!(begin.parameters(), end.parameters());
        assert_eq!(begin.kind(), EventKind::BeginParagraph);
        assert_eq!(end.kind(), EventKind::EndParagraph);
    }

    #[test]
    fn test_header_level_bounds() {
        assert!(HeaderLevel::new(0).is_err());
        assert!(HeaderLevel::new(7).is_err());
        assert_eq!(HeaderLevel::new(3).unwrap().to_string(), "LEVEL3");
    }

    #[test]
    fn test_enum_display() {
        assert_eq!(Format::Strikedout.to_string(), "STRIKEDOUT");
        assert_eq!(ListType::Numbered.to_string(), "NUMBERED");
    }

    #[test]
    fn test_replace_child() {
        let mut paragraph = Block::paragraph(vec![Block::word("a"), Block::word("b")]);
        let removed = paragraph.replace_child(0, vec![Block::word("x"), Block::word("y")]);
        assert_eq!(removed, Some(Block::word("a")));
        assert_eq!(
            paragraph.children(),
            &[Block::word("x"), Block::word("y"), Block::word("b")]
        );
        assert_eq!(paragraph.replace_child(10, vec![]), None);
    }

    #[test]
    fn test_insert_and_remove_children() {
        let mut group = Block::group(vec![Block::word("a")]);
        group.insert_children(0, vec![Block::space()]);
        group.insert_children(99, vec![Block::new_line()]);
        assert_eq!(group.children().len(), 3);
        assert_eq!(group.children()[0], Block::space());
        assert_eq!(group.remove_child(2), Some(Block::new_line()));
        assert_eq!(group.remove_child(5), None);
    }

    #[test]
    fn test_paths_and_navigation() {
        let doc = sample();
        let paths = doc.paths();
        assert_eq!(paths[0], BlockPath::root());
        let bold_word = BlockPath::from_indices(vec![1, 2, 0]);
        assert!(paths.contains(&bold_word));
        assert_eq!(doc.get(&bold_word), Some(&Block::word("world")));
        assert_eq!(doc.parent_of(&bold_word).map(Block::tag), Some(BlockTag::Format));
        assert_eq!(bold_word.to_string(), "/1/2/0");
        assert!(doc.parent_of(&BlockPath::root()).is_none());
    }

    #[test]
    fn test_replace_at() {
        let mut doc = sample();
        let path = BlockPath::from_indices(vec![1, 0]);
        let old = doc.replace_at(&path, vec![Block::word("bye")]);
        assert_eq!(old, Some(Block::word("hello")));
        assert_eq!(doc.get(&path), Some(&Block::word("bye")));
        assert_eq!(doc.replace_at(&BlockPath::root(), vec![]), None);
    }

    #[test]
    fn test_json_shape() {
        let block = Block::paragraph(vec![Block::word("hi"), Block::special_symbol('!')]);
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "paragraph");
        assert_eq!(json["children"][0]["type"], "word");
        assert_eq!(json["children"][0]["text"], "hi");
        assert_eq!(json["children"][1]["symbol"], "!");

        let back: Block = serde_json::from_value(json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_json_rejects_bad_header_level() {
        let json = r#"{"type": "header", "level": 9}"#;
        assert!(serde_json::from_str::<Block>(json).is_err());
    }

    #[test]
    fn test_validate() {
        assert_eq!(sample().validate(), Ok(()));

        let mut word = Block::word("a");
        word.children.push(Block::word("hidden"));
        let tree = Block::paragraph(vec![Block::space(), word]);
        let err = tree.validate().unwrap_err();
        assert_eq!(
            err,
            StructureError::LeafWithChildren {
                tag: BlockTag::Word,
                path: BlockPath::from_indices(vec![1]),
            }
        );
        assert_eq!(err.to_string(), "Word block at /1 cannot have children");

        let tree = Block::document(MetaData::new(), vec![]).with_parameter("class", "x");
        assert_eq!(
            tree.validate().unwrap_err().to_string(),
            "Document block at / cannot have parameters"
        );

        let tree = Block::paragraph(vec![Block::list_item(vec![]).with_parameter("class", "x")]);
        assert_eq!(tree.validate(), Ok(()));
    }
}
