use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rendition_ast::{Event, EventKind, EventResult};

use super::{ChainingListener, ListenerChain, StageKind};

/// Tracks where in the block structure the current event sits
///
/// Entering a block is recorded before the begin event is forwarded and
/// leaving it after the end event is forwarded, so later stages see the block
/// as open during both its begin and end events. The previous event kind is
/// recorded after forwarding.
#[derive(Debug, Default)]
pub struct BlockStateStage {
    previous: Cell<Option<EventKind>>,
    // Index of the current item per open list, -1 before the first item
    list_items: RefCell<Vec<isize>>,
    definition_items: RefCell<Vec<isize>>,
    quotation_lines: RefCell<Vec<isize>>,
    paragraph_depth: Cell<usize>,
    header_depth: Cell<usize>,
    link_depth: Cell<usize>,
    macro_depth: Cell<usize>,
    format_depth: Cell<usize>,
    definition_term_depth: Cell<usize>,
    definition_description_depth: Cell<usize>,
    table_depth: Cell<usize>,
    table_cell_depth: Cell<usize>,
    row_index: Cell<Option<usize>>,
    cell_index: Cell<Option<usize>>,
}

fn inc(cell: &Cell<usize>) {
    cell.set(cell.get() + 1);
}

fn dec(cell: &Cell<usize>) {
    cell.set(cell.get().saturating_sub(1));
}

fn next_item(stack: &RefCell<Vec<isize>>) {
    if let Some(index) = stack.borrow_mut().last_mut() {
        *index += 1;
    }
}

fn current_item(stack: &RefCell<Vec<isize>>) -> Option<usize> {
    stack
        .borrow()
        .last()
        .and_then(|index| usize::try_from(*index).ok())
}

impl BlockStateStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kind of the event handled before the current one
    pub fn previous_event(&self) -> Option<EventKind> {
        self.previous.get()
    }

    pub fn list_depth(&self) -> usize {
        self.list_items.borrow().len()
    }

    pub fn is_in_list(&self) -> bool {
        self.list_depth() > 0
    }

    /// Zero-based index of the current item in the innermost list
    pub fn list_item_index(&self) -> Option<usize> {
        current_item(&self.list_items)
    }

    pub fn definition_list_depth(&self) -> usize {
        self.definition_items.borrow().len()
    }

    pub fn is_in_definition_list(&self) -> bool {
        self.definition_list_depth() > 0
    }

    /// Zero-based index of the current term or description
    pub fn definition_item_index(&self) -> Option<usize> {
        current_item(&self.definition_items)
    }

    pub fn is_in_definition_term(&self) -> bool {
        self.definition_term_depth.get() > 0
    }

    pub fn is_in_definition_description(&self) -> bool {
        self.definition_description_depth.get() > 0
    }

    pub fn quotation_depth(&self) -> usize {
        self.quotation_lines.borrow().len()
    }

    pub fn is_in_quotation(&self) -> bool {
        self.quotation_depth() > 0
    }

    pub fn quotation_line_index(&self) -> Option<usize> {
        current_item(&self.quotation_lines)
    }

    pub fn is_in_paragraph(&self) -> bool {
        self.paragraph_depth.get() > 0
    }

    pub fn is_in_header(&self) -> bool {
        self.header_depth.get() > 0
    }

    pub fn link_depth(&self) -> usize {
        self.link_depth.get()
    }

    pub fn is_in_link(&self) -> bool {
        self.link_depth.get() > 0
    }

    pub fn is_in_macro(&self) -> bool {
        self.macro_depth.get() > 0
    }

    pub fn is_in_format(&self) -> bool {
        self.format_depth.get() > 0
    }

    pub fn is_in_table(&self) -> bool {
        self.table_depth.get() > 0
    }

    pub fn is_in_table_cell(&self) -> bool {
        self.table_cell_depth.get() > 0
    }

    /// Zero-based index of the current row of the innermost table
    pub fn table_row_index(&self) -> Option<usize> {
        self.row_index.get()
    }

    /// Zero-based index of the current cell of the current row
    pub fn cell_index(&self) -> Option<usize> {
        self.cell_index.get()
    }

    /// Whether inline content is currently allowed
    pub fn is_inline(&self) -> bool {
        self.is_in_paragraph()
            || self.is_in_header()
            || self.is_in_definition_term()
            || self.quotation_line_index().is_some()
            || self.is_in_table_cell()
            || self.list_item_index().is_some()
    }

    fn enter(&self, event: &Event<'_>) {
        match event {
            Event::BeginList(..) => self.list_items.borrow_mut().push(-1),
            Event::BeginListItem(_) => next_item(&self.list_items),
            Event::BeginDefinitionList(_) => self.definition_items.borrow_mut().push(-1),
            Event::BeginDefinitionTerm(_) => {
                next_item(&self.definition_items);
                inc(&self.definition_term_depth);
            }
            Event::BeginDefinitionDescription(_) => {
                next_item(&self.definition_items);
                inc(&self.definition_description_depth);
            }
            Event::BeginQuotation(_) => self.quotation_lines.borrow_mut().push(-1),
            Event::BeginQuotationLine(_) => next_item(&self.quotation_lines),
            Event::BeginParagraph(_) => inc(&self.paragraph_depth),
            Event::BeginHeader { .. } => inc(&self.header_depth),
            Event::BeginLink { .. } => inc(&self.link_depth),
            Event::BeginMacroMarker { .. } => inc(&self.macro_depth),
            Event::BeginFormat(..) => inc(&self.format_depth),
            Event::BeginTable(_) => {
                inc(&self.table_depth);
                self.row_index.set(None);
            }
            Event::BeginTableRow(_) => {
                self.row_index.set(Some(self.row_index.get().map_or(0, |i| i + 1)));
                self.cell_index.set(None);
            }
            Event::BeginTableCell(_) | Event::BeginTableHeadCell(_) => {
                inc(&self.table_cell_depth);
                self.cell_index.set(Some(self.cell_index.get().map_or(0, |i| i + 1)));
            }
            _ => {}
        }
    }

    fn leave(&self, event: &Event<'_>) {
        match event {
            Event::EndList(..) => {
                self.list_items.borrow_mut().pop();
            }
            Event::EndDefinitionList(_) => {
                self.definition_items.borrow_mut().pop();
            }
            Event::EndDefinitionTerm(_) => dec(&self.definition_term_depth),
            Event::EndDefinitionDescription(_) => dec(&self.definition_description_depth),
            Event::EndQuotation(_) => {
                self.quotation_lines.borrow_mut().pop();
            }
            Event::EndParagraph(_) => dec(&self.paragraph_depth),
            Event::EndHeader { .. } => dec(&self.header_depth),
            Event::EndLink { .. } => dec(&self.link_depth),
            Event::EndMacroMarker { .. } => dec(&self.macro_depth),
            Event::EndFormat(..) => dec(&self.format_depth),
            Event::EndTable(_) => {
                dec(&self.table_depth);
                self.row_index.set(None);
                self.cell_index.set(None);
            }
            Event::EndTableCell(_) | Event::EndTableHeadCell(_) => dec(&self.table_cell_depth),
            _ => {}
        }
    }
}

impl ChainingListener for BlockStateStage {
    fn kind(&self) -> StageKind {
        StageKind::BlockState
    }

    fn on_event(&self, event: &Event<'_>, chain: &ListenerChain) -> EventResult {
        self.enter(event);
        let result = chain.forward(self.kind(), event);
        self.leave(event);
        self.previous.set(Some(event.kind()));
        result
    }

    fn is_stackable(&self) -> bool {
        true
    }

    fn create_instance(&self) -> Option<Rc<dyn ChainingListener>> {
        Some(Rc::new(BlockStateStage::new()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
