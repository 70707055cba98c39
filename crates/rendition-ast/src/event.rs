//! Borrowed event values
//!
//! Every callback of [`Listener`] has a matching [`Event`] variant. Events
//! let combinators (fan-out, wrapping, chain stages) forward the whole
//! vocabulary through a single code path: a combinator receives an event in
//! its catch-all [`Listener::on_event`] and calls [`Event::dispatch`] on the
//! next listener, which lands in that listener's per-callback method.

use std::fmt;

use crate::block::{Format, HeaderLevel, ListType, Parameters};
use crate::listener::{EventResult, Listener};
use crate::metadata::MetaData;
use crate::reference::ResourceReference;
use crate::syntax::Syntax;

/// One event of the listener vocabulary, borrowing its payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event<'a> {
    BeginDocument(&'a MetaData),
    EndDocument(&'a MetaData),
    BeginMetaData(&'a MetaData),
    EndMetaData(&'a MetaData),
    BeginGroup(&'a Parameters),
    EndGroup(&'a Parameters),
    BeginFormat(Format, &'a Parameters),
    EndFormat(Format, &'a Parameters),
    BeginParagraph(&'a Parameters),
    EndParagraph(&'a Parameters),
    BeginList(ListType, &'a Parameters),
    EndList(ListType, &'a Parameters),
    BeginListItem(&'a Parameters),
    EndListItem(&'a Parameters),
    BeginDefinitionList(&'a Parameters),
    EndDefinitionList(&'a Parameters),
    BeginDefinitionTerm(&'a Parameters),
    EndDefinitionTerm(&'a Parameters),
    BeginDefinitionDescription(&'a Parameters),
    EndDefinitionDescription(&'a Parameters),
    BeginTable(&'a Parameters),
    EndTable(&'a Parameters),
    BeginTableRow(&'a Parameters),
    EndTableRow(&'a Parameters),
    BeginTableCell(&'a Parameters),
    EndTableCell(&'a Parameters),
    BeginTableHeadCell(&'a Parameters),
    EndTableHeadCell(&'a Parameters),
    BeginSection(&'a Parameters),
    EndSection(&'a Parameters),
    BeginHeader {
        level: HeaderLevel,
        id: Option<&'a str>,
        parameters: &'a Parameters,
    },
    EndHeader {
        level: HeaderLevel,
        id: Option<&'a str>,
        parameters: &'a Parameters,
    },
    BeginMacroMarker {
        name: &'a str,
        parameters: &'a Parameters,
        content: Option<&'a str>,
        inline: bool,
    },
    EndMacroMarker {
        name: &'a str,
        parameters: &'a Parameters,
        content: Option<&'a str>,
        inline: bool,
    },
    BeginQuotation(&'a Parameters),
    EndQuotation(&'a Parameters),
    BeginQuotationLine(&'a Parameters),
    EndQuotationLine(&'a Parameters),
    BeginLink {
        reference: &'a ResourceReference,
        free_standing: bool,
        parameters: &'a Parameters,
    },
    EndLink {
        reference: &'a ResourceReference,
        free_standing: bool,
        parameters: &'a Parameters,
    },
    NewLine,
    Macro {
        id: &'a str,
        parameters: &'a Parameters,
        content: Option<&'a str>,
        inline: bool,
    },
    Word(&'a str),
    Space,
    SpecialSymbol(char),
    Id(&'a str),
    HorizontalLine(&'a Parameters),
    EmptyLines(usize),
    Verbatim {
        content: &'a str,
        inline: bool,
        parameters: &'a Parameters,
    },
    RawText {
        content: &'a str,
        syntax: &'a Syntax,
    },
    Image {
        reference: &'a ResourceReference,
        free_standing: bool,
        parameters: &'a Parameters,
    },
}

impl<'a> Event<'a> {
    /// Deliver this event to the matching callback of `listener`
    pub fn dispatch<L: Listener + ?Sized>(&self, listener: &mut L) -> EventResult {
        match *self {
            Event::BeginDocument(meta) => listener.begin_document(meta),
            Event::EndDocument(meta) => listener.end_document(meta),
            Event::BeginMetaData(meta) => listener.begin_meta_data(meta),
            Event::EndMetaData(meta) => listener.end_meta_data(meta),
            Event::BeginGroup(p) => listener.begin_group(p),
            Event::EndGroup(p) => listener.end_group(p),
            Event::BeginFormat(format, p) => listener.begin_format(format, p),
            Event::EndFormat(format, p) => listener.end_format(format, p),
            Event::BeginParagraph(p) => listener.begin_paragraph(p),
            Event::EndParagraph(p) => listener.end_paragraph(p),
            Event::BeginList(list_type, p) => listener.begin_list(list_type, p),
            Event::EndList(list_type, p) => listener.end_list(list_type, p),
            Event::BeginListItem(p) => listener.begin_list_item(p),
            Event::EndListItem(p) => listener.end_list_item(p),
            Event::BeginDefinitionList(p) => listener.begin_definition_list(p),
            Event::EndDefinitionList(p) => listener.end_definition_list(p),
            Event::BeginDefinitionTerm(p) => listener.begin_definition_term(p),
            Event::EndDefinitionTerm(p) => listener.end_definition_term(p),
            Event::BeginDefinitionDescription(p) => listener.begin_definition_description(p),
            Event::EndDefinitionDescription(p) => listener.end_definition_description(p),
            Event::BeginTable(p) => listener.begin_table(p),
            Event::EndTable(p) => listener.end_table(p),
            Event::BeginTableRow(p) => listener.begin_table_row(p),
            Event::EndTableRow(p) => listener.end_table_row(p),
            Event::BeginTableCell(p) => listener.begin_table_cell(p),
            Event::EndTableCell(p) => listener.end_table_cell(p),
            Event::BeginTableHeadCell(p) => listener.begin_table_head_cell(p),
            Event::EndTableHeadCell(p) => listener.end_table_head_cell(p),
            Event::BeginSection(p) => listener.begin_section(p),
            Event::EndSection(p) => listener.end_section(p),
            Event::BeginHeader {
                level,
                id,
                parameters,
            } => listener.begin_header(level, id, parameters),
            Event::EndHeader {
                level,
                id,
                parameters,
            } => listener.end_header(level, id, parameters),
            Event::BeginMacroMarker {
                name,
                parameters,
                content,
                inline,
            } => listener.begin_macro_marker(name, parameters, content, inline),
            Event::EndMacroMarker {
                name,
                parameters,
                content,
                inline,
            } => listener.end_macro_marker(name, parameters, content, inline),
            Event::BeginQuotation(p) => listener.begin_quotation(p),
            Event::EndQuotation(p) => listener.end_quotation(p),
            Event::BeginQuotationLine(p) => listener.begin_quotation_line(p),
            Event::EndQuotationLine(p) => listener.end_quotation_line(p),
            Event::BeginLink {
                reference,
                free_standing,
                parameters,
            } => listener.begin_link(reference, free_standing, parameters),
            Event::EndLink {
                reference,
                free_standing,
                parameters,
            } => listener.end_link(reference, free_standing, parameters),
            Event::NewLine => listener.on_new_line(),
            Event::Macro {
                id,
                parameters,
                content,
                inline,
            } => listener.on_macro(id, parameters, content, inline),
            Event::Word(word) => listener.on_word(word),
            Event::Space => listener.on_space(),
            Event::SpecialSymbol(symbol) => listener.on_special_symbol(symbol),
            Event::Id(name) => listener.on_id(name),
            Event::HorizontalLine(p) => listener.on_horizontal_line(p),
            Event::EmptyLines(count) => listener.on_empty_lines(count),
            Event::Verbatim {
                content,
                inline,
                parameters,
            } => listener.on_verbatim(content, inline, parameters),
            Event::RawText { content, syntax } => listener.on_raw_text(content, syntax),
            Event::Image {
                reference,
                free_standing,
                parameters,
            } => listener.on_image(reference, free_standing, parameters),
        }
    }

    /// The payload-free kind of this event
    pub fn kind(&self) -> EventKind {
        match self {
            Event::BeginDocument(_) => EventKind::BeginDocument,
            Event::EndDocument(_) => EventKind::EndDocument,
            Event::BeginMetaData(_) => EventKind::BeginMetaData,
            Event::EndMetaData(_) => EventKind::EndMetaData,
            Event::BeginGroup(_) => EventKind::BeginGroup,
            Event::EndGroup(_) => EventKind::EndGroup,
            Event::BeginFormat(..) => EventKind::BeginFormat,
            Event::EndFormat(..) => EventKind::EndFormat,
            Event::BeginParagraph(_) => EventKind::BeginParagraph,
            Event::EndParagraph(_) => EventKind::EndParagraph,
            Event::BeginList(..) => EventKind::BeginList,
            Event::EndList(..) => EventKind::EndList,
            Event::BeginListItem(_) => EventKind::BeginListItem,
            Event::EndListItem(_) => EventKind::EndListItem,
            Event::BeginDefinitionList(_) => EventKind::BeginDefinitionList,
            Event::EndDefinitionList(_) => EventKind::EndDefinitionList,
            Event::BeginDefinitionTerm(_) => EventKind::BeginDefinitionTerm,
            Event::EndDefinitionTerm(_) => EventKind::EndDefinitionTerm,
            Event::BeginDefinitionDescription(_) => EventKind::BeginDefinitionDescription,
            Event::EndDefinitionDescription(_) => EventKind::EndDefinitionDescription,
            Event::BeginTable(_) => EventKind::BeginTable,
            Event::EndTable(_) => EventKind::EndTable,
            Event::BeginTableRow(_) => EventKind::BeginTableRow,
            Event::EndTableRow(_) => EventKind::EndTableRow,
            Event::BeginTableCell(_) => EventKind::BeginTableCell,
            Event::EndTableCell(_) => EventKind::EndTableCell,
            Event::BeginTableHeadCell(_) => EventKind::BeginTableHeadCell,
            Event::EndTableHeadCell(_) => EventKind::EndTableHeadCell,
            Event::BeginSection(_) => EventKind::BeginSection,
            Event::EndSection(_) => EventKind::EndSection,
            Event::BeginHeader { .. } => EventKind::BeginHeader,
            Event::EndHeader { .. } => EventKind::EndHeader,
            Event::BeginMacroMarker { .. } => EventKind::BeginMacroMarker,
            Event::EndMacroMarker { .. } => EventKind::EndMacroMarker,
            Event::BeginQuotation(_) => EventKind::BeginQuotation,
            Event::EndQuotation(_) => EventKind::EndQuotation,
            Event::BeginQuotationLine(_) => EventKind::BeginQuotationLine,
            Event::EndQuotationLine(_) => EventKind::EndQuotationLine,
            Event::BeginLink { .. } => EventKind::BeginLink,
            Event::EndLink { .. } => EventKind::EndLink,
            Event::NewLine => EventKind::NewLine,
            Event::Macro { .. } => EventKind::Macro,
            Event::Word(_) => EventKind::Word,
            Event::Space => EventKind::Space,
            Event::SpecialSymbol(_) => EventKind::SpecialSymbol,
            Event::Id(_) => EventKind::Id,
            Event::HorizontalLine(_) => EventKind::HorizontalLine,
            Event::EmptyLines(_) => EventKind::EmptyLines,
            Event::Verbatim { .. } => EventKind::Verbatim,
            Event::RawText { .. } => EventKind::RawText,
            Event::Image { .. } => EventKind::Image,
        }
    }

    /// Parameters carried by the event, if its callback takes any
    pub fn parameters(&self) -> Option<&'a Parameters> {
        match *self {
            Event::BeginGroup(p)
            | Event::EndGroup(p)
            | Event::BeginFormat(_, p)
            | Event::EndFormat(_, p)
            | Event::BeginParagraph(p)
            | Event::EndParagraph(p)
            | Event::BeginList(_, p)
            | Event::EndList(_, p)
            | Event::BeginListItem(p)
            | Event::EndListItem(p)
            | Event::BeginDefinitionList(p)
            | Event::EndDefinitionList(p)
            | Event::BeginDefinitionTerm(p)
            | Event::EndDefinitionTerm(p)
            | Event::BeginDefinitionDescription(p)
            | Event::EndDefinitionDescription(p)
            | Event::BeginTable(p)
            | Event::EndTable(p)
            | Event::BeginTableRow(p)
            | Event::EndTableRow(p)
            | Event::BeginTableCell(p)
            | Event::EndTableCell(p)
            | Event::BeginTableHeadCell(p)
            | Event::EndTableHeadCell(p)
            | Event::BeginSection(p)
            | Event::EndSection(p)
            | Event::BeginQuotation(p)
            | Event::EndQuotation(p)
            | Event::BeginQuotationLine(p)
            | Event::EndQuotationLine(p)
            | Event::HorizontalLine(p) => Some(p),
            Event::BeginHeader { parameters, .. }
            | Event::EndHeader { parameters, .. }
            | Event::BeginMacroMarker { parameters, .. }
            | Event::EndMacroMarker { parameters, .. }
            | Event::BeginLink { parameters, .. }
            | Event::EndLink { parameters, .. }
            | Event::Macro { parameters, .. }
            | Event::Verbatim { parameters, .. }
            | Event::Image { parameters, .. } => Some(parameters),
            _ => None,
        }
    }
}

/// Payload-free event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    BeginDocument,
    EndDocument,
    BeginMetaData,
    EndMetaData,
    BeginGroup,
    EndGroup,
    BeginFormat,
    EndFormat,
    BeginParagraph,
    EndParagraph,
    BeginList,
    EndList,
    BeginListItem,
    EndListItem,
    BeginDefinitionList,
    EndDefinitionList,
    BeginDefinitionTerm,
    EndDefinitionTerm,
    BeginDefinitionDescription,
    EndDefinitionDescription,
    BeginTable,
    EndTable,
    BeginTableRow,
    EndTableRow,
    BeginTableCell,
    EndTableCell,
    BeginTableHeadCell,
    EndTableHeadCell,
    BeginSection,
    EndSection,
    BeginHeader,
    EndHeader,
    BeginMacroMarker,
    EndMacroMarker,
    BeginQuotation,
    EndQuotation,
    BeginQuotationLine,
    EndQuotationLine,
    BeginLink,
    EndLink,
    NewLine,
    Macro,
    Word,
    Space,
    SpecialSymbol,
    Id,
    HorizontalLine,
    EmptyLines,
    Verbatim,
    RawText,
    Image,
}

impl EventKind {
    /// Callback name as printed by the event renderer
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::BeginDocument => "beginDocument",
            EventKind::EndDocument => "endDocument",
            EventKind::BeginMetaData => "beginMetaData",
            EventKind::EndMetaData => "endMetaData",
            EventKind::BeginGroup => "beginGroup",
            EventKind::EndGroup => "endGroup",
            EventKind::BeginFormat => "beginFormat",
            EventKind::EndFormat => "endFormat",
            EventKind::BeginParagraph => "beginParagraph",
            EventKind::EndParagraph => "endParagraph",
            EventKind::BeginList => "beginList",
            EventKind::EndList => "endList",
            EventKind::BeginListItem => "beginListItem",
            EventKind::EndListItem => "endListItem",
            EventKind::BeginDefinitionList => "beginDefinitionList",
            EventKind::EndDefinitionList => "endDefinitionList",
            EventKind::BeginDefinitionTerm => "beginDefinitionTerm",
            EventKind::EndDefinitionTerm => "endDefinitionTerm",
            EventKind::BeginDefinitionDescription => "beginDefinitionDescription",
            EventKind::EndDefinitionDescription => "endDefinitionDescription",
            EventKind::BeginTable => "beginTable",
            EventKind::EndTable => "endTable",
            EventKind::BeginTableRow => "beginTableRow",
            EventKind::EndTableRow => "endTableRow",
            EventKind::BeginTableCell => "beginTableCell",
            EventKind::EndTableCell => "endTableCell",
            EventKind::BeginTableHeadCell => "beginTableHeadCell",
            EventKind::EndTableHeadCell => "endTableHeadCell",
            EventKind::BeginSection => "beginSection",
            EventKind::EndSection => "endSection",
            EventKind::BeginHeader => "beginHeader",
            EventKind::EndHeader => "endHeader",
            EventKind::BeginMacroMarker => "beginMacroMarker",
            EventKind::EndMacroMarker => "endMacroMarker",
            EventKind::BeginQuotation => "beginQuotation",
            EventKind::EndQuotation => "endQuotation",
            EventKind::BeginQuotationLine => "beginQuotationLine",
            EventKind::EndQuotationLine => "endQuotationLine",
            EventKind::BeginLink => "beginLink",
            EventKind::EndLink => "endLink",
            EventKind::NewLine => "onNewLine",
            EventKind::Macro => "onMacro",
            EventKind::Word => "onWord",
            EventKind::Space => "onSpace",
            EventKind::SpecialSymbol => "onSpecialSymbol",
            EventKind::Id => "onId",
            EventKind::HorizontalLine => "onHorizontalLine",
            EventKind::EmptyLines => "onEmptyLines",
            EventKind::Verbatim => "onVerbatim",
            EventKind::RawText => "onRawText",
            EventKind::Image => "onImage",
        }
    }

    pub fn is_begin(&self) -> bool {
        self.name().starts_with("begin")
    }

    pub fn is_end(&self) -> bool {
        self.name().starts_with("end")
    }

    /// For an end kind, the begin kind it closes
    pub fn opening(&self) -> Option<EventKind> {
        let opening = match self {
            EventKind::EndDocument => EventKind::BeginDocument,
            EventKind::EndMetaData => EventKind::BeginMetaData,
            EventKind::EndGroup => EventKind::BeginGroup,
            EventKind::EndFormat => EventKind::BeginFormat,
            EventKind::EndParagraph => EventKind::BeginParagraph,
            EventKind::EndList => EventKind::BeginList,
            EventKind::EndListItem => EventKind::BeginListItem,
            EventKind::EndDefinitionList => EventKind::BeginDefinitionList,
            EventKind::EndDefinitionTerm => EventKind::BeginDefinitionTerm,
            EventKind::EndDefinitionDescription => EventKind::BeginDefinitionDescription,
            EventKind::EndTable => EventKind::BeginTable,
            EventKind::EndTableRow => EventKind::BeginTableRow,
            EventKind::EndTableCell => EventKind::BeginTableCell,
            EventKind::EndTableHeadCell => EventKind::BeginTableHeadCell,
            EventKind::EndSection => EventKind::BeginSection,
            EventKind::EndHeader => EventKind::BeginHeader,
            EventKind::EndMacroMarker => EventKind::BeginMacroMarker,
            EventKind::EndQuotation => EventKind::BeginQuotation,
            EventKind::EndQuotationLine => EventKind::BeginQuotationLine,
            EventKind::EndLink => EventKind::BeginLink,
            _ => return None,
        };
        Some(opening)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
