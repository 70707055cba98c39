//! The listener contract
//!
//! A [`Listener`] receives the events of a document in order. Every callback
//! has a default implementation that routes through [`Listener::on_event`],
//! which itself does nothing by default. A listener therefore overrides
//! either the handful of callbacks it cares about, or `on_event` alone when
//! it treats every event the same way (forwarding, recording, counting).

use thiserror::Error;

use crate::block::{Format, HeaderLevel, ListType, Parameters};
use crate::event::Event;
use crate::metadata::MetaData;
use crate::reference::ResourceReference;
use crate::syntax::Syntax;

/// Errors raised by a listener while handling an event
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Writing to the output sink failed
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// Formatting into an in-memory sink failed
    #[error("Format error")]
    Fmt(#[from] std::fmt::Error),

    /// Listener-specific failure
    #[error("{0}")]
    Custom(String),
}

impl ListenerError {
    pub fn custom(message: impl Into<String>) -> Self {
        ListenerError::Custom(message.into())
    }
}

/// Result of delivering one event
pub type EventResult = std::result::Result<(), ListenerError>;

/// Receiver of the document event vocabulary
pub trait Listener {
    /// Catch-all hook every default callback routes through
    fn on_event(&mut self, event: &Event<'_>) -> EventResult {
        let _ = event;
        Ok(())
    }

    fn begin_document(&mut self, meta_data: &MetaData) -> EventResult {
        self.on_event(&Event::BeginDocument(meta_data))
    }

    fn end_document(&mut self, meta_data: &MetaData) -> EventResult {
        self.on_event(&Event::EndDocument(meta_data))
    }

    fn begin_meta_data(&mut self, meta_data: &MetaData) -> EventResult {
        self.on_event(&Event::BeginMetaData(meta_data))
    }

    fn end_meta_data(&mut self, meta_data: &MetaData) -> EventResult {
        self.on_event(&Event::EndMetaData(meta_data))
    }

    fn begin_group(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::BeginGroup(parameters))
    }

    fn end_group(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::EndGroup(parameters))
    }

    fn begin_format(&mut self, format: Format, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::BeginFormat(format, parameters))
    }

    fn end_format(&mut self, format: Format, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::EndFormat(format, parameters))
    }

    fn begin_paragraph(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::BeginParagraph(parameters))
    }

    fn end_paragraph(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::EndParagraph(parameters))
    }

    fn begin_list(&mut self, list_type: ListType, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::BeginList(list_type, parameters))
    }

    fn end_list(&mut self, list_type: ListType, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::EndList(list_type, parameters))
    }

    fn begin_list_item(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::BeginListItem(parameters))
    }

    fn end_list_item(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::EndListItem(parameters))
    }

    fn begin_definition_list(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::BeginDefinitionList(parameters))
    }

    fn end_definition_list(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::EndDefinitionList(parameters))
    }

    fn begin_definition_term(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::BeginDefinitionTerm(parameters))
    }

    fn end_definition_term(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::EndDefinitionTerm(parameters))
    }

    fn begin_definition_description(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::BeginDefinitionDescription(parameters))
    }

    fn end_definition_description(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::EndDefinitionDescription(parameters))
    }

    fn begin_table(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::BeginTable(parameters))
    }

    fn end_table(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::EndTable(parameters))
    }

    fn begin_table_row(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::BeginTableRow(parameters))
    }

    fn end_table_row(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::EndTableRow(parameters))
    }

    fn begin_table_cell(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::BeginTableCell(parameters))
    }

    fn end_table_cell(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::EndTableCell(parameters))
    }

    fn begin_table_head_cell(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::BeginTableHeadCell(parameters))
    }

    fn end_table_head_cell(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::EndTableHeadCell(parameters))
    }

    fn begin_section(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::BeginSection(parameters))
    }

    fn end_section(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::EndSection(parameters))
    }

    fn begin_header(
        &mut self,
        level: HeaderLevel,
        id: Option<&str>,
        parameters: &Parameters,
    ) -> EventResult {
        self.on_event(&Event::BeginHeader {
            level,
            id,
            parameters,
        })
    }

    fn end_header(
        &mut self,
        level: HeaderLevel,
        id: Option<&str>,
        parameters: &Parameters,
    ) -> EventResult {
        self.on_event(&Event::EndHeader {
            level,
            id,
            parameters,
        })
    }

    fn begin_macro_marker(
        &mut self,
        name: &str,
        parameters: &Parameters,
        content: Option<&str>,
        inline: bool,
    ) -> EventResult {
        self.on_event(&Event::BeginMacroMarker {
            name,
            parameters,
            content,
            inline,
        })
    }

    fn end_macro_marker(
        &mut self,
        name: &str,
        parameters: &Parameters,
        content: Option<&str>,
        inline: bool,
    ) -> EventResult {
        self.on_event(&Event::EndMacroMarker {
            name,
            parameters,
            content,
            inline,
        })
    }

    fn begin_quotation(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::BeginQuotation(parameters))
    }

    fn end_quotation(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::EndQuotation(parameters))
    }

    fn begin_quotation_line(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::BeginQuotationLine(parameters))
    }

    fn end_quotation_line(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::EndQuotationLine(parameters))
    }

    fn begin_link(
        &mut self,
        reference: &ResourceReference,
        free_standing: bool,
        parameters: &Parameters,
    ) -> EventResult {
        self.on_event(&Event::BeginLink {
            reference,
            free_standing,
            parameters,
        })
    }

    fn end_link(
        &mut self,
        reference: &ResourceReference,
        free_standing: bool,
        parameters: &Parameters,
    ) -> EventResult {
        self.on_event(&Event::EndLink {
            reference,
            free_standing,
            parameters,
        })
    }

    fn on_new_line(&mut self) -> EventResult {
        self.on_event(&Event::NewLine)
    }

    fn on_macro(
        &mut self,
        id: &str,
        parameters: &Parameters,
        content: Option<&str>,
        inline: bool,
    ) -> EventResult {
        self.on_event(&Event::Macro {
            id,
            parameters,
            content,
            inline,
        })
    }

    fn on_word(&mut self, word: &str) -> EventResult {
        self.on_event(&Event::Word(word))
    }

    fn on_space(&mut self) -> EventResult {
        self.on_event(&Event::Space)
    }

    fn on_special_symbol(&mut self, symbol: char) -> EventResult {
        self.on_event(&Event::SpecialSymbol(symbol))
    }

    fn on_id(&mut self, name: &str) -> EventResult {
        self.on_event(&Event::Id(name))
    }

    fn on_horizontal_line(&mut self, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::HorizontalLine(parameters))
    }

    fn on_empty_lines(&mut self, count: usize) -> EventResult {
        self.on_event(&Event::EmptyLines(count))
    }

    fn on_verbatim(&mut self, content: &str, inline: bool, parameters: &Parameters) -> EventResult {
        self.on_event(&Event::Verbatim {
            content,
            inline,
            parameters,
        })
    }

    fn on_raw_text(&mut self, content: &str, syntax: &Syntax) -> EventResult {
        self.on_event(&Event::RawText { content, syntax })
    }

    fn on_image(
        &mut self,
        reference: &ResourceReference,
        free_standing: bool,
        parameters: &Parameters,
    ) -> EventResult {
        self.on_event(&Event::Image {
            reference,
            free_standing,
            parameters,
        })
    }
}

/// A listener that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullListener;

impl Listener for NullListener {}

impl<L: Listener + ?Sized> Listener for &mut L {
    fn on_event(&mut self, event: &Event<'_>) -> EventResult {
        event.dispatch(&mut **self)
    }
}

impl<L: Listener + ?Sized> Listener for Box<L> {
    fn on_event(&mut self, event: &Event<'_>) -> EventResult {
        event.dispatch(&mut **self)
    }
}
