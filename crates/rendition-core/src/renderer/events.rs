//! `event/1.0` renderer
//!
//! Prints one line per event: the event name followed by its bracketed
//! arguments. This is the textual form used to compare event streams in
//! tests, e.g.
//!
//! ```text
//! beginDocument
//! beginParagraph
//! beginFormat [BOLD]
//! onWord [Hello]
//! endFormat [BOLD]
//! onSpace
//! onMacroInline [toc] [depth=2] [content]
//! endParagraph
//! endDocument
//! ```

use std::collections::BTreeMap;
use std::fmt::Write;

use rendition_ast::{Event, EventResult, Listener, Parameters};

use super::printer::{Printer, StringPrinter};

/// Listener printing the `event/1.0` form of every event it receives
#[derive(Debug, Default)]
pub struct EventsRenderer<P: Printer = StringPrinter> {
    printer: P,
}

impl<P: Printer> EventsRenderer<P> {
    pub fn new(printer: P) -> Self {
        Self { printer }
    }

    pub fn printer(&self) -> &P {
        &self.printer
    }

    pub fn printer_mut(&mut self) -> &mut P {
        &mut self.printer
    }

    pub fn into_printer(self) -> P {
        self.printer
    }
}

impl<P: Printer> Listener for EventsRenderer<P> {
    fn on_event(&mut self, event: &Event<'_>) -> EventResult {
        let line = format_event(event);
        // The document ends without a trailing newline
        if matches!(event, Event::EndDocument(_)) {
            self.printer.print(&line)?;
        } else {
            self.printer.println(&line)?;
        }
        Ok(())
    }
}

/// The `event/1.0` line for `event`, without line terminator
pub fn format_event(event: &Event<'_>) -> String {
    let name = event.kind().name();
    match *event {
        Event::BeginDocument(meta)
        | Event::EndDocument(meta)
        | Event::BeginMetaData(meta)
        | Event::EndMetaData(meta) => format!("{}{}", name, serialize_parameters(meta.entries())),
        Event::BeginFormat(format, p) | Event::EndFormat(format, p) => {
            format!("{} [{}]{}", name, format, serialize_parameters(p))
        }
        Event::BeginList(list_type, p) | Event::EndList(list_type, p) => {
            format!("{} [{}]{}", name, list_type, serialize_parameters(p))
        }
        Event::BeginHeader {
            level,
            id,
            parameters,
        }
        | Event::EndHeader {
            level,
            id,
            parameters,
        } => format!(
            "{} [{}, {}]{}",
            name,
            level,
            id.unwrap_or("null"),
            serialize_parameters(parameters)
        ),
        Event::BeginLink {
            reference,
            free_standing,
            parameters,
        }
        | Event::EndLink {
            reference,
            free_standing,
            parameters,
        }
        | Event::Image {
            reference,
            free_standing,
            parameters,
        } => format!(
            "{} [{}] [{}]{}",
            name,
            reference,
            free_standing,
            serialize_parameters(parameters)
        ),
        Event::BeginMacroMarker {
            name: id,
            parameters,
            content,
            inline,
        }
        | Event::EndMacroMarker {
            name: id,
            parameters,
            content,
            inline,
        }
        | Event::Macro {
            id,
            parameters,
            content,
            inline,
        } => format_macro(name, id, parameters, content, inline),
        Event::Word(word) => format!("{} [{}]", name, escape(word)),
        Event::SpecialSymbol(symbol) => format!("{} [{}]", name, symbol),
        Event::Id(id) => format!("{} [{}]", name, id),
        Event::EmptyLines(count) => format!("{} [{}]", name, count),
        Event::Verbatim {
            content,
            inline,
            parameters,
        } => format!(
            "{} [{}] [{}]{}",
            name,
            content,
            inline,
            serialize_parameters(parameters)
        ),
        Event::RawText { content, syntax } => {
            format!("{} [{}] [{}]", name, content, syntax.to_id_string())
        }
        // Item-like events print their name alone, even with parameters
        Event::NewLine
        | Event::Space
        | Event::BeginListItem(_)
        | Event::EndListItem(_)
        | Event::BeginDefinitionTerm(_)
        | Event::EndDefinitionTerm(_)
        | Event::BeginDefinitionDescription(_)
        | Event::EndDefinitionDescription(_)
        | Event::BeginQuotationLine(_)
        | Event::EndQuotationLine(_) => name.to_string(),
        Event::BeginGroup(p)
        | Event::EndGroup(p)
        | Event::BeginParagraph(p)
        | Event::EndParagraph(p)
        | Event::BeginDefinitionList(p)
        | Event::EndDefinitionList(p)
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
        | Event::HorizontalLine(p) => format!("{}{}", name, serialize_parameters(p)),
    }
}

/// `onMacroInline [id] [k=v|k2=v2] [content]`, content omitted when absent
fn format_macro(
    event_name: &str,
    id: &str,
    parameters: &Parameters,
    content: Option<&str>,
    inline: bool,
) -> String {
    let parameters: Vec<String> = parameters
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();

    let mut line = format!(
        "{}{} [{}] [{}]",
        event_name,
        if inline { "Inline" } else { "Standalone" },
        id,
        parameters.join("|")
    );
    if let Some(content) = content {
        let _ = write!(line, " [{}]", content);
    }
    line
}

/// ` [[k]=[v][k2]=[v2]]`, or nothing for an empty map
fn serialize_parameters(parameters: &BTreeMap<String, String>) -> String {
    if parameters.is_empty() {
        return String::new();
    }
    let mut serialized = String::from(" [");
    for (key, value) in parameters {
        let _ = write!(serialized, "[{}]=[{}]", escape(key), escape(value));
    }
    serialized.push(']');
    serialized
}

/// Replace characters beyond ASCII `~` with `(((code)))`, one group per
/// UTF-16 code unit
pub fn escape(text: &str) -> String {
    if text.chars().all(|c| (c as u32) <= 126) {
        return text.to_string();
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    let mut units = [0u16; 2];
    for c in text.chars() {
        if (c as u32) > 126 {
            for unit in c.encode_utf16(&mut units) {
                let _ = write!(escaped, "((({})))", unit);
            }
        } else {
            escaped.push(c);
        }
    }
    escaped
}
