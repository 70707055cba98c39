//! Output sinks for renderers

use std::io;

/// Text sink a renderer writes to
pub trait Printer {
    fn print(&mut self, text: &str) -> io::Result<()>;

    /// Print `text` followed by a newline
    fn println(&mut self, text: &str) -> io::Result<()> {
        self.print(text)?;
        self.print("\n")
    }
}

/// Printer accumulating into a `String`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringPrinter {
    buffer: String,
}

impl StringPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl Printer for StringPrinter {
    fn print(&mut self, text: &str) -> io::Result<()> {
        self.buffer.push_str(text);
        Ok(())
    }
}

/// Printer writing through to any [`io::Write`]
#[derive(Debug)]
pub struct WriterPrinter<W: io::Write> {
    writer: W,
}

impl<W: io::Write> WriterPrinter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> Printer for WriterPrinter<W> {
    fn print(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())
    }
}

impl<P: Printer + ?Sized> Printer for &mut P {
    fn print(&mut self, text: &str) -> io::Result<()> {
        (**self).print(text)
    }

    fn println(&mut self, text: &str) -> io::Result<()> {
        (**self).println(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_printer() {
        let mut printer = StringPrinter::new();
        printer.print("a").unwrap();
        printer.println("b").unwrap();
        printer.print("c").unwrap();
        assert_eq!(printer.as_str(), "ab\nc");

        printer.clear();
        assert_eq!(printer.into_string(), "");
    }

    #[test]
    fn test_writer_printer() {
        let mut printer = WriterPrinter::new(Vec::new());
        printer.println("line").unwrap();
        printer.flush().unwrap();
        assert_eq!(printer.into_inner(), b"line\n".to_vec());
    }

    #[test]
    fn test_borrowed_printer() {
        fn emit<P: Printer>(mut printer: P) {
            printer.println("x").unwrap();
        }

        let mut printer = StringPrinter::new();
        emit(&mut printer);
        emit(&mut printer);
        assert_eq!(printer.as_str(), "x\nx\n");
    }
}
