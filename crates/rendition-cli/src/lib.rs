//! rendition CLI - Command-line interface library
//!
//! - Events: render a JSON tree as `event/1.0` text
//! - Reference: resolve a raw link or image reference
//! - Syntax: validate a syntax id
//!
//! # Binary Usage
//!
//! ```bash
//! # Render a tree, running the configured transformations first
//! rendition events page.json --transform --output page.events
//!
//! # Resolve a link reference outside wiki mode
//! rendition reference "Main.WebHome" --no-wiki
//!
//! # Check a syntax id
//! rendition syntax xwiki/2.1
//! ```

pub mod app;

pub use app::{
    describe_syntax, events_command, reference_command, render_events, resolve_reference,
    run_cli, syntax_command,
};
