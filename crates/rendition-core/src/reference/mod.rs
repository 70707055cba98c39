//! Reference resolution
//!
//! Turns the raw target text of a link or an image into a
//! [`ResourceReference`]. Resolution runs in two steps:
//!
//! 1. **Typed**: a `<scheme>:<rest>` prefix is looked up in a scheme registry
//!    ([`TypedReferenceParser`]). Each scheme parser recognizes exactly one
//!    scheme and may reject the body (the interwiki parser rejects a body
//!    without `:`).
//! 2. **Untyped**: when no scheme matches, the untyped parser guesses. Links
//!    are tried as a URL, then fall back to a document reference (or are taken
//!    as a URL outright when there is no wiki to link into). Images are tried
//!    as a URL, then fall back to an attachment reference. Untyped results are
//!    marked `typed = false`.

mod facade;
mod interwiki;
mod typed;
mod types;
mod untyped;
mod wiki_model;

use rendition_ast::{ResourceReference, ResourceType};
use thiserror::Error;

pub use facade::{ImageReferenceParser, LinkReferenceParser};
pub use interwiki::InterWikiTypeParser;
pub use typed::{TypedReferenceParser, SCHEME_SEPARATOR};
pub use types::{SimpleTypeParser, UrlTypeParser};
pub use untyped::{UntypedImageReferenceParser, UntypedLinkReferenceParser};
pub use wiki_model::{DefaultWikiModel, WikiModel, REFERENCE_PLACEHOLDER};

/// Errors raised by explicit typed resolution requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// The scheme keyword is empty
    #[error("Invalid reference [{0}]: missing scheme")]
    EmptyScheme(String),

    /// No parser is registered for the scheme
    #[error("Unknown reference scheme [{0}]")]
    UnknownScheme(String),

    /// The scheme parser rejected the reference body
    #[error("Invalid [{scheme}] reference [{reference}]")]
    Rejected { scheme: String, reference: String },
}

/// Result type for reference operations
pub type Result<T> = std::result::Result<T, ReferenceError>;

/// Parses a complete raw reference; always produces a reference
pub trait ResourceReferenceParser {
    fn parse(&self, raw_reference: &str) -> ResourceReference;
}

/// Parses the body of a reference for one scheme
pub trait ResourceReferenceTypeParser {
    /// The type this parser produces; its scheme is the registry key
    fn resource_type(&self) -> ResourceType;

    /// Parse `reference` (scheme prefix already removed), `None` if invalid
    fn parse(&self, reference: &str) -> Option<ResourceReference>;
}
