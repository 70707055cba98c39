//! rendition-ast - Document tree and event vocabulary
//!
//! This crate provides the value types shared by every rendition component:
//! the [`Block`] tree, the [`Listener`] event contract it is traversed into,
//! [`ResourceReference`] link and image targets, [`Syntax`] identifiers and
//! document [`MetaData`].

pub mod block;
pub mod event;
pub mod listener;
pub mod matcher;
pub mod metadata;
pub mod reference;
pub mod syntax;

pub use block::{
    Block, BlockKind, BlockPath, BlockTag, Format, HeaderLevel, HeaderLevelError, ListType,
    Parameters, StructureError,
};
pub use event::{Event, EventKind};
pub use listener::{EventResult, Listener, ListenerError, NullListener};
pub use matcher::{AnyMatcher, Axes, BlockMatcher, TagMatcher};
pub use metadata::MetaData;
pub use reference::{ResourceReference, ResourceType};
pub use syntax::{Syntax, SyntaxError, SyntaxType};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
