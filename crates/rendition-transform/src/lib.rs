//! rendition-transform - Tree-mutating transformations
//!
//! A [`Transformation`] rewrites a block tree in place. A
//! [`DefaultTransformationManager`] runs a list of them by priority, stopping
//! at the first failure. Two transformations come built in:
//!
//! - [`MacroTransformation`] expands macro calls registered in a
//!   [`MacroRegistry`]
//! - [`IconTransformation`] replaces emoticon text such as `:)` with icon
//!   images
//!
//! # Example
//!
//! ```
//! use rendition_ast::Block;
//! use rendition_transform::{
//!     icon::plain_text_blocks, DefaultTransformationManager, IconTransformation,
//!     TransformationContext, TransformationManager,
//! };
//!
//! let manager = DefaultTransformationManager::new().with_transformation(IconTransformation::new());
//! let mut tree = Block::paragraph(plain_text_blocks("Done (y)"));
//!
//! manager
//!     .perform_transformations(&mut tree, &TransformationContext::new())
//!     .unwrap();
//! assert_eq!(tree.children().len(), 3);
//! ```

pub mod context;
pub mod error;
pub mod icon;
pub mod macros;
pub mod registry;
pub mod transformation;

pub use context::TransformationContext;
pub use error::{MacroError, Result, TransformationError};
pub use icon::IconTransformation;
pub use macros::{Macro, MacroContext, MacroRegistry, MacroTransformation};
pub use registry::TransformationRegistry;
pub use transformation::{DefaultTransformationManager, Transformation, TransformationManager};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
