use rendition_ast::{ResourceReference, ResourceType};

use super::ResourceReferenceTypeParser;

/// Separator between the interwiki alias and the suffix
pub const INTERWIKI_ALIAS_SEPARATOR: char = ':';

/// Parses `<alias>:<suffix>` interwiki bodies
///
/// The alias is everything before the first `:`. A body without any `:` is
/// not an interwiki reference and yields `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterWikiTypeParser;

impl InterWikiTypeParser {
    pub fn new() -> Self {
        Self
    }
}

impl ResourceReferenceTypeParser for InterWikiTypeParser {
    fn resource_type(&self) -> ResourceType {
        ResourceType::Interwiki
    }

    fn parse(&self, reference: &str) -> Option<ResourceReference> {
        let (alias, suffix) = reference.split_once(INTERWIKI_ALIAS_SEPARATOR)?;
        Some(ResourceReference::interwiki(suffix, alias))
    }
}
