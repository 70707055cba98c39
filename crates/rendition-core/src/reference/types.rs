//! Scheme parsers

use std::sync::OnceLock;

use regex::Regex;
use rendition_ast::{ResourceReference, ResourceType};

use super::ResourceReferenceTypeParser;

/// Accepts any body and produces a reference of a fixed type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleTypeParser {
    resource_type: ResourceType,
}

impl SimpleTypeParser {
    pub fn new(resource_type: ResourceType) -> Self {
        Self { resource_type }
    }
}

impl ResourceReferenceTypeParser for SimpleTypeParser {
    fn resource_type(&self) -> ResourceType {
        self.resource_type.clone()
    }

    fn parse(&self, reference: &str) -> Option<ResourceReference> {
        Some(ResourceReference::new(reference, self.resource_type.clone()))
    }
}

fn url_scheme() -> &'static Regex {
    static URL_SCHEME: OnceLock<Regex> = OnceLock::new();
    URL_SCHEME.get_or_init(|| Regex::new(r"^[a-zA-Z0-9+.\-]*://").unwrap())
}

/// Accepts only URL-shaped bodies (`<protocol>://...`)
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlTypeParser;

impl UrlTypeParser {
    pub fn new() -> Self {
        Self
    }

    /// Whether `reference` starts with a `<protocol>://` prefix
    pub fn is_url(reference: &str) -> bool {
        url_scheme().is_match(reference)
    }
}

impl ResourceReferenceTypeParser for UrlTypeParser {
    fn resource_type(&self) -> ResourceType {
        ResourceType::Url
    }

    fn parse(&self, reference: &str) -> Option<ResourceReference> {
        if Self::is_url(reference) {
            Some(ResourceReference::new(reference, ResourceType::Url))
        } else {
            None
        }
    }
}
