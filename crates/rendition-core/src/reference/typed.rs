use std::collections::HashMap;

use rendition_ast::{ResourceReference, ResourceType};

use super::{
    InterWikiTypeParser, ReferenceError, ResourceReferenceParser, ResourceReferenceTypeParser,
    Result, SimpleTypeParser, UrlTypeParser,
};

/// Separator between a scheme keyword and the reference body
pub const SCHEME_SEPARATOR: char = ':';

/// Scheme registry resolving `<scheme>:<body>` references
///
/// As a [`ResourceReferenceParser`] it never fails: input without a
/// registered scheme, or whose body the scheme parser rejects, comes back as
/// an untyped [`ResourceType::Unknown`] reference holding the raw text.
pub struct TypedReferenceParser {
    parsers: HashMap<String, Box<dyn ResourceReferenceTypeParser>>,
}

impl Default for TypedReferenceParser {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl TypedReferenceParser {
    /// A registry with no scheme
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// A registry with every built-in scheme
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        for resource_type in [
            ResourceType::Document,
            ResourceType::Mailto,
            ResourceType::Attachment,
            ResourceType::Path,
            ResourceType::Unc,
            ResourceType::Space,
            ResourceType::Page,
            ResourceType::Icon,
            ResourceType::Data,
        ] {
            registry.register(SimpleTypeParser::new(resource_type));
        }
        registry.register(UrlTypeParser::new());
        registry.register(InterWikiTypeParser::new());
        registry
    }

    /// Register `parser` under its type's scheme, replacing any previous one
    pub fn register(&mut self, parser: impl ResourceReferenceTypeParser + 'static) {
        let scheme = parser.resource_type().scheme().to_string();
        log::debug!("Registered reference scheme: {}", scheme);
        self.parsers.insert(scheme, Box::new(parser));
    }

    pub fn supports(&self, scheme: &str) -> bool {
        self.parsers.contains_key(scheme)
    }

    /// Registered schemes, sorted
    pub fn schemes(&self) -> Vec<&str> {
        let mut schemes: Vec<&str> = self.parsers.keys().map(String::as_str).collect();
        schemes.sort_unstable();
        schemes
    }

    /// Parse `body` with the parser registered for `scheme`
    pub fn parse_with_scheme(&self, scheme: &str, body: &str) -> Result<ResourceReference> {
        if scheme.is_empty() {
            return Err(ReferenceError::EmptyScheme(format!(
                "{}{}",
                SCHEME_SEPARATOR, body
            )));
        }
        let parser = self
            .parsers
            .get(scheme)
            .ok_or_else(|| ReferenceError::UnknownScheme(scheme.to_string()))?;
        let mut reference = parser.parse(body).ok_or_else(|| ReferenceError::Rejected {
            scheme: scheme.to_string(),
            reference: body.to_string(),
        })?;
        reference.set_typed(true);
        Ok(reference)
    }

    /// Typed parse of a raw reference, `None` if it has no usable scheme
    pub fn try_parse(&self, raw_reference: &str) -> Option<ResourceReference> {
        let (scheme, body) = raw_reference.split_once(SCHEME_SEPARATOR)?;
        match self.parse_with_scheme(scheme, body) {
            Ok(reference) => Some(reference),
            Err(err) => {
                log::trace!("No typed match for [{}]: {}", raw_reference, err);
                None
            }
        }
    }
}

impl ResourceReferenceParser for TypedReferenceParser {
    fn parse(&self, raw_reference: &str) -> ResourceReference {
        self.try_parse(raw_reference).unwrap_or_else(|| {
            ResourceReference::new(raw_reference, ResourceType::Unknown).with_typed(false)
        })
    }
}
