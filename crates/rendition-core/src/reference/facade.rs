use std::rc::Rc;

use rendition_ast::{ResourceReference, ResourceType};

use super::{
    ResourceReferenceParser, TypedReferenceParser, UntypedImageReferenceParser,
    UntypedLinkReferenceParser, WikiModel,
};

/// Link reference resolution: typed first, untyped when no scheme matches
pub struct LinkReferenceParser {
    typed: TypedReferenceParser,
    untyped: UntypedLinkReferenceParser,
    wiki_model: Option<Rc<dyn WikiModel>>,
}

impl LinkReferenceParser {
    /// A parser in wiki mode when `wiki_model` is given
    pub fn new(wiki_model: Option<Rc<dyn WikiModel>>) -> Self {
        Self::with_typed(TypedReferenceParser::with_defaults(), wiki_model)
    }

    /// A parser using a custom scheme registry
    pub fn with_typed(typed: TypedReferenceParser, wiki_model: Option<Rc<dyn WikiModel>>) -> Self {
        Self {
            typed,
            untyped: UntypedLinkReferenceParser::new(wiki_model.clone()),
            wiki_model,
        }
    }

    pub fn wiki_model(&self) -> Option<&dyn WikiModel> {
        self.wiki_model.as_deref()
    }

    pub fn is_in_wiki_mode(&self) -> bool {
        self.untyped.is_in_wiki_mode()
    }
}

impl ResourceReferenceParser for LinkReferenceParser {
    fn parse(&self, raw_reference: &str) -> ResourceReference {
        let reference = self.typed.parse(raw_reference);
        if reference.resource_type() == &ResourceType::Unknown {
            self.untyped.parse(raw_reference)
        } else {
            reference
        }
    }
}

/// Image reference resolution: typed first, untyped when no scheme matches
pub struct ImageReferenceParser {
    typed: TypedReferenceParser,
    untyped: UntypedImageReferenceParser,
}

impl Default for ImageReferenceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageReferenceParser {
    pub fn new() -> Self {
        Self::with_typed(TypedReferenceParser::with_defaults())
    }

    pub fn with_typed(typed: TypedReferenceParser) -> Self {
        Self {
            typed,
            untyped: UntypedImageReferenceParser::new(),
        }
    }
}

impl ResourceReferenceParser for ImageReferenceParser {
    fn parse(&self, raw_reference: &str) -> ResourceReference {
        let reference = self.typed.parse(raw_reference);
        if reference.resource_type() == &ResourceType::Unknown {
            self.untyped.parse(raw_reference)
        } else {
            reference
        }
    }
}
