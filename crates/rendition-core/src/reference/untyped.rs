use std::rc::Rc;

use rendition_ast::{ResourceReference, ResourceType};

use super::{ResourceReferenceParser, ResourceReferenceTypeParser, UrlTypeParser, WikiModel};

/// Guesses the type of a link reference written without a scheme
///
/// Without a wiki model the whole text is a URL. With one, URL-shaped text is
/// a URL and anything else is a document reference.
#[derive(Clone, Default)]
pub struct UntypedLinkReferenceParser {
    wiki_model: Option<Rc<dyn WikiModel>>,
}

impl UntypedLinkReferenceParser {
    pub fn new(wiki_model: Option<Rc<dyn WikiModel>>) -> Self {
        Self { wiki_model }
    }

    pub fn is_in_wiki_mode(&self) -> bool {
        self.wiki_model.is_some()
    }
}

impl ResourceReferenceParser for UntypedLinkReferenceParser {
    fn parse(&self, raw_reference: &str) -> ResourceReference {
        let reference = if self.is_in_wiki_mode() {
            UrlTypeParser::new()
                .parse(raw_reference)
                .unwrap_or_else(|| ResourceReference::new(raw_reference, ResourceType::Document))
        } else {
            ResourceReference::new(raw_reference, ResourceType::Url)
        };
        reference.with_typed(false)
    }
}

/// Guesses the type of an image reference written without a scheme
///
/// URL-shaped text is a URL, anything else an attachment.
#[derive(Debug, Clone, Copy, Default)]
pub struct UntypedImageReferenceParser;

impl UntypedImageReferenceParser {
    pub fn new() -> Self {
        Self
    }
}

impl ResourceReferenceParser for UntypedImageReferenceParser {
    fn parse(&self, raw_reference: &str) -> ResourceReference {
        let reference = UrlTypeParser::new()
            .parse(raw_reference)
            .unwrap_or_else(|| ResourceReference::new(raw_reference, ResourceType::Attachment));
        reference.with_typed(false)
    }
}
