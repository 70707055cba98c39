//! Linkable document space

use std::collections::BTreeSet;

use rendition_ast::{Parameters, ResourceReference, ResourceType};

/// Placeholder replaced by the reference text in URL templates
pub const REFERENCE_PLACEHOLDER: &str = "{reference}";

/// The wiki that document and attachment references resolve against
///
/// Its presence switches untyped link resolution into wiki mode.
pub trait WikiModel {
    /// URL of a link target, `None` for types the model cannot address
    fn link_url(&self, reference: &ResourceReference) -> Option<String>;

    /// URL of an image target
    fn image_url(&self, reference: &ResourceReference, parameters: &Parameters) -> Option<String>;

    fn is_document_available(&self, reference: &ResourceReference) -> bool;

    fn document_view_url(&self, reference: &ResourceReference) -> String;

    fn document_edit_url(&self, reference: &ResourceReference) -> String;
}

/// Template-driven wiki model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultWikiModel {
    view_url: String,
    edit_url: String,
    image_url: String,
    documents: BTreeSet<String>,
}

impl Default for DefaultWikiModel {
    fn default() -> Self {
        Self {
            view_url: "/view/{reference}".to_string(),
            edit_url: "/edit/{reference}".to_string(),
            image_url: "/download/{reference}".to_string(),
            documents: BTreeSet::new(),
        }
    }
}

impl DefaultWikiModel {
    pub fn new(view_url: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            view_url: view_url.into(),
            image_url: image_url.into(),
            ..Self::default()
        }
    }

    pub fn with_edit_url(mut self, edit_url: impl Into<String>) -> Self {
        self.edit_url = edit_url.into();
        self
    }

    /// Declare a document as existing
    pub fn with_document(mut self, reference: impl Into<String>) -> Self {
        self.documents.insert(reference.into());
        self
    }

    fn expand(template: &str, reference: &ResourceReference) -> String {
        let mut url = template.replace(REFERENCE_PLACEHOLDER, reference.reference());
        if let Some(query) = reference.query_string() {
            url.push('?');
            url.push_str(query);
        }
        if let Some(anchor) = reference.anchor() {
            url.push('#');
            url.push_str(anchor);
        }
        url
    }
}

impl WikiModel for DefaultWikiModel {
    fn link_url(&self, reference: &ResourceReference) -> Option<String> {
        match reference.resource_type() {
            ResourceType::Document | ResourceType::Page | ResourceType::Space => {
                Some(self.document_view_url(reference))
            }
            ResourceType::Attachment => Some(Self::expand(&self.image_url, reference)),
            ResourceType::Url | ResourceType::Path | ResourceType::Data => {
                Some(reference.reference().to_string())
            }
            ResourceType::Mailto => Some(format!("mailto:{}", reference.reference())),
            ResourceType::Unc => Some(format!(
                "file://{}",
                reference.reference().replace('\\', "/")
            )),
            _ => None,
        }
    }

    fn image_url(&self, reference: &ResourceReference, _parameters: &Parameters) -> Option<String> {
        match reference.resource_type() {
            ResourceType::Attachment | ResourceType::Icon => {
                Some(Self::expand(&self.image_url, reference))
            }
            ResourceType::Url | ResourceType::Data => Some(reference.reference().to_string()),
            _ => None,
        }
    }

    fn is_document_available(&self, reference: &ResourceReference) -> bool {
        self.documents.contains(reference.reference())
    }

    fn document_view_url(&self, reference: &ResourceReference) -> String {
        Self::expand(&self.view_url, reference)
    }

    fn document_edit_url(&self, reference: &ResourceReference) -> String {
        Self::expand(&self.edit_url, reference)
    }
}
