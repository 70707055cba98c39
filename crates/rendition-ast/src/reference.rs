//! Resource references
//!
//! A resource reference is the resolved target of a link or an image: what
//! kind of resource it points to, the raw reference text, and any ancillary
//! parameters (interwiki alias, query string, anchor).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Parameter key holding the alias of an interwiki reference
pub const INTERWIKI_ALIAS: &str = "interWikiAlias";

/// Parameter key holding a query string
pub const QUERY_STRING: &str = "queryString";

/// Parameter key holding an anchor
pub const ANCHOR: &str = "anchor";

/// Kind of resource a reference points to
///
/// Serialized as its scheme keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceType {
    /// A wiki document
    Document,
    /// An absolute URL
    Url,
    /// A mail address
    Mailto,
    /// An attachment of a document
    Attachment,
    /// A page in another wiki, addressed through an alias
    Interwiki,
    /// A path relative to the current server
    Path,
    /// A Windows UNC path
    Unc,
    /// A space (group of documents)
    Space,
    /// A page
    Page,
    /// A named icon
    Icon,
    /// Inline data (`data:` URI)
    Data,
    /// Not yet determined
    Unknown,
    /// A collaborator-defined scheme
    Custom(String),
}

impl ResourceType {
    /// Scheme keyword used in typed references (`doc:`, `url:`, ...)
    pub fn scheme(&self) -> &str {
        match self {
            ResourceType::Document => "doc",
            ResourceType::Url => "url",
            ResourceType::Mailto => "mailto",
            ResourceType::Attachment => "attach",
            ResourceType::Interwiki => "interwiki",
            ResourceType::Path => "path",
            ResourceType::Unc => "unc",
            ResourceType::Space => "space",
            ResourceType::Page => "page",
            ResourceType::Icon => "icon",
            ResourceType::Data => "data",
            ResourceType::Unknown => "unknown",
            ResourceType::Custom(scheme) => scheme,
        }
    }

    /// Map a scheme keyword back to its resource type
    ///
    /// Unrecognized schemes yield a [`ResourceType::Custom`] value.
    pub fn from_scheme(scheme: &str) -> Self {
        match scheme {
            "doc" => ResourceType::Document,
            "url" => ResourceType::Url,
            "mailto" => ResourceType::Mailto,
            "attach" => ResourceType::Attachment,
            "interwiki" => ResourceType::Interwiki,
            "path" => ResourceType::Path,
            "unc" => ResourceType::Unc,
            "space" => ResourceType::Space,
            "page" => ResourceType::Page,
            "icon" => ResourceType::Icon,
            "data" => ResourceType::Data,
            "unknown" => ResourceType::Unknown,
            other => ResourceType::Custom(other.to_string()),
        }
    }
}

impl From<String> for ResourceType {
    fn from(scheme: String) -> Self {
        ResourceType::from_scheme(&scheme)
    }
}

impl From<ResourceType> for String {
    fn from(resource_type: ResourceType) -> Self {
        resource_type.scheme().to_string()
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

/// A typed pointer to a link or image target
///
/// Created by a reference parser, optionally adjusted by the resolver chain
/// (typed flag, parameters) and then treated as a plain value by renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReference {
    /// What the reference points to
    #[serde(rename = "type")]
    resource_type: ResourceType,
    /// Whether the source text carried an explicit scheme prefix
    #[serde(default = "default_typed")]
    typed: bool,
    /// The reference text, without any scheme prefix
    reference: String,
    /// Base references, evaluated first to last
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    base_references: Vec<String>,
    /// Ancillary parameters
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    parameters: BTreeMap<String, String>,
}

fn default_typed() -> bool {
    true
}

impl ResourceReference {
    /// Create a typed reference of the given type
    pub fn new(reference: impl Into<String>, resource_type: ResourceType) -> Self {
        Self {
            resource_type,
            typed: true,
            reference: reference.into(),
            base_references: Vec::new(),
            parameters: BTreeMap::new(),
        }
    }

    /// Create an interwiki reference: `suffix` is the reference, `alias` is
    /// stored under [`INTERWIKI_ALIAS`]
    pub fn interwiki(suffix: impl Into<String>, alias: impl Into<String>) -> Self {
        let mut reference = Self::new(suffix, ResourceType::Interwiki);
        reference.set_parameter(INTERWIKI_ALIAS, alias);
        reference
    }

    pub fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    pub fn set_type(&mut self, resource_type: ResourceType) {
        self.resource_type = resource_type;
    }

    pub fn is_typed(&self) -> bool {
        self.typed
    }

    pub fn set_typed(&mut self, typed: bool) {
        self.typed = typed;
    }

    /// Builder form of [`set_typed`](Self::set_typed)
    pub fn with_typed(mut self, typed: bool) -> Self {
        self.typed = typed;
        self
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn set_reference(&mut self, reference: impl Into<String>) {
        self.reference = reference.into();
    }

    /// Append a base reference; later entries qualify earlier ones
    pub fn add_base_reference(&mut self, base: impl Into<String>) {
        self.base_references.push(base.into());
    }

    pub fn add_base_references<I, S>(&mut self, bases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_references
            .extend(bases.into_iter().map(Into::into));
    }

    pub fn base_references(&self) -> &[String] {
        &self.base_references
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parameters.insert(name.into(), value.into());
    }

    /// Merge parameters, overwriting existing keys
    pub fn set_parameters(&mut self, parameters: &BTreeMap<String, String>) {
        for (name, value) in parameters {
            self.parameters.insert(name.clone(), value.clone());
        }
    }

    pub fn remove_parameter(&mut self, name: &str) -> Option<String> {
        self.parameters.remove(name)
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// Alias of an interwiki reference
    pub fn interwiki_alias(&self) -> Option<&str> {
        self.parameter(INTERWIKI_ALIAS)
    }

    pub fn anchor(&self) -> Option<&str> {
        self.parameter(ANCHOR)
    }

    pub fn query_string(&self) -> Option<&str> {
        self.parameter(QUERY_STRING)
    }
}

impl fmt::Display for ResourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Typed = [{}] Type = [{}] Reference = [{}]",
            self.typed,
            self.resource_type.scheme(),
            self.reference
        )?;

        if !self.base_references.is_empty() {
            let bases: Vec<String> = self
                .base_references
                .iter()
                .map(|base| format!("[{}]", base))
                .collect();
            write!(f, " Base References = [{}]", bases.join(", "))?;
        }

        if !self.parameters.is_empty() {
            let params: Vec<String> = self
                .parameters
                .iter()
                .map(|(name, value)| format!("[{}] = [{}]", name, value))
                .collect();
            write!(f, " Parameters = [{}]", params.join(", "))?;
        }

        Ok(())
    }
}
