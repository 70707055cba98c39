//! Syntax identifiers
//!
//! A syntax is identified by a string of the form `<id>/<version>`, for
//! example `xhtml/1.0` or `event/1.0`. Well-known ids carry a human-readable
//! name; any other id is accepted and uses the id itself as its name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while parsing a syntax id string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// The string has no `/` separator
    #[error("Invalid Syntax format [{0}]: expected <id>/<version>")]
    InvalidFormat(String),

    /// The part before the last `/` is empty
    #[error("Invalid Syntax format [{0}]: the syntax id is empty")]
    EmptyId(String),
}

/// Well-known syntax ids and their display names
const WELL_KNOWN: &[(&str, &str)] = &[
    ("xwiki", "XWiki"),
    ("xhtml", "XHTML"),
    ("annotatedxhtml", "Annotated XHTML"),
    ("html", "HTML"),
    ("plain", "Plain"),
    ("xml", "XML"),
    ("event", "Events"),
    ("json", "JSON"),
    ("markdown", "Markdown"),
    ("creole", "Creole"),
    ("mediawiki", "MediaWiki"),
    ("confluence", "Confluence"),
    ("jspwiki", "JSPWiki"),
    ("twiki", "TWiki"),
    ("docbook", "DocBook"),
];

/// A syntax family, independent of version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyntaxType {
    id: String,
    name: String,
}

impl SyntaxType {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Look up a well-known syntax type by id
    pub fn well_known(id: &str) -> Option<SyntaxType> {
        WELL_KNOWN
            .iter()
            .find(|(known, _)| *known == id)
            .map(|(known, name)| SyntaxType::new(*known, *name))
    }

    /// All well-known syntax types
    pub fn all_well_known() -> Vec<SyntaxType> {
        WELL_KNOWN
            .iter()
            .map(|(id, name)| SyntaxType::new(*id, *name))
            .collect()
    }

    /// Resolve an id to a syntax type, falling back to the id as the name
    pub fn from_id(id: &str) -> SyntaxType {
        Self::well_known(id).unwrap_or_else(|| SyntaxType::new(id, id))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A versioned syntax
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Syntax {
    syntax_type: SyntaxType,
    version: String,
}

impl Syntax {
    pub fn new(syntax_type: SyntaxType, version: impl Into<String>) -> Self {
        Self {
            syntax_type,
            version: version.into(),
        }
    }

    /// Parse an `<id>/<version>` string, splitting on the last `/`
    pub fn parse(id_string: &str) -> Result<Self, SyntaxError> {
        let (id, version) = id_string
            .rsplit_once('/')
            .ok_or_else(|| SyntaxError::InvalidFormat(id_string.to_string()))?;

        if id.is_empty() {
            return Err(SyntaxError::EmptyId(id_string.to_string()));
        }

        Ok(Self::new(SyntaxType::from_id(id), version))
    }

    pub fn syntax_type(&self) -> &SyntaxType {
        &self.syntax_type
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Serialize back to `<id>/<version>`
    pub fn to_id_string(&self) -> String {
        format!("{}/{}", self.syntax_type.id, self.version)
    }

    /// The `event/1.0` syntax produced by the event renderer
    pub fn event_1_0() -> Self {
        Self::new(SyntaxType::from_id("event"), "1.0")
    }

    /// The `json/1.0` serialized tree syntax
    pub fn json_1_0() -> Self {
        Self::new(SyntaxType::from_id("json"), "1.0")
    }

    pub fn xhtml_1_0() -> Self {
        Self::new(SyntaxType::from_id("xhtml"), "1.0")
    }

    pub fn plain_1_0() -> Self {
        Self::new(SyntaxType::from_id("plain"), "1.0")
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.syntax_type.name, self.version)
    }
}

impl FromStr for Syntax {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Syntax {
    type Error = SyntaxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Syntax> for String {
    fn from(syntax: Syntax) -> Self {
        syntax.to_id_string()
    }
}
