//! Configuration settings

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reference::{DefaultWikiModel, ImageReferenceParser, LinkReferenceParser, WikiModel};

/// Name of the configuration file looked up in a directory
pub const CONFIG_FILE_NAME: &str = "rendition.toml";

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown transformation: {0}")]
    UnknownTransformation(String),
}

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Reference resolution settings
    pub references: ReferenceSettings,
    /// Transformation pipeline settings
    pub transformations: TransformationSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load settings from `path`, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&content)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(settings)
    }

    /// Load `rendition.toml` from `dir`
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        Self::load(&dir.join(CONFIG_FILE_NAME))
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

/// Reference resolution configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceSettings {
    /// Resolve untyped links against a document space
    pub wiki_mode: bool,
    /// Document view URL template
    pub view_url: String,
    /// Document edit URL template
    pub edit_url: String,
    /// Attachment and icon URL template
    pub image_url: String,
}

impl Default for ReferenceSettings {
    fn default() -> Self {
        Self {
            wiki_mode: true,
            view_url: "/view/{reference}".to_string(),
            edit_url: "/edit/{reference}".to_string(),
            image_url: "/download/{reference}".to_string(),
        }
    }
}

impl ReferenceSettings {
    /// The wiki model these settings describe, `None` outside wiki mode
    pub fn wiki_model(&self) -> Option<Rc<dyn WikiModel>> {
        if !self.wiki_mode {
            return None;
        }
        let model = DefaultWikiModel::new(self.view_url.as_str(), self.image_url.as_str())
            .with_edit_url(self.edit_url.as_str());
        Some(Rc::new(model))
    }

    pub fn link_parser(&self) -> LinkReferenceParser {
        LinkReferenceParser::new(self.wiki_model())
    }

    /// Untyped images are attachments or URLs whatever the wiki mode, so no
    /// setting changes how an image reference resolves
    pub fn image_parser(&self) -> ImageReferenceParser {
        ImageReferenceParser::new()
    }
}

/// Transformation pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformationSettings {
    /// Transformation names, run by priority
    pub enabled: Vec<String>,
    /// Skip transformations and macros unsafe for untrusted input
    pub restricted: bool,
    pub icon: IconSettings,
    #[serde(rename = "macro")]
    pub macros: MacroSettings,
}

impl Default for TransformationSettings {
    fn default() -> Self {
        Self {
            enabled: vec!["macro".to_string(), "icon".to_string()],
            restricted: false,
            icon: IconSettings::default(),
            macros: MacroSettings::default(),
        }
    }
}

/// Icon substitution configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IconSettings {
    /// Extra text to icon name mappings, merged over the built-in ones
    pub mappings: BTreeMap<String, String>,
}

/// Macro expansion configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroSettings {
    /// Maximum number of macro expansions per run
    pub max_recursion: usize,
}

impl Default for MacroSettings {
    fn default() -> Self {
        Self { max_recursion: 100 }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_settings_debug() {
        let settings = Settings::default();
        let debug_str = format!("{:?}", settings);
        assert!(debug_str.contains("Settings"));
    }

    #[test]
    fn test_macro_section_name() {
        let toml = Settings::default().to_toml_string().unwrap();
        assert!(toml.contains("[transformations.macro]"));
    }

    #[test]
    fn test_image_parser_ignores_wiki_mode() {
        use crate::reference::ResourceReferenceParser;

        let wiki = ReferenceSettings::default();
        let plain = ReferenceSettings {
            wiki_mode: false,
            ..ReferenceSettings::default()
        };
        for raw in ["logo.png", "http://example.com/a.png", "icon:home"] {
            assert_eq!(wiki.image_parser().parse(raw), plain.image_parser().parse(raw));
        }
        assert_ne!(
            wiki.link_parser().parse("Main.Page"),
            plain.link_parser().parse("Main.Page")
        );
    }
}
