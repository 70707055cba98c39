//! Configuration
//!
//! Settings are loaded from `rendition.toml`:
//!
//! ```toml
//! [references]
//! wiki_mode = true
//! view_url = "https://wiki.example.com/view/{reference}"
//! image_url = "https://wiki.example.com/download/{reference}"
//!
//! [transformations]
//! enabled = ["macro", "icon"]
//! restricted = false
//!
//! [transformations.icon.mappings]
//! ":party:" = "emoticon_party"
//!
//! [transformations.macro]
//! max_recursion = 100
//! ```
//!
//! Every section and key is optional.

mod settings;


pub use settings::{
    ConfigError, IconSettings, MacroSettings, ReferenceSettings, Settings, TransformationSettings,
    CONFIG_FILE_NAME,
};
