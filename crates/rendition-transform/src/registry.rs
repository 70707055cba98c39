//! Transformations by name, built from settings

use std::collections::BTreeMap;

use rendition_core::config::{ConfigError, TransformationSettings};

use crate::icon::IconTransformation;
use crate::macros::{MacroRegistry, MacroTransformation};
use crate::transformation::{DefaultTransformationManager, Transformation};

type TransformationFactory = Box<dyn Fn(&TransformationSettings) -> Box<dyn Transformation>>;

/// Factories for the transformations a manager can be assembled from
#[derive(Default)]
pub struct TransformationRegistry {
    factories: BTreeMap<String, TransformationFactory>,
}

impl TransformationRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry offering `macro` (expanding `macros`) and `icon`
    pub fn with_defaults(macros: MacroRegistry) -> Self {
        let mut registry = Self::empty();
        registry.register("macro", move |settings| {
            Box::new(
                MacroTransformation::new(macros.clone())
                    .with_max_recursion(settings.macros.max_recursion),
            )
        });
        registry.register("icon", |settings| {
            Box::new(IconTransformation::with_mappings(&settings.icon.mappings))
        });
        registry
    }

    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&TransformationSettings) -> Box<dyn Transformation> + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Manager running every transformation enabled in `settings`
    pub fn build_manager(
        &self,
        settings: &TransformationSettings,
    ) -> Result<DefaultTransformationManager, ConfigError> {
        let mut manager = DefaultTransformationManager::new();
        for name in &settings.enabled {
            let factory = self
                .factories
                .get(name)
                .ok_or_else(|| ConfigError::UnknownTransformation(name.clone()))?;
            manager.add_transformation(factory(settings));
        }
        Ok(manager)
    }
}
