//! CollectionCatalog resource providing indexed lookups for loaded content.

use bevy::prelude::*;

use super::data::{CollectionDef, CollectionSettings, ZoneDef};

/// One grantable item. The index correlates a zone, a control and the item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTemplate {
    pub index: usize,
    pub sprite_id: String,
}

/// Immutable configuration for the whole collection loop.
#[derive(Resource, Debug, Default, Clone)]
pub struct CollectionCatalog {
    pub templates: Vec<ItemTemplate>,
    /// Catalog image paths, parallel to `templates`.
    pub sprite_paths: Vec<Option<String>>,
    pub zones: Vec<ZoneDef>,
    pub settings: CollectionSettings,
}

impl CollectionCatalog {
    pub fn from_def(def: CollectionDef) -> Self {
        let templates = def
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| ItemTemplate {
                index,
                sprite_id: item.sprite_id.clone(),
            })
            .collect();
        let sprite_paths = def.items.into_iter().map(|item| item.path).collect();

        Self {
            templates,
            sprite_paths,
            zones: def.zones,
            settings: def.settings,
        }
    }

    pub fn template(&self, index: usize) -> Option<&ItemTemplate> {
        self.templates.get(index)
    }

    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        format!(
            "CollectionCatalog loaded:\n\
             - Items: {}\n\
             - Zones: {}\n\
             - Claim provider: {}\n\
             - Exclusive activation: {}",
            self.templates.len(),
            self.zones.len(),
            if self.settings.claim.is_some() {
                "simulated"
            } else {
                "none (local grant)"
            },
            self.settings.exclusive_activation,
        )
    }
}
