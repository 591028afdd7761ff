//! Content domain: RON-driven collection configuration.
//!
//! The collection file defines the grantable items, the zones that reveal
//! their controls, and the tuning knobs for claims, tweens and storage.

mod data;
mod loader;
mod registry;
#[cfg(test)]
mod tests;
mod validation;

pub use data::{
    BoundaryTag, CardDef, CollectionDef, CollectionSettings, Ease, ItemTemplateDef,
    SimulatedClaimDef, StorageSettings, TweenSettings, ZoneDef,
};
pub use loader::{ContentLoadError, load_collection, parse_collection};
pub use registry::{CollectionCatalog, ItemTemplate};
pub use validation::{ValidationError, reset_non_finite_settings, validate_collection};

use bevy::prelude::*;
use std::path::Path;

pub const COLLECTION_PATH: &str = "assets/data/collection.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_collection_content);
    }
}

/// Load and validate the collection file, falling back to defaults on failure.
fn load_collection_content(mut commands: Commands) {
    let mut def = match load_collection(Path::new(COLLECTION_PATH)) {
        Ok(def) => def,
        Err(e) => {
            error!("{}. Using an empty collection.", e);
            CollectionDef::default()
        }
    };

    for problem in validate_collection(&def) {
        match problem {
            ValidationError::CountMismatch { .. } | ValidationError::DuplicateSpriteId(_) => {
                warn!("[CONTENT] {}", problem)
            }
            _ => error!("[CONTENT] {}", problem),
        }
    }
    reset_non_finite_settings(&mut def.settings);

    let catalog = CollectionCatalog::from_def(def);
    info!("{}", catalog.summary());
    commands.insert_resource(catalog);
}
