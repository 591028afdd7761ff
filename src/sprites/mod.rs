//! Sprites module: catalog lookup for item imagery.

mod registry;

pub use registry::{AssetFolderLoader, SpriteLoader, SpriteRegistry};

use bevy::prelude::*;

use crate::content::CollectionCatalog;
use crate::core::CollectionStartup;

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            build_sprite_registry.in_set(CollectionStartup::Registry),
        );
    }
}

/// Preload catalog images and insert the sprite registry.
fn build_sprite_registry(
    mut commands: Commands,
    catalog: Res<CollectionCatalog>,
    asset_server: Res<AssetServer>,
) {
    let entries = catalog
        .templates
        .iter()
        .zip(&catalog.sprite_paths)
        .map(|(template, path)| {
            let handle: Option<Handle<Image>> =
                path.as_ref().map(|p| asset_server.load(p.clone()));
            (template.sprite_id.clone(), handle)
        });

    let registry = SpriteRegistry::build(entries, catalog.settings.sprite_folder.clone())
        .with_fallback(AssetFolderLoader::new(asset_server.clone(), "assets"));

    info!("Sprite registry built with {} catalog entries", registry.len());
    commands.insert_resource(registry);
}
