//! Inventory domain: durable record of granted items and their display cards.

mod cards;
mod prefs;
mod store;
#[cfg(test)]
mod tests;

pub use cards::{CardDisplay, CardError, CardGrid, CollectionCard, CollectionGrid};
pub use prefs::{KeyValueStore, MemoryPrefs, PrefsError, PrefsFile};
pub use store::{InventoryError, InventoryRecord, InventoryStore};

use bevy::prelude::*;

use crate::content::CollectionCatalog;
use crate::core::CollectionStartup;

pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            open_inventory_store.in_set(CollectionStartup::Registry),
        );
    }
}

/// Open the prefs file and insert the inventory store.
///
/// A prefs file that cannot be read is left untouched on disk; the run
/// continues against an in-memory store instead.
fn open_inventory_store(mut commands: Commands, catalog: Res<CollectionCatalog>) {
    let storage = &catalog.settings.storage;

    let store = match PrefsFile::open(&storage.path) {
        Ok(prefs) => {
            info!(
                "[INVENTORY] Using prefs file {}",
                prefs.path().display()
            );
            InventoryStore::new(prefs, storage)
        }
        Err(e) => {
            error!("[INVENTORY] {}; collection will not persist this run", e);
            InventoryStore::new(MemoryPrefs::new(), storage)
        }
    };

    commands.insert_resource(store);
}
