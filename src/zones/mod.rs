//! Zones domain: trigger volumes that reveal action controls.

mod manager;
mod systems;
#[cfg(test)]
mod tests;

pub use manager::{TriggerVolumes, ZoneBinding, ZoneEvent, ZoneManager};
pub use systems::{DEFAULT_ZONE_SIZE, TriggerZone};

use bevy::prelude::*;

use crate::core::{CollectionStartup, CollectionUpdate};
use crate::zones::systems::{bind_zones, detect_zone_overlaps, spawn_zones};

pub struct ZonesPlugin;

impl Plugin for ZonesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ZoneEvent>()
            .add_systems(
                Startup,
                (spawn_zones, bind_zones)
                    .chain()
                    .in_set(CollectionStartup::Zones),
            )
            .add_systems(Update, detect_zone_overlaps.in_set(CollectionUpdate::Zones));
    }
}
