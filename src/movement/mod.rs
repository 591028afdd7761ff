//! Movement domain: top-down player that walks between trigger zones.

mod bootstrap;
mod components;
mod resources;
mod systems;

pub use components::{GameLayer, Player, Wall};
pub use resources::{MovementInput, MovementTuning};

use bevy::prelude::*;

use crate::core::CollectionUpdate;
use crate::movement::bootstrap::{spawn_arena, spawn_player};
use crate::movement::systems::{apply_movement, read_input};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_systems(Startup, (spawn_arena, spawn_player))
            .add_systems(
                Update,
                (read_input, apply_movement)
                    .chain()
                    .in_set(CollectionUpdate::Input),
            );
    }
}
