//! Core domain: game states, schedule sets and shared resources.

mod resources;
mod schedule;
mod state;
mod systems;

pub use resources::PlayerScore;
pub use schedule::{CollectionStartup, CollectionUpdate};
pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{enter_play, setup_camera};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<PlayerScore>()
            .configure_sets(
                Startup,
                (
                    CollectionStartup::Registry,
                    CollectionStartup::Controls,
                    CollectionStartup::Zones,
                    CollectionStartup::Reload,
                )
                    .chain(),
            )
            .configure_sets(
                Update,
                (
                    CollectionUpdate::Input,
                    CollectionUpdate::Zones,
                    CollectionUpdate::Acquisition,
                    CollectionUpdate::Animation,
                    CollectionUpdate::Presentation,
                )
                    .chain(),
            )
            .add_systems(Startup, setup_camera)
            .add_systems(Startup, enter_play.after(CollectionStartup::Reload));
    }
}
