//! Debug tooling for iterating on the collection loop.
//!
//! Hotkeys:
//! - F10: clear the saved collection and its cards
//! - F9: rebuild cards from storage
//! - F8: toggle forced failure on the simulated claim provider

mod state;
mod systems;
mod ui;

pub use state::DebugState;
pub use ui::DebugStatusMessage;

use bevy::prelude::*;

use crate::core::{CollectionUpdate, GameState};
use crate::debug::systems::{handle_debug_hotkeys, tick_status_message};
use crate::debug::ui::{spawn_debug_status, update_debug_status};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Startup, spawn_debug_status)
            .add_systems(
                Update,
                handle_debug_hotkeys
                    .in_set(CollectionUpdate::Acquisition)
                    .run_if(in_state(GameState::Play)),
            )
            .add_systems(
                Update,
                (tick_status_message, update_debug_status)
                    .chain()
                    .in_set(CollectionUpdate::Presentation),
            );
    }
}
