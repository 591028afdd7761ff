//! Core domain: core flow systems and setup.

use bevy::prelude::*;

use crate::core::state::GameState;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Startup is complete once every startup set has run.
pub(crate) fn enter_play(mut game_state: ResMut<NextState<GameState>>) {
    info!("Collection ready, entering play");
    game_state.set(GameState::Play);
}
