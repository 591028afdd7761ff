//! Core domain: game state definitions for the collection flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Content, sprites, zones and saved cards are being prepared.
    #[default]
    Boot,
    /// The player roams the level and collects items.
    Play,
}
