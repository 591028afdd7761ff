//! Core domain: system sets that order the collection loop.

use bevy::prelude::*;

/// Startup phases, run in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionStartup {
    /// Build the sprite registry and open the inventory store.
    Registry,
    /// Spawn action controls and snap them hidden.
    Controls,
    /// Spawn and bind trigger zones.
    Zones,
    /// Rebuild display cards from the saved inventory.
    Reload,
}

/// Per-frame phases, run in declaration order on the single control thread.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionUpdate {
    /// Player input and movement.
    Input,
    /// Zone overlap detection.
    Zones,
    /// Control activation and claim resumption.
    Acquisition,
    /// Tween playback and completion.
    Animation,
    /// HUD refresh.
    Presentation,
}
