//! UI domain: HUD, loading overlay and the collection card grid.

mod collection_grid;
mod hud_loading;
mod hud_score;

pub use hud_loading::LoadingOverlayUI;
pub use hud_score::{ScoreAmountText, ScoreDisplayUI};

use bevy::prelude::*;

use crate::core::{CollectionStartup, CollectionUpdate};
use crate::ui::collection_grid::spawn_collection_grid;
use crate::ui::hud_loading::{spawn_loading_overlay, update_loading_overlay};
use crate::ui::hud_score::{spawn_score_display_ui, update_score_display};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (spawn_collection_grid, spawn_score_display_ui, spawn_loading_overlay)
                .in_set(CollectionStartup::Controls),
        )
        .add_systems(
            Update,
            (update_score_display, update_loading_overlay).in_set(CollectionUpdate::Presentation),
        );
    }
}
