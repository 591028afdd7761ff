//! Debug domain: hotkeys for inspecting and resetting the saved collection.

use bevy::prelude::*;

use crate::acquisition::{AcquisitionContext, ClaimFailureSwitch};
use crate::core::PlayerScore;
use crate::debug::state::DebugState;

const MESSAGE_SECONDS: f32 = 2.5;

/// F10 clears the saved collection, F9 reloads cards from storage,
/// F8 toggles forced claim failures.
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut score: ResMut<PlayerScore>,
    failure_switch: Option<Res<ClaimFailureSwitch>>,
    mut ctx: AcquisitionContext,
) {
    if keyboard.just_pressed(KeyCode::F10) {
        match ctx.run(|controller, collab| controller.clear_collection(collab)) {
            Ok(()) => {
                score.reset();
                debug_state.set_message("Saved collection cleared", MESSAGE_SECONDS);
                info!("[DEBUG] Saved collection cleared");
            }
            Err(e) => {
                debug_state.set_message("Clear failed", MESSAGE_SECONDS);
                error!("[DEBUG] Failed to clear saved collection: {}", e);
            }
        }
    }

    if keyboard.just_pressed(KeyCode::F9) {
        let summary = ctx.run(|controller, collab| controller.reload_all(collab));
        debug_state.set_message(
            format!("Reloaded {} card(s), {} skipped", summary.loaded, summary.skipped),
            MESSAGE_SECONDS,
        );
    }

    if keyboard.just_pressed(KeyCode::F8) {
        let msg = match failure_switch {
            Some(switch) if switch.toggle() => "Forced claim failure ON",
            Some(_) => "Forced claim failure OFF",
            None => "No simulated claim provider",
        };
        debug_state.set_message(msg, MESSAGE_SECONDS);
        info!("[DEBUG] {}", msg);
    }
}

pub(crate) fn tick_status_message(time: Res<Time>, mut debug_state: ResMut<DebugState>) {
    if debug_state.status_message.is_some() {
        debug_state.tick(time.delta_secs());
    }
}
