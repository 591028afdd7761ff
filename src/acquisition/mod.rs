//! Acquisition domain: turning control activations into saved items.

mod claim;
mod controller;
mod score;
mod systems;

pub use claim::{
    ClaimFailureSwitch, ClaimFlow, ClaimOutcome, ClaimProvider, ClaimReply,
    SimulatedClaimProvider,
};
pub use controller::{
    AcquisitionController, AcquisitionError, AcquisitionPhase, Activation, ClaimResolution,
    Collaborators, ReloadSummary,
};
pub use score::ScoreClaimButton;
pub use systems::ScoreClaimSettled;
pub(crate) use systems::AcquisitionContext;

use bevy::prelude::*;

use crate::acquisition::score::{
    handle_score_claim_buttons, hide_score_buttons_on_success, spawn_score_claim_button,
};
use crate::acquisition::systems::{
    activate_pressed_controls, reload_saved_cards, resume_claims,
    reveal_controls_on_zone_events, setup_acquisition,
};
use crate::core::{CollectionStartup, CollectionUpdate, GameState};

pub struct AcquisitionPlugin;

impl Plugin for AcquisitionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ScoreClaimSettled>()
            .add_systems(
                Startup,
                (setup_acquisition, spawn_score_claim_button).in_set(CollectionStartup::Registry),
            )
            .add_systems(
                Startup,
                reload_saved_cards.in_set(CollectionStartup::Reload),
            )
            .add_systems(
                Update,
                (
                    reveal_controls_on_zone_events,
                    activate_pressed_controls,
                    handle_score_claim_buttons,
                    resume_claims,
                    hide_score_buttons_on_success,
                )
                    .chain()
                    .in_set(CollectionUpdate::Acquisition)
                    .run_if(in_state(GameState::Play)),
            );
    }
}
