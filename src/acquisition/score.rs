//! Acquisition domain: score claim buttons.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::acquisition::controller::{AcquisitionController, AcquisitionError};
use crate::acquisition::systems::ScoreClaimSettled;
use crate::core::PlayerScore;

/// Button that redeems the current score through the claim provider
#[derive(Component, Debug)]
pub struct ScoreClaimButton;

pub(crate) fn spawn_score_claim_button(mut commands: Commands) {
    commands
        .spawn((
            ScoreClaimButton,
            Button,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(16.0),
                top: Val::Px(16.0),
                padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(Color::srgb(0.55, 0.45, 0.15)),
        ))
        .with_children(|button| {
            button.spawn((
                Text::new("Claim score"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

pub(crate) fn handle_score_claim_buttons(
    interactions: Query<&Interaction, (Changed<Interaction>, With<ScoreClaimButton>)>,
    score: Res<PlayerScore>,
    mut controller: ResMut<AcquisitionController>,
) {
    if !interactions.iter().any(|i| *i == Interaction::Pressed) {
        return;
    }

    match controller.claim_score(score.claimable()) {
        Ok(()) => info!("[CLAIM] Claiming score of {}", score.points),
        Err(AcquisitionError::NoProvider) => {
            info!("[CLAIM] No claim provider in use, score claim ignored")
        }
        Err(e) => warn!("[CLAIM] Score claim not sent: {}", e),
    }
}

/// Hide every score claim button once a score claim succeeds.
pub(crate) fn hide_score_buttons_on_success(
    mut settled: MessageReader<ScoreClaimSettled>,
    mut buttons: Query<&mut Node, With<ScoreClaimButton>>,
) {
    if !settled.read().any(|event| event.success) {
        return;
    }

    for mut node in &mut buttons {
        node.display = Display::None;
    }
}
