//! Acquisition domain: systems wiring zones, controls and claims together.

use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::acquisition::claim::{ClaimFailureSwitch, ClaimProvider, SimulatedClaimProvider};
use crate::acquisition::controller::{
    AcquisitionController, AcquisitionError, Activation, ClaimResolution, Collaborators,
};
use crate::content::CollectionCatalog;
use crate::controls::{ActionControl, ControlEntities, TweenQueue, VisibilityAnimator};
use crate::core::PlayerScore;
use crate::inventory::{CardGrid, CollectionCard, CollectionGrid, InventoryStore};
use crate::sprites::SpriteRegistry;
use crate::zones::ZoneEvent;

/// Sent when a score claim gets its answer.
#[derive(Debug, Clone, Copy)]
pub struct ScoreClaimSettled {
    pub success: bool,
}

impl Message for ScoreClaimSettled {}

/// Resources and queries the controller needs for one call.
#[derive(SystemParam)]
pub(crate) struct AcquisitionContext<'w, 's> {
    commands: Commands<'w, 's>,
    pub controller: ResMut<'w, AcquisitionController>,
    inventory: ResMut<'w, InventoryStore>,
    pub animator: ResMut<'w, VisibilityAnimator>,
    entities: Res<'w, ControlEntities>,
    sprites: Res<'w, SpriteRegistry>,
    catalog: Res<'w, CollectionCatalog>,
    grid: Query<'w, 's, Entity, With<CollectionGrid>>,
    cards: Query<'w, 's, Entity, With<CollectionCard>>,
}

impl AcquisitionContext<'_, '_> {
    /// Run `f` against the controller with Bevy-backed collaborators, then
    /// apply the queued control animations.
    pub(crate) fn run<R>(
        &mut self,
        f: impl FnOnce(&mut AcquisitionController, &mut Collaborators<'_, Handle<Image>>) -> R,
    ) -> R {
        let mut motion = TweenQueue::default();
        let container = self.grid.iter().next();

        let result = {
            let mut cards = CardGrid::new(
                &mut self.commands,
                container,
                self.catalog.settings.card.as_ref(),
                self.cards.iter(),
            );
            let mut collab = Collaborators {
                inventory: &mut self.inventory,
                animator: &mut self.animator,
                motion: &mut motion,
                cards: &mut cards,
                sprites: &self.sprites,
            };
            f(&mut self.controller, &mut collab)
        };

        motion.apply(&mut self.commands, &self.entities);
        result
    }
}

pub(crate) fn setup_acquisition(mut commands: Commands, catalog: Res<CollectionCatalog>) {
    let settings = &catalog.settings;

    let claim: Option<Box<dyn ClaimProvider>> = settings.claim.as_ref().map(|def| {
        let switch = ClaimFailureSwitch::default();
        commands.insert_resource(switch.clone());
        info!(
            "[CLAIM] Simulated claim provider: {:.2}s delay, {:.0}% success",
            def.delay_secs,
            def.success_chance * 100.0
        );
        Box::new(SimulatedClaimProvider::new(def, switch)) as Box<dyn ClaimProvider>
    });
    if claim.is_none() {
        info!("[CLAIM] No claim provider configured, items are granted directly");
    }

    commands.insert_resource(AcquisitionController::new(
        catalog.templates.clone(),
        settings,
        claim,
    ));
}

pub(crate) fn reload_saved_cards(mut ctx: AcquisitionContext) {
    ctx.run(|controller, collab| controller.reload_all(collab));
}

pub(crate) fn reveal_controls_on_zone_events(
    mut commands: Commands,
    mut zone_events: MessageReader<ZoneEvent>,
    mut animator: ResMut<VisibilityAnimator>,
    entities: Res<ControlEntities>,
    catalog: Res<CollectionCatalog>,
) {
    let exclusive = catalog.settings.exclusive_activation;
    let mut motion = TweenQueue::default();

    for event in zone_events.read() {
        match *event {
            ZoneEvent::Entered(index) => animator.show(index, exclusive, &mut motion),
            ZoneEvent::Exited(index) => animator.hide(index, &mut motion),
        }
    }

    if !motion.is_empty() {
        motion.apply(&mut commands, &entities);
    }
}

pub(crate) fn activate_pressed_controls(
    interactions: Query<(&Interaction, &ActionControl), Changed<Interaction>>,
    mut score: ResMut<PlayerScore>,
    mut ctx: AcquisitionContext,
) {
    for (interaction, control) in &interactions {
        if *interaction != Interaction::Pressed || !ctx.animator.is_interactive(control.index) {
            continue;
        }

        match ctx.run(|controller, collab| controller.activate(control.index, collab)) {
            Ok(Activation::Granted { slot }) => {
                score.add(1);
                info!("[CLAIM] Control {} granted at slot {}", control.index, slot);
            }
            Ok(Activation::AwaitingClaim) => {
                info!("[CLAIM] Control {} waiting for claim", control.index);
            }
            Err(e @ AcquisitionError::InvalidIndex(_) | e @ AcquisitionError::InFlight { .. }) => {
                warn!("[CLAIM] {}", e);
            }
            Err(e) => error!("[CLAIM] Control {}: {}", control.index, e),
        }
    }
}

pub(crate) fn resume_claims(
    time: Res<Time>,
    mut score: ResMut<PlayerScore>,
    mut settled: MessageWriter<ScoreClaimSettled>,
    mut ctx: AcquisitionContext,
) {
    let delta = time.delta();
    let resolutions = ctx.run(|controller, collab| controller.poll_claims(delta, collab));

    for resolution in resolutions {
        match resolution {
            ClaimResolution::Granted { index, slot } => {
                score.add(1);
                info!("[CLAIM] Claim for control {} succeeded, saved at slot {}", index, slot);
            }
            ClaimResolution::CommitFailed { index, error } => {
                error!("[CLAIM] Claim for control {} succeeded but commit failed: {}", index, error);
            }
            ClaimResolution::Rejected { index } => {
                warn!("[CLAIM] Claim for control {} failed, control re-enabled", index);
            }
            ClaimResolution::ScoreClaimed { success } => {
                info!("[CLAIM] Score claim {}", if success { "succeeded" } else { "failed" });
                settled.write(ScoreClaimSettled { success });
            }
        }
    }
}
