//! Acquisition domain: the claim-or-grant state machine.
//!
//! Each template index moves `Idle -> AwaitingClaim -> Granting -> Idle`, or
//! straight to `Granting` when no claim provider is configured. Claim answers
//! arrive on a channel and are only acted on inside [`AcquisitionController::poll_claims`],
//! so every mutation happens on the caller's thread.

use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use std::time::Duration;
use thiserror::Error;

use crate::acquisition::claim::{ClaimFlow, ClaimOutcome, ClaimProvider, ClaimReply};
use crate::content::{CollectionSettings, ItemTemplate};
use crate::controls::{ScaleAnimation, VisibilityAnimator, VisualState};
use crate::inventory::{CardDisplay, CardError, InventoryError, InventoryStore};
use crate::sprites::SpriteRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcquisitionPhase {
    #[default]
    Idle,
    AwaitingClaim,
    Granting,
}

#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("Control index {0} is out of range")]
    InvalidIndex(usize),
    #[error("Control {index} already has an acquisition in flight ({phase:?})")]
    InFlight {
        index: usize,
        phase: AcquisitionPhase,
    },
    #[error("No claim provider is configured")]
    NoProvider,
    #[error("Nothing to claim")]
    NothingToClaim,
    #[error("A score claim is already in flight")]
    ScoreClaimInFlight,
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error("Saved '{sprite_id}' at slot {slot} but no sprite resolves for it")]
    UnresolvedSprite { slot: usize, sprite_id: String },
    #[error("Saved slot {slot} but the card could not be built: {source}")]
    Card {
        slot: usize,
        #[source]
        source: CardError,
    },
}

/// Result of a successful `activate` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Committed immediately at this slot.
    Granted { slot: usize },
    /// Waiting for the claim provider to answer.
    AwaitingClaim,
}

/// What happened to one claim answer drained by `poll_claims`.
#[derive(Debug)]
pub enum ClaimResolution {
    Granted { index: usize, slot: usize },
    CommitFailed { index: usize, error: AcquisitionError },
    Rejected { index: usize },
    ScoreClaimed { success: bool },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReloadSummary {
    pub loaded: usize,
    pub skipped: usize,
}

/// Everything the controller drives during one call.
pub struct Collaborators<'a, A>
where
    A: Clone + Send + Sync + 'static,
{
    pub inventory: &'a mut InventoryStore,
    pub animator: &'a mut VisibilityAnimator,
    pub motion: &'a mut dyn ScaleAnimation,
    pub cards: &'a mut dyn CardDisplay<A>,
    pub sprites: &'a SpriteRegistry<A>,
}

#[derive(Resource)]
pub struct AcquisitionController {
    templates: Vec<ItemTemplate>,
    phases: Vec<AcquisitionPhase>,
    claim_amount: u32,
    linked_controls: Vec<usize>,
    claim: Option<Box<dyn ClaimProvider>>,
    score_in_flight: bool,
    in_flight: usize,
    loading_visible: bool,
    sender: Sender<ClaimOutcome>,
    receiver: Receiver<ClaimOutcome>,
}

impl AcquisitionController {
    pub fn new(
        templates: Vec<ItemTemplate>,
        settings: &CollectionSettings,
        claim: Option<Box<dyn ClaimProvider>>,
    ) -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self {
            phases: vec![AcquisitionPhase::Idle; templates.len()],
            templates,
            claim_amount: settings.claim_amount,
            linked_controls: settings.linked_controls.clone(),
            claim,
            score_in_flight: false,
            in_flight: 0,
            loading_visible: false,
            sender,
            receiver,
        }
    }

    pub fn phase(&self, index: usize) -> Option<AcquisitionPhase> {
        self.phases.get(index).copied()
    }

    pub fn loading_visible(&self) -> bool {
        self.loading_visible
    }

    pub fn claims_in_flight(&self) -> usize {
        self.in_flight
    }

    fn set_loading(&mut self, visible: bool) {
        if self.loading_visible == visible {
            return;
        }
        self.loading_visible = visible;
        if let Some(claim) = self.claim.as_mut() {
            claim.set_loading_visible(visible);
        }
    }

    /// Start acquiring the item at `index`.
    ///
    /// Without a claim provider the item is committed and its control hidden
    /// right away. With one, a claim is requested and the result is applied
    /// by a later `poll_claims`.
    pub fn activate<A>(
        &mut self,
        index: usize,
        collab: &mut Collaborators<'_, A>,
    ) -> Result<Activation, AcquisitionError>
    where
        A: Clone + Send + Sync + 'static,
    {
        let phase = self
            .phases
            .get(index)
            .copied()
            .ok_or(AcquisitionError::InvalidIndex(index))?;
        if phase != AcquisitionPhase::Idle {
            return Err(AcquisitionError::InFlight { index, phase });
        }

        if self.claim.is_none() {
            let slot = self.commit(index, collab)?;
            collab.animator.hide(index, collab.motion);
            return Ok(Activation::Granted { slot });
        }

        self.set_loading(true);
        self.phases[index] = AcquisitionPhase::AwaitingClaim;
        self.in_flight += 1;

        let reply = ClaimReply::new(ClaimFlow::Control(index), self.sender.clone());
        let amount = self.claim_amount;
        if let Some(claim) = self.claim.as_mut() {
            claim.claim_reward(amount, reply);
        }
        Ok(Activation::AwaitingClaim)
    }

    /// Redeem `amount` of score through the claim provider.
    pub fn claim_score(&mut self, amount: Option<u32>) -> Result<(), AcquisitionError> {
        if self.claim.is_none() {
            return Err(AcquisitionError::NoProvider);
        }
        let amount = amount.ok_or(AcquisitionError::NothingToClaim)?;
        if self.score_in_flight {
            return Err(AcquisitionError::ScoreClaimInFlight);
        }

        self.set_loading(true);
        self.score_in_flight = true;
        self.in_flight += 1;

        let reply = ClaimReply::new(ClaimFlow::Score, self.sender.clone());
        if let Some(claim) = self.claim.as_mut() {
            claim.claim_reward(amount, reply);
        }
        Ok(())
    }

    /// Tick the provider and apply every claim answer received so far.
    pub fn poll_claims<A>(
        &mut self,
        delta: Duration,
        collab: &mut Collaborators<'_, A>,
    ) -> Vec<ClaimResolution>
    where
        A: Clone + Send + Sync + 'static,
    {
        if let Some(claim) = self.claim.as_mut() {
            claim.poll(delta);
        }

        let outcomes: Vec<ClaimOutcome> = self.receiver.try_iter().collect();
        let mut resolutions = Vec::with_capacity(outcomes.len());

        for outcome in outcomes {
            match outcome.flow {
                ClaimFlow::Control(index) => {
                    if self.phase(index) != Some(AcquisitionPhase::AwaitingClaim) {
                        warn!("[CLAIM] Ignoring unexpected claim answer for control {}", index);
                        continue;
                    }
                    self.in_flight = self.in_flight.saturating_sub(1);
                    self.set_loading(self.in_flight > 0);
                    resolutions.push(self.resolve_control_claim(index, outcome.success, collab));
                }
                ClaimFlow::Score => {
                    if !self.score_in_flight {
                        warn!("[CLAIM] Ignoring unexpected score claim answer");
                        continue;
                    }
                    self.score_in_flight = false;
                    self.in_flight = self.in_flight.saturating_sub(1);
                    self.set_loading(self.in_flight > 0);
                    resolutions.push(ClaimResolution::ScoreClaimed {
                        success: outcome.success,
                    });
                }
            }
        }

        resolutions
    }

    fn resolve_control_claim<A>(
        &mut self,
        index: usize,
        success: bool,
        collab: &mut Collaborators<'_, A>,
    ) -> ClaimResolution
    where
        A: Clone + Send + Sync + 'static,
    {
        if !success {
            self.phases[index] = AcquisitionPhase::Idle;
            return ClaimResolution::Rejected { index };
        }

        match self.commit(index, collab) {
            Ok(slot) => {
                collab.animator.hide(index, collab.motion);
                for &linked in &self.linked_controls {
                    if linked != index
                        && collab.animator.state(linked) != Some(VisualState::Hidden)
                    {
                        collab.animator.hide(linked, collab.motion);
                    }
                }
                ClaimResolution::Granted { index, slot }
            }
            Err(error) => ClaimResolution::CommitFailed { index, error },
        }
    }

    /// Record the item and show its card. A card failure leaves the saved
    /// record in place; it is shown on the next reload.
    fn commit<A>(
        &mut self,
        index: usize,
        collab: &mut Collaborators<'_, A>,
    ) -> Result<usize, AcquisitionError>
    where
        A: Clone + Send + Sync + 'static,
    {
        self.phases[index] = AcquisitionPhase::Granting;
        let result = Self::grant(&self.templates[index].sprite_id, collab);
        self.phases[index] = AcquisitionPhase::Idle;
        result
    }

    fn grant<A>(sprite_id: &str, collab: &mut Collaborators<'_, A>) -> Result<usize, AcquisitionError>
    where
        A: Clone + Send + Sync + 'static,
    {
        let slot = collab.inventory.append(sprite_id)?;

        let asset = collab
            .sprites
            .resolve(sprite_id)
            .ok_or_else(|| AcquisitionError::UnresolvedSprite {
                slot,
                sprite_id: sprite_id.to_string(),
            })?;
        collab
            .cards
            .spawn_card(asset)
            .map_err(|source| AcquisitionError::Card { slot, source })?;

        Ok(slot)
    }

    /// Rebuild every card from the saved inventory.
    pub fn reload_all<A>(&self, collab: &mut Collaborators<'_, A>) -> ReloadSummary
    where
        A: Clone + Send + Sync + 'static,
    {
        collab.cards.clear_cards();

        let mut summary = ReloadSummary::default();
        for record in collab.inventory.load_all() {
            let Some(asset) = collab.sprites.resolve(&record.sprite_id) else {
                warn!(
                    "[INVENTORY] Slot {}: sprite '{}' not found, skipping",
                    record.slot, record.sprite_id
                );
                summary.skipped += 1;
                continue;
            };

            match collab.cards.spawn_card(asset) {
                Ok(()) => summary.loaded += 1,
                Err(e) => {
                    error!("[INVENTORY] Slot {}: {}", record.slot, e);
                    summary.skipped += 1;
                }
            }
        }

        info!(
            "[INVENTORY] Reload complete: {} card(s), {} skipped",
            summary.loaded, summary.skipped
        );
        summary
    }

    /// Delete the saved collection and its cards.
    pub fn clear_collection<A>(&self, collab: &mut Collaborators<'_, A>) -> Result<(), AcquisitionError>
    where
        A: Clone + Send + Sync + 'static,
    {
        collab.inventory.clear()?;
        collab.cards.clear_cards();
        Ok(())
    }
}
