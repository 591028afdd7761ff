//! Acquisition domain: external claim provider contract and the simulated backend.

use bevy::prelude::*;
use crossbeam_channel::Sender;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::content::SimulatedClaimDef;

/// Which flow a claim request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimFlow {
    /// Item acquisition started from the action control at this index.
    Control(usize),
    /// Redeeming the player's score.
    Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimOutcome {
    pub flow: ClaimFlow,
    pub success: bool,
}

/// Single-use callback handed to the provider with each claim request.
///
/// Consumed by [`ClaimReply::resolve`], so a request is answered at most once.
#[derive(Debug)]
pub struct ClaimReply {
    flow: ClaimFlow,
    sender: Sender<ClaimOutcome>,
}

impl ClaimReply {
    pub(crate) fn new(flow: ClaimFlow, sender: Sender<ClaimOutcome>) -> Self {
        Self { flow, sender }
    }

    pub fn flow(&self) -> ClaimFlow {
        self.flow
    }

    pub fn resolve(self, success: bool) {
        let outcome = ClaimOutcome {
            flow: self.flow,
            success,
        };
        if self.sender.send(outcome).is_err() {
            warn!("[CLAIM] Claim for {:?} resolved after controller shut down", self.flow);
        }
    }
}

/// Reward backend that confirms a claim before an item is granted.
pub trait ClaimProvider: Send + Sync {
    /// Request a claim of `amount`. The provider answers through `reply`
    /// exactly once, immediately or on a later `poll`.
    fn claim_reward(&mut self, amount: u32, reply: ClaimReply);

    fn set_loading_visible(&mut self, visible: bool);

    /// Advance transports that need ticking. Called once per frame.
    fn poll(&mut self, _delta: Duration) {}
}

/// Shared switch forcing every simulated claim to fail.
#[derive(Resource, Debug, Clone, Default)]
pub struct ClaimFailureSwitch(Arc<AtomicBool>);

impl ClaimFailureSwitch {
    pub fn is_forced(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set_forced(&self, forced: bool) {
        self.0.store(forced, Ordering::Relaxed);
    }

    /// Flip the switch and return the new value.
    pub fn toggle(&self) -> bool {
        !self.0.fetch_xor(true, Ordering::Relaxed)
    }
}

/// Claim provider that answers after a fixed delay with a seeded success roll.
pub struct SimulatedClaimProvider {
    delay: Duration,
    success_chance: f64,
    rng: ChaCha8Rng,
    pending: Vec<(Timer, ClaimReply)>,
    failure: ClaimFailureSwitch,
    loading_visible: bool,
}

impl SimulatedClaimProvider {
    pub fn new(def: &SimulatedClaimDef, failure: ClaimFailureSwitch) -> Self {
        Self {
            delay: Duration::try_from_secs_f32(def.delay_secs.max(0.0)).unwrap_or_default(),
            success_chance: if def.success_chance.is_nan() {
                SimulatedClaimDef::default().success_chance
            } else {
                def.success_chance.clamp(0.0, 1.0)
            },
            rng: ChaCha8Rng::seed_from_u64(def.seed),
            pending: Vec::new(),
            failure,
            loading_visible: false,
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn loading_visible(&self) -> bool {
        self.loading_visible
    }
}

impl ClaimProvider for SimulatedClaimProvider {
    fn claim_reward(&mut self, amount: u32, reply: ClaimReply) {
        info!(
            "[CLAIM] Requesting claim of {} for {:?} ({:.2}s)",
            amount,
            reply.flow(),
            self.delay.as_secs_f32()
        );
        self.pending
            .push((Timer::new(self.delay, TimerMode::Once), reply));
    }

    fn set_loading_visible(&mut self, visible: bool) {
        self.loading_visible = visible;
    }

    fn poll(&mut self, delta: Duration) {
        if self.pending.is_empty() {
            return;
        }

        let mut still_pending = Vec::with_capacity(self.pending.len());
        for (mut timer, reply) in self.pending.drain(..) {
            timer.tick(delta);
            if !timer.is_finished() {
                still_pending.push((timer, reply));
                continue;
            }

            let success = !self.failure.is_forced() && self.rng.random_bool(self.success_chance);
            debug!("[CLAIM] Simulated claim for {:?}: {}", reply.flow(), success);
            reply.resolve(success);
        }
        self.pending = still_pending;
    }
}
