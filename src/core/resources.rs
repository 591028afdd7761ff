//! Core domain: shared resources for the collection run.

use bevy::prelude::*;

/// Score shown on the HUD and redeemable through score claim buttons.
#[derive(Resource, Debug, Default)]
pub struct PlayerScore {
    pub points: u32,
}

impl PlayerScore {
    pub fn add(&mut self, amount: u32) {
        self.points = self.points.saturating_add(amount);
    }

    /// Claimable amount, `None` when there is nothing to redeem.
    pub fn claimable(&self) -> Option<u32> {
        (self.points > 0).then_some(self.points)
    }

    pub fn reset(&mut self) {
        self.points = 0;
    }
}
