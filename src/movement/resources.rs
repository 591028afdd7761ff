//! Movement domain: tuning and input resources.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct MovementTuning {
    pub max_speed: f32,
    pub accel: f32,
    pub decel: f32,
    /// Half extents of the walled arena the player moves in.
    pub arena_half_size: Vec2,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_speed: 260.0,
            accel: 2200.0,
            decel: 2600.0,
            arena_half_size: Vec2::new(560.0, 300.0),
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
}
