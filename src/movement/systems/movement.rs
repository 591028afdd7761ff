//! Movement domain: top-down velocity steering.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{MovementInput, MovementTuning, Player};

/// Move a single velocity component toward `target` by at most `step`.
fn approach(current: f32, target: f32, step: f32) -> f32 {
    if current < target {
        (current + step).min(target)
    } else {
        (current - step).max(target)
    }
}

pub(crate) fn apply_movement(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<&mut LinearVelocity, With<Player>>,
) {
    let dt = time.delta_secs();
    let target = input.axis * tuning.max_speed;

    let step = |wanted: f32| {
        let rate = if wanted.abs() > 0.1 {
            tuning.accel
        } else {
            tuning.decel
        };
        rate * dt
    };

    for mut velocity in &mut query {
        // Accelerate toward input, decelerate to zero on release
        velocity.x = approach(velocity.x, target.x, step(target.x));
        velocity.y = approach(velocity.y, target.y, step(target.y));
    }
}
