//! Movement domain: player and arena spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::BoundaryTag;
use crate::movement::{GameLayer, MovementTuning, Player, Wall};

const PLAYER_SIZE: f32 = 28.0;
const WALL_THICKNESS: f32 = 24.0;

pub(crate) fn spawn_player(mut commands: Commands) {
    commands.spawn((
        Player,
        BoundaryTag::Player,
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(Vec2::splat(PLAYER_SIZE)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE, PLAYER_SIZE),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0),
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Player, [GameLayer::Wall, GameLayer::Sensor]),
        ),
    ));
}

pub(crate) fn spawn_arena(mut commands: Commands, tuning: Res<MovementTuning>) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);
    let half = tuning.arena_half_size;

    let horizontal = Vec2::new(half.x * 2.0 + WALL_THICKNESS, WALL_THICKNESS);
    let vertical = Vec2::new(WALL_THICKNESS, half.y * 2.0 + WALL_THICKNESS);
    let walls = [
        (Vec2::new(0.0, half.y), horizontal),
        (Vec2::new(0.0, -half.y), horizontal),
        (Vec2::new(-half.x, 0.0), vertical),
        (Vec2::new(half.x, 0.0), vertical),
    ];

    for (position, size) in walls {
        commands.spawn((
            Wall,
            Sprite {
                color: wall_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(position.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            wall_layers,
        ));
    }
}
