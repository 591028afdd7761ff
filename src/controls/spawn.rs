//! Controls domain: action control bar.

use bevy::prelude::*;

use crate::content::CollectionCatalog;
use crate::controls::tween::{ActionControl, ControlEntities, TweenQueue};
use crate::controls::visibility::VisibilityAnimator;

/// Marker for the bar holding the action controls
#[derive(Component)]
pub struct ActionControlBar;

const CONTROL_WIDTH: f32 = 160.0;
const CONTROL_HEIGHT: f32 = 48.0;

/// Spawn one button per item template, then snap every control hidden.
pub(crate) fn spawn_action_controls(mut commands: Commands, catalog: Res<CollectionCatalog>) {
    let mut entities = Vec::with_capacity(catalog.templates.len());

    commands
        .spawn((
            ActionControlBar,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                bottom: Val::Px(24.0),
                justify_content: JustifyContent::Center,
                column_gap: Val::Px(16.0),
                ..default()
            },
        ))
        .with_children(|bar| {
            for template in &catalog.templates {
                let entity = bar
                    .spawn((
                        ActionControl {
                            index: template.index,
                        },
                        Button,
                        Node {
                            width: Val::Px(CONTROL_WIDTH),
                            height: Val::Px(CONTROL_HEIGHT),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        UiTransform {
                            scale: Vec2::ZERO,
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.25, 0.45, 0.3)),
                    ))
                    .with_children(|button| {
                        button.spawn((
                            Text::new(format!("Collect {}", template.sprite_id)),
                            TextFont {
                                font_size: 16.0,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                        ));
                    })
                    .id();
                entities.push(entity);
            }
        });

    let entities = ControlEntities(entities);
    let mut animator = VisibilityAnimator::new(entities.0.len(), catalog.settings.tween.clone());
    let mut motion = TweenQueue::default();
    animator.hide_all(&mut motion);
    motion.apply(&mut commands, &entities);

    info!("[CONTROLS] Spawned {} action control(s)", animator.len());
    commands.insert_resource(entities);
    commands.insert_resource(animator);
}
