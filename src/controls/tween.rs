//! Controls domain: UI scale tweens backing the visibility animator.

use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::math::curve::{Curve, EaseFunction};
use bevy::prelude::*;
use bevy::ui::FocusPolicy;
use std::time::Duration;

use crate::content::Ease;
use crate::controls::visibility::{ScaleAnimation, ScaleRequest, VisibilityAnimator};

/// Action control button bound to a template index
#[derive(Component, Debug, Clone, Copy)]
pub struct ActionControl {
    pub index: usize,
}

/// Action control entities, indexed like the item templates.
#[derive(Resource, Debug, Default, Clone)]
pub struct ControlEntities(pub Vec<Entity>);

impl ControlEntities {
    pub fn get(&self, index: usize) -> Option<Entity> {
        self.0.get(index).copied()
    }
}

/// In-flight scale animation on a control
#[derive(Component, Debug)]
pub struct ScaleTween {
    /// Captured on the first tick so a replacement tween starts where the
    /// previous one left off.
    pub from: Option<f32>,
    pub to: f32,
    pub timer: Timer,
    pub ease: Ease,
    pub generation: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct ScaleTweenFinished {
    pub control: usize,
    pub generation: u32,
}

impl Message for ScaleTweenFinished {}

pub fn sample_ease(ease: Ease, t: f32) -> f32 {
    let function = match ease {
        Ease::Linear => EaseFunction::Linear,
        Ease::InQuad => EaseFunction::QuadraticIn,
        Ease::OutQuad => EaseFunction::QuadraticOut,
        Ease::InOutQuad => EaseFunction::QuadraticInOut,
        Ease::InBack => EaseFunction::BackIn,
        Ease::OutBack => EaseFunction::BackOut,
    };
    function.sample_clamped(t)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TweenOp {
    Animate(ScaleRequest),
    Cancel(usize),
    Snap(usize, f32),
}

/// [`ScaleAnimation`] that buffers requests until they are applied to the
/// control entities.
#[derive(Debug, Default)]
pub struct TweenQueue {
    ops: Vec<TweenOp>,
}

impl TweenQueue {
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn apply(self, commands: &mut Commands, entities: &ControlEntities) {
        for op in self.ops {
            let control = match op {
                TweenOp::Animate(request) => request.control,
                TweenOp::Cancel(control) | TweenOp::Snap(control, _) => control,
            };
            let Some(entity) = entities.get(control) else {
                continue;
            };
            let mut entity = commands.entity(entity);

            match op {
                // Inserting replaces any tween already on the entity.
                TweenOp::Animate(request) => {
                    entity.insert(ScaleTween {
                        from: None,
                        to: request.target,
                        timer: Timer::new(
                            Duration::try_from_secs_f32(request.duration.max(0.0))
                                .unwrap_or_default(),
                            TimerMode::Once,
                        ),
                        ease: request.ease,
                        generation: request.generation,
                    });
                }
                TweenOp::Cancel(_) => {
                    entity.remove::<ScaleTween>();
                }
                TweenOp::Snap(_, scale) => {
                    entity.insert(UiTransform {
                        scale: Vec2::splat(scale),
                        ..default()
                    });
                }
            }
        }
    }
}

impl ScaleAnimation for TweenQueue {
    fn animate_scale(&mut self, request: ScaleRequest) {
        self.ops.push(TweenOp::Animate(request));
    }

    fn cancel_animation(&mut self, control: usize) {
        self.ops.push(TweenOp::Cancel(control));
    }

    fn snap_scale(&mut self, control: usize, scale: f32) {
        self.ops.push(TweenOp::Snap(control, scale));
    }
}

pub(crate) fn tick_scale_tweens(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &ActionControl, &mut ScaleTween, &mut UiTransform)>,
    mut finished: MessageWriter<ScaleTweenFinished>,
) {
    for (entity, control, mut tween, mut transform) in &mut query {
        let from = *tween.from.get_or_insert(transform.scale.x);
        tween.timer.tick(time.delta());

        let eased = sample_ease(tween.ease, tween.timer.fraction());
        transform.scale = Vec2::splat(from + (tween.to - from) * eased);

        if tween.timer.is_finished() {
            transform.scale = Vec2::splat(tween.to);
            commands.entity(entity).remove::<ScaleTween>();
            finished.write(ScaleTweenFinished {
                control: control.index,
                generation: tween.generation,
            });
        }
    }
}

pub(crate) fn apply_tween_completions(
    mut finished: MessageReader<ScaleTweenFinished>,
    mut animator: ResMut<VisibilityAnimator>,
) {
    for event in finished.read() {
        if let Some(state) = animator.on_animation_complete(event.control, event.generation) {
            debug!("[CONTROLS] Control {} settled {:?}", event.control, state);
        }
    }
}

/// Mirror animator flags onto the button entities.
pub(crate) fn sync_control_presentation(
    animator: Res<VisibilityAnimator>,
    mut query: Query<(&ActionControl, &mut Node, &mut FocusPolicy)>,
) {
    if !animator.is_changed() {
        return;
    }

    for (control, mut node, mut focus) in &mut query {
        let Some(visual) = animator.control(control.index) else {
            continue;
        };

        let display = if visual.active {
            Display::Flex
        } else {
            Display::None
        };
        if node.display != display {
            node.display = display;
        }

        let policy = if visual.blocks_input {
            FocusPolicy::Block
        } else {
            FocusPolicy::Pass
        };
        if *focus != policy {
            *focus = policy;
        }
    }
}
