//! Controls domain: action controls revealed by zones and their animated visibility.

mod spawn;
#[cfg(test)]
mod tests;
mod tween;
mod visibility;

pub use spawn::ActionControlBar;
pub use tween::{
    ActionControl, ControlEntities, ScaleTween, ScaleTweenFinished, TweenQueue, sample_ease,
};
pub use visibility::{
    ControlVisual, ScaleAnimation, ScaleRequest, VisibilityAnimator, VisualState,
};

use bevy::prelude::*;

use crate::controls::spawn::spawn_action_controls;
use crate::controls::tween::{
    apply_tween_completions, sync_control_presentation, tick_scale_tweens,
};
use crate::core::{CollectionStartup, CollectionUpdate};

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ScaleTweenFinished>()
            .add_systems(
                Startup,
                spawn_action_controls.in_set(CollectionStartup::Controls),
            )
            .add_systems(
                Update,
                (tick_scale_tweens, apply_tween_completions)
                    .chain()
                    .in_set(CollectionUpdate::Animation),
            )
            .add_systems(
                Update,
                sync_control_presentation.in_set(CollectionUpdate::Presentation),
            );
    }
}
