//! Controls domain: per-control show/hide state machine.
//!
//! `Hidden -> Appearing -> Visible` on show and `Visible -> Disappearing -> Hidden`
//! on hide. Transitions are driven by an external scale animation; each request
//! carries a generation so completions from cancelled animations are ignored.

use bevy::prelude::*;

use crate::content::{Ease, TweenSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualState {
    #[default]
    Hidden,
    Appearing,
    Visible,
    Disappearing,
}

/// Presentation flags for one action control.
#[derive(Debug, Clone, Default)]
pub struct ControlVisual {
    pub state: VisualState,
    /// Accepts activation.
    pub interactive: bool,
    /// Blocks pointer input from reaching what is behind it.
    pub blocks_input: bool,
    /// Present in the layout. Cleared on hide when `deactivate_on_hide` is set.
    pub active: bool,
    pub generation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRequest {
    pub control: usize,
    pub target: f32,
    pub duration: f32,
    pub ease: Ease,
    pub generation: u32,
}

/// Scale animation backend. Completion is reported back through
/// [`VisibilityAnimator::on_animation_complete`] with the request's generation.
pub trait ScaleAnimation {
    /// Animate from the control's current scale toward `request.target`.
    fn animate_scale(&mut self, request: ScaleRequest);
    fn cancel_animation(&mut self, control: usize);
    fn snap_scale(&mut self, control: usize, scale: f32);
}

#[derive(Resource, Debug, Clone)]
pub struct VisibilityAnimator {
    controls: Vec<ControlVisual>,
    tween: TweenSettings,
}

impl VisibilityAnimator {
    pub fn new(count: usize, tween: TweenSettings) -> Self {
        Self {
            controls: vec![ControlVisual::default(); count],
            tween,
        }
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn control(&self, index: usize) -> Option<&ControlVisual> {
        self.controls.get(index)
    }

    pub fn state(&self, index: usize) -> Option<VisualState> {
        self.control(index).map(|c| c.state)
    }

    pub fn is_interactive(&self, index: usize) -> bool {
        self.control(index).is_some_and(|c| c.interactive)
    }

    pub fn visible_count(&self) -> usize {
        self.controls
            .iter()
            .filter(|c| c.state == VisualState::Visible)
            .count()
    }

    /// Reveal a control. With `exclusive`, every other control is snapped hidden first.
    pub fn show(&mut self, index: usize, exclusive: bool, motion: &mut dyn ScaleAnimation) {
        if index >= self.controls.len() {
            warn!("[CONTROLS] show: index {} out of range", index);
            return;
        }

        if exclusive {
            for other in 0..self.controls.len() {
                if other != index && self.controls[other].state != VisualState::Hidden {
                    self.hide_immediate(other, motion);
                }
            }
        }

        if !self.tween.use_tween {
            self.snap(index, true, motion);
            return;
        }

        if matches!(
            self.controls[index].state,
            VisualState::Visible | VisualState::Appearing
        ) {
            return;
        }

        let control = &mut self.controls[index];
        control.generation = control.generation.wrapping_add(1);
        control.state = VisualState::Appearing;
        control.active = true;
        control.interactive = false;
        control.blocks_input = false;

        motion.cancel_animation(index);
        motion.animate_scale(ScaleRequest {
            control: index,
            target: 1.0,
            duration: self.tween.show_duration,
            ease: self.tween.show_ease,
            generation: control.generation,
        });
    }

    /// Start hiding a control. Interactivity drops immediately.
    pub fn hide(&mut self, index: usize, motion: &mut dyn ScaleAnimation) {
        if index >= self.controls.len() {
            warn!("[CONTROLS] hide: index {} out of range", index);
            return;
        }

        if !self.tween.use_tween {
            self.snap(index, false, motion);
            return;
        }

        if matches!(
            self.controls[index].state,
            VisualState::Hidden | VisualState::Disappearing
        ) {
            return;
        }

        let control = &mut self.controls[index];
        control.generation = control.generation.wrapping_add(1);
        control.state = VisualState::Disappearing;
        control.interactive = false;
        control.blocks_input = false;

        motion.cancel_animation(index);
        motion.animate_scale(ScaleRequest {
            control: index,
            target: 0.0,
            duration: self.tween.hide_duration,
            ease: self.tween.hide_ease,
            generation: control.generation,
        });
    }

    /// Hide without animating.
    pub fn hide_immediate(&mut self, index: usize, motion: &mut dyn ScaleAnimation) {
        if index < self.controls.len() {
            self.snap(index, false, motion);
        }
    }

    pub fn hide_all(&mut self, motion: &mut dyn ScaleAnimation) {
        for index in 0..self.controls.len() {
            self.snap(index, false, motion);
        }
    }

    fn snap(&mut self, index: usize, visible: bool, motion: &mut dyn ScaleAnimation) {
        let deactivate_on_hide = self.tween.deactivate_on_hide;
        let control = &mut self.controls[index];
        control.generation = control.generation.wrapping_add(1);
        control.state = if visible {
            VisualState::Visible
        } else {
            VisualState::Hidden
        };
        control.interactive = visible;
        control.blocks_input = visible;
        control.active = visible || !deactivate_on_hide;

        motion.cancel_animation(index);
        motion.snap_scale(index, if visible { 1.0 } else { 0.0 });
    }

    /// Settle a finished animation. Returns the new state, or `None` when the
    /// completion belongs to a superseded request.
    pub fn on_animation_complete(&mut self, index: usize, generation: u32) -> Option<VisualState> {
        let deactivate_on_hide = self.tween.deactivate_on_hide;
        let control = self.controls.get_mut(index)?;
        if control.generation != generation {
            return None;
        }

        match control.state {
            VisualState::Appearing => {
                control.state = VisualState::Visible;
                control.interactive = true;
                control.blocks_input = true;
            }
            VisualState::Disappearing => {
                control.state = VisualState::Hidden;
                control.active = !deactivate_on_hide;
            }
            _ => return None,
        }
        Some(control.state)
    }
}
