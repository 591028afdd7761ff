//! Controls domain: visibility state machine tests.

use super::{ScaleAnimation, ScaleRequest, VisibilityAnimator, VisualState, sample_ease};
use crate::content::{Ease, TweenSettings};

/// Records requests and lets the test decide when animations complete.
#[derive(Default)]
struct ManualMotion {
    running: Vec<ScaleRequest>,
    cancelled: Vec<usize>,
    snapped: Vec<(usize, f32)>,
}

impl ManualMotion {
    fn finish(&mut self, animator: &mut VisibilityAnimator, control: usize) -> Option<VisualState> {
        let position = self.running.iter().position(|r| r.control == control)?;
        let request = self.running.remove(position);
        animator.on_animation_complete(request.control, request.generation)
    }
}

impl ScaleAnimation for ManualMotion {
    fn animate_scale(&mut self, request: ScaleRequest) {
        self.running.push(request);
    }

    fn cancel_animation(&mut self, control: usize) {
        self.running.retain(|r| r.control != control);
        self.cancelled.push(control);
    }

    fn snap_scale(&mut self, control: usize, scale: f32) {
        self.snapped.push((control, scale));
    }
}

fn animator(count: usize) -> VisibilityAnimator {
    VisibilityAnimator::new(count, TweenSettings::default())
}

// ----------------------------------------------------------------------------
// Show / hide
// ----------------------------------------------------------------------------

#[test]
fn test_controls_start_hidden() {
    let animator = animator(3);
    assert_eq!(animator.len(), 3);
    assert_eq!(animator.state(0), Some(VisualState::Hidden));
    assert!(!animator.is_interactive(0));
    assert_eq!(animator.state(3), None);
}

#[test]
fn test_show_is_not_interactive_until_complete() {
    let mut animator = animator(2);
    let mut motion = ManualMotion::default();

    animator.show(0, false, &mut motion);
    let control = animator.control(0).unwrap();
    assert_eq!(control.state, VisualState::Appearing);
    assert!(control.active);
    assert!(!control.interactive);
    assert!(!control.blocks_input);
    assert_eq!(motion.running[0].target, 1.0);
    assert_eq!(motion.running[0].ease, Ease::OutBack);

    assert_eq!(motion.finish(&mut animator, 0), Some(VisualState::Visible));
    let control = animator.control(0).unwrap();
    assert!(control.interactive);
    assert!(control.blocks_input);
}

#[test]
fn test_hide_drops_interactivity_immediately() {
    let mut animator = animator(1);
    let mut motion = ManualMotion::default();
    animator.show(0, false, &mut motion);
    motion.finish(&mut animator, 0);

    animator.hide(0, &mut motion);
    assert_eq!(animator.state(0), Some(VisualState::Disappearing));
    assert!(!animator.is_interactive(0));

    assert_eq!(motion.finish(&mut animator, 0), Some(VisualState::Hidden));
    assert!(!animator.control(0).unwrap().active);
}

#[test]
fn test_hidden_control_keeps_layout_when_not_deactivated() {
    let tween = TweenSettings {
        deactivate_on_hide: false,
        ..TweenSettings::default()
    };
    let mut animator = VisibilityAnimator::new(1, tween);
    let mut motion = ManualMotion::default();
    animator.show(0, false, &mut motion);
    motion.finish(&mut animator, 0);
    animator.hide(0, &mut motion);
    motion.finish(&mut animator, 0);

    let control = animator.control(0).unwrap();
    assert_eq!(control.state, VisualState::Hidden);
    assert!(control.active);
    assert!(!control.interactive);
}

#[test]
fn test_show_twice_does_not_restart() {
    let mut animator = animator(1);
    let mut motion = ManualMotion::default();

    animator.show(0, false, &mut motion);
    animator.show(0, false, &mut motion);

    assert_eq!(motion.running.len(), 1);
    assert_eq!(motion.cancelled, vec![0]);
}

#[test]
fn test_out_of_range_requests_are_ignored() {
    let mut animator = animator(1);
    let mut motion = ManualMotion::default();

    animator.show(5, true, &mut motion);
    animator.hide(5, &mut motion);

    assert!(motion.running.is_empty());
    assert!(motion.snapped.is_empty());
    assert_eq!(animator.state(0), Some(VisualState::Hidden));
}

// ----------------------------------------------------------------------------
// Cancellation
// ----------------------------------------------------------------------------

#[test]
fn test_hide_interrupts_show_and_stale_completion_is_ignored() {
    let mut animator = animator(1);
    let mut motion = ManualMotion::default();

    animator.show(0, false, &mut motion);
    let stale = motion.running[0];
    animator.hide(0, &mut motion);

    assert_eq!(motion.running.len(), 1);
    assert_eq!(motion.running[0].target, 0.0);
    assert_eq!(animator.on_animation_complete(0, stale.generation), None);
    assert_eq!(animator.state(0), Some(VisualState::Disappearing));

    assert_eq!(motion.finish(&mut animator, 0), Some(VisualState::Hidden));
}

#[test]
fn test_show_interrupts_hide() {
    let mut animator = animator(1);
    let mut motion = ManualMotion::default();
    animator.show(0, false, &mut motion);
    motion.finish(&mut animator, 0);

    animator.hide(0, &mut motion);
    animator.show(0, false, &mut motion);

    assert_eq!(animator.state(0), Some(VisualState::Appearing));
    assert_eq!(motion.running.len(), 1);
    assert_eq!(motion.finish(&mut animator, 0), Some(VisualState::Visible));
}

// ----------------------------------------------------------------------------
// Exclusive / snapping
// ----------------------------------------------------------------------------

#[test]
fn test_exclusive_show_leaves_one_visible() {
    let mut animator = animator(3);
    let mut motion = ManualMotion::default();

    animator.show(0, true, &mut motion);
    motion.finish(&mut animator, 0);
    animator.show(1, true, &mut motion);
    motion.finish(&mut animator, 1);
    animator.show(2, true, &mut motion);
    motion.finish(&mut animator, 2);

    assert_eq!(animator.visible_count(), 1);
    assert_eq!(animator.state(2), Some(VisualState::Visible));
    assert_eq!(animator.state(0), Some(VisualState::Hidden));
    assert!(motion.snapped.contains(&(1, 0.0)));
}

#[test]
fn test_non_exclusive_show_keeps_others() {
    let mut animator = animator(2);
    let mut motion = ManualMotion::default();

    animator.show(0, false, &mut motion);
    animator.show(1, false, &mut motion);
    motion.finish(&mut animator, 0);
    motion.finish(&mut animator, 1);

    assert_eq!(animator.visible_count(), 2);
}

#[test]
fn test_without_tween_controls_snap() {
    let tween = TweenSettings {
        use_tween: false,
        ..TweenSettings::default()
    };
    let mut animator = VisibilityAnimator::new(2, tween);
    let mut motion = ManualMotion::default();

    animator.show(1, false, &mut motion);
    assert_eq!(animator.state(1), Some(VisualState::Visible));
    assert!(animator.is_interactive(1));
    assert_eq!(motion.snapped, vec![(1, 1.0)]);

    animator.hide(1, &mut motion);
    assert_eq!(animator.state(1), Some(VisualState::Hidden));
    assert!(!animator.control(1).unwrap().blocks_input);
    assert!(motion.running.is_empty());
}

#[test]
fn test_hide_all_snaps_every_control() {
    let mut animator = animator(3);
    let mut motion = ManualMotion::default();
    animator.show(0, false, &mut motion);

    animator.hide_all(&mut motion);

    assert_eq!(motion.snapped, vec![(0, 0.0), (1, 0.0), (2, 0.0)]);
    assert!(motion.running.is_empty());
    assert_eq!(animator.visible_count(), 0);
}

// ----------------------------------------------------------------------------
// Easing
// ----------------------------------------------------------------------------

#[test]
fn test_ease_endpoints() {
    for ease in [Ease::Linear, Ease::OutQuad, Ease::InBack, Ease::OutBack] {
        assert!(sample_ease(ease, 0.0).abs() < 1e-4, "{:?} at 0", ease);
        assert!((sample_ease(ease, 1.0) - 1.0).abs() < 1e-4, "{:?} at 1", ease);
    }
    assert!((sample_ease(Ease::Linear, 0.25) - 0.25).abs() < 1e-4);
}
