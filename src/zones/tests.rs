//! Zones domain: binding and overlap filtering tests.

use std::collections::{HashMap, HashSet};

use super::manager::settle_zone_events;
use super::{TriggerVolumes, ZoneBinding, ZoneEvent, ZoneManager};
use crate::content::BoundaryTag;

#[derive(Default)]
struct FakeVolumes {
    with_trigger: HashSet<&'static str>,
    attached: Vec<&'static str>,
    marks: HashMap<&'static str, ZoneBinding>,
    mark_calls: usize,
}

impl FakeVolumes {
    fn with_triggers(names: &[&'static str]) -> Self {
        Self {
            with_trigger: names.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl TriggerVolumes<&'static str> for FakeVolumes {
    fn has_trigger(&self, handle: &&'static str) -> bool {
        self.with_trigger.contains(handle)
    }

    fn attach_default_trigger(&mut self, handle: &&'static str) {
        self.with_trigger.insert(*handle);
        self.attached.push(*handle);
    }

    fn mark_trigger(&mut self, handle: &&'static str, binding: ZoneBinding) {
        self.marks.insert(*handle, binding);
        self.mark_calls += 1;
    }
}

fn events_for_overlap(
    manager: &ZoneManager<&'static str>,
    zone: &'static str,
    tag: Option<BoundaryTag>,
) -> Vec<ZoneEvent> {
    manager
        .on_overlap_begin(&zone, tag)
        .into_iter()
        .chain(manager.on_overlap_end(&zone, tag))
        .collect()
}

// ----------------------------------------------------------------------------
// Setup
// ----------------------------------------------------------------------------

#[test]
fn test_setup_twice_binds_once() {
    let zones = [Some("west"), Some("east")];
    let mut volumes = FakeVolumes::with_triggers(&["west", "east"]);
    let mut manager = ZoneManager::default();

    assert_eq!(manager.setup(&zones, 2, 2, BoundaryTag::Player, &mut volumes), 2);
    assert_eq!(manager.setup(&zones, 2, 2, BoundaryTag::Player, &mut volumes), 2);

    assert_eq!(manager.len(), 2);
    assert_eq!(volumes.marks.len(), 2);
    assert!(volumes.attached.is_empty());
    assert_eq!(
        events_for_overlap(&manager, "east", Some(BoundaryTag::Player)),
        vec![ZoneEvent::Entered(1), ZoneEvent::Exited(1)]
    );
}

#[test]
fn test_missing_trigger_gets_default_volume_once() {
    let zones = [Some("west"), Some("east")];
    let mut volumes = FakeVolumes::with_triggers(&["west"]);
    let mut manager = ZoneManager::default();

    manager.setup(&zones, 2, 2, BoundaryTag::Player, &mut volumes);
    manager.setup(&zones, 2, 2, BoundaryTag::Player, &mut volumes);

    assert_eq!(volumes.attached, vec!["east"]);
    assert_eq!(
        manager.binding(&"east"),
        Some(ZoneBinding {
            index: 1,
            tag: BoundaryTag::Player
        })
    );
}

#[test]
fn test_count_mismatch_binds_common_indices() {
    let zones = [Some("a"), Some("b"), Some("c")];
    let mut volumes = FakeVolumes::with_triggers(&["a", "b", "c"]);
    let mut manager = ZoneManager::default();

    assert_eq!(manager.setup(&zones, 3, 2, BoundaryTag::Player, &mut volumes), 2);
    assert!(manager.binding(&"c").is_none());
    assert_eq!(volumes.mark_calls, 2);
}

#[test]
fn test_unconfigured_index_is_skipped() {
    let zones = [Some("a"), None, Some("c")];
    let mut volumes = FakeVolumes::with_triggers(&["a", "c"]);
    let mut manager = ZoneManager::default();

    assert_eq!(manager.setup(&zones, 3, 3, BoundaryTag::Player, &mut volumes), 2);
    assert_eq!(manager.binding(&"c").map(|b| b.index), Some(2));
}

// ----------------------------------------------------------------------------
// Overlap filtering
// ----------------------------------------------------------------------------

#[test]
fn test_overlap_requires_bound_tag() {
    let zones = [Some("west")];
    let mut volumes = FakeVolumes::with_triggers(&["west"]);
    let mut manager = ZoneManager::default();
    manager.setup(&zones, 1, 1, BoundaryTag::Player, &mut volumes);

    assert!(events_for_overlap(&manager, "west", Some(BoundaryTag::Npc)).is_empty());
    assert!(events_for_overlap(&manager, "west", None).is_empty());
    assert_eq!(
        manager.on_overlap_begin(&"west", Some(BoundaryTag::Player)),
        Some(ZoneEvent::Entered(0))
    );
}

#[test]
fn test_unbound_volume_is_ignored() {
    let manager = ZoneManager::<&'static str>::default();
    assert!(events_for_overlap(&manager, "north", Some(BoundaryTag::Player)).is_empty());
}

// ----------------------------------------------------------------------------
// Settling a frame of events
// ----------------------------------------------------------------------------

#[test]
fn test_exit_then_reenter_in_one_frame_stays_entered() {
    // Start messages are drained before end messages, so a re-entry reads
    // as Entered then Exited even though the body is inside again.
    let raw = [ZoneEvent::Entered(2), ZoneEvent::Exited(2)];

    let settled = settle_zone_events(raw, |index| Some(index == 2));

    assert_eq!(settled, vec![ZoneEvent::Entered(2)]);
}

#[test]
fn test_enter_then_leave_in_one_frame_ends_exited() {
    let raw = [ZoneEvent::Entered(0), ZoneEvent::Exited(0)];

    assert_eq!(
        settle_zone_events(raw, |_| Some(false)),
        vec![ZoneEvent::Exited(0)]
    );
}

#[test]
fn test_settling_keeps_zone_order_and_last_event_without_overlap_info() {
    let raw = [
        ZoneEvent::Exited(1),
        ZoneEvent::Entered(0),
        ZoneEvent::Entered(1),
    ];

    assert_eq!(
        settle_zone_events(raw, |_| None),
        vec![ZoneEvent::Entered(1), ZoneEvent::Entered(0)]
    );
}
