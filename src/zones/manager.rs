//! Zones domain: bindings between trigger volumes and template indices.

use bevy::prelude::*;
use std::collections::HashMap;
use std::hash::Hash;

use crate::content::BoundaryTag;

/// Binding stored on a trigger volume: which index it reveals and which tag
/// it reacts to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneBinding {
    pub index: usize,
    pub tag: BoundaryTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneEvent {
    Entered(usize),
    Exited(usize),
}

impl ZoneEvent {
    pub fn index(self) -> usize {
        match self {
            ZoneEvent::Entered(index) | ZoneEvent::Exited(index) => index,
        }
    }
}

/// Collapse one batch of zone events into a single event per zone, ordered
/// by each zone's first appearance.
///
/// `inside(index)` reports whether the tagged body overlaps the zone right
/// now. When it returns `None` the zone's last event in the batch wins.
pub(crate) fn settle_zone_events(
    events: impl IntoIterator<Item = ZoneEvent>,
    mut inside: impl FnMut(usize) -> Option<bool>,
) -> Vec<ZoneEvent> {
    let mut settled: Vec<ZoneEvent> = Vec::new();
    for event in events {
        match settled.iter_mut().find(|e| e.index() == event.index()) {
            Some(last) => *last = event,
            None => settled.push(event),
        }
    }

    for event in &mut settled {
        let index = event.index();
        match inside(index) {
            Some(true) => *event = ZoneEvent::Entered(index),
            Some(false) => *event = ZoneEvent::Exited(index),
            None => {}
        }
    }
    settled
}

/// Collision backend holding the trigger volumes.
pub trait TriggerVolumes<H> {
    fn has_trigger(&self, handle: &H) -> bool;
    /// Attach a default-sized trigger volume to `handle`.
    fn attach_default_trigger(&mut self, handle: &H);
    fn mark_trigger(&mut self, handle: &H, binding: ZoneBinding);
}

#[derive(Resource, Debug)]
pub struct ZoneManager<H = Entity>
where
    H: Eq + Hash + Send + Sync + 'static,
{
    bindings: HashMap<H, ZoneBinding>,
}

impl<H> Default for ZoneManager<H>
where
    H: Eq + Hash + Send + Sync + 'static,
{
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }
}

impl<H> ZoneManager<H>
where
    H: Clone + Eq + Hash + Send + Sync + std::fmt::Debug + 'static,
{
    /// Bind every index shared by zones, controls and templates.
    ///
    /// `zones[i]` is the volume for index `i`, or `None` when no zone was
    /// configured there. Rebinds from scratch, so calling it again yields the
    /// same binding set. Returns the number of bound zones.
    pub fn setup(
        &mut self,
        zones: &[Option<H>],
        control_count: usize,
        template_count: usize,
        tag: BoundaryTag,
        volumes: &mut dyn TriggerVolumes<H>,
    ) -> usize {
        let count = zones.len().min(control_count).min(template_count);
        if zones.len() != count || control_count != count || template_count != count {
            warn!(
                "[ZONE] Count mismatch: zones={}, controls={}, templates={}; binding {}",
                zones.len(),
                control_count,
                template_count,
                count
            );
        }

        self.bindings.clear();
        let mut missing = Vec::new();

        for (index, zone) in zones.iter().take(count).enumerate() {
            let Some(handle) = zone else {
                missing.push(index);
                continue;
            };

            if !volumes.has_trigger(handle) {
                warn!(
                    "[ZONE] Zone {} has no trigger volume, attaching a default one",
                    index
                );
                volumes.attach_default_trigger(handle);
            }

            let binding = ZoneBinding { index, tag };
            volumes.mark_trigger(handle, binding);
            self.bindings.insert(handle.clone(), binding);
        }

        if !missing.is_empty() {
            error!("[ZONE] No zone configured for index(es) {:?}", missing);
        }

        info!("[ZONE] Bound {} zone(s) to tag {:?}", self.bindings.len(), tag);
        self.bindings.len()
    }

    pub fn binding(&self, handle: &H) -> Option<ZoneBinding> {
        self.bindings.get(handle).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Something started overlapping `zone`. Only objects carrying the
    /// bound tag produce an event.
    pub fn on_overlap_begin(&self, zone: &H, other: Option<BoundaryTag>) -> Option<ZoneEvent> {
        self.matching(zone, other).map(ZoneEvent::Entered)
    }

    pub fn on_overlap_end(&self, zone: &H, other: Option<BoundaryTag>) -> Option<ZoneEvent> {
        self.matching(zone, other).map(ZoneEvent::Exited)
    }

    fn matching(&self, zone: &H, other: Option<BoundaryTag>) -> Option<usize> {
        let binding = self.bindings.get(zone)?;
        (other? == binding.tag).then_some(binding.index)
    }
}
