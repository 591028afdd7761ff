//! Zones domain: spawning trigger volumes and translating collisions.

use avian2d::prelude::*;
use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::content::{BoundaryTag, CollectionCatalog};
use crate::controls::ControlEntities;
use crate::movement::GameLayer;
use crate::zones::manager::{
    TriggerVolumes, ZoneBinding, ZoneEvent, ZoneManager, settle_zone_events,
};

/// Size of the trigger attached to a zone configured without one.
pub const DEFAULT_ZONE_SIZE: Vec2 = Vec2::new(96.0, 96.0);

/// Zone placed in the world for a template index
#[derive(Component, Debug, Clone, Copy)]
pub struct TriggerZone {
    pub index: usize,
}

impl Message for ZoneEvent {}

fn trigger_bundle(size: Vec2) -> impl Bundle {
    (
        Collider::rectangle(size.x, size.y),
        Sensor,
        CollisionEventsEnabled,
        CollidingEntities::default(),
        CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
    )
}

pub(crate) fn spawn_zones(mut commands: Commands, catalog: Res<CollectionCatalog>) {
    for zone in &catalog.zones {
        let size = zone.size.map(|(w, h)| Vec2::new(w, h));
        let visual = size.unwrap_or(DEFAULT_ZONE_SIZE);

        let mut entity = commands.spawn((
            TriggerZone { index: zone.index },
            Sprite::from_color(Color::srgba(0.3, 0.7, 0.9, 0.25), visual),
            Transform::from_xyz(zone.position.0, zone.position.1, -1.0),
        ));
        if let Some(size) = size {
            entity.insert(trigger_bundle(size));
        }
    }
}

/// [`TriggerVolumes`] over zone entities, applying changes through `Commands`.
struct ZoneVolumes<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    with_collider: HashSet<Entity>,
}

impl TriggerVolumes<Entity> for ZoneVolumes<'_, '_, '_> {
    fn has_trigger(&self, handle: &Entity) -> bool {
        self.with_collider.contains(handle)
    }

    fn attach_default_trigger(&mut self, handle: &Entity) {
        self.commands
            .entity(*handle)
            .insert(trigger_bundle(DEFAULT_ZONE_SIZE));
        self.with_collider.insert(*handle);
    }

    fn mark_trigger(&mut self, handle: &Entity, binding: ZoneBinding) {
        self.commands.entity(*handle).insert(binding);
    }
}

pub(crate) fn bind_zones(
    mut commands: Commands,
    catalog: Res<CollectionCatalog>,
    controls: Option<Res<ControlEntities>>,
    zones: Query<(Entity, &TriggerZone, Has<Collider>)>,
) {
    let template_count = catalog.templates.len();
    let mut handles: Vec<Option<Entity>> = vec![None; template_count];
    let mut with_collider = HashSet::new();

    for (entity, zone, has_collider) in &zones {
        if has_collider {
            with_collider.insert(entity);
        }
        match handles.get_mut(zone.index) {
            Some(slot) if slot.is_none() => *slot = Some(entity),
            Some(_) => error!("[ZONE] Duplicate zone for index {}, ignoring", zone.index),
            None => error!(
                "[ZONE] Zone index {} has no item template ({} configured)",
                zone.index, template_count
            ),
        }
    }

    // Trailing indices without a zone are a count mismatch, not a missing zone.
    while handles.last().is_some_and(Option::is_none) {
        handles.pop();
    }

    let control_count = controls.map_or(0, |c| c.0.len());
    let mut manager = ZoneManager::default();
    let mut volumes = ZoneVolumes {
        commands: &mut commands,
        with_collider,
    };
    manager.setup(
        &handles,
        control_count,
        template_count,
        catalog.settings.boundary_tag,
        &mut volumes,
    );

    commands.insert_resource(manager);
}

/// Turn this frame's collision messages into one zone event per zone.
///
/// Start and end messages arrive in separate queues, so when a zone sees
/// both in one frame its current overlap decides which event is sent.
pub(crate) fn detect_zone_overlaps(
    mut starts: MessageReader<CollisionStart>,
    mut ends: MessageReader<CollisionEnd>,
    manager: Option<Res<ZoneManager>>,
    tags: Query<&BoundaryTag>,
    colliding: Query<&CollidingEntities>,
    mut zone_events: MessageWriter<ZoneEvent>,
) {
    let Some(manager) = manager else {
        return;
    };

    let pairs = starts
        .read()
        .map(|e| (true, e.collider1, e.collider2))
        .chain(ends.read().map(|e| (false, e.collider1, e.collider2)));

    let mut raw = Vec::new();
    let mut zone_entities = HashMap::new();
    for (began, a, b) in pairs {
        for (zone, other) in [(a, b), (b, a)] {
            let tag = tags.get(other).ok().copied();
            let event = if began {
                manager.on_overlap_begin(&zone, tag)
            } else {
                manager.on_overlap_end(&zone, tag)
            };
            if let Some(event) = event {
                zone_entities.insert(event.index(), zone);
                raw.push(event);
            }
        }
    }
    if raw.is_empty() {
        return;
    }

    let inside = |index: usize| {
        let zone = *zone_entities.get(&index)?;
        let binding = manager.binding(&zone)?;
        let touching = colliding.get(zone).ok()?;
        Some(
            touching
                .iter()
                .any(|other| tags.get(*other).is_ok_and(|tag| *tag == binding.tag)),
        )
    };

    for event in settle_zone_events(raw, inside) {
        match event {
            ZoneEvent::Entered(index) => debug!("[ZONE] Entered zone {}", index),
            ZoneEvent::Exited(index) => debug!("[ZONE] Exited zone {}", index),
        }
        zone_events.write(event);
    }
}
