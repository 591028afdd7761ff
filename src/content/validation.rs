//! Validation for cross-references between zones, items and settings.

use std::collections::HashSet;
use thiserror::Error;

use super::data::{CollectionDef, CollectionSettings, SimulatedClaimDef, TweenSettings};

/// A validation error with context about what failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Zone index {0} is declared more than once")]
    DuplicateZoneIndex(usize),
    #[error("Zone index {index} is outside the item range [0, {item_count})")]
    ZoneIndexOutOfRange { index: usize, item_count: usize },
    #[error("Item '{0}' is declared more than once; the first entry wins")]
    DuplicateSpriteId(String),
    #[error("Zone count ({zones}) does not match item count ({items}); only common indices are wired")]
    CountMismatch { zones: usize, items: usize },
    #[error("Linked control {index} is outside the item range [0, {item_count})")]
    LinkedControlOutOfRange { index: usize, item_count: usize },
    #[error("Claim amount is zero")]
    ZeroClaimAmount,
    #[error("Setting '{0}' is not a finite number; using the default")]
    NonFiniteSetting(&'static str),
}

/// Validate all cross-references in the collection definition.
/// Returns a list of validation errors, empty if everything is consistent.
pub fn validate_collection(def: &CollectionDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let item_count = def.items.len();

    let mut seen_zones = HashSet::new();
    for zone in &def.zones {
        if !seen_zones.insert(zone.index) {
            errors.push(ValidationError::DuplicateZoneIndex(zone.index));
        }
        if zone.index >= item_count {
            errors.push(ValidationError::ZoneIndexOutOfRange {
                index: zone.index,
                item_count,
            });
        }
    }

    let mut seen_sprites = HashSet::new();
    for item in &def.items {
        if !seen_sprites.insert(item.sprite_id.as_str()) {
            errors.push(ValidationError::DuplicateSpriteId(item.sprite_id.clone()));
        }
    }

    if def.zones.len() != item_count {
        errors.push(ValidationError::CountMismatch {
            zones: def.zones.len(),
            items: item_count,
        });
    }

    for &index in &def.settings.linked_controls {
        if index >= item_count {
            errors.push(ValidationError::LinkedControlOutOfRange { index, item_count });
        }
    }

    if def.settings.claim.is_some() && def.settings.claim_amount == 0 {
        errors.push(ValidationError::ZeroClaimAmount);
    }

    errors.extend(
        reset_non_finite_settings(&mut def.settings.clone())
            .into_iter()
            .map(ValidationError::NonFiniteSetting),
    );

    errors
}

/// Replace every non-finite timing or chance setting with its default.
/// Returns the names of the fields that were reset.
pub fn reset_non_finite_settings(settings: &mut CollectionSettings) -> Vec<&'static str> {
    let mut reset = Vec::new();
    let tween = TweenSettings::default();

    if !settings.tween.show_duration.is_finite() {
        settings.tween.show_duration = tween.show_duration;
        reset.push("tween.show_duration");
    }
    if !settings.tween.hide_duration.is_finite() {
        settings.tween.hide_duration = tween.hide_duration;
        reset.push("tween.hide_duration");
    }

    if let Some(claim) = settings.claim.as_mut() {
        let defaults = SimulatedClaimDef::default();
        if !claim.delay_secs.is_finite() {
            claim.delay_secs = defaults.delay_secs;
            reset.push("claim.delay_secs");
        }
        if !claim.success_chance.is_finite() {
            claim.success_chance = defaults.success_chance;
            reset.push("claim.success_chance");
        }
    }

    reset
}
