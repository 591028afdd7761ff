//! Data definitions for the collection content file.
//!
//! These structs mirror the structure of assets/data/collection.ron and are
//! used for deserialization. The CollectionCatalog provides indexed lookup.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Root (collection.ron)
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CollectionDef {
    pub schema_version: u32,
    /// Grantable items. The position in this list is the item index shared
    /// with the zone and the action control.
    pub items: Vec<ItemTemplateDef>,
    pub zones: Vec<ZoneDef>,
    #[serde(default)]
    pub settings: CollectionSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemTemplateDef {
    pub sprite_id: String,
    /// Image path relative to assets/. Items without a path are not part of
    /// the preloaded sprite catalog and resolve through the fallback folder.
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZoneDef {
    pub index: usize,
    pub position: (f32, f32),
    /// Trigger volume size. Zones without a size get a default volume at setup.
    #[serde(default)]
    pub size: Option<(f32, f32)>,
}

// ============================================================================
// Settings
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CollectionSettings {
    /// Amount passed to the claim provider for every acquisition.
    pub claim_amount: u32,
    /// When true, only the current zone's control is shown.
    pub exclusive_activation: bool,
    /// Which kind of overlapping body counts as "the player" for zones.
    pub boundary_tag: BoundaryTag,
    pub tween: TweenSettings,
    /// Fallback folder for sprites missing from the catalog (relative to assets/).
    pub sprite_folder: Option<String>,
    pub storage: StorageSettings,
    /// Display card prefab. Cards cannot be built without it.
    pub card: Option<CardDef>,
    /// Simulated claim provider. None means the local (no-claim) path.
    pub claim: Option<SimulatedClaimDef>,
    /// Extra controls hidden together with the triggering one after a
    /// successful claim.
    pub linked_controls: Vec<usize>,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            claim_amount: 1,
            exclusive_activation: true,
            boundary_tag: BoundaryTag::Player,
            tween: TweenSettings::default(),
            sprite_folder: None,
            storage: StorageSettings::default(),
            card: Some(CardDef::default()),
            claim: None,
            linked_controls: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TweenSettings {
    pub use_tween: bool,
    pub show_duration: f32,
    pub hide_duration: f32,
    pub show_ease: Ease,
    pub hide_ease: Ease,
    /// Hidden controls leave the layout entirely instead of reserving space.
    pub deactivate_on_hide: bool,
}

impl Default for TweenSettings {
    fn default() -> Self {
        Self {
            use_tween: true,
            show_duration: 0.35,
            hide_duration: 0.20,
            show_ease: Ease::OutBack,
            hide_ease: Ease::InBack,
            deactivate_on_hide: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageSettings {
    pub path: String,
    pub count_key: String,
    pub slot_prefix: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: "saves/collection.json".to_string(),
            count_key: "CollectedCount".to_string(),
            slot_prefix: "Collected_".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CardDef {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub background: (f32, f32, f32, f32),
}

impl Default for CardDef {
    fn default() -> Self {
        Self {
            width: 96.0,
            height: 120.0,
            padding: 6.0,
            background: (0.15, 0.15, 0.2, 0.95),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulatedClaimDef {
    pub delay_secs: f32,
    /// Probability in [0, 1] that a claim succeeds.
    pub success_chance: f64,
    pub seed: u64,
}

impl Default for SimulatedClaimDef {
    fn default() -> Self {
        Self {
            delay_secs: 1.5,
            success_chance: 1.0,
            seed: 7,
        }
    }
}

// ============================================================================
// Shared enums
// ============================================================================

/// Typed identity of a body that can overlap a zone.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum BoundaryTag {
    #[default]
    Player,
    Npc,
    Prop,
}

/// Easing curves available to control transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Ease {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InBack,
    OutBack,
}
