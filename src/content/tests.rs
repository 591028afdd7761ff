//! Content domain: parsing and validation tests.

use super::{
    BoundaryTag, CollectionCatalog, CollectionDef, Ease, ItemTemplateDef, SimulatedClaimDef,
    TweenSettings, ValidationError, ZoneDef, parse_collection, reset_non_finite_settings,
    validate_collection,
};

const SAMPLE: &str = r#"(
    schema_version: 1,
    items: [
        (sprite_id: "amber_idol", path: "sprites/amber_idol.png"),
        (sprite_id: "jade_mask"),
    ],
    zones: [
        (index: 0, position: (-200.0, 0.0), size: (80.0, 80.0)),
        (index: 1, position: (200.0, 0.0)),
    ],
    settings: (
        claim_amount: 3,
        exclusive_activation: false,
        tween: (show_ease: OutQuad),
        claim: (delay_secs: 0.05),
    ),
)"#;

fn item(id: &str) -> ItemTemplateDef {
    ItemTemplateDef {
        sprite_id: id.to_string(),
        path: None,
    }
}

fn zone(index: usize) -> ZoneDef {
    ZoneDef {
        index,
        position: (0.0, 0.0),
        size: None,
    }
}

// -----------------------------------------------------------------------------
// Parsing
// -----------------------------------------------------------------------------

#[test]
fn test_parse_sample_collection() {
    let def = parse_collection(SAMPLE, "sample.ron").expect("sample should parse");

    assert_eq!(def.items.len(), 2);
    assert_eq!(def.items[0].path.as_deref(), Some("sprites/amber_idol.png"));
    assert!(def.items[1].path.is_none());
    assert_eq!(def.zones[0].size, Some((80.0, 80.0)));
    assert!(def.zones[1].size.is_none());

    assert_eq!(def.settings.claim_amount, 3);
    assert!(!def.settings.exclusive_activation);
    assert_eq!(def.settings.tween.show_ease, Ease::OutQuad);
    // Unspecified fields keep their defaults
    assert_eq!(def.settings.tween.hide_ease, Ease::InBack);
    assert_eq!(def.settings.boundary_tag, BoundaryTag::Player);
    let claim = def.settings.claim.expect("claim settings present");
    assert!((claim.delay_secs - 0.05).abs() < f32::EPSILON);
    assert_eq!(claim.success_chance, 1.0);
}

#[test]
fn test_parse_error_names_file() {
    let err = parse_collection("(schema_version: ", "broken.ron").unwrap_err();
    assert!(err.to_string().contains("broken.ron"));
}

#[test]
fn test_catalog_assigns_indices_in_order() {
    let def = parse_collection(SAMPLE, "sample.ron").unwrap();
    let catalog = CollectionCatalog::from_def(def);

    assert_eq!(catalog.templates.len(), 2);
    assert_eq!(catalog.template(1).unwrap().sprite_id, "jade_mask");
    assert_eq!(catalog.template(1).unwrap().index, 1);
    assert!(catalog.template(2).is_none());
    assert_eq!(catalog.sprite_paths.len(), 2);
}

// -----------------------------------------------------------------------------
// Validation
// -----------------------------------------------------------------------------

#[test]
fn test_valid_collection_has_no_errors() {
    let def = CollectionDef {
        schema_version: 1,
        items: vec![item("a"), item("b")],
        zones: vec![zone(0), zone(1)],
        settings: Default::default(),
    };
    assert!(validate_collection(&def).is_empty());
}

#[test]
fn test_validation_flags_bad_zones() {
    let def = CollectionDef {
        schema_version: 1,
        items: vec![item("a"), item("b")],
        zones: vec![zone(0), zone(0), zone(5)],
        settings: Default::default(),
    };
    let errors = validate_collection(&def);

    assert!(errors.contains(&ValidationError::DuplicateZoneIndex(0)));
    assert!(errors.contains(&ValidationError::ZoneIndexOutOfRange {
        index: 5,
        item_count: 2
    }));
    assert!(errors.contains(&ValidationError::CountMismatch { zones: 3, items: 2 }));
}

#[test]
fn test_validation_flags_duplicate_sprites_and_links() {
    let mut def = CollectionDef {
        schema_version: 1,
        items: vec![item("a"), item("a")],
        zones: vec![zone(0), zone(1)],
        settings: Default::default(),
    };
    def.settings.linked_controls = vec![1, 4];
    def.settings.claim = Some(Default::default());
    def.settings.claim_amount = 0;

    let errors = validate_collection(&def);
    assert!(errors.contains(&ValidationError::DuplicateSpriteId("a".to_string())));
    assert!(errors.contains(&ValidationError::LinkedControlOutOfRange {
        index: 4,
        item_count: 2
    }));
    assert!(errors.contains(&ValidationError::ZeroClaimAmount));
    assert_eq!(errors.len(), 3);
}

#[test]
fn test_non_finite_timings_are_flagged_and_reset() {
    let mut def = CollectionDef {
        schema_version: 1,
        items: vec![item("a")],
        zones: vec![zone(0)],
        settings: Default::default(),
    };
    def.settings.tween.hide_duration = f32::INFINITY;
    def.settings.claim = Some(SimulatedClaimDef {
        delay_secs: f32::INFINITY,
        success_chance: f64::NAN,
        seed: 1,
    });

    let errors = validate_collection(&def);
    assert_eq!(
        errors,
        vec![
            ValidationError::NonFiniteSetting("tween.hide_duration"),
            ValidationError::NonFiniteSetting("claim.delay_secs"),
            ValidationError::NonFiniteSetting("claim.success_chance"),
        ]
    );
    // Reporting leaves the definition untouched
    assert!(def.settings.tween.hide_duration.is_infinite());

    let reset = reset_non_finite_settings(&mut def.settings);
    assert_eq!(reset.len(), 3);
    assert_eq!(
        def.settings.tween.hide_duration,
        TweenSettings::default().hide_duration
    );
    let claim = def.settings.claim.as_ref().unwrap();
    assert_eq!(claim.delay_secs, SimulatedClaimDef::default().delay_secs);
    assert_eq!(claim.success_chance, SimulatedClaimDef::default().success_chance);
    assert_eq!(claim.seed, 1);
    assert!(validate_collection(&def).is_empty());
}

#[test]
fn test_shipped_collection_is_valid() {
    let def = super::load_collection(std::path::Path::new(super::COLLECTION_PATH))
        .expect("shipped collection should load");

    assert_eq!(def.items.len(), def.zones.len());
    assert!(validate_collection(&def).is_empty());
    assert!(def.settings.claim.is_some());
}
