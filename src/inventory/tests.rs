//! Inventory domain: store persistence tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::{
    InventoryError, InventoryRecord, InventoryStore, KeyValueStore, MemoryPrefs, PrefsError,
    PrefsFile,
};
use crate::content::StorageSettings;

/// Memory prefs shared with the test so keys can be inspected or corrupted
/// after the store takes ownership.
#[derive(Clone, Default)]
struct SharedPrefs {
    inner: Arc<Mutex<MemoryPrefs>>,
    fail_flush: Arc<AtomicBool>,
}

impl SharedPrefs {
    fn with<R>(&self, f: impl FnOnce(&mut MemoryPrefs) -> R) -> R {
        let mut guard = self.inner.lock().unwrap();
        f(&mut guard)
    }
}

impl KeyValueStore for SharedPrefs {
    fn get_string(&self, key: &str, default: &str) -> String {
        self.with(|p| p.get_string(key, default))
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.with(|p| p.set_string(key, value))
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.with(|p| p.get_int(key, default))
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.with(|p| p.set_int(key, value))
    }

    fn delete_key(&mut self, key: &str) {
        self.with(|p| p.delete_key(key))
    }

    fn string_keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.with(|p| p.string_keys_with_prefix(prefix))
    }

    fn flush(&mut self) -> Result<(), PrefsError> {
        if self.fail_flush.load(Ordering::SeqCst) {
            return Err(PrefsError::Io {
                path: "memory".to_string(),
                source: std::io::Error::other("disk full"),
            });
        }
        self.with(|p| p.flush())
    }
}

fn store_with(prefs: &SharedPrefs) -> InventoryStore {
    InventoryStore::new(prefs.clone(), &StorageSettings::default())
}

fn record(slot: usize, id: &str) -> InventoryRecord {
    InventoryRecord {
        slot,
        sprite_id: id.to_string(),
    }
}

// ----------------------------------------------------------------------------
// Append / load
// ----------------------------------------------------------------------------

#[test]
fn test_appends_load_back_in_slot_order() {
    let prefs = SharedPrefs::default();
    let mut store = store_with(&prefs);

    assert_eq!(store.append("amber").unwrap(), 0);
    assert_eq!(store.append("jade").unwrap(), 1);
    assert_eq!(store.append("amber").unwrap(), 2);

    assert_eq!(store.count(), 3);
    assert_eq!(
        store.load_all(),
        vec![record(0, "amber"), record(1, "jade"), record(2, "amber")]
    );
}

#[test]
fn test_keys_follow_counter_and_slot_prefix() {
    let prefs = SharedPrefs::default();
    let mut store = store_with(&prefs);
    store.append("amber").unwrap();

    assert_eq!(prefs.with(|p| p.get_int("CollectedCount", -1)), 1);
    assert_eq!(prefs.with(|p| p.get_string("Collected_0", "")), "amber");
}

#[test]
fn test_empty_sprite_id_is_rejected() {
    let prefs = SharedPrefs::default();
    let mut store = store_with(&prefs);

    assert!(matches!(store.append(""), Err(InventoryError::EmptySpriteId)));
    assert_eq!(store.count(), 0);
}

#[test]
fn test_negative_counter_reads_as_empty() {
    let prefs = SharedPrefs::default();
    prefs.with(|p| p.set_int("CollectedCount", -4));
    let mut store = store_with(&prefs);

    assert_eq!(store.count(), 0);
    assert!(store.load_all().is_empty());
    assert_eq!(store.append("amber").unwrap(), 0);
}

// ----------------------------------------------------------------------------
// Gaps
// ----------------------------------------------------------------------------

#[test]
fn test_interior_gap_is_skipped_without_trimming() {
    let prefs = SharedPrefs::default();
    prefs.with(|p| {
        p.set_int("CollectedCount", 3);
        p.set_string("Collected_0", "amber");
        p.set_string("Collected_2", "onyx");
    });
    let mut store = store_with(&prefs);

    assert_eq!(store.load_all(), vec![record(0, "amber"), record(2, "onyx")]);
    assert_eq!(store.count(), 3);
}

#[test]
fn test_trailing_gap_trims_counter() {
    let prefs = SharedPrefs::default();
    prefs.with(|p| {
        p.set_int("CollectedCount", 4);
        p.set_string("Collected_0", "amber");
        p.set_string("Collected_1", "jade");
        p.set_string("Collected_3", "");
    });
    let mut store = store_with(&prefs);

    assert_eq!(store.load_all(), vec![record(0, "amber"), record(1, "jade")]);
    assert_eq!(store.count(), 2);
    assert_eq!(store.append("onyx").unwrap(), 2);
}

#[test]
fn test_huge_counter_is_bounded_by_stored_slots() {
    let prefs = SharedPrefs::default();
    prefs.with(|p| {
        p.set_int("CollectedCount", i64::MAX);
        p.set_string("Collected_0", "amber");
        p.set_string("Collected_1", "jade");
    });
    let mut store = store_with(&prefs);

    assert_eq!(store.append("onyx").unwrap(), 2);
    assert_eq!(
        store.load_all(),
        vec![record(0, "amber"), record(1, "jade"), record(2, "onyx")]
    );
    assert_eq!(store.count(), 3);
}

#[test]
fn test_huge_counter_loads_and_clears() {
    let prefs = SharedPrefs::default();
    prefs.with(|p| {
        p.set_int("CollectedCount", i64::MAX);
        p.set_string("Collected_0", "amber");
        p.set_string("Collected_7", "jade");
    });
    let mut store = store_with(&prefs);

    assert_eq!(store.load_all(), vec![record(0, "amber"), record(7, "jade")]);
    assert_eq!(store.count(), 8);

    prefs.with(|p| p.set_int("CollectedCount", i64::MAX));
    store.clear().unwrap();
    assert_eq!(store.count(), 0);
    assert!(prefs.with(|p| p.string_keys_with_prefix("Collected_")).is_empty());
}

// ----------------------------------------------------------------------------
// Clear
// ----------------------------------------------------------------------------

#[test]
fn test_clear_resets_slots_and_counter() {
    let prefs = SharedPrefs::default();
    let mut store = store_with(&prefs);
    store.append("amber").unwrap();
    store.append("jade").unwrap();

    store.clear().unwrap();

    assert!(store.load_all().is_empty());
    assert_eq!(prefs.with(|p| p.get_string("Collected_1", "gone")), "gone");
    assert_eq!(store.append("onyx").unwrap(), 0);
}

// ----------------------------------------------------------------------------
// Durability
// ----------------------------------------------------------------------------

#[test]
fn test_append_is_flushed_before_returning() {
    let prefs = SharedPrefs::default();
    let mut store = store_with(&prefs);
    store.append("amber").unwrap();

    prefs.with(|p| {
        assert!(!p.has_unflushed_writes());
        p.simulate_crash();
    });

    assert_eq!(store.load_all(), vec![record(0, "amber")]);
}

#[test]
fn test_failed_flush_loses_slot_and_counter_together() {
    let prefs = SharedPrefs::default();
    let mut store = store_with(&prefs);
    store.append("amber").unwrap();

    prefs.fail_flush.store(true, Ordering::SeqCst);
    assert!(matches!(store.append("jade"), Err(InventoryError::Persist(_))));

    prefs.fail_flush.store(false, Ordering::SeqCst);
    prefs.with(|p| p.simulate_crash());

    assert_eq!(store.count(), 1);
    assert_eq!(store.load_all(), vec![record(0, "amber")]);
}

#[test]
fn test_failed_append_is_not_saved_by_later_flush() {
    let prefs = SharedPrefs::default();
    let mut store = store_with(&prefs);
    store.append("amber").unwrap();

    prefs.fail_flush.store(true, Ordering::SeqCst);
    assert!(store.append("jade").is_err());
    assert!(!prefs.with(|p| p.has_unflushed_writes()));

    prefs.fail_flush.store(false, Ordering::SeqCst);
    assert_eq!(store.append("onyx").unwrap(), 1);
    prefs.with(|p| p.simulate_crash());

    assert_eq!(store.load_all(), vec![record(0, "amber"), record(1, "onyx")]);
}

#[test]
fn test_prefs_file_survives_reopen() {
    let path = std::env::temp_dir().join(format!(
        "collect-zones-prefs-{}-{}.json",
        std::process::id(),
        line!()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let prefs = PrefsFile::open(&path).unwrap();
        let mut store = InventoryStore::new(prefs, &StorageSettings::default());
        store.append("amber").unwrap();
        store.append("jade").unwrap();
    }

    let prefs = PrefsFile::open(&path).unwrap();
    let mut store = InventoryStore::new(prefs, &StorageSettings::default());
    assert_eq!(store.load_all(), vec![record(0, "amber"), record(1, "jade")]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_corrupt_prefs_file_is_reported() {
    let path = std::env::temp_dir().join(format!(
        "collect-zones-corrupt-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        PrefsFile::open(&path),
        Err(PrefsError::Parse { .. })
    ));

    let _ = std::fs::remove_file(&path);
}
