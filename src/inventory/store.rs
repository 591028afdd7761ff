//! Inventory domain: append-only record of granted items.

use bevy::prelude::*;
use thiserror::Error;

use crate::content::StorageSettings;
use crate::inventory::prefs::{KeyValueStore, PrefsError};

/// One granted item, stored at a sequential slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    pub slot: usize,
    pub sprite_id: String,
}

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Cannot record an item without a sprite id")]
    EmptySpriteId,
    #[error(transparent)]
    Persist(#[from] PrefsError),
}

/// Durable inventory keyed by slot. The counter key is the source of truth
/// for how many slots exist; each slot is a string key `slot_prefix + slot`.
#[derive(Resource)]
pub struct InventoryStore {
    prefs: Box<dyn KeyValueStore>,
    count_key: String,
    slot_prefix: String,
}

impl InventoryStore {
    pub fn new(prefs: impl KeyValueStore + 'static, storage: &StorageSettings) -> Self {
        Self {
            prefs: Box::new(prefs),
            count_key: storage.count_key.clone(),
            slot_prefix: storage.slot_prefix.clone(),
        }
    }

    /// Persisted slot count. Negative values read as zero.
    pub fn count(&self) -> usize {
        usize::try_from(self.prefs.get_int(&self.count_key, 0)).unwrap_or(0)
    }

    fn slot_key(&self, slot: usize) -> String {
        format!("{}{}", self.slot_prefix, slot)
    }

    /// Slot numbers that have a key of their own, in ascending order.
    /// Keys whose suffix is not a plain slot number are ignored.
    fn stored_slots(&self) -> Vec<usize> {
        let mut slots: Vec<usize> = self
            .prefs
            .string_keys_with_prefix(&self.slot_prefix)
            .iter()
            .filter_map(|key| {
                let slot: usize = key[self.slot_prefix.len()..].parse().ok()?;
                (*key == self.slot_key(slot)).then_some(slot)
            })
            .collect();
        slots.sort_unstable();
        slots
    }

    /// Slot the next append writes to. A counter that points past every
    /// stored slot falls back to just after the highest one.
    fn next_slot(&self) -> usize {
        let count = self.count();
        let end = self
            .stored_slots()
            .into_iter()
            .filter(|&slot| slot < count)
            .filter(|&slot| !self.prefs.get_string(&self.slot_key(slot), "").is_empty())
            .last()
            .map_or(0, |slot| slot + 1);
        count.min(end)
    }

    /// Record `sprite_id` at the next free slot and return that slot.
    ///
    /// The slot is written before the counter and both are flushed together.
    /// If the flush fails both writes are undone, so nothing of the failed
    /// append reaches a later flush.
    pub fn append(&mut self, sprite_id: &str) -> Result<usize, InventoryError> {
        if sprite_id.is_empty() {
            return Err(InventoryError::EmptySpriteId);
        }

        let slot = self.next_slot();
        let key = self.slot_key(slot);
        let previous_value = self
            .prefs
            .string_keys_with_prefix(&key)
            .contains(&key)
            .then(|| self.prefs.get_string(&key, ""));
        let previous_count = self.prefs.get_int(&self.count_key, 0);

        self.prefs.set_string(&key, sprite_id);
        self.prefs.set_int(&self.count_key, slot as i64 + 1);
        if let Err(e) = self.prefs.flush() {
            match previous_value {
                Some(value) => self.prefs.set_string(&key, &value),
                None => self.prefs.delete_key(&key),
            }
            self.prefs.set_int(&self.count_key, previous_count);
            return Err(e.into());
        }

        info!("[INVENTORY] Saved '{}' at slot {}", sprite_id, slot);
        Ok(slot)
    }

    /// Read every stored slot below the counter, in slot order.
    ///
    /// Missing or empty slots are skipped. A counter that runs past the last
    /// readable slot is trimmed back so the next append does not leave a gap.
    pub fn load_all(&mut self) -> Vec<InventoryRecord> {
        let count = self.count();
        info!("[INVENTORY] Loading up to {} saved slot(s)", count);

        let mut records = Vec::new();
        for slot in self.stored_slots().into_iter().filter(|&slot| slot < count) {
            let sprite_id = self.prefs.get_string(&self.slot_key(slot), "");
            if sprite_id.is_empty() {
                warn!("[INVENTORY] Slot {}: no sprite id saved, skipping", slot);
                continue;
            }
            records.push(InventoryRecord { slot, sprite_id });
        }

        let readable = records.last().map_or(0, |r| r.slot + 1);
        let missing = readable - records.len();
        if missing > 0 {
            warn!("[INVENTORY] {} slot(s) below {} have no saved item", missing, readable);
        }

        if readable < count {
            warn!(
                "[INVENTORY] Counter {} runs past the last readable slot, trimming to {}",
                count, readable
            );
            self.prefs.set_int(&self.count_key, readable as i64);
            if let Err(e) = self.prefs.flush() {
                error!("[INVENTORY] Failed to persist trimmed counter: {}", e);
            }
        }

        records
    }

    /// Delete every key under the slot prefix and reset the counter.
    pub fn clear(&mut self) -> Result<(), InventoryError> {
        let keys = self.prefs.string_keys_with_prefix(&self.slot_prefix);
        for key in &keys {
            self.prefs.delete_key(key);
        }
        self.prefs.delete_key(&self.count_key);
        self.prefs.flush()?;

        info!("[INVENTORY] Cleared {} saved slot(s)", keys.len());
        Ok(())
    }
}
