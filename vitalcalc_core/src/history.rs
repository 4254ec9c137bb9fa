//! Bounded history of past results.
//!
//! Calorie and BMI results live in two independent slots, newest first,
//! each capped at [`HISTORY_LIMIT`] entries. Every operation goes straight
//! to the backing storage: appends and clears write before returning, and
//! reads re-parse the slot each time.

use crate::{BmiResult, CalorieResult, Error, HistoryEntry, Result, SlotStorage};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Maximum number of results kept per slot
pub const HISTORY_LIMIT: usize = 10;

/// Names of the two history slots
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub calorie_slot: String,
    pub bmi_slot: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            calorie_slot: "calorieHistory".into(),
            bmi_slot: "bmiHistory".into(),
        }
    }
}

/// History persistence over a [`SlotStorage`]
#[derive(Debug)]
pub struct HistoryStore<S> {
    storage: S,
    config: StoreConfig,
}

impl<S: SlotStorage> HistoryStore<S> {
    pub fn new(storage: S, config: StoreConfig) -> Self {
        Self { storage, config }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Record a calorie result as the newest entry
    pub fn append_calorie(&mut self, result: &CalorieResult) -> Result<()> {
        let slot = self.config.calorie_slot.clone();
        self.prepend(&slot, result)
    }

    /// Record a BMI result as the newest entry
    pub fn append_bmi(&mut self, result: &BmiResult) -> Result<()> {
        let slot = self.config.bmi_slot.clone();
        self.prepend(&slot, result)
    }

    /// Stored calorie results, newest first
    pub fn calorie_history(&self) -> Vec<CalorieResult> {
        self.read_slot(&self.config.calorie_slot)
    }

    /// Stored BMI results, newest first
    pub fn bmi_history(&self) -> Vec<BmiResult> {
        self.read_slot(&self.config.bmi_slot)
    }

    /// Both histories merged and sorted by timestamp, newest first
    ///
    /// The sort is stable, so entries with identical timestamps keep their
    /// slot order with calorie results ahead of BMI results.
    pub fn load_all(&self) -> Vec<HistoryEntry> {
        let mut entries: Vec<HistoryEntry> = self
            .calorie_history()
            .into_iter()
            .map(HistoryEntry::Calorie)
            .chain(self.bmi_history().into_iter().map(HistoryEntry::Bmi))
            .collect();

        entries.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        entries
    }

    /// True when neither slot holds any result
    pub fn is_empty(&self) -> bool {
        self.calorie_history().is_empty() && self.bmi_history().is_empty()
    }

    /// Drop every stored result
    ///
    /// Callers are expected to have confirmed this with the user. Both slots
    /// are always attempted; if one removal fails the other slot may already
    /// be gone, and the first failure is returned.
    pub fn clear(&mut self) -> Result<()> {
        let mut first_error = None;
        for slot in [self.config.calorie_slot.clone(), self.config.bmi_slot.clone()] {
            if let Err(e) = self.storage.remove(&slot) {
                tracing::warn!("Failed to clear history slot {}: {}", slot, e);
                first_error.get_or_insert_with(|| persistence_error(&slot, e));
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                tracing::info!("Cleared calorie and BMI history");
                Ok(())
            }
        }
    }

    fn prepend<T>(&mut self, slot: &str, record: &T) -> Result<()>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let mut records: Vec<T> = self.read_slot(slot);
        records.insert(0, record.clone());
        records.truncate(HISTORY_LIMIT);

        let contents =
            serde_json::to_string(&records).map_err(|e| persistence_error(slot, e.into()))?;
        self.storage
            .write(slot, &contents)
            .map_err(|e| persistence_error(slot, e))?;

        tracing::debug!("Slot {} now holds {} entries", slot, records.len());
        Ok(())
    }

    /// Read a slot, treating anything unreadable as an empty history
    fn read_slot<T: DeserializeOwned>(&self, slot: &str) -> Vec<T> {
        let contents = match self.storage.read(slot) {
            Ok(Some(contents)) => contents,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Unable to read history slot {}: {}. Using empty history.", slot, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Option<Vec<T>>>(&contents) {
            Ok(records) => records.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse history slot {}: {}. Using empty history.",
                    slot,
                    e
                );
                Vec::new()
            }
        }
    }
}

fn persistence_error(slot: &str, source: Error) -> Error {
    Error::Persistence {
        slot: slot.to_string(),
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileSlotStorage, MemorySlotStorage};
    use crate::{BmiCategory, HeightUnit, WeightUnit};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    fn calorie_at(carbs: f64, minutes: i64) -> CalorieResult {
        CalorieResult {
            carbs,
            protein: 0.0,
            fats: 0.0,
            total_calories: carbs * 4.0,
            carb_calories: carbs * 4.0,
            protein_calories: 0.0,
            fat_calories: 0.0,
            timestamp: base_time() + Duration::minutes(minutes),
        }
    }

    fn bmi_at(weight: f64, minutes: i64) -> BmiResult {
        BmiResult {
            weight,
            height: 1.8,
            weight_unit: WeightUnit::Kg,
            height_unit: HeightUnit::M,
            bmi: weight / (1.8 * 1.8),
            category: BmiCategory::from_bmi(weight / (1.8 * 1.8)),
            timestamp: base_time() + Duration::minutes(minutes),
        }
    }

    fn memory_store() -> HistoryStore<MemorySlotStorage> {
        HistoryStore::new(MemorySlotStorage::new(), StoreConfig::default())
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = memory_store();
        assert!(store.load_all().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_append_is_newest_first() {
        let mut store = memory_store();
        store.append_calorie(&calorie_at(1.0, 0)).unwrap();
        store.append_calorie(&calorie_at(2.0, 1)).unwrap();

        let history = store.calorie_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].carbs, 2.0);
        assert_eq!(history[1].carbs, 1.0);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut store = memory_store();
        for i in 0..11 {
            store.append_calorie(&calorie_at(i as f64 + 1.0, i)).unwrap();
        }

        let history = store.calorie_history();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].carbs, 11.0);
        assert!(history.iter().all(|r| r.carbs != 1.0), "oldest entry should be evicted");
        assert_eq!(store.load_all()[0].as_calorie().unwrap().carbs, 11.0);
    }

    #[test]
    fn test_slots_are_capped_independently() {
        let mut store = memory_store();
        for i in 0..12 {
            store.append_bmi(&bmi_at(60.0 + i as f64, i)).unwrap();
        }
        store.append_calorie(&calorie_at(5.0, 100)).unwrap();

        assert_eq!(store.bmi_history().len(), HISTORY_LIMIT);
        assert_eq!(store.calorie_history().len(), 1);
        assert_eq!(store.load_all().len(), HISTORY_LIMIT + 1);
    }

    #[test]
    fn test_insertion_order_not_resorted_on_write() {
        let mut store = memory_store();
        // Appended newer timestamp first, older second
        store.append_calorie(&calorie_at(1.0, 50)).unwrap();
        store.append_calorie(&calorie_at(2.0, 10)).unwrap();

        let history = store.calorie_history();
        assert_eq!(history[0].carbs, 2.0);
        assert_eq!(history[1].carbs, 1.0);
    }

    #[test]
    fn test_load_all_sorted_across_types() {
        let mut store = memory_store();
        store.append_calorie(&calorie_at(1.0, 0)).unwrap();
        store.append_bmi(&bmi_at(70.0, 5)).unwrap();
        store.append_calorie(&calorie_at(2.0, 10)).unwrap();
        store.append_bmi(&bmi_at(71.0, 15)).unwrap();
        // Older than everything, appended last
        store.append_calorie(&calorie_at(3.0, -30)).unwrap();

        let all = store.load_all();
        assert_eq!(all.len(), 5);
        for pair in all.windows(2) {
            assert!(pair[0].timestamp() >= pair[1].timestamp());
        }
        assert_eq!(all[0].as_bmi().unwrap().weight, 71.0);
        assert_eq!(all[4].as_calorie().unwrap().carbs, 3.0);
    }

    #[test]
    fn test_ties_keep_calorie_before_bmi() {
        let mut store = memory_store();
        store.append_bmi(&bmi_at(70.0, 0)).unwrap();
        store.append_calorie(&calorie_at(1.0, 0)).unwrap();

        let all = store.load_all();
        assert!(all[0].as_calorie().is_some());
        assert!(all[1].as_bmi().is_some());
    }

    #[test]
    fn test_clear_empties_both_slots() {
        let mut store = memory_store();
        store.append_calorie(&calorie_at(1.0, 0)).unwrap();
        store.append_bmi(&bmi_at(70.0, 1)).unwrap();

        store.clear().unwrap();

        assert!(store.load_all().is_empty());
        assert!(store.calorie_history().is_empty());
        assert!(store.bmi_history().is_empty());
    }

    #[test]
    fn test_corrupted_slot_reads_as_empty() {
        let mut storage = MemorySlotStorage::new();
        storage.write("calorieHistory", "{ invalid json }").unwrap();
        let mut store = HistoryStore::new(storage, StoreConfig::default());
        store.append_bmi(&bmi_at(70.0, 0)).unwrap();

        assert!(store.calorie_history().is_empty());
        assert_eq!(store.load_all().len(), 1);
    }

    #[test]
    fn test_null_slot_reads_as_empty() {
        let mut storage = MemorySlotStorage::new();
        storage.write("bmiHistory", "null").unwrap();
        let store = HistoryStore::new(storage, StoreConfig::default());

        assert!(store.bmi_history().is_empty());
    }

    #[test]
    fn test_append_after_corruption_rewrites_valid_slot() {
        let mut storage = MemorySlotStorage::new();
        storage.write("calorieHistory", "[{\"broken\":").unwrap();
        let mut store = HistoryStore::new(storage, StoreConfig::default());

        store.append_calorie(&calorie_at(4.0, 0)).unwrap();

        let raw = store.storage().read("calorieHistory").unwrap().unwrap();
        let parsed: Vec<CalorieResult> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].carbs, 4.0);
    }

    #[test]
    fn test_custom_slot_names() {
        let config = StoreConfig {
            calorie_slot: "meals".into(),
            bmi_slot: "body".into(),
        };
        let mut store = HistoryStore::new(MemorySlotStorage::new(), config);
        store.append_calorie(&calorie_at(1.0, 0)).unwrap();

        assert!(store.storage().read("meals").unwrap().is_some());
        assert!(store.storage().read("calorieHistory").unwrap().is_none());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut store =
            HistoryStore::new(FileSlotStorage::new(temp_dir.path()), StoreConfig::default());
        store.append_calorie(&calorie_at(9.0, 0)).unwrap();
        store.append_bmi(&bmi_at(80.0, 1)).unwrap();
        drop(store);

        let reopened =
            HistoryStore::new(FileSlotStorage::new(temp_dir.path()), StoreConfig::default());
        let all = reopened.load_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].as_bmi().unwrap().weight, 80.0);
        assert_eq!(all[1].as_calorie().unwrap().carbs, 9.0);
    }

    #[test]
    fn test_file_store_corrupted_file_reads_as_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("bmiHistory.json"), "{ invalid json }}}}").unwrap();

        let store =
            HistoryStore::new(FileSlotStorage::new(temp_dir.path()), StoreConfig::default());
        assert!(store.bmi_history().is_empty());
    }

    #[test]
    fn test_reads_records_written_by_browser_version() {
        let mut storage = MemorySlotStorage::new();
        storage
            .write(
                "bmiHistory",
                r#"[{"weight":154,"height":5.9,"weightUnit":"lbs","heightUnit":"ft","bmi":21.8,"category":"Normal weight","timestamp":"2024-05-01T10:15:00.000Z"}]"#,
            )
            .unwrap();
        let store = HistoryStore::new(storage, StoreConfig::default());

        let history = store.bmi_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].weight_unit, WeightUnit::Lbs);
        assert_eq!(history[0].height_unit, HeightUnit::Ft);
        assert_eq!(history[0].category, BmiCategory::Normal);
    }

    struct FailingWrites;

    impl SlotStorage for FailingWrites {
        fn read(&self, _slot: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn write(&mut self, _slot: &str, _contents: &str) -> Result<()> {
            Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }

        fn remove(&mut self, _slot: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_surfaced() {
        let mut store = HistoryStore::new(FailingWrites, StoreConfig::default());
        let err = store.append_calorie(&calorie_at(1.0, 0)).unwrap_err();

        match err {
            Error::Persistence { slot, .. } => assert_eq!(slot, "calorieHistory"),
            other => panic!("expected persistence error, got {:?}", other),
        }
    }

    /// Memory storage whose removal of one slot always fails
    struct StuckSlot {
        inner: MemorySlotStorage,
        stuck: &'static str,
    }

    impl SlotStorage for StuckSlot {
        fn read(&self, slot: &str) -> Result<Option<String>> {
            self.inner.read(slot)
        }

        fn write(&mut self, slot: &str, contents: &str) -> Result<()> {
            self.inner.write(slot, contents)
        }

        fn remove(&mut self, slot: &str) -> Result<()> {
            if slot == self.stuck {
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "locked",
                )));
            }
            self.inner.remove(slot)
        }
    }

    fn store_with_stuck_slot(stuck: &'static str) -> HistoryStore<StuckSlot> {
        let storage = StuckSlot {
            inner: MemorySlotStorage::new(),
            stuck,
        };
        let mut store = HistoryStore::new(storage, StoreConfig::default());
        store.append_calorie(&calorie_at(1.0, 0)).unwrap();
        store.append_bmi(&bmi_at(70.0, 1)).unwrap();
        store
    }

    #[test]
    fn test_clear_reports_failed_slot_and_still_clears_the_other() {
        let mut store = store_with_stuck_slot("calorieHistory");

        match store.clear().unwrap_err() {
            Error::Persistence { slot, .. } => assert_eq!(slot, "calorieHistory"),
            other => panic!("expected persistence error, got {:?}", other),
        }

        assert!(store.bmi_history().is_empty());
        assert_eq!(store.calorie_history().len(), 1);
    }

    #[test]
    fn test_clear_failure_on_second_slot() {
        let mut store = store_with_stuck_slot("bmiHistory");

        match store.clear().unwrap_err() {
            Error::Persistence { slot, .. } => assert_eq!(slot, "bmiHistory"),
            other => panic!("expected persistence error, got {:?}", other),
        }

        assert!(store.calorie_history().is_empty());
        assert_eq!(store.bmi_history().len(), 1);
    }
}
