//! Saved payslip overrides.
//!
//! All overrides live in one document under [`PAYSLIPS_KEY`], a JSON object
//! mapping employee ids to their saved values. Writes touch only the entry
//! being changed; entries that fail to decode are left in the document.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::PayslipOverride;

use super::kv::KeyValueStore;

/// Storage key for saved payslips.
pub const PAYSLIPS_KEY: &str = "payslips";

/// Reads the saved payslips document without decoding its entries.
fn load_document<S: KeyValueStore>(kv: &S) -> EngineResult<Map<String, Value>> {
    match kv.get(PAYSLIPS_KEY)? {
        None => Ok(Map::new()),
        Some(Value::Object(entries)) => Ok(entries),
        Some(_) => Err(EngineError::StorageRead {
            key: PAYSLIPS_KEY.to_string(),
            message: "saved payslips are not an object".to_string(),
        }),
    }
}

/// Reads every saved override, skipping entries that cannot be decoded.
pub(crate) fn load_overrides<S: KeyValueStore>(kv: &S) -> BTreeMap<String, PayslipOverride> {
    let entries = match load_document(kv) {
        Ok(entries) => entries,
        Err(err) => {
            error!(key = PAYSLIPS_KEY, error = %err, "Failed to read saved payslips");
            return BTreeMap::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|(id, value)| match serde_json::from_value(value) {
            Ok(saved) => Some((id, saved)),
            Err(err) => {
                warn!(id = %id, error = %err, "Skipping undecodable saved payslip");
                None
            }
        })
        .collect()
}

/// Read and write access to saved payslips.
pub struct PayslipStore<'a, S> {
    kv: &'a mut S,
}

impl<'a, S: KeyValueStore> PayslipStore<'a, S> {
    /// Wraps a key-value store.
    pub fn new(kv: &'a mut S) -> Self {
        Self { kv }
    }

    /// Returns every saved override keyed by employee id.
    pub fn all(&self) -> BTreeMap<String, PayslipOverride> {
        load_overrides(&*self.kv)
    }

    /// Returns the saved override for an employee, if any.
    pub fn saved(&self, id: &str) -> Option<PayslipOverride> {
        self.all().remove(id)
    }

    /// Saves the override for an employee, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPayslip` if the override fails validation,
    /// `StorageRead` if the existing document cannot be read, and
    /// `StorageWrite` if it cannot be persisted.
    pub fn save(&mut self, id: &str, saved: PayslipOverride) -> EngineResult<()> {
        saved.validate()?;

        let value = serde_json::to_value(&saved).map_err(|e| EngineError::StorageWrite {
            key: PAYSLIPS_KEY.to_string(),
            message: e.to_string(),
        })?;

        let mut document = load_document(&*self.kv)?;
        document.insert(id.to_string(), value);
        self.kv.set(PAYSLIPS_KEY, Value::Object(document))?;

        info!(id, "Saved payslip");
        Ok(())
    }

    /// Deletes the override for an employee.
    ///
    /// # Errors
    ///
    /// Returns `PayslipNotFound` if nothing was saved for `id`.
    pub fn delete(&mut self, id: &str) -> EngineResult<()> {
        let mut document = load_document(&*self.kv)?;
        if document.remove(id).is_none() {
            return Err(EngineError::PayslipNotFound { id: id.to_string() });
        }
        self.kv.set(PAYSLIPS_KEY, Value::Object(document))?;

        info!(id, "Deleted payslip");
        Ok(())
    }

    /// Keeps only the overrides whose id satisfies `keep`; returns how many
    /// were removed.
    pub fn retain<F>(&mut self, mut keep: F) -> EngineResult<usize>
    where
        F: FnMut(&str) -> bool,
    {
        let mut document = load_document(&*self.kv)?;
        let doomed: Vec<String> = document
            .keys()
            .filter(|id| !keep(id.as_str()))
            .cloned()
            .collect();

        if doomed.is_empty() {
            return Ok(0);
        }
        for id in &doomed {
            document.remove(id);
        }
        self.kv.set(PAYSLIPS_KEY, Value::Object(document))?;
        Ok(doomed.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayComponent;
    use crate::store::MemoryStore;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn hra(amount: i64) -> PayslipOverride {
        let mut saved = PayslipOverride::default();
        saved.components.set(PayComponent::Hra, Decimal::new(amount, 0));
        saved
    }

    #[test]
    fn test_save_and_read_back() {
        let mut kv = MemoryStore::new();
        let mut store = PayslipStore::new(&mut kv);

        store.save("EMP001", hra(9000)).unwrap();
        let saved = store.saved("EMP001").unwrap();
        assert_eq!(saved.components.get(PayComponent::Hra), Some(Decimal::new(9000, 0)));
        assert!(store.saved("EMP002").is_none());
    }

    #[test]
    fn test_save_rejects_negative_component() {
        let mut kv = MemoryStore::new();
        let mut store = PayslipStore::new(&mut kv);

        match store.save("EMP001", hra(-1)) {
            Err(EngineError::InvalidPayslip { field, .. }) => assert_eq!(field, "hra"),
            other => panic!("Expected InvalidPayslip, got {:?}", other),
        }
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_delete_missing_returns_not_found() {
        let mut kv = MemoryStore::new();
        let mut store = PayslipStore::new(&mut kv);

        assert!(matches!(
            store.delete("EMP404"),
            Err(EngineError::PayslipNotFound { .. })
        ));

        store.save("EMP001", hra(1)).unwrap();
        store.delete("EMP001").unwrap();
        assert!(store.saved("EMP001").is_none());
    }

    #[test]
    fn test_corrupt_document_reads_as_empty() {
        let mut kv = MemoryStore::new();
        kv.insert_raw(PAYSLIPS_KEY, "not json");
        let store = PayslipStore::new(&mut kv);
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_bad_entries_are_skipped() {
        let mut kv = MemoryStore::new();
        kv.set(
            PAYSLIPS_KEY,
            json!({"EMP001": {"hra": "100"}, "EMP002": {"hra": "lots"}, "EMP003": 7}),
        )
        .unwrap();
        let store = PayslipStore::new(&mut kv);

        let all = store.all();
        assert_eq!(all.len(), 1);
        assert!(all.contains_key("EMP001"));
    }

    #[test]
    fn test_retain_counts_removed() {
        let mut kv = MemoryStore::new();
        let mut store = PayslipStore::new(&mut kv);
        store.save("EMP001", hra(1)).unwrap();
        store.save("EMP002", hra(2)).unwrap();

        let removed = store.retain(|id| id == "EMP001").unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.all().len(), 1);
    }

    #[test]
    fn test_writes_keep_undecodable_entries() {
        let mut kv = MemoryStore::new();
        kv.set(
            PAYSLIPS_KEY,
            json!({"EMP001": {"basic": "abc"}, "EMP002": {"hra": 5}}),
        )
        .unwrap();

        let mut store = PayslipStore::new(&mut kv);
        store.save("EMP003", PayslipOverride::default()).unwrap();
        store.delete("EMP002").unwrap();

        let document = kv.get(PAYSLIPS_KEY).unwrap().unwrap();
        assert_eq!(document["EMP001"], json!({"basic": "abc"}));
        assert!(document.get("EMP002").is_none());
        assert!(document.get("EMP003").is_some());
    }

    #[test]
    fn test_save_leaves_unreadable_document_alone() {
        let mut kv = MemoryStore::new();
        kv.insert_raw(PAYSLIPS_KEY, "not json");

        let mut store = PayslipStore::new(&mut kv);
        assert!(matches!(
            store.save("EMP001", hra(1)),
            Err(EngineError::StorageRead { .. })
        ));
        assert_eq!(kv.raw(PAYSLIPS_KEY), Some("not json"));
    }
}
