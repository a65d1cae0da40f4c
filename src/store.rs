use crate::errors::StoreError;
use crate::models::{DayEntry, OutcomeVariant};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Date-key to entry mapping. Source of truth for every derived view.
///
/// Keys are `YYYY-MM-DD`, so string order is chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayStore {
    days: BTreeMap<String, DayEntry>,
}

impl DayStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(
        &mut self,
        date_key: impl Into<String>,
        variant: OutcomeVariant,
        deposit: f64,
    ) -> Result<&DayEntry, StoreError> {
        if !deposit.is_finite() || deposit < 0.0 {
            return Err(StoreError::InvalidDeposit(deposit));
        }

        let date_key = date_key.into();
        self.days
            .insert(date_key.clone(), DayEntry::new(variant, deposit));
        Ok(&self.days[&date_key])
    }

    pub fn get(&self, date_key: &str) -> Option<&DayEntry> {
        self.days.get(date_key)
    }

    pub fn all_sorted_by_date(&self) -> impl Iterator<Item = (&str, &DayEntry)> {
        self.days.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    // Loader path: entries were already normalised by the storage layer.
    pub(crate) fn insert_loaded(&mut self, date_key: String, entry: DayEntry) {
        self.days.insert(date_key, entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_then_get_keeps_variant_mapping_and_deposit() {
        let mut store = DayStore::new();
        for (variant, result) in [
            (OutcomeVariant::Positive, 1),
            (OutcomeVariant::PositiveOutline, 1),
            (OutcomeVariant::Negative, -1),
        ] {
            store.upsert("2024-03-01", variant, 12.5).unwrap();
            let entry = store.get("2024-03-01").unwrap();
            assert_eq!(entry.variant, variant);
            assert_eq!(entry.result, result);
            assert_eq!(entry.deposit, 12.5);
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn upsert_rejects_negative_and_non_finite_deposits() {
        let mut store = DayStore::new();
        assert_eq!(
            store.upsert("2024-03-01", OutcomeVariant::Positive, -1.0),
            Err(StoreError::InvalidDeposit(-1.0))
        );
        assert!(store
            .upsert("2024-03-01", OutcomeVariant::Positive, f64::INFINITY)
            .is_err());
        assert!(store
            .upsert("2024-03-01", OutcomeVariant::Positive, f64::NAN)
            .is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn entries_come_back_in_date_order() {
        let mut store = DayStore::new();
        store.upsert("2024-03-10", OutcomeVariant::Negative, 0.0).unwrap();
        store.upsert("2023-12-31", OutcomeVariant::Positive, 0.0).unwrap();
        store.upsert("2024-01-02", OutcomeVariant::Positive, 0.0).unwrap();

        let keys: Vec<&str> = store.all_sorted_by_date().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["2023-12-31", "2024-01-02", "2024-03-10"]);
    }
}
