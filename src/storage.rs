use crate::errors::StorageError;
use crate::models::{parse_number, DayEntry, OutcomeVariant};
use crate::store::DayStore;
use serde_json::Value;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{debug, error, warn};

pub const STORAGE_KEY: &str = "tracker-day-data-v1";

/// Outcome of a best-effort save. The in-memory store stays authoritative either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    Failed(String),
}

impl SaveStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved)
    }
}

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("JOURNAL_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from(format!("data/{STORAGE_KEY}.json")))
}

pub async fn load_store(path: &Path) -> DayStore {
    match fs::read(path).await {
        Ok(bytes) => decode_store(&bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => DayStore::default(),
        Err(err) => {
            error!("failed to read journal file: {err}");
            DayStore::default()
        }
    }
}

pub async fn save_store(path: &Path, store: &DayStore) -> SaveStatus {
    match write_store(path, store).await {
        Ok(()) => {
            debug!(entries = store.len(), "journal saved");
            SaveStatus::Saved
        }
        Err(err) => {
            warn!("journal not saved, keeping in-memory state: {err}");
            SaveStatus::Failed(err.to_string())
        }
    }
}

async fn write_store(path: &Path, store: &DayStore) -> Result<(), StorageError> {
    let payload = encode_store(store)?;
    fs::write(path, payload).await?;
    Ok(())
}

pub fn encode_store(store: &DayStore) -> Result<Vec<u8>, StorageError> {
    Ok(serde_json::to_vec_pretty(store)?)
}

/// Reads a persisted payload, dropping whatever cannot be understood.
///
/// Records without a usable `variant` fall back to the legacy `result` field
/// (`-1` is negative, anything else positive). `result` is always recomputed
/// and a missing, negative or non-numeric `deposit` becomes 0.
pub fn decode_store(bytes: &[u8]) -> DayStore {
    let mut store = DayStore::default();
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return store;
    }

    let parsed: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(err) => {
            warn!("ignoring malformed journal payload: {err}");
            return store;
        }
    };

    let Value::Object(records) = parsed else {
        warn!("ignoring journal payload that is not an object");
        return store;
    };

    for (date_key, record) in records {
        match decode_entry(&record) {
            Some(entry) => store.insert_loaded(date_key, entry),
            None => warn!(%date_key, "dropping malformed journal entry"),
        }
    }

    store
}

fn decode_entry(record: &Value) -> Option<DayEntry> {
    let fields = record.as_object()?;

    let legacy_negative = fields
        .get("result")
        .and_then(coerce_number)
        .is_some_and(|result| result == -1.0);

    let variant = fields
        .get("variant")
        .and_then(Value::as_str)
        .and_then(OutcomeVariant::parse)
        .unwrap_or(if legacy_negative {
            OutcomeVariant::Negative
        } else {
            OutcomeVariant::Positive
        });

    let deposit = fields
        .get("deposit")
        .and_then(coerce_number)
        .filter(|deposit| deposit.is_finite() && *deposit >= 0.0)
        .unwrap_or(0.0);

    Some(DayEntry::new(variant, deposit))
}

// Same leniency as a browser's numeric coercion of stored values. Numbers keep
// their source text, so an out-of-range literal becomes infinite instead of
// failing the whole payload.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::Number(number) => parse_number(&number.to_string()),
        Value::String(text) if text.trim().is_empty() => Some(0.0),
        Value::String(text) => parse_number(text),
        Value::Array(_) | Value::Object(_) => None,
    }
}
