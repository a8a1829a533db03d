use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

pub(crate) trait StorageKey {
    const KEY: &'static str;
}

/// Fastest winning time, in whole seconds.
pub(crate) struct BestTime;

impl StorageKey for BestTime {
    const KEY: &'static str = "sapper:best-time:v1";
}

pub(crate) trait BestTimeStore {
    fn load(&self) -> Result<Option<u32>>;
    fn save(&mut self, secs: u32) -> Result<()>;
}

/// Stores the best time next to any other keys already present in a JSON object file.
#[derive(Clone, Debug)]
pub(crate) struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, serde_json::Value>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Could not read {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Could not parse {}", self.path.display()))
    }
}

impl BestTimeStore for JsonFileStore {
    fn load(&self) -> Result<Option<u32>> {
        let entries = self.read_entries()?;
        let best = entries
            .get(BestTime::KEY)
            .and_then(serde_json::Value::as_u64)
            .and_then(|secs| u32::try_from(secs).ok())
            // 0 was never a real time, only an unset marker
            .filter(|&secs| secs > 0);
        Ok(best)
    }

    fn save(&mut self, secs: u32) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(BestTime::KEY.to_string(), secs.into());

        let raw = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Could not write {}", self.path.display()))?;
        log::debug!("Saved best time {secs}s to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub(crate) struct MemoryStore {
    pub best: Option<u32>,
}

#[cfg(test)]
impl BestTimeStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>> {
        Ok(self.best.filter(|&secs| secs > 0))
    }

    fn save(&mut self, secs: u32) -> Result<()> {
        self.best = Some(secs);
        Ok(())
    }
}

/// Saves `secs` when it beats the stored time or nothing is stored yet. Returns whether it was saved.
pub(crate) fn record_win(store: &mut impl BestTimeStore, secs: u32) -> Result<bool> {
    match store.load()? {
        Some(best) if best <= secs => Ok(false),
        _ => {
            store.save(secs)?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sapper-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn first_win_is_always_a_record() {
        let mut store = MemoryStore::default();

        assert!(record_win(&mut store, 120).unwrap());
        assert_eq!(store.best, Some(120));
    }

    #[test]
    fn only_strictly_faster_wins_replace_the_record() {
        let mut store = MemoryStore { best: Some(60) };

        assert!(!record_win(&mut store, 60).unwrap());
        assert!(!record_win(&mut store, 75).unwrap());
        assert!(record_win(&mut store, 59).unwrap());
        assert_eq!(store.best, Some(59));
    }

    #[test]
    fn stored_zero_counts_as_unset() {
        let mut store = MemoryStore { best: Some(0) };

        assert!(record_win(&mut store, 300).unwrap());
        assert_eq!(store.best, Some(300));
    }

    #[test]
    fn missing_file_has_no_best_time() {
        let store = JsonFileStore::new(temp_path("missing"));

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn file_store_keeps_unrelated_keys() {
        let path = temp_path("keys");
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();
        let mut store = JsonFileStore::new(&path);

        store.save(42).unwrap();

        assert_eq!(store.load().unwrap(), Some(42));
        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw[BestTime::KEY], 42);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn corrupt_file_is_reported() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::new(&path);

        let err = store.load().unwrap_err();

        assert!(err.to_string().starts_with("Could not parse"));
        fs::remove_file(&path).unwrap();
    }
}
