use chrono::{DateTime, Local, Timelike};

use super::store::{KvStore, StoreError};

/// How many scores the ledger keeps.
pub const LEDGER_LEN: usize = 3;
/// Local hour from which the once-daily reset may fire.
pub const RESET_HOUR: u32 = 6;

const SCORES_KEY: &str = "top_scores";
const RESET_DATE_KEY: &str = "last_reset_date";

/// The persisted top-score list: at most [`LEDGER_LEN`] entries, sorted
/// descending, cleared once per calendar day at or after [`RESET_HOUR`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLedger {
    scores: Vec<u32>,
}

impl ScoreLedger {
    /// Load the ledger from the store, applying the daily reset policy.
    /// This runs once at startup; a session that plays across the reset
    /// hour keeps its scores until the next launch.
    pub fn load(store: &mut impl KvStore, now: DateTime<Local>) -> Self {
        let today = now.date_naive().to_string();
        let last_reset = store
            .get(RESET_DATE_KEY)
            .unwrap_or_else(|| today.clone());

        if last_reset != today && now.hour() >= RESET_HOUR {
            let _ = store.set(SCORES_KEY, "[]".to_string());
            let _ = store.set(RESET_DATE_KEY, today);
            return Self { scores: Vec::new() };
        }

        // Whatever was stored, re-establish the ledger invariants.
        let mut scores: Vec<u32> = store
            .get(SCORES_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(LEDGER_LEN);

        Self { scores }
    }

    /// The scores, highest first.
    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    /// The best persisted score, if any games have been recorded.
    pub fn best(&self) -> Option<u32> {
        self.scores.first().copied()
    }

    /// Record a finished game and persist the updated ledger.
    pub fn record(&mut self, score: u32, store: &mut impl KvStore) -> Result<(), StoreError> {
        self.scores.push(score);
        self.scores.sort_unstable_by(|a, b| b.cmp(a));
        self.scores.truncate(LEDGER_LEN);

        let raw = serde_json::to_string(&self.scores)?;
        store.set(SCORES_KEY, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scores::store::MemoryStore;
    use chrono::TimeZone;

    fn local(y: i32, m: u32, d: u32, hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_store_loads_empty_ledger() {
        let mut store = MemoryStore::new();
        let ledger = ScoreLedger::load(&mut store, local(2026, 3, 2, 12));

        assert!(ledger.scores().is_empty());
        assert_eq!(ledger.best(), None);
    }

    #[test]
    fn test_record_keeps_top_three_descending() {
        let mut store = MemoryStore::new();
        let mut ledger = ScoreLedger::load(&mut store, local(2026, 3, 2, 12));

        for score in [10, 40, 20, 30] {
            ledger.record(score, &mut store).unwrap();
        }

        assert_eq!(ledger.scores(), &[40, 30, 20]);
        assert_eq!(ledger.best(), Some(40));
        assert_eq!(store.get("top_scores"), Some("[40,30,20]".to_string()));
    }

    #[test]
    fn test_load_round_trip() {
        let mut store = MemoryStore::new();
        let mut ledger = ScoreLedger::load(&mut store, local(2026, 3, 2, 12));
        ledger.record(50, &mut store).unwrap();
        ledger.record(70, &mut store).unwrap();

        let reloaded = ScoreLedger::load(&mut store, local(2026, 3, 2, 18));
        assert_eq!(reloaded.scores(), &[70, 50]);
    }

    #[test]
    fn test_load_sanitizes_stored_scores() {
        let mut store = MemoryStore::new();
        store
            .set("top_scores", "[5,90,10,70]".to_string())
            .unwrap();
        store
            .set("last_reset_date", "2026-03-02".to_string())
            .unwrap();

        let ledger = ScoreLedger::load(&mut store, local(2026, 3, 2, 12));
        assert_eq!(ledger.scores(), &[90, 70, 10]);
    }

    #[test]
    fn test_malformed_scores_degrade_to_empty() {
        let mut store = MemoryStore::new();
        store.set("top_scores", "not json".to_string()).unwrap();
        store
            .set("last_reset_date", "2026-03-02".to_string())
            .unwrap();

        let ledger = ScoreLedger::load(&mut store, local(2026, 3, 2, 12));
        assert!(ledger.scores().is_empty());
    }

    #[test]
    fn test_reset_fires_on_new_day_after_threshold() {
        let mut store = MemoryStore::new();
        store.set("top_scores", "[30,20,10]".to_string()).unwrap();
        store
            .set("last_reset_date", "2026-03-01".to_string())
            .unwrap();

        let ledger = ScoreLedger::load(&mut store, local(2026, 3, 2, 6));

        assert!(ledger.scores().is_empty());
        assert_eq!(store.get("top_scores"), Some("[]".to_string()));
        assert_eq!(store.get("last_reset_date"), Some("2026-03-02".to_string()));
    }

    #[test]
    fn test_no_reset_before_threshold_hour() {
        let mut store = MemoryStore::new();
        store.set("top_scores", "[30,20,10]".to_string()).unwrap();
        store
            .set("last_reset_date", "2026-03-01".to_string())
            .unwrap();

        let ledger = ScoreLedger::load(&mut store, local(2026, 3, 2, 5));

        assert_eq!(ledger.scores(), &[30, 20, 10]);
        assert_eq!(store.get("last_reset_date"), Some("2026-03-01".to_string()));
    }

    #[test]
    fn test_no_reset_on_same_day() {
        let mut store = MemoryStore::new();
        store.set("top_scores", "[30,20,10]".to_string()).unwrap();
        store
            .set("last_reset_date", "2026-03-02".to_string())
            .unwrap();

        let ledger = ScoreLedger::load(&mut store, local(2026, 3, 2, 23));
        assert_eq!(ledger.scores(), &[30, 20, 10]);
    }

    #[test]
    fn test_missing_reset_date_assumes_today() {
        let mut store = MemoryStore::new();
        store.set("top_scores", "[30]".to_string()).unwrap();

        let ledger = ScoreLedger::load(&mut store, local(2026, 3, 2, 23));

        assert_eq!(ledger.scores(), &[30]);
        // Nothing is written until the first reset or recorded game.
        assert_eq!(store.get("last_reset_date"), None);
    }
}
