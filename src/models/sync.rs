use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SyncStats: Outcome of one catalog synchronization run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStats {
    pub total_cards_processed: usize,
    pub new_cards_added: usize,
    pub cards_updated: usize,
    /// One message per set that could not be fetched, in processing order.
    pub errors: Vec<String>,
}

impl SyncStats {
    pub fn record_set_failure(&mut self, set_id: &str, err: impl std::fmt::Display) {
        self.errors.push(format!("Error processing set {set_id}: {err}"));
    }
}
