//! Shared server state

use std::sync::{Arc, Mutex};

use crate::application::ports::BeatAnalyzer;
use crate::domain::analysis::AnalysisResult;

/// State shared across request handlers.
///
/// `last_result` is the session's transient result slot: a single slot,
/// overwritten by each successful analysis, cleared when the process ends.
/// Nothing is persisted durably.
#[derive(Clone)]
pub struct ServerState {
    pub analyzer: Arc<dyn BeatAnalyzer>,
    pub last_result: Arc<Mutex<Option<AnalysisResult>>>,
}

impl ServerState {
    /// Create server state around an analyzer strategy
    pub fn new(analyzer: Arc<dyn BeatAnalyzer>) -> Self {
        Self {
            analyzer,
            last_result: Arc::new(Mutex::new(None)),
        }
    }

    /// Overwrite the result slot with a fresh analysis
    pub fn store_result(&self, result: AnalysisResult) {
        if let Ok(mut slot) = self.last_result.lock() {
            *slot = Some(result);
        }
    }

    /// Read the current result slot
    pub fn latest_result(&self) -> Option<AnalysisResult> {
        self.last_result.lock().ok().and_then(|slot| slot.clone())
    }
}
