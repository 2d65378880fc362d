pub mod json_file;

pub use json_file::JsonFileStore;

use crate::analyze::{ContextSource, Grader};
use crate::error::{GraderError, Result};
use crate::types::demographics::{DemographicProfile, DemographicTable};
use crate::types::report::{BatchItemError, GradeStatistics, ManualOverride, StoredGrade};
use crate::types::scoring::{Grade, Score};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

pub trait GradeStore {
    /// Replaces the whole record for its bill id. A manual override already
    /// on file survives the replace.
    fn upsert(&mut self, record: StoredGrade) -> Result<()>;

    fn get(&self, bill_id: &str) -> Option<StoredGrade>;

    fn records(&self, state: Option<&str>) -> Vec<StoredGrade>;

    fn set_override(&mut self, bill_id: &str, manual: ManualOverride) -> Result<()>;

    fn clear_override(&mut self, bill_id: &str) -> Result<()>;

    fn statistics(&self, state: Option<&str>) -> GradeStatistics {
        GradeStatistics::from_records(&self.records(state), state)
    }
}

pub fn manual_override(
    record: &StoredGrade,
    score: Score,
    grade: Grade,
    actor: &str,
) -> Result<ManualOverride> {
    if !score.is_finite() || !(0.0..=100.0).contains(&score) {
        return Err(GraderError::InvalidGrade(format!(
            "score {score} is outside 0-100"
        )));
    }
    Ok(ManualOverride {
        manual_score: score,
        manual_grade: grade,
        original_score: record.result.score,
        original_grade: record.result.grade,
        timestamp: Utc::now(),
        actor: actor.to_string(),
    })
}

pub struct StoreContext<'a> {
    store: &'a dyn GradeStore,
    demographics: &'a DemographicTable,
}

impl<'a> StoreContext<'a> {
    pub fn new(store: &'a dyn GradeStore, demographics: &'a DemographicTable) -> Self {
        Self {
            store,
            demographics,
        }
    }
}

impl ContextSource for StoreContext<'_> {
    fn history(&self, state: &str) -> Option<GradeStatistics> {
        Some(self.store.statistics(Some(state)))
    }

    fn demographics(&self, state: &str) -> Option<DemographicProfile> {
        self.demographics.get(state).cloned()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegradeSummary {
    pub regraded: usize,
    pub errors: Vec<BatchItemError>,
}

/// Re-runs the engine over every stored bill snapshot. History is read from
/// the store as it was before the first new result is written.
pub fn regrade(
    store: &mut dyn GradeStore,
    grader: &Grader,
    demographics: &DemographicTable,
) -> Result<RegradeSummary> {
    let records = store.records(None);
    let mut fresh = Vec::with_capacity(records.len());
    let mut summary = RegradeSummary::default();
    {
        let context = StoreContext::new(&*store, demographics);
        for record in records {
            match grader.grade(&record.bill, &context) {
                Ok(result) => fresh.push(StoredGrade::new(record.bill, result)),
                Err(err) => {
                    warn!(bill_id = %record.bill.bill_id, error = %err, "bill failed to regrade");
                    summary.errors.push(BatchItemError {
                        bill_id: record.bill.bill_id.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }
    }

    for record in fresh {
        store.upsert(record)?;
        summary.regraded += 1;
    }
    info!(
        regraded = summary.regraded,
        failed = summary.errors.len(),
        "regrade finished"
    );
    Ok(summary)
}
