use crate::analyze::grade::classify;
use crate::analyze::normalize::round1;
use crate::types::config::Methodology;
use crate::types::report::{
    BatchSummary, GradeDistribution, GradeStatistics, GradedBill, StoredGrade,
};
use crate::types::scoring::{Grade, Score};

#[derive(Debug, Default)]
struct Tally {
    count: usize,
    sum: Score,
    distribution: GradeDistribution,
    overrides: usize,
}

impl Tally {
    fn add(&mut self, score: Score, grade: Grade, overridden: bool) {
        self.count += 1;
        self.sum += score;
        self.distribution.record(grade);
        if overridden {
            self.overrides += 1;
        }
    }

    fn average(&self) -> Score {
        if self.count == 0 {
            0.0
        } else {
            round1(self.sum / self.count as f64)
        }
    }

    fn override_percentage(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            round1(self.overrides as f64 / self.count as f64 * 100.0)
        }
    }
}

impl GradeStatistics {
    pub fn from_records<'a, I>(records: I, state: Option<&str>) -> Self
    where
        I: IntoIterator<Item = &'a StoredGrade>,
    {
        let state = state
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_ascii_uppercase);

        let mut tally = Tally::default();
        for record in records {
            if state.is_some() && record.bill.state() != state {
                continue;
            }
            let (score, grade) = record.effective();
            tally.add(score, grade, record.has_override());
        }

        let average_score = tally.average();
        GradeStatistics {
            state_code: state,
            total_bills: tally.count,
            average_score,
            average_grade: classify(average_score),
            grade_distribution: tally.distribution,
            manual_override_count: tally.overrides,
            manual_override_percentage: tally.override_percentage(),
        }
    }
}

impl BatchSummary {
    pub fn from_graded(graded: &[GradedBill], failed: usize, methodology: Methodology) -> Self {
        let mut tally = Tally::default();
        for item in graded {
            tally.add(item.grade.score, item.grade.grade, false);
        }
        let average_score = tally.average();
        BatchSummary {
            total_bills: graded.len() + failed,
            graded: graded.len(),
            failed,
            average_score,
            average_grade: classify(average_score),
            grade_distribution: tally.distribution,
            methodology_used: methodology,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::bill::Bill;
    use crate::types::report::ManualOverride;
    use crate::types::scoring::{FactorDetails, GradeDetails, GradeResult};
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn stored(id: &str, state: &str, score: Score) -> StoredGrade {
        let bill: Bill = serde_json::from_value(serde_json::json!({
            "bill_id": id,
            "state_code": state,
        }))
        .expect("bill should parse");
        let result = GradeResult {
            score,
            grade: classify(score),
            details: GradeDetails::Original(Box::new(FactorDetails {
                keywords: Default::default(),
                status: Default::default(),
                sponsors: Default::default(),
                committees: Default::default(),
                votes: Default::default(),
                subjects: Default::default(),
            })),
            breakdown: BTreeMap::new(),
            weights_used: BTreeMap::new(),
            methodology: Methodology::Original,
            fallback: None,
        };
        StoredGrade::new(bill, result)
    }

    #[test]
    fn statistics_filter_by_state() {
        let records = vec![
            stored("1", "TX", 95.0),
            stored("2", "TX", 45.0),
            stored("3", "tx", 61.0),
            stored("4", "CA", 10.0),
        ];
        let stats = GradeStatistics::from_records(&records, Some("tx"));
        assert_eq!(stats.state_code.as_deref(), Some("TX"));
        assert_eq!(stats.total_bills, 3);
        assert_eq!(stats.average_score, 67.0);
        assert_eq!(stats.average_grade, Grade::D);
        assert_eq!(stats.grade_distribution.count(Grade::A), 1);
        assert_eq!(stats.grade_distribution.count(Grade::F), 1);

        let global = GradeStatistics::from_records(&records, None);
        assert_eq!(global.total_bills, 4);
        assert!(global.state_code.is_none());
    }

    #[test]
    fn overrides_replace_score_and_grade_together() {
        let mut overridden = stored("1", "NY", 40.0);
        overridden.manual_override = Some(ManualOverride {
            manual_score: 85.0,
            manual_grade: Grade::B,
            original_score: 40.0,
            original_grade: Grade::F,
            timestamp: Utc::now(),
            actor: "reviewer".to_string(),
        });
        let records = vec![overridden, stored("2", "NY", 40.0), stored("3", "NY", 40.0)];

        let stats = GradeStatistics::from_records(&records, Some("NY"));
        assert_eq!(stats.grade_distribution.count(Grade::B), 1);
        assert_eq!(stats.grade_distribution.count(Grade::F), 2);
        assert_eq!(stats.average_score, 55.0);
        assert_eq!(stats.manual_override_count, 1);
        assert_eq!(stats.manual_override_percentage, 33.3);
    }

    #[test]
    fn empty_corpus_is_all_zero() {
        let records: Vec<StoredGrade> = Vec::new();
        let stats = GradeStatistics::from_records(&records, Some("WY"));
        assert_eq!(stats.total_bills, 0);
        assert_eq!(stats.average_score, 0.0);
        assert_eq!(stats.average_grade, Grade::F);
        assert_eq!(stats.manual_override_percentage, 0.0);
    }
}
