use crate::analyze::{ContextSource, Grader};
use crate::types::bill::Bill;
use crate::types::report::{BatchItemError, BatchReport, BatchSummary, GradedBill};
use tracing::{info, warn};

pub fn grade_batch(grader: &Grader, bills: &[Bill], context: &dyn ContextSource) -> BatchReport {
    let mut individual_grades = Vec::with_capacity(bills.len());
    let mut errors = Vec::new();

    for bill in bills {
        match grader.grade(bill, context) {
            Ok(grade) => individual_grades.push(GradedBill {
                bill: bill.clone(),
                grade,
            }),
            Err(err) => {
                warn!(bill_id = %bill.bill_id, error = %err, "bill failed to grade");
                errors.push(BatchItemError {
                    bill_id: bill.bill_id.clone(),
                    error: err.to_string(),
                });
            }
        }
    }

    let statistics =
        BatchSummary::from_graded(&individual_grades, errors.len(), grader.methodology());
    info!(
        total = statistics.total_bills,
        graded = statistics.graded,
        failed = statistics.failed,
        average_score = statistics.average_score,
        "batch graded"
    );

    BatchReport {
        individual_grades,
        errors,
        statistics,
    }
}

pub fn record_failures(report: &mut BatchReport, failures: Vec<BatchItemError>) {
    if failures.is_empty() {
        return;
    }
    report.statistics.failed += failures.len();
    report.statistics.total_bills += failures.len();
    report.errors.extend(failures);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::EmptyContext;
    use crate::types::config::{BalancingConfig, GraderConfig};
    use crate::types::scoring::Grade;

    fn grader() -> Grader {
        let config = GraderConfig {
            balancing: BalancingConfig {
                jitter: false,
                seed: None,
            },
            ..GraderConfig::default()
        };
        Grader::new(&config).expect("default config should be valid")
    }

    fn bill(id: &str, state: &str, title: &str) -> Bill {
        serde_json::from_value(serde_json::json!({
            "bill_id": id,
            "state_code": state,
            "title": title,
            "status": 4,
        }))
        .expect("bill should parse")
    }

    #[test]
    fn one_bad_bill_does_not_abort_the_batch() {
        let bills = vec![
            bill("TX-1", "TX", "Expungement and reentry"),
            bill("TX-2", "Texas", "Drug court"),
            bill("TX-3", "TX", "Three strikes"),
            bill("TX-4", "TX", ""),
        ];
        let report = grade_batch(&grader(), &bills, &EmptyContext);

        assert_eq!(report.individual_grades.len(), 3);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].bill_id, "TX-2");
        assert!(report.errors[0].error.contains("2-letter"));

        let ids: Vec<&str> = report
            .individual_grades
            .iter()
            .map(|item| item.bill.bill_id.as_str())
            .collect();
        assert_eq!(ids, vec!["TX-1", "TX-3", "TX-4"]);

        assert_eq!(report.statistics.total_bills, 4);
        assert_eq!(report.statistics.graded, 3);
        assert_eq!(report.statistics.failed, 1);
        assert_eq!(report.statistics.grade_distribution.total(), 3);
    }

    #[test]
    fn summary_averages_successful_grades() {
        let bills = vec![bill("A-1", "CA", "Reform"), bill("A-2", "CA", "Reform")];
        let report = grade_batch(&grader(), &bills, &EmptyContext);
        let first = report.individual_grades[0].grade.score;
        assert_eq!(report.statistics.average_score, first);
        assert_eq!(report.statistics.grade_distribution.count(Grade::F), 2);
        assert_eq!(
            report.statistics.average_grade,
            crate::analyze::grade::classify(first)
        );
    }

    #[test]
    fn load_failures_count_toward_totals() {
        let mut report = grade_batch(&grader(), &[bill("A-1", "CA", "Reform")], &EmptyContext);
        record_failures(
            &mut report,
            vec![BatchItemError {
                bill_id: "broken.json".to_string(),
                error: "expected value".to_string(),
            }],
        );
        assert_eq!(report.statistics.total_bills, 2);
        assert_eq!(report.statistics.failed, 1);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn empty_batch_yields_empty_summary() {
        let report = grade_batch(&grader(), &[], &EmptyContext);
        assert!(report.individual_grades.is_empty());
        assert_eq!(report.statistics.total_bills, 0);
        assert_eq!(report.statistics.average_grade, Grade::F);
    }
}
