use crate::report::CriteriaReport;
use crate::store::RegradeSummary;
use crate::types::report::{BatchReport, GradeDistribution, GradeStatistics, GradedBill};
use crate::types::scoring::{FactorScore, Grade, GradeDetails, ImpactDetail};

pub fn grade_markdown(graded: &GradedBill) -> String {
    let result = &graded.grade;
    let mut output = String::new();
    output.push_str(&format!("# Grade: {}\n\n", graded.bill.bill_id));
    if let Some(title) = graded.bill.title.as_deref() {
        output.push_str(&format!("{title}\n\n"));
    }
    output.push_str(&format!(
        "Score: {:.1} ({})\n\nMethodology: {}\n\n",
        result.score, result.grade, result.methodology
    ));
    if let Some(reason) = result.fallback.as_deref() {
        output.push_str(&format!("Fallback: {reason}\n\n"));
    }

    match &result.details {
        GradeDetails::Original(details) => {
            output.push_str("## Factors\n\n");
            output.push_str("| Factor | Raw | Normalized | Weighted | Weight |\n");
            output.push_str("|---|---|---|---|---|\n");
            let rows: [(&str, &FactorScore); 5] = [
                ("keywords", &details.keywords.score),
                ("status", &details.status.score),
                ("sponsors", &details.sponsors.score),
                ("committees", &details.committees.score),
                ("votes", &details.votes.score),
            ];
            for (name, score) in rows {
                let weight = result.weights_used.get(name).copied().unwrap_or_default();
                output.push_str(&format!(
                    "| {name} | {} | {:.1} | {:.1} | {weight:.1} |\n",
                    score.raw_score, score.normalized_score, score.weighted_score
                ));
            }
            output.push('\n');

            output.push_str("## Matches\n\n");
            output.push_str(&format!(
                "- positive keywords: {}\n- negative keywords: {}\n- committees: {}\n",
                list_or_none(&details.keywords.positive_matches),
                list_or_none(&details.keywords.negative_matches),
                list_or_none(&details.committees.matched_committees),
            ));
            let notes: Vec<&str> = [
                details.keywords.note.as_deref(),
                details.sponsors.note.as_deref(),
                details.committees.note.as_deref(),
                details.votes.note.as_deref(),
            ]
            .into_iter()
            .flatten()
            .collect();
            for note in notes {
                output.push_str(&format!("- note: {note}\n"));
            }
        }
        GradeDetails::CensusBased(details) => {
            output.push_str("## Demographic Impact\n\n");
            output.push_str("| Impact | Score | Weight |\n|---|---|---|\n");
            let rows: [(&str, &ImpactDetail); 3] = [
                ("racial", &details.racial_impact),
                ("income", &details.income_impact),
                ("state", &details.state_impact),
            ];
            for (name, impact) in rows {
                output.push_str(&format!(
                    "| {name} | {:.1} | {:.0} |\n",
                    impact.score, impact.weight
                ));
            }
            if let Some(average) = result.breakdown.get("weighted_average") {
                output.push_str(&format!("\nWeighted average: {average:.1}\n"));
            }
        }
    }
    output
}

pub fn batch_markdown(report: &BatchReport) -> String {
    let stats = &report.statistics;
    let mut output = String::new();
    output.push_str("# Batch Grades\n\n");
    output.push_str(&format!(
        "Bills: {} (graded {}, failed {})\n\nAverage: {:.1} ({})\n\nMethodology: {}\n\n",
        stats.total_bills,
        stats.graded,
        stats.failed,
        stats.average_score,
        stats.average_grade,
        stats.methodology_used
    ));
    output.push_str(&distribution_markdown(&stats.grade_distribution));

    output.push_str("## Bills\n\n");
    if report.individual_grades.is_empty() {
        output.push_str("- none\n\n");
    } else {
        output.push_str("| Bill | State | Score | Grade |\n|---|---|---|---|\n");
        for item in &report.individual_grades {
            output.push_str(&format!(
                "| {} | {} | {:.1} | {} |\n",
                item.bill.bill_id,
                item.bill.state().unwrap_or_else(|| "-".to_string()),
                item.grade.score,
                item.grade.grade
            ));
        }
        output.push('\n');
    }

    output.push_str("## Errors\n\n");
    if report.errors.is_empty() {
        output.push_str("- none\n");
    } else {
        for error in &report.errors {
            output.push_str(&format!("- {}: {}\n", error.bill_id, error.error));
        }
    }
    output
}

pub fn statistics_markdown(stats: &GradeStatistics) -> String {
    let mut output = String::new();
    match stats.state_code.as_deref() {
        Some(state) => output.push_str(&format!("# Grade Statistics: {state}\n\n")),
        None => output.push_str("# Grade Statistics\n\n"),
    }
    output.push_str(&format!(
        "Bills: {}\n\nAverage: {:.1} ({})\n\nManual overrides: {} ({:.1}%)\n\n",
        stats.total_bills,
        stats.average_score,
        stats.average_grade,
        stats.manual_override_count,
        stats.manual_override_percentage
    ));
    output.push_str(&distribution_markdown(&stats.grade_distribution));
    output
}

pub fn criteria_markdown(report: &CriteriaReport) -> String {
    let mut output = String::new();
    output.push_str("# Grading Criteria\n\n");
    output.push_str(&format!("Methodology: {}\n\n", report.methodology));
    output.push_str("## Factor Weights\n\n");
    for (factor, weight) in &report.weights {
        output.push_str(&format!("- {factor}: {weight:.1}\n"));
    }
    for (title, table) in [
        ("Positive Keywords", &report.criteria.positive_keywords),
        ("Negative Keywords", &report.criteria.negative_keywords),
        ("Subject Weights", &report.criteria.subject_weights),
    ] {
        output.push_str(&format!("\n## {title}\n\n"));
        for (key, value) in table {
            output.push_str(&format!("- {key}: {value}\n"));
        }
    }
    output
}

pub fn regrade_markdown(summary: &RegradeSummary) -> String {
    let mut output = String::new();
    output.push_str("# Regrade\n\n");
    output.push_str(&format!(
        "Regraded: {}\n\nFailed: {}\n",
        summary.regraded,
        summary.errors.len()
    ));
    for error in &summary.errors {
        output.push_str(&format!("- {}: {}\n", error.bill_id, error.error));
    }
    output
}

fn distribution_markdown(distribution: &GradeDistribution) -> String {
    let mut output = String::from("## Distribution\n\n");
    for grade in Grade::ALL {
        output.push_str(&format!("- {grade}: {}\n", distribution.count(grade)));
    }
    output.push('\n');
    output
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
