use crate::types::bill::Bill;
use crate::types::config::Methodology;
use crate::types::scoring::{Grade, GradeResult, Score};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeDistribution {
    #[serde(rename = "A")]
    pub a: usize,
    #[serde(rename = "B")]
    pub b: usize,
    #[serde(rename = "C")]
    pub c: usize,
    #[serde(rename = "D")]
    pub d: usize,
    #[serde(rename = "F")]
    pub f: usize,
}

impl GradeDistribution {
    pub fn record(&mut self, grade: Grade) {
        *self.slot(grade) += 1;
    }

    pub fn count(&self, grade: Grade) -> usize {
        match grade {
            Grade::A => self.a,
            Grade::B => self.b,
            Grade::C => self.c,
            Grade::D => self.d,
            Grade::F => self.f,
        }
    }

    pub fn total(&self) -> usize {
        Grade::ALL.iter().map(|grade| self.count(*grade)).sum()
    }

    fn slot(&mut self, grade: Grade) -> &mut usize {
        match grade {
            Grade::A => &mut self.a,
            Grade::B => &mut self.b,
            Grade::C => &mut self.c,
            Grade::D => &mut self.d,
            Grade::F => &mut self.f,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeStatistics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    pub total_bills: usize,
    pub average_score: Score,
    pub average_grade: Grade,
    pub grade_distribution: GradeDistribution,
    pub manual_override_count: usize,
    pub manual_override_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualOverride {
    pub manual_score: Score,
    pub manual_grade: Grade,
    pub original_score: Score,
    pub original_grade: Grade,
    pub timestamp: DateTime<Utc>,
    pub actor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredGrade {
    pub bill: Bill,
    pub result: GradeResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_override: Option<ManualOverride>,
    pub processed_at: DateTime<Utc>,
}

impl StoredGrade {
    pub fn new(bill: Bill, result: GradeResult) -> Self {
        Self {
            bill,
            result,
            manual_override: None,
            processed_at: Utc::now(),
        }
    }

    pub fn bill_id(&self) -> &str {
        &self.bill.bill_id
    }

    pub fn effective(&self) -> (Score, Grade) {
        match &self.manual_override {
            Some(manual) => (manual.manual_score, manual.manual_grade),
            None => (self.result.score, self.result.grade),
        }
    }

    pub fn has_override(&self) -> bool {
        self.manual_override.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedBill {
    pub bill: Bill,
    pub grade: GradeResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItemError {
    pub bill_id: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_bills: usize,
    pub graded: usize,
    pub failed: usize,
    pub average_score: Score,
    pub average_grade: Grade,
    pub grade_distribution: GradeDistribution,
    pub methodology_used: Methodology,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub individual_grades: Vec<GradedBill>,
    pub errors: Vec<BatchItemError>,
    pub statistics: BatchSummary,
}
