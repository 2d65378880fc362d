pub mod json;
pub mod md;

use crate::error::Result;
use crate::store::RegradeSummary;
use crate::types::config::{Criteria, Methodology};
use crate::types::report::{BatchReport, GradeStatistics, GradedBill};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

#[derive(Debug, Clone, Serialize)]
pub struct CriteriaReport {
    pub methodology: Methodology,
    pub weights: BTreeMap<String, f64>,
    pub criteria: Criteria,
}

#[derive(Debug, Clone, Copy)]
pub enum Renderable<'a> {
    Grade(&'a GradedBill),
    Batch(&'a BatchReport),
    Statistics(&'a GradeStatistics),
    Criteria(&'a CriteriaReport),
    Regrade(&'a RegradeSummary),
}

pub fn render(item: Renderable<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(match item {
            Renderable::Grade(graded) => json::to_json(graded)?,
            Renderable::Batch(report) => json::to_json(report)?,
            Renderable::Statistics(stats) => json::to_json(stats)?,
            Renderable::Criteria(criteria) => json::to_json(criteria)?,
            Renderable::Regrade(summary) => json::to_json(summary)?,
        }),
        OutputFormat::Md => Ok(match item {
            Renderable::Grade(graded) => md::grade_markdown(graded),
            Renderable::Batch(report) => md::batch_markdown(report),
            Renderable::Statistics(stats) => md::statistics_markdown(stats),
            Renderable::Criteria(criteria) => md::criteria_markdown(criteria),
            Renderable::Regrade(summary) => md::regrade_markdown(summary),
        }),
    }
}
