pub mod balance;
pub mod batch;
pub mod census;
pub mod committees;
pub mod grade;
pub mod keywords;
pub mod normalize;
pub mod sponsors;
pub mod status;
pub mod votes;

use crate::error::Result;
use crate::types::bill::Bill;
use crate::types::config::{
    BalancingConfig, Criteria, Factor, FactorWeights, GraderConfig, Methodology,
};
use crate::types::demographics::{DemographicProfile, DemographicTable};
use crate::types::report::GradeStatistics;
use crate::types::scoring::{
    CensusDetails, FactorDetails, GradeDetails, GradeResult, SubjectDetail,
};
use normalize::{combine, round1, weigh};
use rand_core::RngCore;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

pub trait ContextSource {
    fn history(&self, state: &str) -> Option<GradeStatistics>;
    fn demographics(&self, state: &str) -> Option<DemographicProfile>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyContext;

impl ContextSource for EmptyContext {
    fn history(&self, _state: &str) -> Option<GradeStatistics> {
        None
    }

    fn demographics(&self, _state: &str) -> Option<DemographicProfile> {
        None
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticContext {
    history: HashMap<String, GradeStatistics>,
    demographics: DemographicTable,
}

impl StaticContext {
    pub fn new(demographics: DemographicTable) -> Self {
        Self {
            history: HashMap::new(),
            demographics,
        }
    }

    pub fn with_history(mut self, state: &str, stats: GradeStatistics) -> Self {
        self.history.insert(state.trim().to_ascii_uppercase(), stats);
        self
    }
}

impl ContextSource for StaticContext {
    fn history(&self, state: &str) -> Option<GradeStatistics> {
        self.history.get(&state.trim().to_ascii_uppercase()).cloned()
    }

    fn demographics(&self, state: &str) -> Option<DemographicProfile> {
        self.demographics.get(state).cloned()
    }
}

#[derive(Debug, Clone)]
pub struct Grader {
    methodology: Methodology,
    weights: FactorWeights,
    criteria: Criteria,
    balancing: BalancingConfig,
}

impl Grader {
    pub fn new(config: &GraderConfig) -> Result<Self> {
        Ok(Self {
            methodology: config.methodology(),
            weights: config.factor_weights()?,
            criteria: config.criteria()?,
            balancing: config.balancing.clone(),
        })
    }

    pub fn with_methodology(mut self, methodology: Methodology) -> Self {
        self.methodology = methodology;
        self
    }

    pub fn with_balancing(mut self, balancing: BalancingConfig) -> Self {
        self.balancing = balancing;
        self
    }

    pub fn methodology(&self) -> Methodology {
        self.methodology
    }

    pub fn weights(&self) -> &FactorWeights {
        &self.weights
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn grade(&self, bill: &Bill, context: &dyn ContextSource) -> Result<GradeResult> {
        let mut rng = balance::jitter_rng(&self.balancing, &bill.bill_id);
        self.grade_with_rng(
            bill,
            context,
            rng.as_mut().map(|rng| rng as &mut dyn RngCore),
        )
    }

    pub fn grade_with_rng(
        &self,
        bill: &Bill,
        context: &dyn ContextSource,
        rng: Option<&mut dyn RngCore>,
    ) -> Result<GradeResult> {
        bill.validate()?;
        let state = bill.state();
        let history = state.as_deref().and_then(|code| context.history(code));

        let result = match self.methodology {
            Methodology::Original => self.grade_original(bill, history.as_ref(), rng, None),
            Methodology::CensusBased => {
                let profile = state.as_deref().and_then(|code| context.demographics(code));
                match (state.as_deref(), profile) {
                    (Some(_), Some(profile)) => {
                        self.grade_census(bill, &profile, history.as_ref(), rng)
                    }
                    (None, _) => {
                        let reason = "bill has no state code".to_string();
                        warn!(bill_id = %bill.bill_id, %reason, "census methodology unavailable; using original");
                        self.grade_original(bill, history.as_ref(), rng, Some(reason))
                    }
                    (Some(code), None) => {
                        let reason = format!("no demographic profile for state {code}");
                        warn!(bill_id = %bill.bill_id, %reason, "census methodology unavailable; using original");
                        self.grade_original(bill, history.as_ref(), rng, Some(reason))
                    }
                }
            }
        };

        info!(
            bill_id = %bill.bill_id,
            score = result.score,
            grade = %result.grade,
            methodology = %result.methodology,
            "graded bill"
        );
        Ok(result)
    }

    fn grade_original(
        &self,
        bill: &Bill,
        history: Option<&GradeStatistics>,
        rng: Option<&mut dyn RngCore>,
        fallback: Option<String>,
    ) -> GradeResult {
        let mut keywords = keywords::keyword_score(bill, &self.criteria);
        let mut status = status::status_score(bill);
        let mut sponsors = sponsors::sponsor_score(bill);
        let mut committees = committees::committee_score(bill);
        let mut votes = votes::vote_score(bill);

        for (factor, note) in [
            (Factor::Keywords, keywords.note.as_deref()),
            (Factor::Sponsors, sponsors.note.as_deref()),
            (Factor::Committees, committees.note.as_deref()),
            (Factor::Votes, votes.note.as_deref()),
        ] {
            if let Some(note) = note {
                debug!(bill_id = %bill.bill_id, factor = factor.as_str(), note, "missing data");
            }
        }

        let weighed = [
            weigh(Factor::Keywords, keywords.score.raw_score, &self.weights),
            weigh(Factor::Status, status.score.raw_score, &self.weights),
            weigh(Factor::Sponsors, sponsors.score.raw_score, &self.weights),
            weigh(Factor::Committees, committees.score.raw_score, &self.weights),
            weigh(Factor::Votes, votes.score.raw_score, &self.weights),
        ];
        for factor in &weighed {
            debug!(
                bill_id = %bill.bill_id,
                factor = factor.factor.as_str(),
                raw = factor.raw,
                normalized = factor.normalized,
                weighted = factor.weighted,
                "factor scored"
            );
        }

        keywords.score = weighed[0].to_factor_score();
        status.score = weighed[1].to_factor_score();
        sponsors.score = weighed[2].to_factor_score();
        committees.score = weighed[3].to_factor_score();
        votes.score = weighed[4].to_factor_score();

        let combined = combine(&weighed);
        let balanced = balance::balance_score(combined, history, rng);
        if balanced.score != combined {
            debug!(
                bill_id = %bill.bill_id,
                before = combined,
                after = balanced.score,
                curve_boost = balanced.curve_boost,
                jitter = balanced.jitter,
                "score balanced"
            );
        }
        let score = round1(balanced.score);

        let breakdown = weighed
            .iter()
            .map(|factor| (factor.factor.as_str().to_string(), round1(factor.weighted)))
            .collect();

        GradeResult {
            score,
            grade: grade::classify(score),
            details: GradeDetails::Original(Box::new(FactorDetails {
                keywords,
                status,
                sponsors,
                committees,
                votes,
                subjects: self.subject_detail(bill),
            })),
            breakdown,
            weights_used: self.weights.to_map(),
            methodology: Methodology::Original,
            fallback,
        }
    }

    fn grade_census(
        &self,
        bill: &Bill,
        profile: &DemographicProfile,
        history: Option<&GradeStatistics>,
        rng: Option<&mut dyn RngCore>,
    ) -> GradeResult {
        let text = bill.text();
        let keyword_raw = keywords::analyze_text(&text, &self.criteria).score.raw_score;

        let mut racial = census::racial_impact(&text, profile);
        let mut income = census::income_impact(&text, profile);
        let mut state = census::state_impact(keyword_raw, profile);
        let average = census::weighted_average(&racial, &income, &state);
        debug!(
            bill_id = %bill.bill_id,
            racial = racial.score,
            income = income.score,
            state = state.score,
            average,
            "impact scores"
        );

        let balanced = balance::balance_score(average, history, rng);
        let score = round1(balanced.score);

        let mut breakdown = BTreeMap::new();
        breakdown.insert("racial_impact".to_string(), round1(racial.score));
        breakdown.insert("income_impact".to_string(), round1(income.score));
        breakdown.insert("state_impact".to_string(), round1(state.score));
        breakdown.insert("weighted_average".to_string(), round1(average));
        breakdown.insert("final_after_balancing".to_string(), score);

        let mut weights_used = BTreeMap::new();
        weights_used.insert("racial_impact".to_string(), racial.weight);
        weights_used.insert("income_impact".to_string(), income.weight);
        weights_used.insert("state_impact".to_string(), state.weight);

        for impact in [&mut racial, &mut income, &mut state] {
            impact.score = round1(impact.score);
        }

        GradeResult {
            score,
            grade: grade::classify(score),
            details: GradeDetails::CensusBased(Box::new(CensusDetails {
                racial_impact: racial,
                income_impact: income,
                state_impact: state,
                profile: profile.clone(),
            })),
            breakdown,
            weights_used,
            methodology: Methodology::CensusBased,
            fallback: None,
        }
    }

    fn subject_detail(&self, bill: &Bill) -> SubjectDetail {
        let subjects: Vec<String> = bill
            .subject_list()
            .iter()
            .map(|subject| subject.trim().to_lowercase())
            .collect();
        let matched_weights = self
            .criteria
            .subject_weights
            .iter()
            .filter(|(name, _)| subjects.contains(&name.trim().to_lowercase()))
            .map(|(name, weight)| (name.clone(), *weight))
            .collect();
        SubjectDetail {
            matched_weights,
            applied: false,
        }
    }
}
