use crate::error::{GraderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GraderConfig {
    #[serde(default)]
    pub grading: GradingConfig,
    pub weights: Option<FactorWeights>,
    pub criteria: Option<CriteriaConfig>,
    #[serde(default)]
    pub balancing: BalancingConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GradingConfig {
    #[serde(default)]
    pub methodology: Methodology,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Methodology {
    #[default]
    Original,
    #[serde(alias = "option_2_census_based")]
    CensusBased,
}

impl Methodology {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::CensusBased => "census_based",
        }
    }
}

impl fmt::Display for Methodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Factor {
    Keywords,
    Status,
    Sponsors,
    Committees,
    Votes,
}

impl Factor {
    pub const ALL: [Factor; 5] = [
        Factor::Keywords,
        Factor::Status,
        Factor::Sponsors,
        Factor::Committees,
        Factor::Votes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keywords => "keywords",
            Self::Status => "status",
            Self::Sponsors => "sponsors",
            Self::Committees => "committees",
            Self::Votes => "votes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactorWeights {
    pub keywords: f64,
    pub status: f64,
    pub sponsors: f64,
    pub committees: f64,
    pub votes: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            keywords: 40.0,
            status: 20.0,
            sponsors: 15.0,
            committees: 15.0,
            votes: 10.0,
        }
    }
}

impl FactorWeights {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Keywords => self.keywords,
            Factor::Status => self.status,
            Factor::Sponsors => self.sponsors,
            Factor::Committees => self.committees,
            Factor::Votes => self.votes,
        }
    }

    pub fn sum(&self) -> f64 {
        Factor::ALL.iter().map(|factor| self.get(*factor)).sum()
    }

    pub fn normalized(&self) -> Result<FactorWeights> {
        for factor in Factor::ALL {
            let weight = self.get(factor);
            if !weight.is_finite() || weight < 0.0 {
                return Err(GraderError::Configuration(format!(
                    "weights.{} must be a non-negative number (found {weight})",
                    factor.as_str()
                )));
            }
        }
        let total = self.sum();
        if total <= 0.0 {
            return Err(GraderError::Configuration(
                "factor weights sum to zero; at least one weight must be positive".to_string(),
            ));
        }
        let scale = |weight: f64| weight / total * 100.0;
        Ok(FactorWeights {
            keywords: scale(self.keywords),
            status: scale(self.status),
            sponsors: scale(self.sponsors),
            committees: scale(self.committees),
            votes: scale(self.votes),
        })
    }

    pub fn to_map(&self) -> BTreeMap<String, f64> {
        Factor::ALL
            .iter()
            .map(|factor| (factor.as_str().to_string(), self.get(*factor)))
            .collect()
    }
}

/// Keyword and subject tables as written in the config file. Absent or
/// empty tables fall back to the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CriteriaConfig {
    pub positive_keywords: Option<BTreeMap<String, f64>>,
    pub negative_keywords: Option<BTreeMap<String, f64>>,
    pub subject_weights: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Criteria {
    pub positive_keywords: BTreeMap<String, f64>,
    pub negative_keywords: BTreeMap<String, f64>,
    pub subject_weights: BTreeMap<String, f64>,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            positive_keywords: table(DEFAULT_POSITIVE_KEYWORDS),
            negative_keywords: table(DEFAULT_NEGATIVE_KEYWORDS),
            subject_weights: table(DEFAULT_SUBJECT_WEIGHTS),
        }
    }
}

impl Criteria {
    pub fn resolve(config: Option<&CriteriaConfig>) -> Result<Criteria> {
        let defaults = Criteria::default();
        let Some(config) = config else {
            return Ok(defaults);
        };
        let pick = |configured: &Option<BTreeMap<String, f64>>, fallback: BTreeMap<String, f64>| {
            configured
                .as_ref()
                .filter(|map| !map.is_empty())
                .cloned()
                .unwrap_or(fallback)
        };
        let criteria = Criteria {
            positive_keywords: pick(&config.positive_keywords, defaults.positive_keywords),
            negative_keywords: pick(&config.negative_keywords, defaults.negative_keywords),
            subject_weights: pick(&config.subject_weights, defaults.subject_weights),
        };
        criteria.validate()?;
        Ok(criteria)
    }

    pub fn validate(&self) -> Result<()> {
        for (section, map) in [
            ("positive_keywords", &self.positive_keywords),
            ("negative_keywords", &self.negative_keywords),
            ("subject_weights", &self.subject_weights),
        ] {
            if let Some(key) = map.keys().find(|key| key.trim().is_empty()) {
                return Err(GraderError::Configuration(format!(
                    "criteria.{section} contains a blank key ({key:?})"
                )));
            }
            if let Some((key, value)) = map.iter().find(|(_, value)| !value.is_finite()) {
                return Err(GraderError::Configuration(format!(
                    "criteria.{section}.{key} must be a finite number (found {value})"
                )));
            }
        }
        if let Some((key, value)) = self.positive_keywords.iter().find(|(_, v)| **v <= 0.0) {
            return Err(GraderError::Configuration(format!(
                "criteria.positive_keywords.{key} must be positive (found {value})"
            )));
        }
        if let Some((key, value)) = self.negative_keywords.iter().find(|(_, v)| **v >= 0.0) {
            return Err(GraderError::Configuration(format!(
                "criteria.negative_keywords.{key} must be negative (found {value})"
            )));
        }
        if let Some((key, value)) = self.subject_weights.iter().find(|(_, v)| **v <= 0.0) {
            return Err(GraderError::Configuration(format!(
                "criteria.subject_weights.{key} must be positive (found {value})"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BalancingConfig {
    #[serde(default = "default_jitter")]
    pub jitter: bool,
    pub seed: Option<u64>,
}

impl Default for BalancingConfig {
    fn default() -> Self {
        Self {
            jitter: default_jitter(),
            seed: None,
        }
    }
}

fn default_jitter() -> bool {
    true
}

impl GraderConfig {
    pub fn methodology(&self) -> Methodology {
        self.grading.methodology
    }

    pub fn factor_weights(&self) -> Result<FactorWeights> {
        self.weights.unwrap_or_default().normalized()
    }

    pub fn criteria(&self) -> Result<Criteria> {
        Criteria::resolve(self.criteria.as_ref())
    }

    pub fn validate(&self) -> Result<()> {
        self.factor_weights()?;
        self.criteria()?;
        Ok(())
    }
}

fn table(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), *value))
        .collect()
}

pub const DEFAULT_POSITIVE_KEYWORDS: &[(&str, f64)] = &[
    // reform and rehabilitation
    ("reform", 15.0),
    ("rehabilitation", 18.0),
    ("treatment", 14.0),
    ("therapy", 12.0),
    ("counseling", 12.0),
    ("mental health", 16.0),
    ("substance abuse treatment", 15.0),
    ("drug treatment", 14.0),
    ("addiction treatment", 15.0),
    // diversion
    ("diversion", 18.0),
    ("alternative sentencing", 20.0),
    ("community service", 12.0),
    ("restorative justice", 20.0),
    ("mediation", 10.0),
    ("problem solving court", 15.0),
    ("drug court", 16.0),
    ("mental health court", 16.0),
    // reentry
    ("reentry", 18.0),
    ("reintegration", 15.0),
    ("expungement", 20.0),
    ("sealing records", 18.0),
    ("record clearing", 16.0),
    ("certificate of rehabilitation", 12.0),
    ("ban the box", 15.0),
    ("fair chance", 12.0),
    // sentencing
    ("reduce sentence", 15.0),
    ("sentence reduction", 15.0),
    ("early release", 12.0),
    ("good time credit", 10.0),
    ("earned time", 10.0),
    // juvenile
    ("juvenile rehabilitation", 15.0),
    ("youth programs", 12.0),
    ("raise the age", 16.0),
    ("juvenile diversion", 14.0),
    // bail and pretrial
    ("bail reform", 16.0),
    ("pretrial release", 14.0),
    ("eliminate cash bail", 18.0),
    ("pretrial services", 12.0),
    // policing
    ("police accountability", 16.0),
    ("body camera", 12.0),
    ("use of force reform", 14.0),
    ("police training", 10.0),
    ("civilian oversight", 14.0),
    ("transparency", 10.0),
    // support services
    ("job training", 12.0),
    ("education programs", 12.0),
    ("housing assistance", 10.0),
    ("family support", 10.0),
    ("victim services", 10.0),
];

pub const DEFAULT_NEGATIVE_KEYWORDS: &[(&str, f64)] = &[
    ("mandatory minimum", -25.0),
    ("three strikes", -30.0),
    ("life sentence", -20.0),
    ("life without parole", -35.0),
    ("death penalty", -40.0),
    ("capital punishment", -40.0),
    ("solitary confinement", -25.0),
    ("isolation", -15.0),
    ("supermax", -20.0),
    ("private prison", -20.0),
    ("for-profit prison", -22.0),
    ("enhance penalty", -15.0),
    ("increase sentence", -15.0),
    ("longer sentence", -12.0),
    ("maximum penalty", -10.0),
    ("habitual offender", -18.0),
    ("sex offender registry", -12.0),
    ("lifetime supervision", -15.0),
    ("civil commitment", -12.0),
    ("zero tolerance", -15.0),
    ("court fees increase", -10.0),
    ("fine increase", -8.0),
    ("asset forfeiture", -18.0),
    ("license suspension", -10.0),
    ("adult prosecution", -20.0),
    ("automatic transfer", -18.0),
    ("juvenile life sentence", -35.0),
];

pub const DEFAULT_SUBJECT_WEIGHTS: &[(&str, f64)] = &[
    ("Criminal Justice", 1.5),
    ("Corrections", 1.4),
    ("Sentencing", 1.3),
    ("Rehabilitation", 1.6),
    ("Juvenile Justice", 1.4),
    ("Drug Policy", 1.2),
    ("Mental Health", 1.3),
    ("Reentry", 1.5),
    ("Courts", 1.1),
    ("Law Enforcement", 1.0),
    ("Police Reform", 1.3),
    ("Bail Reform", 1.2),
    ("Expungement", 1.4),
];
