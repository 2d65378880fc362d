use crate::error::GraderError;
use crate::types::config::Methodology;
use crate::types::demographics::DemographicProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub type Score = f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = GraderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "F" => Ok(Self::F),
            _ => Err(GraderError::InvalidGrade(s.to_string())),
        }
    }
}

/// Output of one grading call. `grade` is always the classifier's verdict
/// on `score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeResult {
    pub score: Score,
    pub grade: Grade,
    pub details: GradeDetails,
    pub breakdown: BTreeMap<String, Score>,
    pub weights_used: BTreeMap<String, f64>,
    pub methodology: Methodology,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GradeDetails {
    Original(Box<FactorDetails>),
    CensusBased(Box<CensusDetails>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub raw_score: Score,
    pub normalized_score: Score,
    pub weighted_score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorDetails {
    pub keywords: KeywordDetail,
    pub status: StatusDetail,
    pub sponsors: SponsorDetail,
    pub committees: CommitteeDetail,
    pub votes: VoteDetail,
    pub subjects: SubjectDetail,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordDetail {
    pub positive_matches: Vec<String>,
    pub negative_matches: Vec<String>,
    pub positive_score: Score,
    pub negative_score: Score,
    pub text_length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(flatten)]
    pub score: FactorScore,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusDetail {
    pub status_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    pub points_awarded: Score,
    #[serde(flatten)]
    pub score: FactorScore,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SponsorDetail {
    pub sponsor_count: usize,
    pub points_awarded: Score,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(flatten)]
    pub score: FactorScore,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitteeDetail {
    pub matched_committees: Vec<String>,
    pub committee_count: usize,
    pub uncapped_score: Score,
    pub capped_score: Score,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(flatten)]
    pub score: FactorScore,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoteDetail {
    pub vote_details: Vec<VoteRecord>,
    pub total_votes_analyzed: usize,
    pub uncapped_score: Score,
    pub capped_score: Score,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(flatten)]
    pub score: FactorScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub yea: u64,
    pub nay: u64,
    pub total: u64,
    pub support_ratio: f64,
    pub points: Score,
}

/// Subject weights matched by the bill. Reported only; not part of the score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectDetail {
    pub matched_weights: BTreeMap<String, f64>,
    pub applied: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CensusDetails {
    pub racial_impact: ImpactDetail,
    pub income_impact: ImpactDetail,
    pub state_impact: ImpactDetail,
    pub profile: DemographicProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactDetail {
    pub score: Score,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positive_matches: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub negative_matches: Vec<String>,
    pub analysis: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_parses_case_insensitively() {
        assert_eq!(" b ".parse::<Grade>().expect("grade should parse"), Grade::B);
        assert_eq!("f".parse::<Grade>().expect("grade should parse"), Grade::F);
        assert!(matches!(
            "E".parse::<Grade>(),
            Err(GraderError::InvalidGrade(_))
        ));
    }

    #[test]
    fn grade_serializes_as_letter() {
        let rendered = serde_json::to_string(&Grade::C).expect("grade should serialize");
        assert_eq!(rendered, "\"C\"");
    }

    #[test]
    fn factor_score_flattens_into_detail() {
        let detail = SponsorDetail {
            sponsor_count: 4,
            points_awarded: 4.0,
            note: None,
            score: FactorScore {
                raw_score: 4.0,
                normalized_score: 40.0,
                weighted_score: 6.0,
            },
        };
        let value = serde_json::to_value(&detail).expect("detail should serialize");
        assert_eq!(value["raw_score"], 4.0);
        assert_eq!(value["normalized_score"], 40.0);
        assert!(value.get("note").is_none());
    }
}
