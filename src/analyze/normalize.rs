use crate::types::config::{Factor, FactorWeights};
use crate::types::scoring::{FactorScore, Score};

pub fn expected_range(factor: Factor) -> (f64, f64) {
    match factor {
        Factor::Keywords => (-50.0, 100.0),
        Factor::Status => (0.0, 15.0),
        Factor::Sponsors => (0.0, 10.0),
        Factor::Committees => (0.0, 25.0),
        Factor::Votes => (0.0, 30.0),
    }
}

/// Linear map of `raw` from `[min, max]` onto `[0, 100]`, clamped. A
/// degenerate range yields the neutral 50.
pub fn normalize_score(raw: f64, min: f64, max: f64) -> Score {
    if max <= min {
        return 50.0;
    }
    (((raw - min) / (max - min)) * 100.0).clamp(0.0, 100.0)
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn weigh(factor: Factor, raw: f64, weights: &FactorWeights) -> WeighedFactor {
    let (min, max) = expected_range(factor);
    let normalized = normalize_score(raw, min, max);
    WeighedFactor {
        factor,
        raw,
        normalized,
        weighted: normalized * (weights.get(factor) / 100.0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeighedFactor {
    pub factor: Factor,
    pub raw: f64,
    pub normalized: f64,
    pub weighted: f64,
}

impl WeighedFactor {
    pub fn to_factor_score(self) -> FactorScore {
        FactorScore {
            raw_score: self.raw,
            normalized_score: round1(self.normalized),
            weighted_score: round1(self.weighted),
        }
    }
}

pub fn combine(factors: &[WeighedFactor]) -> Score {
    factors.iter().map(|factor| factor.weighted).sum()
}
