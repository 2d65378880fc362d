use crate::types::config::BalancingConfig;
use crate::types::report::GradeStatistics;
use crate::types::scoring::{Grade, Score};
use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};
use sha2::{Digest, Sha256};

/// Below this many graded bills a state's history is too thin to curve on.
pub const MIN_HISTORY: usize = 5;
pub const F_SHARE_TRIGGER: f64 = 80.0;
pub const MAX_CURVE_BOOST: f64 = 20.0;
pub const JITTER_WINDOW: (f64, f64) = (55.0, 65.0);
pub const JITTER_MIN: i64 = -3;
pub const JITTER_MAX: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceOutcome {
    pub score: Score,
    pub curve_boost: f64,
    pub jitter: f64,
}

impl BalanceOutcome {
    fn unchanged(score: Score) -> Self {
        Self {
            score,
            curve_boost: 0.0,
            jitter: 0.0,
        }
    }
}

pub fn balance_score(
    score: Score,
    history: Option<&GradeStatistics>,
    rng: Option<&mut dyn RngCore>,
) -> BalanceOutcome {
    let Some(history) = history.filter(|stats| stats.total_bills >= MIN_HISTORY) else {
        return BalanceOutcome::unchanged(score);
    };

    let f_share = history.grade_distribution.count(Grade::F) as f64
        / history.total_bills as f64
        * 100.0;

    let mut curve_boost = 0.0;
    if f_share > F_SHARE_TRIGGER {
        let boost = MAX_CURVE_BOOST.min((f_share - 60.0) * 0.5);
        curve_boost = match score {
            s if (40.0..60.0).contains(&s) => boost,
            s if (30.0..40.0).contains(&s) => boost * 0.7,
            s if (20.0..30.0).contains(&s) => boost * 0.4,
            _ => 0.0,
        };
    }
    let curved = score + curve_boost;

    let mut jitter = 0.0;
    if let Some(rng) = rng {
        if (JITTER_WINDOW.0..=JITTER_WINDOW.1).contains(&curved) {
            jitter = draw_jitter(rng) as f64;
        }
    }

    BalanceOutcome {
        score: (curved + jitter).clamp(0.0, 100.0),
        curve_boost,
        jitter,
    }
}

pub fn draw_jitter(rng: &mut dyn RngCore) -> i64 {
    let span = (JITTER_MAX - JITTER_MIN + 1) as u64;
    // words below 2^64 mod span would bias the low values
    let threshold = span.wrapping_neg() % span;
    loop {
        let word = rng.next_u64();
        if word >= threshold {
            return JITTER_MIN + (word % span) as i64;
        }
    }
}

pub fn jitter_rng(config: &BalancingConfig, bill_id: &str) -> Option<ChaCha20Rng> {
    if !config.jitter {
        return None;
    }
    let rng = match config.seed {
        Some(seed) => {
            let digest = Sha256::new()
                .chain_update(seed.to_le_bytes())
                .chain_update(bill_id.as_bytes())
                .finalize();
            let mut seed32 = [0u8; 32];
            seed32.copy_from_slice(&digest);
            ChaCha20Rng::from_seed(seed32)
        }
        None => ChaCha20Rng::from_entropy(),
    };
    Some(rng)
}
