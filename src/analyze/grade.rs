use crate::types::scoring::{Grade, Score};

/// | Score  | Grade |
/// |--------|-------|
/// | >= 90  | A     |
/// | >= 80  | B     |
/// | >= 70  | C     |
/// | >= 60  | D     |
/// | < 60   | F     |
pub fn classify(score: Score) -> Grade {
    match score {
        s if s >= 90.0 => Grade::A,
        s if s >= 80.0 => Grade::B,
        s if s >= 70.0 => Grade::C,
        s if s >= 60.0 => Grade::D,
        _ => Grade::F,
    }
}
