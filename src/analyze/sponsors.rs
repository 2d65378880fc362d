use crate::types::bill::Bill;
use crate::types::scoring::{FactorScore, SponsorDetail};

pub fn sponsor_points(count: usize) -> f64 {
    match count {
        n if n >= 20 => 10.0,
        n if n >= 10 => 8.0,
        n if n >= 5 => 6.0,
        n if n >= 3 => 4.0,
        n if n >= 1 => 2.0,
        _ => 0.0,
    }
}

pub fn sponsor_score(bill: &Bill) -> SponsorDetail {
    let count = bill.sponsor_count();
    let points = sponsor_points(count);
    SponsorDetail {
        sponsor_count: count,
        points_awarded: points,
        note: (count == 0).then(|| "No sponsors recorded".to_string()),
        score: FactorScore {
            raw_score: points,
            ..FactorScore::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sponsor_bands() {
        assert_eq!(sponsor_points(0), 0.0);
        assert_eq!(sponsor_points(1), 2.0);
        assert_eq!(sponsor_points(2), 2.0);
        assert_eq!(sponsor_points(3), 4.0);
        assert_eq!(sponsor_points(5), 6.0);
        assert_eq!(sponsor_points(9), 6.0);
        assert_eq!(sponsor_points(10), 8.0);
        assert_eq!(sponsor_points(19), 8.0);
        assert_eq!(sponsor_points(20), 10.0);
        assert_eq!(sponsor_points(75), 10.0);
    }

    #[test]
    fn missing_sponsors_score_zero_with_note() {
        let bill = Bill {
            bill_id: "b1".to_string(),
            ..Bill::default()
        };
        let detail = sponsor_score(&bill);
        assert_eq!(detail.score.raw_score, 0.0);
        assert!(detail.note.is_some());
    }

    #[test]
    fn counts_sponsor_records() {
        let bill = Bill {
            bill_id: "b1".to_string(),
            sponsors: Some(json!([{"name": "A"}, {"name": "B"}, {"name": "C"}])),
            ..Bill::default()
        };
        let detail = sponsor_score(&bill);
        assert_eq!(detail.sponsor_count, 3);
        assert_eq!(detail.points_awarded, 4.0);
    }
}
