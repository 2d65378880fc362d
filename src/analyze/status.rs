use crate::types::bill::Bill;
use crate::types::scoring::{FactorScore, StatusDetail};

pub fn status_points(status: Option<i64>) -> f64 {
    match status {
        Some(1) => 3.0,  // introduced
        Some(2) => 6.0,  // in committee
        Some(3) => 9.0,  // passed one chamber
        Some(4) => 12.0, // passed both chambers
        Some(5) => 15.0, // enacted
        Some(6) => 4.0,  // vetoed
        _ => 1.0,
    }
}

pub fn status_score(bill: &Bill) -> StatusDetail {
    let points = status_points(bill.status);
    StatusDetail {
        status_code: bill.status,
        status_text: bill.status_text.clone(),
        points_awarded: points,
        score: FactorScore {
            raw_score: points,
            ..FactorScore::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_table() {
        let expected = [
            (Some(1), 3.0),
            (Some(2), 6.0),
            (Some(3), 9.0),
            (Some(4), 12.0),
            (Some(5), 15.0),
            (Some(6), 4.0),
            (Some(0), 1.0),
            (Some(42), 1.0),
            (None, 1.0),
        ];
        for (status, points) in expected {
            assert_eq!(status_points(status), points, "status {status:?}");
        }
    }

    #[test]
    fn detail_carries_status_text() {
        let bill = Bill {
            bill_id: "b1".to_string(),
            status: Some(5),
            status_text: Some("Enacted".to_string()),
            ..Bill::default()
        };
        let detail = status_score(&bill);
        assert_eq!(detail.score.raw_score, 15.0);
        assert_eq!(detail.status_text.as_deref(), Some("Enacted"));
    }
}
