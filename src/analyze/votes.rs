use crate::types::bill::Bill;
use crate::types::scoring::{FactorScore, VoteDetail, VoteRecord};

pub const VOTE_CAP: f64 = 30.0;

pub fn support_points(ratio: f64) -> f64 {
    match ratio {
        r if r >= 0.9 => 15.0,
        r if r >= 0.8 => 12.0,
        r if r >= 0.7 => 10.0,
        r if r >= 0.6 => 8.0,
        r if r >= 0.5 => 5.0,
        _ => 2.0,
    }
}

pub fn vote_score(bill: &Bill) -> VoteDetail {
    let records: Vec<VoteRecord> = bill
        .votes
        .iter()
        .filter(|vote| vote.yea.saturating_add(vote.nay) > 0)
        .map(|vote| {
            let total = vote.yea.saturating_add(vote.nay);
            let ratio = vote.yea as f64 / total as f64;
            VoteRecord {
                yea: vote.yea,
                nay: vote.nay,
                total,
                support_ratio: (ratio * 1000.0).round() / 1000.0,
                points: support_points(ratio),
            }
        })
        .collect();

    let total: f64 = records.iter().map(|record| record.points).sum();
    let capped = total.min(VOTE_CAP);
    VoteDetail {
        total_votes_analyzed: records.len(),
        note: records
            .is_empty()
            .then(|| "No recorded votes".to_string()),
        vote_details: records,
        uncapped_score: total,
        capped_score: capped,
        score: FactorScore {
            raw_score: capped,
            ..FactorScore::default()
        },
    }
}
