use crate::types::bill::Bill;
use crate::types::scoring::{CommitteeDetail, FactorScore};

pub const COMMITTEE_CAP: f64 = 25.0;

const JUSTICE_COMMITTEES: [&str; 5] = [
    "criminal",
    "justice",
    "judiciary",
    "corrections",
    "public safety",
];
const LEGAL_COMMITTEES: [&str; 4] = ["law", "legal", "court", "police"];
const SOCIAL_COMMITTEES: [&str; 3] = ["health", "social", "human services"];

const CORE_SUBJECTS: [&str; 4] = [
    "criminal justice",
    "corrections",
    "sentencing",
    "rehabilitation",
];
const RELATED_SUBJECTS: [&str; 4] = ["juvenile", "police", "court", "law enforcement"];

fn mentions(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| text.contains(term))
}

pub fn committee_points(name: &str) -> f64 {
    let name = name.to_lowercase();
    if mentions(&name, &JUSTICE_COMMITTEES) {
        20.0
    } else if mentions(&name, &LEGAL_COMMITTEES) {
        15.0
    } else if mentions(&name, &SOCIAL_COMMITTEES) {
        10.0
    } else {
        5.0
    }
}

pub fn subject_points(subject: &str) -> Option<f64> {
    let subject = subject.to_lowercase();
    if mentions(&subject, &CORE_SUBJECTS) {
        Some(12.0)
    } else if mentions(&subject, &RELATED_SUBJECTS) {
        Some(8.0)
    } else {
        None
    }
}

pub fn committee_score(bill: &Bill) -> CommitteeDetail {
    let mut total = 0.0;
    let mut matched: Vec<String> = Vec::new();
    let mut remember = |entry: String| {
        if !matched.contains(&entry) {
            matched.push(entry);
        }
    };

    for committee in bill.committees() {
        total += committee_points(&committee);
        remember(committee.to_lowercase());
    }
    for subject in bill.subject_list() {
        if let Some(points) = subject_points(&subject) {
            total += points;
            remember(format!("Subject: {}", subject.to_lowercase()));
        }
    }

    let capped = total.min(COMMITTEE_CAP);
    CommitteeDetail {
        committee_count: matched.len(),
        note: matched
            .is_empty()
            .then(|| "No committees or relevant subjects recorded".to_string()),
        matched_committees: matched,
        uncapped_score: total,
        capped_score: capped,
        score: FactorScore {
            raw_score: capped,
            ..FactorScore::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::bill::{TextEntry, TextField};

    fn bill_with(committees: &[&str], subjects: &[&str]) -> Bill {
        let field = |items: &[&str]| {
            (!items.is_empty()).then(|| {
                TextField::Many(
                    items
                        .iter()
                        .map(|item| TextEntry::Text(item.to_string()))
                        .collect(),
                )
            })
        };
        Bill {
            bill_id: "b1".to_string(),
            committee: field(committees),
            subjects: field(subjects),
            ..Bill::default()
        }
    }

    #[test]
    fn committee_tiers() {
        assert_eq!(committee_points("Criminal Justice Committee"), 20.0);
        assert_eq!(committee_points("House Judiciary"), 20.0);
        assert_eq!(committee_points("Public Safety"), 20.0);
        assert_eq!(committee_points("Legal Affairs"), 15.0);
        assert_eq!(committee_points("Health and Human Services"), 10.0);
        assert_eq!(committee_points("Appropriations"), 5.0);
    }

    #[test]
    fn single_justice_committee_scores_twenty() {
        let detail = committee_score(&bill_with(&["Criminal Justice Committee"], &[]));
        assert_eq!(detail.score.raw_score, 20.0);
        assert_eq!(detail.matched_committees, vec!["criminal justice committee"]);
    }

    #[test]
    fn cap_applies_after_summing() {
        let detail = committee_score(&bill_with(
            &["Judiciary", "Appropriations"],
            &["Sentencing", "Juvenile Justice", "Agriculture"],
        ));
        assert_eq!(detail.uncapped_score, 20.0 + 5.0 + 12.0 + 12.0);
        assert_eq!(detail.capped_score, COMMITTEE_CAP);
        assert_eq!(detail.score.raw_score, COMMITTEE_CAP);
        assert!(detail
            .matched_committees
            .contains(&"Subject: sentencing".to_string()));
        assert!(!detail
            .matched_committees
            .iter()
            .any(|entry| entry.contains("agriculture")));
    }

    #[test]
    fn subjects_alone_can_score() {
        let detail = committee_score(&bill_with(&[], &["Police"]));
        assert_eq!(detail.score.raw_score, 8.0);
        assert_eq!(detail.matched_committees, vec!["Subject: police"]);
    }

    #[test]
    fn duplicate_committees_listed_once() {
        let detail = committee_score(&bill_with(&["Judiciary", "judiciary"], &[]));
        assert_eq!(detail.committee_count, 1);
        assert_eq!(detail.uncapped_score, 40.0);
    }

    #[test]
    fn no_committees_scores_zero_with_note() {
        let detail = committee_score(&bill_with(&[], &[]));
        assert_eq!(detail.score.raw_score, 0.0);
        assert!(detail.note.is_some());
    }
}
