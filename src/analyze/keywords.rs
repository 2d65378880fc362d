use crate::types::bill::Bill;
use crate::types::config::Criteria;
use crate::types::scoring::{FactorScore, KeywordDetail};

pub const NO_TEXT_NOTE: &str = "No text available for analysis";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordHits {
    pub matches: Vec<String>,
    pub total: f64,
}

/// Case-insensitive substring scan. Every keyword counts once, even when it
/// sits inside a longer word or overlaps another keyword.
pub fn scan<'a, I>(text: &str, table: I) -> KeywordHits
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let haystack = text.to_lowercase();
    let mut hits = KeywordHits::default();
    for (keyword, points) in table {
        if haystack.contains(&keyword.to_lowercase()) {
            hits.total += points;
            hits.matches.push(keyword.to_string());
        }
    }
    hits
}

pub fn keyword_score(bill: &Bill, criteria: &Criteria) -> KeywordDetail {
    analyze_text(&bill.text(), criteria)
}

pub fn analyze_text(text: &str, criteria: &Criteria) -> KeywordDetail {
    if text.is_empty() {
        return KeywordDetail {
            note: Some(NO_TEXT_NOTE.to_string()),
            ..KeywordDetail::default()
        };
    }

    let positive = scan(
        text,
        criteria
            .positive_keywords
            .iter()
            .map(|(keyword, points)| (keyword.as_str(), *points)),
    );
    let negative = scan(
        text,
        criteria
            .negative_keywords
            .iter()
            .map(|(keyword, points)| (keyword.as_str(), *points)),
    );

    KeywordDetail {
        positive_matches: positive.matches,
        negative_matches: negative.matches,
        positive_score: positive.total,
        negative_score: negative.total,
        text_length: text.len(),
        note: None,
        score: FactorScore {
            raw_score: positive.total + negative.total,
            ..FactorScore::default()
        },
    }
}
