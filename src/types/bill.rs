use crate::error::{GraderError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    #[serde(deserialize_with = "string_or_number")]
    pub bill_id: String,
    #[serde(default, alias = "state", skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    #[serde(default, alias = "number", skip_serializing_if = "Option::is_none")]
    pub bill_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsors: Option<Value>,
    #[serde(default, alias = "committees", skip_serializing_if = "Option::is_none")]
    pub committee: Option<TextField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjects: Option<TextField>,
    #[serde(
        default,
        deserialize_with = "lenient_votes",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub votes: Vec<Vote>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BillDocument {
    Wrapped { bill: Bill },
    Bare(Bill),
}

impl BillDocument {
    pub fn into_bill(self) -> Bill {
        match self {
            Self::Wrapped { bill } | Self::Bare(bill) => bill,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    #[serde(default, deserialize_with = "lenient_count")]
    pub yea: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub nay: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextField {
    // before `One`, which would otherwise swallow a list as a single value
    Many(Vec<TextEntry>),
    One(TextEntry),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextEntry {
    Text(String),
    Record(Map<String, Value>),
    Other(Value),
}

impl TextField {
    pub fn canonical(&self, keys: &[&str]) -> Vec<String> {
        let entries: Vec<&TextEntry> = match self {
            Self::One(entry) => vec![entry],
            Self::Many(entries) => entries.iter().collect(),
        };
        entries
            .into_iter()
            .map(|entry| entry.resolve(keys))
            .filter(|text| !text.is_empty())
            .collect()
    }
}

impl TextEntry {
    fn resolve(&self, keys: &[&str]) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Record(record) => keys
                .iter()
                .find_map(|key| record.get(*key).and_then(Value::as_str))
                .map(str::to_string)
                .unwrap_or_else(|| Value::Object(record.clone()).to_string()),
            Self::Other(Value::Null) => String::new(),
            Self::Other(value) => value.to_string(),
        }
    }
}

const COMMITTEE_KEYS: [&str; 1] = ["name"];
const SUBJECT_KEYS: [&str; 3] = ["text", "subject_name", "name"];

impl Bill {
    pub fn text(&self) -> String {
        [&self.title, &self.description, &self.summary]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .filter(|field| !field.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn committees(&self) -> Vec<String> {
        self.committee
            .as_ref()
            .map(|field| field.canonical(&COMMITTEE_KEYS))
            .unwrap_or_default()
    }

    pub fn subject_list(&self) -> Vec<String> {
        self.subjects
            .as_ref()
            .map(|field| field.canonical(&SUBJECT_KEYS))
            .unwrap_or_default()
    }

    pub fn sponsor_count(&self) -> usize {
        self.sponsors
            .as_ref()
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn state(&self) -> Option<String> {
        self.state_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_ascii_uppercase)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bill_id.trim().is_empty() {
            return Err(GraderError::InvalidBill("bill_id must be non-empty".to_string()));
        }
        if let Some(state) = self.state() {
            if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(GraderError::InvalidBill(format!(
                    "bill {}: state_code must be a 2-letter code (found {state:?})",
                    self.bill_id
                )));
            }
        }
        Ok(())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "bill_id must be a string or number, found {other}"
        ))),
    }
}

fn lenient_status<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|value| value.is_finite()).map(|value| value as i64)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

// Unreadable counts read as zero, so the roll call is skipped rather than
// failing the bill.
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_u64().unwrap_or_else(|| {
            number
                .as_f64()
                .filter(|value| value.is_finite() && *value > 0.0)
                .map_or(0, |value| value as u64)
        }),
        Value::String(text) => text.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_votes<'de, D>(deserializer: D) -> std::result::Result<Vec<Vote>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn committee_accepts_string_list_and_records() {
        let bill: Bill = serde_json::from_value(json!({
            "bill_id": 1001,
            "committee": ["Judiciary", {"name": "Public Safety"}, {"chamber": "H"}]
        }))
        .expect("bill should parse");

        assert_eq!(bill.bill_id, "1001");
        let committees = bill.committees();
        assert_eq!(committees[0], "Judiciary");
        assert_eq!(committees[1], "Public Safety");
        assert!(committees[2].contains("chamber"));
    }

    #[test]
    fn single_committee_string_becomes_one_entry() {
        let bill: Bill = serde_json::from_value(json!({
            "bill_id": "b1",
            "committee": "Criminal Justice Committee"
        }))
        .expect("bill should parse");
        assert_eq!(bill.committees(), vec!["Criminal Justice Committee".to_string()]);
    }

    #[test]
    fn subjects_resolve_text_field() {
        let bill: Bill = serde_json::from_value(json!({
            "bill_id": "b1",
            "subjects": [{"text": "Sentencing"}, {"subject_name": "Juvenile Justice"}, "Courts"]
        }))
        .expect("bill should parse");
        assert_eq!(
            bill.subject_list(),
            vec!["Sentencing", "Juvenile Justice", "Courts"]
        );
    }

    #[test]
    fn non_array_sponsors_count_as_zero() {
        let bill: Bill = serde_json::from_value(json!({
            "bill_id": "b1",
            "sponsors": {"name": "Rep. Smith"}
        }))
        .expect("bill should parse");
        assert_eq!(bill.sponsor_count(), 0);
    }

    #[test]
    fn text_skips_missing_fields() {
        let bill = Bill {
            bill_id: "b1".to_string(),
            title: Some("Bail reform".to_string()),
            summary: Some("Ends cash bail".to_string()),
            ..Bill::default()
        };
        assert_eq!(bill.text(), "Bail reform Ends cash bail");
    }

    #[test]
    fn wrapped_document_unwraps() {
        let doc: BillDocument = serde_json::from_value(json!({
            "bill": {"bill_id": "b7", "state": "ca"}
        }))
        .expect("document should parse");
        let bill = doc.into_bill();
        assert_eq!(bill.bill_id, "b7");
        assert_eq!(bill.state().as_deref(), Some("CA"));
    }

    #[test]
    fn null_votes_and_string_counts_still_parse() {
        let bill: Bill = serde_json::from_value(json!({
            "bill_id": "X",
            "title": "reform",
            "status": "3",
            "votes": null
        }))
        .expect("null votes should parse");
        assert_eq!(bill.status, Some(3));
        assert!(bill.votes.is_empty());

        let bill: Bill = serde_json::from_value(json!({
            "bill_id": "X",
            "status": "passed",
            "votes": [{"yea": "80", "nay": 20}, "roll call", {"yea": -4, "nay": "n/a"}]
        }))
        .expect("string counts should parse");
        assert_eq!(bill.status, None);
        assert_eq!(bill.votes, vec![Vote { yea: 80, nay: 20 }, Vote { yea: 0, nay: 0 }]);

        let bill: Bill = serde_json::from_value(json!({"bill_id": "X", "votes": {"yea": 5}}))
            .expect("non-array votes should parse");
        assert!(bill.votes.is_empty());
    }

    #[test]
    fn scalar_committee_and_subject_entries_are_stringified() {
        let bill: Bill = serde_json::from_value(json!({
            "bill_id": "X",
            "committee": ["Judiciary", 42, true, null],
            "subjects": 7
        }))
        .expect("scalar entries should parse");
        assert_eq!(bill.committees(), vec!["Judiciary", "42", "true"]);
        assert_eq!(bill.subject_list(), vec!["7"]);
    }

    #[test]
    fn validate_rejects_blank_id_and_bad_state() {
        let blank = Bill::default();
        assert!(matches!(blank.validate(), Err(GraderError::InvalidBill(_))));

        let bad_state = Bill {
            bill_id: "b1".to_string(),
            state_code: Some("Cal".to_string()),
            ..Bill::default()
        };
        assert!(bad_state.validate().is_err());
    }
}
