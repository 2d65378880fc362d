use crate::error::{GraderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DemographicProfile {
    pub race: RaceShares,
    pub income: IncomeProfile,
    pub population: PopulationProfile,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RaceShares {
    pub white: f64,
    #[serde(default)]
    pub black: f64,
    #[serde(default)]
    pub hispanic: f64,
    #[serde(default)]
    pub asian: f64,
    #[serde(default)]
    pub native_american: f64,
    #[serde(default)]
    pub other: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct IncomeProfile {
    #[serde(default)]
    pub under_25k: f64,
    #[serde(default)]
    pub between_25k_50k: f64,
    #[serde(default)]
    pub between_50k_75k: f64,
    #[serde(default)]
    pub between_75k_100k: f64,
    #[serde(default)]
    pub over_100k: f64,
    #[serde(default)]
    pub median_income: f64,
    pub poverty_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PopulationProfile {
    pub total: u64,
    pub urban_percentage: f64,
    #[serde(default)]
    pub density: f64,
}

impl DemographicProfile {
    pub fn minority_percentage(&self) -> f64 {
        100.0 - self.race.white
    }

    pub fn low_income_percentage(&self) -> f64 {
        self.income.poverty_rate.unwrap_or(self.income.under_25k)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct DemographicTable {
    profiles: BTreeMap<String, DemographicProfile>,
}

impl DemographicTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let profiles = BUILTIN_PROFILES
            .iter()
            .map(|row| (row.state.to_string(), row.to_profile()))
            .collect();
        Self { profiles }
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GraderError::PathNotFound(path.display().to_string()));
        }
        let raw = std::fs::read_to_string(path)?;
        let parsed: BTreeMap<String, DemographicProfile> = serde_json::from_str(&raw)?;
        let profiles = parsed
            .into_iter()
            .map(|(state, profile)| (state.trim().to_ascii_uppercase(), profile))
            .collect();
        Ok(Self { profiles })
    }

    pub fn merge(&mut self, other: DemographicTable) {
        self.profiles.extend(other.profiles);
    }

    pub fn insert(&mut self, state: &str, profile: DemographicProfile) {
        self.profiles.insert(state.trim().to_ascii_uppercase(), profile);
    }

    pub fn get(&self, state: &str) -> Option<&DemographicProfile> {
        self.profiles.get(&state.trim().to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

struct BuiltinRow {
    state: &'static str,
    race: [f64; 6],
    income: [f64; 6],
    total: u64,
    urban: f64,
    density: f64,
}

impl BuiltinRow {
    fn to_profile(&self) -> DemographicProfile {
        let [white, black, hispanic, asian, native_american, other] = self.race;
        let [under_25k, between_25k_50k, between_50k_75k, between_75k_100k, over_100k, median_income] =
            self.income;
        DemographicProfile {
            race: RaceShares {
                white,
                black,
                hispanic,
                asian,
                native_american,
                other,
            },
            income: IncomeProfile {
                under_25k,
                between_25k_50k,
                between_50k_75k,
                between_75k_100k,
                over_100k,
                median_income,
                poverty_rate: None,
            },
            population: PopulationProfile {
                total: self.total,
                urban_percentage: self.urban,
                density: self.density,
            },
        }
    }
}

// 2020 census figures.
const BUILTIN_PROFILES: &[BuiltinRow] = &[
    BuiltinRow {
        state: "AL",
        race: [68.5, 26.2, 4.2, 1.5, 0.6, 1.0],
        income: [22.0, 25.0, 20.0, 15.0, 18.0, 51734.0],
        total: 5_024_279,
        urban: 59.0,
        density: 96.9,
    },
    BuiltinRow {
        state: "CA",
        race: [36.5, 5.8, 39.4, 15.5, 1.6, 1.2],
        income: [18.0, 20.0, 18.0, 16.0, 28.0, 80440.0],
        total: 39_538_223,
        urban: 95.0,
        density: 253.6,
    },
    BuiltinRow {
        state: "TX",
        race: [41.2, 11.8, 39.7, 5.2, 1.0, 1.1],
        income: [19.0, 23.0, 20.0, 16.0, 22.0, 64034.0],
        total: 29_145_505,
        urban: 84.7,
        density: 112.8,
    },
    BuiltinRow {
        state: "NY",
        race: [55.3, 13.7, 19.3, 9.0, 1.0, 1.7],
        income: [17.0, 20.0, 18.0, 16.0, 29.0, 70249.0],
        total: 20_201_249,
        urban: 87.9,
        density: 421.0,
    },
    BuiltinRow {
        state: "FL",
        race: [53.4, 15.4, 26.5, 2.9, 0.5, 1.3],
        income: [20.0, 24.0, 19.0, 15.0, 22.0, 59227.0],
        total: 21_538_187,
        urban: 91.2,
        density: 397.2,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn builtin_table_covers_five_states() {
        let table = DemographicTable::builtin();
        assert_eq!(table.len(), 5);
        let ca = table.get("ca").expect("CA should be present");
        assert!((ca.minority_percentage() - 63.5).abs() < 1e-9);
        assert!(table.get("WY").is_none());
    }

    #[test]
    fn low_income_prefers_reported_poverty_rate() {
        let mut profile = DemographicTable::builtin()
            .get("AL")
            .cloned()
            .expect("AL should be present");
        assert_eq!(profile.low_income_percentage(), 22.0);
        profile.income.poverty_rate = Some(16.1);
        assert_eq!(profile.low_income_percentage(), 16.1);
    }

    #[test]
    fn load_json_merges_over_builtin() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("census.json");
        fs::write(
            &path,
            r#"{
  "wy": {
    "race": {"white": 84.7},
    "income": {"under_25k": 19.0, "poverty_rate": 10.1},
    "population": {"total": 576851, "urban_percentage": 64.8}
  }
}"#,
        )
        .expect("census file should write");

        let mut table = DemographicTable::builtin();
        table.merge(DemographicTable::load_json(&path).expect("census file should load"));
        let wy = table.get("WY").expect("WY should be merged");
        assert_eq!(wy.population.total, 576_851);
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn load_json_reports_missing_file() {
        let err = DemographicTable::load_json(Path::new("/nonexistent/census.json"))
            .expect_err("missing file should fail");
        assert!(matches!(err, GraderError::PathNotFound(_)));
    }
}
