use crate::analyze::keywords::scan;
use crate::types::demographics::DemographicProfile;
use crate::types::scoring::{ImpactDetail, Score};

pub const RACIAL_WEIGHT: f64 = 40.0;
pub const INCOME_WEIGHT: f64 = 40.0;
pub const STATE_WEIGHT: f64 = 20.0;

const BASE_SCORE: Score = 50.0;

pub const POSITIVE_RACIAL: &[(&str, f64)] = &[
    ("racial equity", 20.0),
    ("bias training", 15.0),
    ("discrimination", 12.0),
    ("civil rights", 15.0),
    ("equal treatment", 12.0),
    ("disparate impact", 18.0),
    ("minority communities", 10.0),
    ("diversity", 8.0),
    ("inclusion", 8.0),
];

pub const NEGATIVE_RACIAL: &[(&str, f64)] = &[
    ("profiling", -20.0),
    ("stop and frisk", -18.0),
    ("gang enhancement", -15.0),
    ("drug war", -15.0),
    ("zero tolerance", -12.0),
];

pub const POSITIVE_INCOME: &[(&str, f64)] = &[
    ("job training", 18.0),
    ("employment assistance", 15.0),
    ("workforce development", 15.0),
    ("public defender", 15.0),
    ("legal aid", 12.0),
    ("fee waiver", 10.0),
    ("affordable housing", 10.0),
    ("education funding", 12.0),
];

pub const NEGATIVE_INCOME: &[(&str, f64)] = &[
    ("court fees", -12.0),
    ("fines and penalties", -15.0),
    ("asset forfeiture", -20.0),
    ("bail increase", -12.0),
    ("license suspension", -10.0),
    ("employment restrictions", -15.0),
    ("housing restrictions", -12.0),
    ("benefit restrictions", -18.0),
];

fn pairs(table: &'static [(&'static str, f64)]) -> impl Iterator<Item = (&'static str, f64)> {
    table.iter().copied()
}

pub fn racial_impact(text: &str, profile: &DemographicProfile) -> ImpactDetail {
    let positive = scan(text, pairs(POSITIVE_RACIAL));
    let negative = scan(text, pairs(NEGATIVE_RACIAL));
    let mut score = BASE_SCORE + positive.total + negative.total;

    let minority = profile.minority_percentage();
    if minority > 40.0 {
        score += (score - BASE_SCORE) * 0.3;
    } else if minority < 20.0 {
        score += (score - BASE_SCORE) * 0.7;
    }

    ImpactDetail {
        score: score.clamp(0.0, 100.0),
        weight: RACIAL_WEIGHT,
        positive_matches: positive.matches,
        negative_matches: negative.matches,
        analysis: format!(
            "Impact on ethnic populations ({minority:.1}% minority share) based on bill content"
        ),
    }
}

pub fn income_impact(text: &str, profile: &DemographicProfile) -> ImpactDetail {
    let positive = scan(text, pairs(POSITIVE_INCOME));
    let negative = scan(text, pairs(NEGATIVE_INCOME));
    let mut score = BASE_SCORE + positive.total + negative.total;

    let low_income = profile.low_income_percentage();
    if low_income > 20.0 && score < BASE_SCORE {
        score -= (score - BASE_SCORE) * 0.3;
    }

    ImpactDetail {
        score: score.clamp(0.0, 100.0),
        weight: INCOME_WEIGHT,
        positive_matches: positive.matches,
        negative_matches: negative.matches,
        analysis: format!(
            "Impact on income levels ({low_income:.1}% low-income share) based on bill content"
        ),
    }
}

pub fn state_impact(keyword_raw: Score, profile: &DemographicProfile) -> ImpactDetail {
    let base = (BASE_SCORE + keyword_raw / 3.0).clamp(0.0, 100.0);

    let population = profile.population.total;
    let population_factor = if population > 5_000_000 {
        1.2
    } else if population < 1_000_000 {
        0.9
    } else {
        1.0
    };

    let urban = profile.population.urban_percentage;
    let urban_factor = if urban > 80.0 {
        1.1
    } else if urban < 40.0 {
        0.95
    } else {
        1.0
    };

    ImpactDetail {
        score: (base * population_factor * urban_factor).clamp(0.0, 100.0),
        weight: STATE_WEIGHT,
        positive_matches: Vec::new(),
        negative_matches: Vec::new(),
        analysis: format!(
            "Population impact (population {population}, {urban:.1}% urban, factors {population_factor} x {urban_factor})"
        ),
    }
}

pub fn weighted_average(racial: &ImpactDetail, income: &ImpactDetail, state: &ImpactDetail) -> Score {
    (racial.score * racial.weight + income.score * income.weight + state.score * state.weight)
        / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::demographics::DemographicTable;

    fn profile(state: &str) -> DemographicProfile {
        DemographicTable::builtin()
            .get(state)
            .cloned()
            .expect("builtin profile should exist")
    }

    #[test]
    fn racial_deviation_is_amplified_for_high_minority_share() {
        // CA minority share 63.5%: 50 + 20 = 70, then + 20 * 0.3 = 76
        let detail = racial_impact("A racial equity act", &profile("CA"));
        assert!((detail.score - 76.0).abs() < 1e-9);
        assert_eq!(detail.positive_matches, vec!["racial equity"]);
        assert_eq!(detail.weight, RACIAL_WEIGHT);
    }

    #[test]
    fn racial_deviation_is_amplified_more_for_low_minority_share() {
        let mut low = profile("AL");
        low.race.white = 85.0;
        // 50 - 20 = 30, then + (-20 * 0.7) = 16
        let detail = racial_impact("ends racial profiling", &low);
        assert!((detail.score - 16.0).abs() < 1e-9);
        assert_eq!(detail.negative_matches, vec!["profiling"]);
    }

    #[test]
    fn racial_score_is_clamped() {
        let text = "racial equity, bias training, discrimination, civil rights, \
                    equal treatment, disparate impact";
        let detail = racial_impact(text, &profile("CA"));
        assert_eq!(detail.score, 100.0);
    }

    #[test]
    fn income_damping_applies_only_below_neutral() {
        // AL low-income share 22%: 50 - 20 = 30, then - (-20 * 0.3) = 36
        let detail = income_impact("expands asset forfeiture", &profile("AL"));
        assert!((detail.score - 36.0).abs() < 1e-9);

        let positive = income_impact("funds legal aid", &profile("AL"));
        assert!((positive.score - 62.0).abs() < 1e-9);
    }

    #[test]
    fn income_damping_skipped_for_low_poverty_states() {
        // NY under-$25k share is 17%
        let detail = income_impact("expands asset forfeiture", &profile("NY"));
        assert!((detail.score - 30.0).abs() < 1e-9);
    }

    #[test]
    fn state_impact_scales_by_population_and_urbanization() {
        // TX: large and urban, (50 + 30 / 3) * 1.2 * 1.1 = 79.2
        let detail = state_impact(30.0, &profile("TX"));
        assert!((detail.score - 79.2).abs() < 1e-9);

        let mut small = profile("AL");
        small.population.total = 600_000;
        small.population.urban_percentage = 35.0;
        // 50 * 0.9 * 0.95 = 42.75
        let detail = state_impact(0.0, &small);
        assert!((detail.score - 42.75).abs() < 1e-9);
    }

    #[test]
    fn neutral_text_blends_to_state_factor() {
        let ca = profile("CA");
        let racial = racial_impact("", &ca);
        let income = income_impact("", &ca);
        let state = state_impact(0.0, &ca);
        assert_eq!(racial.score, 50.0);
        assert_eq!(income.score, 50.0);
        // 50 * 1.2 * 1.1 = 66
        assert!((weighted_average(&racial, &income, &state) - 53.2).abs() < 1e-9);
    }
}
