use lestudio_core::models::Outcome;

use super::{ForecastModel, Scores};

/// Fréquence empirique de chaque issue. Historique vide : tout à 0 (pas 1/3).
pub fn simple_frequency(outcomes: &[Outcome]) -> Scores {
    let mut scores = Scores::default();
    if outcomes.is_empty() {
        return scores;
    }

    for &outcome in outcomes {
        scores.add(outcome, 1.0);
    }

    let total = outcomes.len() as f64;
    for outcome in Outcome::ALL {
        scores.set(outcome, scores.get(outcome) / total);
    }
    scores
}

pub struct FrequencyModel;

impl FrequencyModel {
    pub fn new() -> Self {
        Self
    }
}

impl ForecastModel for FrequencyModel {
    fn name(&self) -> &str {
        "Fréquence"
    }

    fn predict(&self, outcomes: &[Outcome]) -> Scores {
        simple_frequency(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{make_test_outcomes, validate_distribution};

    #[test]
    fn test_frequency_sums_to_one() {
        let outcomes = make_test_outcomes(40);
        let freq = simple_frequency(&outcomes);
        assert!(validate_distribution(&freq), "Sum = {}", freq.sum());
    }

    #[test]
    fn test_frequency_empty_is_zero() {
        let freq = simple_frequency(&[]);
        assert_eq!(freq, Scores::default());
        assert_eq!(freq.sum(), 0.0);
    }

    #[test]
    fn test_frequency_values() {
        let outcomes = [Outcome::First, Outcome::First, Outcome::Tie, Outcome::Second];
        let freq = simple_frequency(&outcomes);
        assert!((freq.first - 0.5).abs() < 1e-12);
        assert!((freq.second - 0.25).abs() < 1e-12);
        assert!((freq.tie - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_frequency_model_name() {
        let model = FrequencyModel::new();
        assert_eq!(model.name(), "Fréquence");
        assert_eq!(model.predict(&[Outcome::Tie]).tie, 1.0);
    }
}
