use lestudio_core::models::{Confidence, Outcome};

use crate::config::Weights;
use crate::models::frequency::{simple_frequency, FrequencyModel};
use crate::models::markov::MarkovModel;
use crate::models::streak::{longest_streak, streak_frequencies};
use crate::models::{ForecastModel, Scores};

/// En dessous de ce nombre de manches, seule la fréquence simple est utilisée.
pub const COLD_START_MIN: usize = 10;
/// Longueur de série (déjà observée pour la dernière issue) déclenchant le renversement.
pub const REVERSAL_STREAK: usize = 3;
pub const REVERSAL_DAMPING: f64 = 0.4;

pub const HIGH_CONFIDENCE: f64 = 0.6;
pub const MEDIUM_CONFIDENCE: f64 = 0.4;

#[derive(Debug, Clone)]
pub struct Prediction {
    pub outcome: Outcome,
    pub confidence: Confidence,
    /// Scores finaux (après un éventuel renversement).
    pub scores: Scores,
    /// Scores du mélange avant renversement.
    pub blended: Scores,
    pub reversal: bool,
    pub cold_start: bool,
    pub components: Vec<(String, Scores)>,
}

impl Prediction {
    pub fn advice(&self) -> String {
        format!(
            "Suggestion : misez sur {} (confiance : {})",
            self.outcome, self.confidence
        )
    }
}

pub fn confidence_tier(score: f64) -> Confidence {
    if score > HIGH_CONFIDENCE {
        Confidence::High
    } else if score > MEDIUM_CONFIDENCE {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

pub struct Predictor {
    weights: Weights,
    frequency: FrequencyModel,
    markov1: MarkovModel,
    markov2: MarkovModel,
}

impl Predictor {
    pub fn new() -> Self {
        Self::with_weights(Weights::default())
    }

    pub fn with_weights(weights: Weights) -> Self {
        Self {
            weights,
            frequency: FrequencyModel::new(),
            markov1: MarkovModel::order1(),
            markov2: MarkovModel::order2(),
        }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// outcomes[0] = manche la plus ancienne.
    pub fn predict(&self, outcomes: &[Outcome]) -> Prediction {
        if outcomes.len() < COLD_START_MIN {
            let freq = simple_frequency(outcomes);
            let (best, _) = freq.best();
            log::debug!("Démarrage à froid ({} manches) : {}", outcomes.len(), best);
            return Prediction {
                outcome: best,
                confidence: Confidence::Low,
                scores: freq,
                blended: freq,
                reversal: false,
                cold_start: true,
                components: vec![(self.frequency.name().to_string(), freq)],
            };
        }

        let freq = self.frequency.predict(outcomes);
        let m1 = self.markov1.predict(outcomes);
        let m2 = self.markov2.predict(outcomes);
        let has_context2 = outcomes.len() > 1;

        let mut blended = Scores::default();
        for outcome in Outcome::ALL {
            blended.add(outcome, freq.get(outcome) * self.weights.frequency);
        }
        for outcome in Outcome::ALL {
            blended.add(outcome, m1.get(outcome) * self.weights.markov1);
        }
        if has_context2 {
            for outcome in Outcome::ALL {
                blended.add(outcome, m2.get(outcome) * self.weights.markov2);
            }
        }

        let last = outcomes[outcomes.len() - 1];
        let streaks = streak_frequencies(outcomes);
        let reversal = longest_streak(&streaks, last) >= REVERSAL_STREAK;

        let mut scores = blended;
        if reversal {
            let damped = scores.get(last) * REVERSAL_DAMPING;
            scores.set(last, damped);
            let others: Vec<Outcome> = Outcome::ALL.iter().copied().filter(|&o| o != last).collect();
            let share = (1.0 - damped) / others.len() as f64;
            for outcome in others {
                scores.add(outcome, share);
            }
            log::debug!("Renversement de série appliqué sur {}", last);
        }

        let (best, best_score) = scores.best();

        Prediction {
            outcome: best,
            confidence: confidence_tier(best_score),
            scores,
            blended,
            reversal,
            cold_start: false,
            components: vec![
                (self.frequency.name().to_string(), freq),
                (self.markov1.name().to_string(), m1),
                (self.markov2.name().to_string(), m2),
            ],
        }
    }
}

impl Default for Predictor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::make_test_outcomes;
    use Outcome::{First as D, Second as V, Tie as E};

    #[test]
    fn test_cold_start_is_low_and_frequency_argmax() {
        let predictor = Predictor::new();
        let outcomes = [V, V, D, E, V];
        let pred = predictor.predict(&outcomes);
        assert!(pred.cold_start);
        assert_eq!(pred.outcome, V);
        assert_eq!(pred.confidence, Confidence::Low);
    }

    #[test]
    fn test_cold_start_tie_break() {
        let predictor = Predictor::new();
        let pred = predictor.predict(&[E, V, D]);
        assert_eq!(pred.outcome, D);
        let pred = predictor.predict(&[E, V, V, E]);
        assert_eq!(pred.outcome, V);
    }

    #[test]
    fn test_empty_history() {
        let pred = Predictor::new().predict(&[]);
        assert!(pred.cold_start);
        assert_eq!(pred.outcome, D);
        assert_eq!(pred.confidence, Confidence::Low);
        assert_eq!(pred.scores.sum(), 0.0);
    }

    #[test]
    fn test_blended_without_reversal() {
        // Alternance stricte D/V : aucune série > 1, pas de renversement.
        let outcomes: Vec<Outcome> = (0..12).map(|i| if i % 2 == 0 { D } else { V }).collect();
        let pred = Predictor::new().predict(&outcomes);
        assert!(!pred.cold_start);
        assert!(!pred.reversal);
        // Dernière issue V : Markov-1 et Markov-2 donnent D avec probabilité 1.
        let expected_d = 0.5 * 0.25 + 0.35 + 0.25;
        assert!((pred.scores.first - expected_d).abs() < 1e-12);
        assert!((pred.scores.second - 0.125).abs() < 1e-12);
        assert_eq!(pred.scores.tie, 0.0);
        assert_eq!(pred.outcome, D);
        assert_eq!(pred.confidence, Confidence::High);
    }

    #[test]
    fn test_streak_weight_not_added() {
        let outcomes: Vec<Outcome> = (0..12).map(|i| if i % 2 == 0 { D } else { V }).collect();
        let pred = Predictor::new().predict(&outcomes);
        // Sans renversement, le total vaut freq + markov1 + markov2 = 0.85.
        assert!((pred.blended.sum() - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_reversal_override() {
        let outcomes = vec![D, V, E, D, V, E, D, V, E, V, V, V];
        let pred = Predictor::new().predict(&outcomes);
        assert!(pred.reversal);

        let last = V;
        assert!(pred.scores.get(last) < pred.blended.get(last));
        assert!((pred.scores.get(last) - pred.blended.get(last) * REVERSAL_DAMPING).abs() < 1e-12);

        let share = (1.0 - pred.scores.get(last)) / 2.0;
        for other in [D, E] {
            assert!(pred.scores.get(other) > pred.blended.get(other));
            assert!((pred.scores.get(other) - pred.blended.get(other) - share).abs() < 1e-12);
        }
    }

    #[test]
    fn test_reversal_uses_recorded_max_not_current_run() {
        // Série de 3 D dans le passé ; la série courante de D n'est que de 1.
        let outcomes = vec![D, D, D, V, E, V, E, V, E, V, E, D];
        let pred = Predictor::new().predict(&outcomes);
        assert!(pred.reversal);

        let outcomes = vec![V, V, V, D, E, D, E, D, E, D, E, D];
        let pred = Predictor::new().predict(&outcomes);
        assert!(!pred.reversal);
    }

    #[test]
    fn test_confidence_tiers() {
        assert_eq!(confidence_tier(0.61), Confidence::High);
        assert_eq!(confidence_tier(0.6), Confidence::Medium);
        assert_eq!(confidence_tier(0.41), Confidence::Medium);
        assert_eq!(confidence_tier(0.4), Confidence::Low);
    }

    #[test]
    fn test_components_listed() {
        let outcomes = make_test_outcomes(30);
        let pred = Predictor::new().predict(&outcomes);
        let names: Vec<&str> = pred.components.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Fréquence", "Markov-1", "Markov-2"]);
    }

    #[test]
    fn test_prediction_deterministic() {
        let outcomes = make_test_outcomes(80);
        let predictor = Predictor::new();
        let a = predictor.predict(&outcomes);
        let b = predictor.predict(&outcomes);
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.scores, b.scores);
    }
}
