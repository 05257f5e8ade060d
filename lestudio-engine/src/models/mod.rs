pub mod frequency;
pub mod markov;
pub mod streak;

use lestudio_core::models::Outcome;
use serde::{Deserialize, Serialize};

/// Score par issue. Les opérations suivent l'ordre `Outcome::ALL`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub first: f64,
    pub second: f64,
    pub tie: f64,
}

impl Scores {
    pub fn get(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::First => self.first,
            Outcome::Second => self.second,
            Outcome::Tie => self.tie,
        }
    }

    pub fn set(&mut self, outcome: Outcome, value: f64) {
        match outcome {
            Outcome::First => self.first = value,
            Outcome::Second => self.second = value,
            Outcome::Tie => self.tie = value,
        }
    }

    pub fn add(&mut self, outcome: Outcome, value: f64) {
        let current = self.get(outcome);
        self.set(outcome, current + value);
    }

    pub fn sum(&self) -> f64 {
        self.first + self.second + self.tie
    }

    /// Argmax ; à égalité de score, la première issue de `Outcome::ALL` l'emporte.
    pub fn best(&self) -> (Outcome, f64) {
        let mut best = Outcome::ALL[0];
        let mut best_score = self.get(best);
        for &outcome in &Outcome::ALL[1..] {
            let score = self.get(outcome);
            if score > best_score {
                best = outcome;
                best_score = score;
            }
        }
        (best, best_score)
    }
}

pub trait ForecastModel: Send + Sync {
    fn name(&self) -> &str;
    /// outcomes[0] = issue la plus ancienne. Un contexte jamais observé donne 0.
    fn predict(&self, outcomes: &[Outcome]) -> Scores;
}

pub fn validate_distribution(scores: &Scores) -> bool {
    if Outcome::ALL.iter().any(|&o| scores.get(o) < 0.0) {
        return false;
    }
    (scores.sum() - 1.0).abs() < 1e-9
}

pub fn make_test_outcomes(n: usize) -> Vec<Outcome> {
    // Motif déterministe non périodique sur 3 : D D V E V D V ...
    const PATTERN: [Outcome; 7] = [
        Outcome::First,
        Outcome::First,
        Outcome::Second,
        Outcome::Tie,
        Outcome::Second,
        Outcome::First,
        Outcome::Second,
    ];
    (0..n).map(|i| PATTERN[i % PATTERN.len()]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_tie_break_follows_order() {
        let scores = Scores { first: 0.3, second: 0.3, tie: 0.3 };
        assert_eq!(scores.best().0, Outcome::First);

        let scores = Scores { first: 0.1, second: 0.4, tie: 0.4 };
        assert_eq!(scores.best().0, Outcome::Second);
    }

    #[test]
    fn test_add_and_sum() {
        let mut scores = Scores::default();
        scores.add(Outcome::Tie, 0.25);
        scores.add(Outcome::Tie, 0.25);
        scores.add(Outcome::First, 0.5);
        assert!((scores.tie - 0.5).abs() < 1e-12);
        assert!(validate_distribution(&scores));
    }

    #[test]
    fn test_validate_distribution_negative() {
        let scores = Scores { first: 1.2, second: -0.2, tie: 0.0 };
        assert!(!validate_distribution(&scores));
    }
}
