use lestudio_core::models::Outcome;

use super::{current_run, last_decisive, pair_completed, PatternLabel};

/// Pourcentages entiers par issue. Chaque valeur est arrondie séparément :
/// la somme peut s'écarter de 100 d'une unité.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Distribution {
    pub first: i32,
    pub second: i32,
    pub tie: i32,
}

impl Distribution {
    pub const NO_SIGNAL: Distribution = Distribution { first: 33, second: 33, tie: 34 };

    pub fn get(&self, outcome: Outcome) -> i32 {
        match outcome {
            Outcome::First => self.first,
            Outcome::Second => self.second,
            Outcome::Tie => self.tie,
        }
    }

    pub fn total(&self) -> i32 {
        self.first + self.second + self.tie
    }
}

/// Répartition brute (répéter, inverser, égalité) propre à chaque motif.
fn label_split(label: PatternLabel, window: &[Outcome]) -> [f64; 3] {
    match label {
        PatternLabel::Surf => [70.0, 20.0, 10.0],
        PatternLabel::PingPong => [20.0, 70.0, 10.0],
        PatternLabel::DirtyAlternation => [30.0, 55.0, 15.0],
        PatternLabel::ZigZag => [25.0, 65.0, 10.0],
        PatternLabel::Doubles => {
            if pair_completed(window) {
                [30.0, 60.0, 10.0]
            } else {
                [60.0, 30.0, 10.0]
            }
        }
        PatternLabel::Triples => {
            if current_run(window) >= 3 {
                [25.0, 65.0, 10.0]
            } else {
                [60.0, 30.0, 10.0]
            }
        }
        PatternLabel::Mirrored => [40.0, 45.0, 15.0],
        PatternLabel::QuantumCollapse => [30.0, 30.0, 40.0],
        PatternLabel::Anchor => [45.0, 30.0, 25.0],
        PatternLabel::Camouflaged => [40.0, 40.0, 20.0],
        PatternLabel::Unclassified | PatternLabel::InsufficientData => [0.0, 0.0, 0.0],
    }
}

/// Égalité en index 0 ou 1 : remplace la répartition du motif.
/// Les motifs d'égalité se calent sur l'issue d'avant, les autres penchent vers l'inversion.
fn tie_override(label: PatternLabel, window: &[Outcome]) -> Option<[f64; 3]> {
    let tie_family = matches!(label, PatternLabel::Anchor | PatternLabel::QuantumCollapse);
    let tie_now = window.first().is_some_and(|o| o.is_tie());
    let tie_before = window.get(1).is_some_and(|o| o.is_tie());

    match (tie_now, tie_before, tie_family) {
        (true, _, true) => Some([55.0, 25.0, 20.0]),
        (true, _, false) => Some([25.0, 60.0, 15.0]),
        (false, true, true) => Some([50.0, 30.0, 20.0]),
        (false, true, false) => Some([30.0, 60.0, 10.0]),
        _ => None,
    }
}

pub fn normalize(raw: [f64; 3]) -> [i32; 3] {
    let total: f64 = raw.iter().sum();
    if total <= 0.0 {
        return [
            Distribution::NO_SIGNAL.first,
            Distribution::NO_SIGNAL.second,
            Distribution::NO_SIGNAL.tie,
        ];
    }
    raw.map(|v| (v / total * 100.0).round() as i32)
}

/// Distribution prédite pour le prochain coup. window[0] = plus récent.
pub fn predict_distribution(window: &[Outcome], label: PatternLabel) -> Distribution {
    if window.is_empty() {
        return Distribution::NO_SIGNAL;
    }
    // Référence : l'issue décisive la plus récente (celle d'avant l'égalité le cas échéant).
    let Some(reference) = last_decisive(window) else {
        return Distribution::NO_SIGNAL;
    };

    let split = label_split(label, window);
    let raw = if split.iter().all(|&v| v == 0.0) {
        split
    } else {
        tie_override(label, window).unwrap_or(split)
    };
    let [repeat, invert, tie] = normalize(raw);

    let mut dist = Distribution { first: 0, second: 0, tie };
    match reference {
        Outcome::First => {
            dist.first = repeat;
            dist.second = invert;
        }
        _ => {
            dist.second = repeat;
            dist.first = invert;
        }
    }
    dist
}
