use chrono::Datelike;
use indicatif::ProgressBar;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use lestudio_core::models::{Outcome, Rank};

use crate::patterns::PatternLabel;
use crate::session::Session;

/// Génère un seed déterministe basé sur la date du jour (YYYYMMDD).
pub fn date_seed() -> u64 {
    let today = chrono::Local::now().date_naive();
    let y = today.year() as u64;
    let m = today.month() as u64;
    let d = today.day() as u64;
    y * 10_000 + m * 100 + d
}

/// Donneur pseudo-aléatoire : deux cartes indépendantes et uniformes par manche.
pub struct Dealer {
    rng: StdRng,
}

impl Dealer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn draw(&mut self) -> Rank {
        Rank::ALL[self.rng.random_range(0..Rank::ALL.len())]
    }

    pub fn deal(&mut self) -> (Rank, Rank) {
        let home = self.draw();
        let away = self.draw();
        (home, away)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationReport {
    pub rounds: usize,
    pub predictor_hits: usize,
    pub pattern_bets: usize,
    pub pattern_hits: usize,
    pub outcome_counts: [usize; 3],
    pub labels: Vec<(PatternLabel, usize)>,
}

impl SimulationReport {
    pub fn predictor_rate(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.predictor_hits as f64 / self.rounds as f64
        }
    }

    pub fn pattern_rate(&self) -> f64 {
        if self.pattern_bets == 0 {
            0.0
        } else {
            self.pattern_hits as f64 / self.pattern_bets as f64
        }
    }

    fn count_label(&mut self, label: PatternLabel) {
        match self.labels.iter_mut().find(|(l, _)| *l == label) {
            Some((_, n)) => *n += 1,
            None => self.labels.push((label, 1)),
        }
    }
}

fn outcome_index(outcome: Outcome) -> usize {
    match outcome {
        Outcome::First => 0,
        Outcome::Second => 1,
        Outcome::Tie => 2,
    }
}

/// Pari implicite du classifieur : l'issue la mieux notée de sa distribution,
/// seulement quand un motif est reconnu.
fn pattern_pick(session: &Session, label: PatternLabel) -> Option<Outcome> {
    if matches!(label, PatternLabel::InsufficientData | PatternLabel::Unclassified) {
        return None;
    }
    let dist = session.predict_distribution(label);
    let mut best = Outcome::ALL[0];
    for &outcome in &Outcome::ALL[1..] {
        if dist.get(outcome) > dist.get(best) {
            best = outcome;
        }
    }
    Some(best)
}

/// Joue `rounds` manches : chaque prédiction est faite avant la donne puis
/// comparée à l'issue réelle.
pub fn simulate(session: &mut Session, dealer: &mut Dealer, rounds: usize, pb: &ProgressBar) -> SimulationReport {
    let mut report = SimulationReport::default();

    for _ in 0..rounds {
        let prediction = session.predict();
        let classification = session.classify();
        let pick = pattern_pick(session, classification.label);
        report.count_label(classification.label);

        let (home, away) = dealer.deal();
        let outcome = session.append_ranks(home, away);

        report.rounds += 1;
        report.outcome_counts[outcome_index(outcome)] += 1;
        if prediction.outcome == outcome {
            report.predictor_hits += 1;
        }
        if let Some(pick) = pick {
            report.pattern_bets += 1;
            if pick == outcome {
                report.pattern_hits += 1;
            }
        }
        pb.inc(1);
    }

    log::info!(
        "Simulation : {} manches, prédicteur {:.1} %, motifs {:.1} % sur {} paris",
        report.rounds,
        report.predictor_rate() * 100.0,
        report.pattern_rate() * 100.0,
        report.pattern_bets,
    );
    report
}
