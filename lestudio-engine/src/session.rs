use anyhow::{Context, Result};

use lestudio_core::history::{History, RecentWindow};
use lestudio_core::ledger::{Bet, Ledger, Settlement};
use lestudio_core::models::{Outcome, Rank, Round};

use crate::config::Weights;
use crate::patterns::distribution::{predict_distribution, Distribution};
use crate::patterns::risk::risk_level;
use crate::patterns::{classify, Classification, PatternLabel};
use crate::predictor::{Prediction, Predictor};

/// Session de jeu : possède les deux historiques, le prédicteur et le solde.
/// Chaque ajout alimente l'historique statistique (ordre chronologique) et la
/// fenêtre récente du classifieur (plus récent en tête).
pub struct Session {
    history: History,
    recent: RecentWindow,
    predictor: Predictor,
    ledger: Ledger,
}

impl Session {
    pub fn new(weights: Weights, balance: u64) -> Self {
        Self {
            history: History::new(),
            recent: RecentWindow::new(),
            predictor: Predictor::with_weights(weights),
            ledger: Ledger::new(balance),
        }
    }

    fn push(&mut self, round: Round) -> Outcome {
        self.history.push(round);
        self.recent.push(round.outcome);
        round.outcome
    }

    pub fn append_outcome(&mut self, outcome: Outcome) -> Outcome {
        self.push(Round::from_outcome(outcome))
    }

    pub fn append_ranks(&mut self, home: Rank, away: Rank) -> Outcome {
        self.push(Round::from_cards(home, away))
    }

    /// Valide les deux cartes avant tout enregistrement.
    pub fn append_cards(&mut self, home: &str, away: &str) -> Result<Outcome> {
        let (home, away) = parse_cards(home, away)?;
        Ok(self.append_ranks(home, away))
    }

    pub fn predict(&self) -> Prediction {
        self.predictor.predict(&self.history.outcomes())
    }

    pub fn classify(&self) -> Classification {
        classify(self.recent.as_slice())
    }

    pub fn risk_level(&self) -> u8 {
        risk_level(self.recent.as_slice())
    }

    pub fn predict_distribution(&self, label: PatternLabel) -> Distribution {
        predict_distribution(self.recent.as_slice(), label)
    }

    pub fn history_snapshot(&self) -> Vec<Round> {
        self.history.snapshot()
    }

    pub fn recent_window(&self) -> &[Outcome] {
        self.recent.as_slice()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn balance(&self) -> u64 {
        self.ledger.balance()
    }

    pub fn weights(&self) -> &Weights {
        self.predictor.weights()
    }

    /// Mise, cartes et solde sont validés avant que la manche soit enregistrée.
    pub fn place_bet(&mut self, pick: Outcome, stake: u64, home: &str, away: &str) -> Result<Settlement> {
        let bet = Bet { pick, stake };
        self.ledger.validate(&bet)?;
        let (home, away) = parse_cards(home, away)?;
        let outcome = self.append_ranks(home, away);
        self.ledger.settle(&bet, outcome)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Weights::default(), lestudio_core::ledger::DEFAULT_BALANCE)
    }
}

fn parse_cards(home: &str, away: &str) -> Result<(Rank, Rank)> {
    let home: Rank = home.parse().context("Carte du domicile")?;
    let away: Rank = away.parse().context("Carte du visiteur")?;
    Ok((home, away))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lestudio_core::models::Confidence;
    use Outcome::{First as D, Second as V};

    #[test]
    fn test_append_cards_records_both_views() {
        let mut session = Session::default();
        assert_eq!(session.append_cards("K", "3").unwrap(), D);
        assert_eq!(session.append_cards("2", "q").unwrap(), V);
        assert_eq!(session.len(), 2);
        assert_eq!(session.recent_window(), &[V, D]);
        let snapshot = session.history_snapshot();
        assert_eq!(snapshot[0].outcome, D);
        assert_eq!(snapshot[1].cards, Some((Rank::Two, Rank::Queen)));
    }

    #[test]
    fn test_invalid_card_not_recorded() {
        let mut session = Session::default();
        assert!(session.append_cards("1", "K").is_err());
        assert!(session.append_cards("K", "Z").is_err());
        assert!(session.is_empty());
    }

    #[test]
    fn test_snapshot_keeps_last_entries() {
        let mut session = Session::default();
        for i in 0..520 {
            session.append_outcome(if i % 2 == 0 { D } else { V });
        }
        let snapshot = session.history_snapshot();
        assert_eq!(snapshot.len(), 500);
        assert_eq!(snapshot[0].outcome, D);
        assert_eq!(session.recent_window().len(), 9);
        assert_eq!(session.recent_window()[0], V);
    }

    #[test]
    fn test_place_bet_validates_before_recording() {
        let mut session = Session::new(Weights::default(), 100);
        assert!(session.place_bet(D, 0, "K", "2").is_err());
        assert!(session.place_bet(D, 500, "K", "2").is_err());
        assert!(session.place_bet(D, 10, "K", "X").is_err());
        assert!(session.is_empty());
        assert_eq!(session.balance(), 100);

        let s = session.place_bet(D, 10, "K", "2").unwrap();
        assert!(s.won);
        assert_eq!(session.balance(), 110);
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_queries_on_empty_session() {
        let session = Session::default();
        let pred = session.predict();
        assert_eq!(pred.confidence, Confidence::Low);
        assert_eq!(session.classify().label, PatternLabel::InsufficientData);
        assert_eq!(session.risk_level(), 1);
        assert_eq!(session.predict_distribution(PatternLabel::Unclassified), Distribution::NO_SIGNAL);
    }

    #[test]
    fn test_ping_pong_through_session() {
        let mut session = Session::default();
        for o in [D, V, D, V, D, V, D] {
            session.append_outcome(o);
        }
        let c = session.classify();
        assert_eq!(c.label, PatternLabel::PingPong);
        let dist = session.predict_distribution(c.label);
        assert_eq!(dist.second, 70);
    }
}
