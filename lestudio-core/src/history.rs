use std::collections::VecDeque;

use crate::models::{compare, Outcome, Rank, Round};

pub const STATS_CAPACITY: usize = 500;
pub const PATTERN_CAPACITY: usize = 9;

/// Historique borné pour les statistiques : ajout en queue, éviction en tête.
/// L'ordre exposé va du plus ancien au plus récent.
#[derive(Debug, Clone)]
pub struct History {
    rounds: VecDeque<Round>,
    capacity: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(STATS_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rounds: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, round: Round) {
        if self.capacity == 0 {
            return;
        }
        while self.rounds.len() >= self.capacity {
            self.rounds.pop_front();
        }
        self.rounds.push_back(round);
    }

    pub fn record(&mut self, outcome: Outcome) -> Outcome {
        self.push(Round::from_outcome(outcome));
        outcome
    }

    pub fn record_cards(&mut self, home: Rank, away: Rank) -> Outcome {
        let outcome = compare(home, away);
        self.push(Round {
            cards: Some((home, away)),
            outcome,
        });
        outcome
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<Outcome> {
        self.rounds.back().map(|r| r.outcome)
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        self.rounds.iter().map(|r| r.outcome).collect()
    }

    pub fn snapshot(&self) -> Vec<Round> {
        self.rounds.iter().copied().collect()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

/// Fenêtre courte pour le classifieur de motifs : insertion en tête,
/// éviction en queue. L'index 0 est toujours l'issue la plus récente.
#[derive(Debug, Clone)]
pub struct RecentWindow {
    outcomes: Vec<Outcome>,
    capacity: usize,
}

impl RecentWindow {
    pub fn new() -> Self {
        Self::with_capacity(PATTERN_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, outcome: Outcome) {
        if self.capacity == 0 {
            return;
        }
        self.outcomes.insert(0, outcome);
        self.outcomes.truncate(self.capacity);
    }

    pub fn as_slice(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.outcomes.clear();
    }
}

impl Default for RecentWindow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(i: usize) -> Outcome {
        Outcome::ALL[i % 3]
    }

    #[test]
    fn test_history_fifo_eviction() {
        let mut history = History::with_capacity(5);
        for i in 0..8 {
            history.record(cycle(i));
        }
        assert_eq!(history.len(), 5);
        let expected: Vec<Outcome> = (3..8).map(cycle).collect();
        assert_eq!(history.outcomes(), expected);
        assert_eq!(history.last(), Some(cycle(7)));
    }

    #[test]
    fn test_history_default_capacity() {
        let mut history = History::new();
        assert_eq!(history.capacity(), STATS_CAPACITY);
        for i in 0..(STATS_CAPACITY + 20) {
            history.record(cycle(i));
        }
        assert_eq!(history.len(), STATS_CAPACITY);
        assert_eq!(history.outcomes()[0], cycle(20));
    }

    #[test]
    fn test_history_record_cards() {
        let mut history = History::new();
        let outcome = history.record_cards(Rank::Ten, Rank::Four);
        assert_eq!(outcome, Outcome::First);
        let snapshot = history.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].cards, Some((Rank::Ten, Rank::Four)));
    }

    #[test]
    fn test_history_short_snapshot() {
        let mut history = History::new();
        history.record(Outcome::Tie);
        history.record(Outcome::First);
        assert_eq!(history.outcomes(), vec![Outcome::Tie, Outcome::First]);
    }

    #[test]
    fn test_recent_window_newest_first() {
        let mut window = RecentWindow::new();
        for i in 0..12 {
            window.push(cycle(i));
        }
        assert_eq!(window.len(), PATTERN_CAPACITY);
        let expected: Vec<Outcome> = (3..12).rev().map(cycle).collect();
        assert_eq!(window.as_slice(), expected.as_slice());
        assert_eq!(window.as_slice()[0], cycle(11));
    }

    #[test]
    fn test_recent_window_clear() {
        let mut window = RecentWindow::with_capacity(3);
        window.push(Outcome::First);
        window.clear();
        assert!(window.is_empty());
    }
}
