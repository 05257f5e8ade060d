use std::collections::HashMap;

use lestudio_core::models::Outcome;

pub type StreakTable = HashMap<(Outcome, usize), f64>;

/// Découpe la séquence en séries maximales (issue, longueur).
pub fn runs(outcomes: &[Outcome]) -> Vec<(Outcome, usize)> {
    let mut runs = Vec::new();
    let Some(&first) = outcomes.first() else {
        return runs;
    };

    let mut current = first;
    let mut length = 1usize;
    for &outcome in &outcomes[1..] {
        if outcome == current {
            length += 1;
        } else {
            runs.push((current, length));
            current = outcome;
            length = 1;
        }
    }
    runs.push((current, length));
    runs
}

/// Fréquence relative de chaque couple (issue, longueur de série) parmi
/// toutes les séries observées.
pub fn streak_frequencies(outcomes: &[Outcome]) -> StreakTable {
    let runs = runs(outcomes);
    if runs.is_empty() {
        return HashMap::new();
    }

    let mut counts: HashMap<(Outcome, usize), u32> = HashMap::new();
    for run in &runs {
        *counts.entry(*run).or_insert(0) += 1;
    }

    let total = runs.len() as f64;
    counts
        .into_iter()
        .map(|(key, count)| (key, count as f64 / total))
        .collect()
}

/// Plus longue série jamais enregistrée pour `outcome` (lit uniquement les clés).
pub fn longest_streak(table: &StreakTable, outcome: Outcome) -> usize {
    table
        .keys()
        .filter(|(o, _)| *o == outcome)
        .map(|&(_, length)| length)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::make_test_outcomes;
    use Outcome::{First as D, Second as V, Tie as E};

    #[test]
    fn test_runs() {
        assert_eq!(runs(&[D, D, V, E, E, E, D]), vec![(D, 2), (V, 1), (E, 3), (D, 1)]);
        assert!(runs(&[]).is_empty());
    }

    #[test]
    fn test_streak_frequencies_sum_to_one() {
        let outcomes = make_test_outcomes(45);
        let table = streak_frequencies(&outcomes);
        let sum: f64 = table.values().sum();
        assert!((sum - 1.0).abs() < 1e-9, "Sum = {}", sum);
    }

    #[test]
    fn test_streak_frequencies_values() {
        // Séries : (D,2) (V,1) (D,2) (E,1)
        let table = streak_frequencies(&[D, D, V, D, D, E]);
        assert!((table[&(D, 2)] - 0.5).abs() < 1e-12);
        assert!((table[&(V, 1)] - 0.25).abs() < 1e-12);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_streak_empty() {
        assert!(streak_frequencies(&[]).is_empty());
        assert_eq!(longest_streak(&StreakTable::new(), D), 0);
    }

    #[test]
    fn test_longest_streak() {
        let outcomes = [V, V, V, V, D, V, V];
        let table = streak_frequencies(&outcomes);
        assert_eq!(longest_streak(&table, V), 4);
        assert_eq!(longest_streak(&table, D), 1);
        assert_eq!(longest_streak(&table, E), 0);
    }
}
