use std::collections::HashMap;
use std::hash::Hash;

use lestudio_core::models::Outcome;

use super::{ForecastModel, Scores};

pub type Order1Table = HashMap<(Outcome, Outcome), f64>;
pub type Order2Table = HashMap<((Outcome, Outcome), Outcome), f64>;

/// Comptage générique : pour chaque fenêtre (contexte, suivant), divise le
/// nombre de transitions par le nombre d'occurrences du contexte.
fn estimate<K, F>(outcomes: &[Outcome], order: usize, context_of: F) -> HashMap<(K, Outcome), f64>
where
    K: Eq + Hash + Copy,
    F: Fn(&[Outcome]) -> K,
{
    if outcomes.len() <= order {
        return HashMap::new();
    }

    let mut transitions: HashMap<(K, Outcome), u32> = HashMap::new();
    let mut totals: HashMap<K, u32> = HashMap::new();

    for window in outcomes.windows(order + 1) {
        let context = context_of(&window[..order]);
        *transitions.entry((context, window[order])).or_insert(0) += 1;
        *totals.entry(context).or_insert(0) += 1;
    }

    transitions
        .into_iter()
        .map(|((context, next), count)| {
            let total = totals[&context] as f64;
            ((context, next), count as f64 / total)
        })
        .collect()
}

/// P(suivant | précédent). Une transition jamais vue est absente de la table.
pub fn transitions_order1(outcomes: &[Outcome]) -> Order1Table {
    estimate(outcomes, 1, |ctx| ctx[0])
}

/// P(suivant | deux précédents), contexte ordonné (avant-dernier, dernier).
pub fn transitions_order2(outcomes: &[Outcome]) -> Order2Table {
    estimate(outcomes, 2, |ctx| (ctx[0], ctx[1]))
}

pub struct MarkovModel {
    order: usize,
}

impl MarkovModel {
    pub fn order1() -> Self {
        Self { order: 1 }
    }

    pub fn order2() -> Self {
        Self { order: 2 }
    }
}

impl ForecastModel for MarkovModel {
    fn name(&self) -> &str {
        match self.order {
            1 => "Markov-1",
            _ => "Markov-2",
        }
    }

    fn predict(&self, outcomes: &[Outcome]) -> Scores {
        let mut scores = Scores::default();
        let n = outcomes.len();

        match self.order {
            1 => {
                let Some(&last) = outcomes.last() else {
                    return scores;
                };
                let table = transitions_order1(outcomes);
                for next in Outcome::ALL {
                    scores.set(next, table.get(&(last, next)).copied().unwrap_or(0.0));
                }
            }
            _ => {
                if n < 2 {
                    return scores;
                }
                let context = (outcomes[n - 2], outcomes[n - 1]);
                let table = transitions_order2(outcomes);
                for next in Outcome::ALL {
                    scores.set(next, table.get(&(context, next)).copied().unwrap_or(0.0));
                }
            }
        }

        scores
    }
}
