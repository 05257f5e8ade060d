use lestudio_core::models::Outcome;

use super::features::Features;
use super::MIN_WINDOW;

pub const DEFAULT_RISK: u8 = 4;

struct RiskRule {
    level: u8,
    matches: fn(&Features) -> bool,
}

const RISK_RULES: &[RiskRule] = &[
    RiskRule { level: 9, matches: |f| f.ties >= 3 },
    RiskRule {
        level: 9,
        matches: |f| f.triples >= 2 && (f.ties >= 1 || f.mirror || f.zigzag_break),
    },
    RiskRule { level: 7, matches: |f| f.triples >= 2 },
    RiskRule { level: 7, matches: |f| f.max_repetition >= 5 },
    RiskRule { level: 3, matches: |f| f.alternations >= 5 && f.max_repetition == 1 },
    RiskRule { level: 5, matches: |f| f.mirror },
    RiskRule { level: 5, matches: |f| f.zigzag_break && f.max_repetition >= 2 },
    RiskRule { level: 3, matches: |f| f.max_repetition >= 4 },
];

/// Niveau de manipulation apparent ∈ {1, 3, 4, 5, 7, 9}. window[0] = plus récent.
pub fn risk_level(window: &[Outcome]) -> u8 {
    if window.len() < MIN_WINDOW {
        return 1;
    }
    let features = Features::extract(window);
    RISK_RULES
        .iter()
        .find(|rule| (rule.matches)(&features))
        .map(|rule| rule.level)
        .unwrap_or(DEFAULT_RISK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Outcome::{First as D, Second as V, Tie as E};

    #[test]
    fn test_short_window_low_risk() {
        assert_eq!(risk_level(&[D, V]), 1);
        assert_eq!(risk_level(&[]), 1);
    }

    #[test]
    fn test_many_ties() {
        assert_eq!(risk_level(&[E, D, E, V, E, D]), 9);
    }

    #[test]
    fn test_triples_alone() {
        assert_eq!(risk_level(&[D, D, D, V, V, V]), 7);
    }

    #[test]
    fn test_triples_with_tie() {
        assert_eq!(risk_level(&[D, D, D, V, V, V, E]), 9);
    }

    #[test]
    fn test_clean_alternation() {
        assert_eq!(risk_level(&[D, V, D, V, D, V, D]), 3);
    }

    #[test]
    fn test_broken_zigzag() {
        assert_eq!(risk_level(&[D, V, D, V, V, E]), 5);
    }

    #[test]
    fn test_long_run() {
        assert_eq!(risk_level(&[V, V, V, V, V, D]), 7);
    }

    #[test]
    fn test_mirror() {
        assert_eq!(risk_level(&[D, V, D, D, D, V, D]), 5);
        assert_eq!(risk_level(&[D, V, E, E, V, D]), 5);
    }

    #[test]
    fn test_default() {
        assert_eq!(risk_level(&[D, D, V, E, D]), DEFAULT_RISK);
    }

    #[test]
    fn test_levels_in_allowed_set() {
        let windows: [&[Outcome]; 5] = [
            &[D, V, E, D, D, V, V, V, E],
            &[V, V, V, V, V, D],
            &[E, E, D, V],
            &[D, D, V, D, D, V],
            &[V, D, D, V, E, D, V, V, D],
        ];
        for w in windows {
            assert!([1, 3, 4, 5, 7, 9].contains(&risk_level(w)), "{:?}", w);
        }
    }
}
