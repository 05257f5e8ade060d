use lestudio_core::models::Outcome;

/// Caractéristiques structurelles d'une fenêtre récente.
/// window[0] = issue la plus récente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Features {
    pub len: usize,
    /// Paires adjacentes sans égalité dont les deux issues diffèrent.
    pub alternations: usize,
    /// Plus longue série d'issues identiques hors égalités.
    pub max_repetition: usize,
    pub doubles: usize,
    pub triples: usize,
    pub mirror: bool,
    pub zigzag_break: bool,
    pub ties: usize,
}

impl Features {
    pub fn extract(window: &[Outcome]) -> Self {
        Self {
            len: window.len(),
            alternations: alternation_count(window),
            max_repetition: max_repetition(window),
            doubles: blocks(window, 2),
            triples: blocks(window, 3),
            mirror: is_mirror(window),
            zigzag_break: has_zigzag(window),
            ties: tie_density(window),
        }
    }
}

pub fn alternation_count(window: &[Outcome]) -> usize {
    window
        .windows(2)
        .filter(|p| !p[0].is_tie() && !p[1].is_tie() && p[0] != p[1])
        .count()
}

pub fn max_repetition(window: &[Outcome]) -> usize {
    let mut best = 0;
    let mut run = 0;
    let mut previous: Option<Outcome> = None;

    for &outcome in window {
        if outcome.is_tie() {
            run = 0;
            previous = None;
            continue;
        }
        run = if previous == Some(outcome) { run + 1 } else { 1 };
        previous = Some(outcome);
        best = best.max(run);
    }
    best
}

/// Blocs disjoints de `size` issues identiques (hors égalité), balayage glouton
/// de gauche à droite : un bloc trouvé est sauté en entier.
pub fn blocks(window: &[Outcome], size: usize) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i + size <= window.len() {
        let head = window[i];
        if !head.is_tie() && window[i..i + size].iter().all(|&o| o == head) {
            count += 1;
            i += size;
        } else {
            i += 1;
        }
    }
    count
}

/// Palindrome une fois les égalités retirées, sur une fenêtre d'au moins 6 issues
/// (égalités comprises) dont au moins 2 décisives.
pub fn is_mirror(window: &[Outcome]) -> bool {
    if window.len() < 6 {
        return false;
    }
    let decisive: Vec<Outcome> = window.iter().copied().filter(|o| !o.is_tie()).collect();
    decisive.len() >= 2 && decisive.iter().eq(decisive.iter().rev())
}

/// Vrai s'il existe quatre issues consécutives A, B, A, B (sans égalité, A ≠ B).
pub fn has_zigzag(window: &[Outcome]) -> bool {
    window.windows(4).any(|w| {
        w.iter().all(|o| !o.is_tie()) && w[0] != w[1] && w[0] == w[2] && w[1] == w[3]
    })
}

pub fn tie_density(window: &[Outcome]) -> usize {
    window.iter().filter(|o| o.is_tie()).count()
}

/// Une égalité figure-t-elle parmi les `n` issues les plus récentes ?
pub fn tie_in_last(window: &[Outcome], n: usize) -> bool {
    window.iter().take(n).any(|o| o.is_tie())
}
