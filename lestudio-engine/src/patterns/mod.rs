pub mod distribution;
pub mod features;
pub mod risk;

use lestudio_core::models::Outcome;

use features::{tie_in_last, Features};

/// En dessous, aucune règle n'est évaluée.
pub const MIN_WINDOW: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternLabel {
    Surf,
    PingPong,
    DirtyAlternation,
    ZigZag,
    Doubles,
    Triples,
    Mirrored,
    QuantumCollapse,
    Anchor,
    Camouflaged,
    Unclassified,
    InsufficientData,
}

impl PatternLabel {
    pub fn name(&self) -> &'static str {
        match self {
            PatternLabel::Surf => "Surf",
            PatternLabel::PingPong => "Ping-Pong",
            PatternLabel::DirtyAlternation => "Alternance sale",
            PatternLabel::ZigZag => "Zig-Zag",
            PatternLabel::Doubles => "Doubles (2x2)",
            PatternLabel::Triples => "Triples (3x3)",
            PatternLabel::Mirrored => "Miroir",
            PatternLabel::QuantumCollapse => "Effondrement quantique",
            PatternLabel::Anchor => "Ancre (égalité)",
            PatternLabel::Camouflaged => "Camouflé",
            PatternLabel::Unclassified => "Non classé",
            PatternLabel::InsufficientData => "Données insuffisantes",
        }
    }

    pub fn strategy(&self) -> Option<&'static str> {
        let text = match self {
            PatternLabel::Surf => "Longue série en cours : suivre la vague tant qu'elle ne casse pas.",
            PatternLabel::PingPong => "Alternance nette : jouer l'inverse du dernier résultat.",
            PatternLabel::DirtyAlternation => "Alternance avec accrocs : jouer l'inverse, mise réduite.",
            PatternLabel::ZigZag => "Zig-zag prolongé : jouer l'inverse et sortir à la première cassure.",
            PatternLabel::Doubles => "Blocs de deux : compléter la paire, puis inverser.",
            PatternLabel::Triples => "Blocs de trois : accompagner jusqu'à trois, puis inverser.",
            PatternLabel::Mirrored => "Séquence en miroir : anticiper le reflet, prudence sur la mise.",
            PatternLabel::QuantumCollapse => "Trop d'égalités : table instable, rester en retrait ou couvrir l'égalité.",
            PatternLabel::Anchor => "Égalité récente : se caler sur le résultat qui la précède.",
            PatternLabel::Camouflaged => "Séries cachées dans l'alternance : mise minimale uniquement.",
            PatternLabel::Unclassified => "Pas de suggestion claire.",
            PatternLabel::InsufficientData => return None,
        };
        Some(text)
    }
}

impl std::fmt::Display for PatternLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

struct Rule {
    label: PatternLabel,
    matches: fn(&Features, &[Outcome]) -> bool,
}

/// Évaluées dans l'ordre, la première qui correspond l'emporte.
/// L'alternance sale doit rester avant le ping-pong.
const RULES: &[Rule] = &[
    Rule {
        label: PatternLabel::QuantumCollapse,
        matches: |f, _| f.ties >= 3,
    },
    Rule {
        label: PatternLabel::Surf,
        matches: |f, _| f.max_repetition >= 4,
    },
    Rule {
        label: PatternLabel::DirtyAlternation,
        matches: |f, w| {
            f.alternations >= 4 && f.max_repetition <= 2 && f.doubles >= 1 && !tie_in_last(w, 3)
        },
    },
    Rule {
        label: PatternLabel::PingPong,
        matches: |f, w| {
            (3..=6).contains(&f.alternations) && f.max_repetition == 1 && !tie_in_last(w, 3)
        },
    },
    Rule {
        label: PatternLabel::ZigZag,
        matches: |f, _| f.zigzag_break && f.alternations >= 5,
    },
    Rule {
        label: PatternLabel::Triples,
        matches: |f, _| f.triples >= 2,
    },
    Rule {
        label: PatternLabel::Doubles,
        matches: |f, _| f.doubles >= 2 && f.max_repetition == 2,
    },
    Rule {
        label: PatternLabel::Mirrored,
        matches: |f, _| f.mirror,
    },
    Rule {
        label: PatternLabel::Anchor,
        matches: |_, w| tie_in_last(w, 2),
    },
    Rule {
        label: PatternLabel::Camouflaged,
        matches: |f, _| f.alternations >= 3 && f.max_repetition >= 3,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: PatternLabel,
    pub strategy: Option<&'static str>,
    pub suggestion: Option<String>,
    pub features: Features,
}

/// window[0] = issue la plus récente. Fonction pure de la fenêtre.
pub fn classify(window: &[Outcome]) -> Classification {
    let features = Features::extract(window);
    let label = classify_label(window, &features);
    Classification {
        label,
        strategy: label.strategy(),
        suggestion: bet_suggestion(label, window),
        features,
    }
}

pub fn classify_label(window: &[Outcome], features: &Features) -> PatternLabel {
    if window.len() < MIN_WINDOW {
        return PatternLabel::InsufficientData;
    }
    match RULES.iter().find(|rule| (rule.matches)(features, window)) {
        Some(rule) => {
            log::debug!("Motif reconnu : {}", rule.label);
            rule.label
        }
        None => PatternLabel::Unclassified,
    }
}

/// Première issue décisive (hors égalité) en partant de la plus récente.
pub(crate) fn last_decisive(window: &[Outcome]) -> Option<Outcome> {
    window.iter().copied().find(|o| !o.is_tie())
}

/// Longueur de la série décisive en tête de fenêtre (0 si l'index 0 est une égalité).
pub(crate) fn current_run(window: &[Outcome]) -> usize {
    match window.first() {
        Some(&head) if !head.is_tie() => window.iter().take_while(|&&o| o == head).count(),
        _ => 0,
    }
}

/// Les deux dernières issues forment une paire décisive.
pub(crate) fn pair_completed(window: &[Outcome]) -> bool {
    current_run(window) >= 2
}

/// Conseil de mise fondé sur l'issue en cours (index 0) et son opposé.
pub fn bet_suggestion(label: PatternLabel, window: &[Outcome]) -> Option<String> {
    if label == PatternLabel::InsufficientData {
        return None;
    }
    if label == PatternLabel::QuantumCollapse {
        return Some(format!("Rester en retrait, ou couvrir {}", Outcome::Tie));
    }

    let Some(reference) = last_decisive(window) else {
        return Some("Pas de suggestion claire".to_string());
    };
    let opposite = reference.complement();

    let text = match label {
        PatternLabel::Surf => format!("Misez {} (suivre la série)", reference),
        PatternLabel::PingPong => format!("Misez {} (inverser)", opposite),
        PatternLabel::DirtyAlternation => format!("Misez {} avec une mise réduite", opposite),
        PatternLabel::ZigZag => format!("Misez {} ; arrêtez à la première répétition", opposite),
        PatternLabel::Doubles => {
            if pair_completed(window) {
                format!("Paire complète : misez {}", opposite)
            } else {
                format!("Compléter la paire : misez {}", reference)
            }
        }
        PatternLabel::Triples => {
            if current_run(window) >= 3 {
                format!("Bloc de trois terminé : misez {}", opposite)
            } else {
                format!("Compléter le bloc : misez {}", reference)
            }
        }
        PatternLabel::Mirrored => format!("Misez {} (reflet attendu), mise prudente", opposite),
        PatternLabel::Anchor => format!("Misez {} (résultat avant l'égalité)", reference),
        PatternLabel::Camouflaged => format!("Mise minimale sur {}", opposite),
        _ => "Pas de suggestion claire".to_string(),
    };
    Some(text)
}
