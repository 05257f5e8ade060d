use std::str::FromStr;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    First,
    Second,
    Tie,
}

impl Outcome {
    /// Ordre canonique : sert à tous les départages (argmax, fréquences).
    pub const ALL: [Outcome; 3] = [Outcome::First, Outcome::Second, Outcome::Tie];

    /// Issue opposée. L'égalité n'a pas d'opposé et reste une égalité.
    pub fn complement(&self) -> Outcome {
        match self {
            Outcome::First => Outcome::Second,
            Outcome::Second => Outcome::First,
            Outcome::Tie => Outcome::Tie,
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, Outcome::Tie)
    }

    pub fn symbol(&self) -> char {
        match self {
            Outcome::First => 'D',
            Outcome::Second => 'V',
            Outcome::Tie => 'E',
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::First => write!(f, "Domicile"),
            Outcome::Second => write!(f, "Visiteur"),
            Outcome::Tie => write!(f, "Égalité"),
        }
    }
}

impl FromStr for Outcome {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "d" | "domicile" | "1" | "h" | "home" => Ok(Outcome::First),
            "v" | "visiteur" | "2" | "a" | "away" => Ok(Outcome::Second),
            "e" | "egalite" | "égalité" | "x" | "t" | "tie" => Ok(Outcome::Tie),
            other => bail!("Issue inconnue : '{}' (attendu : D, V ou E)", other),
        }
    }
}

/// Découpe une séquence d'issues (espaces ou virgules), dans l'ordre donné.
pub fn parse_sequence(input: &str) -> Result<Vec<Outcome>> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Outcome::from_str)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Valeur de comparaison : 2..10 puis J=11, Q=12, K=13, A=14.
    pub fn value(&self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Rank {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_uppercase();
        match Rank::ALL.iter().find(|r| r.label() == normalized) {
            Some(&rank) => Ok(rank),
            None => bail!("Carte invalide : '{}' (attendu : 2-10, J, Q, K, A)", s.trim()),
        }
    }
}

/// Compare les cartes des deux côtés et en déduit l'issue de la manche.
pub fn compare(home: Rank, away: Rank) -> Outcome {
    match home.value().cmp(&away.value()) {
        std::cmp::Ordering::Greater => Outcome::First,
        std::cmp::Ordering::Less => Outcome::Second,
        std::cmp::Ordering::Equal => Outcome::Tie,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub cards: Option<(Rank, Rank)>,
    pub outcome: Outcome,
}

impl Round {
    pub fn from_outcome(outcome: Outcome) -> Self {
        Self { cards: None, outcome }
    }

    pub fn from_cards(home: Rank, away: Rank) -> Self {
        Self {
            cards: Some((home, away)),
            outcome: compare(home, away),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::Low => write!(f, "Faible"),
            Confidence::Medium => write!(f, "Moyenne"),
            Confidence::High => write!(f, "Élevée"),
        }
    }
}
