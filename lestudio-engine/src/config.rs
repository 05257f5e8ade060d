use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WEIGHTS_FILE: &str = "weights.json";

/// Poids du mélange statistique. `streak` ne s'ajoute pas au score : il est
/// conservé dans la configuration mais seul le renversement de série l'exploite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub frequency: f64,
    pub markov1: f64,
    pub markov2: f64,
    pub streak: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            frequency: 0.25,
            markov1: 0.35,
            markov2: 0.25,
            streak: 0.15,
        }
    }
}

impl Weights {
    pub fn as_pairs(&self) -> [(&'static str, f64); 4] {
        [
            ("frequency", self.frequency),
            ("markov1", self.markov1),
            ("markov2", self.markov2),
            ("streak", self.streak),
        ]
    }

    pub fn total(&self) -> f64 {
        self.frequency + self.markov1 + self.markov2 + self.streak
    }

    pub fn validate(&self) -> Result<()> {
        for (name, w) in self.as_pairs() {
            if !w.is_finite() || w < 0.0 {
                bail!("Poids '{}' invalide : {}", name, w);
            }
        }
        let total = self.total();
        if (total - 1.0).abs() > 1e-9 {
            bail!("La somme des poids doit valoir 1.0 (obtenu : {:.6})", total);
        }
        Ok(())
    }
}

pub fn save_weights(weights: &Weights, path: &Path) -> Result<()> {
    weights.validate()?;
    let json = serde_json::to_string_pretty(weights)?;
    std::fs::write(path, json)
        .with_context(|| format!("Impossible d'écrire {:?}", path))?;
    log::info!("Poids sauvegardés dans {}", path.display());
    Ok(())
}

pub fn load_weights(path: &Path) -> Result<Weights> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    let weights: Weights = serde_json::from_str(&json)
        .with_context(|| format!("Fichier de poids mal formé : {:?}", path))?;
    weights.validate()?;
    log::info!("Poids chargés depuis {}", path.display());
    Ok(weights)
}

/// Charge les poids si le fichier existe, sinon retombe sur les valeurs par défaut.
/// Un fichier présent mais invalide reste une erreur.
pub fn load_or_default(path: &Path) -> Result<Weights> {
    if !path.exists() {
        log::warn!("{} absent, poids par défaut utilisés", path.display());
        return Ok(Weights::default());
    }
    load_weights(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_valid() {
        let w = Weights::default();
        assert!(w.validate().is_ok());
        assert!((w.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_bad_sum() {
        let w = Weights { frequency: 0.5, markov1: 0.5, markov2: 0.5, streak: 0.0 };
        assert!(w.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative() {
        let w = Weights { frequency: -0.25, markov1: 0.75, markov2: 0.35, streak: 0.15 };
        assert!(w.validate().is_err());
    }

    #[test]
    fn test_weights_json_roundtrip() {
        let w = Weights { frequency: 0.4, markov1: 0.3, markov2: 0.2, streak: 0.1 };
        let json = serde_json::to_string(&w).unwrap();
        let loaded: Weights = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, w);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("lestudio_weights_{}.json", std::process::id()));
        let w = Weights { frequency: 0.1, markov1: 0.5, markov2: 0.3, streak: 0.1 };
        save_weights(&w, &path).unwrap();
        let loaded = load_weights(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!((loaded.markov1 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let path = std::env::temp_dir().join("lestudio_weights_absent_file.json");
        let w = load_or_default(&path).unwrap();
        assert_eq!(w, Weights::default());
    }
}
