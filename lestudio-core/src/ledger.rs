use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::models::Outcome;

pub const DEFAULT_BALANCE: u64 = 1000;
/// Une égalité gagnante rapporte 11 fois la mise.
pub const TIE_PAYOUT: u64 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    pub pick: Outcome,
    pub stake: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub outcome: Outcome,
    pub won: bool,
    pub gain: u64,
    pub balance: u64,
}

/// Solde fictif (aucune somme réelle n'est en jeu).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    balance: u64,
}

impl Ledger {
    pub fn new(balance: u64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn validate(&self, bet: &Bet) -> Result<()> {
        if bet.stake == 0 {
            bail!("Mise invalide : doit être strictement positive");
        }
        if bet.stake > self.balance {
            bail!("Solde insuffisant : mise {} > solde {}", bet.stake, self.balance);
        }
        Ok(())
    }

    pub fn settle(&mut self, bet: &Bet, outcome: Outcome) -> Result<Settlement> {
        self.validate(bet)?;

        let won = bet.pick == outcome;
        let gain = if !won {
            0
        } else if outcome.is_tie() {
            match bet.stake.checked_mul(TIE_PAYOUT) {
                Some(g) => g,
                None => bail!("Gain hors limites : mise {} x {}", bet.stake, TIE_PAYOUT),
            }
        } else {
            bet.stake
        };

        // Le solde n'est modifié qu'une fois le nouveau montant calculé sans dépassement.
        self.balance = if won {
            match self.balance.checked_add(gain) {
                Some(b) => b,
                None => bail!("Solde hors limites : {} + {}", self.balance, gain),
            }
        } else {
            self.balance - bet.stake
        };

        Ok(Settlement {
            outcome,
            won,
            gain,
            balance: self.balance,
        })
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(DEFAULT_BALANCE)
    }
}
