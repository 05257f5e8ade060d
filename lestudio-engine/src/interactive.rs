use std::io::{self, Write};

use anyhow::{Context, Result};

use lestudio_core::models::Outcome;
use lestudio_engine::display;
use lestudio_engine::session::Session;

#[derive(Debug, PartialEq)]
enum InteractiveCommand {
    Bet,
    Record,
    Suggest,
    Pattern,
    History,
    Weights,
    Quit,
}

fn parse_command(input: &str) -> Option<InteractiveCommand> {
    match input.trim().to_lowercase().as_str() {
        "1" | "miser" | "bet" => Some(InteractiveCommand::Bet),
        "2" | "ajouter" | "add" => Some(InteractiveCommand::Record),
        "3" | "suggestion" | "suggest" | "sug" => Some(InteractiveCommand::Suggest),
        "4" | "motif" | "pattern" => Some(InteractiveCommand::Pattern),
        "5" | "historique" | "history" | "hist" => Some(InteractiveCommand::History),
        "6" | "poids" | "weights" => Some(InteractiveCommand::Weights),
        "7" | "quitter" | "quit" | "q" | "exit" => Some(InteractiveCommand::Quit),
        _ => None,
    }
}

fn display_menu(balance: u64) {
    println!();
    println!("── Mode interactif (solde : {}) ──", balance);
    println!("  1. miser      Miser puis saisir les cartes");
    println!("  2. ajouter    Enregistrer une manche sans miser");
    println!("  3. suggestion Prédiction statistique");
    println!("  4. motif      Analyse de motif récent");
    println!("  5. historique Dernières manches");
    println!("  6. poids      Afficher les poids");
    println!("  7. quitter    Quitter");
    println!();
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    if read == 0 {
        anyhow::bail!("Fin de l'entrée");
    }
    Ok(input.trim().to_string())
}

fn prompt_with_default(msg: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}] : ", msg, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

fn cmd_bet_interactive(session: &mut Session) -> Result<()> {
    let pick: Outcome = prompt("Misez sur (D = domicile, V = visiteur, E = égalité) : ")?.parse()?;
    let stake: u64 = prompt("Montant de la mise : ")?
        .parse()
        .context("Montant invalide, entrez un nombre entier")?;
    let home = prompt("Carte du domicile (2-10, J, Q, K, A) : ")?;
    let away = prompt("Carte du visiteur (2-10, J, Q, K, A) : ")?;

    let settlement = session.place_bet(pick, stake, &home, &away)?;
    display::display_settlement(&settlement, stake);
    Ok(())
}

fn cmd_record_interactive(session: &mut Session) -> Result<()> {
    let input = prompt("Cartes « domicile visiteur » (ex : K 7) ou issue seule (D/V/E) : ")?;
    let parts: Vec<&str> = input.split_whitespace().collect();
    let outcome = match parts.as_slice() {
        [home, away] => session.append_cards(home, away)?,
        [single] => session.append_outcome(single.parse()?),
        _ => anyhow::bail!("Entrée attendue : deux cartes ou une issue"),
    };
    println!("Manche enregistrée : {}", outcome);
    Ok(())
}

fn cmd_suggest_interactive(session: &Session) -> Result<()> {
    display::display_prediction(&session.predict());
    Ok(())
}

fn cmd_pattern_interactive(session: &Session) -> Result<()> {
    let classification = session.classify();
    let risk = session.risk_level();
    let dist = session.predict_distribution(classification.label);
    display::display_classification(session.recent_window(), &classification, risk, &dist);
    Ok(())
}

fn cmd_history_interactive(session: &Session) -> Result<()> {
    let n_str = prompt_with_default("Nombre de manches", "20")?;
    let n: usize = n_str.parse().context("Nombre invalide")?;
    display::display_history(&session.history_snapshot(), n);
    Ok(())
}

pub fn run_interactive(session: &mut Session) -> Result<()> {
    println!("=== Le Studio : prédicteur de manches ===");
    println!("Solde initial : {}", session.balance());

    loop {
        display_menu(session.balance());
        let input = match prompt("> ") {
            Ok(s) => s,
            Err(_) => break, // EOF / Ctrl+D
        };

        if input.is_empty() {
            continue;
        }

        let result = match parse_command(&input) {
            Some(InteractiveCommand::Quit) => {
                println!("Fin de la partie. À bientôt !");
                break;
            }
            Some(InteractiveCommand::Bet) => cmd_bet_interactive(session),
            Some(InteractiveCommand::Record) => cmd_record_interactive(session),
            Some(InteractiveCommand::Suggest) => cmd_suggest_interactive(session),
            Some(InteractiveCommand::Pattern) => cmd_pattern_interactive(session),
            Some(InteractiveCommand::History) => cmd_history_interactive(session),
            Some(InteractiveCommand::Weights) => {
                display::display_weights(session.weights());
                Ok(())
            }
            None => {
                println!("Commande inconnue : '{}'. Tapez un numéro (1-7) ou un nom de commande.", input);
                Ok(())
            }
        };

        if let Err(e) = result {
            println!("Erreur: {e:#}");
        }
    }

    Ok(())
}
