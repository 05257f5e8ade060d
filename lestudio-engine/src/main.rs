mod interactive;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use lestudio_core::ledger::DEFAULT_BALANCE;
use lestudio_core::models::parse_sequence;
use lestudio_engine::config::{load_or_default, save_weights, Weights, DEFAULT_WEIGHTS_FILE};
use lestudio_engine::dealer::{date_seed, simulate, Dealer};
use lestudio_engine::display;
use lestudio_engine::patterns::classify;
use lestudio_engine::patterns::distribution::predict_distribution;
use lestudio_engine::patterns::risk::risk_level;
use lestudio_engine::predictor::Predictor;
use lestudio_engine::session::Session;

#[derive(Parser)]
#[command(name = "lestudio", about = "Prédicteur de manches Domicile / Visiteur / Égalité")]
struct Cli {
    /// Fichier de poids du mélange statistique
    #[arg(short, long, global = true, default_value = DEFAULT_WEIGHTS_FILE)]
    weights: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mode interactif (mises, suggestions, historique)
    Interactive {
        /// Solde initial (unités fictives)
        #[arg(short, long, default_value_t = DEFAULT_BALANCE)]
        balance: u64,
    },

    /// Prédiction statistique sur une séquence (du plus ancien au plus récent)
    Predict {
        /// Issues séparées par des espaces : D, V ou E
        #[arg(short, long)]
        sequence: String,
    },

    /// Analyse de motif sur une séquence (du plus ancien au plus récent)
    Classify {
        /// Issues séparées par des espaces : D, V ou E
        #[arg(short, long)]
        sequence: String,
    },

    /// Simuler des manches aléatoires et mesurer les taux de réussite
    Simulate {
        /// Nombre de manches
        #[arg(short, long, default_value = "1000")]
        rounds: usize,

        /// Seed pour la reproductibilité (défaut: date du jour YYYYMMDD)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Afficher les poids (ou écrire les poids par défaut avec --init)
    Weights {
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Interactive { balance } => cmd_interactive(&cli.weights, balance),
        Command::Predict { sequence } => cmd_predict(&cli.weights, &sequence),
        Command::Classify { sequence } => cmd_classify(&sequence),
        Command::Simulate { rounds, seed } => cmd_simulate(&cli.weights, rounds, seed),
        Command::Weights { init } => cmd_weights(&cli.weights, init),
    }
}

fn cmd_interactive(weights_path: &Path, balance: u64) -> Result<()> {
    let weights = load_or_default(weights_path)?;
    let mut session = Session::new(weights, balance);
    interactive::run_interactive(&mut session)
}

fn cmd_predict(weights_path: &Path, sequence: &str) -> Result<()> {
    let outcomes = parse_sequence(sequence)?;
    if outcomes.is_empty() {
        bail!("Séquence vide. Exemple : --sequence \"D V V E D\"");
    }
    let predictor = Predictor::with_weights(load_or_default(weights_path)?);
    display::display_prediction(&predictor.predict(&outcomes));
    Ok(())
}

fn cmd_classify(sequence: &str) -> Result<()> {
    let mut window = parse_sequence(sequence)?;
    if window.is_empty() {
        bail!("Séquence vide. Exemple : --sequence \"D V D V D\"");
    }
    // La fenêtre du classifieur commence par l'issue la plus récente.
    window.reverse();
    window.truncate(lestudio_core::history::PATTERN_CAPACITY);

    let classification = classify(&window);
    let risk = risk_level(&window);
    let dist = predict_distribution(&window, classification.label);
    display::display_classification(&window, &classification, risk, &dist);
    Ok(())
}

fn cmd_simulate(weights_path: &Path, rounds: usize, seed: Option<u64>) -> Result<()> {
    let effective_seed = seed.unwrap_or_else(|| {
        let ds = date_seed();
        println!("(Seed du jour : {ds})");
        ds
    });

    let mut session = Session::new(load_or_default(weights_path)?, DEFAULT_BALANCE);
    let mut dealer = Dealer::new(effective_seed);

    let pb = ProgressBar::new(rounds as u64);
    pb.set_style(ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
        .progress_chars("=> "));

    let report = simulate(&mut session, &mut dealer, rounds, &pb);
    pb.finish_with_message("Simulation terminée");

    display::display_simulation(&report, effective_seed);
    Ok(())
}

fn cmd_weights(weights_path: &Path, init: bool) -> Result<()> {
    if init {
        save_weights(&Weights::default(), weights_path)?;
        println!("Poids par défaut écrits dans : {}", weights_path.display());
    }
    let weights = load_or_default(weights_path)?;
    display::display_weights(&weights);
    Ok(())
}
