use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use lestudio_core::ledger::Settlement;
use lestudio_core::models::{Confidence, Outcome, Round};

use crate::config::Weights;
use crate::dealer::SimulationReport;
use crate::patterns::distribution::Distribution;
use crate::patterns::Classification;
use crate::predictor::Prediction;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn outcome_color(outcome: Outcome) -> Color {
    match outcome {
        Outcome::First => Color::Red,
        Outcome::Second => Color::Blue,
        Outcome::Tie => Color::Yellow,
    }
}

fn confidence_color(confidence: Confidence) -> Color {
    match confidence {
        Confidence::High => Color::Green,
        Confidence::Medium => Color::Yellow,
        Confidence::Low => Color::White,
    }
}

fn risk_color(level: u8) -> Color {
    match level {
        0..=3 => Color::Green,
        4..=5 => Color::Yellow,
        _ => Color::Red,
    }
}

pub fn display_history(rounds: &[Round], last: usize) {
    if rounds.is_empty() {
        println!("Aucune manche enregistrée.");
        return;
    }

    let start = rounds.len().saturating_sub(last);
    println!("\n── Historique ({} dernières sur {}) ──", rounds.len() - start, rounds.len());

    let mut table = new_table();
    table.set_header(vec!["#", "Domicile", "Visiteur", "Résultat"]);

    for (i, round) in rounds.iter().enumerate().skip(start) {
        let (home, away) = match round.cards {
            Some((h, a)) => (h.to_string(), a.to_string()),
            None => ("—".to_string(), "—".to_string()),
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(home),
            Cell::new(away),
            Cell::new(round.outcome).fg(outcome_color(round.outcome)),
        ]);
    }
    println!("{table}");
}

pub fn display_sequence(window: &[Outcome]) -> String {
    window.iter().map(|o| o.symbol().to_string()).collect::<Vec<_>>().join(" ")
}

pub fn display_prediction(prediction: &Prediction) {
    println!("\n== Prédiction statistique ==\n");

    let mut table = new_table();
    let mut header = vec!["Issue".to_string()];
    for (name, _) in &prediction.components {
        header.push(name.clone());
    }
    header.push("Mélange".to_string());
    header.push("Final".to_string());
    table.set_header(&header);

    for outcome in Outcome::ALL {
        let mut row = vec![Cell::new(outcome).fg(outcome_color(outcome))];
        for (_, scores) in &prediction.components {
            row.push(Cell::new(format!("{:.4}", scores.get(outcome))));
        }
        row.push(Cell::new(format!("{:.4}", prediction.blended.get(outcome))));
        let final_cell = Cell::new(format!("{:.4}", prediction.scores.get(outcome)));
        if outcome == prediction.outcome {
            row.push(final_cell.fg(Color::Green));
        } else {
            row.push(final_cell);
        }
        table.add_row(row);
    }
    println!("{table}");

    if prediction.cold_start {
        println!("(Moins de 10 manches : fréquence simple uniquement)");
    }
    if prediction.reversal {
        println!("(Série déjà observée ≥ 3 : renversement appliqué sur la dernière issue)");
    }

    let mut summary = new_table();
    summary.add_row(vec![
        Cell::new("Suggestion"),
        Cell::new(prediction.outcome).fg(outcome_color(prediction.outcome)),
        Cell::new(prediction.confidence).fg(confidence_color(prediction.confidence)),
    ]);
    println!("{summary}");
    println!("{}", prediction.advice());
}

pub fn display_classification(window: &[Outcome], classification: &Classification, risk: u8, dist: &Distribution) {
    println!("\n== Analyse de motif ==\n");
    println!("Fenêtre (plus récent à gauche) : {}", display_sequence(window));

    let f = &classification.features;
    let mut table = new_table();
    table.set_header(vec!["Alternances", "Répétition max", "Doubles", "Triples", "Miroir", "Zig-zag", "Égalités"]);
    table.add_row(vec![
        f.alternations.to_string(),
        f.max_repetition.to_string(),
        f.doubles.to_string(),
        f.triples.to_string(),
        if f.mirror { "oui" } else { "non" }.to_string(),
        if f.zigzag_break { "oui" } else { "non" }.to_string(),
        f.ties.to_string(),
    ]);
    println!("{table}");

    let mut table = new_table();
    table.add_row(vec![Cell::new("Motif"), Cell::new(classification.label).fg(Color::Cyan)]);
    if let Some(strategy) = classification.strategy {
        table.add_row(vec![Cell::new("Stratégie"), Cell::new(strategy)]);
    }
    if let Some(suggestion) = &classification.suggestion {
        table.add_row(vec![Cell::new("Conseil"), Cell::new(suggestion)]);
    }
    table.add_row(vec![
        Cell::new("Risque de manipulation"),
        Cell::new(format!("{}/9", risk)).fg(risk_color(risk)),
    ]);
    println!("{table}");

    let mut table = new_table();
    table.set_header(vec!["Issue", "Probabilité", ""]);
    for outcome in Outcome::ALL {
        let pct = dist.get(outcome);
        let bar = "█".repeat((pct.max(0) as usize) / 3);
        table.add_row(vec![
            Cell::new(outcome).fg(outcome_color(outcome)),
            Cell::new(format!("{} %", pct)),
            Cell::new(bar),
        ]);
    }
    println!("{table}");
}

pub fn display_settlement(settlement: &Settlement, stake: u64) {
    println!("Résultat de la manche : {}", settlement.outcome);
    if settlement.won {
        println!("Vous gagnez {} unités.", settlement.gain);
    } else {
        println!("Vous perdez {} unités.", stake);
    }
    println!("Solde actuel : {}", settlement.balance);
}

pub fn display_weights(weights: &Weights) {
    println!("\n== Poids du mélange ==\n");

    let mut table = new_table();
    table.set_header(vec!["Composante", "Poids", "Contribution"]);
    for (name, weight) in weights.as_pairs() {
        let bar = "█".repeat((weight * 30.0).round() as usize);
        table.add_row(vec![name.to_string(), format!("{:.4}", weight), bar]);
    }
    println!("{table}");
    println!("(Le poids « streak » n'entre pas dans la somme : il ne sert qu'au renversement de série.)");
}

pub fn display_simulation(report: &SimulationReport, seed: u64) {
    println!("\n== Simulation ({} manches, seed {}) ==\n", report.rounds, seed);

    let mut table = new_table();
    table.set_header(vec!["Issue", "Manches", "Part"]);
    for (i, outcome) in Outcome::ALL.iter().enumerate() {
        let n = report.outcome_counts[i];
        let share = if report.rounds > 0 { n as f64 / report.rounds as f64 } else { 0.0 };
        table.add_row(vec![
            Cell::new(outcome).fg(outcome_color(*outcome)),
            Cell::new(n),
            Cell::new(format!("{:.1} %", share * 100.0)),
        ]);
    }
    println!("{table}");

    let mut table = new_table();
    table.set_header(vec!["Méthode", "Paris", "Réussis", "Taux"]);
    table.add_row(vec![
        "Prédicteur statistique".to_string(),
        report.rounds.to_string(),
        report.predictor_hits.to_string(),
        format!("{:.1} %", report.predictor_rate() * 100.0),
    ]);
    table.add_row(vec![
        "Classifieur de motifs".to_string(),
        report.pattern_bets.to_string(),
        report.pattern_hits.to_string(),
        format!("{:.1} %", report.pattern_rate() * 100.0),
    ]);
    println!("{table}");

    let mut labels = report.labels.clone();
    labels.sort_by(|a, b| b.1.cmp(&a.1));
    let mut table = new_table();
    table.set_header(vec!["Motif", "Occurrences"]);
    for (label, n) in labels {
        table.add_row(vec![label.to_string(), n.to_string()]);
    }
    println!("{table}");
}
