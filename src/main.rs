//! # adaptive-fuzzy — CLI
//!
//! **Ponto de entrada** para exercitar o motor difuso fora do serviço:
//! uma avaliação avulsa, a checagem de monitoramento, o replay de uma
//! sessão gravada ou um lote de observações em paralelo.
//!
//! ## Uso
//!
//! ```bash
//! # Uma avaliação
//! adaptive-fuzzy evaluate --screen-time 15 --accuracy 1 --response-time 10 --emotion happy --level 2
//!
//! # Só a intervenção (aprendiz ainda lendo)
//! adaptive-fuzzy monitor --emotion confused --screen-time 14
//!
//! # Replay de uma sessão (JSON Lines de respostas, resumo na última linha)
//! adaptive-fuzzy replay sessao.jsonl
//!
//! # Lote paralelo (JSON Lines de FeedbackInput)
//! adaptive-fuzzy batch eventos.jsonl
//!
//! # Logs detalhados (fuzzificação e regras ativadas)
//! RUST_LOG=debug adaptive-fuzzy evaluate ...
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use adaptive_fuzzy::core::{FeedbackInput, FeedbackResult};
use adaptive_fuzzy::feed;
use adaptive_fuzzy::inference::AdaptiveEngine;
use adaptive_fuzzy::session::Session;

#[derive(Parser, Debug)]
#[command(
    name = "adaptive-fuzzy",
    version,
    about = "Fuzzy adaptive difficulty engine - emotion, accuracy and timing in, level and intervention out"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one answered question
    Evaluate {
        /// Screen reading time, in seconds
        #[arg(long)]
        screen_time: f64,
        /// Accuracy in [0, 1]
        #[arg(long)]
        accuracy: f64,
        /// Response time, in seconds
        #[arg(long)]
        response_time: f64,
        /// Emotion label from the classifier
        #[arg(long, default_value = "neutral")]
        emotion: String,
        /// Hints used on this question
        #[arg(long, default_value_t = 0)]
        hints: u32,
        /// Current difficulty level (1-5)
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        level: i32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Intervention-only check while the learner is still reading
    Monitor {
        #[arg(long)]
        emotion: String,
        #[arg(long)]
        screen_time: f64,
    },
    /// Replay a JSON Lines file of answer submissions through one session
    Replay {
        path: PathBuf,
    },
    /// Evaluate a JSON Lines file of feedback inputs in parallel
    Batch {
        path: PathBuf,
    },
    /// Print the active rule table
    Rules,
}

fn main() -> Result<()> {
    // RUST_LOG controla o nível; padrão info.
    // Logs vão para stderr para não misturar com a saída JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let engine = AdaptiveEngine::new();

    match cli.command {
        Command::Evaluate {
            screen_time,
            accuracy,
            response_time,
            emotion,
            hints,
            level,
            json,
        } => {
            let input =
                FeedbackInput::new(screen_time, accuracy, response_time, emotion, hints, level);
            if input.is_out_of_domain() {
                tracing::warn!(?input, "Entrada fora do domínio esperado, avaliando mesmo assim");
            }
            let result = engine.process_feedback(&input);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }
        }
        Command::Monitor {
            emotion,
            screen_time,
        } => {
            println!("{}", engine.monitor(&emotion, screen_time));
        }
        Command::Replay { path } => {
            let submissions = feed::load_submissions(&path)?;
            let mut session = Session::new(&engine);
            for submission in &submissions {
                let outcome = session.submit(submission);
                println!("{}", serde_json::to_string(&outcome)?);
            }
            // última linha: o resumo da sessão
            let summary = session.complete();
            println!("{}", serde_json::to_string(&summary)?);
        }
        Command::Batch { path } => {
            let inputs = feed::load_inputs(&path)?;
            for result in engine.process_batch(&inputs) {
                println!("{}", serde_json::to_string(&result)?);
            }
        }
        Command::Rules => {
            for rule in engine.rules().rules() {
                println!("{}", rule);
            }
        }
    }

    Ok(())
}

fn print_result(result: &FeedbackResult) {
    println!(
        "level {} -> {} (adjustment {:+.3})",
        result.current_level, result.new_level, result.adjustment
    );
    println!("action:       {} (confidence {:.3})", result.action, result.confidence);
    println!("intervention: {}", result.intervention);
    println!("buckets:      {}", result.fuzzy_outputs);
}
