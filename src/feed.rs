//! # Feed — Leitura de Eventos em JSON Lines
//!
//! Carrega sequências de eventos para os comandos `replay` e `batch`
//! da CLI. Cada linha não vazia é um objeto JSON; linhas em branco e
//! linhas começando com `#` são ignoradas.
//!
//! ```text
//! {"screen_time": 15, "accuracy": 1.0, "response_time": 10, "emotion": "happy", "current_level": 2}
//! # comentário
//! {"screen_time": 20, "accuracy": 0.0, "response_time": 50, "emotion": "fear", "hints_used": 1, "current_level": 3}
//! ```
//!
//! Uma linha inválida aborta a leitura com o número da linha (1-based).

use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::FeedbackInput;
use crate::session::AnswerSubmission;

/// Falha de parse numa linha do feed.
#[derive(Debug, Error)]
#[error("linha {line}: {source}")]
pub struct FeedError {
    pub line: usize,
    #[source]
    pub source: serde_json::Error,
}

/// Lê todos os eventos de um leitor JSON Lines.
pub fn read_events<T, R>(reader: R) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: BufRead,
{
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Falha ao ler linha {}", index + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(trimmed).map_err(|source| FeedError {
            line: index + 1,
            source,
        })?;
        events.push(event);
    }
    Ok(events)
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Falha ao abrir {}", path.display()))?;
    let events = read_events(std::io::BufReader::new(file))
        .with_context(|| format!("Falha ao desserializar {}", path.display()))?;
    tracing::info!(path = %path.display(), count = events.len(), "Feed carregado");
    Ok(events)
}

/// Carrega observações cruas para o comando `batch`.
pub fn load_inputs(path: &Path) -> Result<Vec<FeedbackInput>> {
    load(path)
}

/// Carrega respostas para o comando `replay`.
pub fn load_submissions(path: &Path) -> Result<Vec<AnswerSubmission>> {
    load(path)
}
