//! # Módulo Core — Tipos-Valor do Motor Adaptativo
//!
//! Tudo que entra, circula e sai do motor de inferência difusa:
//!
//! - [`trimf`] / [`trapmf`] — funções de pertinência
//! - [`Dimension`], [`Term`], [`FuzzySet`] — termos linguísticos e seus graus
//! - [`FuzzifiedInputs`] — as cinco observações já fuzzificadas
//! - [`Action`] — 7 baldes de ajuste de dificuldade, com centros fixos
//! - [`ActionStrengthTable`] — força por balde após a avaliação das regras
//! - [`Intervention`] — sinal de UI (dica, troca visual, nada)
//! - [`FeedbackInput`] / [`FeedbackResult`] — contrato do ponto de entrada
//!
//! Nenhum destes tipos tem estado mutável compartilhado; todos são
//! `Send + Sync` e podem circular livremente entre threads.

pub mod membership;

pub mod fuzzy_set;

pub mod action;

pub mod feedback;

pub use action::{Action, ActionStrengthTable, Intervention};
pub use feedback::{clamp_level, FeedbackInput, FeedbackResult, MAX_LEVEL, MIN_LEVEL};
pub use fuzzy_set::{Dimension, FuzzifiedInputs, FuzzySet, Term};
pub use membership::{round3, round_decimals, trapmf, trimf};
