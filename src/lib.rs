//! # adaptive-fuzzy — Motor Difuso de Dificuldade Adaptativa
//!
//! Ajusta a dificuldade das questões de um aprendiz a partir de cinco
//! sinais observados a cada resposta:
//!
//! - **emoção** (rótulo vindo de um classificador externo)
//! - **acerto**
//! - **tempo de resposta**
//! - **tempo de tela** (leitura da questão)
//! - **dicas usadas**
//!
//! O núcleo é um motor de inferência difusa em três estágios
//! (fuzzificação → regras → defuzzificação) seguido de uma camada de
//! sistema especialista que sugere intervenções de UI.
//!
//! ## Camadas
//!
//! | Módulo | Responsabilidade |
//! |--------|------------------|
//! | [`core`] | Tipos-valor: pertinência, `FuzzySet`, ações, entrada/saída |
//! | [`inference`] | O motor: fuzzificação, regras, defuzzificação, overlay |
//! | [`session`] | Correção de respostas e acúmulo de proficiência |
//! | [`feed`] | Leitura de eventos JSON Lines para a CLI |
//!
//! ## Exemplo
//!
//! ```rust
//! use adaptive_fuzzy::core::{FeedbackInput, Intervention};
//! use adaptive_fuzzy::inference::AdaptiveEngine;
//!
//! let engine = AdaptiveEngine::new();
//! let result = engine.process_feedback(&FeedbackInput::new(20.0, 0.0, 50.0, "fear", 1, 3));
//! assert!(result.adjustment < -1.0);
//! assert_eq!(result.new_level, 1);
//! assert_eq!(result.intervention, Intervention::ShowHint);
//! ```
//!
//! Autenticação, persistência, transporte HTTP e o classificador de
//! emoção ficam fora deste crate.

pub mod core;

pub mod feed;

pub mod inference;

pub mod session;
