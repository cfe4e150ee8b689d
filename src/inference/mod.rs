//! # Módulo Inference — Motor de Inferência Difusa Adaptativa
//!
//! Converte observações cruas do aprendiz num ajuste de dificuldade
//! limitado e numa sugestão de intervenção.
//!
//! ## Estágios
//!
//! | Estágio | Módulo | Entrada → Saída |
//! |---------|--------|-----------------|
//! | **Fuzzificação** | [`fuzzify`] | valores crisp → `FuzzySet` por dimensão |
//! | **Regras** | [`rules`] | `FuzzifiedInputs` → `ActionStrengthTable` |
//! | **Defuzzificação** | [`defuzzify`] | `ActionStrengthTable` → ajuste, nível, ação |
//! | **Overlay** | [`intervention`] | emoção + tempo de tela → intervenção |
//!
//! Todos os estágios são funções puras; o [`AdaptiveEngine`] só os encadeia.
//!
//! ## Exemplo
//!
//! ```text
//! happy, acerto 1.0, 10s de resposta, nível 2
//!   → positive=0.8, high=1.0, fast=1.0
//!   → increase_much=0.8, increase=0.72, slight_increase=0.14, stay=0.12
//!   → ajuste +1.343 → nível 3, sem intervenção
//! ```

pub mod defuzzify;
pub mod engine;
pub mod fuzzify;
pub mod intervention;
pub mod rules;

pub use engine::AdaptiveEngine;
pub use intervention::{LevelDecision, OverlayRule};
pub use rules::{Antecedent, Rule, RuleBase, RuleError};
