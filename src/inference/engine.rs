//! # AdaptiveEngine — O Motor de Inferência Adaptativa
//!
//! Encadeia os estágios puros para cada evento de feedback:
//!
//! ```text
//! FeedbackInput
//!   │ sanitized()               NaN/inf → 0.0
//!   ├── 1. fuzzify              5 FuzzySets
//!   ├── 2. RuleBase::evaluate   ActionStrengthTable
//!   ├── 3. defuzzify            adjustment, new_level, action, confidence
//!   └── 4. apply_overlay        intervention (+ possível redução forçada)
//!   ▼
//! FeedbackResult
//! ```
//!
//! ## Concorrência
//!
//! O motor só guarda a [`RuleBase`], imutável após a construção. É
//! `Send + Sync`: uma única instância pode ser compartilhada por `&` ou
//! `Arc` entre handlers, threads ou tasks, sem lock.

use rayon::prelude::*;

use super::defuzzify::{defuzzify, dominant_action, level_after};
use super::fuzzify::fuzzify;
use super::intervention::{apply_overlay, LevelDecision, OverlayRule};
use super::rules::RuleBase;
use crate::core::{FeedbackInput, FeedbackResult, Intervention};

/// Motor difuso sem estado mutável.
#[derive(Clone, Debug, Default)]
pub struct AdaptiveEngine {
    rules: RuleBase,
}

impl AdaptiveEngine {
    /// Motor com a base de regras padrão.
    pub fn new() -> Self {
        Self::default()
    }

    /// Motor com uma base de regras customizada (já validada).
    pub fn with_rules(rules: RuleBase) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    /// Ponto de entrada: processa uma questão respondida.
    ///
    /// Determinístico e infalível — qualquer entrada numérica (negativa,
    /// fora do domínio, `NaN`) produz um resultado com `new_level` em `[1, 5]`.
    ///
    /// ```rust
    /// use adaptive_fuzzy::core::{Action, FeedbackInput, Intervention};
    /// use adaptive_fuzzy::inference::AdaptiveEngine;
    ///
    /// let engine = AdaptiveEngine::new();
    /// let result = engine.process_feedback(&FeedbackInput::new(15.0, 1.0, 10.0, "happy", 0, 2));
    /// assert_eq!(result.action, Action::IncreaseMuch);
    /// assert_eq!(result.new_level, 3);
    /// assert_eq!(result.intervention, Intervention::None);
    /// ```
    pub fn process_feedback(&self, input: &FeedbackInput) -> FeedbackResult {
        let input = input.sanitized();

        let fuzzified = fuzzify(&input);
        tracing::debug!(
            accuracy = %fuzzified.accuracy,
            response_time = %fuzzified.response_time,
            emotion = %fuzzified.emotion,
            label = %input.emotion,
            "Valores fuzzificados"
        );

        let outputs = self.rules.evaluate(&fuzzified);
        let adjustment = defuzzify(&outputs);
        let (action, confidence) = dominant_action(&outputs);

        let defuzzified = LevelDecision {
            adjustment,
            new_level: level_after(input.current_level, adjustment),
        };
        let overlay = apply_overlay(
            &input.emotion,
            input.screen_time,
            input.current_level,
            defuzzified,
        );

        tracing::debug!(
            emotion = %input.emotion,
            screen_time = input.screen_time,
            accuracy = input.accuracy,
            from = input.current_level,
            to = overlay.decision.new_level,
            adjustment = overlay.decision.adjustment,
            intervention = %overlay.intervention,
            "Decisão difusa"
        );

        FeedbackResult {
            current_level: input.current_level,
            new_level: overlay.decision.new_level,
            adjustment: overlay.decision.adjustment,
            action,
            confidence,
            intervention: overlay.intervention,
            fuzzy_outputs: outputs,
        }
    }

    /// Checagem em tempo real, enquanto o aprendiz ainda lê a questão.
    ///
    /// Só a intervenção importa; nenhum nível é calculado. Equivale a
    /// `process_feedback` com acerto 0, latência 0, 0 dicas e nível 1.
    pub fn monitor(&self, emotion: &str, screen_time: f64) -> Intervention {
        let screen_time = if screen_time.is_finite() {
            screen_time
        } else {
            0.0
        };
        OverlayRule::classify(emotion, screen_time).intervention()
    }

    /// Avalia eventos independentes em paralelo, preservando a ordem.
    pub fn process_batch(&self, inputs: &[FeedbackInput]) -> Vec<FeedbackResult> {
        inputs
            .par_iter()
            .map(|input| self.process_feedback(input))
            .collect()
    }
}
