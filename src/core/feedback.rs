//! # Feedback — Entrada e Saída do Motor
//!
//! [`FeedbackInput`] é o que o chamador observa a cada questão respondida;
//! [`FeedbackResult`] é a decisão do motor. Ambos são tipos-valor
//! imutáveis, sem identidade.
//!
//! ```text
//! FeedbackInput ──► AdaptiveEngine::process_feedback ──► FeedbackResult
//!   screen_time        (fuzzificação → regras →            new_level
//!   accuracy            defuzzificação → overlay)          adjustment
//!   response_time                                          action / confidence
//!   emotion                                                intervention
//!   hints_used                                             fuzzy_outputs
//!   current_level
//! ```

use serde::{Deserialize, Serialize};

use super::action::{Action, ActionStrengthTable, Intervention};

/// Menor nível de dificuldade.
pub const MIN_LEVEL: i32 = 1;

/// Maior nível de dificuldade.
pub const MAX_LEVEL: i32 = 5;

/// Limita um nível a `[MIN_LEVEL, MAX_LEVEL]`.
pub fn clamp_level(level: i32) -> i32 {
    level.clamp(MIN_LEVEL, MAX_LEVEL)
}

/// Observação de uma questão respondida.
///
/// Nenhum campo é validado na construção: valores fora do domínio
/// são tolerados pelo motor (pertinência zero, nível limitado na saída).
/// Só valores **não finitos** são trocados, via [`FeedbackInput::sanitized`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackInput {
    /// Tempo de leitura da tela, em segundos.
    pub screen_time: f64,
    /// Acerto em `[0, 1]` (o serviço usa 1.0 para correto e 0.0 para errado).
    pub accuracy: f64,
    /// Tempo de resposta, em segundos.
    pub response_time: f64,
    /// Rótulo vindo do classificador de emoção; conjunto aberto.
    pub emotion: String,
    #[serde(default)]
    pub hints_used: u32,
    /// Nível atual persistido do aprendiz, esperado em `[1, 5]`.
    pub current_level: i32,
}

impl FeedbackInput {
    pub fn new(
        screen_time: f64,
        accuracy: f64,
        response_time: f64,
        emotion: impl Into<String>,
        hints_used: u32,
        current_level: i32,
    ) -> Self {
        Self {
            screen_time,
            accuracy,
            response_time,
            emotion: emotion.into(),
            hints_used,
            current_level,
        }
    }

    /// Cópia com `NaN`/`±inf` substituídos por `0.0`.
    ///
    /// Valores finitos, mesmo negativos ou acima do domínio, passam
    /// intactos. Cada substituição gera um `warn`.
    pub fn sanitized(&self) -> Self {
        let mut clean = self.clone();
        for (field, value) in [
            ("screen_time", &mut clean.screen_time),
            ("accuracy", &mut clean.accuracy),
            ("response_time", &mut clean.response_time),
        ] {
            if !value.is_finite() {
                tracing::warn!(field, value = %value, "Valor não finito na entrada, usando 0.0");
                *value = 0.0;
            }
        }
        clean
    }

    /// `true` se algum campo está fora do domínio esperado.
    ///
    /// Só informativo — o motor aceita a entrada de qualquer forma.
    pub fn is_out_of_domain(&self) -> bool {
        !(self.screen_time >= 0.0)
            || !(0.0..=1.0).contains(&self.accuracy)
            || !(self.response_time >= 0.0)
            || !(MIN_LEVEL..=MAX_LEVEL).contains(&self.current_level)
    }
}

/// Decisão do motor para uma observação.
///
/// O formato JSON é o mesmo payload `fuzzy_feedback` que o serviço
/// devolve ao front-end.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackResult {
    /// Nível recebido na entrada (sem limitação).
    pub current_level: i32,
    /// Nível decidido, sempre em `[1, 5]`.
    pub new_level: i32,
    /// Ajuste defuzzificado (3 casas), possivelmente forçado pelo overlay.
    pub adjustment: f64,
    /// Balde de ação dominante.
    pub action: Action,
    /// Força do balde dominante.
    pub confidence: f64,
    pub intervention: Intervention,
    /// Força de cada um dos 7 baldes.
    pub fuzzy_outputs: ActionStrengthTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_level() {
        assert_eq!(clamp_level(0), 1);
        assert_eq!(clamp_level(3), 3);
        assert_eq!(clamp_level(9), 5);
        assert_eq!(clamp_level(-4), 1);
    }

    #[test]
    fn test_sanitized_replaces_non_finite() {
        let input = FeedbackInput::new(f64::NAN, f64::INFINITY, -3.0, "happy", 0, 2);
        let clean = input.sanitized();
        assert_eq!(clean.screen_time, 0.0);
        assert_eq!(clean.accuracy, 0.0);
        // finito, mesmo negativo, passa intacto
        assert_eq!(clean.response_time, -3.0);
        assert_eq!(clean.emotion, "happy");
    }

    #[test]
    fn test_out_of_domain_detection() {
        assert!(!FeedbackInput::new(15.0, 1.0, 10.0, "happy", 0, 2).is_out_of_domain());
        assert!(FeedbackInput::new(15.0, 1.4, 10.0, "happy", 0, 2).is_out_of_domain());
        assert!(FeedbackInput::new(15.0, 1.0, 10.0, "happy", 0, 7).is_out_of_domain());
        assert!(FeedbackInput::new(f64::NAN, 1.0, 10.0, "happy", 0, 2).is_out_of_domain());
    }

    #[test]
    fn test_hints_default_when_missing() {
        let json = r#"{"screen_time":5,"accuracy":1,"response_time":3,"emotion":"neutral","current_level":1}"#;
        let input: FeedbackInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.hints_used, 0);
        assert_eq!(input.current_level, 1);
    }
}
