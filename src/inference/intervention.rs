//! # Overlay de Intervenção — Camada de Sistema Especialista
//!
//! Segunda camada de decisão, aplicada **depois** da defuzzificação.
//! Os gatilhos são categóricos (rótulo exato de emoção + limiar de tempo),
//! não difusos, e podem sobrescrever o ajuste numérico do núcleo difuso.
//!
//! ## Prioridade (primeiro que casar vence)
//!
//! ```text
//! 1. emoção ∈ {anger, fear, disgust, frustrated, anxious, confused}
//!    E screen_time > 10s                  → show_hint
//! 2. emoção == sad E screen_time > 10s    → change_visual
//! 3. emoção ∈ {fear, disgust}             → se ajuste ≥ 0: ajuste = -0.5,
//!                                            nível = atual - 1
//! 4. senão                                → none, decisão intacta
//! ```
//!
//! As regras são exclusivas: `fear` com tela longa dispara só a 1, e o
//! ajuste defuzzificado fica como está.

use serde::{Deserialize, Serialize};

use crate::core::{clamp_level, Intervention};

/// Tempo de tela (s) a partir do qual as regras 1 e 2 disparam.
pub const SCREEN_TIME_THRESHOLD: f64 = 10.0;

/// Emoções de "luta" que pedem uma dica.
pub const HINT_EMOTIONS: &[&str] = &[
    "anger",
    "fear",
    "disgust",
    "frustrated",
    "anxious",
    "confused",
];

/// Emoções que pedem troca de visual.
pub const VISUAL_EMOTIONS: &[&str] = &["sad"];

/// Emoções de estresse que forçam uma redução de dificuldade.
pub const STRESS_EMOTIONS: &[&str] = &["fear", "disgust"];

/// Ajuste forçado pela regra de estresse.
pub const STRESS_ADJUSTMENT: f64 = -0.5;

/// Decisão numérica que o overlay pode sobrescrever.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelDecision {
    pub adjustment: f64,
    pub new_level: i32,
}

/// Qual regra do overlay casou.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayRule {
    StruggleHint,
    SadVisual,
    StressDecrease,
    Passthrough,
}

impl OverlayRule {
    /// Classifica a situação; não depende do ajuste nem do nível.
    pub fn classify(emotion: &str, screen_time: f64) -> Self {
        let long_screen = screen_time > SCREEN_TIME_THRESHOLD;
        if long_screen && HINT_EMOTIONS.contains(&emotion) {
            OverlayRule::StruggleHint
        } else if long_screen && VISUAL_EMOTIONS.contains(&emotion) {
            OverlayRule::SadVisual
        } else if STRESS_EMOTIONS.contains(&emotion) {
            OverlayRule::StressDecrease
        } else {
            OverlayRule::Passthrough
        }
    }

    /// Sinal de UI produzido por esta regra.
    pub fn intervention(&self) -> Intervention {
        match self {
            OverlayRule::StruggleHint => Intervention::ShowHint,
            OverlayRule::SadVisual => Intervention::ChangeVisual,
            OverlayRule::StressDecrease | OverlayRule::Passthrough => Intervention::None,
        }
    }
}

/// Resultado do overlay: intervenção + decisão (talvez sobrescrita).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayOutcome {
    pub rule: OverlayRule,
    pub intervention: Intervention,
    pub decision: LevelDecision,
}

/// Aplica o overlay sobre a decisão defuzzificada.
pub fn apply_overlay(
    emotion: &str,
    screen_time: f64,
    current_level: i32,
    decision: LevelDecision,
) -> OverlayOutcome {
    let rule = OverlayRule::classify(emotion, screen_time);
    let decision = match rule {
        OverlayRule::StressDecrease if decision.adjustment >= 0.0 => {
            tracing::debug!(
                emotion,
                adjustment = decision.adjustment,
                "Overlay: emoção de estresse força redução"
            );
            LevelDecision {
                adjustment: STRESS_ADJUSTMENT,
                new_level: clamp_level(current_level.saturating_sub(1)),
            }
        }
        _ => decision,
    };
    OverlayOutcome {
        rule,
        intervention: rule.intervention(),
        decision,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEEP: LevelDecision = LevelDecision {
        adjustment: 0.405,
        new_level: 3,
    };

    #[test]
    fn test_struggle_emotions_with_long_screen_show_hint() {
        for emotion in HINT_EMOTIONS {
            let outcome = apply_overlay(emotion, 20.0, 3, KEEP);
            assert_eq!(outcome.intervention, Intervention::ShowHint, "{emotion}");
            // a regra 1 nunca mexe na decisão
            assert_eq!(outcome.decision, KEEP);
        }
    }

    /// Limiar é estrito: exatamente 10s não dispara
    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(OverlayRule::classify("anger", 10.0), OverlayRule::Passthrough);
        assert_eq!(OverlayRule::classify("anger", 10.01), OverlayRule::StruggleHint);
        assert_eq!(OverlayRule::classify("sad", 10.0), OverlayRule::Passthrough);
    }

    #[test]
    fn test_sad_with_long_screen_changes_visual() {
        let outcome = apply_overlay("sad", 45.0, 2, KEEP);
        assert_eq!(outcome.rule, OverlayRule::SadVisual);
        assert_eq!(outcome.intervention, Intervention::ChangeVisual);
        assert_eq!(outcome.decision, KEEP);
    }

    #[test]
    fn test_stress_forces_decrease_on_short_screen() {
        let outcome = apply_overlay("disgust", 5.0, 3, KEEP);
        assert_eq!(outcome.rule, OverlayRule::StressDecrease);
        assert_eq!(outcome.intervention, Intervention::None);
        assert_eq!(
            outcome.decision,
            LevelDecision {
                adjustment: -0.5,
                new_level: 2
            }
        );
    }

    #[test]
    fn test_stress_keeps_existing_decrease() {
        let falling = LevelDecision {
            adjustment: -1.2,
            new_level: 2,
        };
        let outcome = apply_overlay("fear", 3.0, 3, falling);
        assert_eq!(outcome.decision, falling);
    }

    #[test]
    fn test_stress_decrease_respects_floor() {
        let outcome = apply_overlay("fear", 0.0, 1, KEEP);
        assert_eq!(outcome.decision.new_level, 1);
        let outcome = apply_overlay("fear", 0.0, 9, KEEP);
        assert_eq!(outcome.decision.new_level, 5);
    }

    /// Com tela longa, `fear` cai na regra 1 e a regra 3 não roda
    #[test]
    fn test_rules_are_exclusive() {
        let outcome = apply_overlay("fear", 20.0, 3, KEEP);
        assert_eq!(outcome.rule, OverlayRule::StruggleHint);
        assert_eq!(outcome.decision.adjustment, 0.405);
    }

    #[test]
    fn test_passthrough() {
        for emotion in ["happy", "neutral", "bored", "surprise", "Fear", ""] {
            let outcome = apply_overlay(emotion, 60.0, 3, KEEP);
            assert_eq!(outcome.rule, OverlayRule::Passthrough, "{emotion}");
            assert_eq!(outcome.intervention, Intervention::None);
            assert_eq!(outcome.decision, KEEP);
        }
    }
}
