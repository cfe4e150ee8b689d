//! # Sessão de Aprendizagem — Correção e Progresso
//!
//! Camada fina ao redor do motor que reproduz o fluxo de "responder
//! questão" do serviço:
//!
//! ```text
//! AnswerSubmission
//!   ├── 1. grade_answer       resposta == gabarito? → accuracy 1.0 / 0.0
//!   ├── 2. process_feedback   com o nível atual da sessão
//!   └── 3. LearnerProgress    proficiency += adjustment (limitada a [1.0, 5.9])
//!                             nível = piso(proficiency)
//! ```
//!
//! A proficiência é um nível "contínuo": dois ajustes de +0.5 levam
//! `1.8 → 2.3`, mudando o nível discreto de 1 para 2 sem que nenhum ajuste
//! isolado tenha sido grande o bastante. O nível acumulado substitui o
//! `new_level` do motor no resultado devolvido.
//!
//! Tudo aqui é estado em memória, pertencente ao chamador.
//!
//! ## Fechamento
//!
//! [`Session::complete`] resume a sessão num [`SessionSummary`]:
//!
//! | Campo | Cálculo |
//! |-------|---------|
//! | `final_score` | `accuracy × nível final × 10` |
//! | `emotions` | contagem por rótulo, % com 1 casa, maior primeiro |
//! | `level_progression` | mudanças de nível com `trunc(nível + ajuste)` |

use serde::{Deserialize, Serialize};

use crate::core::{clamp_level, round_decimals, FeedbackInput, FeedbackResult, MIN_LEVEL};
use crate::inference::AdaptiveEngine;

/// Emoção usada quando nenhuma leitura do classificador está disponível.
pub const DEFAULT_EMOTION: &str = "neutral";

/// Piso da proficiência.
pub const MIN_PROFICIENCY: f64 = 1.0;

/// Teto da proficiência (ainda nível 5 após o piso).
pub const MAX_PROFICIENCY: f64 = 5.9;

/// Compara resposta e gabarito ignorando caixa e espaços nas pontas.
pub fn grade_answer(given: &str, expected: &str) -> bool {
    given.trim().to_lowercase() == expected.trim().to_lowercase()
}

/// Uma resposta enviada pelo aprendiz.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub question_id: String,
    pub answer: String,
    pub correct_answer: String,
    /// Tempo de resposta, em segundos.
    pub time_taken: f64,
    #[serde(default)]
    pub hints_used: u32,
    pub screen_time: f64,
    /// Última emoção detectada; `None` usa [`DEFAULT_EMOTION`].
    #[serde(default)]
    pub emotion: Option<String>,
}

impl AnswerSubmission {
    pub fn is_correct(&self) -> bool {
        grade_answer(&self.answer, &self.correct_answer)
    }

    /// Emoção efetiva: a detectada ou [`DEFAULT_EMOTION`].
    pub fn emotion_label(&self) -> &str {
        self.emotion.as_deref().unwrap_or(DEFAULT_EMOTION)
    }

    /// Entrada do motor para esta resposta, no nível `current_level`.
    pub fn to_feedback(&self, current_level: i32) -> FeedbackInput {
        FeedbackInput::new(
            self.screen_time,
            if self.is_correct() { 1.0 } else { 0.0 },
            self.time_taken,
            self.emotion_label(),
            self.hints_used,
            current_level,
        )
    }
}

/// Uma resposta já processada, guardada no histórico do progresso.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub emotion: String,
    pub is_correct: bool,
    pub adjustment: f64,
    /// Nível acumulado após esta resposta.
    pub level: i32,
}

/// Fatia da distribuição de emoções.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmotionShare {
    pub emotion: String,
    pub count: u32,
    /// Percentual do total, com 1 casa decimal.
    pub percentage: f64,
}

/// Mudança de nível na progressão (`answer` é 1-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelChange {
    pub answer: usize,
    pub level: i32,
}

/// Sequência de mudanças de nível partindo do nível 1.
///
/// Cada ajuste é somado ao nível inteiro corrente e truncado em direção
/// a zero antes do clamp; só as mudanças entram na lista. Ajustes não
/// finitos contam como `0.0`.
///
/// ```rust
/// use adaptive_fuzzy::session::{level_progression, LevelChange};
///
/// let changes = level_progression([1.343, 0.5, 1.2, -1.777]);
/// assert_eq!(
///     changes,
///     vec![
///         LevelChange { answer: 1, level: 2 },
///         LevelChange { answer: 3, level: 3 },
///         LevelChange { answer: 4, level: 1 },
///     ]
/// );
/// ```
pub fn level_progression<I>(adjustments: I) -> Vec<LevelChange>
where
    I: IntoIterator<Item = f64>,
{
    let mut changes = Vec::new();
    let mut level = MIN_LEVEL;
    for (index, adjustment) in adjustments.into_iter().enumerate() {
        let adjustment = if adjustment.is_finite() { adjustment } else { 0.0 };
        let next = clamp_level((f64::from(level) + adjustment).trunc() as i32);
        if next != level {
            changes.push(LevelChange {
                answer: index + 1,
                level: next,
            });
            level = next;
        }
    }
    changes
}

/// Progresso acumulado de um aprendiz numa sessão.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LearnerProgress {
    pub proficiency: f64,
    pub current_level: i32,
    pub total_questions: u32,
    pub total_correct: u32,
    #[serde(default)]
    pub history: Vec<AnswerRecord>,
}

impl Default for LearnerProgress {
    fn default() -> Self {
        Self {
            proficiency: MIN_PROFICIENCY,
            current_level: MIN_LEVEL,
            total_questions: 0,
            total_correct: 0,
            history: Vec::new(),
        }
    }
}

impl LearnerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Começa a partir de um nível já persistido.
    pub fn starting_at(level: i32) -> Self {
        let proficiency = (level as f64).clamp(MIN_PROFICIENCY, MAX_PROFICIENCY);
        Self {
            proficiency,
            current_level: proficiency.floor() as i32,
            ..Self::default()
        }
    }

    /// Acumula o ajuste de uma decisão e devolve o novo nível.
    pub fn record(&mut self, emotion: &str, adjustment: f64, is_correct: bool) -> i32 {
        if adjustment.is_finite() {
            self.proficiency =
                (self.proficiency + adjustment).clamp(MIN_PROFICIENCY, MAX_PROFICIENCY);
        }
        self.current_level = self.proficiency.floor() as i32;
        self.total_questions += 1;
        if is_correct {
            self.total_correct += 1;
        }
        self.history.push(AnswerRecord {
            emotion: emotion.to_string(),
            is_correct,
            adjustment,
            level: self.current_level,
        });
        self.current_level
    }

    /// Fração de respostas corretas (`0.0` sem nenhuma resposta).
    pub fn accuracy_rate(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            f64::from(self.total_correct) / f64::from(self.total_questions)
        }
    }

    /// Pontuação final: `accuracy × nível atual × 10`.
    pub fn final_score(&self) -> f64 {
        self.accuracy_rate() * f64::from(self.current_level) * 10.0
    }

    /// Contagem de emoções do histórico, maior contagem primeiro.
    ///
    /// Empates mantêm a ordem da primeira ocorrência.
    pub fn emotion_distribution(&self) -> Vec<EmotionShare> {
        let mut counts: Vec<(&str, u32)> = Vec::new();
        for record in &self.history {
            match counts.iter().position(|(label, _)| *label == record.emotion) {
                Some(index) => counts[index].1 += 1,
                None => counts.push((record.emotion.as_str(), 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let total = f64::from(counts.iter().map(|(_, c)| c).sum::<u32>().max(1));
        counts
            .into_iter()
            .map(|(emotion, count)| EmotionShare {
                emotion: emotion.to_string(),
                count,
                percentage: round_decimals(f64::from(count) / total * 100.0, 1),
            })
            .collect()
    }

    /// [`level_progression`] sobre os ajustes do histórico.
    pub fn level_progression(&self) -> Vec<LevelChange> {
        level_progression(self.history.iter().map(|record| record.adjustment))
    }
}

/// Resumo de uma sessão encerrada.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_questions: u32,
    pub total_correct: u32,
    pub accuracy: f64,
    pub final_level: i32,
    pub proficiency: f64,
    pub final_score: f64,
    pub emotions: Vec<EmotionShare>,
    pub level_progression: Vec<LevelChange>,
}

/// Resultado de [`Session::submit`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub question_id: String,
    pub is_correct: bool,
    /// Decisão do motor, com `new_level` trocado pelo nível acumulado.
    pub feedback: FeedbackResult,
    pub proficiency: f64,
}

/// Sessão de um aprendiz: motor compartilhado + progresso próprio.
pub struct Session<'a> {
    engine: &'a AdaptiveEngine,
    progress: LearnerProgress,
}

impl<'a> Session<'a> {
    pub fn new(engine: &'a AdaptiveEngine) -> Self {
        Self::resume(engine, LearnerProgress::new())
    }

    /// Retoma uma sessão a partir de um progresso existente.
    pub fn resume(engine: &'a AdaptiveEngine, progress: LearnerProgress) -> Self {
        Self { engine, progress }
    }

    pub fn progress(&self) -> &LearnerProgress {
        &self.progress
    }

    /// Corrige, consulta o motor e acumula o progresso.
    pub fn submit(&mut self, submission: &AnswerSubmission) -> SubmissionOutcome {
        let is_correct = submission.is_correct();
        let input = submission.to_feedback(self.progress.current_level);
        let mut feedback = self.engine.process_feedback(&input);

        let level = self
            .progress
            .record(submission.emotion_label(), feedback.adjustment, is_correct);
        tracing::info!(
            question = %submission.question_id,
            correct = is_correct,
            adjustment = feedback.adjustment,
            proficiency = %format!("{:.2}", self.progress.proficiency),
            level,
            "Resposta processada"
        );
        feedback.new_level = level;

        SubmissionOutcome {
            question_id: submission.question_id.clone(),
            is_correct,
            feedback,
            proficiency: self.progress.proficiency,
        }
    }

    /// Encerra a sessão e calcula o resumo final.
    pub fn complete(&self) -> SessionSummary {
        let progress = &self.progress;
        let summary = SessionSummary {
            total_questions: progress.total_questions,
            total_correct: progress.total_correct,
            accuracy: progress.accuracy_rate(),
            final_level: progress.current_level,
            proficiency: progress.proficiency,
            final_score: progress.final_score(),
            emotions: progress.emotion_distribution(),
            level_progression: progress.level_progression(),
        };
        tracing::info!(
            questions = summary.total_questions,
            level = summary.final_level,
            score = %format!("{:.1}", summary.final_score),
            "Sessão concluída"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Intervention;

    fn submission(
        answer: &str,
        time_taken: f64,
        screen_time: f64,
        emotion: Option<&str>,
    ) -> AnswerSubmission {
        AnswerSubmission {
            question_id: "q1".to_string(),
            answer: answer.to_string(),
            correct_answer: "Cube".to_string(),
            time_taken,
            hints_used: 0,
            screen_time,
            emotion: emotion.map(str::to_string),
        }
    }

    #[test]
    fn test_grade_answer() {
        assert!(grade_answer("  cube ", "Cube"));
        assert!(grade_answer("PRISM", "prism"));
        assert!(!grade_answer("sphere", "cube"));
        assert!(!grade_answer("", "cube"));
    }

    #[test]
    fn test_missing_emotion_defaults_to_neutral() {
        let input = submission("cube", 10.0, 5.0, None).to_feedback(2);
        assert_eq!(input.emotion, "neutral");
        assert_eq!(input.accuracy, 1.0);
        assert_eq!(input.current_level, 2);

        let wrong = submission("cone", 10.0, 5.0, Some("happy")).to_feedback(2);
        assert_eq!(wrong.accuracy, 0.0);
        assert_eq!(wrong.emotion, "happy");
    }

    /// Ajustes pequenos se acumulam até cruzar o próximo nível
    #[test]
    fn test_progress_accumulates_fractional_adjustments() {
        let mut progress = LearnerProgress::starting_at(1);
        progress.proficiency = 1.8;
        assert_eq!(progress.record("happy", 0.5, true), 2);
        assert!((progress.proficiency - 2.3).abs() < 1e-9);
        assert_eq!(progress.total_questions, 1);
        assert_eq!(progress.total_correct, 1);
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut progress = LearnerProgress::new();
        assert_eq!(progress.record("fear", -2.0, false), 1);
        assert_eq!(progress.proficiency, MIN_PROFICIENCY);
        for _ in 0..10 {
            progress.record("happy", 2.0, true);
        }
        assert_eq!(progress.proficiency, MAX_PROFICIENCY);
        assert_eq!(progress.current_level, 5);
        assert_eq!(progress.total_questions, 11);
        assert!((progress.accuracy_rate() - 10.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_starting_at_clamps_level() {
        assert_eq!(LearnerProgress::starting_at(3).current_level, 3);
        assert_eq!(LearnerProgress::starting_at(9).current_level, 5);
        assert_eq!(LearnerProgress::starting_at(0).current_level, 1);
        assert_eq!(LearnerProgress::new().accuracy_rate(), 0.0);
    }

    #[test]
    fn test_session_overrides_new_level_with_accumulated_level() {
        let engine = AdaptiveEngine::new();
        let mut session = Session::new(&engine);

        // happy + correto + rápido: +1.343 → proficiência 2.343, nível 2
        let outcome = session.submit(&submission("cube", 10.0, 15.0, Some("happy")));
        assert!(outcome.is_correct);
        assert_eq!(outcome.feedback.adjustment, 1.343);
        assert_eq!(outcome.feedback.current_level, 1);
        assert_eq!(outcome.feedback.new_level, 2);
        assert!((outcome.proficiency - 2.343).abs() < 1e-9);

        // o próximo envio parte do nível acumulado
        let outcome = session.submit(&submission("cube", 10.0, 15.0, Some("happy")));
        assert_eq!(outcome.feedback.current_level, 2);
        assert_eq!(outcome.feedback.new_level, 3);
        assert_eq!(session.progress().total_questions, 2);
    }

    #[test]
    fn test_session_surfaces_intervention() {
        let engine = AdaptiveEngine::new();
        let mut session = Session::resume(&engine, LearnerProgress::starting_at(3));
        let outcome = session.submit(&submission("cone", 50.0, 20.0, Some("fear")));
        assert!(!outcome.is_correct);
        assert_eq!(outcome.feedback.intervention, Intervention::ShowHint);
        // 3 - 1.777 = 1.223
        assert_eq!(outcome.feedback.new_level, 1);
        assert_eq!(session.progress().total_correct, 0);
    }

    #[test]
    fn test_history_records_effective_emotion_and_level() {
        let engine = AdaptiveEngine::new();
        let mut session = Session::new(&engine);
        session.submit(&submission("cube", 10.0, 15.0, Some("happy")));
        session.submit(&submission("cone", 10.0, 5.0, None));

        let history = &session.progress().history;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].emotion, "happy");
        assert_eq!(history[0].adjustment, 1.343);
        assert_eq!(history[0].level, 2);
        assert_eq!(history[1].emotion, "neutral");
        assert!(!history[1].is_correct);
    }

    #[test]
    fn test_final_score() {
        let mut progress = LearnerProgress::starting_at(3);
        assert_eq!(progress.final_score(), 0.0);
        progress.record("happy", 0.0, true);
        progress.record("happy", 0.0, true);
        progress.record("happy", 0.0, true);
        progress.record("fear", 0.0, false);
        // 0.75 × 3 × 10
        assert!((progress.final_score() - 22.5).abs() < 1e-9);
    }

    /// Maior contagem primeiro; empates na ordem de chegada
    #[test]
    fn test_emotion_distribution() {
        let mut progress = LearnerProgress::new();
        for emotion in ["neutral", "happy", "happy", "fear", "neutral", "happy"] {
            progress.record(emotion, 0.0, true);
        }
        let shares = progress.emotion_distribution();
        let labels: Vec<&str> = shares.iter().map(|s| s.emotion.as_str()).collect();
        assert_eq!(labels, ["happy", "neutral", "fear"]);
        assert_eq!(shares[0].count, 3);
        assert_eq!(shares[0].percentage, 50.0);
        assert_eq!(shares[1].percentage, 33.3);
        assert_eq!(shares[2].percentage, 16.7);

        assert!(LearnerProgress::new().emotion_distribution().is_empty());
    }

    #[test]
    fn test_level_progression_truncates_and_clamps() {
        // 1.9 → 1 (sem mudança), 3, 5, 7 → 5 (sem mudança), 3, NaN ignorado
        let changes = level_progression([0.9, 2.0, 2.0, 2.0, -2.0, f64::NAN]);
        assert_eq!(
            changes,
            vec![
                LevelChange { answer: 2, level: 3 },
                LevelChange { answer: 3, level: 5 },
                LevelChange { answer: 5, level: 3 },
            ]
        );
        // -1.777 a partir do nível 1: trunc(-0.777) = 0, clamp → 1
        assert!(level_progression([-1.777]).is_empty());
    }

    #[test]
    fn test_complete_summarizes_session() {
        let engine = AdaptiveEngine::new();
        let mut session = Session::new(&engine);
        session.submit(&submission("cube", 10.0, 15.0, Some("happy")));
        session.submit(&submission("cube", 10.0, 15.0, Some("happy")));
        session.submit(&submission("cone", 50.0, 20.0, Some("fear")));

        let summary = session.complete();
        assert_eq!(summary.total_questions, 3);
        assert_eq!(summary.total_correct, 2);
        assert_eq!(summary.final_level, session.progress().current_level);
        let expected = 2.0 / 3.0 * f64::from(summary.final_level) * 10.0;
        assert!((summary.final_score - expected).abs() < 1e-9);
        assert_eq!(summary.emotions[0].emotion, "happy");
        assert_eq!(summary.emotions[0].percentage, 66.7);
        assert_eq!(summary.level_progression, session.progress().level_progression());
    }
}
