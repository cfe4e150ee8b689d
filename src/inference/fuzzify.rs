//! # Fuzzificação — Do Crisp ao Linguístico
//!
//! Primeiro estágio do motor. Cada observação crisp vira um [`FuzzySet`]
//! com três termos:
//!
//! | Entrada | Termo | Forma |
//! |---------|-------|-------|
//! | `screen_time` (s) | short / normal / long | trap(0,0,20,40) · tri(20,50,80) · trap(60,90,300,300) |
//! | `accuracy` (0–1) | low / medium / high | trap(0,0,.3,.5) · tri(.3,.6,.8) · trap(.7,.9,1,1) |
//! | `response_time` (s) | fast / medium / slow | trap(0,0,15,25) · tri(15,35,55) · trap(45,65,120,120) |
//! | `hints_used` | few / some / many | trap(0,0,1,2) · tri(1,2,3) · trap(2,3,5,5) |
//! | `emotion` | negative / neutral / positive | tabela [`EMOTION_TABLE`] |
//!
//! Todos os graus saem arredondados a 3 casas.

use crate::core::{round3, trapmf, trimf, FeedbackInput, FuzzifiedInputs, FuzzySet, Term};

/// Linha usada para rótulos de emoção desconhecidos.
pub const FALLBACK_EMOTION: &str = "neutral";

/// Rótulo de emoção → graus `(negative, neutral, positive)`.
///
/// Busca exata, sensível a maiúsculas. Rótulos fora da tabela
/// (inclusive `anger`, `sad` e `disgust`) usam a linha `neutral`.
pub const EMOTION_TABLE: &[(&str, [f64; 3])] = &[
    ("frustrated", [0.9, 0.1, 0.0]),
    ("anxious", [0.8, 0.2, 0.0]),
    ("fear", [0.8, 0.2, 0.0]),
    ("confused", [0.7, 0.3, 0.0]),
    ("confuse", [0.7, 0.3, 0.0]),
    ("bored", [0.2, 0.7, 0.1]),
    ("neutral", [0.1, 0.8, 0.1]),
    ("surprise", [0.1, 0.3, 0.6]),
    ("happy", [0.0, 0.2, 0.8]),
];

fn three_terms(terms: [Term; 3], degrees: [f64; 3]) -> FuzzySet {
    FuzzySet::from_degrees(
        terms
            .into_iter()
            .zip(degrees)
            .map(|(term, degree)| (term, round3(degree))),
    )
}

/// Tempo de leitura da tela em `short`, `normal`, `long`.
pub fn fuzzify_screen_time(seconds: f64) -> FuzzySet {
    three_terms(
        [Term::Short, Term::Normal, Term::Long],
        [
            trapmf(seconds, 0.0, 0.0, 20.0, 40.0),
            trimf(seconds, 20.0, 50.0, 80.0),
            trapmf(seconds, 60.0, 90.0, 300.0, 300.0),
        ],
    )
}

/// Acerto (0–1) em `low`, `medium`, `high`.
///
/// ```rust
/// use adaptive_fuzzy::core::Term;
/// use adaptive_fuzzy::inference::fuzzify::fuzzify_accuracy;
///
/// assert_eq!(fuzzify_accuracy(1.0).degree(Term::High), 1.0);
/// assert_eq!(fuzzify_accuracy(0.0).degree(Term::Low), 1.0);
/// ```
pub fn fuzzify_accuracy(score: f64) -> FuzzySet {
    three_terms(
        [Term::Low, Term::Medium, Term::High],
        [
            trapmf(score, 0.0, 0.0, 0.3, 0.5),
            trimf(score, 0.3, 0.6, 0.8),
            trapmf(score, 0.7, 0.9, 1.0, 1.0),
        ],
    )
}

/// Tempo de resposta em `fast`, `medium`, `slow`.
pub fn fuzzify_response_time(seconds: f64) -> FuzzySet {
    three_terms(
        [Term::Fast, Term::Medium, Term::Slow],
        [
            trapmf(seconds, 0.0, 0.0, 15.0, 25.0),
            trimf(seconds, 15.0, 35.0, 55.0),
            trapmf(seconds, 45.0, 65.0, 120.0, 120.0),
        ],
    )
}

/// Número de dicas em `few`, `some`, `many`.
pub fn fuzzify_hints_used(count: u32) -> FuzzySet {
    let count = f64::from(count);
    three_terms(
        [Term::Few, Term::Some, Term::Many],
        [
            trapmf(count, 0.0, 0.0, 1.0, 2.0),
            trimf(count, 1.0, 2.0, 3.0),
            trapmf(count, 2.0, 3.0, 5.0, 5.0),
        ],
    )
}

/// Linha da [`EMOTION_TABLE`] para `emotion`, ou a linha `neutral`.
pub fn emotion_row(emotion: &str) -> [f64; 3] {
    let lookup = |label: &str| {
        EMOTION_TABLE
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, row)| *row)
    };
    lookup(emotion)
        .or_else(|| lookup(FALLBACK_EMOTION))
        .unwrap_or([0.1, 0.8, 0.1])
}

/// Rótulo de emoção em `negative`, `neutral`, `positive`.
///
/// Consulta direta na tabela; um rótulo desconhecido nunca é erro.
pub fn fuzzify_emotion(emotion: &str) -> FuzzySet {
    three_terms(
        [Term::Negative, Term::Neutral, Term::Positive],
        emotion_row(emotion),
    )
}

/// Fuzzifica as cinco dimensões de uma observação.
pub fn fuzzify(input: &FeedbackInput) -> FuzzifiedInputs {
    FuzzifiedInputs {
        screen_time: fuzzify_screen_time(input.screen_time),
        accuracy: fuzzify_accuracy(input.accuracy),
        response_time: fuzzify_response_time(input.response_time),
        emotion: fuzzify_emotion(&input.emotion),
        hints: fuzzify_hints_used(input.hints_used),
    }
}
