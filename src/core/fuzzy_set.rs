//! # FuzzySet — Termos Linguísticos e seus Graus
//!
//! Cada observação crisp do aprendiz (tempo de tela, acerto, latência,
//! emoção, dicas) é descrita por **três termos linguísticos** da sua
//! [`Dimension`]:
//!
//! | Dimensão | Termos |
//! |----------|--------|
//! | `screen_time` | `short`, `normal`, `long` |
//! | `accuracy` | `low`, `medium`, `high` |
//! | `response_time` | `fast`, `medium`, `slow` |
//! | `emotion` | `negative`, `neutral`, `positive` |
//! | `hints` | `few`, `some`, `many` |
//!
//! Um [`FuzzySet`] guarda o grau de cada termo. Os graus **não** precisam
//! somar 1 — `accuracy = 0.75` é ao mesmo tempo um pouco `medium` e um
//! pouco `high`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Dimensão observada do aprendiz.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    ScreenTime,
    Accuracy,
    ResponseTime,
    Emotion,
    Hints,
}

impl Dimension {
    /// Todas as dimensões, na ordem em que são fuzzificadas.
    pub const ALL: [Dimension; 5] = [
        Dimension::ScreenTime,
        Dimension::Accuracy,
        Dimension::ResponseTime,
        Dimension::Emotion,
        Dimension::Hints,
    ];

    /// Os três termos linguísticos válidos para esta dimensão.
    pub fn terms(&self) -> [Term; 3] {
        match self {
            Dimension::ScreenTime => [Term::Short, Term::Normal, Term::Long],
            Dimension::Accuracy => [Term::Low, Term::Medium, Term::High],
            Dimension::ResponseTime => [Term::Fast, Term::Medium, Term::Slow],
            Dimension::Emotion => [Term::Negative, Term::Neutral, Term::Positive],
            Dimension::Hints => [Term::Few, Term::Some, Term::Many],
        }
    }

    /// `true` se `term` pertence a esta dimensão.
    pub fn accepts(&self, term: Term) -> bool {
        self.terms().contains(&term)
    }

    /// Nome snake_case, o mesmo usado na serialização.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::ScreenTime => "screen_time",
            Dimension::Accuracy => "accuracy",
            Dimension::ResponseTime => "response_time",
            Dimension::Emotion => "emotion",
            Dimension::Hints => "hints",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Termo linguístico.
///
/// `Medium` é compartilhado por `accuracy` e `response_time`; o par
/// `(Dimension, Term)` é que identifica um conjunto difuso sem ambiguidade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    Short,
    Normal,
    Long,
    Low,
    Medium,
    High,
    Fast,
    Slow,
    Negative,
    Neutral,
    Positive,
    Few,
    Some,
    Many,
}

impl Term {
    pub fn label(&self) -> &'static str {
        match self {
            Term::Short => "short",
            Term::Normal => "normal",
            Term::Long => "long",
            Term::Low => "low",
            Term::Medium => "medium",
            Term::High => "high",
            Term::Fast => "fast",
            Term::Slow => "slow",
            Term::Negative => "negative",
            Term::Neutral => "neutral",
            Term::Positive => "positive",
            Term::Few => "few",
            Term::Some => "some",
            Term::Many => "many",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mapeamento termo → grau de pertinência em `[0, 1]`.
///
/// Serializa como objeto JSON (`{"low": 1.0, "medium": 0.0, "high": 0.0}`).
/// Graus são limitados a `[0, 1]` na construção; termos ausentes valem `0.0`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FuzzySet {
    degrees: BTreeMap<Term, f64>,
}

impl FuzzySet {
    /// Constrói o conjunto a partir de pares `(termo, grau)`.
    ///
    /// Graus não finitos viram `0.0`; os demais são limitados a `[0, 1]`.
    pub fn from_degrees<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Term, f64)>,
    {
        let degrees = pairs
            .into_iter()
            .map(|(term, degree)| {
                let degree = if degree.is_finite() {
                    degree.clamp(0.0, 1.0)
                } else {
                    0.0
                };
                (term, degree)
            })
            .collect();
        Self { degrees }
    }

    /// Grau de pertinência de `term` (`0.0` se o termo não faz parte do conjunto).
    pub fn degree(&self, term: Term) -> f64 {
        self.degrees.get(&term).copied().unwrap_or(0.0)
    }

    /// Itera pelos pares `(termo, grau)` em ordem estável.
    pub fn iter(&self) -> impl Iterator<Item = (Term, f64)> + '_ {
        self.degrees.iter().map(|(term, degree)| (*term, *degree))
    }

    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }
}

impl fmt::Display for FuzzySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (term, degree)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:.3}", term, degree)?;
        }
        write!(f, "}}")
    }
}

/// As cinco observações já fuzzificadas — entrada do avaliador de regras.
///
/// `hints` é calculado mas nenhuma regra padrão o referencia ainda;
/// fica disponível para regras customizadas via
/// [`RuleBase::new`](crate::inference::RuleBase::new).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FuzzifiedInputs {
    pub screen_time: FuzzySet,
    pub accuracy: FuzzySet,
    pub response_time: FuzzySet,
    pub emotion: FuzzySet,
    pub hints: FuzzySet,
}

impl FuzzifiedInputs {
    /// Conjunto difuso de uma dimensão.
    pub fn get(&self, dimension: Dimension) -> &FuzzySet {
        match dimension {
            Dimension::ScreenTime => &self.screen_time,
            Dimension::Accuracy => &self.accuracy,
            Dimension::ResponseTime => &self.response_time,
            Dimension::Emotion => &self.emotion,
            Dimension::Hints => &self.hints,
        }
    }

    /// Atalho para `get(dimension).degree(term)`.
    pub fn degree(&self, dimension: Dimension, term: Term) -> f64 {
        self.get(dimension).degree(term)
    }
}
