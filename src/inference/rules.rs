//! # Regras de Inferência Difusa
//!
//! A base de regras é **dado, não código**: cada [`Rule`] é um registro
//! declarativo (nome, antecedentes, ação, peso) e um único interpretador
//! genérico ([`RuleBase::evaluate`]) avalia todas elas.
//!
//! ## Como Funciona
//!
//! ```text
//! para cada regra, na ordem:
//!   força    = min(grau de cada antecedente)     // AND difuso
//!   ponderada = força × peso
//!   se ponderada > tabela[ação]:                 // acumulação por MÁXIMO
//!     tabela[ação] = round3(ponderada)
//! ```
//!
//! A acumulação é por máximo, não por soma: duas regras que apontam
//! para o mesmo balde não se reforçam.
//!
//! ## Regras Padrão (emoção primeiro)
//!
//! | Nome | Antecedentes | Ação | Peso |
//! |------|--------------|------|------|
//! | `happy_correct_fast` | positive ∧ high ∧ fast | increase_much | 1.0 |
//! | `happy_correct` | positive ∧ high | increase | 0.9 |
//! | `happy_wrong` | positive ∧ low | stay | 0.6 |
//! | `neutral_correct_fast` | neutral ∧ high ∧ fast | slight_increase | 0.7 |
//! | `neutral_correct` | neutral ∧ high | stay | 0.6 |
//! | `neutral_wrong` | neutral ∧ low | slight_decrease | 0.7 |
//! | `negative_wrong` | negative ∧ low | decrease_much | 1.0 |
//! | `negative_correct_fast` | negative ∧ high ∧ fast | slight_decrease | 0.8 |
//! | `negative_correct_slow` | negative ∧ high ∧ slow | slight_increase | 0.7 |
//!
//! Nenhuma regra padrão usa `hints` nem `screen_time`, e nenhuma aponta
//! para `decrease`; regras customizadas podem usar todos.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Action, ActionStrengthTable, Dimension, FuzzifiedInputs, Term};

/// Ativações abaixo deste valor não são logadas.
const ACTIVATION_LOG_THRESHOLD: f64 = 0.01;

/// Um antecedente: "a dimensão `dimension` é `term`".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Antecedent {
    pub dimension: Dimension,
    pub term: Term,
}

impl Antecedent {
    pub const fn new(dimension: Dimension, term: Term) -> Self {
        Self { dimension, term }
    }
}

impl fmt::Display for Antecedent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.dimension, self.term)
    }
}

/// Regra difusa: `SE a₁ E a₂ E ... ENTÃO action (peso weight)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub antecedents: Vec<Antecedent>,
    pub action: Action,
    pub weight: f64,
}

impl Rule {
    pub fn new(
        name: impl Into<String>,
        antecedents: impl Into<Vec<Antecedent>>,
        action: Action,
        weight: f64,
    ) -> Self {
        Self {
            name: name.into(),
            antecedents: antecedents.into(),
            action,
            weight,
        }
    }

    /// Força de disparo: mínimo dos graus dos antecedentes.
    pub fn strength(&self, inputs: &FuzzifiedInputs) -> f64 {
        self.antecedents
            .iter()
            .map(|a| inputs.degree(a.dimension, a.term))
            .fold(f64::INFINITY, f64::min)
            .clamp(0.0, 1.0)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conditions: Vec<String> = self.antecedents.iter().map(|a| a.to_string()).collect();
        write!(
            f,
            "{}: {} => {} (w={:.1})",
            self.name,
            conditions.join(" AND "),
            self.action,
            self.weight
        )
    }
}

/// Erros de construção de uma base de regras customizada.
#[derive(Debug, Error, PartialEq)]
pub enum RuleError {
    #[error("nome de regra duplicado: {0}")]
    DuplicateName(String),
    #[error("regra {name}: peso {weight} fora de [0, 1]")]
    InvalidWeight { name: String, weight: f64 },
    #[error("regra {0}: sem antecedentes")]
    NoAntecedents(String),
    #[error("regra {name}: termo {term} não pertence à dimensão {dimension}")]
    TermMismatch {
        name: String,
        dimension: Dimension,
        term: Term,
    },
}

/// Conjunto ordenado e imutável de regras.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RuleBase {
    rules: Vec<Rule>,
}

impl RuleBase {
    /// Valida e constrói uma base de regras.
    ///
    /// # Erros
    ///
    /// Retorna [`RuleError`] se houver nomes repetidos, peso fora de
    /// `[0, 1]`, regra sem antecedentes ou termo de outra dimensão.
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleError> {
        let mut names = HashSet::new();
        for rule in &rules {
            if !names.insert(rule.name.as_str()) {
                return Err(RuleError::DuplicateName(rule.name.clone()));
            }
            if !(0.0..=1.0).contains(&rule.weight) {
                return Err(RuleError::InvalidWeight {
                    name: rule.name.clone(),
                    weight: rule.weight,
                });
            }
            if rule.antecedents.is_empty() {
                return Err(RuleError::NoAntecedents(rule.name.clone()));
            }
            if let Some(bad) = rule
                .antecedents
                .iter()
                .find(|a| !a.dimension.accepts(a.term))
            {
                return Err(RuleError::TermMismatch {
                    name: rule.name.clone(),
                    dimension: bad.dimension,
                    term: bad.term,
                });
            }
        }
        Ok(Self { rules })
    }

    /// Regras na ordem de avaliação.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Avalia todas as regras e acumula a força de cada balde.
    pub fn evaluate(&self, inputs: &FuzzifiedInputs) -> ActionStrengthTable {
        let mut table = ActionStrengthTable::new();
        for rule in &self.rules {
            let strength = rule.strength(inputs);
            let weighted = strength * rule.weight;
            if weighted > ACTIVATION_LOG_THRESHOLD {
                tracing::debug!(
                    rule = %rule.name,
                    strength = %format!("{:.3}", strength),
                    weighted = %format!("{:.3}", weighted),
                    action = %rule.action,
                    "Regra ativada"
                );
            }
            table.raise(rule.action, weighted);
        }
        tracing::debug!(outputs = %table, "Forças finais por balde");
        table
    }
}

impl Default for RuleBase {
    /// A tabela fixa de 9 regras "emoção primeiro".
    fn default() -> Self {
        use Dimension::{Accuracy, Emotion, ResponseTime};

        let positive = Antecedent::new(Emotion, Term::Positive);
        let neutral = Antecedent::new(Emotion, Term::Neutral);
        let negative = Antecedent::new(Emotion, Term::Negative);
        let correct = Antecedent::new(Accuracy, Term::High);
        let wrong = Antecedent::new(Accuracy, Term::Low);
        let fast = Antecedent::new(ResponseTime, Term::Fast);
        let slow = Antecedent::new(ResponseTime, Term::Slow);

        let rules = vec![
            // emoção positiva
            Rule::new(
                "happy_correct_fast",
                [positive, correct, fast],
                Action::IncreaseMuch,
                1.0,
            ),
            Rule::new("happy_correct", [positive, correct], Action::Increase, 0.9),
            Rule::new("happy_wrong", [positive, wrong], Action::Stay, 0.6),
            // emoção neutra
            Rule::new(
                "neutral_correct_fast",
                [neutral, correct, fast],
                Action::SlightIncrease,
                0.7,
            ),
            Rule::new("neutral_correct", [neutral, correct], Action::Stay, 0.6),
            Rule::new("neutral_wrong", [neutral, wrong], Action::SlightDecrease, 0.7),
            // emoção negativa: errar pesa mais; acertar devagar ainda é recompensado
            Rule::new("negative_wrong", [negative, wrong], Action::DecreaseMuch, 1.0),
            Rule::new(
                "negative_correct_fast",
                [negative, correct, fast],
                Action::SlightDecrease,
                0.8,
            ),
            Rule::new(
                "negative_correct_slow",
                [negative, correct, slow],
                Action::SlightIncrease,
                0.7,
            ),
        ];
        Self { rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FeedbackInput;
    use crate::inference::fuzzify::fuzzify;

    fn table_for(input: FeedbackInput) -> ActionStrengthTable {
        RuleBase::default().evaluate(&fuzzify(&input))
    }

    #[test]
    fn test_default_rules_are_valid() {
        let default = RuleBase::default();
        assert_eq!(default.len(), 9);
        let rebuilt = RuleBase::new(default.rules().to_vec()).unwrap();
        assert_eq!(rebuilt, default);
    }

    /// Feliz, correto e rápido: todas as regras "happy" e "neutral" de acerto disparam
    #[test]
    fn test_happy_correct_fast_strengths() {
        let table = table_for(FeedbackInput::new(15.0, 1.0, 10.0, "happy", 0, 2));
        assert_eq!(table.get(Action::IncreaseMuch), 0.8);
        assert_eq!(table.get(Action::Increase), 0.72);
        assert_eq!(table.get(Action::SlightIncrease), 0.14);
        assert_eq!(table.get(Action::Stay), 0.12);
        assert_eq!(table.get(Action::DecreaseMuch), 0.0);
        assert_eq!(table.get(Action::Decrease), 0.0);
    }

    #[test]
    fn test_fear_wrong_strengths() {
        let table = table_for(FeedbackInput::new(20.0, 0.0, 50.0, "fear", 1, 3));
        assert_eq!(table.get(Action::DecreaseMuch), 0.8);
        assert_eq!(table.get(Action::SlightDecrease), 0.14);
        assert_eq!(table.get(Action::Stay), 0.0);
    }

    #[test]
    fn test_neutral_correct_fast_strengths() {
        let table = table_for(FeedbackInput::new(5.0, 1.0, 10.0, "neutral", 0, 3));
        assert_eq!(table.get(Action::IncreaseMuch), 0.1);
        assert_eq!(table.get(Action::Increase), 0.09);
        assert_eq!(table.get(Action::SlightIncrease), 0.56);
        assert_eq!(table.get(Action::Stay), 0.48);
        assert_eq!(table.get(Action::SlightDecrease), 0.08);
    }

    /// Duas regras no mesmo balde: fica a maior, não a soma
    #[test]
    fn test_max_accumulation_not_sum() {
        let correct = Antecedent::new(Dimension::Accuracy, Term::High);
        let fast = Antecedent::new(Dimension::ResponseTime, Term::Fast);
        let base = RuleBase::new(vec![
            Rule::new("weak", [correct], Action::Increase, 0.3),
            Rule::new("strong", [correct, fast], Action::Increase, 0.9),
            Rule::new("weaker_again", [fast], Action::Increase, 0.5),
        ])
        .unwrap();
        let table = base.evaluate(&fuzzify(&FeedbackInput::new(5.0, 1.0, 10.0, "happy", 0, 3)));
        assert_eq!(table.get(Action::Increase), 0.9);
    }

    #[test]
    fn test_medium_accuracy_fires_nothing() {
        let table = table_for(FeedbackInput::new(5.0, 0.5, 30.0, "neutral", 0, 1));
        assert!(table.is_inactive());
    }

    #[test]
    fn test_rule_strength_is_minimum() {
        let rule = Rule::new(
            "probe",
            [
                Antecedent::new(Dimension::Emotion, Term::Negative),
                Antecedent::new(Dimension::Accuracy, Term::Low),
            ],
            Action::DecreaseMuch,
            1.0,
        );
        let inputs = fuzzify(&FeedbackInput::new(0.0, 0.4, 0.0, "confused", 0, 1));
        // low(0.4) = 0.5, negative(confused) = 0.7
        assert_eq!(rule.strength(&inputs), 0.5);
    }

    /// Regras customizadas podem usar a dimensão `hints`
    #[test]
    fn test_custom_rule_on_hints() {
        let base = RuleBase::new(vec![Rule::new(
            "many_hints",
            [Antecedent::new(Dimension::Hints, Term::Many)],
            Action::Decrease,
            0.5,
        )])
        .unwrap();
        let table = base.evaluate(&fuzzify(&FeedbackInput::new(0.0, 1.0, 0.0, "happy", 4, 3)));
        assert_eq!(table.get(Action::Decrease), 0.5);
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let rule = Rule::new(
            "dup",
            [Antecedent::new(Dimension::Accuracy, Term::High)],
            Action::Stay,
            0.5,
        );
        let err = RuleBase::new(vec![rule.clone(), rule]).unwrap_err();
        assert_eq!(err, RuleError::DuplicateName("dup".to_string()));
    }

    #[test]
    fn test_rejects_bad_weight_and_terms() {
        let heavy = Rule::new(
            "heavy",
            [Antecedent::new(Dimension::Accuracy, Term::High)],
            Action::Stay,
            1.5,
        );
        assert!(matches!(
            RuleBase::new(vec![heavy]),
            Err(RuleError::InvalidWeight { .. })
        ));

        let nan = Rule::new(
            "nan",
            [Antecedent::new(Dimension::Accuracy, Term::High)],
            Action::Stay,
            f64::NAN,
        );
        assert!(matches!(
            RuleBase::new(vec![nan]),
            Err(RuleError::InvalidWeight { .. })
        ));

        let mismatched = Rule::new(
            "mismatched",
            [Antecedent::new(Dimension::Emotion, Term::Fast)],
            Action::Stay,
            0.5,
        );
        assert_eq!(
            RuleBase::new(vec![mismatched]).unwrap_err(),
            RuleError::TermMismatch {
                name: "mismatched".to_string(),
                dimension: Dimension::Emotion,
                term: Term::Fast,
            }
        );

        let empty = Rule::new("empty", Vec::new(), Action::Stay, 0.5);
        assert_eq!(
            RuleBase::new(vec![empty]).unwrap_err(),
            RuleError::NoAntecedents("empty".to_string())
        );
    }

    #[test]
    fn test_rule_display() {
        let base = RuleBase::default();
        let rule = &base.rules()[0];
        assert_eq!(
            rule.to_string(),
            "happy_correct_fast: emotion.positive AND accuracy.high AND response_time.fast => increase_much (w=1.0)"
        );
    }
}
