//! # Ações e Intervenções
//!
//! O motor decide em dois eixos independentes:
//!
//! - [`Action`] — **quanto** a dificuldade deve mudar, em 7 baldes fixos,
//!   cada um com um centro numérico usado na defuzzificação
//! - [`Intervention`] — **que ajuda** mostrar na interface (dica, troca visual)
//!
//! ## Centros dos Baldes
//!
//! ```text
//!  decrease_much  decrease  slight_decrease  stay  slight_increase  increase  increase_much
//!      -2.0        -1.0         -0.5         0.0        +0.5          +1.0        +2.0
//! ```

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::membership::round3;

/// Balde de ajuste de dificuldade.
///
/// A ordem de declaração é significativa: é a ordem de iteração da
/// [`ActionStrengthTable`] e o critério de desempate da ação dominante.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    DecreaseMuch,
    Decrease,
    SlightDecrease,
    Stay,
    SlightIncrease,
    Increase,
    IncreaseMuch,
}

impl Action {
    /// Todos os baldes, em ordem crescente de centro.
    pub const ALL: [Action; 7] = [
        Action::DecreaseMuch,
        Action::Decrease,
        Action::SlightDecrease,
        Action::Stay,
        Action::SlightIncrease,
        Action::Increase,
        Action::IncreaseMuch,
    ];

    /// Centro do balde, em níveis de dificuldade.
    pub fn center(&self) -> f64 {
        match self {
            Action::DecreaseMuch => -2.0,
            Action::Decrease => -1.0,
            Action::SlightDecrease => -0.5,
            Action::Stay => 0.0,
            Action::SlightIncrease => 0.5,
            Action::Increase => 1.0,
            Action::IncreaseMuch => 2.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::DecreaseMuch => "decrease_much",
            Action::Decrease => "decrease",
            Action::SlightDecrease => "slight_decrease",
            Action::Stay => "stay",
            Action::SlightIncrease => "slight_increase",
            Action::Increase => "increase",
            Action::IncreaseMuch => "increase_much",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sinal para a interface, vindo da camada de sistema especialista.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intervention {
    /// Nenhuma ação de UI.
    #[default]
    None,
    /// Mostrar uma dica sobreposta à questão.
    ShowHint,
    /// Trocar a representação visual da questão.
    ChangeVisual,
}

impl Intervention {
    pub fn label(&self) -> &'static str {
        match self {
            Intervention::None => "none",
            Intervention::ShowHint => "show_hint",
            Intervention::ChangeVisual => "change_visual",
        }
    }
}

impl fmt::Display for Intervention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Força acumulada por balde de ação, sempre com os 7 baldes presentes.
///
/// Reconstruída do zero a cada avaliação. Serializa como objeto JSON
/// na ordem de [`Action::ALL`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActionStrengthTable {
    strengths: [f64; 7],
}

impl ActionStrengthTable {
    /// Tabela com todos os baldes em `0.0`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, action: Action) -> f64 {
        self.strengths[action.index()]
    }

    /// Acumula por **máximo**: a força só é trocada se `strength` for
    /// estritamente maior que a atual. O valor guardado é arredondado
    /// a 3 casas; a comparação usa o valor bruto.
    ///
    /// Retorna `true` se a tabela mudou.
    pub fn raise(&mut self, action: Action, strength: f64) -> bool {
        let slot = &mut self.strengths[action.index()];
        if strength > *slot {
            *slot = round3(strength);
            true
        } else {
            false
        }
    }

    /// Itera pelos pares `(ação, força)` na ordem fixa dos baldes.
    pub fn iter(&self) -> impl Iterator<Item = (Action, f64)> + '_ {
        Action::ALL.iter().map(move |action| (*action, self.get(*action)))
    }

    /// `true` se nenhum balde recebeu força positiva.
    pub fn is_inactive(&self) -> bool {
        self.strengths.iter().all(|s| *s <= 0.0)
    }

    /// Balde com a maior força e a própria força.
    ///
    /// Empates ficam com o primeiro balde na ordem de [`Action::ALL`].
    /// Sem nenhuma força positiva, retorna `(Stay, 0.0)`.
    pub fn dominant(&self) -> (Action, f64) {
        if self.is_inactive() {
            return (Action::Stay, 0.0);
        }
        let mut best = (Action::ALL[0], self.strengths[0]);
        for (action, strength) in self.iter().skip(1) {
            if strength > best.1 {
                best = (action, strength);
            }
        }
        best
    }
}

impl Serialize for ActionStrengthTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Action::ALL.len()))?;
        for (action, strength) in self.iter() {
            map.serialize_entry(&action, &strength)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ActionStrengthTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = std::collections::HashMap::<Action, f64>::deserialize(deserializer)?;
        let mut table = Self::new();
        for (action, strength) in entries {
            table.strengths[action.index()] = strength.clamp(0.0, 1.0);
        }
        Ok(table)
    }
}

impl fmt::Display for ActionStrengthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (action, strength)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={:.3}", action, strength)?;
        }
        Ok(())
    }
}
