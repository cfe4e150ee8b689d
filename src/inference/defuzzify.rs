//! # Defuzzificação — Centroide Ponderado
//!
//! Colapsa a [`ActionStrengthTable`] num único ajuste numérico:
//!
//! ```text
//! adjustment = Σ(força_i × centro_i) / Σ(força_i)     (só baldes com força > 0)
//! ```
//!
//! Sem nenhuma força positiva o ajuste é `0.0` — o denominador zero
//! nunca chega à divisão.

use crate::core::{clamp_level, round3, Action, ActionStrengthTable};

/// Ajuste de dificuldade pelo centroide ponderado, arredondado a 3 casas.
///
/// ```rust
/// use adaptive_fuzzy::core::ActionStrengthTable;
/// use adaptive_fuzzy::inference::defuzzify::defuzzify;
///
/// assert_eq!(defuzzify(&ActionStrengthTable::new()), 0.0);
/// ```
pub fn defuzzify(outputs: &ActionStrengthTable) -> f64 {
    let (numerator, denominator) = outputs
        .iter()
        .filter(|(_, strength)| *strength > 0.0)
        .fold((0.0, 0.0), |(num, den), (action, strength)| {
            (num + strength * action.center(), den + strength)
        });

    if denominator == 0.0 {
        return 0.0;
    }
    round3(numerator / denominator)
}

/// Nível discreto após aplicar `adjustment`, limitado a `[1, 5]`.
///
/// O arredondamento empata para o par (`2.5 → 2`, `3.5 → 4`).
pub fn level_after(current_level: i32, adjustment: f64) -> i32 {
    let raw = f64::from(current_level) + adjustment;
    if !raw.is_finite() {
        return clamp_level(current_level);
    }
    // o clamp em f64 evita overflow na conversão
    clamp_level(raw.round_ties_even().clamp(i32::MIN as f64, i32::MAX as f64) as i32)
}

/// Balde dominante e sua força (a confiança da decisão).
pub fn dominant_action(outputs: &ActionStrengthTable) -> (Action, f64) {
    outputs.dominant()
}
