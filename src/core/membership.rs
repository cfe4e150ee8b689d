//! # Funções de Pertinência — A Régua Difusa
//!
//! Funções de pertinência convertem um valor **crisp** (ex: `35.0` segundos)
//! num grau de pertinência em `[0, 1]` para um termo linguístico
//! (ex: "normal").
//!
//! ## Formas Suportadas
//!
//! ```text
//! trimf(x, a, b, c)              trapmf(x, a, b, c, d)
//!
//!   1 ┤      ╱╲                    1 ┤     ┌──────┐
//!     │     ╱  ╲                     │    ╱        ╲
//!   0 ┼────╱────╲────              0 ┼───╱──────────╲───
//!          a  b  c                       a  b      c  d
//! ```
//!
//! Valores fora do domínio (negativos, NaN, acima do teto) caem
//! em grau `0.0` — nunca em erro.

/// Pertinência **triangular**.
///
/// - `0.0` para `x <= a` ou `x >= c`
/// - sobe linearmente de `a` até `b` (vale `1.0` em `b`)
/// - desce linearmente de `b` até `c`
///
/// # Exemplo
///
/// ```rust
/// use adaptive_fuzzy::core::membership::trimf;
///
/// assert_eq!(trimf(50.0, 20.0, 50.0, 80.0), 1.0);
/// assert_eq!(trimf(20.0, 20.0, 50.0, 80.0), 0.0);
/// ```
pub fn trimf(x: f64, a: f64, b: f64, c: f64) -> f64 {
    if x <= a || x >= c {
        0.0
    } else if x <= b {
        (x - a) / (b - a)
    } else if x < c {
        (c - x) / (c - b)
    } else {
        // NaN
        0.0
    }
}

/// Pertinência **trapezoidal**.
///
/// - `0.0` abaixo de `a` ou acima de `d`
/// - sobe de `a` até `b` (ou `1.0` direto se `a == b`, ombro esquerdo)
/// - platô `1.0` em `[b, c]`
/// - desce de `c` até `d` (ou `1.0` se `c == d`, ombro direito)
///
/// Os ombros permitem modelar termos "abertos" como *short* (`0,0,20,40`)
/// ou *high* (`0.7,0.9,1,1`), que valem `1.0` no extremo do domínio.
///
/// # Exemplo
///
/// ```rust
/// use adaptive_fuzzy::core::membership::trapmf;
///
/// assert_eq!(trapmf(0.0, 0.0, 0.0, 0.3, 0.5), 1.0);
/// assert_eq!(trapmf(0.3, 0.0, 0.0, 0.3, 0.5), 1.0);
/// assert_eq!(trapmf(0.5, 0.0, 0.0, 0.3, 0.5), 0.0);
/// ```
pub fn trapmf(x: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    if x < a || x > d {
        0.0
    } else if x < b {
        if b > a {
            (x - a) / (b - a)
        } else {
            1.0
        }
    } else if x <= c {
        1.0
    } else if x <= d {
        if d > c {
            (d - x) / (d - c)
        } else {
            1.0
        }
    } else {
        0.0
    }
}

/// Arredonda para 3 casas decimais.
///
/// Os graus expostos em [`FuzzySet`](super::FuzzySet) e as forças na
/// [`ActionStrengthTable`](super::ActionStrengthTable) passam por aqui,
/// então saídas literais como `0.667` são reproduzíveis em testes.
pub fn round3(value: f64) -> f64 {
    round_decimals(value, 3)
}

/// Arredonda para `places` casas decimais a partir do valor binário exato.
///
/// `value * 10^places` pode cair exatamente em `.5` quando o `f64`
/// guardado não é um empate (`0.0125` é um pouco maior que 1/80), e o
/// arredondamento iria para o lado errado. A formatação com precisão
/// fixa arredonda a expansão decimal exata.
///
/// ```rust
/// use adaptive_fuzzy::core::membership::round_decimals;
///
/// assert_eq!(round_decimals(0.25 / 20.0, 3), 0.013);
/// assert_eq!(round_decimals(100.0 / 3.0, 1), 33.3);
/// ```
pub fn round_decimals(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", places, value).parse().unwrap_or(value)
}
