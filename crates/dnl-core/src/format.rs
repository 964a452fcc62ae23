use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Placeholder affiché quand une valeur dérivée est indisponible.
pub const UNKNOWN_PLACEHOLDER: &str = "?";

/// Au-delà de cette magnitude, un tick non entier passe en notation scientifique.
pub const TICK_SCIENTIFIC_ABOVE: f64 = 1000.0;

/// En deçà de cette magnitude (non nulle), un tick passe en notation scientifique.
pub const TICK_SCIENTIFIC_BELOW: f64 = 0.01;

/// Valeur affichée dans la case « résultat » d'une ligne.
///
/// # Example
/// ```
/// use dnl_core::format::DisplayValue;
/// assert_eq!(DisplayValue::Number(7.5).to_string(), "7.5");
/// assert_eq!(DisplayValue::Unknown.to_string(), "?");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DisplayValue {
    /// Résultat calculable, déjà arrondi pour l'affichage.
    Number(f64),
    /// Au moins un champ contributeur est invalide.
    Unknown,
}

impl DisplayValue {
    /// `true` si le placeholder doit être affiché.
    #[must_use]
    pub fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Number(v) => f.write_str(&format_number(v)),
            Self::Unknown => f.write_str(UNKNOWN_PLACEHOLDER),
        }
    }
}

/// Calcule la valeur dérivée `base * multiplier` pour l'affichage.
///
/// Un produit entier est rendu tel quel ; sinon il est arrondi au centième
/// (demi loin de zéro). `has_error` force le placeholder.
///
/// # Example
/// ```
/// use dnl_core::format::{compute_display_value, DisplayValue};
/// assert_eq!(compute_display_value(2.0, 3.0, false), DisplayValue::Number(6.0));
/// assert_eq!(compute_display_value(2.5, 3.0, false), DisplayValue::Number(7.5));
/// assert_eq!(compute_display_value(2.0, 3.0, true), DisplayValue::Unknown);
/// ```
#[must_use]
pub fn compute_display_value(base: f64, multiplier: f64, has_error: bool) -> DisplayValue {
    if has_error {
        return DisplayValue::Unknown;
    }
    let product = base * multiplier;
    if !product.is_finite() {
        // Produit de deux finis qui déborde : rien d'honnête à afficher.
        return DisplayValue::Unknown;
    }
    if is_integral(product) {
        DisplayValue::Number(product)
    } else {
        DisplayValue::Number(round_to_cents(product))
    }
}

/// `true` si la valeur n'a pas de partie fractionnaire.
#[inline]
#[must_use]
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Arrondit au centième, demi loin de zéro, sur la représentation décimale
/// la plus courte de `value` (celle que l'utilisateur lirait).
///
/// `1.005` donne `1.01`, `-0.125` donne `-0.13`.
///
/// # Example
/// ```
/// use dnl_core::format::round_to_cents;
/// assert_eq!(round_to_cents(0.125), 0.13);
/// assert_eq!(round_to_cents(1.005), 1.01);
/// assert_eq!(round_to_cents(-2.675), -2.68);
/// ```
#[must_use]
pub fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // Display de f64 = plus courte représentation qui round-trip, sans exposant.
    match Decimal::from_str(&value.to_string()) {
        Ok(d) => d
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or_else(|| fallback_round(value)),
        Err(_) => fallback_round(value),
    }
}

/// Hors plage de `Decimal` (|x| > ~7.9e28 ou trop de décimales).
fn fallback_round(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formate la valeur d'un tick le long d'une ligne.
///
/// - entier : inchangé ;
/// - non entier de magnitude > 1000, ou non nul < 0.01 : notation
///   scientifique à un chiffre après la virgule (`1.2e+3`) ;
/// - sinon arrondi au centième.
///
/// # Example
/// ```
/// use dnl_core::format::format_tick;
/// assert_eq!(format_tick(4.0), "4");
/// assert_eq!(format_tick(1234.5), "1.2e+3");
/// assert_eq!(format_tick(0.005), "5.0e-3");
/// assert_eq!(format_tick(2.345), "2.35");
/// ```
#[must_use]
pub fn format_tick(value: f64) -> String {
    if !value.is_finite() {
        return UNKNOWN_PLACEHOLDER.to_string();
    }
    if is_integral(value) {
        return format_number(value);
    }
    let magnitude = value.abs();
    if magnitude > TICK_SCIENTIFIC_ABOVE || (magnitude < TICK_SCIENTIFIC_BELOW && magnitude > 0.0)
    {
        return to_exponential(value, 1);
    }
    format_number(round_to_cents(value))
}

/// Valeurs `start + i * step` pour `i` dans `0..count`.
///
/// # Example
/// ```
/// use dnl_core::format::tick_values;
/// assert_eq!(tick_values(0.0, 2.5, 3), vec![0.0, 2.5, 5.0]);
/// ```
#[must_use]
pub fn tick_values(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// Libellés formatés de [`tick_values`].
#[must_use]
pub fn tick_labels(start: f64, step: f64, count: usize) -> Vec<String> {
    tick_values(start, step, count)
        .into_iter()
        .map(format_tick)
        .collect()
}

/// Rendu d'un nombre pour l'UI : forme la plus courte, `-0` affiché `0`,
/// exposant au-delà de 1e21 (les entiers géants restent lisibles).
///
/// # Example
/// ```
/// use dnl_core::format::format_number;
/// assert_eq!(format_number(15.0), "15");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(1e21), "1e+21");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return UNKNOWN_PLACEHOLDER.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.abs() >= 1e21 {
        // `{:e}` donne la mantisse la plus courte : 1e21, 1.5e22.
        return with_signed_exponent(&format!("{value:e}"));
    }
    value.to_string()
}

/// Notation scientifique à `digits` chiffres de mantisse, exposant signé.
fn to_exponential(value: f64, digits: usize) -> String {
    with_signed_exponent(&format!("{value:.digits$e}"))
}

/// `1.2e3` → `1.2e+3` ; `5.0e-3` inchangé.
fn with_signed_exponent(raw: &str) -> String {
    match raw.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn recipe_scenarios() {
        assert_eq!(compute_display_value(2.0, 3.0, false), DisplayValue::Number(6.0));
        assert_eq!(compute_display_value(5.0, 3.0, false), DisplayValue::Number(15.0));
        assert_eq!(compute_display_value(2.5, 3.0, false), DisplayValue::Number(7.5));
    }

    #[test]
    fn error_forces_placeholder() {
        assert_eq!(compute_display_value(2.0, 3.0, true), DisplayValue::Unknown);
        assert_eq!(compute_display_value(0.0, 0.0, true).to_string(), "?");
    }

    #[test]
    fn negative_and_zero_multipliers() {
        assert_eq!(compute_display_value(2.0, -3.0, false), DisplayValue::Number(-6.0));
        assert_eq!(compute_display_value(1.5, -0.5, false), DisplayValue::Number(-0.75));
        assert_eq!(compute_display_value(5.0, 0.0, false).to_string(), "0");
        assert_eq!(compute_display_value(-5.0, 0.0, false).to_string(), "0");
    }

    #[test]
    fn float_noise_is_rounded_away() {
        assert_eq!(compute_display_value(0.1, 3.0, false), DisplayValue::Number(0.3));
        assert_eq!(compute_display_value(1.1, 1.1, false), DisplayValue::Number(1.21));
        assert_eq!(compute_display_value(1.0, 1.0 / 3.0, false), DisplayValue::Number(0.33));
    }

    #[test]
    fn overflowing_product_is_unknown() {
        assert_eq!(compute_display_value(1e308, 10.0, false), DisplayValue::Unknown);
    }

    #[test]
    fn large_integral_products_are_not_rounded() {
        assert_eq!(compute_display_value(1e20, 3.0, false), DisplayValue::Number(3e20));
        assert_eq!(compute_display_value(1e21, 3.0, false).to_string(), "3e+21");
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_to_cents(0.125), 0.13);
        assert_eq!(round_to_cents(-0.125), -0.13);
        assert_eq!(round_to_cents(0.375), 0.38);
        assert_eq!(round_to_cents(2.344), 2.34);
        assert_eq!(round_to_cents(0.001), 0.0);
    }

    #[test]
    fn tick_integers_pass_through() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(15.0), "15");
        assert_eq!(format_tick(-4.0), "-4");
        assert_eq!(format_tick(250_000.0), "250000");
    }

    #[test]
    fn tick_scientific_bounds() {
        assert_eq!(format_tick(1000.5), "1.0e+3");
        assert_eq!(format_tick(-2500.25), "-2.5e+3");
        assert_eq!(format_tick(0.0049), "4.9e-3");
        assert_eq!(format_tick(-0.005), "-5.0e-3");
        // Bornes exclusives
        assert_eq!(format_tick(999.99), "999.99");
        assert_eq!(format_tick(0.01), "0.01");
    }

    #[test]
    fn tick_mid_range_rounds_to_cents() {
        assert_eq!(format_tick(7.5), "7.5");
        assert_eq!(format_tick(0.3333), "0.33");
        assert_eq!(format_tick(-1.005), "-1.01");
    }

    #[test]
    fn tick_non_finite_is_placeholder() {
        assert_eq!(format_tick(f64::NAN), "?");
        assert_eq!(format_tick(f64::INFINITY), "?");
    }

    #[test]
    fn tick_sequence_from_step() {
        assert_eq!(tick_labels(0.0, 2.5, 4), vec!["0", "2.5", "5", "7.5"]);
        assert_eq!(tick_labels(1.0, 0.1, 3), vec!["1", "1.1", "1.2"]);
        assert!(tick_values(3.0, 1.0, 0).is_empty());
    }

    #[test]
    fn display_value_accessors() {
        assert!(DisplayValue::Unknown.is_unknown());
        assert!(!DisplayValue::Number(2.0).is_unknown());
    }

    proptest! {
        #[test]
        fn integral_products_are_exact(b in -10_000i32..10_000, m in -1_000i32..1_000) {
            let expected = f64::from(b) * f64::from(m);
            prop_assert_eq!(
                compute_display_value(f64::from(b), f64::from(m), false),
                DisplayValue::Number(expected)
            );
        }

        #[test]
        fn fractional_products_have_at_most_two_decimals(
            b in -1.0e4f64..1.0e4,
            m in -100.0f64..100.0
        ) {
            if let DisplayValue::Number(v) = compute_display_value(b, m, false) {
                let product = b * m;
                if !is_integral(product) {
                    prop_assert!((v - product).abs() <= 0.005 + 1e-9);
                    let cents = v * 100.0;
                    prop_assert!((cents - cents.round()).abs() < 1e-6);
                }
            } else {
                prop_assert!(false, "finite inputs must not produce Unknown");
            }
        }

        #[test]
        fn error_always_wins(b in proptest::num::f64::ANY, m in proptest::num::f64::ANY) {
            prop_assert_eq!(compute_display_value(b, m, true), DisplayValue::Unknown);
        }

        #[test]
        fn format_tick_never_panics(v in proptest::num::f64::ANY) {
            prop_assert!(!format_tick(v).is_empty());
        }
    }
}
