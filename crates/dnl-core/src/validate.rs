use crate::error::ValidationError;

/// Parse le texte brut d'un champ en nombre réel fini.
///
/// Le texte est trimé avant tout test. Accepte entiers, décimaux (`.5`, `5.`),
/// signe explicite, notation scientifique (`2.5e-2`) et littéraux non signés
/// en base 16/8/2 (`0x1A`, `0o17`, `0b101`).
///
/// # Errors
/// [`ValidationError::NotANumber`] si le texte est vide, non numérique, ou si
/// la valeur obtenue est NaN ou infinie.
///
/// # Example
/// ```
/// use dnl_core::validate::validate;
/// use dnl_core::error::ValidationError;
/// assert_eq!(validate(" 3.5 "), Ok(3.5));
/// assert_eq!(validate("Infinity"), Err(ValidationError::NotANumber));
/// ```
pub fn validate(raw: &str) -> Result<f64, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationError::NotANumber);
    }

    let value = match parse_radix_literal(text) {
        Some(v) => v,
        None => text.parse::<f64>().map_err(|_| ValidationError::NotANumber)?,
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotANumber)
    }
}

/// `0x` / `0o` / `0b` sans signe. `None` si le texte n'a pas de préfixe de base.
///
/// Un préfixe suivi de chiffres invalides donne NaN, pas `None` : le texte
/// ne doit pas retomber sur le parseur décimal.
fn parse_radix_literal(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }

    let mut acc = 0.0_f64;
    for ch in digits.chars() {
        match ch.to_digit(radix) {
            Some(d) => acc = acc * f64::from(radix) + f64::from(d),
            None => return Some(f64::NAN),
        }
    }
    Some(acc)
}
