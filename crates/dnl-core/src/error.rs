use thiserror::Error;

/// Message affiché sous un champ numérique invalide.
pub const NOT_A_NUMBER_MESSAGE: &str = "Please enter a number!";

/// Échec de validation d'un champ de saisie numérique.
///
/// Local au champ : bloque le commit de la valeur, jamais le reste de l'UI.
///
/// # Example
/// ```
/// use dnl_core::error::{ValidationError, NOT_A_NUMBER_MESSAGE};
/// assert_eq!(ValidationError::NotANumber.to_string(), NOT_A_NUMBER_MESSAGE);
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Texte vide, non numérique, NaN ou infini.
    #[error("Please enter a number!")]
    NotANumber,
}

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A configured default value is not a finite number.
    #[error("Default `{key}` must be a finite number, got {value}")]
    NonFiniteDefault {
        /// Config key holding the bad value.
        key: &'static str,
        /// The rejected value.
        value: f64,
    },
}
