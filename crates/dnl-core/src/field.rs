use crate::error::ValidationError;
use crate::format::format_number;
use crate::validate::validate;

/// Champ de saisie numérique : texte brut + dernière valeur valide.
///
/// `parsed` ne change que lorsque `raw` se parse en nombre fini ; sinon il
/// garde sa dernière valeur valide et `error` est renseigné.
///
/// # Example
/// ```
/// use dnl_core::field::NumericField;
/// let mut field = NumericField::new(3.0);
/// assert_eq!(field.edit("x"), None);
/// assert!(!field.is_valid());
/// assert_eq!(field.parsed(), 3.0);
/// assert_eq!(field.edit("4"), Some(4.0));
/// assert!(field.is_valid());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NumericField {
    raw: String,
    parsed: f64,
    error: Option<ValidationError>,
}

impl NumericField {
    /// Champ valide initialisé à `value`, texte brut synchronisé.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            raw: format_number(value),
            parsed: value,
            error: None,
        }
    }

    /// Remplace le texte brut et tente de le valider.
    ///
    /// Retourne la nouvelle valeur si elle doit être committée, `None` si
    /// le texte est invalide (la valeur précédente est conservée).
    pub fn edit(&mut self, raw: impl Into<String>) -> Option<f64> {
        self.raw = raw.into();
        match validate(&self.raw) {
            Ok(value) => {
                self.parsed = value;
                self.error = None;
                Some(value)
            }
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }

    /// Commit programmatique : valeur canonique, texte resynchronisé, erreur effacée.
    pub fn set_value(&mut self, value: f64) {
        self.raw = format_number(value);
        self.parsed = value;
        self.error = None;
    }

    /// Texte tel que saisi.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Dernière valeur valide.
    #[must_use]
    pub fn parsed(&self) -> f64 {
        self.parsed
    }

    /// Erreur courante, s'il y en a une.
    #[must_use]
    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Message inline à afficher sous le champ.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error.map(|e| e.to_string())
    }
}

impl Default for NumericField {
    fn default() -> Self {
        Self::new(0.0)
    }
}
