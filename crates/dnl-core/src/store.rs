use crate::config::{Defaults, truncate_label};
use crate::field::NumericField;
use crate::format::{DisplayValue, UNKNOWN_PLACEHOLDER, compute_display_value, tick_labels};
use crate::traits::ValueSink;

/// Identifiant d'une des deux lignes (un ingrédient chacune).
///
/// # Example
/// ```
/// use dnl_core::store::LineId;
/// assert_eq!(LineId::Second.index(), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineId {
    First,
    Second,
}

impl LineId {
    /// Les deux lignes, dans l'ordre d'affichage.
    pub const ALL: [Self; 2] = [Self::First, Self::Second];

    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// État propre à une ligne : quantité unitaire + nom d'ingrédient.
#[derive(Clone, Debug, PartialEq)]
pub struct LineState {
    pub base: NumericField,
    pub label: String,
}

impl LineState {
    fn new(base: f64, label: &str) -> Self {
        let mut label = label.to_string();
        truncate_label(&mut label);
        Self {
            base: NumericField::new(base),
            label,
        }
    }
}

/// Événement de saisie brute émis par la couche de présentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldEdit {
    /// Texte du champ quantité unitaire d'une ligne.
    Base(LineId, String),
    /// Texte du champ multiplicateur (quelle que soit la ligne qui l'affiche).
    Multiplier(String),
    /// Nom d'ingrédient d'une ligne.
    Label(LineId, String),
    /// Titre de la recette.
    Title(String),
}

/// Ce qu'un `FieldEdit` a effectivement committé dans l'état numérique.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Commit {
    BaseValue(LineId, f64),
    Multiplier(f64),
}

/// Source de vérité unique : deux lignes, un multiplicateur partagé, un titre.
///
/// Aucun calcul n'est stocké : les valeurs dérivées sont recalculées à chaque
/// lecture.
///
/// # Example
/// ```
/// use dnl_core::store::{FieldEdit, LineId, ValueStore};
/// let mut store = ValueStore::default();
/// assert_eq!(store.derived(LineId::First).to_string(), "6");
/// store.apply(FieldEdit::Multiplier("4".into()));
/// assert_eq!(store.derived(LineId::First).to_string(), "8");
/// assert_eq!(store.derived(LineId::Second).to_string(), "20");
/// ```
#[derive(Clone, Debug)]
pub struct ValueStore {
    lines: [LineState; 2],
    multiplier: NumericField,
    title: String,
    defaults: Defaults,
}

impl ValueStore {
    /// Crée le store depuis les valeurs par défaut de la config.
    #[must_use]
    pub fn new(defaults: &Defaults) -> Self {
        Self {
            lines: [
                LineState::new(defaults.first_base, &defaults.first_label),
                LineState::new(defaults.second_base, &defaults.second_label),
            ],
            multiplier: NumericField::new(defaults.multiplier),
            title: defaults.title.clone(),
            defaults: defaults.clone(),
        }
    }

    /// Réducteur : applique une saisie brute et retourne le commit éventuel.
    ///
    /// Un texte numérique invalide ne committe rien : le champ passe en
    /// erreur et garde sa dernière valeur valide.
    pub fn apply(&mut self, edit: FieldEdit) -> Option<Commit> {
        match edit {
            FieldEdit::Base(line, raw) => {
                let value = self.lines[line.index()].base.edit(raw)?;
                self.on_base_value_change(line, value);
                Some(Commit::BaseValue(line, value))
            }
            FieldEdit::Multiplier(raw) => {
                let value = self.multiplier.edit(raw)?;
                self.on_multiplier_change(value);
                Some(Commit::Multiplier(value))
            }
            FieldEdit::Label(line, mut text) => {
                truncate_label(&mut text);
                self.lines[line.index()].label = text;
                None
            }
            FieldEdit::Title(text) => {
                self.title = text;
                None
            }
        }
    }

    /// Valeur affichée dans la case résultat de `line`.
    #[must_use]
    pub fn derived(&self, line: LineId) -> DisplayValue {
        let base = &self.line(line).base;
        compute_display_value(base.parsed(), self.multiplier.parsed(), self.has_error(line))
    }

    /// `true` si la quantité de `line` ou le multiplicateur est invalide.
    #[must_use]
    pub fn has_error(&self, line: LineId) -> bool {
        !self.line(line).base.is_valid() || !self.multiplier.is_valid()
    }

    /// Libellés des ticks `0, b, 2b, ...` de la ligne des quantités.
    ///
    /// Tant que la quantité est invalide, seuls les ticks non nuls passent au
    /// placeholder.
    #[must_use]
    pub fn amount_ticks(&self, line: LineId, count: usize) -> Vec<String> {
        let base = &self.line(line).base;
        if base.is_valid() {
            tick_labels(0.0, base.parsed(), count)
        } else {
            (0..count)
                .map(|i| {
                    if i == 0 {
                        "0".to_string()
                    } else {
                        UNKNOWN_PLACEHOLDER.to_string()
                    }
                })
                .collect()
        }
    }

    #[must_use]
    pub fn line(&self, line: LineId) -> &LineState {
        &self.lines[line.index()]
    }

    /// Champ multiplicateur partagé.
    #[must_use]
    pub fn multiplier(&self) -> &NumericField {
        &self.multiplier
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Valeurs de départ utilisées par `reset`.
    #[must_use]
    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Retour aux valeurs de départ (texte, nombres, erreurs, libellés).
    pub fn reset(&mut self) {
        *self = Self::new(&self.defaults);
        log::debug!("Store reset to defaults");
    }

    /// Comme `reset`, avec de nouvelles valeurs de départ (config rechargée).
    pub fn reset_with(&mut self, defaults: &Defaults) {
        *self = Self::new(defaults);
        log::debug!("Store reset to reloaded defaults");
    }
}

impl Default for ValueStore {
    fn default() -> Self {
        Self::new(&Defaults::default())
    }
}

impl ValueSink for ValueStore {
    fn on_base_value_change(&mut self, line: LineId, value: f64) {
        let field = &mut self.lines[line.index()].base;
        // Commit issu de la saisie : le texte brut est déjà la source, on le garde.
        if !(field.is_valid() && field.parsed() == value) {
            field.set_value(value);
        }
        log::debug!("{line:?} base = {value}");
    }

    fn on_multiplier_change(&mut self, value: f64) {
        if !(self.multiplier.is_valid() && self.multiplier.parsed() == value) {
            self.multiplier.set_value(value);
        }
        log::debug!("multiplier = {value}");
    }
}
