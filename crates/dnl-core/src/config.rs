use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Longueur maximale (en caractères) d'un nom d'ingrédient.
pub const LABEL_MAX_CHARS: usize = 20;

/// Bornes du nombre de ticks dessinés par ligne.
pub const TICK_COUNT_RANGE: (usize, usize) = (2, 12);

/// Configuration complète : valeurs de départ + affichage.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use dnl_core::config::AppConfig;
/// let config = AppConfig::default();
/// assert_eq!(config.defaults.multiplier, 3.0);
/// assert_eq!(config.display.tick_count, 5);
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct AppConfig {
    /// Valeurs chargées au démarrage et au reset.
    pub defaults: Defaults,
    /// Réglages d'affichage, hot-rechargeables.
    pub display: DisplayConfig,
}

/// Valeurs initiales du store.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Defaults {
    /// Quantité pour une portion, premier ingrédient.
    pub first_base: f64,
    /// Quantité pour une portion, second ingrédient.
    pub second_base: f64,
    /// Nombre de portions, partagé par les deux lignes.
    pub multiplier: f64,
    pub first_label: String,
    pub second_label: String,
    /// Titre de la recette.
    pub title: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            first_base: 2.0,
            second_base: 5.0,
            multiplier: 3.0,
            first_label: "밀가루".to_string(),
            second_label: "설탕".to_string(),
            title: "맛있는 쿠키 만들기".to_string(),
        }
    }
}

/// Palette d'une ligne.
///
/// # Example
/// ```
/// use dnl_core::config::Theme;
/// assert_eq!(Theme::default(), Theme::Sky);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Sky,
    Cyan,
    Amber,
    Rose,
}

/// Réglages d'affichage.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DisplayConfig {
    /// Nombre de ticks par ligne (0, b, 2b, ...). Borné par `TICK_COUNT_RANGE`.
    pub tick_count: usize,
    /// Dessiner la rangée de ticks sous chaque ligne.
    pub show_ticks: bool,
    pub first_theme: Theme,
    pub second_theme: Theme,
    /// Afficher le rappel « F1 = help » dans le pied de page.
    pub show_help_hint: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tick_count: 5,
            show_ticks: true,
            first_theme: Theme::Sky,
            second_theme: Theme::Cyan,
            show_help_hint: true,
        }
    }
}

impl AppConfig {
    /// Clamp all fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.display.tick_count = self
            .display
            .tick_count
            .clamp(TICK_COUNT_RANGE.0, TICK_COUNT_RANGE.1);
        for label in [&mut self.defaults.first_label, &mut self.defaults.second_label] {
            if truncate_label(label) {
                log::warn!("Label truncated to {LABEL_MAX_CHARS} characters: {label}");
            }
        }
    }

    /// Vérifie que les valeurs numériques par défaut sont finies.
    ///
    /// # Errors
    /// [`CoreError::NonFiniteDefault`] pour la première valeur fautive.
    pub fn validate(&self) -> Result<(), CoreError> {
        let d = &self.defaults;
        for (key, value) in [
            ("first_base", d.first_base),
            ("second_base", d.second_base),
            ("multiplier", d.multiplier),
        ] {
            if !value.is_finite() {
                return Err(CoreError::NonFiniteDefault { key, value });
            }
        }
        Ok(())
    }
}

/// Tronque un nom d'ingrédient à `LABEL_MAX_CHARS` caractères.
///
/// Retourne `true` si le texte a été coupé. Silencieux : c'est à l'appelant
/// de signaler une troncature venue de la config.
///
/// # Example
/// ```
/// use dnl_core::config::truncate_label;
/// let mut label = "a".repeat(30);
/// assert!(truncate_label(&mut label));
/// assert_eq!(label.chars().count(), 20);
/// ```
pub fn truncate_label(label: &mut String) -> bool {
    match label.char_indices().nth(LABEL_MAX_CHARS) {
        Some((idx, _)) => {
            label.truncate(idx);
            true
        }
        None => false,
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    defaults: Option<DefaultsSection>,
    display: Option<DisplaySection>,
}

/// Defaults section, all fields optional for partial override.
#[derive(Deserialize)]
struct DefaultsSection {
    first_base: Option<f64>,
    second_base: Option<f64>,
    multiplier: Option<f64>,
    first_label: Option<String>,
    second_label: Option<String>,
    title: Option<String>,
}

/// Display section, all fields optional.
#[derive(Deserialize)]
struct DisplaySection {
    tick_count: Option<usize>,
    show_ticks: Option<bool>,
    first_theme: Option<Theme>,
    second_theme: Option<Theme>,
    show_help_hint: Option<bool>,
}

/// Parse un document TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the TOML is malformed or a default is not finite.
///
/// # Example
/// ```
/// use dnl_core::config::parse_config;
/// let config = parse_config("[defaults]\nmultiplier = 4\n").unwrap();
/// assert_eq!(config.defaults.multiplier, 4.0);
/// assert_eq!(config.defaults.first_base, 2.0);
/// ```
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let file: ConfigFile = toml::from_str(content).context("TOML parse error")?;

    let mut config = AppConfig::default();

    if let Some(d) = file.defaults {
        if let Some(v) = d.first_base {
            config.defaults.first_base = v;
        }
        if let Some(v) = d.second_base {
            config.defaults.second_base = v;
        }
        if let Some(v) = d.multiplier {
            config.defaults.multiplier = v;
        }
        if let Some(v) = d.first_label {
            config.defaults.first_label = v;
        }
        if let Some(v) = d.second_label {
            config.defaults.second_label = v;
        }
        if let Some(v) = d.title {
            config.defaults.title = v;
        }
    }

    if let Some(s) = file.display {
        if let Some(v) = s.tick_count {
            config.display.tick_count = v;
        }
        if let Some(v) = s.show_ticks {
            config.display.show_ticks = v;
        }
        if let Some(v) = s.first_theme {
            config.display.first_theme = v;
        }
        if let Some(v) = s.second_theme {
            config.display.second_theme = v;
        }
        if let Some(v) = s.show_help_hint {
            config.display.show_help_hint = v;
        }
    }

    config.validate()?;
    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use dnl_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let config =
        parse_config(&content).with_context(|| format!("Invalid config {}", path.display()))?;
    log::info!("Config loaded from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(parse_config("").ok(), Some(AppConfig::default()));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = parse_config(
            "[defaults]\nsecond_label = \"Butter\"\n[display]\nfirst_theme = \"Rose\"\n",
        );
        assert!(config.is_ok());
        let config = config.unwrap_or_default();
        assert_eq!(config.defaults.second_label, "Butter");
        assert_eq!(config.defaults.first_label, "밀가루");
        assert_eq!(config.display.first_theme, Theme::Rose);
        assert_eq!(config.display.second_theme, Theme::Cyan);
    }

    #[test]
    fn tick_count_is_clamped() {
        let high = parse_config("[display]\ntick_count = 99\n").unwrap_or_default();
        assert_eq!(high.display.tick_count, TICK_COUNT_RANGE.1);
        let low = parse_config("[display]\ntick_count = 0\n").unwrap_or_default();
        assert_eq!(low.display.tick_count, TICK_COUNT_RANGE.0);
    }

    #[test]
    fn non_finite_default_is_rejected() {
        let err = parse_config("[defaults]\nmultiplier = inf\n");
        assert!(err.is_err());
        let err = parse_config("[defaults]\nfirst_base = nan\n");
        assert!(err.is_err());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(parse_config("[defaults\nmultiplier = 3").is_err());
        assert!(parse_config("[display]\nfirst_theme = \"Plaid\"\n").is_err());
    }

    #[test]
    fn long_labels_are_truncated() {
        let config =
            parse_config(&format!("[defaults]\nfirst_label = \"{}\"\n", "가".repeat(25)))
                .unwrap_or_default();
        assert_eq!(config.defaults.first_label.chars().count(), LABEL_MAX_CHARS);
    }

    #[test]
    fn truncate_reports_whether_it_cut() {
        let mut short = "설탕".to_string();
        assert!(!truncate_label(&mut short));
        assert_eq!(short, "설탕");

        let mut exact = "x".repeat(LABEL_MAX_CHARS);
        assert!(!truncate_label(&mut exact));

        let mut long = "y".repeat(LABEL_MAX_CHARS + 1);
        assert!(truncate_label(&mut long));
        assert_eq!(long.chars().count(), LABEL_MAX_CHARS);
    }

    #[test]
    fn load_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "[defaults]\nfirst_base = 2.5\ntitle = \"Pancakes\"")?;
        let config = load_config(file.path())?;
        assert_eq!(config.defaults.first_base, 2.5);
        assert_eq!(config.defaults.title, "Pancakes");
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config(Path::new("/definitely/not/here.toml")).is_err());
    }
}
