use std::path::PathBuf;

use clap::Parser;
use dnl_core::store::{FieldEdit, LineId};

/// ratioline — double number line for recipe scaling.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Quantité par portion du premier ingrédient (texte brut, validé comme une saisie).
    #[arg(long, allow_hyphen_values = true)]
    pub first: Option<String>,

    /// Quantité par portion du second ingrédient.
    #[arg(long, allow_hyphen_values = true)]
    pub second: Option<String>,

    /// Nombre de portions, partagé par les deux lignes.
    #[arg(long, allow_hyphen_values = true)]
    pub multiplier: Option<String>,

    /// Afficher un rapport texte sur stdout et quitter, sans TUI.
    #[arg(long, default_value_t = false)]
    pub print: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Saisies initiales à rejouer dans le store, dans l'ordre des champs.
    #[must_use]
    pub fn initial_edits(&self) -> Vec<FieldEdit> {
        let mut edits = Vec::new();
        if let Some(ref raw) = self.first {
            edits.push(FieldEdit::Base(LineId::First, raw.clone()));
        }
        if let Some(ref raw) = self.multiplier {
            edits.push(FieldEdit::Multiplier(raw.clone()));
        }
        if let Some(ref raw) = self.second {
            edits.push(FieldEdit::Base(LineId::Second, raw.clone()));
        }
        edits
    }
}
