use dnl_core::config::Theme;
use ratatui::style::{Color, Modifier, Style};

/// Couleurs d'une ligne, dérivées du `Theme` de la config.
///
/// # Example
/// ```
/// use dnl_core::config::Theme;
/// use dnl_render::theme::Palette;
/// let p = Palette::from_theme(Theme::Sky);
/// assert_ne!(p.accent, p.error);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Axe, ticks, bordures.
    pub accent: Color,
    /// Libellés et valeurs.
    pub text: Color,
    /// Champ en erreur + message inline.
    pub error: Color,
    /// Texte secondaire (ticks « portions », aides).
    pub muted: Color,
}

impl Palette {
    #[must_use]
    pub fn from_theme(theme: Theme) -> Self {
        let (accent, text) = match theme {
            Theme::Sky => (Color::LightBlue, Color::Blue),
            Theme::Cyan => (Color::Cyan, Color::LightCyan),
            Theme::Amber => (Color::Yellow, Color::LightYellow),
            Theme::Rose => (Color::LightMagenta, Color::Magenta),
        };
        Self {
            accent,
            text,
            error: Color::LightRed,
            muted: Color::DarkGray,
        }
    }

    /// Style d'un champ de saisie selon focus et validité.
    #[must_use]
    pub fn field_style(&self, focused: bool, valid: bool) -> Style {
        let base = if valid {
            Style::default().fg(self.text)
        } else {
            Style::default().fg(self.error)
        };
        if focused {
            base.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            base.add_modifier(Modifier::BOLD)
        }
    }
}
