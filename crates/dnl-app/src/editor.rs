/// Opération d'édition sur le champ focalisé.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditKey {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Vide le champ (Ctrl+U).
    Clear,
}

/// Curseur d'édition, en caractères (pas en octets).
///
/// Le texte lui-même vit dans le store ; l'éditeur ne garde que la position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineEditor {
    cursor: usize,
}

impl LineEditor {
    /// Place le curseur en fin de `text`.
    #[must_use]
    pub fn at_end(text: &str) -> Self {
        Self {
            cursor: text.chars().count(),
        }
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Applique `key` à `text`. Retourne le nouveau texte s'il a changé.
    ///
    /// Les déplacements seuls retournent `None`.
    pub fn apply(&mut self, text: &str, key: EditKey) -> Option<String> {
        let mut chars: Vec<char> = text.chars().collect();
        self.cursor = self.cursor.min(chars.len());

        match key {
            EditKey::Insert(ch) => {
                chars.insert(self.cursor, ch);
                self.cursor += 1;
            }
            EditKey::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                chars.remove(self.cursor - 1);
                self.cursor -= 1;
            }
            EditKey::Delete => {
                if self.cursor >= chars.len() {
                    return None;
                }
                chars.remove(self.cursor);
            }
            EditKey::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                return None;
            }
            EditKey::Right => {
                self.cursor = (self.cursor + 1).min(chars.len());
                return None;
            }
            EditKey::Home => {
                self.cursor = 0;
                return None;
            }
            EditKey::End => {
                self.cursor = chars.len();
                return None;
            }
            EditKey::Clear => {
                if chars.is_empty() {
                    return None;
                }
                chars.clear();
                self.cursor = 0;
            }
        }
        Some(chars.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_at_cursor() {
        let mut ed = LineEditor::at_end("25");
        assert_eq!(ed.apply("25", EditKey::Left), None);
        assert_eq!(ed.apply("25", EditKey::Insert('.')).as_deref(), Some("2.5"));
        assert_eq!(ed.cursor(), 2);
    }

    #[test]
    fn backspace_and_delete_bounds() {
        let mut ed = LineEditor::default();
        assert_eq!(ed.apply("abc", EditKey::Backspace), None);
        assert_eq!(ed.apply("abc", EditKey::Delete).as_deref(), Some("bc"));
        let mut ed = LineEditor::at_end("bc");
        assert_eq!(ed.apply("bc", EditKey::Delete), None);
        assert_eq!(ed.apply("bc", EditKey::Backspace).as_deref(), Some("b"));
    }

    #[test]
    fn multibyte_text_is_edited_per_char() {
        let mut ed = LineEditor::at_end("설탕");
        assert_eq!(ed.cursor(), 2);
        assert_eq!(ed.apply("설탕", EditKey::Backspace).as_deref(), Some("설"));
        assert_eq!(ed.apply("설", EditKey::Insert('탕')).as_deref(), Some("설탕"));
    }

    #[test]
    fn cursor_is_clamped_when_text_shrinks_elsewhere() {
        let mut ed = LineEditor::at_end("12345");
        assert_eq!(ed.apply("1", EditKey::Insert('0')).as_deref(), Some("10"));
        assert_eq!(ed.cursor(), 2);
    }

    #[test]
    fn home_end_clear() {
        let mut ed = LineEditor::at_end("42");
        ed.apply("42", EditKey::Home);
        assert_eq!(ed.cursor(), 0);
        ed.apply("42", EditKey::End);
        assert_eq!(ed.cursor(), 2);
        assert_eq!(ed.apply("42", EditKey::Clear).as_deref(), Some(""));
        assert_eq!(ed.apply("", EditKey::Clear), None);
    }
}
