use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use arc_swap::ArcSwap;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dnl_core::config::{AppConfig, LABEL_MAX_CHARS};
use dnl_core::store::{FieldEdit, ValueStore};
use dnl_render::ui::{DrawContext, RenderState};
use dnl_render::widgets::Focus;
use ratatui::DefaultTerminal;

use crate::editor::{EditKey, LineEditor};

/// Délai max entre deux vérifications de config rechargée.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Application state.
///
/// # Example
/// ```ignore
/// let state = AppState::Editing;
/// assert!(matches!(state, AppState::Editing));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppState {
    /// Saisie normale.
    Editing,
    /// Overlay d'aide affiché (F1).
    Help,
    /// Fermeture de l'application. doit se terminer au prochain tour de boucle.
    Quitting,
}

/// Main application struct holding all state.
pub struct App {
    /// Current application state.
    pub state: AppState,
    /// Config courante (rechargée à chaud par le watcher).
    pub config: Arc<ArcSwap<AppConfig>>,
    /// Source de vérité des champs.
    pub store: ValueStore,
    /// Champ focalisé.
    pub focus: Focus,
    /// Curseur dans le champ focalisé.
    pub editor: LineEditor,
    /// Redessin nécessaire au prochain tour.
    pub dirty: bool,
}

impl App {
    /// Create a new App instance.
    #[must_use]
    pub fn new(config: Arc<ArcSwap<AppConfig>>, store: ValueStore) -> Self {
        let focus = Focus::default();
        let mut app = Self {
            state: AppState::Editing,
            config,
            store,
            focus,
            editor: LineEditor::default(),
            dirty: true,
        };
        app.set_focus(focus);
        app
    }

    /// Main event loop.
    ///
    /// # Errors
    /// Returns an error if terminal operations fail.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut seen_config = self.config.load_full();

        loop {
            // === Sortie si quitting ===
            if self.state == AppState::Quitting {
                break;
            }

            // === Config rechargée par le watcher ? ===
            let current = self.config.load_full();
            if !Arc::ptr_eq(&current, &seen_config) {
                seen_config = current;
                self.dirty = true;
            }

            if self.dirty {
                let render_state = self.render_state();
                let display = &seen_config.display;
                let ctx = DrawContext {
                    store: &self.store,
                    display,
                    focus: self.focus,
                    cursor: self.editor.cursor(),
                    state: &render_state,
                };
                terminal.draw(|frame| dnl_render::ui::draw(frame, &ctx))?;
                self.dirty = false;
            }

            if event::poll(POLL_INTERVAL)? {
                self.handle_event(&event::read()?);
            }
        }

        Ok(())
    }

    /// Convert `AppState` to `RenderState` for the UI.
    fn render_state(&self) -> RenderState {
        match self.state {
            AppState::Editing => RenderState::Editing,
            AppState::Help => RenderState::Help,
            AppState::Quitting => RenderState::Quitting,
        }
    }

    /// Handle a terminal event by dispatching to focused sub-handlers.
    pub fn handle_event(&mut self, event: &Event) {
        match *event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                self.handle_key(code, modifiers);
                self.dirty = true;
            }
            Event::Resize(..) => self.dirty = true,
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match code {
                KeyCode::Char('c') => self.state = AppState::Quitting,
                KeyCode::Char('r') => self.reset(),
                KeyCode::Char('u') => self.edit_focused(EditKey::Clear),
                _ => {}
            }
            return;
        }

        if self.state == AppState::Help {
            if matches!(code, KeyCode::Esc | KeyCode::F(1)) {
                self.state = AppState::Editing;
            }
            return;
        }

        match code {
            KeyCode::Esc => self.state = AppState::Quitting,
            KeyCode::F(1) => self.state = AppState::Help,
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => self.set_focus(self.focus.next()),
            KeyCode::BackTab | KeyCode::Up => self.set_focus(self.focus.prev()),
            KeyCode::Left => self.edit_focused(EditKey::Left),
            KeyCode::Right => self.edit_focused(EditKey::Right),
            KeyCode::Home => self.edit_focused(EditKey::Home),
            KeyCode::End => self.edit_focused(EditKey::End),
            KeyCode::Backspace => self.edit_focused(EditKey::Backspace),
            KeyCode::Delete => self.edit_focused(EditKey::Delete),
            KeyCode::Char(ch) => self.edit_focused(EditKey::Insert(ch)),
            _ => {}
        }
    }

    /// Texte courant du champ focalisé, tel qu'affiché.
    fn focused_text(&self) -> &str {
        match self.focus {
            Focus::Title => self.store.title(),
            Focus::Label(line) => &self.store.line(line).label,
            Focus::Base(line) => self.store.line(line).base.raw(),
            Focus::Multiplier(_) => self.store.multiplier().raw(),
        }
    }

    /// Applique une touche d'édition et pousse le nouveau texte dans le store.
    fn edit_focused(&mut self, key: EditKey) {
        let current = self.focused_text().to_string();
        // Libellé plein : la frappe est refusée, rien n'est coupé en fin de texte.
        if matches!(self.focus, Focus::Label(_))
            && matches!(key, EditKey::Insert(_))
            && current.chars().count() >= LABEL_MAX_CHARS
        {
            return;
        }
        let Some(text) = self.editor.apply(&current, key) else {
            return;
        };
        let edit = match self.focus {
            Focus::Title => FieldEdit::Title(text),
            Focus::Label(line) => FieldEdit::Label(line, text),
            Focus::Base(line) => FieldEdit::Base(line, text),
            Focus::Multiplier(_) => FieldEdit::Multiplier(text),
        };
        if let Some(commit) = self.store.apply(edit) {
            log::debug!("Committed {commit:?}");
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.editor = LineEditor::at_end(self.focused_text());
    }

    /// Reset all fields to the (possibly reloaded) config defaults.
    fn reset(&mut self) {
        let config = self.config.load();
        self.store.reset_with(&config.defaults);
        self.set_focus(self.focus);
        log::info!("Fields reset to defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnl_core::format::DisplayValue;
    use dnl_core::store::LineId;

    fn app() -> App {
        App::new(
            Arc::new(ArcSwap::from_pointee(AppConfig::default())),
            ValueStore::default(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn ctrl(app: &mut App, ch: char) {
        app.handle_event(&Event::Key(KeyEvent::new(
            KeyCode::Char(ch),
            KeyModifiers::CONTROL,
        )));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn typing_in_base_field_updates_derived() {
        let mut app = app();
        assert_eq!(app.focus, Focus::Base(LineId::First));
        type_text(&mut app, ".5");
        assert_eq!(app.store.line(LineId::First).base.raw(), "2.5");
        assert_eq!(app.store.derived(LineId::First), DisplayValue::Number(7.5));
    }

    #[test]
    fn multiplier_edit_from_second_line_reaches_both() {
        let mut app = app();
        app.set_focus(Focus::Multiplier(LineId::Second));
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "x");
        assert!(app.store.derived(LineId::First).is_unknown());
        assert!(app.store.derived(LineId::Second).is_unknown());

        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "4");
        assert_eq!(app.store.derived(LineId::First), DisplayValue::Number(8.0));
        assert_eq!(app.store.derived(LineId::Second), DisplayValue::Number(20.0));
    }

    #[test]
    fn tab_moves_focus_and_cursor_to_end() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Multiplier(LineId::First));
        assert_eq!(app.editor.cursor(), 1);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Focus::Label(LineId::First));
        assert_eq!(app.editor.cursor(), "밀가루".chars().count());
    }

    #[test]
    fn label_edit_does_not_touch_numbers() {
        let mut app = app();
        app.set_focus(Focus::Label(LineId::Second));
        ctrl(&mut app, 'u');
        type_text(&mut app, "Sugar");
        assert_eq!(app.store.line(LineId::Second).label, "Sugar");
        assert_eq!(app.store.derived(LineId::Second), DisplayValue::Number(15.0));
    }

    #[test]
    fn full_label_rejects_insert_without_losing_text() {
        let mut app = app();
        app.set_focus(Focus::Label(LineId::First));
        ctrl(&mut app, 'u');
        type_text(&mut app, "abcdefghijklmnopqrst");
        assert_eq!(app.store.line(LineId::First).label.chars().count(), LABEL_MAX_CHARS);

        press(&mut app, KeyCode::Home);
        type_text(&mut app, "Z");
        assert_eq!(app.store.line(LineId::First).label, "abcdefghijklmnopqrst");
        assert_eq!(app.editor.cursor(), 0);

        press(&mut app, KeyCode::End);
        type_text(&mut app, "u");
        assert_eq!(app.store.line(LineId::First).label, "abcdefghijklmnopqrst");

        // Après suppression, la saisie reprend.
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "Z");
        assert_eq!(app.store.line(LineId::First).label, "abcdefghijklmnopqrsZ");
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.state, AppState::Help);
        type_text(&mut app, "9");
        assert_eq!(app.store.line(LineId::First).base.raw(), "2");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Editing);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Quitting);
    }

    #[test]
    fn ctrl_r_resets_from_current_config() {
        let mut app = app();
        type_text(&mut app, "abc");
        let mut reloaded = AppConfig::default();
        reloaded.defaults.first_base = 4.0;
        app.config.store(Arc::new(reloaded));
        ctrl(&mut app, 'r');
        assert_eq!(app.store.line(LineId::First).base.raw(), "4");
        assert_eq!(app.store.derived(LineId::First), DisplayValue::Number(12.0));
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = app();
        ctrl(&mut app, 'c');
        assert_eq!(app.state, AppState::Quitting);
    }
}
