use dnl_core::config::DisplayConfig;
use dnl_core::format::tick_labels;
use dnl_core::store::{LineId, ValueStore};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::number_line;
use crate::theme::Palette;
use crate::widgets::Focus;

/// Hauteur d'un panneau de ligne, bordures comprises.
pub const LINE_PANEL_HEIGHT: u16 = 8;
/// Hauteur de l'en-tête (titre + sous-titre).
pub const HEADER_HEIGHT: u16 = 3;

const TITLE_PLACEHOLDER: &str = "Enter a recipe name";
const LABEL_PLACEHOLDER: &str = "e.g. flour";
const SUBTITLE: &str = "Fill in the double number line and watch the ratio hold.";

/// Application state enum (mirrored for rendering decisions).
///
/// # Example
/// ```
/// use dnl_render::ui::RenderState;
/// let state = RenderState::Editing;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderState {
    /// Normal editing.
    Editing,
    /// Help overlay visible.
    Help,
    /// Quitting (should not reach draw).
    Quitting,
}

/// Tout ce dont `draw` a besoin pour une frame.
pub struct DrawContext<'a> {
    pub store: &'a ValueStore,
    pub display: &'a DisplayConfig,
    pub focus: Focus,
    /// Position du curseur (en caractères) dans le champ focalisé.
    pub cursor: usize,
    pub state: &'a RenderState,
}

/// Draw the full UI: header, both line panels, footer, help overlay.
pub fn draw(frame: &mut Frame, ctx: &DrawContext<'_>) {
    let area = frame.area();

    let [header, first, second, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(LINE_PANEL_HEIGHT),
        Constraint::Length(LINE_PANEL_HEIGHT),
        Constraint::Length(1),
    ])
    .areas(area);

    let mut cursor = None;
    draw_header(frame, header, ctx, &mut cursor);
    for (line, panel) in [(LineId::First, first), (LineId::Second, second)] {
        draw_line_panel(frame, panel, ctx, line, &mut cursor);
    }
    draw_footer(frame, footer, ctx.display);

    if *ctx.state == RenderState::Help {
        draw_help_overlay(frame, area);
    } else if let Some(pos) = cursor {
        frame.set_cursor_position(pos);
    }
}

/// Palette de la ligne selon la config.
fn palette_for(display: &DisplayConfig, line: LineId) -> Palette {
    match line {
        LineId::First => Palette::from_theme(display.first_theme),
        LineId::Second => Palette::from_theme(display.second_theme),
    }
}

/// Construit une rangée de spans en suivant la largeur, pour placer le curseur.
struct RowBuilder<'a> {
    spans: Vec<Span<'a>>,
    width: u16,
}

impl<'a> RowBuilder<'a> {
    fn new() -> Self {
        Self {
            spans: Vec::new(),
            width: 0,
        }
    }

    fn text(&mut self, text: impl Into<String>, style: Style) -> &mut Self {
        let span = Span::styled(text.into(), style);
        self.width = self.width.saturating_add(span_width(&span));
        self.spans.push(span);
        self
    }

    /// Ajoute un champ `[ texte ]`. Retourne la colonne du curseur si `cursor` est donné.
    fn field(
        &mut self,
        raw: &str,
        placeholder: &str,
        style: Style,
        cursor: Option<usize>,
    ) -> Option<u16> {
        self.text(" ", style);
        let start = self.width;
        if raw.is_empty() && cursor.is_none() {
            self.text(placeholder, style.add_modifier(Modifier::DIM));
        } else {
            self.text(raw, style);
        }
        self.text(" ", style);
        cursor.map(|c| {
            let prefix: String = raw.chars().take(c).collect();
            start.saturating_add(span_width(&Span::raw(prefix)))
        })
    }

    fn into_line(self) -> Line<'a> {
        Line::from(self.spans)
    }
}

fn span_width(span: &Span<'_>) -> u16 {
    u16::try_from(span.width()).unwrap_or(u16::MAX)
}

/// Curseur du champ `field` si c'est lui qui a le focus.
fn cursor_for(ctx: &DrawContext<'_>, field: Focus) -> Option<usize> {
    (ctx.focus == field).then_some(ctx.cursor)
}

fn draw_header(
    frame: &mut Frame,
    area: Rect,
    ctx: &DrawContext<'_>,
    cursor: &mut Option<Position>,
) {
    let focused = ctx.focus == Focus::Title;
    let style = Style::default()
        .fg(Color::White)
        .add_modifier(if focused {
            Modifier::BOLD | Modifier::REVERSED
        } else {
            Modifier::BOLD
        });

    let mut row = RowBuilder::new();
    let col = row.field(
        ctx.store.title(),
        TITLE_PLACEHOLDER,
        style,
        cursor_for(ctx, Focus::Title),
    );
    let row_width = row.width;
    let x0 = area.x + area.width.saturating_sub(row_width) / 2;
    if let Some(dx) = col {
        *cursor = Some(Position::new(x0 + dx, area.y));
    }

    let lines = vec![
        row.into_line().centered(),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::Gray))).centered(),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

#[allow(clippy::too_many_lines)]
fn draw_line_panel(
    frame: &mut Frame,
    area: Rect,
    ctx: &DrawContext<'_>,
    line: LineId,
    cursor: &mut Option<Position>,
) {
    let palette = palette_for(ctx.display, line);
    let store = ctx.store;
    let state = store.line(line);
    let multiplier = store.multiplier();

    let title = match line {
        LineId::First => " First ingredient ",
        LineId::Second => " Second ingredient ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        log::trace!("{line:?} panel too small: {area:?}");
        return;
    }

    let [label_row, serving_row, axis_row, amount_row, field_row, error_row] =
        Layout::vertical([Constraint::Length(1); 6]).areas(inner);

    // === Nom de l'ingrédient ===
    let mut row = RowBuilder::new();
    row.text("Ingredient:", Style::default().fg(palette.text).add_modifier(Modifier::BOLD));
    let label_field = Focus::Label(line);
    let col = row.field(
        &state.label,
        LABEL_PLACEHOLDER,
        palette.field_style(ctx.focus == label_field, true),
        cursor_for(ctx, label_field),
    );
    if let Some(dx) = col {
        *cursor = Some(Position::new(label_row.x + dx, label_row.y));
    }
    frame.render_widget(Paragraph::new(row.into_line()), label_row);

    // === Double number line : portions au-dessus, quantités en dessous ===
    if ctx.display.show_ticks {
        let count = ctx.display.tick_count;
        let positions = number_line::tick_positions(axis_row.width, count);
        let buf = frame.buffer_mut();
        number_line::render_labels(
            buf,
            serving_row,
            &positions,
            &tick_labels(0.0, 1.0, count),
            Style::default().fg(palette.muted),
        );
        number_line::render_axis(buf, axis_row, &positions, Style::default().fg(palette.accent));
        number_line::render_labels(
            buf,
            amount_row,
            &positions,
            &store.amount_ticks(line, count),
            Style::default().fg(palette.text),
        );
    }

    // === Champs : quantité unitaire, portions (partagé), total ===
    let label_style = Style::default().fg(palette.text);
    let base_field = Focus::Base(line);
    let mult_field = Focus::Multiplier(line);
    let mut row = RowBuilder::new();
    row.text("Per serving", label_style);
    let base_col = row.field(
        state.base.raw(),
        "",
        palette.field_style(ctx.focus == base_field, state.base.is_valid()),
        cursor_for(ctx, base_field),
    );
    row.text("  × servings", label_style);
    let mult_col = row.field(
        multiplier.raw(),
        "",
        palette.field_style(ctx.focus == mult_field, multiplier.is_valid()),
        cursor_for(ctx, mult_field),
    );
    row.text("  = total ", label_style);
    let derived = store.derived(line);
    let total_style = if derived.is_unknown() {
        Style::default().fg(palette.error).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Black)
            .bg(palette.accent)
            .add_modifier(Modifier::BOLD)
    };
    row.text(format!(" {derived} "), total_style);
    if let Some(dx) = base_col.or(mult_col) {
        *cursor = Some(Position::new(field_row.x + dx, field_row.y));
    }
    frame.render_widget(Paragraph::new(row.into_line()), field_row);

    // === Erreurs inline, par champ ===
    let mut errors = Vec::new();
    if let Some(msg) = state.base.error_message() {
        errors.push(format!("per serving: {msg}"));
    }
    if let Some(msg) = multiplier.error_message() {
        errors.push(format!("servings: {msg}"));
    }
    if !errors.is_empty() {
        let text = Line::from(Span::styled(
            errors.join("   "),
            Style::default().fg(palette.error),
        ));
        frame.render_widget(Paragraph::new(text), error_row);
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, display: &DisplayConfig) {
    let mut hint = String::from(" Tab/↑↓ field · Ctrl+R reset · Esc quit");
    if display.show_help_hint {
        hint.push_str(" · F1 help");
    }
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))),
        area,
    );
}

/// Draw a help overlay with all keybindings.
fn draw_help_overlay(frame: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from(Span::styled(" ratioline — Controls ", Style::default().fg(Color::Yellow))),
        Line::from(""),
        Line::from(" Tab/↓       Next field"),
        Line::from(" Shift-Tab/↑ Previous field"),
        Line::from(" ←/→         Move cursor"),
        Line::from(" Home/End    Start/end of field"),
        Line::from(" Backspace   Delete before cursor"),
        Line::from(" Delete      Delete under cursor"),
        Line::from(" Ctrl+U      Clear field"),
        Line::from(" Ctrl+R      Reset all fields"),
        Line::from(" F1          Toggle help"),
        Line::from(" Esc/Ctrl+C  Quit"),
        Line::from(""),
        Line::from(Span::styled(
            " Press F1 or Esc to close ",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help_width = 36u16.min(area.width);
    let help_height = (help_text.len() as u16 + 2).min(area.height);
    let x = area.x + area.width.saturating_sub(help_width) / 2;
    let y = area.y + area.height.saturating_sub(help_height) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(Style::default().bg(Color::Black).fg(Color::White)),
    );

    frame.render_widget(Clear, help_area);
    frame.render_widget(help, help_area);
}
