use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;

/// Caractère de l'axe horizontal.
const AXIS: char = '─';
/// Caractère d'un tick sur l'axe.
const TICK: char = '┼';

/// Colonnes (relatives à la zone) des `count` ticks, réparties sur `width`.
///
/// Le premier tick est en 0, le dernier en `width - 1`.
///
/// # Example
/// ```
/// use dnl_render::number_line::tick_positions;
/// assert_eq!(tick_positions(9, 3), vec![0, 4, 8]);
/// assert_eq!(tick_positions(10, 1), vec![0]);
/// ```
#[must_use]
pub fn tick_positions(width: u16, count: usize) -> Vec<u16> {
    if width == 0 || count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![0];
    }
    let span = f64::from(width - 1);
    let gaps = (count - 1) as f64;
    (0..count)
        .map(|i| (i as f64 * span / gaps).round() as u16)
        .collect()
}

/// Dessine l'axe et ses ticks sur la première rangée de `area`.
///
/// Écriture directe dans le buffer, pas de widget.
pub fn render_axis(buf: &mut Buffer, area: Rect, positions: &[u16], style: Style) {
    if area.height == 0 {
        return;
    }
    let y = area.y;
    for dx in 0..area.width {
        if let Some(cell) = buf.cell_mut((area.x + dx, y)) {
            cell.set_char(AXIS).set_style(style);
        }
    }
    for &dx in positions.iter().filter(|&&dx| dx < area.width) {
        if let Some(cell) = buf.cell_mut((area.x + dx, y)) {
            cell.set_char(TICK).set_style(style);
        }
    }
}

/// Écrit les libellés centrés sous (ou sur) chaque tick.
///
/// Un libellé qui chevaucherait le précédent est sauté plutôt que tronqué :
/// un nombre coupé serait faux. Retourne le nombre de libellés écrits.
pub fn render_labels(
    buf: &mut Buffer,
    area: Rect,
    positions: &[u16],
    labels: &[String],
    style: Style,
) -> usize {
    if area.height == 0 || area.width == 0 {
        return 0;
    }
    let mut next_free = 0u16;
    let mut written = 0;
    for (&pos, label) in positions.iter().zip(labels) {
        let width = u16::try_from(Span::raw(label.as_str()).width()).unwrap_or(u16::MAX);
        if width > area.width {
            continue;
        }
        let start = pos
            .saturating_sub(width / 2)
            .min(area.width - width);
        if start < next_free {
            continue;
        }
        buf.set_string(area.x + start, area.y, label, style);
        // Une colonne d'espace minimum entre deux libellés.
        next_free = start + width + 1;
        written += 1;
    }
    written
}
