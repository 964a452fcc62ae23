use dnl_core::config::DisplayConfig;
use dnl_core::format::tick_labels;
use dnl_core::store::{LineId, ValueStore};

/// Rapport texte des deux lignes, pour `--print`.
///
/// Même contenu que la TUI : titre, nom, ticks, calcul et erreurs inline.
#[must_use]
pub fn render_report(store: &ValueStore, display: &DisplayConfig) -> String {
    let mut out = format!("{}\n", store.title());

    let multiplier = store.multiplier();
    for line in LineId::ALL {
        let state = store.line(line);
        out.push_str(&format!("\n[{line:?}] {}\n", state.label));

        if display.show_ticks {
            let count = display.tick_count;
            let servings = tick_labels(0.0, 1.0, count).join(" | ");
            let amounts = store.amount_ticks(line, count).join(" | ");
            out.push_str(&format!("  servings: {servings}\n"));
            out.push_str(&format!("  amount:   {amounts}\n"));
        }

        out.push_str(&format!(
            "  {} x {} = {}\n",
            state.base.raw().trim(),
            multiplier.raw().trim(),
            store.derived(line)
        ));

        if let Some(msg) = state.base.error_message() {
            out.push_str(&format!("  error (per serving): {msg}\n"));
        }
        if let Some(msg) = multiplier.error_message() {
            out.push_str(&format!("  error (servings): {msg}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnl_core::store::FieldEdit;

    #[test]
    fn default_report() {
        let report = render_report(&ValueStore::default(), &DisplayConfig::default());
        assert!(report.starts_with("맛있는 쿠키 만들기\n"));
        assert!(report.contains("[First] 밀가루"));
        assert!(report.contains("  servings: 0 | 1 | 2 | 3 | 4"));
        assert!(report.contains("  amount:   0 | 2 | 4 | 6 | 8"));
        assert!(report.contains("  2 x 3 = 6"));
        assert!(report.contains("  5 x 3 = 15"));
        assert!(!report.contains("error"));
    }

    #[test]
    fn invalid_multiplier_reports_on_both_lines() {
        let mut store = ValueStore::default();
        store.apply(FieldEdit::Multiplier("x".into()));
        let report = render_report(&store, &DisplayConfig::default());
        assert!(report.contains("  2 x x = ?"));
        assert!(report.contains("  5 x x = ?"));
        assert_eq!(report.matches("error (servings): Please enter a number!").count(), 2);
    }

    #[test]
    fn invalid_base_reports_only_on_its_line() {
        let mut store = ValueStore::default();
        store.apply(FieldEdit::Base(LineId::Second, "abc".into()));
        let report = render_report(&store, &DisplayConfig::default());
        assert!(report.contains("  2 x 3 = 6\n"));
        assert!(report.contains("  abc x 3 = ?\n  error (per serving): Please enter a number!\n"));
        assert_eq!(report.matches("error").count(), 1);
        assert!(report.ends_with("Please enter a number!\n"));
    }

    #[test]
    fn ticks_can_be_hidden() {
        let display = DisplayConfig {
            show_ticks: false,
            ..DisplayConfig::default()
        };
        let report = render_report(&ValueStore::default(), &display);
        assert!(!report.contains("servings:"));
    }
}
