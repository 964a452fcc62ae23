use std::sync::Arc;

use anyhow::Result;
use arc_swap::ArcSwap;
use clap::Parser;
use dnl_core::config::AppConfig;
use dnl_core::store::{FieldEdit, ValueStore};

pub mod app;
pub mod cli;
pub mod editor;
pub mod hotreload;
pub mod report;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();
    log::info!("ratioline {} starting", env!("CARGO_PKG_VERSION"));

    // 3. Charger la config
    let config = resolve_config(&cli)?;

    // 4. Construire le store et rejouer les saisies CLI
    let mut store = ValueStore::new(&config.defaults);
    for edit in cli.initial_edits() {
        apply_cli_edit(&mut store, edit);
    }

    // Rapport headless
    if cli.print {
        print!("{}", report::render_report(&store, &config.display));
        return Ok(());
    }

    let config = Arc::new(ArcSwap::from_pointee(config));

    // 5. Lancer le hot-reload config (seulement si le fichier existe)
    let _watcher = if cli.config.exists() {
        Some(hotreload::spawn_config_watcher(&cli.config, &config)?)
    } else {
        None
    };

    // 6. Initialiser le terminal ratatui
    let terminal = ratatui::init();

    // 7. Boucle principale
    let mut app_instance = app::App::new(config, store);
    let result = app_instance.run(terminal);

    // 8. Restaurer le terminal (TOUJOURS, même en cas d'erreur)
    ratatui::restore();

    result
}

/// Rejoue une saisie CLI comme une frappe ; un texte invalide reste affiché en erreur.
fn apply_cli_edit(store: &mut ValueStore, edit: FieldEdit) {
    let raw = match edit {
        FieldEdit::Base(_, ref raw) | FieldEdit::Multiplier(ref raw) => Some(raw.clone()),
        FieldEdit::Label(..) | FieldEdit::Title(_) => None,
    };
    if store.apply(edit).is_none()
        && let Some(raw) = raw
    {
        log::warn!("Valeur CLI invalide '{raw}', l'erreur sera affichée.");
    }
}

/// Resolve config: --config if present, defaults otherwise.
fn resolve_config(cli: &cli::Cli) -> Result<AppConfig> {
    if cli.config.exists() {
        dnl_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(AppConfig::default())
    }
}
