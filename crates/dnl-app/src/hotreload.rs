use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use arc_swap::ArcSwap;
use dnl_core::config::AppConfig;
use notify::{Event, EventKind, RecursiveMode, Watcher};

/// Lance un thread qui surveille le fichier config et met à jour l'ArcSwap.
///
/// Retourne le Watcher (doit rester vivant tant que l'app tourne). Le store
/// n'est jamais touché ici : la boucle principale lit la nouvelle config.
///
/// # Errors
/// Returns an error if the watcher cannot be created or the path cannot be watched.
pub fn spawn_config_watcher(
    config_path: &Path,
    config: &Arc<ArcSwap<AppConfig>>,
) -> Result<impl Watcher + use<>> {
    let config = Arc::clone(config);
    let path = config_path.to_path_buf();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        if let Ok(event) = res
            && matches!(event.kind, EventKind::Modify(_))
            && !reload_into(&path, &config)
        {
            log::debug!("Keeping previous config");
        }
    })?;

    watcher.watch(config_path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

/// Recharge `path` dans `config`. Une config invalide est ignorée, l'ancienne reste.
#[must_use]
pub fn reload_into(path: &Path, config: &ArcSwap<AppConfig>) -> bool {
    match dnl_core::config::load_config(path) {
        Ok(new_config) => {
            config.store(Arc::new(new_config));
            log::info!("Config reloaded from {}", path.display());
            true
        }
        Err(e) => {
            log::warn!("Config reload failed: {e:#}");
            false
        }
    }
}
