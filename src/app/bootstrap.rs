use crate::clipboard::{backend_for, ClipboardBackend};
use crate::config::{load_app_config, AppConfig};
use crate::storage::{JsonFileStorage, StorageResult};

use super::actions::PromptSession;

pub(super) struct AppBootstrap {
    pub(super) config: AppConfig,
    pub(super) session: PromptSession<JsonFileStorage>,
    pub(super) clipboard: Box<dyn ClipboardBackend>,
}

/// Loads everything the window needs before GTK starts.
///
/// Storage failures are returned as-is; the caller must not fall back to
/// an empty collection, which would overwrite the user's file on next save.
pub(super) fn bootstrap_app_runtime() -> StorageResult<AppBootstrap> {
    let config = load_app_config();
    tracing::info!(
        clipboard_backend = ?config.clipboard_backend,
        tray_copy_notification = config.tray_copy_notification,
        window_width = config.window_width,
        window_height = config.window_height,
        "loaded app config"
    );

    let storage = JsonFileStorage::with_default_dir()?;
    tracing::info!(path = %storage.data_path().display(), "opening prompt storage");
    let session = PromptSession::open(storage)?;
    tracing::info!(count = session.collection().len(), "loaded prompts");

    let clipboard = backend_for(config.clipboard_backend);
    Ok(AppBootstrap {
        config,
        session,
        clipboard,
    })
}
