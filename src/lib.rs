pub mod app;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod logging;
pub mod notification;
pub mod prompt;
pub mod state;
pub mod storage;
pub mod ui;
pub use error::{AppError, AppResult};

/// Entrypoint used by the `prompt-manager` binary.
pub fn run() -> AppResult<()> {
    logging::init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting Prompt Manager");

    let mut app = app::App::new();
    app.start()?;

    tracing::info!("shutdown complete with state={:?}", app.state());
    Ok(())
}
