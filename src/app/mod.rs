use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::mpsc;
use std::time::Duration;

use gtk4::prelude::*;
use gtk4::Application;

use crate::error::AppResult;
use crate::notification;
use crate::state::{LifecycleEvent, WindowState};
use crate::storage::{JsonFileStorage, StorageError};
use crate::ui::{StyleTokens, LAYOUT_TOKENS};

mod actions;
mod bootstrap;
mod command_pump;
mod context;
mod dialogs;
mod icon;
mod main_window;
mod prompt_grid;
mod runtime_css;
mod status;
mod tray;

pub use self::actions::{PromptActionError, PromptActionResult, PromptEvent, PromptSession};
pub use self::context::AppContext;
pub use self::icon::FALLBACK_ICON_NAME;

use self::bootstrap::{bootstrap_app_runtime, AppBootstrap};
use self::command_pump::pump_commands;
use self::dialogs::{show_message_then, MessageKind};
use self::icon::{icon_asset_path, install_window_icon, tray_icon};
use self::main_window::{build_main_window, connect_close_to_tray, MainWindowUi, PromptsChanged};
use self::runtime_css::install_runtime_css;
use self::tray::{PromptTray, TrayCommand, TrayController};

const APPLICATION_ID: &str = "io.github.promptmanager.PromptManager";

type SharedContext = Rc<AppContext<JsonFileStorage>>;
type HoldSlot = Rc<RefCell<Option<gtk4::gio::ApplicationHoldGuard>>>;

pub struct App {
    final_state: Rc<Cell<WindowState>>,
}

impl App {
    pub fn new() -> Self {
        Self {
            final_state: Rc::new(Cell::new(WindowState::Starting)),
        }
    }

    pub fn start(&mut self) -> AppResult<()> {
        let bootstrap = match bootstrap_app_runtime() {
            Ok(bootstrap) => bootstrap,
            Err(err) => {
                tracing::error!(%err, "prompt storage could not be opened");
                report_startup_failure(&err);
                return Err(err.into());
            }
        };
        let AppBootstrap {
            config,
            session,
            clipboard,
        } = bootstrap;
        let context: SharedContext = Rc::new(AppContext::new(session, clipboard, config));

        tracing::info!("starting gtk runtime");
        let application = Application::new(
            Some(APPLICATION_ID),
            gtk4::gio::ApplicationFlags::NON_UNIQUE,
        );
        let window_slot = Rc::new(RefCell::new(None::<MainWindowUi>));
        let tray_slot = Rc::new(RefCell::new(None::<Rc<TrayController>>));
        let hold_slot: HoldSlot = Rc::new(RefCell::new(None));

        {
            let context = context.clone();
            let window_slot = window_slot.clone();
            let tray_slot = tray_slot.clone();
            let hold_slot = hold_slot.clone();
            application.connect_activate(move |app| {
                if window_slot.borrow().is_some() {
                    tracing::debug!("ignoring duplicate gtk activate signal");
                    return;
                }
                let (ui, tray) = activate_runtime(app, &context, &hold_slot, LAYOUT_TOKENS);
                window_slot.borrow_mut().replace(ui);
                tray_slot.borrow_mut().replace(tray);
            });
        }

        application.run_with_args(&gtk_launch_args());

        tray_slot.borrow_mut().take();
        window_slot.borrow_mut().take();
        self.final_state.set(context.window_state());
        Ok(())
    }

    pub fn state(&self) -> WindowState {
        self.final_state.get()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn activate_runtime(
    app: &Application,
    context: &SharedContext,
    hold_slot: &HoldSlot,
    tokens: StyleTokens,
) -> (MainWindowUi, Rc<TrayController>) {
    let hold_guard = <gtk4::Application as gtk4::gio::prelude::ApplicationExtManual>::hold(app);
    hold_slot.borrow_mut().replace(hold_guard);

    install_runtime_css(tokens);
    let icon_asset = icon_asset_path();
    install_window_icon(icon_asset.as_deref());

    let (command_tx, command_rx) = mpsc::channel::<TrayCommand>();
    let tray_pixmap = icon_asset.as_deref().and_then(tray_icon);
    let tray = Rc::new(TrayController::spawn(PromptTray::new(
        context.titles(),
        tray_pixmap,
        command_tx,
    )));
    context.set_tray_active(tray.is_active());

    let on_prompts_changed: PromptsChanged = {
        let tray = tray.clone();
        let context = context.clone();
        Rc::new(move || tray.refresh(context.titles()))
    };
    let ui = build_main_window(app, context, tokens, on_prompts_changed);

    let terminate: Rc<dyn Fn()> = {
        let app = app.clone();
        let hold_slot = hold_slot.clone();
        Rc::new(move || {
            hold_slot.borrow_mut().take();
            app.quit();
        })
    };
    {
        let terminate = terminate.clone();
        connect_close_to_tray(&ui, context, move || terminate());
    }

    {
        let context = context.clone();
        let ui = ui.clone();
        pump_commands(
            command_rx,
            Duration::from_millis(u64::from(tokens.command_poll_ms)),
            move |command| handle_tray_command(&context, &ui, terminate.as_ref(), command),
        );
    }

    restore_window(context, &ui);
    tracing::info!(tray = tray.is_active(), "main window ready");
    (ui, tray)
}

fn restore_window(context: &SharedContext, ui: &MainWindowUi) {
    match context.transition(LifecycleEvent::Show) {
        Ok(_) => ui.present(),
        Err(err) => tracing::warn!(%err, "cannot show window"),
    }
}

fn handle_tray_command(
    context: &SharedContext,
    ui: &MainWindowUi,
    terminate: &dyn Fn(),
    command: TrayCommand,
) {
    tracing::debug!(?command, "handling tray command");
    match command {
        TrayCommand::Restore => restore_window(context, ui),
        TrayCommand::CopyPrompt(title) => copy_from_tray(context, ui, &title),
        TrayCommand::Quit => {
            if let Err(err) = context.transition(LifecycleEvent::Terminate) {
                tracing::warn!(%err, "quit requested after termination");
            }
            tracing::info!("quit requested from tray");
            terminate();
        }
    }
}

fn copy_from_tray(context: &SharedContext, ui: &MainWindowUi, title: &str) {
    let outcome = context.copy_prompt(title);
    if let Err(err) = &outcome {
        tracing::warn!(title, %err, "copy from tray failed");
    }
    let feedback = tray_copy_feedback(&outcome, context.config().tray_copy_notification);
    ui.show_status(feedback.status);
    if let Some(summary) = feedback.notification {
        notification::send(summary, feedback.body);
    }
}

#[derive(Debug, PartialEq, Eq)]
struct TrayCopyFeedback {
    status: String,
    body: String,
    notification: Option<&'static str>,
}

/// Failures always notify since the window may be hidden; successes only
/// when `tray_copy_notification` is set.
fn tray_copy_feedback(
    outcome: &PromptActionResult<PromptEvent>,
    notify_success: bool,
) -> TrayCopyFeedback {
    match outcome {
        Ok(event) => {
            let message = event.status_message();
            TrayCopyFeedback {
                status: message.clone(),
                body: message,
                notification: notify_success.then_some("Prompt Copied"),
            }
        }
        Err(err) => TrayCopyFeedback {
            status: err.to_string(),
            body: err.to_string(),
            notification: Some("Copy Failed"),
        },
    }
}

/// Shows a blocking error before the process exits with the load failure.
fn report_startup_failure(err: &StorageError) {
    let title = if err.is_corrupt_data() {
        "Corrupt Prompt File"
    } else {
        "Load Error"
    };
    let body = format!(
        "{err}\n\nThe application will now exit. Your prompt file has not been modified."
    );
    let application = Application::new(
        Some(APPLICATION_ID),
        gtk4::gio::ApplicationFlags::NON_UNIQUE,
    );
    application.connect_activate(move |app| {
        let hold_guard =
            <gtk4::Application as gtk4::gio::prelude::ApplicationExtManual>::hold(app);
        let hold_slot = RefCell::new(Some(hold_guard));
        install_runtime_css(LAYOUT_TOKENS);
        let app = app.clone();
        show_message_then(
            None,
            MessageKind::Error,
            title,
            &body,
            LAYOUT_TOKENS,
            move || {
                hold_slot.borrow_mut().take();
                app.quit();
            },
        );
    });
    application.run_with_args(&gtk_launch_args());
}

// Only argv[0] reaches GTK; the app itself takes no flags.
fn gtk_launch_args() -> Vec<String> {
    std::env::args().take(1).collect()
}
