use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{
    Align, Application, ApplicationWindow, Box as GtkBox, Button, Entry, Label, Orientation,
    Paned, PolicyType, ScrolledWindow, TextView, Window, WrapMode,
};

use crate::prompt::{normalize_title, Prompt};
use crate::state::LifecycleEvent;
use crate::ui::{section_label, PromptActivation, StyleTokens};

use super::actions::{PromptActionError, PromptEvent};
use super::dialogs::{confirm, delete_confirmation_body, show_message, MessageKind};
use super::prompt_grid::PromptGrid;
use super::status::StatusLine;
use super::SharedContext;

const WINDOW_TITLE: &str = "Prompt Manager";
const IDLE_STATUS: &str = "Ready. Load or create a prompt.";

/// Callback run after every successful mutation so other views can resync.
pub(super) type PromptsChanged = Rc<dyn Fn()>;

#[derive(Clone)]
struct PromptInputs {
    title_entry: Entry,
    content_view: TextView,
}

impl PromptInputs {
    fn title(&self) -> String {
        self.title_entry.text().to_string()
    }

    fn content(&self) -> String {
        let buffer = self.content_view.buffer();
        let (start, end) = buffer.bounds();
        buffer.text(&start, &end, false).to_string()
    }

    fn load(&self, prompt: &Prompt) {
        self.title_entry.set_text(&prompt.title);
        self.content_view.buffer().set_text(&prompt.content);
    }

    fn clear(&self) {
        self.title_entry.set_text("");
        self.content_view.buffer().set_text("");
    }
}

#[derive(Clone)]
pub(super) struct MainWindowUi {
    window: ApplicationWindow,
    inputs: PromptInputs,
    save_button: Button,
    delete_button: Button,
    grid: PromptGrid,
    status: StatusLine,
    status_duration_ms: u32,
    tokens: StyleTokens,
}

impl MainWindowUi {
    fn parent(&self) -> &Window {
        self.window.upcast_ref::<Window>()
    }

    pub(super) fn present(&self) {
        self.window.set_visible(true);
        self.window.present();
    }

    pub(super) fn hide(&self) {
        self.window.set_visible(false);
    }

    pub(super) fn show_status(&self, message: impl Into<String>) {
        self.status.show(message, self.status_duration_ms);
    }

    pub(super) fn refresh_prompts(&self, prompts: &[Prompt]) {
        self.grid.rebuild(prompts);
    }

    fn warn(&self, title: &str, err: &PromptActionError) {
        show_message(
            Some(self.parent()),
            MessageKind::Warning,
            title,
            &err.to_string(),
            self.tokens,
        );
    }

    fn report_failure(&self, title: &str, err: &PromptActionError) {
        let kind = if err.is_data_loss_risk() {
            MessageKind::Error
        } else {
            MessageKind::Warning
        };
        show_message(Some(self.parent()), kind, title, &err.to_string(), self.tokens);
    }
}

pub(super) fn build_main_window(
    app: &Application,
    context: &SharedContext,
    tokens: StyleTokens,
    on_prompts_changed: PromptsChanged,
) -> MainWindowUi {
    let config = context.config();
    let window = ApplicationWindow::new(app);
    window.add_css_class("prompt-manager-root");
    window.set_title(Some(WINDOW_TITLE));
    window.set_default_size(config.window_width, config.window_height);
    window.set_size_request(tokens.window_min_width, tokens.window_min_height);

    let title_entry = Entry::new();
    title_entry.set_placeholder_text(Some("Prompt title"));
    let content_view = TextView::new();
    content_view.set_wrap_mode(WrapMode::WordChar);
    content_view.set_top_margin(tokens.spacing_4);
    content_view.set_left_margin(tokens.spacing_4);
    let content_scroller = ScrolledWindow::new();
    content_scroller.set_policy(PolicyType::Never, PolicyType::Automatic);
    content_scroller.set_min_content_height(tokens.content_min_height);
    content_scroller.set_vexpand(true);
    content_scroller.add_css_class("prompt-content");
    content_scroller.set_child(Some(&content_view));

    let save_button = Button::with_label("Save Prompt");
    save_button.add_css_class("suggested-action");
    save_button.set_hexpand(true);
    let delete_button = Button::with_label("Delete Prompt");
    delete_button.add_css_class("destructive-action");
    delete_button.set_hexpand(true);
    let action_row = GtkBox::new(Orientation::Horizontal, tokens.spacing_8);
    action_row.append(&save_button);
    action_row.append(&delete_button);

    let editor_panel = GtkBox::new(Orientation::Vertical, tokens.spacing_8);
    editor_panel.set_margin_top(tokens.spacing_12);
    editor_panel.set_margin_bottom(tokens.spacing_12);
    editor_panel.set_margin_start(tokens.spacing_12);
    editor_panel.set_margin_end(tokens.spacing_8);
    editor_panel.append(&section_label("Prompt Title:"));
    editor_panel.append(&title_entry);
    editor_panel.append(&section_label("Prompt Content:"));
    editor_panel.append(&content_scroller);
    editor_panel.append(&action_row);

    let status_label = Label::new(None);
    status_label.add_css_class("status-line");
    status_label.set_halign(Align::Start);
    status_label.set_xalign(0.0);
    status_label.set_ellipsize(gtk4::pango::EllipsizeMode::End);
    status_label.set_margin_start(tokens.spacing_12);
    status_label.set_margin_end(tokens.spacing_12);
    status_label.set_margin_bottom(tokens.spacing_8);
    let status = StatusLine::new(&status_label, IDLE_STATUS);

    let inputs = PromptInputs {
        title_entry,
        content_view,
    };

    let on_activate: PromptActivation = {
        let context = context.clone();
        let inputs = inputs.clone();
        let status = status.clone();
        let window = window.clone();
        let status_duration_ms = config.status_duration_ms;
        Rc::new(move |title: &str| {
            select_and_copy(
                &context,
                &inputs,
                &status,
                window.upcast_ref::<Window>(),
                tokens,
                status_duration_ms,
                title,
            );
        })
    };
    let grid = PromptGrid::new(tokens, on_activate);

    let list_panel = GtkBox::new(Orientation::Vertical, tokens.spacing_8);
    list_panel.set_margin_top(tokens.spacing_12);
    list_panel.set_margin_bottom(tokens.spacing_12);
    list_panel.set_margin_start(tokens.spacing_8);
    list_panel.set_margin_end(tokens.spacing_12);
    list_panel.append(&section_label("Saved Prompts:"));
    list_panel.append(grid.widget());

    let paned = Paned::new(Orientation::Horizontal);
    paned.set_start_child(Some(&editor_panel));
    paned.set_end_child(Some(&list_panel));
    paned.set_resize_start_child(false);
    paned.set_shrink_start_child(false);
    paned.set_shrink_end_child(false);
    paned.set_position(tokens.editor_panel_width);
    paned.set_vexpand(true);

    let root = GtkBox::new(Orientation::Vertical, 0);
    root.append(&paned);
    root.append(&status_label);
    window.set_child(Some(&root));

    let ui = MainWindowUi {
        window,
        inputs,
        save_button,
        delete_button,
        grid,
        status,
        status_duration_ms: config.status_duration_ms,
        tokens,
    };
    ui.refresh_prompts(&context.prompts());
    connect_save(&ui, context, &on_prompts_changed);
    connect_delete(&ui, context, &on_prompts_changed);
    ui
}

fn select_and_copy(
    context: &SharedContext,
    inputs: &PromptInputs,
    status: &StatusLine,
    parent: &Window,
    tokens: StyleTokens,
    status_duration_ms: u32,
    title: &str,
) {
    let prompt = match context.prompt(title) {
        Ok(prompt) => prompt,
        Err(err) => {
            tracing::warn!(title, %err, "prompt button references a missing prompt");
            status.show(err.to_string(), status_duration_ms);
            return;
        }
    };
    inputs.load(&prompt);

    match context.copy_prompt(&prompt.title) {
        Ok(event) => status.show(event.status_message(), status_duration_ms),
        Err(err) => {
            tracing::warn!(title, %err, "copy from prompt button failed");
            show_message(
                Some(parent),
                MessageKind::Warning,
                "Clipboard Error",
                &err.to_string(),
                tokens,
            );
        }
    }
}

fn apply_mutation(
    ui: &MainWindowUi,
    context: &SharedContext,
    on_changed: &PromptsChanged,
    event: &PromptEvent,
) {
    ui.refresh_prompts(&context.prompts());
    on_changed();
    ui.inputs.clear();
    ui.show_status(event.status_message());
}

fn connect_save(ui: &MainWindowUi, context: &SharedContext, on_changed: &PromptsChanged) {
    let ui_for_click = ui.clone();
    let context = context.clone();
    let on_changed = on_changed.clone();
    ui.save_button.connect_clicked(move |_| {
        let ui = &ui_for_click;
        match context.save_prompt(&ui.inputs.title(), &ui.inputs.content()) {
            Ok(event) => apply_mutation(ui, &context, &on_changed, &event),
            Err(err @ PromptActionError::Validation(_)) => ui.warn("Error", &err),
            Err(err) => ui.report_failure("Save Error", &err),
        }
    });
}

fn connect_delete(ui: &MainWindowUi, context: &SharedContext, on_changed: &PromptsChanged) {
    let ui_for_click = ui.clone();
    let context = context.clone();
    let on_changed = on_changed.clone();
    ui.delete_button.connect_clicked(move |_| {
        let ui = &ui_for_click;
        let raw_title = ui.inputs.title();
        let title = match normalize_title(&raw_title) {
            Ok(title) => title.to_string(),
            Err(err) => {
                ui.warn("Error", &PromptActionError::from(err));
                return;
            }
        };
        if !context.contains(&title) {
            ui.warn("Error", &PromptActionError::NotFound { title });
            return;
        }

        let ui_for_answer = ui.clone();
        let context = context.clone();
        let on_changed = on_changed.clone();
        let body = delete_confirmation_body(&title);
        confirm(ui.parent(), "Confirm Deletion", &body, ui.tokens, move |confirmed| {
            if !confirmed {
                tracing::debug!(title = %title, "deletion cancelled");
                return;
            }
            let ui = &ui_for_answer;
            match context.delete_prompt(&title) {
                Ok(event) => apply_mutation(ui, &context, &on_changed, &event),
                Err(err @ PromptActionError::NotFound { .. }) => ui.warn("Error", &err),
                Err(err) => ui.report_failure("Delete Error", &err),
            }
        });
    });
}

/// Close hides to the tray; it only ends the process when no tray is running.
pub(super) fn connect_close_to_tray<F>(ui: &MainWindowUi, context: &SharedContext, terminate: F)
where
    F: Fn() + 'static,
{
    let ui_for_close = ui.clone();
    let context = context.clone();
    ui.window.connect_close_request(move |_| {
        let event = context.close_request_event();
        if let Err(err) = context.transition(event) {
            tracing::warn!(%err, "ignoring close request in current lifecycle state");
            return gtk4::glib::Propagation::Stop;
        }
        match event {
            LifecycleEvent::Hide => {
                tracing::info!("main window hidden to tray");
                ui_for_close.hide();
                ui_for_close.show_status("Application minimized to tray.");
                gtk4::glib::Propagation::Stop
            }
            _ => {
                tracing::info!("no tray available; closing the window quits");
                terminate();
                gtk4::glib::Propagation::Proceed
            }
        }
    });
}
