use gtk4::prelude::*;
use gtk4::{Box as GtkBox, Dialog, Label, Orientation, ResponseType, Window};

use crate::ui::StyleTokens;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MessageKind {
    Warning,
    Error,
}

impl MessageKind {
    fn css_class(self) -> &'static str {
        match self {
            MessageKind::Warning => "dialog-warning",
            MessageKind::Error => "dialog-error",
        }
    }
}

fn dialog_shell(parent: Option<&Window>, title: &str, body: &str, tokens: StyleTokens) -> Dialog {
    let dialog = Dialog::new();
    dialog.add_css_class("prompt-manager-root");
    dialog.set_title(Some(title));
    if let Some(parent) = parent {
        dialog.set_transient_for(Some(parent));
        dialog.set_destroy_with_parent(true);
    }
    dialog.set_modal(true);

    let body_label = Label::new(Some(body));
    body_label.set_wrap(true);
    body_label.set_xalign(0.0);
    body_label.set_max_width_chars(60);

    let content = GtkBox::new(Orientation::Vertical, 0);
    content.set_margin_top(tokens.spacing_12);
    content.set_margin_bottom(tokens.spacing_12);
    content.set_margin_start(tokens.spacing_12);
    content.set_margin_end(tokens.spacing_12);
    content.append(&body_label);
    dialog.content_area().append(&content);
    dialog
}

/// Modal message with a single dismiss button.
pub(super) fn show_message(
    parent: Option<&Window>,
    kind: MessageKind,
    title: &str,
    body: &str,
    tokens: StyleTokens,
) {
    let dialog = dialog_shell(parent, title, body, tokens);
    dialog.add_css_class(kind.css_class());
    dialog.add_button("OK", ResponseType::Ok);
    dialog.set_default_response(ResponseType::Ok);
    dialog.connect_response(|dialog, _| dialog.close());
    dialog.present();
}

/// Like [`show_message`], then runs `on_dismiss` once closed.
pub(super) fn show_message_then<F>(
    parent: Option<&Window>,
    kind: MessageKind,
    title: &str,
    body: &str,
    tokens: StyleTokens,
    on_dismiss: F,
) where
    F: Fn() + 'static,
{
    let dialog = dialog_shell(parent, title, body, tokens);
    dialog.add_css_class(kind.css_class());
    dialog.add_button("OK", ResponseType::Ok);
    dialog.set_default_response(ResponseType::Ok);
    dialog.connect_response(move |dialog, _| {
        dialog.close();
        on_dismiss();
    });
    dialog.present();
}

/// Destructive-action confirmation; "No" is the default answer.
pub(super) fn confirm<F>(
    parent: &Window,
    title: &str,
    body: &str,
    tokens: StyleTokens,
    on_answer: F,
) where
    F: Fn(bool) + 'static,
{
    let dialog = dialog_shell(Some(parent), title, body, tokens);
    dialog.add_button("No", ResponseType::No);
    dialog.add_button("Yes", ResponseType::Yes);
    dialog.set_default_response(ResponseType::No);
    dialog.connect_response(move |dialog, response| {
        dialog.close();
        on_answer(response == ResponseType::Yes);
    });
    dialog.present();
}

pub(super) fn delete_confirmation_body(title: &str) -> String {
    format!("Are you sure you want to delete the prompt '{title}'?")
}
