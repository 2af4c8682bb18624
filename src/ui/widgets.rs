use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Align, Button, Label};

use crate::prompt::Prompt;

/// Uniform activation hook; each button is bound to its title when built.
pub type PromptActivation = Rc<dyn Fn(&str)>;

pub fn prompt_button(prompt: &Prompt, max_chars: i32, on_activate: &PromptActivation) -> Button {
    let label = Label::new(Some(&prompt.title));
    label.set_ellipsize(gtk4::pango::EllipsizeMode::End);
    label.set_max_width_chars(max_chars);

    let button = Button::new();
    button.set_child(Some(&label));
    button.set_focus_on_click(false);
    button.set_hexpand(false);
    button.set_halign(Align::Start);
    button.add_css_class("prompt-button");
    button.set_tooltip_text(Some(&prompt_tooltip(prompt)));

    let title = prompt.title.clone();
    let on_activate = on_activate.clone();
    button.connect_clicked(move |_| on_activate(&title));
    button
}

pub fn section_label(text: &str) -> Label {
    let label = Label::new(Some(text));
    label.add_css_class("section-title");
    label.set_halign(Align::Start);
    label.set_xalign(0.0);
    label
}

fn prompt_tooltip(prompt: &Prompt) -> String {
    match prompt.modified_at.as_deref() {
        Some(modified) => format!("{}\nModified: {modified}", prompt.title),
        None => prompt.title.clone(),
    }
}
