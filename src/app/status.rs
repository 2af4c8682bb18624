use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use gtk4::Label;

/// Status line whose messages fade back to the idle text.
#[derive(Clone)]
pub(super) struct StatusLine {
    label: Label,
    idle_text: Rc<str>,
    sequence: Rc<Cell<u64>>,
}

impl StatusLine {
    pub(super) fn new(label: &Label, idle_text: &str) -> Self {
        label.set_text(idle_text);
        Self {
            label: label.clone(),
            idle_text: Rc::from(idle_text),
            sequence: Rc::new(Cell::new(0)),
        }
    }

    pub(super) fn show(&self, message: impl Into<String>, duration_ms: u32) {
        let message = message.into();
        self.label.set_text(&message);

        let sequence = self.sequence.get().saturating_add(1);
        self.sequence.set(sequence);

        let label = self.label.clone();
        let idle_text = self.idle_text.clone();
        let latest_sequence = self.sequence.clone();
        gtk4::glib::timeout_add_local_once(
            Duration::from_millis(u64::from(duration_ms)),
            move || {
                if latest_sequence.get() == sequence {
                    label.set_text(&idle_text);
                }
            },
        );
    }
}
