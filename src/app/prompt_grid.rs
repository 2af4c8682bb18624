use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use gtk4::prelude::*;
use gtk4::{Align, Box as GtkBox, Button, Label, Orientation, PolicyType, ScrolledWindow};

use crate::prompt::Prompt;
use crate::ui::{compute_flow_layout, prompt_button, row_count, PromptActivation, StyleTokens};

const EMPTY_PLACEHOLDER: &str = "No prompts saved yet.";
const REFLOW_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Prompt buttons flowed into rows that follow the available width.
///
/// Horizontal scrolling is disabled; rows are recomputed whenever the
/// scroller's width changes, polled on the UI tick.
#[derive(Clone)]
pub(super) struct PromptGrid {
    scroller: ScrolledWindow,
    rows: GtkBox,
    buttons: Rc<RefCell<Vec<Button>>>,
    laid_out_width: Rc<Cell<i32>>,
    on_activate: PromptActivation,
    tokens: StyleTokens,
}

impl PromptGrid {
    pub(super) fn new(tokens: StyleTokens, on_activate: PromptActivation) -> Self {
        let rows = GtkBox::new(Orientation::Vertical, tokens.spacing_8);
        rows.set_valign(Align::Start);
        rows.set_margin_top(tokens.spacing_4);
        rows.set_margin_start(tokens.spacing_4);
        rows.set_margin_end(tokens.spacing_4);
        rows.add_css_class("prompt-grid");

        let scroller = ScrolledWindow::new();
        scroller.set_policy(PolicyType::Never, PolicyType::Automatic);
        scroller.set_vexpand(true);
        scroller.set_hexpand(true);
        scroller.set_child(Some(&rows));

        let grid = Self {
            scroller,
            rows,
            buttons: Rc::new(RefCell::new(Vec::new())),
            laid_out_width: Rc::new(Cell::new(-1)),
            on_activate,
            tokens,
        };

        {
            let grid = grid.clone();
            gtk4::glib::timeout_add_local(REFLOW_POLL_INTERVAL, move || {
                if grid.scroller.is_mapped() {
                    grid.reflow_if_resized();
                }
                gtk4::glib::ControlFlow::Continue
            });
        }

        grid
    }

    pub(super) fn widget(&self) -> &ScrolledWindow {
        &self.scroller
    }

    /// Replaces every button, keeping collection order.
    pub(super) fn rebuild(&self, prompts: &[Prompt]) {
        let buttons = prompts
            .iter()
            .map(|prompt| {
                prompt_button(
                    prompt,
                    self.tokens.prompt_button_max_chars,
                    &self.on_activate,
                )
            })
            .collect::<Vec<_>>();
        tracing::debug!(count = buttons.len(), "rebuilt prompt buttons");
        *self.buttons.borrow_mut() = buttons;
        self.laid_out_width.set(-1);
        self.reflow_if_resized();
    }

    fn available_width(&self) -> i32 {
        self.scroller.width() - 2 * self.tokens.spacing_4
    }

    fn reflow_if_resized(&self) {
        let width = self.available_width();
        if width <= 0 || width == self.laid_out_width.get() {
            return;
        }
        self.laid_out_width.set(width);
        self.reflow(width);
    }

    fn reflow(&self, width: i32) {
        self.clear_rows();

        let buttons = self.buttons.borrow();
        if buttons.is_empty() {
            let placeholder = Label::new(Some(EMPTY_PLACEHOLDER));
            placeholder.add_css_class("dim-label");
            placeholder.set_halign(Align::Start);
            self.rows.append(&placeholder);
            return;
        }

        let widths = buttons
            .iter()
            .map(|button| button.measure(Orientation::Horizontal, -1).1)
            .collect::<Vec<_>>();
        let cells = compute_flow_layout(width, &widths, self.tokens.spacing_8);
        let rows = row_count(&cells);

        let mut row_boxes: Vec<GtkBox> = Vec::with_capacity(rows);
        for (button, cell) in buttons.iter().zip(cells) {
            if cell.row >= row_boxes.len() {
                let row = GtkBox::new(Orientation::Horizontal, self.tokens.spacing_8);
                row.add_css_class("prompt-row");
                self.rows.append(&row);
                row_boxes.push(row);
            }
            row_boxes[cell.row].append(button);
        }
        tracing::trace!(width, rows, "reflowed prompt grid");
    }

    fn clear_rows(&self) {
        while let Some(child) = self.rows.first_child() {
            if let Some(row) = child.downcast_ref::<GtkBox>() {
                while let Some(button) = row.first_child() {
                    row.remove(&button);
                }
            }
            self.rows.remove(&child);
        }
    }
}
