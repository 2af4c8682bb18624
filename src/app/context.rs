use std::cell::{Cell, RefCell};

use crate::clipboard::ClipboardBackend;
use crate::config::AppConfig;
use crate::prompt::Prompt;
use crate::state::{LifecycleEvent, StateMachine, StateResult, WindowState};
use crate::storage::PromptStorage;

use super::actions::{PromptActionResult, PromptEvent, PromptSession};

/// Process-wide state shared by the main window and the tray.
///
/// Built once at startup and handed to both controllers behind an `Rc`; it
/// is the only owner of the prompt collection.
pub struct AppContext<S> {
    session: RefCell<PromptSession<S>>,
    clipboard: Box<dyn ClipboardBackend>,
    lifecycle: RefCell<StateMachine>,
    config: AppConfig,
    tray_active: Cell<bool>,
}

impl<S: PromptStorage> AppContext<S> {
    pub fn new(
        session: PromptSession<S>,
        clipboard: Box<dyn ClipboardBackend>,
        config: AppConfig,
    ) -> Self {
        Self {
            session: RefCell::new(session),
            clipboard,
            lifecycle: RefCell::new(StateMachine::new()),
            config,
            tray_active: Cell::new(false),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.session.borrow().collection().all().to_vec()
    }

    pub fn titles(&self) -> Vec<String> {
        self.session.borrow().collection().titles()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.session
            .borrow()
            .collection()
            .find_by_title(title)
            .is_some()
    }

    pub fn prompt(&self, title: &str) -> PromptActionResult<Prompt> {
        self.session.borrow().prompt(title).cloned()
    }

    pub fn save_prompt(&self, title: &str, content: &str) -> PromptActionResult<PromptEvent> {
        self.session.borrow_mut().save_prompt(title, content)
    }

    pub fn delete_prompt(&self, title: &str) -> PromptActionResult<PromptEvent> {
        self.session.borrow_mut().delete_prompt(title)
    }

    pub fn copy_prompt(&self, title: &str) -> PromptActionResult<PromptEvent> {
        self.session
            .borrow()
            .copy_prompt(title, self.clipboard.as_ref())
    }

    pub fn window_state(&self) -> WindowState {
        self.lifecycle.borrow().state()
    }

    pub fn transition(&self, event: LifecycleEvent) -> StateResult<WindowState> {
        self.lifecycle.borrow_mut().transition(event)
    }

    pub fn tray_active(&self) -> bool {
        self.tray_active.get()
    }

    pub fn set_tray_active(&self, active: bool) {
        self.tray_active.set(active);
    }

    /// Lifecycle event a window close request maps to.
    ///
    /// Without a tray there is no way back to a hidden window, so closing
    /// ends the process instead.
    pub fn close_request_event(&self) -> LifecycleEvent {
        if self.tray_active() {
            LifecycleEvent::Hide
        } else {
            LifecycleEvent::Terminate
        }
    }
}
