use super::WindowState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Show,
    /// Window close request redirected to the tray.
    Hide,
    /// Tray quit; ends the process.
    Terminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: Option<WindowState>,
    pub event: LifecycleEvent,
    pub to: WindowState,
}

impl StateTransition {
    pub const fn new(from: Option<WindowState>, event: LifecycleEvent, to: WindowState) -> Self {
        Self { from, event, to }
    }
}
