/// Visibility of the main window over the process lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindowState {
    #[default]
    Starting,
    Visible,
    Hidden,
    Terminated,
}
