use std::sync::mpsc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChannelStatus {
    Open,
    Disconnected,
}

/// Hands every queued command to `handler` without blocking.
pub(super) fn drain_commands<T, H>(rx: &mpsc::Receiver<T>, handler: &mut H) -> ChannelStatus
where
    H: FnMut(T),
{
    loop {
        match rx.try_recv() {
            Ok(command) => handler(command),
            Err(mpsc::TryRecvError::Empty) => return ChannelStatus::Open,
            Err(mpsc::TryRecvError::Disconnected) => return ChannelStatus::Disconnected,
        }
    }
}

/// Polls `rx` on the GTK main loop until every sender is gone.
pub(super) fn pump_commands<T, H>(rx: mpsc::Receiver<T>, interval: Duration, mut on_command: H)
where
    T: 'static,
    H: FnMut(T) + 'static,
{
    gtk4::glib::timeout_add_local(interval, move || {
        match drain_commands(&rx, &mut on_command) {
            ChannelStatus::Open => gtk4::glib::ControlFlow::Continue,
            ChannelStatus::Disconnected => {
                tracing::debug!("command channel closed; stopping pump");
                gtk4::glib::ControlFlow::Break
            }
        }
    });
}
