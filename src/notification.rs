const APP_NAME: &str = "Prompt Manager";

/// Desktop notification; failures are logged and otherwise ignored.
pub fn send(summary: &str, body: impl Into<String>) {
    let body = body.into();
    if let Err(err) = notify_rust::Notification::new()
        .appname(APP_NAME)
        .summary(summary)
        .body(&body)
        .icon(crate::app::FALLBACK_ICON_NAME)
        .show()
    {
        tracing::warn!("system notification failed: {err}");
    }
}
