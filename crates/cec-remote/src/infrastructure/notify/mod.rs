//! On-screen notifications.
//!
//! [`DesktopNotifier`] talks to the desktop's notification server over the
//! D-Bus session bus (`org.freedesktop.Notifications`).  The server shows a
//! bubble that disappears after the configured timeout or when clicked.
//!
//! On a bare media-center setup there may be no session bus at all; in that
//! case [`LogNotifier`] is used instead and the message only goes to the log.

use std::collections::HashMap;
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::{debug, info};
use zbus::zvariant::Value;

use crate::application::launch_shortcut::Notifier;

const APP_NAME: &str = "cec-remote";
const SERVICE: &str = "org.freedesktop.Notifications";
const PATH: &str = "/org/freedesktop/Notifications";
const INTERFACE: &str = "org.freedesktop.Notifications";

/// The `expire_timeout` argument of `Notify`, saturating at `i32::MAX`.
fn expire_timeout_ms(timeout: Duration) -> i32 {
    i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX)
}

/// Sends notifications to the desktop notification server.
pub struct DesktopNotifier {
    proxy: zbus::Proxy<'static>,
    runtime: Handle,
    timeout_ms: i32,
}

impl DesktopNotifier {
    /// Connects to the session bus.
    ///
    /// Must be called from within a Tokio runtime; notifications are later
    /// sent on that runtime without blocking the caller.
    pub async fn connect(timeout: Duration) -> zbus::Result<Self> {
        let conn = zbus::Connection::session().await?;
        let proxy = zbus::Proxy::new_owned(conn, SERVICE, PATH, INTERFACE).await?;
        Ok(Self {
            proxy,
            runtime: Handle::current(),
            timeout_ms: expire_timeout_ms(timeout),
        })
    }
}

impl Notifier for DesktopNotifier {
    fn show(&self, summary: &str, body: &str) {
        let proxy = self.proxy.clone();
        let summary = summary.to_owned();
        let body = body.to_owned();
        let timeout_ms = self.timeout_ms;
        self.runtime.spawn(async move {
            let actions: Vec<&str> = Vec::new();
            let hints: HashMap<&str, Value<'_>> = HashMap::new();
            let reply = proxy
                .call_method(
                    "Notify",
                    &(
                        APP_NAME,
                        0u32,
                        "",
                        summary.as_str(),
                        body.as_str(),
                        actions,
                        hints,
                        timeout_ms,
                    ),
                )
                .await;
            if let Err(e) = reply {
                debug!("notification not shown: {e}");
            }
        });
    }
}

/// Fallback notifier that writes the message to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show(&self, summary: &str, body: &str) {
        info!("{summary}: {body}");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_expire_timeout_is_in_milliseconds() {
        assert_eq!(expire_timeout_ms(Duration::from_millis(3000)), 3000);
        assert_eq!(expire_timeout_ms(Duration::ZERO), 0);
    }

    #[test]
    fn test_expire_timeout_saturates() {
        assert_eq!(expire_timeout_ms(Duration::from_secs(u64::MAX)), i32::MAX);
        assert_eq!(
            expire_timeout_ms(Duration::from_millis(i32::MAX as u64 + 1)),
            i32::MAX
        );
    }

    #[test]
    fn test_log_notifier_is_usable_as_notifier() {
        // Arrange
        let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);

        // Act / Assert: logging only, never blocks or panics
        notifier.show("Starting", "kodi --standalone");
        notifier.show("", "");
    }
}
