//! Notification and confirmation collaborators.
//! Desktop notifications are only implemented on macOS for now.

#[cfg(target_os = "macos")]
use std::process::Command;

/// Fire-and-forget signal; delivery is not guaranteed
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Synchronous yes/no question
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

/// A confirmation whose answer is decided up front
/// (the TUI asks in a modal first, then replays the user's answer)
#[derive(Debug, Clone, Copy)]
pub struct Answer(pub bool);

impl Confirm for Answer {
    fn confirm(&mut self, _message: &str) -> bool {
        self.0
    }
}

/// System notification center
#[derive(Debug, Clone, Copy)]
pub struct DesktopNotifier {
    pub enabled: bool,
}

impl Notifier for DesktopNotifier {
    fn notify(&self, message: &str) {
        if !self.enabled {
            return;
        }

        #[cfg(target_os = "macos")]
        {
            let script = format!(
                r#"display notification "{}" with title "Pomodo""#,
                message.replace('"', "\\\"")
            );

            if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
                tracing::debug!(error = %e, "desktop notification failed");
            }
        }

        #[cfg(not(target_os = "macos"))]
        {
            // No-op on other platforms
            let _ = message;
        }
    }
}
