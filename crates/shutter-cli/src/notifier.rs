//! Terminal notifications.

use console::style;
use shutter_core::notify::{Notification, NotificationKind, Notifier};

/// Prints mutation notifications to the terminal, styled by outcome.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                println!("{} {}", style("✔").green().bold(), notification.message);
            }
            NotificationKind::Error => {
                eprintln!("{} {}", style("✘").red().bold(), notification.message);
            }
        }
    }
}
