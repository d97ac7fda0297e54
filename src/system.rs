// File: ./src/system.rs
// Desktop notification delivery.
use notify_rust::{Notification, Timeout};

const TITLE: &str = "Your daily reminder!";
const APP_NAME: &str = "Rappel";

/// Where matched reminder messages get delivered.
pub trait DeliveryChannel: Send + Sync {
    /// Attempt to surface one message to the user. Returns false when the
    /// notification subsystem rejected it; never panics. No retry.
    fn deliver(&self, message: &str) -> bool;
}

/// Delivers messages as OS desktop notifications.
pub struct DesktopChannel {
    display_secs: u64,
}

impl DesktopChannel {
    pub fn new(display_secs: u64) -> Self {
        Self { display_secs }
    }
}

impl DeliveryChannel for DesktopChannel {
    fn deliver(&self, message: &str) -> bool {
        match Notification::new()
            .summary(TITLE)
            .body(message)
            .appname(APP_NAME)
            .timeout(Timeout::Milliseconds(
                self.display_secs.saturating_mul(1000).min(u32::MAX as u64) as u32,
            ))
            .show()
        {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Could not show notification: {}", e);
                false
            }
        }
    }
}
