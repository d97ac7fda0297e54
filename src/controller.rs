// File: ./src/controller.rs
// Composes the connectivity wait, fetch, filter and delivery into one check.
use crate::client::ReminderClient;
use crate::config::Config;
use crate::model;
use crate::system::DeliveryChannel;
use chrono::{Datelike, Local};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

pub struct Controller {
    client: ReminderClient,
    channel: Arc<dyn DeliveryChannel>,
    pacing: Duration,
}

impl Controller {
    pub fn new(
        config: &Config,
        channel: Arc<dyn DeliveryChannel>,
        shutdown: watch::Receiver<bool>,
    ) -> anyhow::Result<Self> {
        Ok(Self::with_client(
            config,
            ReminderClient::new(config, shutdown)?,
            channel,
        ))
    }

    /// Build a controller around an existing client (custom probe, tests).
    pub fn with_client(
        config: &Config,
        client: ReminderClient,
        channel: Arc<dyn DeliveryChannel>,
    ) -> Self {
        Self {
            client,
            channel,
            pacing: Duration::from_secs(config.notify_pacing_secs),
        }
    }

    /// One full check against the current local day-of-month.
    pub async fn run_check(&self) -> bool {
        self.run_check_on(Local::now().day()).await
    }

    /// One full check against an explicit reference day.
    ///
    /// Returns false only when no reminder data could be obtained. A day
    /// with zero matching reminders is still a successful check.
    pub async fn run_check_on(&self, today: u32) -> bool {
        let entries = match self.client.fetch().await {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Could not load reminders: {}", e);
                return false;
            }
        };

        let due = model::due_on(&entries, today);
        if due.is_empty() {
            log::info!("No reminders due today.");
            return true;
        }

        log::info!("{} reminder(s) due today", due.len());
        self.dispatch(&due).await;
        true
    }

    /// Deliver messages in order, pausing between notifications but not
    /// after the last one. A failed delivery never aborts the remainder.
    async fn dispatch(&self, messages: &[String]) {
        for (i, message) in messages.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.pacing).await;
            }
            log::info!("Showing notification: {}", message);
            if !self.channel.deliver(message) {
                log::warn!("Notification was not shown: {}", message);
            }
        }
    }
}
