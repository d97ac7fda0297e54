// File: ./src/client.rs
// Connectivity probing, the online wait loop, and the reminder fetch.
use crate::config::Config;
use crate::model::{self, ReminderEntry};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};

/// A single reachability check against a well-known endpoint.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Returns true only when the endpoint answered with a plain 200 OK.
    /// Transport failures of any kind convert to false; never errors.
    async fn probe(&self) -> bool;
}

/// Probes reachability with one bounded GET.
pub struct HttpProbe {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(url: &str, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            http: build_http()?,
            url: url.to_string(),
            timeout,
        })
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self) -> bool {
        match self.http.get(&self.url).timeout(self.timeout).send().await {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(e) => {
                log::debug!("Connectivity probe failed: {}", e);
                false
            }
        }
    }
}

/// Outcome of waiting for the network to become reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Online,
    DeadlineExpired,
    Cancelled,
}

/// Failure kinds of one fetch attempt, kept distinct so callers and tests
/// never have to string-match log output.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network did not become reachable in time")]
    NotConnected,
    #[error("cancelled while waiting for the network")]
    Cancelled,
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("server answered with status {0}")]
    Status(u16),
    #[error("malformed reminder document: {0}")]
    Decode(String),
}

/// Downloads the reminder document once the network is reachable.
pub struct ReminderClient {
    http: reqwest::Client,
    probe: Arc<dyn Probe>,
    url: String,
    fetch_timeout: Duration,
    retry_interval: Duration,
    wait_deadline: Option<Duration>,
    shutdown: watch::Receiver<bool>,
}

impl ReminderClient {
    /// Build a client probing `config.connectivity_url`.
    pub fn new(config: &Config, shutdown: watch::Receiver<bool>) -> anyhow::Result<Self> {
        let probe = Arc::new(HttpProbe::new(
            &config.connectivity_url,
            Duration::from_secs(config.connectivity_timeout_secs),
        )?);
        Self::with_probe(config, probe, shutdown)
    }

    /// Build a client around a custom connectivity probe.
    pub fn with_probe(
        config: &Config,
        probe: Arc<dyn Probe>,
        shutdown: watch::Receiver<bool>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            http: build_http()?,
            probe,
            url: config.url.clone(),
            fetch_timeout: Duration::from_secs(config.fetch_timeout_secs),
            retry_interval: Duration::from_secs(config.connectivity_retry_secs),
            wait_deadline: config.connectivity_deadline_secs.map(Duration::from_secs),
            shutdown,
        })
    }

    /// Wait until the network is reachable.
    ///
    /// Probes once immediately, then retries on a fixed interval. The loop
    /// ends when a probe succeeds, the configured deadline (if any) would
    /// be crossed before the next probe, or the shutdown signal fires.
    /// Without a deadline this blocks indefinitely.
    pub async fn await_connectivity(&self) -> WaitOutcome {
        let deadline = self.wait_deadline.map(|d| Instant::now() + d);
        let mut shutdown = self.shutdown.clone();

        loop {
            if *shutdown.borrow() {
                return WaitOutcome::Cancelled;
            }
            if self.probe.probe().await {
                return WaitOutcome::Online;
            }

            let retry_at = Instant::now() + self.retry_interval;
            if let Some(limit) = deadline
                && retry_at >= limit
            {
                log::warn!("Network still unreachable at deadline; giving up the wait");
                return WaitOutcome::DeadlineExpired;
            }

            log::info!(
                "Network unreachable; retrying in {}s",
                self.retry_interval.as_secs()
            );
            tokio::select! {
                _ = sleep_until(retry_at) => {}
                changed = shutdown.changed() => match changed {
                    Ok(()) if *shutdown.borrow() => return WaitOutcome::Cancelled,
                    Ok(()) => {}
                    // Sender gone: cancellation can no longer arrive.
                    Err(_) => sleep_until(retry_at).await,
                },
            }
        }
    }

    /// One end-to-end fetch: wait for connectivity, download, decode.
    ///
    /// There is no retry of the download itself; a transport failure after
    /// connectivity was confirmed is terminal for this attempt. Returns
    /// either the complete decoded set or an error, never a partial set.
    pub async fn fetch(&self) -> Result<Vec<ReminderEntry>, FetchError> {
        match self.await_connectivity().await {
            WaitOutcome::Online => {}
            WaitOutcome::DeadlineExpired => return Err(FetchError::NotConnected),
            WaitOutcome::Cancelled => return Err(FetchError::Cancelled),
        }

        log::info!("Downloading reminders from {}", self.url);
        let response = self
            .http
            .get(&self.url)
            .timeout(self.fetch_timeout)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Reminder server answered {}", status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(classify_transport)?;
        let entries = model::decode(&body).map_err(|e| {
            log::warn!("Could not decode reminder document: {}", e);
            FetchError::Decode(e.to_string())
        })?;

        log::info!("Downloaded {} reminder entries", entries.len());
        Ok(entries)
    }
}

fn build_http() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("rappel/", env!("CARGO_PKG_VERSION")))
        .build()
}

fn classify_transport(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        log::warn!("Reminder download timed out");
        FetchError::Timeout
    } else {
        log::warn!("Reminder download failed: {}", e);
        FetchError::Connection(e.to_string())
    }
}
