//! Fetching the published schedule and keeping it fresh.
//!
//! A [`Controller`] owns the acquisition state machine:
//!
//! - **idle**: no link configured.
//! - **loading**: a foreground fetch is in flight.
//! - **ready**: rows are published and there is no error.
//! - **errored**: the last foreground fetch failed; rows are cleared.
//!
//! Submitting a link starts a foreground fetch and a periodic background
//! refresh. Background failures are logged and otherwise ignored so a transient
//! outage never replaces good data with an error. Each submission and each
//! foreground fetch bumps a request generation; responses that arrive after a
//! newer request started are discarded.
//!
//! State changes are published through a [`tokio::sync::watch`] channel.

use std::{
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

use crate::{dataset::Dataset, error::FetchError, source};

pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AcquisitionState {
    pub dataset: Option<Dataset>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Local>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Errored,
}

impl AcquisitionState {
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Errored
        } else if self.dataset.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// User-initiated: drives the loading flag and surfaces errors.
    Foreground,
    /// Timer-initiated: only successes are published.
    Background,
}

/// Performs one GET against an already normalized link and decodes the body.
pub async fn fetch_dataset(client: &Client, url: &str) -> Result<Dataset, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(FetchError::Network)?;
    let status = response.status();
    if status == StatusCode::FORBIDDEN {
        return Err(FetchError::AccessDenied);
    }
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    let body = response.text().await.map_err(FetchError::Network)?;
    Ok(Dataset::from_csv(&body))
}

struct Shared {
    source: Mutex<Option<String>>,
    generation: AtomicU64,
    state: watch::Sender<AcquisitionState>,
}

impl Shared {
    fn current_source(&self) -> Option<String> {
        self.source
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swaps the configured link. Clearing it also resets the published state.
    ///
    /// The generation bump happens under the channel's lock so no response
    /// checked against the old generation can publish after the swap.
    fn replace_source(&self, source: Option<String>) {
        let idle = source.is_none();
        *self.source.lock().unwrap_or_else(PoisonError::into_inner) = source;
        self.state.send_if_modified(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            if idle {
                *state = AcquisitionState::default();
            }
            idle
        });
    }

    /// Applies `update` unless a newer request started after `generation`.
    fn publish(&self, generation: u64, update: impl FnOnce(&mut AcquisitionState)) -> bool {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            update(state);
            true
        })
    }

    async fn fetch(&self, client: &Client, mode: FetchMode) {
        let Some(raw) = self.current_source() else {
            self.state.send_modify(|state| {
                state.dataset = None;
                state.error = None;
            });
            return;
        };

        let generation = match mode {
            FetchMode::Foreground => {
                let mut generation = 0;
                self.state.send_modify(|state| {
                    generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
                    state.loading = true;
                });
                generation
            }
            FetchMode::Background => self.generation.load(Ordering::SeqCst),
        };

        let url = source::normalize(&raw);
        debug!("Fetching schedule from {url} ({mode:?}, generation {generation})");
        let outcome = fetch_dataset(client, &url).await;

        let published = match outcome {
            Ok(dataset) => {
                let rows = dataset.len();
                let published = self.publish(generation, |state| {
                    state.dataset = Some(dataset);
                    state.error = None;
                    state.last_updated = Some(Local::now());
                    if mode == FetchMode::Foreground {
                        state.loading = false;
                    }
                });
                if published {
                    info!("Loaded {rows} row(s) from {url} ({mode:?})");
                }
                published
            }
            Err(err) if mode == FetchMode::Background => {
                let current = self.generation.load(Ordering::SeqCst) == generation;
                if current {
                    warn!("Background data refresh failed: {err}");
                }
                current
            }
            Err(err) => {
                let message = err.to_string();
                let published = self.publish(generation, |state| {
                    state.dataset = None;
                    state.error = Some(message);
                    state.loading = false;
                });
                if published {
                    warn!("Fetching {url} failed: {err}");
                }
                published
            }
        };
        if !published {
            debug!("Discarding response from {url}: generation {generation} is stale");
        }
    }
}

async fn poll(shared: Arc<Shared>, client: Client, period: Duration) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        shared.fetch(&client, FetchMode::Background).await;
    }
}

/// Drives fetches for one configured link at a time.
///
/// Must be used from within a tokio runtime; submitting a link spawns the
/// refresh task. Dropping the controller cancels it.
pub struct Controller {
    client: Client,
    interval: Duration,
    shared: Arc<Shared>,
    poller: Option<JoinHandle<()>>,
}

impl Controller {
    pub fn new(client: Client) -> Self {
        Self::with_interval(client, REFRESH_INTERVAL)
    }

    pub fn with_interval(client: Client, interval: Duration) -> Self {
        let (state, _) = watch::channel(AcquisitionState::default());
        Self {
            client,
            interval,
            shared: Arc::new(Shared {
                source: Mutex::new(None),
                generation: AtomicU64::new(0),
                state,
            }),
            poller: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AcquisitionState> {
        self.shared.state.subscribe()
    }

    pub fn state(&self) -> AcquisitionState {
        self.shared.state.borrow().clone()
    }

    pub fn source(&self) -> Option<String> {
        self.shared.current_source()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_polling(&self) -> bool {
        self.poller
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Configures a new link and loads it in the foreground.
    ///
    /// An empty link returns the controller to idle. Callers holding filter
    /// selections must reset them; see [`crate::session::Session::change_source`].
    pub async fn submit(&mut self, raw: &str) {
        self.stop_polling();
        if raw.is_empty() {
            info!("Schedule link cleared");
            self.shared.replace_source(None);
            return;
        }

        info!("Loading schedule from {raw}");
        self.shared.replace_source(Some(raw.to_string()));
        self.poller = Some(tokio::spawn(poll(
            Arc::clone(&self.shared),
            self.client.clone(),
            self.interval,
        )));
        self.shared.fetch(&self.client, FetchMode::Foreground).await;
    }

    /// Reloads the configured link in the foreground.
    pub async fn refresh(&self) {
        self.shared.fetch(&self.client, FetchMode::Foreground).await;
    }

    /// Runs the same fetch the refresh timer runs.
    pub async fn refresh_in_background(&self) {
        self.shared.fetch(&self.client, FetchMode::Background).await;
    }

    pub fn stop_polling(&mut self) {
        if let Some(handle) = self.poller.take() {
            handle.abort();
            debug!("Stopped periodic refresh");
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.stop_polling();
    }
}
