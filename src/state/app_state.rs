//! Shared application state and intent dispatch

use std::{
    sync::Mutex,
    time::{Duration, Instant},
};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::config::TimerStyle;

use super::TimerState;

/// Application state owning the single countdown timer.
///
/// The timer is mutated only through the intent methods here; every accepted
/// intent and every tick publishes a fresh snapshot on the watch channel so
/// the tick driver and any observer see changes without holding the lock.
#[derive(Debug)]
pub struct AppState {
    /// The one timer instance, guarded for handler/driver access
    timer: Mutex<TimerState>,
    /// Cadence the tick driver runs at
    pub tick_interval: Duration,
    /// Visualization the display should run, advertised via /status
    pub style: TimerStyle,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last user intent tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel for timer snapshots
    timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a new AppState with a fresh timer on the selection screen
    pub fn new(port: u16, host: String, style: TimerStyle, tick_interval: Duration) -> Self {
        let (timer_update_tx, timer_update_rx) = watch::channel(TimerState::new());

        Self {
            timer: Mutex::new(TimerState::new()),
            tick_interval,
            style,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Apply a user intent to the timer and publish the outcome.
    ///
    /// The returned pair is the post-intent snapshot and whether the intent
    /// actually changed anything. Ignored intents are not recorded as the
    /// last action and do not wake watchers.
    fn apply_intent<F>(&self, action: &str, intent: F) -> Result<(TimerState, bool), String>
    where
        F: FnOnce(&mut TimerState) -> bool,
    {
        let mut timer = self
            .timer
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;
        let accepted = intent(&mut timer);
        let snapshot = timer.clone();
        drop(timer);

        if accepted {
            if let Ok(mut last_action) = self.last_action.lock() {
                *last_action = Some(action.to_string());
            }
            if let Ok(mut last_time) = self.last_action_time.lock() {
                *last_time = Some(Utc::now());
            }
            if let Err(e) = self.timer_update_tx.send(snapshot.clone()) {
                warn!("Failed to send timer update: {}", e);
            }
        }

        Ok((snapshot, accepted))
    }

    /// Add one minute to the duration being edited
    pub fn increase_duration(&self) -> Result<(TimerState, bool), String> {
        info!("Dispatching increase-duration intent");
        self.apply_intent("increase", TimerState::increase_duration)
    }

    /// Remove one minute from the duration being edited
    pub fn decrease_duration(&self) -> Result<(TimerState, bool), String> {
        info!("Dispatching decrease-duration intent");
        self.apply_intent("decrease", TimerState::decrease_duration)
    }

    /// Start the countdown with the edited duration
    pub fn start(&self) -> Result<(TimerState, bool), String> {
        info!("Dispatching start intent");
        self.apply_intent("start", TimerState::start)
    }

    /// Cancel the running countdown
    pub fn cancel(&self) -> Result<(TimerState, bool), String> {
        info!("Dispatching cancel intent");
        self.apply_intent("cancel", TimerState::cancel)
    }

    /// Register a tap on the running screen
    pub fn tap(&self) -> Result<(TimerState, bool), String> {
        info!("Dispatching tap intent");
        self.apply_intent("tap", TimerState::tap)
    }

    /// Advance the countdown by one second.
    ///
    /// Called by the tick driver, not by user intents, so it never touches
    /// the last-action record. Publishes a snapshot whenever the countdown
    /// actually moved.
    pub fn tick(&self) -> Result<TimerState, String> {
        let mut timer = self
            .timer
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;
        let advanced = timer.tick();
        let snapshot = timer.clone();
        drop(timer);

        if advanced {
            if let Err(e) = self.timer_update_tx.send(snapshot.clone()) {
                warn!("Failed to send timer update: {}", e);
            }
        }

        Ok(snapshot)
    }

    /// Get a snapshot of the current timer state
    pub fn timer(&self) -> Result<TimerState, String> {
        self.timer
            .lock()
            .map(|timer| timer.clone())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Subscribe to timer snapshots
    pub fn subscribe_timer(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last user intent information
    pub fn last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
