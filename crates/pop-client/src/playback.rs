//! Playback controller: owns the view state and the year-advance timer
//!
//! The controller starts a timer task when the view enters the playing state
//! and aborts it on every transition out of it, and when dropped. Ticks are
//! delivered through a [`TickReceiver`] so the caller can wait on them next to
//! other input.

use crate::dataset::Dataset;
use crate::error::ClientResult;
use crate::state::ViewState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// A timer firing, tagged with the timer that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    generation: u64,
}

/// Receiving end of the timer channel
pub struct TickReceiver {
    rx: mpsc::UnboundedReceiver<Tick>,
}

impl TickReceiver {
    /// Wait for the next tick
    pub async fn recv(&mut self) -> Option<Tick> {
        self.rx.recv().await
    }

    /// Take a tick if one is already queued
    pub fn try_recv(&mut self) -> Option<Tick> {
        self.rx.try_recv().ok()
    }
}

/// Running timer task; aborted on drop
struct Ticker {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Decrements the live timer count when the timer task's future is dropped
struct LiveGuard(Arc<AtomicUsize>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Drives a [`ViewState`] and its playback timer
pub struct PlaybackController {
    state: ViewState,
    interval: Duration,
    tx: mpsc::UnboundedSender<Tick>,
    timer: Option<Ticker>,
    next_generation: u64,
    live_timers: Arc<AtomicUsize>,
}

impl PlaybackController {
    /// Create a controller in the `Loading` state
    pub fn new(interval: Duration) -> (Self, TickReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            state: ViewState::Loading,
            interval,
            tx,
            timer: None,
            next_generation: 0,
            live_timers: Arc::new(AtomicUsize::new(0)),
        };
        (controller, TickReceiver { rx })
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Timer tasks that have not yet been torn down
    pub fn pending_timers(&self) -> usize {
        self.live_timers.load(Ordering::SeqCst)
    }

    /// Whether a timer is currently owned by the controller
    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Apply the one-time fetch result
    pub fn on_loaded(&mut self, result: ClientResult<Dataset>) {
        self.state.on_loaded(result);
        self.sync_timer();
    }

    /// Toggle play; returns the new play flag (false when not ready)
    pub fn toggle_play(&mut self) -> bool {
        let playing = self
            .state
            .ready_mut()
            .map(|ready| ready.toggle_play())
            .unwrap_or(false);
        self.sync_timer();
        playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        if let Some(ready) = self.state.ready_mut() {
            ready.set_playing(playing);
        }
        self.sync_timer();
    }

    /// Select a year directly, whether or not playback is running
    pub fn select_year(&mut self, year: i32) -> bool {
        self.state
            .ready_mut()
            .is_some_and(|ready| ready.select_year(year))
    }

    /// Apply a timer tick. Returns the new year, or `None` for a stale tick.
    pub fn on_tick(&mut self, tick: Tick) -> Option<i32> {
        let current = self.timer.as_ref().map(|t| t.generation);
        if current != Some(tick.generation) {
            return None;
        }

        let ready = self.state.ready_mut().filter(|ready| ready.is_playing())?;
        let year = ready.advance();
        log::debug!("Advanced to {year}");
        Some(year)
    }

    /// Start or stop the timer to match the play flag
    fn sync_timer(&mut self) {
        match (self.state.is_playing(), self.timer.is_some()) {
            (true, false) => self.timer = Some(self.start_timer()),
            (false, true) => {
                log::debug!("Stopping playback timer");
                self.timer = None;
            }
            _ => {}
        }
    }

    fn start_timer(&mut self) -> Ticker {
        let generation = self.next_generation;
        self.next_generation += 1;

        let period = self.interval;
        let tx = self.tx.clone();
        self.live_timers.fetch_add(1, Ordering::SeqCst);
        let guard = LiveGuard(Arc::clone(&self.live_timers));

        log::debug!("Starting playback timer ({} ms)", period.as_millis());
        let handle = tokio::spawn(async move {
            let _guard = guard;
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if tx.send(Tick { generation }).is_err() {
                    break;
                }
            }
        });

        Ticker { generation, handle }
    }
}

#[cfg(test)]
#[path = "playback_test.rs"]
mod tests;
