//! Readiness gate backed by a tokio timer.
//!
//! The gate starts closed and opens either when [`ReadinessGate::mark_ready`]
//! is called or when the armed timeout elapses, whichever happens first.
//! Opening is a single compare-and-set on a watch channel: whichever side
//! loses the race finds the gate already open and does nothing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use sw_core::ports::ReadinessPort;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

pub const RADIO_READY_TIMEOUT: Duration = Duration::from_secs(10);

/// What opened the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadySource {
    Signal,
    Timeout,
}

struct GateInner {
    name: &'static str,
    ready: watch::Sender<bool>,
    source: Mutex<Option<ReadySource>>,
}

impl GateInner {
    /// Opens the gate if it is still closed. Returns whether this call did it.
    fn open(&self, source: ReadySource) -> bool {
        let opened = self.ready.send_if_modified(|ready| {
            if *ready {
                return false;
            }
            *ready = true;
            *self.source.lock().unwrap_or_else(|e| e.into_inner()) = Some(source);
            true
        });
        if opened {
            info!(gate = self.name, ?source, "readiness gate opened");
        } else {
            debug!(gate = self.name, ?source, "readiness gate already open, ignoring");
        }
        opened
    }
}

pub struct ReadinessGate {
    inner: Arc<GateInner>,
    timer: Mutex<Option<AbortHandle>>,
}

impl ReadinessGate {
    pub fn new(name: &'static str) -> Self {
        let (ready, _) = watch::channel(false);
        Self {
            inner: Arc::new(GateInner {
                name,
                ready,
                source: Mutex::new(None),
            }),
            timer: Mutex::new(None),
        }
    }

    /// Gate for the cellular radio with the standard timeout already armed.
    pub fn radio() -> Self {
        Self::radio_with_timeout(RADIO_READY_TIMEOUT)
    }

    pub fn radio_with_timeout(timeout: Duration) -> Self {
        let gate = Self::new("radio");
        gate.arm(timeout);
        gate
    }

    /// Schedules the gate to open after `timeout`. Re-arming replaces the
    /// pending timer. Must be called inside a tokio runtime.
    pub fn arm(&self, timeout: Duration) {
        if self.is_ready() {
            return;
        }
        let inner = Arc::clone(&self.inner);
        let deadline = Instant::now() + timeout;
        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;
            inner.open(ReadySource::Timeout);
        });

        let mut timer = self.timer.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = timer.replace(handle.abort_handle()) {
            existing.abort();
        }
        debug!(
            gate = self.inner.name,
            timeout_ms = timeout.as_millis() as u64,
            "readiness timer armed"
        );
    }

    /// External ready signal. Cancels the pending timeout.
    pub fn mark_ready(&self) -> bool {
        let opened = self.inner.open(ReadySource::Signal);
        if let Some(handle) = self.timer.lock().unwrap_or_else(|e| e.into_inner()).take() {
            handle.abort();
        }
        opened
    }

    pub fn ready_source(&self) -> Option<ReadySource> {
        *self.inner.source.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.ready.subscribe()
    }

    /// Resolves once the gate is open.
    pub async fn wait_ready(&self) {
        let mut rx = self.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = rx.wait_for(|ready| *ready).await;
    }
}

impl ReadinessPort for ReadinessGate {
    fn is_ready(&self) -> bool {
        *self.inner.ready.borrow()
    }
}

impl Drop for ReadinessGate {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.lock().unwrap_or_else(|e| e.into_inner()).take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    async fn settle() {
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn gate_opens_after_timeout_without_signal() {
        tokio::time::pause();
        let gate = ReadinessGate::radio_with_timeout(Duration::from_secs(10));
        assert!(!gate.is_ready());

        advance(Duration::from_secs(9)).await;
        settle().await;
        assert!(!gate.is_ready());

        advance(Duration::from_secs(1)).await;
        settle().await;
        assert!(gate.is_ready());
        assert_eq!(gate.ready_source(), Some(ReadySource::Timeout));
    }

    #[tokio::test]
    async fn signal_before_timeout_wins_and_timeout_is_silent() {
        tokio::time::pause();
        let gate = ReadinessGate::radio();
        let mut rx = gate.subscribe();

        assert!(gate.mark_ready());
        assert!(gate.is_ready());
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        advance(RADIO_READY_TIMEOUT * 2).await;
        settle().await;

        assert!(!rx.has_changed().unwrap());
        assert_eq!(gate.ready_source(), Some(ReadySource::Signal));
    }

    #[tokio::test]
    async fn late_timeout_firing_finds_gate_open() {
        let gate = ReadinessGate::new("radio");
        gate.mark_ready();

        assert!(!gate.inner.open(ReadySource::Timeout));
        assert_eq!(gate.ready_source(), Some(ReadySource::Signal));
    }

    #[tokio::test]
    async fn second_signal_reports_no_change() {
        let gate = ReadinessGate::new("radio");
        assert!(gate.mark_ready());
        assert!(!gate.mark_ready());
    }

    #[tokio::test]
    async fn wait_ready_resolves_on_timeout() {
        tokio::time::pause();
        let gate = ReadinessGate::radio_with_timeout(Duration::from_secs(3));

        gate.wait_ready().await;

        assert_eq!(gate.ready_source(), Some(ReadySource::Timeout));
    }
}
