//! Timed download simulation.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::debug;

use llamapocket_core::ports::{DownloadClient, TransferError};

/// A [`DownloadClient`] that simulates a transfer instead of moving bytes.
///
/// Ticks through `steps` evenly spaced progress fractions, sleeping
/// `tick_interval` before each one, and ends at exactly `1.0`. The default
/// pacing (20 steps, 200 ms apart) mirrors a small-model download well
/// enough for UI work.
///
/// Cancellation needs no support here: the caller drops the transfer
/// future mid-sleep and the simulation simply stops.
#[derive(Clone, Debug)]
pub struct SimulatedDownloadClient {
    steps: u32,
    tick_interval: Duration,
}

impl SimulatedDownloadClient {
    /// Create a simulation with explicit pacing.
    ///
    /// `steps` is clamped to at least 1 so the terminal `1.0` tick is
    /// always produced.
    #[must_use]
    pub const fn new(steps: u32, tick_interval: Duration) -> Self {
        Self {
            steps,
            tick_interval,
        }
    }

    /// A simulation that completes in a single immediate tick, as a
    /// bundled model would.
    #[must_use]
    pub const fn instant() -> Self {
        Self::new(1, Duration::ZERO)
    }
}

impl Default for SimulatedDownloadClient {
    fn default() -> Self {
        Self::new(20, Duration::from_millis(200))
    }
}

#[async_trait]
impl DownloadClient for SimulatedDownloadClient {
    async fn transfer(
        &self,
        source: &str,
        progress: watch::Sender<f64>,
    ) -> Result<(), TransferError> {
        if source.trim().is_empty() {
            return Err(TransferError::invalid_source("empty download source"));
        }

        let steps = self.steps.max(1);
        debug!(source, steps, "starting simulated transfer");
        for step in 1..=steps {
            tokio::time::sleep(self.tick_interval).await;
            let _ = progress.send(f64::from(step) / f64::from(steps));
        }
        debug!(source, "simulated transfer complete");
        Ok(())
    }
}
