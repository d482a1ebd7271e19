//! The per-frame entry point: accumulator gating, encoding, sending.

use crate::config::OutGaugeConfig;
use crate::encoder::encode;
use crate::transport::OutGaugeTransport;
use opengauge_contracts::VehicleSnapshot;
use std::time::Instant;
use tracing::{info, warn};

/// One telemetry output destination: config, transport, send-interval
/// accumulator, and the monotonic epoch the packet `Time` field counts from.
///
/// Single-threaded by design — every method is called from the owning frame
/// loop, so no state here needs synchronization.
#[derive(Debug)]
pub struct OutGaugeFeed {
    config: OutGaugeConfig,
    transport: OutGaugeTransport,
    timer_s: f32,
    epoch: Instant,
}

impl OutGaugeFeed {
    pub fn new(config: OutGaugeConfig) -> Self {
        Self {
            config,
            transport: OutGaugeTransport::new(),
            timer_s: 0.0,
            epoch: Instant::now(),
        }
    }

    pub fn config(&self) -> &OutGaugeConfig {
        &self.config
    }

    /// Create the outbound socket. On failure the platform error is logged
    /// once and the feed stays non-working; `open` may be retried later, and
    /// until it succeeds `update` performs no work.
    pub fn open(&mut self) -> bool {
        match self.transport.open() {
            Ok(()) => {
                info!(
                    "OutGauge socket created, sending to {}:{} every {} ms",
                    self.config.address, self.config.port, self.config.interval_ms
                );
                true
            }
            Err(e) => {
                warn!("Failed to create OutGauge socket: {e}");
                false
            }
        }
    }

    pub fn is_working(&self) -> bool {
        self.transport.is_open()
    }

    /// Per-frame tick. Returns false immediately when the feed is not
    /// working. Otherwise accumulates `dt_seconds`; while the accumulator is
    /// below the configured interval this is a no-op returning true. When
    /// the interval is reached the timer resets, one packet is encoded from
    /// `vehicle` and sent to the configured destination.
    pub fn update(&mut self, dt_seconds: f32, vehicle: Option<&VehicleSnapshot>) -> bool {
        if !self.transport.is_open() {
            return false;
        }

        self.timer_s += dt_seconds;
        if self.timer_s < self.config.interval_ms * 0.001 {
            return true;
        }
        self.timer_s = 0.0;

        let pack = encode(vehicle, self.elapsed_ms());
        self.transport
            .send(&pack.to_bytes(), self.config.address, self.config.port);
        true
    }

    /// Release the socket. Idempotent; `update` returns false afterwards
    /// until a successful re-`open`.
    pub fn close(&mut self) {
        self.transport.close();
        self.timer_s = 0.0;
    }

    /// Milliseconds since feed construction, saturating at `u32::MAX`
    /// (~49 days), monotonically non-decreasing.
    fn elapsed_ms(&self) -> u32 {
        self.epoch
            .elapsed()
            .as_millis()
            .min(u128::from(u32::MAX)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_without_open_returns_false() {
        let mut feed = OutGaugeFeed::new(OutGaugeConfig::default());
        assert!(!feed.is_working());
        assert!(!feed.update(1.0, None));
    }

    #[test]
    fn test_close_before_open_is_safe() {
        let mut feed = OutGaugeFeed::new(OutGaugeConfig::default());
        feed.close();
        feed.close();
        assert!(!feed.is_working());
    }

    #[test]
    fn test_elapsed_ms_is_monotonic() {
        let feed = OutGaugeFeed::new(OutGaugeConfig::default());
        let first = feed.elapsed_ms();
        let second = feed.elapsed_ms();
        assert!(second >= first);
    }
}
