//! Rate-limited OutGauge UDP telemetry feed.
//!
//! [`OutGaugeFeed`] is a one-way, fire-and-forget emitter: once per frame
//! the owning simulation calls [`OutGaugeFeed::update`] with the elapsed
//! time and the currently observed vehicle (or none). An internal
//! accumulator gates work to the configured interval; when the gate opens,
//! the encoder serializes one fixed 112-byte OutGauge packet and the
//! transport sends it as a single UDP datagram to the configured dashboard
//! endpoint. There is no handshake, retry, or inbound channel — a missed
//! datagram is indistinguishable from a lost one, and the receiving
//! dashboard is expected to tolerate dropped frames.
//!
//! # Usage
//!
//! ```rust,no_run
//! use opengauge_feed::{OutGaugeConfig, OutGaugeFeed};
//!
//! let mut feed = OutGaugeFeed::new(OutGaugeConfig::default());
//! feed.open();
//! // per frame:
//! feed.update(0.016, None);
//! // at shutdown:
//! feed.close();
//! ```

#![deny(static_mut_refs)]

pub mod config;
pub mod encoder;
pub mod feed;
pub mod transport;

pub use config::OutGaugeConfig;
pub use encoder::encode;
pub use feed::OutGaugeFeed;
pub use transport::OutGaugeTransport;

pub use opengauge_contracts::{
    EngineState, GForces, MarineState, Powertrain, Vec3, VehicleClass, VehicleSnapshot,
};
pub use opengauge_protocol::{OutGaugePack, PACKET_SIZE, dash_lights};
