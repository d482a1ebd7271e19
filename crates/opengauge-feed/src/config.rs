//! Destination and cadence settings for the OutGauge feed.

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Where and how often to send telemetry datagrams.
///
/// Sourced from the owning application's configuration system; the feed
/// never reads settings through globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutGaugeConfig {
    /// Dashboard host, dotted-decimal IPv4.
    pub address: Ipv4Addr,
    /// Dashboard UDP port.
    pub port: u16,
    /// Minimum milliseconds between datagrams. Decouples telemetry cadence
    /// from the simulation frame rate.
    pub interval_ms: f32,
}

impl Default for OutGaugeConfig {
    fn default() -> Self {
        Self {
            address: Ipv4Addr::new(192, 168, 1, 100),
            port: 1337,
            interval_ms: 100.0,
        }
    }
}
