//! OutGauge wire format: the fixed 112-byte dashboard telemetry packet.
//!
//! This crate defines the datagram layout consumed by OutGauge-style gauge
//! and dashboard applications. One UDP datagram carries exactly one packet;
//! receivers frame on the fixed size and parse by byte offset.
//!
//! # Layout
//!
//! All multi-byte fields are little-endian, with no padding between fields:
//!
//! | Field          | Offset | Type |
//! |----------------|--------|------|
//! | Time           | 0      | u32 (ms, monotonic) |
//! | CarName        | 4      | 32 bytes, NUL-padded |
//! | VehicleType    | 36     | i32  |
//! | Speed          | 40     | f32 (m/s) |
//! | VelocityX/Y/Z  | 44     | f32 ×3 |
//! | GForces        | 56     | f32 ×3 (vertical, sagittal, lateral) |
//! | RPM            | 68     | f32  |
//! | Gear           | 72     | i32 (-1=Reverse, 0=Neutral, 1=1st, …) |
//! | Throttle       | 76     | f32 (0-1) |
//! | Brake          | 80     | f32 (0-1) |
//! | Clutch         | 84     | f32 (0-1) |
//! | SteeringAngle  | 88     | f32  |
//! | Height         | 92     | f32  |
//! | Odometer       | 96     | f32  |
//! | ShowLights     | 100    | u32 bitmask (see [`dash_lights`]) |
//! | RPMMax         | 104    | f32  |
//! | SpeedMax       | 108    | f32  |
//!
//! The car name holds at most 31 bytes; byte 31 is always a NUL terminator.

#![deny(static_mut_refs)]

use anyhow::{Result, anyhow};
use std::borrow::Cow;

/// Exact size of one OutGauge datagram. Receivers rely on this for framing.
pub const PACKET_SIZE: usize = 112;

/// Width of the NUL-padded car name field.
pub const CAR_NAME_LEN: usize = 32;

/// Longest name the packet can carry; the last byte stays NUL.
pub const CAR_NAME_MAX: usize = CAR_NAME_LEN - 1;

/// Byte offset of every field within the packet.
pub mod off {
    pub const TIME: usize = 0;
    pub const CAR_NAME: usize = 4;
    pub const VEHICLE_TYPE: usize = 36;
    pub const SPEED: usize = 40;
    pub const VELOCITY_X: usize = 44;
    pub const VELOCITY_Y: usize = 48;
    pub const VELOCITY_Z: usize = 52;
    pub const GFORCE_VERTICAL: usize = 56;
    pub const GFORCE_SAGITTAL: usize = 60;
    pub const GFORCE_LATERAL: usize = 64;
    pub const RPM: usize = 68;
    pub const GEAR: usize = 72;
    pub const THROTTLE: usize = 76;
    pub const BRAKE: usize = 80;
    pub const CLUTCH: usize = 84;
    pub const STEERING_ANGLE: usize = 88;
    pub const HEIGHT: usize = 92;
    pub const ODOMETER: usize = 96;
    pub const SHOW_LIGHTS: usize = 100;
    pub const RPM_MAX: usize = 104;
    pub const SPEED_MAX: usize = 108;
}

/// Dashboard light bits for the `ShowLights` field, per the LFS `insim.txt`
/// convention shared by OutGauge producers.
pub mod dash_lights {
    /// Shift light.
    pub const SHIFT: u32 = 1 << 0;
    /// Full beam headlights.
    pub const FULL_BEAM: u32 = 1 << 1;
    /// Handbrake engaged.
    pub const HANDBRAKE: u32 = 1 << 2;
    /// Pit speed limiter.
    pub const PIT_SPEED: u32 = 1 << 3;
    /// Traction control active or switched off.
    pub const TC: u32 = 1 << 4;
    /// Left turn signal.
    pub const SIGNAL_L: u32 = 1 << 5;
    /// Right turn signal.
    pub const SIGNAL_R: u32 = 1 << 6;
    /// Shared turn signal (hazards).
    pub const SIGNAL_ANY: u32 = 1 << 7;
    /// Oil pressure warning.
    pub const OIL_WARN: u32 = 1 << 8;
    /// Battery warning.
    pub const BATTERY: u32 = 1 << 9;
    /// ABS active or switched off.
    pub const ABS: u32 = 1 << 10;
    /// Unassigned.
    pub const SPARE: u32 = 1 << 11;
}

/// One OutGauge telemetry record.
///
/// Constructed zero-filled via [`Default`], populated field by field, and
/// serialized with [`OutGaugePack::to_bytes`]. The struct carries semantic
/// values; the byte layout exists only in `to_bytes`/`from_bytes`, so the
/// wire image is identical on every platform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OutGaugePack {
    /// Milliseconds since the producer's monotonic epoch; lets receivers
    /// discard stale or out-of-order datagrams.
    pub time_ms: u32,
    /// NUL-padded vehicle name bytes. Use [`OutGaugePack::set_car_name`].
    pub car_name: [u8; CAR_NAME_LEN],
    /// Vehicle archetype discriminator.
    pub vehicle_type: i32,
    /// Forward speed magnitude, m/s.
    pub speed_ms: f32,
    /// World-frame velocity vector.
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub velocity_z: f32,
    /// Acceleration forces in vehicle-local axes.
    pub gforce_vertical: f32,
    pub gforce_sagittal: f32,
    pub gforce_lateral: f32,
    /// Engine speed; zero when the vehicle has no engine.
    pub rpm: f32,
    /// -1 reverse, 0 neutral, 1..N forward.
    pub gear: i32,
    /// Control positions, 0 to 1.
    pub throttle: f32,
    pub brake: f32,
    pub clutch: f32,
    pub steering_angle: f32,
    /// Height above the ground/water reference.
    pub height: f32,
    /// Cumulative distance travelled.
    pub odometer: f32,
    /// Dashboard indicator bitmask, see [`dash_lights`].
    pub show_lights: u32,
    /// Gauge full-scale hints for the receiving dashboard.
    pub rpm_max: f32,
    pub speed_max: f32,
}

impl OutGaugePack {
    /// Zero-filled packet, every byte defined.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `name` into the fixed name field, silently truncated to 31
    /// bytes. The remainder of the field is NUL-padded.
    pub fn set_car_name(&mut self, name: &str) {
        self.car_name = [0; CAR_NAME_LEN];
        let bytes = name.as_bytes();
        let len = bytes.len().min(CAR_NAME_MAX);
        if let (Some(dst), Some(src)) = (self.car_name.get_mut(..len), bytes.get(..len)) {
            dst.copy_from_slice(src);
        }
    }

    /// The stored name up to its NUL terminator.
    pub fn car_name(&self) -> Cow<'_, str> {
        let end = self
            .car_name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(CAR_NAME_LEN);
        String::from_utf8_lossy(self.car_name.get(..end).unwrap_or_default())
    }

    /// Serialize to the exact wire image: every field written little-endian
    /// at its documented offset.
    pub fn to_bytes(&self) -> [u8; PACKET_SIZE] {
        let mut buf = [0u8; PACKET_SIZE];
        put_u32_le(&mut buf, off::TIME, self.time_ms);
        put_bytes(&mut buf, off::CAR_NAME, &self.car_name);
        put_i32_le(&mut buf, off::VEHICLE_TYPE, self.vehicle_type);
        put_f32_le(&mut buf, off::SPEED, self.speed_ms);
        put_f32_le(&mut buf, off::VELOCITY_X, self.velocity_x);
        put_f32_le(&mut buf, off::VELOCITY_Y, self.velocity_y);
        put_f32_le(&mut buf, off::VELOCITY_Z, self.velocity_z);
        put_f32_le(&mut buf, off::GFORCE_VERTICAL, self.gforce_vertical);
        put_f32_le(&mut buf, off::GFORCE_SAGITTAL, self.gforce_sagittal);
        put_f32_le(&mut buf, off::GFORCE_LATERAL, self.gforce_lateral);
        put_f32_le(&mut buf, off::RPM, self.rpm);
        put_i32_le(&mut buf, off::GEAR, self.gear);
        put_f32_le(&mut buf, off::THROTTLE, self.throttle);
        put_f32_le(&mut buf, off::BRAKE, self.brake);
        put_f32_le(&mut buf, off::CLUTCH, self.clutch);
        put_f32_le(&mut buf, off::STEERING_ANGLE, self.steering_angle);
        put_f32_le(&mut buf, off::HEIGHT, self.height);
        put_f32_le(&mut buf, off::ODOMETER, self.odometer);
        put_u32_le(&mut buf, off::SHOW_LIGHTS, self.show_lights);
        put_f32_le(&mut buf, off::RPM_MAX, self.rpm_max);
        put_f32_le(&mut buf, off::SPEED_MAX, self.speed_max);
        buf
    }

    /// Parse a wire image produced by [`OutGaugePack::to_bytes`].
    ///
    /// Trailing bytes beyond [`PACKET_SIZE`] are ignored. Non-finite float
    /// fields are replaced by zero.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is shorter than [`PACKET_SIZE`].
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < PACKET_SIZE {
            return Err(anyhow!(
                "OutGauge packet too short: expected {PACKET_SIZE}, got {}",
                data.len()
            ));
        }

        let mut car_name = [0u8; CAR_NAME_LEN];
        if let Some(src) = data.get(off::CAR_NAME..off::CAR_NAME + CAR_NAME_LEN) {
            car_name.copy_from_slice(src);
        }

        Ok(Self {
            time_ms: read_u32_le(data, off::TIME).unwrap_or(0),
            car_name,
            vehicle_type: read_i32_le(data, off::VEHICLE_TYPE).unwrap_or(0),
            speed_ms: read_f32_le(data, off::SPEED).unwrap_or(0.0),
            velocity_x: read_f32_le(data, off::VELOCITY_X).unwrap_or(0.0),
            velocity_y: read_f32_le(data, off::VELOCITY_Y).unwrap_or(0.0),
            velocity_z: read_f32_le(data, off::VELOCITY_Z).unwrap_or(0.0),
            gforce_vertical: read_f32_le(data, off::GFORCE_VERTICAL).unwrap_or(0.0),
            gforce_sagittal: read_f32_le(data, off::GFORCE_SAGITTAL).unwrap_or(0.0),
            gforce_lateral: read_f32_le(data, off::GFORCE_LATERAL).unwrap_or(0.0),
            rpm: read_f32_le(data, off::RPM).unwrap_or(0.0),
            gear: read_i32_le(data, off::GEAR).unwrap_or(0),
            throttle: read_f32_le(data, off::THROTTLE).unwrap_or(0.0),
            brake: read_f32_le(data, off::BRAKE).unwrap_or(0.0),
            clutch: read_f32_le(data, off::CLUTCH).unwrap_or(0.0),
            steering_angle: read_f32_le(data, off::STEERING_ANGLE).unwrap_or(0.0),
            height: read_f32_le(data, off::HEIGHT).unwrap_or(0.0),
            odometer: read_f32_le(data, off::ODOMETER).unwrap_or(0.0),
            show_lights: read_u32_le(data, off::SHOW_LIGHTS).unwrap_or(0),
            rpm_max: read_f32_le(data, off::RPM_MAX).unwrap_or(0.0),
            speed_max: read_f32_le(data, off::SPEED_MAX).unwrap_or(0.0),
        })
    }
}

fn put_bytes(buf: &mut [u8; PACKET_SIZE], offset: usize, src: &[u8]) {
    if let Some(dst) = buf.get_mut(offset..offset + src.len()) {
        dst.copy_from_slice(src);
    }
}

fn put_f32_le(buf: &mut [u8; PACKET_SIZE], offset: usize, value: f32) {
    put_bytes(buf, offset, &value.to_le_bytes());
}

fn put_u32_le(buf: &mut [u8; PACKET_SIZE], offset: usize, value: u32) {
    put_bytes(buf, offset, &value.to_le_bytes());
}

fn put_i32_le(buf: &mut [u8; PACKET_SIZE], offset: usize, value: i32) {
    put_bytes(buf, offset, &value.to_le_bytes());
}

fn read_f32_le(data: &[u8], offset: usize) -> Option<f32> {
    data.get(offset..offset + 4)
        .and_then(|b| b.try_into().ok())
        .map(f32::from_le_bytes)
        .filter(|v| v.is_finite())
}

fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    data.get(offset..offset + 4)
        .and_then(|b| b.try_into().ok())
        .map(u32::from_le_bytes)
}

fn read_i32_le(data: &[u8], offset: usize) -> Option<i32> {
    data.get(offset..offset + 4)
        .and_then(|b| b.try_into().ok())
        .map(i32::from_le_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_packet_size_is_fixed() {
        let pack = OutGaugePack::new();
        assert_eq!(pack.to_bytes().len(), PACKET_SIZE);
    }

    #[test]
    fn test_default_packet_is_all_zero() {
        let bytes = OutGaugePack::default().to_bytes();
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_field_offsets_little_endian() -> TestResult {
        let mut pack = OutGaugePack::new();
        pack.time_ms = 0x0102_0304;
        pack.vehicle_type = 1;
        pack.speed_ms = 12.5;
        pack.gear = -1;
        pack.show_lights = dash_lights::HANDBRAKE | dash_lights::ABS;
        pack.speed_max = 55.0;
        let bytes = pack.to_bytes();

        assert_eq!(bytes.get(off::TIME..off::TIME + 4), Some(&[4, 3, 2, 1][..]));
        assert_eq!(
            bytes.get(off::VEHICLE_TYPE..off::VEHICLE_TYPE + 4),
            Some(&1i32.to_le_bytes()[..])
        );
        assert_eq!(
            bytes.get(off::SPEED..off::SPEED + 4),
            Some(&12.5f32.to_le_bytes()[..])
        );
        assert_eq!(
            bytes.get(off::GEAR..off::GEAR + 4),
            Some(&(-1i32).to_le_bytes()[..])
        );
        assert_eq!(
            bytes.get(off::SHOW_LIGHTS..off::SHOW_LIGHTS + 4),
            Some(&0x0404u32.to_le_bytes()[..])
        );
        assert_eq!(
            bytes.get(off::SPEED_MAX..off::SPEED_MAX + 4),
            Some(&55.0f32.to_le_bytes()[..])
        );
        Ok(())
    }

    #[test]
    fn test_car_name_is_nul_terminated_for_any_length() {
        for name in [String::new(), "a".repeat(31), "x".repeat(100)] {
            let mut pack = OutGaugePack::new();
            pack.set_car_name(&name);
            assert_eq!(pack.car_name.len(), CAR_NAME_LEN);
            assert_eq!(pack.car_name[CAR_NAME_MAX], 0, "byte 31 must stay NUL");
            let expected: String = name.chars().take(CAR_NAME_MAX).collect();
            assert_eq!(pack.car_name(), expected);
        }
    }

    #[test]
    fn test_car_name_shorter_than_field_is_nul_padded() {
        let mut pack = OutGaugePack::new();
        pack.set_car_name("Bus");
        assert_eq!(&pack.car_name[..4], b"Bus\0");
        assert!(pack.car_name[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_set_car_name_overwrites_longer_previous_name() {
        let mut pack = OutGaugePack::new();
        pack.set_car_name("Semi Truck Long Edition");
        pack.set_car_name("Kart");
        assert_eq!(pack.car_name(), "Kart");
    }

    #[test]
    fn test_roundtrip_preserves_fields() -> TestResult {
        let mut pack = OutGaugePack::new();
        pack.time_ms = 123_456;
        pack.set_car_name("Agora S");
        pack.vehicle_type = 2;
        pack.speed_ms = 27.8;
        pack.velocity_x = -3.0;
        pack.velocity_y = 0.5;
        pack.velocity_z = 27.6;
        pack.gforce_vertical = 0.98;
        pack.gforce_sagittal = -0.2;
        pack.gforce_lateral = 0.05;
        pack.rpm = 2150.0;
        pack.gear = 4;
        pack.throttle = 0.62;
        pack.brake = 0.0;
        pack.clutch = 0.1;
        pack.steering_angle = -0.3;
        pack.height = 1.2;
        pack.odometer = 18_234.7;
        pack.show_lights = dash_lights::FULL_BEAM | dash_lights::SIGNAL_L;
        pack.rpm_max = 3500.0;
        pack.speed_max = 33.0;

        let decoded = OutGaugePack::from_bytes(&pack.to_bytes())?;
        assert_eq!(decoded, pack);
        Ok(())
    }

    #[test]
    fn test_from_bytes_rejects_short_input() {
        assert!(OutGaugePack::from_bytes(&[]).is_err());
        assert!(OutGaugePack::from_bytes(&[0u8; PACKET_SIZE - 1]).is_err());
    }

    #[test]
    fn test_from_bytes_ignores_trailing_bytes() -> TestResult {
        let mut data = vec![0u8; PACKET_SIZE + 16];
        data[off::GEAR..off::GEAR + 4].copy_from_slice(&3i32.to_le_bytes());
        let decoded = OutGaugePack::from_bytes(&data)?;
        assert_eq!(decoded.gear, 3);
        Ok(())
    }

    #[test]
    fn test_from_bytes_zeroes_non_finite_floats() -> TestResult {
        let mut data = vec![0u8; PACKET_SIZE];
        data[off::RPM..off::RPM + 4].copy_from_slice(&f32::NAN.to_le_bytes());
        let decoded = OutGaugePack::from_bytes(&data)?;
        assert_eq!(decoded.rpm, 0.0);
        Ok(())
    }

    #[test]
    fn test_dash_light_bit_positions() {
        assert_eq!(dash_lights::FULL_BEAM, 2);
        assert_eq!(dash_lights::HANDBRAKE, 4);
        assert_eq!(dash_lights::TC, 16);
        assert_eq!(dash_lights::SIGNAL_L, 32);
        assert_eq!(dash_lights::SIGNAL_R, 64);
        assert_eq!(dash_lights::SIGNAL_ANY, 128);
        assert_eq!(dash_lights::BATTERY, 512);
        assert_eq!(dash_lights::ABS, 1024);
    }
}
