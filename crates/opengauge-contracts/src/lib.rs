//! Vehicle snapshot contracts for the OpenGauge telemetry feed.
//!
//! The simulation hands the encoder a read-only [`VehicleSnapshot`] of the
//! currently observed vehicle each frame. Propulsion is a tagged
//! [`Powertrain`] variant: a vehicle has an engine/drivetrain, a marine
//! propulsion unit, or neither, and the encoder dispatches exhaustively on
//! that, so engine-only packet fields can never be populated from a boat and
//! vice versa.

#![deny(static_mut_refs)]

use serde::{Deserialize, Serialize};

/// World-frame vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Dot product; used to project a velocity onto a heading direction.
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

/// Vehicle archetype, reported in the packet's `VehicleType` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VehicleClass {
    /// Ground vehicle.
    #[default]
    Land,
    /// Watercraft.
    Marine,
    /// Anything else (trailers, loads, aircraft).
    Other,
}

impl VehicleClass {
    /// Wire discriminator value.
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Land => 0,
            Self::Marine => 1,
            Self::Other => 2,
        }
    }
}

/// Acceleration forces in vehicle-local axes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GForces {
    pub vertical: f32,
    pub sagittal: f32,
    pub lateral: f32,
}

/// Engine/drivetrain readout plus the dashboard indicator states that feed
/// the `ShowLights` bitmask.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineState {
    /// Current engine speed, rev/min.
    pub rpm: f32,
    /// Redline hint for gauge scaling.
    pub max_rpm: f32,
    /// -1 reverse, 0 neutral, 1..N forward.
    pub gear: i32,
    /// Accelerator input, 0 to 1.
    pub throttle: f32,
    /// Brake input, 0 to 1.
    pub brake: f32,
    /// Clutch position, 0 to 1.
    pub clutch: f32,
    /// Steering deflection; sign follows steering direction.
    pub steering_angle: f32,
    /// Speedometer full-scale hint, m/s.
    pub max_speed_ms: f32,
    /// Parking brake engaged.
    pub parking_brake: bool,
    /// Headlights visible.
    pub headlights: bool,
    /// Ignition has contact (key on).
    pub ignition_on: bool,
    /// Engine is actually turning.
    pub running: bool,
    pub signal_left: bool,
    pub signal_right: bool,
    pub signal_hazard: bool,
    pub traction_control: bool,
    pub abs_active: bool,
}

/// Primary marine propulsion unit readout (screw plus rudder).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarineState {
    /// Screw throttle, 0 to 1.
    pub throttle: f32,
    /// Rudder deflection; sign follows steering direction.
    pub rudder: f32,
    /// Heading direction used for the speed-over-water projection.
    pub heading: Vec3,
    /// World velocity at the hull's designated reference node.
    pub ref_velocity: Vec3,
}

/// Mutually exclusive propulsion capability of a vehicle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Powertrain {
    /// Engine plus drivetrain (ground vehicles).
    Engine(EngineState),
    /// Screw/rudder propulsion (watercraft without an engine readout).
    Marine(MarineState),
    /// No propulsion readout; the vehicle is reported present but inert.
    #[default]
    None,
}

/// Read-only view of the currently observed vehicle, taken once per frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    /// Human-readable vehicle name.
    pub name: String,
    pub class: VehicleClass,
    /// Signed wheel-speed magnitude, m/s; negative while rolling backwards.
    pub wheel_speed_ms: f32,
    /// World-frame velocity.
    pub velocity: Vec3,
    pub g_forces: GForces,
    /// Height above the ground/water reference, m.
    pub height_m: f32,
    /// Total distance travelled, m.
    pub odometer_m: f32,
    pub powertrain: Powertrain,
}
