//! State-to-packet mapping: one [`VehicleSnapshot`] in, one fully defined
//! [`OutGaugePack`] out.

use opengauge_contracts::{EngineState, Powertrain, VehicleSnapshot};
use opengauge_protocol::{OutGaugePack, dash_lights};

/// m/s to knots, for the marine speed-over-water readout.
const MS_TO_KNOTS: f32 = 1.9438;

/// Name reported while no vehicle is under observation.
const PLACEHOLDER_NAME: &str = "None";

/// Build one telemetry packet from the current vehicle state.
///
/// Infallible: every input produces a fully defined packet. With no vehicle,
/// the packet carries the placeholder name, the time stamp, and zeros
/// everywhere else. Packet `Speed` is the absolute wheel speed for ground
/// vehicles and the knot-scaled heading projection for watercraft; velocity
/// components keep their sign in both cases.
pub fn encode(vehicle: Option<&VehicleSnapshot>, time_ms: u32) -> OutGaugePack {
    let mut pack = OutGaugePack::new();
    pack.time_ms = time_ms;

    let Some(vehicle) = vehicle else {
        pack.set_car_name(PLACEHOLDER_NAME);
        return pack;
    };

    pack.set_car_name(&vehicle.name);
    pack.vehicle_type = vehicle.class.as_i32();
    pack.speed_ms = vehicle.wheel_speed_ms.abs();
    pack.velocity_x = vehicle.velocity.x;
    pack.velocity_y = vehicle.velocity.y;
    pack.velocity_z = vehicle.velocity.z;
    pack.gforce_vertical = vehicle.g_forces.vertical;
    pack.gforce_sagittal = vehicle.g_forces.sagittal;
    pack.gforce_lateral = vehicle.g_forces.lateral;
    pack.height = vehicle.height_m;

    match &vehicle.powertrain {
        Powertrain::Engine(engine) => {
            pack.rpm = engine.rpm;
            pack.gear = engine.gear;
            pack.throttle = engine.throttle;
            pack.brake = engine.brake;
            pack.clutch = engine.clutch;
            pack.steering_angle = engine.steering_angle;
            pack.odometer = vehicle.odometer_m;
            pack.rpm_max = engine.max_rpm;
            pack.speed_max = engine.max_speed_ms;
            pack.show_lights = engine_lights(engine);
        }
        Powertrain::Marine(marine) => {
            pack.throttle = marine.throttle;
            pack.steering_angle = marine.rudder;
            // Speed over water: heading projection of the reference-node
            // velocity, in knots.
            pack.speed_ms = marine.heading.dot(marine.ref_velocity) * MS_TO_KNOTS;
        }
        Powertrain::None => {}
    }

    pack
}

fn engine_lights(engine: &EngineState) -> u32 {
    let mut lights = 0;
    if engine.parking_brake {
        lights |= dash_lights::HANDBRAKE;
    }
    if engine.headlights {
        lights |= dash_lights::FULL_BEAM;
    }
    // Key on while the engine is stalled reads as a battery warning.
    if engine.ignition_on && !engine.running {
        lights |= dash_lights::BATTERY;
    }
    if engine.signal_left {
        lights |= dash_lights::SIGNAL_L;
    }
    if engine.signal_right {
        lights |= dash_lights::SIGNAL_R;
    }
    if engine.signal_hazard {
        lights |= dash_lights::SIGNAL_ANY;
    }
    if engine.traction_control {
        lights |= dash_lights::TC;
    }
    if engine.abs_active {
        lights |= dash_lights::ABS;
    }
    lights
}
