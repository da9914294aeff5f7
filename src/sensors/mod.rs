// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sensorhub-rs

//! Sensor identity records, event types, and the device-layer contract

mod device;
mod endpoint;
mod simulator;

pub use device::SensorDevice;
pub use endpoint::{HardwareEndpoint, SensorEndpoint, VirtualEndpoint};
pub use simulator::SimulatedDevice;

use serde::{Deserialize, Serialize};

/// Stable integer key identifying one sensor (physical or virtual) for the
/// life of the service. Used as the join key between registry, activation
/// table, cache, and subscriptions.
pub type SensorHandle = i32;

/// Format version stamped on every live event. A cache slot whose version
/// does not match has never seen an event and must not be replayed.
pub const EVENT_FORMAT_VERSION: u32 = 1;

/// Number of payload slots in one event.
pub const EVENT_DATA_LEN: usize = 6;

/// Sensor types known to the hub.
///
/// Discriminants are stable and small enough that `bit()` can build the
/// type bitmask used for the virtual-sensor exclusion check at startup.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorType {
    /// 3-axis accelerometer, m/s²
    Accelerometer = 1,
    /// 3-axis magnetometer, µT
    MagneticField = 2,
    /// Legacy orientation angles
    Orientation = 3,
    /// 3-axis gyroscope, rad/s
    Gyroscope = 4,
    /// Ambient light, lux
    Light = 5,
    /// Barometric pressure, hPa
    Pressure = 6,
    /// Ambient temperature, °C
    Temperature = 7,
    /// Proximity, cm
    Proximity = 8,
    /// Gravity vector, m/s² (synthesized when not native)
    Gravity = 9,
    /// Acceleration minus gravity, m/s² (synthesized when not native)
    LinearAcceleration = 10,
    /// Orientation quaternion (synthesized when not native)
    RotationVector = 11,
}

impl SensorType {
    /// Bitmask position for this type.
    pub fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

/// Immutable identity record for one sensor. Exposed verbatim to clients;
/// never mutated after registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorDescriptor {
    /// Human-readable sensor name
    pub name: String,
    /// Vendor string
    pub vendor: String,
    /// Driver or processor revision
    pub version: i32,
    /// Unique handle, stable for the process lifetime
    pub handle: SensorHandle,
    /// Sensor type
    pub sensor_type: SensorType,
    /// Fastest supported sampling period, nanoseconds
    pub min_period_ns: i64,
}

/// A single sensor event. The ordering key is `timestamp`; events with the
/// same handle are totally ordered by arrival within a poll batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorEvent {
    /// Handle of the sensor that produced this event
    pub handle: SensorHandle,
    /// Type of the producing sensor
    pub sensor_type: SensorType,
    /// Monotonic nanoseconds
    pub timestamp: i64,
    /// Fixed-size payload; unused slots are zero
    pub data: [f32; EVENT_DATA_LEN],
    /// Accuracy/status byte as reported by the driver
    pub status: u8,
    /// Event format version, `EVENT_FORMAT_VERSION` for live events
    pub version: u32,
}

impl SensorEvent {
    /// Build a live event with the current format version.
    pub fn new(
        handle: SensorHandle,
        sensor_type: SensorType,
        timestamp: i64,
        data: [f32; EVENT_DATA_LEN],
    ) -> Self {
        Self {
            handle,
            sensor_type,
            timestamp,
            data,
            status: 0,
            version: EVENT_FORMAT_VERSION,
        }
    }

    /// Zero-valued placeholder occupying a cache slot until the first real
    /// event for `handle` is observed. Never valid.
    pub fn sentinel(handle: SensorHandle, sensor_type: SensorType) -> Self {
        Self {
            handle,
            sensor_type,
            timestamp: 0,
            data: [0.0; EVENT_DATA_LEN],
            status: 0,
            version: 0,
        }
    }

    /// Whether this event carries the live format version.
    pub fn is_valid(&self) -> bool {
        self.version == EVENT_FORMAT_VERSION
    }
}
