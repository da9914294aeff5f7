// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sensorhub-rs

//! Derived-sensor processors - synthesize virtual readings from raw streams

mod gravity;
mod linear_acceleration;
mod rotation_vector;

pub use gravity::GravityProcessor;
pub use linear_acceleration::LinearAccelerationProcessor;
pub use rotation_vector::RotationVectorProcessor;

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::sensors::{SensorEvent, SensorType};

/// Contract for derived-sensor processors.
///
/// Implementations are stateful (they retain the latest contributing
/// samples) and deterministic for a given input sequence; no state is
/// shared across instances. Returning `None` before every contributing
/// input has been seen is the expected warm-up behavior, not an error.
pub trait VirtualProcessor: Send {
    /// Physical sensor types this processor consumes.
    fn consumed_types(&self) -> &[SensorType];

    /// Feed one raw event of a consumed type. Emits a synthesized event
    /// stamped with the triggering event's timestamp once enough inputs
    /// have arrived.
    fn process(&mut self, event: &SensorEvent) -> Option<SensorEvent>;
}

/// Standard gravity, m/s².
pub(crate) const STANDARD_GRAVITY: f32 = 9.80665;

/// Smoothing factor for the first-order gravity low-pass filters.
pub(crate) const FILTER_ALPHA: f32 = 0.1;

/// First three payload slots as a vector.
pub(crate) fn vec3(event: &SensorEvent) -> Vector3<f32> {
    Vector3::new(event.data[0], event.data[1], event.data[2])
}

/// Device-to-world rotation from a gravity estimate and a geomagnetic
/// sample. Returns `None` near free fall or under heavy magnetic
/// interference, where the two vectors no longer span a basis.
pub(crate) fn rotation_from(
    gravity: Vector3<f32>,
    geomagnetic: Vector3<f32>,
) -> Option<Rotation3<f32>> {
    let h = geomagnetic.cross(&gravity);
    let norm_h = h.norm();
    if norm_h < 0.1 {
        return None;
    }
    let h = h / norm_h;
    let a = gravity.try_normalize(1e-6)?;
    let m = a.cross(&h);
    Some(Rotation3::from_matrix_unchecked(Matrix3::from_rows(&[
        h.transpose(),
        m.transpose(),
        a.transpose(),
    ])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_rejects_degenerate_inputs() {
        // free fall: no usable gravity direction
        assert!(rotation_from(Vector3::zeros(), Vector3::new(22.0, 6.0, -41.0)).is_none());
        // magnetometer aligned with gravity: no east axis
        assert!(rotation_from(Vector3::new(0.0, 0.0, 9.8), Vector3::new(0.0, 0.0, 48.0)).is_none());
    }

    #[test]
    fn rotation_from_level_device_is_identityish() {
        let rot = rotation_from(Vector3::new(0.0, 0.0, 9.81), Vector3::new(0.0, 30.0, -42.0))
            .expect("valid basis");
        // third row is the normalized gravity direction
        let up = rot.matrix().row(2);
        assert!((up[2] - 1.0).abs() < 1e-5);
        assert!(up[0].abs() < 1e-5 && up[1].abs() < 1e-5);
    }
}
