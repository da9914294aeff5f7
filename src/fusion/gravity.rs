// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sensorhub-rs

//! Gravity vector synthesized from accelerometer and magnetometer streams

use nalgebra::Vector3;

use super::{rotation_from, vec3, VirtualProcessor, FILTER_ALPHA, STANDARD_GRAVITY};
use crate::sensors::{SensorEvent, SensorHandle, SensorType, EVENT_DATA_LEN};

const CONSUMED: &[SensorType] = &[SensorType::Accelerometer, SensorType::MagneticField];

/// Low-pass filters the accelerometer and projects the result through the
/// accel/mag orientation basis, emitting the device-frame gravity vector.
pub struct GravityProcessor {
    handle: SensorHandle,
    filtered_accel: Option<Vector3<f32>>,
    magnetic: Option<Vector3<f32>>,
}

impl GravityProcessor {
    /// `handle` is the virtual sensor handle assigned by the registry.
    pub fn new(handle: SensorHandle) -> Self {
        Self {
            handle,
            filtered_accel: None,
            magnetic: None,
        }
    }
}

impl VirtualProcessor for GravityProcessor {
    fn consumed_types(&self) -> &[SensorType] {
        CONSUMED
    }

    fn process(&mut self, event: &SensorEvent) -> Option<SensorEvent> {
        match event.sensor_type {
            SensorType::Accelerometer => {
                let accel = vec3(event);
                self.filtered_accel = Some(match self.filtered_accel {
                    Some(prev) => prev + (accel - prev) * FILTER_ALPHA,
                    None => accel,
                });
            }
            SensorType::MagneticField => self.magnetic = Some(vec3(event)),
            _ => return None,
        }

        let rot = rotation_from(self.filtered_accel?, self.magnetic?)?;
        let up = rot.matrix().row(2) * STANDARD_GRAVITY;

        let mut data = [0.0; EVENT_DATA_LEN];
        data[0] = up[0];
        data[1] = up[1];
        data[2] = up[2];
        Some(SensorEvent::new(
            self.handle,
            SensorType::Gravity,
            event.timestamp,
            data,
        ))
    }
}
