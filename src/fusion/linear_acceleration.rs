// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sensorhub-rs

//! Linear acceleration synthesized by removing gravity from the accelerometer

use nalgebra::Vector3;

use super::{vec3, VirtualProcessor, FILTER_ALPHA};
use crate::sensors::{SensorEvent, SensorHandle, SensorType, EVENT_DATA_LEN};

const CONSUMED: &[SensorType] = &[SensorType::Accelerometer];

/// Subtracts a low-pass gravity estimate from each accelerometer sample.
///
/// The first sample only seeds the filter; emission starts with the second.
pub struct LinearAccelerationProcessor {
    handle: SensorHandle,
    gravity_estimate: Option<Vector3<f32>>,
}

impl LinearAccelerationProcessor {
    /// `handle` is the virtual sensor handle assigned by the registry.
    pub fn new(handle: SensorHandle) -> Self {
        Self {
            handle,
            gravity_estimate: None,
        }
    }
}

impl VirtualProcessor for LinearAccelerationProcessor {
    fn consumed_types(&self) -> &[SensorType] {
        CONSUMED
    }

    fn process(&mut self, event: &SensorEvent) -> Option<SensorEvent> {
        if event.sensor_type != SensorType::Accelerometer {
            return None;
        }
        let accel = vec3(event);
        let Some(prev) = self.gravity_estimate else {
            self.gravity_estimate = Some(accel);
            return None;
        };

        let estimate = prev + (accel - prev) * FILTER_ALPHA;
        self.gravity_estimate = Some(estimate);
        let linear = accel - estimate;

        let mut data = [0.0; EVENT_DATA_LEN];
        data[0] = linear.x;
        data[1] = linear.y;
        data[2] = linear.z;
        Some(SensorEvent::new(
            self.handle,
            SensorType::LinearAcceleration,
            event.timestamp,
            data,
        ))
    }
}
