// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sensorhub-rs

//! Orientation quaternion synthesized from accelerometer and magnetometer

use nalgebra::{UnitQuaternion, Vector3};

use super::{rotation_from, vec3, VirtualProcessor};
use crate::sensors::{SensorEvent, SensorHandle, SensorType, EVENT_DATA_LEN};

const CONSUMED: &[SensorType] = &[SensorType::Accelerometer, SensorType::MagneticField];

/// Emits the device orientation as a quaternion `[x, y, z, w]` derived from
/// the latest accelerometer and magnetometer samples.
pub struct RotationVectorProcessor {
    handle: SensorHandle,
    accel: Option<Vector3<f32>>,
    magnetic: Option<Vector3<f32>>,
}

impl RotationVectorProcessor {
    /// `handle` is the virtual sensor handle assigned by the registry.
    pub fn new(handle: SensorHandle) -> Self {
        Self {
            handle,
            accel: None,
            magnetic: None,
        }
    }
}

impl VirtualProcessor for RotationVectorProcessor {
    fn consumed_types(&self) -> &[SensorType] {
        CONSUMED
    }

    fn process(&mut self, event: &SensorEvent) -> Option<SensorEvent> {
        match event.sensor_type {
            SensorType::Accelerometer => self.accel = Some(vec3(event)),
            SensorType::MagneticField => self.magnetic = Some(vec3(event)),
            _ => return None,
        }

        let rot = rotation_from(self.accel?, self.magnetic?)?;
        let quat = UnitQuaternion::from_rotation_matrix(&rot).into_inner().coords;

        let mut data = [0.0; EVENT_DATA_LEN];
        data[0] = quat.x;
        data[1] = quat.y;
        data[2] = quat.z;
        data[3] = quat.w;
        Some(SensorEvent::new(
            self.handle,
            SensorType::RotationVector,
            event.timestamp,
            data,
        ))
    }
}
