// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sensorhub-rs

//! Sensor endpoints - activation and rate negotiation for one handle

use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;

use super::{SensorDescriptor, SensorDevice, SensorEvent, SensorHandle, SensorType};
use crate::fusion::VirtualProcessor;

/// One registered sensor: owns activation, deactivation and sample-rate
/// negotiation for a single handle.
pub trait SensorEndpoint: Send + Sync {
    /// Identity record for this sensor.
    fn descriptor(&self) -> &SensorDescriptor;

    /// Bring the sensor (and anything it depends on) online.
    fn activate(&self) -> Result<()>;

    /// Release the sensor.
    fn deactivate(&self) -> Result<()>;

    /// Forward a sampling period request.
    fn set_rate(&self, period_ns: i64) -> Result<()>;

    /// Whether this endpoint synthesizes its events in software.
    fn is_virtual(&self) -> bool {
        false
    }

    /// Whether the endpoint's processor wants raw events of `ty`.
    /// Hardware endpoints consume nothing.
    fn consumes(&self, _ty: SensorType) -> bool {
        false
    }

    /// Feed one raw event to the endpoint's processor. Only meaningful for
    /// virtual endpoints; the hardware default is a no-op.
    fn process(&self, _event: &SensorEvent) -> Option<SensorEvent> {
        None
    }
}

/// Endpoint backed directly by one device-driver sensor.
pub struct HardwareEndpoint {
    descriptor: SensorDescriptor,
    device: Arc<dyn SensorDevice>,
}

impl HardwareEndpoint {
    /// Wrap a driver-provided descriptor.
    pub fn new(descriptor: SensorDescriptor, device: Arc<dyn SensorDevice>) -> Self {
        Self { descriptor, device }
    }
}

impl SensorEndpoint for HardwareEndpoint {
    fn descriptor(&self) -> &SensorDescriptor {
        &self.descriptor
    }

    fn activate(&self) -> Result<()> {
        self.device.set_active(self.descriptor.handle, true)
    }

    fn deactivate(&self) -> Result<()> {
        self.device.set_active(self.descriptor.handle, false)
    }

    fn set_rate(&self, period_ns: i64) -> Result<()> {
        self.device.set_delay(self.descriptor.handle, period_ns)
    }
}

/// Endpoint for a derived sensor: keeps its contributing hardware sensors
/// alive while active and services a stateful fusion processor.
pub struct VirtualEndpoint {
    descriptor: SensorDescriptor,
    device: Arc<dyn SensorDevice>,
    base_handles: Vec<SensorHandle>,
    consumed: Vec<SensorType>,
    processor: Mutex<Box<dyn VirtualProcessor>>,
}

impl VirtualEndpoint {
    /// `base_handles` are the hardware sensors whose raw feeds must stay
    /// alive while this virtual sensor has subscribers, even if no client
    /// subscribed to them directly.
    pub fn new(
        descriptor: SensorDescriptor,
        device: Arc<dyn SensorDevice>,
        base_handles: Vec<SensorHandle>,
        processor: Box<dyn VirtualProcessor>,
    ) -> Self {
        let consumed = processor.consumed_types().to_vec();
        Self {
            descriptor,
            device,
            base_handles,
            consumed,
            processor: Mutex::new(processor),
        }
    }
}

impl SensorEndpoint for VirtualEndpoint {
    fn descriptor(&self) -> &SensorDescriptor {
        &self.descriptor
    }

    fn activate(&self) -> Result<()> {
        for &handle in &self.base_handles {
            self.device.set_active(handle, true)?;
        }
        Ok(())
    }

    fn deactivate(&self) -> Result<()> {
        for &handle in &self.base_handles {
            self.device.set_active(handle, false)?;
        }
        Ok(())
    }

    fn set_rate(&self, period_ns: i64) -> Result<()> {
        for &handle in &self.base_handles {
            self.device.set_delay(handle, period_ns)?;
        }
        Ok(())
    }

    fn is_virtual(&self) -> bool {
        true
    }

    fn consumes(&self, ty: SensorType) -> bool {
        self.consumed.contains(&ty)
    }

    fn process(&self, event: &SensorEvent) -> Option<SensorEvent> {
        self.processor.lock().process(event)
    }
}
