// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sensorhub-rs

//! Sensor registry - handle to descriptor and endpoint mapping

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::sensors::{SensorDescriptor, SensorEndpoint, SensorHandle};

/// Owns the mapping from handle to descriptor and to the endpoint that
/// services it. Populated once at startup; no removal or re-registration
/// at runtime.
pub struct SensorRegistry {
    sensors: Vec<SensorDescriptor>,
    endpoints: HashMap<SensorHandle, Arc<dyn SensorEndpoint>>,
    virtual_count: usize,
}

impl SensorRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            sensors: Vec::new(),
            endpoints: HashMap::new(),
            virtual_count: 0,
        }
    }

    /// Register one sensor, hardware or virtual.
    pub fn register(&mut self, endpoint: Arc<dyn SensorEndpoint>) {
        let descriptor = endpoint.descriptor().clone();
        debug!(
            "registered sensor {} (handle=0x{:08x}, type={:?}, virtual={})",
            descriptor.name,
            descriptor.handle,
            descriptor.sensor_type,
            endpoint.is_virtual()
        );
        if endpoint.is_virtual() {
            self.virtual_count += 1;
        }
        self.endpoints.insert(descriptor.handle, endpoint);
        self.sensors.push(descriptor);
    }

    /// Endpoint servicing `handle`.
    pub fn lookup(&self, handle: SensorHandle) -> Option<&Arc<dyn SensorEndpoint>> {
        self.endpoints.get(&handle)
    }

    /// Descriptors in registration order.
    pub fn list(&self) -> &[SensorDescriptor] {
        &self.sensors
    }

    /// Number of registered virtual sensors.
    pub fn virtual_count(&self) -> usize {
        self.virtual_count
    }

    /// Sensor name for diagnostics. Linear scan; off the hot path.
    pub fn name_of(&self, handle: SensorHandle) -> &str {
        self.sensors
            .iter()
            .find(|s| s.handle == handle)
            .map(|s| s.name.as_str())
            .unwrap_or("unknown")
    }
}

impl Default for SensorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::SensorType;
    use anyhow::Result;

    struct StubEndpoint {
        descriptor: SensorDescriptor,
        virt: bool,
    }

    impl SensorEndpoint for StubEndpoint {
        fn descriptor(&self) -> &SensorDescriptor {
            &self.descriptor
        }
        fn activate(&self) -> Result<()> {
            Ok(())
        }
        fn deactivate(&self) -> Result<()> {
            Ok(())
        }
        fn set_rate(&self, _period_ns: i64) -> Result<()> {
            Ok(())
        }
        fn is_virtual(&self) -> bool {
            self.virt
        }
    }

    fn stub(handle: SensorHandle, virt: bool) -> Arc<dyn SensorEndpoint> {
        Arc::new(StubEndpoint {
            descriptor: SensorDescriptor {
                name: format!("sensor-{handle}"),
                vendor: "test".to_string(),
                version: 1,
                handle,
                sensor_type: SensorType::Accelerometer,
                min_period_ns: 0,
            },
            virt,
        })
    }

    #[test]
    fn tracks_registration_order_and_virtual_count() {
        let mut registry = SensorRegistry::new();
        registry.register(stub(1, false));
        registry.register(stub(2, true));

        let handles: Vec<_> = registry.list().iter().map(|s| s.handle).collect();
        assert_eq!(handles, vec![1, 2]);
        assert_eq!(registry.virtual_count(), 1);
        assert!(registry.lookup(2).is_some());
        assert!(registry.lookup(3).is_none());
    }

    #[test]
    fn name_lookup_falls_back_to_unknown() {
        let mut registry = SensorRegistry::new();
        registry.register(stub(1, false));
        assert_eq!(registry.name_of(1), "sensor-1");
        assert_eq!(registry.name_of(9), "unknown");
    }
}
