// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sensorhub-rs

//! The hub service: registration and the enable/disable protocol

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use super::cache::LastValueCache;
use super::connection::{ConnectionId, SubscriberConnection};
use super::registry::SensorRegistry;
use crate::config::HubConfig;
use crate::error::HubError;
use crate::fusion::{
    GravityProcessor, LinearAccelerationProcessor, RotationVectorProcessor, VirtualProcessor,
};
use crate::sensors::{
    HardwareEndpoint, SensorDescriptor, SensorDevice, SensorEndpoint, SensorHandle, SensorType,
    VirtualEndpoint,
};

/// Bookkeeping for one active handle: the connections currently using it.
/// A record with zero connections is deleted immediately, deactivating the
/// underlying endpoint.
struct ActivationRecord {
    connections: Vec<ConnectionId>,
}

impl ActivationRecord {
    fn new(first: ConnectionId) -> Self {
        Self {
            connections: vec![first],
        }
    }

    /// True if the connection was not already present.
    fn add_connection(&mut self, id: ConnectionId) -> bool {
        if self.connections.contains(&id) {
            return false;
        }
        self.connections.push(id);
        true
    }

    /// Remove `id` if present; true if the record is now empty.
    fn remove_connection(&mut self, id: ConnectionId) -> bool {
        self.connections.retain(|&c| c != id);
        self.connections.is_empty()
    }

    fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

/// Mutable control-plane state behind the hub's single coarse lock.
pub(super) struct HubState {
    pub(super) active_sensors: HashMap<SensorHandle, ActivationRecord>,
    pub(super) active_virtual: HashSet<SensorHandle>,
    pub(super) active_connections: HashMap<ConnectionId, Arc<SubscriberConnection>>,
    pub(super) last_values: LastValueCache,
}

/// The sensor event hub.
///
/// Constructed once at startup against a device layer; `run` drives the
/// polling loop while control operations are invoked concurrently from
/// arbitrary caller threads.
pub struct SensorHub {
    pub(super) config: HubConfig,
    pub(super) device: Arc<dyn SensorDevice>,
    pub(super) registry: SensorRegistry,
    pub(super) initialized: bool,
    pub(super) state: Mutex<HubState>,
    next_connection_id: AtomicU64,
}

impl SensorHub {
    /// Build the hub: enumerate hardware sensors (reusing driver handles),
    /// then register one virtual sensor per derived type the hardware does
    /// not natively provide, checked by type-bitmask exclusion.
    ///
    /// A device that failed init still yields a hub; every control
    /// operation on it returns `NotInitialized`.
    pub fn new(config: HubConfig, device: Arc<dyn SensorDevice>) -> Arc<Self> {
        let mut registry = SensorRegistry::new();
        let mut last_values = LastValueCache::with_capacity(0);

        let initialized = match device.init_status() {
            Ok(()) => true,
            Err(e) => {
                error!("sensor device failed to initialize: {e:#}");
                false
            }
        };

        if initialized {
            let hardware = device.list_sensors();
            let mut needs = SensorType::Gravity.bit()
                | SensorType::LinearAcceleration.bit()
                | SensorType::RotationVector.bit();
            for descriptor in &hardware {
                needs &= !descriptor.sensor_type.bit();
            }
            let mut next_handle = hardware.iter().map(|s| s.handle).max().unwrap_or(0) + 1;

            last_values = LastValueCache::with_capacity(hardware.len() + 3);
            for descriptor in &hardware {
                last_values.insert_sentinel(descriptor.handle, descriptor.sensor_type);
                registry.register(Arc::new(HardwareEndpoint::new(
                    descriptor.clone(),
                    device.clone(),
                )));
            }

            for ty in [
                SensorType::Gravity,
                SensorType::LinearAcceleration,
                SensorType::RotationVector,
            ] {
                if needs & ty.bit() == 0 {
                    continue;
                }
                match Self::build_virtual(ty, next_handle, &hardware, &device) {
                    Some(endpoint) => {
                        last_values.insert_sentinel(next_handle, ty);
                        registry.register(endpoint);
                        next_handle += 1;
                    }
                    None => warn!(
                        "skipping virtual sensor {ty:?}: contributing hardware sensors missing"
                    ),
                }
            }
            info!(
                "sensor hub ready: {} sensors ({} virtual)",
                registry.list().len(),
                registry.virtual_count()
            );
        }

        Arc::new(Self {
            config,
            device,
            registry,
            initialized,
            state: Mutex::new(HubState {
                active_sensors: HashMap::new(),
                active_virtual: HashSet::new(),
                active_connections: HashMap::new(),
                last_values,
            }),
            next_connection_id: AtomicU64::new(1),
        })
    }

    fn build_virtual(
        ty: SensorType,
        handle: SensorHandle,
        hardware: &[SensorDescriptor],
        device: &Arc<dyn SensorDevice>,
    ) -> Option<Arc<dyn SensorEndpoint>> {
        let find = |wanted: SensorType| {
            hardware
                .iter()
                .find(|s| s.sensor_type == wanted)
                .map(|s| s.handle)
        };
        let accel = find(SensorType::Accelerometer)?;

        let (name, base_handles, processor): (_, _, Box<dyn VirtualProcessor>) = match ty {
            SensorType::Gravity => {
                let mag = find(SensorType::MagneticField)?;
                (
                    "Gravity",
                    vec![accel, mag],
                    Box::new(GravityProcessor::new(handle)),
                )
            }
            SensorType::LinearAcceleration => (
                "Linear Acceleration",
                vec![accel],
                Box::new(LinearAccelerationProcessor::new(handle)),
            ),
            SensorType::RotationVector => {
                let mag = find(SensorType::MagneticField)?;
                (
                    "Rotation Vector",
                    vec![accel, mag],
                    Box::new(RotationVectorProcessor::new(handle)),
                )
            }
            _ => return None,
        };

        let min_period_ns = hardware
            .iter()
            .find(|s| s.handle == accel)
            .map(|s| s.min_period_ns)
            .unwrap_or(0);
        let descriptor = SensorDescriptor {
            name: name.to_string(),
            vendor: "sensorhub".to_string(),
            version: 1,
            handle,
            sensor_type: ty,
            min_period_ns,
        };
        Some(Arc::new(VirtualEndpoint::new(
            descriptor,
            device.clone(),
            base_handles,
            processor,
        )))
    }

    /// Descriptors in registration order, as exposed to clients.
    pub fn list_sensors(&self) -> Vec<SensorDescriptor> {
        self.registry.list().to_vec()
    }

    /// Create a new subscriber connection for a client session. The caller
    /// must invoke `close` on it exactly once at teardown.
    pub fn create_connection(self: &Arc<Self>) -> Arc<SubscriberConnection> {
        let id = self.next_connection_id.fetch_add(1, Ordering::Relaxed);
        debug!("created connection {id}");
        SubscriberConnection::new(id, Arc::downgrade(self), self.config.connection_queue_depth)
    }

    /// Subscribe `connection` to `handle`.
    ///
    /// The first subscriber activates the underlying endpoint (and, for a
    /// virtual sensor, its contributing raw feeds). A connection joining an
    /// already-active handle synchronously receives the handle's last
    /// cached event, when one has been seen.
    pub fn enable(
        &self,
        connection: &Arc<SubscriberConnection>,
        handle: SensorHandle,
    ) -> Result<(), HubError> {
        if !self.initialized {
            return Err(HubError::NotInitialized);
        }
        let endpoint = self
            .registry
            .lookup(handle)
            .ok_or(HubError::InvalidHandle(handle))?;

        let mut guard = self.state.lock();
        let HubState {
            active_sensors,
            active_virtual,
            active_connections,
            last_values,
        } = &mut *guard;

        match active_sensors.entry(handle) {
            Entry::Vacant(slot) => {
                endpoint.activate().map_err(HubError::Device)?;
                slot.insert(ActivationRecord::new(connection.id()));
                connection.add_handle(handle);
                if endpoint.is_virtual() {
                    active_virtual.insert(handle);
                }
                info!(
                    "sensor {} activated by connection {}",
                    self.registry.name_of(handle),
                    connection.id()
                );
            }
            Entry::Occupied(mut slot) => {
                let newly_joined = slot.get_mut().add_connection(connection.id());
                // the handle must be in the connection's set before the
                // replay below, or send_events filters the event out
                connection.add_handle(handle);
                if newly_joined {
                    // the sensor is already live; replay the last known
                    // value so the new subscriber does not wait for the
                    // next poll
                    if let Some(event) = last_values.get(handle) {
                        if event.is_valid() {
                            connection.send_events(std::slice::from_ref(event));
                        }
                    }
                }
            }
        }

        active_connections
            .entry(connection.id())
            .or_insert_with(|| connection.clone());
        Ok(())
    }

    /// Remove `connection`'s subscription to `handle`. Succeeds as a no-op
    /// when the handle has no activation record. The last subscriber
    /// leaving deactivates the endpoint.
    pub fn disable(
        &self,
        connection: &Arc<SubscriberConnection>,
        handle: SensorHandle,
    ) -> Result<(), HubError> {
        if !self.initialized {
            return Err(HubError::NotInitialized);
        }
        let mut guard = self.state.lock();
        let HubState {
            active_sensors,
            active_virtual,
            active_connections,
            ..
        } = &mut *guard;

        let Some(record) = active_sensors.get_mut(&handle) else {
            return Ok(());
        };

        connection.remove_handle(handle);
        if !connection.has_any_handle() {
            active_connections.remove(&connection.id());
        }

        if record.remove_connection(connection.id()) {
            active_sensors.remove(&handle);
            active_virtual.remove(&handle);
            if let Some(endpoint) = self.registry.lookup(handle) {
                endpoint.deactivate().map_err(HubError::Device)?;
            }
            info!("sensor {} deactivated", self.registry.name_of(handle));
        }
        Ok(())
    }

    /// Request a sampling period for `handle` on behalf of `connection`.
    /// Periods are clamped to the configured minimum; the endpoint may
    /// aggregate requests from several connections (fastest wins).
    pub fn set_event_rate(
        &self,
        _connection: &Arc<SubscriberConnection>,
        handle: SensorHandle,
        period_ns: i64,
    ) -> Result<(), HubError> {
        if !self.initialized {
            return Err(HubError::NotInitialized);
        }
        if period_ns < 0 {
            return Err(HubError::InvalidArgument(format!(
                "negative event period {period_ns}"
            )));
        }
        let endpoint = self
            .registry
            .lookup(handle)
            .ok_or(HubError::InvalidHandle(handle))?;

        let period_ns = period_ns.max(self.config.min_event_period_ns);
        let _guard = self.state.lock(); // serialize with other control ops
        endpoint.set_rate(period_ns).map_err(HubError::Device)
    }

    /// Disable everything `connection` still subscribes to and drop it from
    /// the active set. Invoked once from `SubscriberConnection::close`.
    pub(crate) fn cleanup_connection(&self, connection: &SubscriberConnection) {
        let mut guard = self.state.lock();
        let HubState {
            active_sensors,
            active_virtual,
            active_connections,
            ..
        } = &mut *guard;

        active_sensors.retain(|&handle, record| {
            if record.remove_connection(connection.id()) {
                active_virtual.remove(&handle);
                if let Some(endpoint) = self.registry.lookup(handle) {
                    if let Err(e) = endpoint.deactivate() {
                        warn!(
                            "failed to deactivate sensor {}: {e:#}",
                            self.registry.name_of(handle)
                        );
                    }
                }
                false
            } else {
                true
            }
        });
        active_connections.remove(&connection.id());
        debug!("cleaned up connection {}", connection.id());
    }

    /// Number of handles with at least one subscriber.
    pub fn active_sensor_count(&self) -> usize {
        self.state.lock().active_sensors.len()
    }

    /// Number of connections with at least one active handle.
    pub fn active_connection_count(&self) -> usize {
        self.state.lock().active_connections.len()
    }

    /// Diagnostic text dump: sensor table with last seen values, active
    /// sensors and connection counts. Gating it behind a permission check
    /// is the transport layer's concern.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        if !self.initialized {
            let _ = writeln!(out, "sensor device failed to initialize");
            return out;
        }

        let state = self.state.lock();
        let _ = writeln!(out, "Sensor List:");
        for descriptor in self.registry.list() {
            let data = state
                .last_values
                .get(descriptor.handle)
                .filter(|e| e.is_valid())
                .map(|e| e.data)
                .unwrap_or_default();
            let max_rate = if descriptor.min_period_ns > 0 {
                1e9 / descriptor.min_period_ns as f64
            } else {
                0.0
            };
            let _ = writeln!(
                out,
                "{:<24}| {:<16} | 0x{:08x} | maxRate={:7.2}Hz | last=<{:6.1},{:6.1},{:6.1}>",
                descriptor.name,
                descriptor.vendor,
                descriptor.handle,
                max_rate,
                data[0],
                data[1],
                data[2]
            );
        }

        let _ = writeln!(out, "{} active connections", state.active_connections.len());
        let _ = writeln!(out, "Active sensors:");
        let mut active: Vec<_> = state.active_sensors.iter().collect();
        active.sort_by_key(|(handle, _)| **handle);
        for (handle, record) in active {
            let _ = writeln!(
                out,
                "{} (handle=0x{:08x}, connections={})",
                self.registry.name_of(*handle),
                handle,
                record.connection_count()
            );
        }
        let mut connections: Vec<_> = state.active_connections.values().collect();
        connections.sort_by_key(|c| c.id());
        for connection in connections {
            if connection.dropped_batches() > 0 {
                let _ = writeln!(
                    out,
                    "connection {}: {} dropped batches",
                    connection.id(),
                    connection.dropped_batches()
                );
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::{SensorEvent, SimulatedDevice, EVENT_DATA_LEN};
    use anyhow::{bail, Result};
    use async_trait::async_trait;

    /// Scriptable device that records every activation and rate call.
    struct TestDevice {
        sensors: Vec<SensorDescriptor>,
        fail_init: bool,
        activations: Mutex<Vec<(SensorHandle, bool)>>,
        delays: Mutex<Vec<(SensorHandle, i64)>>,
    }

    impl TestDevice {
        fn new(types: &[SensorType]) -> Self {
            let sensors = types
                .iter()
                .enumerate()
                .map(|(i, &sensor_type)| SensorDescriptor {
                    name: format!("hw-{}", i + 1),
                    vendor: "test".to_string(),
                    version: 1,
                    handle: (i + 1) as SensorHandle,
                    sensor_type,
                    min_period_ns: 10_000_000,
                })
                .collect();
            Self {
                sensors,
                fail_init: false,
                activations: Mutex::new(Vec::new()),
                delays: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                fail_init: true,
                ..Self::new(&[])
            }
        }
    }

    #[async_trait]
    impl SensorDevice for TestDevice {
        fn init_status(&self) -> Result<()> {
            if self.fail_init {
                bail!("no sensor HAL");
            }
            Ok(())
        }

        fn list_sensors(&self) -> Vec<SensorDescriptor> {
            self.sensors.clone()
        }

        async fn poll_batch(&self, _max_events: usize) -> Result<Vec<SensorEvent>> {
            std::future::pending().await
        }

        fn set_active(&self, handle: SensorHandle, active: bool) -> Result<()> {
            self.activations.lock().push((handle, active));
            Ok(())
        }

        fn set_delay(&self, handle: SensorHandle, period_ns: i64) -> Result<()> {
            self.delays.lock().push((handle, period_ns));
            Ok(())
        }
    }

    fn imu_hub() -> (Arc<SensorHub>, Arc<TestDevice>) {
        let device = Arc::new(TestDevice::new(&[
            SensorType::Accelerometer,
            SensorType::MagneticField,
            SensorType::Gyroscope,
        ]));
        let hub = SensorHub::new(HubConfig::default(), device.clone());
        (hub, device)
    }

    #[test]
    fn registers_virtuals_for_missing_types_only() {
        let (hub, _) = imu_hub();
        let types: Vec<_> = hub.list_sensors().iter().map(|s| s.sensor_type).collect();
        assert_eq!(
            types,
            vec![
                SensorType::Accelerometer,
                SensorType::MagneticField,
                SensorType::Gyroscope,
                SensorType::Gravity,
                SensorType::LinearAcceleration,
                SensorType::RotationVector,
            ]
        );
        // virtual handles continue past the hardware range
        assert_eq!(hub.list_sensors()[3].handle, 4);
    }

    #[test]
    fn native_derived_type_suppresses_virtual() {
        let device = Arc::new(TestDevice::new(&[
            SensorType::Accelerometer,
            SensorType::MagneticField,
            SensorType::Gravity,
        ]));
        let hub = SensorHub::new(HubConfig::default(), device);
        let gravity_count = hub
            .list_sensors()
            .iter()
            .filter(|s| s.sensor_type == SensorType::Gravity)
            .count();
        assert_eq!(gravity_count, 1);
        assert_eq!(hub.registry.virtual_count(), 2);
    }

    #[test]
    fn virtuals_without_contributing_hardware_are_skipped() {
        let device = Arc::new(TestDevice::new(&[SensorType::Light]));
        let hub = SensorHub::new(HubConfig::default(), device);
        assert_eq!(hub.list_sensors().len(), 1);
        assert_eq!(hub.registry.virtual_count(), 0);
    }

    #[test]
    fn uninitialized_device_short_circuits_everything() {
        let device = Arc::new(TestDevice::failing());
        let hub = SensorHub::new(HubConfig::default(), device);
        let conn = hub.create_connection();

        assert!(matches!(
            hub.enable(&conn, 1),
            Err(HubError::NotInitialized)
        ));
        assert!(matches!(
            hub.disable(&conn, 1),
            Err(HubError::NotInitialized)
        ));
        assert!(matches!(
            hub.set_event_rate(&conn, 1, 0),
            Err(HubError::NotInitialized)
        ));
        assert!(hub.dump().contains("failed to initialize"));
    }

    #[test]
    fn enable_rejects_unknown_handles() {
        let (hub, _) = imu_hub();
        let conn = hub.create_connection();
        assert!(matches!(
            hub.enable(&conn, 99),
            Err(HubError::InvalidHandle(99))
        ));
        assert_eq!(hub.active_sensor_count(), 0);
    }

    #[test]
    fn activation_record_exists_iff_subscribed() {
        let (hub, device) = imu_hub();
        let a = hub.create_connection();
        let b = hub.create_connection();

        hub.enable(&a, 1).unwrap();
        hub.enable(&b, 1).unwrap();
        assert_eq!(hub.active_sensor_count(), 1);
        assert_eq!(hub.active_connection_count(), 2);
        // only the first subscriber touched the driver
        assert_eq!(device.activations.lock().as_slice(), &[(1, true)]);

        hub.disable(&a, 1).unwrap();
        assert_eq!(hub.active_sensor_count(), 1);
        assert_eq!(hub.active_connection_count(), 1);

        hub.disable(&b, 1).unwrap();
        assert_eq!(hub.active_sensor_count(), 0);
        assert_eq!(hub.active_connection_count(), 0);
        assert_eq!(
            device.activations.lock().as_slice(),
            &[(1, true), (1, false)]
        );
    }

    #[test]
    fn joining_active_sensor_replays_last_value_when_valid() {
        let (hub, _) = imu_hub();
        let a = hub.create_connection();
        let b = hub.create_connection();
        let mut b_rx = b.take_receiver().unwrap();

        hub.enable(&a, 1).unwrap();

        // cache still sentinel: joining must not replay anything
        hub.enable(&b, 1).unwrap();
        assert!(b_rx.try_recv().is_err());
        hub.disable(&b, 1).unwrap();

        // observe one event, then join again
        let event = SensorEvent::new(1, SensorType::Accelerometer, 77, [1.0; EVENT_DATA_LEN]);
        hub.state.lock().last_values.record(&[event]);

        hub.enable(&b, 1).unwrap();
        let replay = b_rx.try_recv().unwrap();
        assert_eq!(replay.len(), 1);
        assert_eq!(replay[0].timestamp, 77);
    }

    #[test]
    fn fresh_connection_receives_replay_on_first_enable() {
        let (hub, _) = imu_hub();
        let a = hub.create_connection();
        hub.enable(&a, 1).unwrap();
        hub.state.lock().last_values.record(&[SensorEvent::new(
            1,
            SensorType::Accelerometer,
            77,
            [2.0; EVENT_DATA_LEN],
        )]);

        // b has never subscribed to anything before this call
        let b = hub.create_connection();
        let mut b_rx = b.take_receiver().unwrap();
        hub.enable(&b, 1).unwrap();

        let replay = b_rx.try_recv().expect("replay delivered synchronously");
        assert_eq!(replay.len(), 1);
        assert_eq!(replay[0].handle, 1);
        assert_eq!(replay[0].timestamp, 77);
    }

    #[test]
    fn repeated_enable_is_idempotent() {
        let (hub, device) = imu_hub();
        let a = hub.create_connection();
        let mut rx = a.take_receiver().unwrap();

        hub.enable(&a, 1).unwrap();
        hub.state.lock().last_values.record(&[SensorEvent::new(
            1,
            SensorType::Accelerometer,
            5,
            [0.0; EVENT_DATA_LEN],
        )]);
        hub.enable(&a, 1).unwrap();

        // no self-replay, no extra driver call
        assert!(rx.try_recv().is_err());
        assert_eq!(device.activations.lock().len(), 1);
        assert_eq!(hub.active_connection_count(), 1);
    }

    #[test]
    fn virtual_enable_keeps_raw_feeds_alive() {
        let (hub, device) = imu_hub();
        let conn = hub.create_connection();
        let gravity = hub.list_sensors()[3].handle;

        hub.enable(&conn, gravity).unwrap();
        // accel and mag activated on the driver even though nobody
        // subscribed to them directly
        assert_eq!(
            device.activations.lock().as_slice(),
            &[(1, true), (2, true)]
        );
        assert!(hub.state.lock().active_virtual.contains(&gravity));

        hub.disable(&conn, gravity).unwrap();
        assert!(!hub.state.lock().active_virtual.contains(&gravity));
        assert_eq!(hub.active_connection_count(), 0);
        assert_eq!(
            device.activations.lock().as_slice(),
            &[(1, true), (2, true), (1, false), (2, false)]
        );
    }

    #[test]
    fn disable_unknown_or_inactive_handle_is_a_no_op() {
        let (hub, _) = imu_hub();
        let conn = hub.create_connection();
        assert!(hub.disable(&conn, 1).is_ok());
        assert!(hub.disable(&conn, 99).is_ok());
    }

    #[test]
    fn set_event_rate_validates_and_clamps() {
        let (hub, device) = imu_hub();
        let conn = hub.create_connection();

        assert!(matches!(
            hub.set_event_rate(&conn, 1, -5),
            Err(HubError::InvalidArgument(_))
        ));
        assert!(matches!(
            hub.set_event_rate(&conn, 99, 0),
            Err(HubError::InvalidHandle(99))
        ));

        hub.set_event_rate(&conn, 1, 0).unwrap();
        let min = HubConfig::default().min_event_period_ns;
        assert_eq!(device.delays.lock().as_slice(), &[(1, min)]);

        hub.set_event_rate(&conn, 1, min * 4).unwrap();
        assert_eq!(device.delays.lock().last(), Some(&(1, min * 4)));
    }

    #[test]
    fn close_cleans_up_every_subscription_exactly_once() {
        let (hub, device) = imu_hub();
        let conn = hub.create_connection();
        hub.enable(&conn, 1).unwrap();
        hub.enable(&conn, 2).unwrap();
        assert_eq!(hub.active_sensor_count(), 2);

        conn.close();
        assert_eq!(hub.active_sensor_count(), 0);
        assert_eq!(hub.active_connection_count(), 0);
        let deactivations = device
            .activations
            .lock()
            .iter()
            .filter(|(_, active)| !active)
            .count();
        assert_eq!(deactivations, 2);

        // second close must not double-deactivate
        conn.close();
        assert_eq!(device.activations.lock().len(), 4);
    }

    #[test]
    fn close_of_never_active_connection_is_safe() {
        let (hub, _) = imu_hub();
        let conn = hub.create_connection();
        conn.close();
        assert_eq!(hub.active_connection_count(), 0);
    }

    #[test]
    fn dump_lists_sensors_and_counts() {
        let device = Arc::new(SimulatedDevice::new());
        let hub = SensorHub::new(HubConfig::default(), device);
        let conn = hub.create_connection();
        hub.enable(&conn, 1).unwrap();

        let dump = hub.dump();
        assert!(dump.contains("Sensor List:"));
        assert!(dump.contains("Simulated Accelerometer"));
        assert!(dump.contains("1 active connections"));
        assert!(dump.contains("connections=1"));
    }

    #[test]
    fn dump_lists_active_sensors_in_handle_order() {
        let device = Arc::new(SimulatedDevice::new());
        let hub = SensorHub::new(HubConfig::default(), device);
        let conn = hub.create_connection();
        // subscribe in reverse handle order
        hub.enable(&conn, 2).unwrap();
        hub.enable(&conn, 1).unwrap();

        let dump = hub.dump();
        let active = dump.split("Active sensors:").nth(1).unwrap();
        let first = active.find("handle=0x00000001").unwrap();
        let second = active.find("handle=0x00000002").unwrap();
        assert!(first < second);
    }
}
