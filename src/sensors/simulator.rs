// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sensorhub-rs

//! Simulated sensor device for demo mode and tests

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use rand::prelude::*;

use super::{SensorDescriptor, SensorDevice, SensorEvent, SensorHandle, SensorType, EVENT_DATA_LEN};

const DEFAULT_PERIOD_NS: i64 = 20_000_000; // 50Hz
const FASTEST_PERIOD_NS: i64 = 1_000_000;

/// Fakes a three-sensor IMU (accelerometer, magnetometer, gyroscope) behind
/// the `SensorDevice` contract. Activations are refcounted the way a real
/// driver multiplexes independent users.
pub struct SimulatedDevice {
    sensors: Vec<SensorDescriptor>,
    origin: Instant,
    state: Mutex<SimulatorState>,
}

struct SimulatorState {
    active: HashMap<SensorHandle, usize>,
    requested_period_ns: HashMap<SensorHandle, i64>,
    rng: StdRng,
}

impl SimulatorState {
    /// The simulator polls all sensors at one shared period: the fastest
    /// period currently requested, or the default when nobody asked.
    fn effective_period_ns(&self) -> i64 {
        self.requested_period_ns
            .values()
            .copied()
            .min()
            .unwrap_or(DEFAULT_PERIOD_NS)
    }
}

impl SimulatedDevice {
    /// A device resting flat on a desk somewhere in the northern hemisphere.
    pub fn new() -> Self {
        let sensors = vec![
            Self::descriptor("Simulated Accelerometer", 1, SensorType::Accelerometer),
            Self::descriptor("Simulated Magnetometer", 2, SensorType::MagneticField),
            Self::descriptor("Simulated Gyroscope", 3, SensorType::Gyroscope),
        ];
        Self {
            sensors,
            origin: Instant::now(),
            state: Mutex::new(SimulatorState {
                active: HashMap::new(),
                requested_period_ns: HashMap::new(),
                rng: StdRng::from_entropy(),
            }),
        }
    }

    fn descriptor(name: &str, handle: SensorHandle, sensor_type: SensorType) -> SensorDescriptor {
        SensorDescriptor {
            name: name.to_string(),
            vendor: "sensorhub".to_string(),
            version: 1,
            handle,
            sensor_type,
            min_period_ns: 10_000_000,
        }
    }

    fn known(&self, handle: SensorHandle) -> bool {
        self.sensors.iter().any(|s| s.handle == handle)
    }

    fn sample(rng: &mut StdRng, sensor_type: SensorType) -> [f32; EVENT_DATA_LEN] {
        let mut noise = || rng.gen_range(-0.05..0.05) as f32;
        let mut data = [0.0; EVENT_DATA_LEN];
        match sensor_type {
            SensorType::Accelerometer => {
                data[0] = noise();
                data[1] = noise();
                data[2] = 9.81 + noise();
            }
            SensorType::MagneticField => {
                data[0] = 22.4 + noise();
                data[1] = 5.9 + noise();
                data[2] = -41.4 + noise();
            }
            SensorType::Gyroscope => {
                data[0] = noise() * 0.02;
                data[1] = noise() * 0.02;
                data[2] = noise() * 0.02;
            }
            _ => data[0] = noise(),
        }
        data
    }
}

impl Default for SimulatedDevice {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SensorDevice for SimulatedDevice {
    fn init_status(&self) -> Result<()> {
        Ok(())
    }

    fn list_sensors(&self) -> Vec<SensorDescriptor> {
        self.sensors.clone()
    }

    async fn poll_batch(&self, max_events: usize) -> Result<Vec<SensorEvent>> {
        loop {
            let period_ns = self.state.lock().effective_period_ns();
            tokio::time::sleep(Duration::from_nanos(period_ns as u64)).await;

            let mut state = self.state.lock();
            let timestamp = self.origin.elapsed().as_nanos() as i64;
            let mut events = Vec::new();
            for descriptor in &self.sensors {
                if state.active.get(&descriptor.handle).copied().unwrap_or(0) == 0 {
                    continue;
                }
                if events.len() >= max_events {
                    break;
                }
                let data = Self::sample(&mut state.rng, descriptor.sensor_type);
                events.push(SensorEvent::new(
                    descriptor.handle,
                    descriptor.sensor_type,
                    timestamp,
                    data,
                ));
            }
            if !events.is_empty() {
                return Ok(events);
            }
        }
    }

    fn set_active(&self, handle: SensorHandle, active: bool) -> Result<()> {
        if !self.known(handle) {
            bail!("unknown hardware sensor handle {handle}");
        }
        let mut state = self.state.lock();
        let count = state.active.entry(handle).or_insert(0);
        if active {
            *count += 1;
        } else if *count > 0 {
            *count -= 1;
            if *count == 0 {
                // last user gone: the handle's rate request no longer
                // pins the shared poll period
                state.requested_period_ns.remove(&handle);
            }
        }
        Ok(())
    }

    fn set_delay(&self, handle: SensorHandle, period_ns: i64) -> Result<()> {
        if !self.known(handle) {
            bail!("unknown hardware sensor handle {handle}");
        }
        // latest request per handle; fastest across handles wins
        let mut state = self.state.lock();
        state
            .requested_period_ns
            .insert(handle, period_ns.max(FASTEST_PERIOD_NS));
        Ok(())
    }
}
