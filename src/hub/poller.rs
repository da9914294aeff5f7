// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sensorhub-rs

//! The event polling, merge and fan-out loop

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{error, info};

use super::service::SensorHub;
use crate::error::HubError;
use crate::sensors::SensorEndpoint;

impl SensorHub {
    /// Drive the hub: poll the device for raw batches, synthesize derived
    /// events through the active virtual sensors, merge everything into one
    /// time-ordered batch and fan it out to the active subscribers.
    ///
    /// Runs until the stop signal fires between iterations or the device
    /// poll fails; a poll failure is fatal and the loop does not restart.
    /// The control-plane lock is only held for the two short critical
    /// sections (cache update, connection snapshot), never across the poll
    /// await or a channel write.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) -> Result<(), HubError> {
        if !self.initialized {
            return Err(HubError::NotInitialized);
        }

        let max_events = self.config.events_per_sensor * (1 + self.registry.virtual_count());
        info!("sensor hub polling loop starting (batch budget {max_events})");

        loop {
            let polled = tokio::select! {
                polled = self.device.poll_batch(max_events) => polled,
                _ = shutdown.recv() => {
                    info!("sensor hub polling loop stopping");
                    return Ok(());
                }
            };
            let mut events = match polled {
                Ok(events) => events,
                Err(e) => {
                    error!("sensor poll failed: {e:#}");
                    return Err(HubError::PollFatal(e));
                }
            };
            if events.is_empty() {
                continue;
            }

            // first critical section: record raw values, snapshot the
            // active virtual sensors
            let virtual_endpoints: Vec<Arc<dyn SensorEndpoint>> = {
                let mut state = self.state.lock();
                state.last_values.record(&events);
                state
                    .active_virtual
                    .iter()
                    .filter_map(|&handle| self.registry.lookup(handle).cloned())
                    .collect()
            };

            let raw_count = events.len();
            if !virtual_endpoints.is_empty() {
                for i in 0..raw_count {
                    let event = events[i];
                    for endpoint in &virtual_endpoints {
                        if !endpoint.consumes(event.sensor_type) {
                            continue;
                        }
                        if let Some(synthesized) = endpoint.process(&event) {
                            events.push(synthesized);
                        }
                    }
                }
            }

            // second critical section: record synthesized values, snapshot
            // the active connections for fan-out
            let connections = {
                let mut state = self.state.lock();
                if events.len() > raw_count {
                    state.last_values.record(&events[raw_count..]);
                }
                state
                    .active_connections
                    .values()
                    .cloned()
                    .collect::<Vec<_>>()
            };

            if events.len() > raw_count {
                // synthesized and raw events must interleave correctly; a
                // stable ascending sort is the externally observable
                // ordering contract
                events.sort_by_key(|e| e.timestamp);
            }

            for connection in &connections {
                connection.send_events(&events);
            }
        }
    }
}
