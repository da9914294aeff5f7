// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sensorhub-rs

//! Contract the hub requires from the underlying device layer

use anyhow::Result;
use async_trait::async_trait;

use super::{SensorDescriptor, SensorEvent, SensorHandle};

/// The device layer as seen by the hub.
///
/// `poll_batch` is the only long-blocking call. Activation and rate control
/// run under the hub's control-plane lock and must return quickly.
#[async_trait]
pub trait SensorDevice: Send + Sync {
    /// Device startup status. All control operations short-circuit with
    /// `NotInitialized` while this reports an error; there is no re-init
    /// path.
    fn init_status(&self) -> Result<()>;

    /// Ordered hardware sensor list. Handles are assigned by the driver and
    /// reused verbatim by the registry.
    fn list_sensors(&self) -> Vec<SensorDescriptor>;

    /// Block until a batch of raw events is available, returning at most
    /// `max_events` of them. Batches are grouped by handle but not
    /// necessarily globally time-sorted. An error here is fatal to the
    /// polling loop.
    async fn poll_batch(&self, max_events: usize) -> Result<Vec<SensorEvent>>;

    /// Activate or deactivate one hardware sensor. The driver refcounts
    /// concurrent users, so balanced activate/deactivate pairs from
    /// independent endpoints compose correctly.
    fn set_active(&self, handle: SensorHandle, active: bool) -> Result<()>;

    /// Request a sampling period for one hardware sensor. The driver may
    /// aggregate requests from multiple users; the fastest requested rate
    /// wins.
    fn set_delay(&self, handle: SensorHandle, period_ns: i64) -> Result<()>;
}
