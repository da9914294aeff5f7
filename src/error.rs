// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sensorhub-rs

//! Hub error taxonomy

use thiserror::Error;

use crate::sensors::SensorHandle;

/// Errors surfaced by the hub's control operations.
///
/// There is no variant for a dropped delivery: a slow subscriber losing a
/// batch is logged per connection and never surfaced to the producer.
#[derive(Debug, Error)]
pub enum HubError {
    /// The device layer failed startup. Every control operation
    /// short-circuits with this; there is no re-init path.
    #[error("sensor device failed to initialize")]
    NotInitialized,

    /// The caller referenced a handle the registry does not know.
    #[error("unknown sensor handle {0}")]
    InvalidHandle(SensorHandle),

    /// Malformed argument, rejected before any state change.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Propagated verbatim from the endpoint's activate/deactivate/set_rate
    /// call. Not retried; the caller may retry if appropriate.
    #[error("device error: {0}")]
    Device(#[source] anyhow::Error),

    /// The device poll call failed and the polling loop has terminated.
    /// Unrecoverable at the process level.
    #[error("sensor poll failed: {0}")]
    PollFatal(#[source] anyhow::Error),
}
