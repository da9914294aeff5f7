// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sensorhub-rs

//! Hub core: registry, subscriber connections, last-value cache and the
//! polling loop

mod cache;
mod connection;
mod poller;
mod registry;
mod service;

pub use cache::LastValueCache;
pub use connection::{ConnectionId, SubscriberConnection};
pub use registry::SensorRegistry;
pub use service::SensorHub;
