// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sensorhub-rs

//! SensorHub - a multiplexing sensor event hub
//!
//! Sits between a sensor device layer and any number of subscriber
//! connections:
//! - enumerates hardware sensors and synthesizes virtual ones (gravity,
//!   linear acceleration, rotation vector) where the hardware lacks them
//! - polls raw event batches, runs them through the active virtual sensor
//!   processors and merges everything into one time-ordered stream
//! - fans the merged stream out per-connection, filtered to each
//!   connection's subscriptions, dropping on backpressure rather than
//!   stalling the device
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       SensorHub                          │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌────────┐   ┌──────────┐   ┌─────────┐   ┌──────────┐  │
//! │  │ Device │ → │ Polling  │ → │ Virtual │ → │ Fan-out  │  │
//! │  │ Layer  │   │ Loop     │   │ Sensors │   │ Delivery │  │
//! │  └────────┘   └──────────┘   └─────────┘   └──────────┘  │
//! │       ↑            ↓              ↓             ↓        │
//! │  ┌──────────────────────────────────────────────────┐    │
//! │  │   Registry · Activation Table · Last-Value Cache │    │
//! │  └──────────────────────────────────────────────────┘    │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod config;
pub mod error;
pub mod fusion;
pub mod hub;
pub mod sensors;

// Re-exports for convenience
pub use config::{Config, HubConfig};
pub use error::HubError;
pub use fusion::VirtualProcessor;
pub use hub::{ConnectionId, SensorHub, SubscriberConnection};
pub use sensors::{
    SensorDescriptor, SensorDevice, SensorEvent, SensorHandle, SensorType, SimulatedDevice,
};

/// SensorHub version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// SensorHub name
pub const NAME: &str = "SensorHub";
