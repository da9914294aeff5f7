// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sensorhub-rs

//! Last-known-value cache

use std::collections::HashMap;

use crate::sensors::{SensorEvent, SensorHandle, SensorType};

/// One slot per registered handle holding the most recent event seen.
///
/// Slots start as invalid sentinels and become valid after the first event
/// for that handle is observed. Capacity is fixed at registration time;
/// only the polling loop writes here, behind the hub's control-plane lock.
pub struct LastValueCache {
    entries: HashMap<SensorHandle, SensorEvent>,
}

impl LastValueCache {
    /// Pre-size for the total known sensor count.
    pub fn with_capacity(count: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(count),
        }
    }

    /// Create the sentinel slot for a newly registered sensor.
    pub fn insert_sentinel(&mut self, handle: SensorHandle, sensor_type: SensorType) {
        self.entries
            .insert(handle, SensorEvent::sentinel(handle, sensor_type));
    }

    /// Record the last event of each handle run in `events`.
    ///
    /// Device batches are grouped by handle but not globally sorted, so
    /// within a run of consecutive same-handle events only the final one
    /// matters. Events for unregistered handles are ignored.
    pub fn record(&mut self, events: &[SensorEvent]) {
        let mut iter = events.iter().peekable();
        while let Some(event) = iter.next() {
            let last_of_run = match iter.peek() {
                Some(next) => next.handle != event.handle,
                None => true,
            };
            if last_of_run {
                if let Some(slot) = self.entries.get_mut(&event.handle) {
                    *slot = *event;
                }
            }
        }
    }

    /// Current slot for `handle`, sentinel included.
    pub fn get(&self, handle: SensorHandle) -> Option<&SensorEvent> {
        self.entries.get(&handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::EVENT_DATA_LEN;

    fn event(handle: SensorHandle, timestamp: i64) -> SensorEvent {
        SensorEvent::new(
            handle,
            SensorType::Accelerometer,
            timestamp,
            [0.0; EVENT_DATA_LEN],
        )
    }

    #[test]
    fn keeps_last_event_of_each_run() {
        let mut cache = LastValueCache::with_capacity(2);
        cache.insert_sentinel(1, SensorType::Accelerometer);
        cache.insert_sentinel(2, SensorType::MagneticField);

        cache.record(&[event(1, 10), event(1, 20), event(2, 30), event(1, 40)]);

        assert_eq!(cache.get(1).unwrap().timestamp, 40);
        assert_eq!(cache.get(2).unwrap().timestamp, 30);
    }

    #[test]
    fn slot_invalid_until_first_event() {
        let mut cache = LastValueCache::with_capacity(1);
        cache.insert_sentinel(1, SensorType::Accelerometer);
        assert!(!cache.get(1).unwrap().is_valid());

        cache.record(&[event(1, 5)]);
        assert!(cache.get(1).unwrap().is_valid());
    }

    #[test]
    fn ignores_unregistered_handles() {
        let mut cache = LastValueCache::with_capacity(1);
        cache.insert_sentinel(1, SensorType::Accelerometer);
        cache.record(&[event(7, 5)]);
        assert!(cache.get(7).is_none());
    }
}
