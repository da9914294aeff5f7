// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sensorhub-rs

//! Subscriber connections and their delivery channels

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::service::SensorHub;
use crate::sensors::{SensorEvent, SensorHandle};

/// Opaque per-connection identity.
pub type ConnectionId = u64;

/// Per-client subscription state: a set of subscribed handles and a bounded
/// delivery channel the transport layer drains.
///
/// The handle set has its own lock, independent of the hub's control-plane
/// lock, since filtering and delivery run outside the global critical
/// section.
pub struct SubscriberConnection {
    id: ConnectionId,
    hub: Weak<SensorHub>,
    handles: Mutex<HashSet<SensorHandle>>,
    tx: mpsc::Sender<Vec<SensorEvent>>,
    rx: Mutex<Option<mpsc::Receiver<Vec<SensorEvent>>>>,
    dropped_batches: AtomicU64,
    closed: AtomicBool,
}

impl SubscriberConnection {
    pub(crate) fn new(id: ConnectionId, hub: Weak<SensorHub>, queue_depth: usize) -> Arc<Self> {
        let (tx, rx) = mpsc::channel(queue_depth);
        Arc::new(Self {
            id,
            hub,
            handles: Mutex::new(HashSet::new()),
            tx,
            rx: Mutex::new(Some(rx)),
            dropped_batches: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        })
    }

    /// Connection identity, unique for the process lifetime.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Take the receiving end of the delivery channel. The transport layer
    /// calls this once to attach byte-level streaming; subsequent calls
    /// return `None`.
    pub fn take_receiver(&self) -> Option<mpsc::Receiver<Vec<SensorEvent>>> {
        self.rx.lock().take()
    }

    /// Batches dropped on this connection because its channel was full.
    pub fn dropped_batches(&self) -> u64 {
        self.dropped_batches.load(Ordering::Relaxed)
    }

    /// Track a new subscription. True if the handle was not already there.
    pub(crate) fn add_handle(&self, handle: SensorHandle) -> bool {
        self.handles.lock().insert(handle)
    }

    /// Drop a subscription. True if the handle was present.
    pub(crate) fn remove_handle(&self, handle: SensorHandle) -> bool {
        self.handles.lock().remove(&handle)
    }

    pub(crate) fn has_any_handle(&self) -> bool {
        !self.handles.lock().is_empty()
    }

    /// Filter `events` down to this connection's subscriptions, preserving
    /// relative order, and push the result to the delivery channel. An
    /// empty result does no I/O. A full (or torn down) channel drops the
    /// batch for this connection only; the producer never blocks.
    pub(crate) fn send_events(&self, events: &[SensorEvent]) -> usize {
        let filtered: Vec<SensorEvent> = {
            let handles = self.handles.lock();
            events
                .iter()
                .filter(|e| handles.contains(&e.handle))
                .copied()
                .collect()
        };
        if filtered.is_empty() {
            return 0;
        }

        let count = filtered.len();
        match self.tx.try_send(filtered) {
            Ok(()) => count,
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.dropped_batches.fetch_add(1, Ordering::Relaxed);
                warn!("connection {}: dropping {} events on the floor", self.id, count);
                0
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.dropped_batches.fetch_add(1, Ordering::Relaxed);
                debug!("connection {}: receiver gone, dropped {} events", self.id, count);
                0
            }
        }
    }

    /// Tear the connection down: unsubscribe every handle it still holds
    /// and leave the active-connections set. Idempotent, and safe even if
    /// the connection never subscribed to anything.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(hub) = self.hub.upgrade() {
            hub.cleanup_connection(self);
        }
    }
}
