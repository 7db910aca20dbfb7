//! Overlap guards for controller operations.
//!
//! A controller takes a ticket before dispatching a request and holds it until
//! the response is rendered. A second attempt while a ticket is out is
//! rejected; dropping the ticket (on any exit path) frees the slot.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Admits one run of an operation at a time.
#[derive(Debug, Default)]
pub struct InFlightGuard {
    busy: AtomicBool,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the slot, or `None` if a run is already in flight.
    pub fn try_begin(&self) -> Option<InFlightTicket<'_>> {
        if self.busy.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(InFlightTicket { guard: self })
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }
}

pub struct InFlightTicket<'a> {
    guard: &'a InFlightGuard,
}

impl Drop for InFlightTicket<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::SeqCst);
    }
}

/// Admits one run per key; different keys never block each other.
#[derive(Debug, Default)]
pub struct InFlightSet {
    keys: Mutex<HashSet<i64>>,
}

impl InFlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self, key: i64) -> Option<KeyTicket<'_>> {
        let mut keys = self.keys.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if keys.insert(key) {
            Some(KeyTicket { set: self, key })
        } else {
            None
        }
    }

    pub fn contains(&self, key: i64) -> bool {
        self.keys
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(&key)
    }
}

pub struct KeyTicket<'a> {
    set: &'a InFlightSet,
    key: i64,
}

impl Drop for KeyTicket<'_> {
    fn drop(&mut self) {
        self.set
            .keys
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&self.key);
    }
}
