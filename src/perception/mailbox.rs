use std::sync::{Arc, Mutex, MutexGuard};

use super::frame::PerceptionFrame;

#[derive(Default)]
struct Slot {
    latest: Option<PerceptionFrame>,
    in_flight: bool,
    /// Bumped per request so a stale sender cannot release a newer one.
    request: u64,
}

fn lock_slot(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    // The slot holds plain data, so a poisoned lock is still usable.
    slot.lock().unwrap_or_else(|e| e.into_inner())
}

/// Single-slot hand-off between the detector and the frame loop.
///
/// The detector overwrites the slot; the loop reads and clears it once per
/// cycle. At most one detection request is outstanding at a time.
#[derive(Clone, Default)]
pub struct Mailbox {
    slot: Arc<Mutex<Slot>>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        lock_slot(&self.slot)
    }

    /// Take the newest result, leaving the slot empty.
    pub fn take(&self) -> Option<PerceptionFrame> {
        self.lock().latest.take()
    }

    pub fn is_in_flight(&self) -> bool {
        self.lock().in_flight
    }

    /// Reserve the single request slot. Returns a sender for the detector,
    /// or `None` if a request is already outstanding.
    pub fn begin_request(&self) -> Option<ResultSender> {
        let mut slot = self.lock();
        if slot.in_flight {
            return None;
        }
        slot.in_flight = true;
        slot.request = slot.request.wrapping_add(1);
        Some(ResultSender { slot: Arc::clone(&self.slot), request: slot.request })
    }

    /// Release the request slot after a submit the detector refused.
    pub fn release(&self) {
        self.lock().in_flight = false;
    }

    /// Forget any pending result and release the request slot.
    pub fn reset(&self) {
        let mut slot = self.lock();
        slot.latest = None;
        slot.in_flight = false;
    }
}

/// Detector-side handle for answering one request.
///
/// The request slot is released when the handle goes away, whether it was
/// answered, failed, or simply dropped.
pub struct ResultSender {
    slot: Arc<Mutex<Slot>>,
    request: u64,
}

impl ResultSender {
    /// Publish a result, replacing any unread one, and release the request slot.
    pub fn deliver(self, frame: PerceptionFrame) {
        let mut slot = lock_slot(&self.slot);
        if slot.request == self.request {
            slot.latest = Some(frame);
        }
    }

    /// Release the request slot without a result.
    pub fn fail(self) {}
}

impl Drop for ResultSender {
    fn drop(&mut self) {
        let mut slot = lock_slot(&self.slot);
        if slot.request == self.request {
            slot.in_flight = false;
        }
    }
}
