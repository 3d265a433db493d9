use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::sender::NotifyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// A submission from this client is being delivered right now.
    Pending,
    Sent(Instant),
}

/// Per-client resubmission cooldown. A local heuristic against double
/// submits; the relays remain the real trust boundary.
///
/// A submission reserves its slot with [`SubmissionGuard::try_begin`] before
/// delivery, then either [`complete`](SubmissionGuard::complete)s it, which
/// starts the cooldown, or [`release`](SubmissionGuard::release)s it after a
/// failed delivery.
#[derive(Debug)]
pub struct SubmissionGuard {
    cooldown: Duration,
    slots: Mutex<HashMap<String, Slot>>,
}

fn round_up_secs(d: Duration) -> u64 {
    d.as_secs() + u64::from(d.subsec_nanos() > 0)
}

impl SubmissionGuard {
    pub fn new(cooldown: Duration) -> Self {
        SubmissionGuard {
            cooldown,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    fn lock_slots(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Checks the cooldown and reserves the client's slot in one step.
    pub fn try_begin(&self, client: &str, now: Instant) -> Result<(), NotifyError> {
        let mut slots = self.lock_slots();
        match slots.get(client) {
            Some(Slot::Pending) => {
                return Err(NotifyError::Cooldown {
                    remaining_secs: round_up_secs(self.cooldown),
                });
            }
            Some(Slot::Sent(sent_at)) => {
                let elapsed = now.saturating_duration_since(*sent_at);
                if elapsed < self.cooldown {
                    // Round up so "0s left" is never reported while still blocked.
                    return Err(NotifyError::Cooldown {
                        remaining_secs: round_up_secs(self.cooldown - elapsed),
                    });
                }
            }
            None => {}
        }
        let cooldown = self.cooldown;
        slots.retain(|_, slot| match slot {
            Slot::Pending => true,
            Slot::Sent(sent_at) => now.saturating_duration_since(*sent_at) < cooldown,
        });
        slots.insert(client.to_string(), Slot::Pending);
        Ok(())
    }

    /// Marks a reserved submission as delivered; the cooldown runs from `now`.
    pub fn complete(&self, client: &str, now: Instant) {
        self.lock_slots().insert(client.to_string(), Slot::Sent(now));
    }

    /// Drops a reservation whose delivery failed so the client can retry at once.
    pub fn release(&self, client: &str) {
        let mut slots = self.lock_slots();
        if slots.get(client) == Some(&Slot::Pending) {
            slots.remove(client);
        }
    }
}
