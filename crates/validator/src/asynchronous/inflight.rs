//! Per-field latest-wins bookkeeping
//!
//! Every pass takes a generation number and claims the fields it evaluates
//! with one token. Claiming a field cancels the token held by any older
//! claim on it; a pass whose claim was replaced before it finished is
//! superseded. Slots outlive their pass so a late, older claim is refused. The lock is
//! only held for map bookkeeping, never across an await.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

/// Latest claim on a field. A released slot keeps its generation so that
/// older passes arriving late are still refused.
#[derive(Debug)]
struct Slot {
    generation: u64,
    token: Option<CancellationToken>,
}

#[derive(Debug, Default)]
pub(crate) struct InFlight {
    generation: AtomicU64,
    slots: Mutex<HashMap<Arc<str>, Slot>>,
}

impl InFlight {
    pub(crate) fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Registers `generation` as the newest pass for `field`.
    ///
    /// `token` is cancelled as soon as a newer pass claims the field. A claim
    /// that arrives after a newer one, running or finished, is stale: its
    /// token is cancelled at once and `false` is returned.
    pub(crate) fn claim(
        &self,
        field: &Arc<str>,
        generation: u64,
        token: &CancellationToken,
    ) -> bool {
        let previous = {
            let mut slots = self.slots.lock();
            if slots
                .get(&**field)
                .is_some_and(|slot| slot.generation >= generation)
            {
                drop(slots);
                token.cancel();
                return false;
            }
            slots.insert(
                Arc::clone(field),
                Slot {
                    generation,
                    token: Some(token.clone()),
                },
            )
        };

        if let Some(token) = previous.and_then(|slot| slot.token) {
            token.cancel();
        }
        true
    }

    /// Ends the claim of `generation` on `field`.
    ///
    /// Returns `false` when a newer pass replaced the claim.
    pub(crate) fn release(&self, field: &str, generation: u64) -> bool {
        let mut slots = self.slots.lock();
        match slots.get_mut(field) {
            Some(slot) if slot.generation == generation => {
                slot.token = None;
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    fn in_flight(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.token.is_some())
            .count()
    }
}
