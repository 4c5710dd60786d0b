//! Identity allocation for natural keys.
//!
//! The allocator is stateless: under the sequential policy uniqueness is a
//! property of the event index supplied by the caller, not of internal
//! bookkeeping. Under the random policy collisions are possible and surface
//! from the store as constraint violations.

use chrono::{Days, NaiveDate, NaiveTime};
use rand::Rng;

use plastgen_core::{BatchStamp, Dni, IdPolicy, Ruc};

use crate::providers;

/// Role offset distinguishing the two Persons minted per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonRole {
    Employee,
    Buyer,
}

impl PersonRole {
    fn offset(self) -> u64 {
        match self {
            PersonRole::Employee => 0,
            PersonRole::Buyer => 1,
        }
    }
}

/// Mints DNIs, RUCs, and batch stamps according to the configured policy.
#[derive(Debug, Clone, Copy)]
pub struct IdAllocator {
    policy: IdPolicy,
}

impl IdAllocator {
    pub fn new(policy: IdPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    /// Eight-digit DNI for one of the two Persons of an event.
    pub fn person_id<R: Rng>(&self, rng: &mut R, event_index: u64, role: PersonRole) -> Dni {
        let value = match self.policy {
            IdPolicy::Random => rng.random_range(0..100_000_000),
            IdPolicy::Sequential => event_index * 2 + role.offset() + 1,
        };
        Dni(format!("{value:08}"))
    }

    /// Eleven-digit RUC for the event's legal buyer.
    pub fn tax_id<R: Rng>(&self, rng: &mut R, event_index: u64) -> Ruc {
        let value = match self.policy {
            IdPolicy::Random => rng.random_range(0..100_000_000_000u64),
            IdPolicy::Sequential => event_index + 1,
        };
        Ruc(format!("{value:011}"))
    }

    /// Composite (date, time) key for the event's batch. `Lote` has no
    /// surrogate key, so under the sequential policy the stamp is derived
    /// from the event index to keep it collision-free at any volume.
    pub fn batch_stamp<R: Rng>(&self, rng: &mut R, event_index: u64) -> BatchStamp {
        match self.policy {
            IdPolicy::Random => BatchStamp {
                date: providers::past_date(rng),
                time: providers::clock_time(rng),
            },
            IdPolicy::Sequential => {
                let base = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default();
                BatchStamp {
                    date: base + Days::new(event_index / 86_400),
                    time: NaiveTime::from_num_seconds_from_midnight_opt(
                        (event_index % 86_400) as u32,
                        0,
                    )
                    .unwrap_or_default(),
                }
            }
        }
    }
}
