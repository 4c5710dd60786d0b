//! Batch driver: loops the orchestrator, reports progress, and owns the
//! commit boundary for the whole run.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use plastgen_core::{Result, RunConfig, RunReport, Store, TableCounts};

use crate::identity::IdAllocator;
use crate::orchestrator::EventOrchestrator;

/// Emit an info-level progress line every this many records.
const PROGRESS_INTERVAL: u64 = 10_000;

/// Runs the record orchestrator `n` times over one persistence session,
/// then commits once: either all events become visible together or none do.
pub struct BatchDriver<S> {
    store: S,
    config: RunConfig,
    first_event: u64,
}

impl<S: Store> BatchDriver<S> {
    pub fn new(store: S, config: RunConfig) -> Self {
        Self {
            store,
            config,
            first_event: 0,
        }
    }

    /// Start the event sequence at `first_event` instead of 0. Scripted
    /// multi-volume invocations against one database advance this across
    /// runs so sequential identities never restart mid-invocation.
    pub fn starting_at(mut self, first_event: u64) -> Self {
        self.first_event = first_event;
        self
    }

    /// Generate `records` events and commit. The driver consumes the store;
    /// on error the session is dropped with the transaction uncommitted, so
    /// a failed batch leaves nothing behind.
    pub async fn generate(self, records: u64) -> Result<RunReport> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let allocator = IdAllocator::new(self.config.id_policy);
        let mut store = self.store;

        info!(
            run_id = %run_id,
            records,
            first_event = self.first_event,
            policy = ?self.config.id_policy,
            seed,
            "generation started"
        );

        let mut counts = TableCounts::default();
        let mut legal_representation_events = 0;
        let mut quoted_sale_events = 0;

        {
            let mut orchestrator =
                EventOrchestrator::new(&mut store, &mut rng, allocator, self.config.branches);
            for offset in 0..records {
                let index = self.first_event + offset;
                let keys = orchestrator.run_event(index).await?;

                counts.persons += 2;
                counts.employees += 1;
                counts.natural_buyers += 1;
                counts.products += 2;
                counts.base_products += 1;
                counts.quoted_products += 1;
                counts.raw_materials += 1;
                counts.batches += 1;
                counts.sales += 1;
                counts.contains += 1;
                counts.produces += 1;
                counts.requires += 1;
                counts.requests += 1;
                if keys.legal_buyer.is_some() {
                    counts.legal_buyers += 1;
                    counts.represents += 1;
                    legal_representation_events += 1;
                }
                if keys.sale_is_quoted() {
                    quoted_sale_events += 1;
                }

                debug!(record = offset + 1, total = records, "record generated");
                if (offset + 1) % PROGRESS_INTERVAL == 0 {
                    info!(record = offset + 1, total = records, "progress");
                }
            }
        }

        store.commit().await?;

        let report = RunReport {
            run_id: run_id.clone(),
            seed,
            records,
            elapsed_ms: start.elapsed().as_millis() as u64,
            counts,
            legal_representation_events,
            quoted_sale_events,
        };
        info!(
            run_id = %run_id,
            records,
            elapsed_ms = report.elapsed_ms,
            legal_buyers = report.counts.legal_buyers,
            "batch committed"
        );
        Ok(report)
    }
}
