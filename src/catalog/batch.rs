//! Batch seeding
//!
//! Cards are written strictly one after another; each card's full
//! insert-and-link sequence finishes before the next begins.

use crate::catalog::builder::CatalogBuilder;
use crate::catalog::report::SeedReport;
use crate::loader::SeedBatch;
use crate::logger::SeedLogger;
use crate::store::CatalogStore;

/// Seed every card in `batch`, collecting one outcome per card
pub fn seed_batch<S: CatalogStore>(
    store: &mut S,
    logger: &SeedLogger,
    batch: SeedBatch,
) -> SeedReport {
    let mut builder = CatalogBuilder::new(store, logger);

    let outcomes = batch
        .seeds
        .iter()
        .map(|seed| builder.seed_card(seed))
        .collect();

    let report = SeedReport {
        outcomes,
        rejected_rows: batch.rejected_rows,
    };
    logger.minimal("summary", &report.summary());
    report
}
