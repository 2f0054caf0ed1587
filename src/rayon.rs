//! Parallel batch extraction via rayon.
//!
//! Each batch element runs a full [`MetadataExtractor::extract`] on a rayon
//! worker, so every worker starts and releases its own framework session.
//! `collect` on an indexed parallel iterator keeps the input order.

use ::rayon::prelude::*;

use crate::{
    configuration::BatchEntryPolicy, dispatcher::batch_entry, extractor::MetadataExtractor,
    framework::MediaFramework, report::ExtractionReport,
};

pub(crate) fn batch_reports_parallel<F: MediaFramework>(
    extractor: &MetadataExtractor<F>,
    entries: &[Option<&str>],
    policy: BatchEntryPolicy,
) -> Vec<ExtractionReport> {
    log::debug!(
        "Extracting {} batch entries on {} rayon threads",
        entries.len(),
        ::rayon::current_num_threads(),
    );

    entries
        .par_iter()
        .map(|entry| batch_entry(extractor, *entry, policy))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}
