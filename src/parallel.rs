//! Parallel processing support for ferro-m2mc
//!
//! Requests for different chromosomes share nothing, so they can run on the
//! rayon pool. Each request is still converted sequentially, because the
//! cytological direction depends on traversal order. Enable with the
//! `parallel` feature.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "parallel")]
//! # fn main() {
//! use ferro_m2mc::calibration::{Chromosome, ColumnLayout, DataDirProvider, ReferenceMap};
//! use ferro_m2mc::convert::{ConversionRequest, LocusSource};
//! use ferro_m2mc::coords::Direction;
//! use ferro_m2mc::parallel::convert_chromosomes_parallel;
//!
//! let provider = DataDirProvider::new("data", ColumnLayout::CytologicalFirst);
//! let requests: Vec<ConversionRequest> = Chromosome::all()
//!     .map(|chr| {
//!         ConversionRequest::new(
//!             chr,
//!             Direction::GeneticToPhysical,
//!             LocusSource::ReferenceMap(ReferenceMap::Umc98),
//!         )
//!     })
//!     .collect();
//!
//! let reports = convert_chromosomes_parallel(&provider, &requests);
//! assert_eq!(reports.len(), 10);
//! # }
//! # #[cfg(not(feature = "parallel"))]
//! # fn main() {}
//! ```

use rayon::prelude::*;

use crate::calibration::CalibrationProvider;
use crate::convert::{convert_request, ConversionReport, ConversionRequest};
use crate::error::M2mcError;

/// Convert multiple requests in parallel
///
/// Returns a vector of results, one for each request.
/// Order is preserved.
pub fn convert_chromosomes_parallel<P: CalibrationProvider + Sync>(
    provider: &P,
    requests: &[ConversionRequest],
) -> Vec<Result<ConversionReport, M2mcError>> {
    requests
        .par_iter()
        .map(|request| convert_request(provider, request))
        .collect()
}

/// Convert multiple requests in parallel, filtering errors
///
/// Returns only the successful reports.
pub fn convert_chromosomes_parallel_ok<P: CalibrationProvider + Sync>(
    provider: &P,
    requests: &[ConversionRequest],
) -> Vec<ConversionReport> {
    requests
        .par_iter()
        .filter_map(|request| convert_request(provider, request).ok())
        .collect()
}

/// Statistics from parallel processing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParallelStats {
    /// Total requests processed
    pub total: usize,
    /// Successfully converted
    pub success: usize,
    /// Failed to convert
    pub errors: usize,
}

impl ParallelStats {
    /// Tally a batch of results.
    pub fn from_results(results: &[Result<ConversionReport, M2mcError>]) -> Self {
        let success = results.iter().filter(|r| r.is_ok()).count();
        Self {
            total: results.len(),
            success,
            errors: results.len() - success,
        }
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.success as f64 / self.total as f64) * 100.0
        }
    }
}
