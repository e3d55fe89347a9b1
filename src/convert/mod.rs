//! Coordinate conversion
//!
//! Provides the two-stage conversion pipeline:
//! - Anchor rescale from a submitted genetic map onto RN-cM
//! - Table lookups between RN-cM, arm fraction and micrometers
//! - Batch conversion of whole locus lists

pub mod batch;
pub mod lookup;
pub mod rescale;

pub use batch::{
    convert_request, effective_factor, ChromosomeSpan, ConversionReport, ConversionRequest,
    ConversionResult, LocusBatchConverter, LocusSource,
};
pub use lookup::{ArmAwareLookup, LookupVariant};
pub use rescale::{rescale, AnchorRescaler, MapAnchors, Rescaled};
