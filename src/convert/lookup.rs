//! Calibration table lookups
//!
//! Every lookup scans the table with a sliding `(previous, current)` window
//! over one source column and returns the target value of the current row
//! in the matching window. The scan always runs to the end of the table, so
//! the last matching row wins. Results are recorded table values; nothing is
//! interpolated.
//!
//! Genetic queries use a forward bracket `previous < query <= current`.
//! Cytological queries are arm-aware: the arm mode selects which side of the
//! centromere may match, and a flag records whether the scan has reached the
//! centromere row.

use crate::calibration::CalibrationTable;
use crate::coords::{ArmMode, Dimension};
use serde::{Deserialize, Serialize};

/// Target value of [`LookupVariant::CmToPhysical`] when nothing matches.
pub const DEFAULT_PHYSICAL: f64 = 0.0;

/// Target value of [`LookupVariant::CmToCytological`] when nothing matches.
pub const DEFAULT_CYTOLOGICAL: f64 = 1.0;

/// Results below this are replaced by the last table value for queries past
/// the end of the table.
pub const PAST_END_THRESHOLD: f64 = 1.0;

/// The four table lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupVariant {
    CmToPhysical,
    CmToCytological,
    CytologicalToPhysical,
    CytologicalToGenetic,
}

impl LookupVariant {
    /// Column the query is compared against.
    pub fn source(self) -> Dimension {
        match self {
            LookupVariant::CmToPhysical | LookupVariant::CmToCytological => Dimension::Genetic,
            LookupVariant::CytologicalToPhysical | LookupVariant::CytologicalToGenetic => {
                Dimension::Cytological
            }
        }
    }

    /// Column the result is read from.
    pub fn target(self) -> Dimension {
        match self {
            LookupVariant::CmToPhysical | LookupVariant::CytologicalToPhysical => {
                Dimension::Physical
            }
            LookupVariant::CmToCytological => Dimension::Cytological,
            LookupVariant::CytologicalToGenetic => Dimension::Genetic,
        }
    }

    /// Whether the lookup depends on the arm mode.
    pub fn is_arm_aware(self) -> bool {
        matches!(
            self,
            LookupVariant::CytologicalToPhysical | LookupVariant::CytologicalToGenetic
        )
    }
}

/// Scan state threaded through the arm-aware fold.
#[derive(Debug, Clone, Copy)]
struct ArmScan {
    value: f64,
    centromere_passed: bool,
}

/// Lookups over one calibration table.
#[derive(Debug, Clone, Copy)]
pub struct ArmAwareLookup<'a> {
    table: &'a CalibrationTable,
}

impl<'a> ArmAwareLookup<'a> {
    pub fn new(table: &'a CalibrationTable) -> Self {
        Self { table }
    }

    /// The table being scanned.
    pub fn table(&self) -> &'a CalibrationTable {
        self.table
    }

    /// Run any variant. `mode` is ignored by the forward lookups.
    pub fn lookup(&self, variant: LookupVariant, query: f64, mode: ArmMode) -> f64 {
        match variant {
            LookupVariant::CmToPhysical => self.cm_to_physical(query),
            LookupVariant::CmToCytological => self.cm_to_cytological(query),
            LookupVariant::CytologicalToPhysical => self.cytological_to_physical(query, mode),
            LookupVariant::CytologicalToGenetic => self.cytological_to_genetic(query, mode),
        }
    }

    /// RN-cM position to micrometers from the short-arm tip.
    pub fn cm_to_physical(&self, rn_position: f64) -> f64 {
        self.forward(
            rn_position,
            LookupVariant::CmToPhysical,
            DEFAULT_PHYSICAL,
        )
    }

    /// RN-cM position to arm fraction.
    ///
    /// Loci named as the centromere are not looked up; the batch converter
    /// assigns them 0 directly.
    pub fn cm_to_cytological(&self, rn_position: f64) -> f64 {
        self.forward(
            rn_position,
            LookupVariant::CmToCytological,
            DEFAULT_CYTOLOGICAL,
        )
    }

    /// Arm fraction to micrometers from the short-arm tip.
    pub fn cytological_to_physical(&self, fraction: f64, mode: ArmMode) -> f64 {
        self.arm_aware(
            fraction,
            mode,
            LookupVariant::CytologicalToPhysical,
            DEFAULT_PHYSICAL,
        )
    }

    /// Arm fraction to RN-cM position.
    ///
    /// Unmatched queries return the genetic position of the first row.
    pub fn cytological_to_genetic(&self, fraction: f64, mode: ArmMode) -> f64 {
        let default = self.table.rows().first().map_or(0.0, |row| row.genetic);
        self.arm_aware(
            fraction,
            mode,
            LookupVariant::CytologicalToGenetic,
            default,
        )
    }

    fn forward(&self, query: f64, variant: LookupVariant, default: f64) -> f64 {
        let (source, target) = (variant.source(), variant.target());
        let rows = self.table.rows();

        let value = rows.windows(2).fold(default, |best, pair| {
            let (prev, curr) = (pair[0].value(source), pair[1].value(source));
            if prev < query && query <= curr {
                pair[1].value(target)
            } else {
                best
            }
        });

        match rows.last() {
            Some(last) if query > last.value(source) && value < PAST_END_THRESHOLD => {
                log::warn!(
                    "Position {} lies past the end of the chromosome {} table",
                    query,
                    self.table.chromosome()
                );
                last.value(target)
            }
            _ => value,
        }
    }

    fn arm_aware(&self, query: f64, mode: ArmMode, variant: LookupVariant, default: f64) -> f64 {
        let (source, target) = (variant.source(), variant.target());

        let init = ArmScan {
            value: default,
            centromere_passed: false,
        };
        self.table
            .rows()
            .windows(2)
            .fold(init, |scan, pair| {
                let prev = pair[0].value(source);
                let curr = pair[1].value(source);
                let centromere_passed = scan.centromere_passed || curr == 0.0;

                let short_hit = mode == ArmMode::Short
                    && !centromere_passed
                    && (query == curr || (query < prev && query > curr));
                let long_hit = mode == ArmMode::Long
                    && centromere_passed
                    && (query == curr || (query > prev && query < curr));
                let centromere_hit = query == 0.0 && curr == 0.0;

                ArmScan {
                    value: if short_hit || long_hit || centromere_hit {
                        pair[1].value(target)
                    } else {
                        scan.value
                    },
                    centromere_passed,
                }
            })
            .value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::CalibrationRow;

    fn table(rows: &[(f64, f64, f64)]) -> CalibrationTable {
        CalibrationTable::new("1", rows.iter().copied().map(CalibrationRow::from).collect())
            .unwrap()
    }

    /// Short arm fractions run 1.0 down to 0, long arm 0 up to 1.0.
    fn maize_like() -> CalibrationTable {
        table(&[
            (0.0, 1.0, 0.0),
            (10.0, 0.8, 5.0),
            (20.0, 0.5, 12.0),
            (30.0, 0.2, 18.0),
            (40.0, 0.0, 22.0),
            (60.0, 0.4, 30.0),
            (80.0, 0.7, 41.0),
            (100.0, 1.0, 50.0),
        ])
    }

    #[test]
    fn test_variant_dimensions() {
        assert_eq!(LookupVariant::CmToPhysical.source(), Dimension::Genetic);
        assert_eq!(LookupVariant::CytologicalToGenetic.target(), Dimension::Genetic);
        assert!(LookupVariant::CytologicalToPhysical.is_arm_aware());
        assert!(!LookupVariant::CmToCytological.is_arm_aware());
    }

    #[test]
    fn test_forward_bracket_is_half_open() {
        let t = maize_like();
        let lookup = ArmAwareLookup::new(&t);
        assert_eq!(lookup.cm_to_physical(10.0), 5.0);
        assert_eq!(lookup.cm_to_physical(10.5), 12.0);
        assert_eq!(lookup.cm_to_cytological(55.0), 0.4);
    }

    #[test]
    fn test_forward_defaults() {
        let t = maize_like();
        let lookup = ArmAwareLookup::new(&t);
        // The first row is never a bracket end
        assert_eq!(lookup.cm_to_physical(0.0), DEFAULT_PHYSICAL);
        assert_eq!(lookup.cm_to_cytological(-3.0), DEFAULT_CYTOLOGICAL);
    }

    #[test]
    fn test_past_end_uses_last_value() {
        let t = maize_like();
        let lookup = ArmAwareLookup::new(&t);
        assert_eq!(lookup.cm_to_physical(130.0), 50.0);
        assert_eq!(lookup.cm_to_cytological(130.0), 1.0);
    }

    #[test]
    fn test_forward_last_match_wins() {
        let t = table(&[
            (0.0, 1.0, 0.0),
            (20.0, 0.0, 7.0),
            (10.0, 0.5, 9.0),
            (30.0, 1.0, 11.0),
        ]);
        // 15 falls in (0, 20] and again in (10, 30]
        assert_eq!(ArmAwareLookup::new(&t).cm_to_physical(15.0), 11.0);
    }

    #[test]
    fn test_arm_aware_long_arm() {
        let t = maize_like();
        let lookup = ArmAwareLookup::new(&t);
        assert_eq!(lookup.cytological_to_genetic(0.7, ArmMode::Long), 80.0);
        assert_eq!(lookup.cytological_to_genetic(0.5, ArmMode::Long), 80.0);
        assert_eq!(lookup.cytological_to_physical(0.2, ArmMode::Long), 30.0);
    }

    #[test]
    fn test_arm_aware_short_arm() {
        let t = maize_like();
        let lookup = ArmAwareLookup::new(&t);
        assert_eq!(lookup.cytological_to_genetic(0.8, ArmMode::Short), 10.0);
        assert_eq!(lookup.cytological_to_genetic(0.6, ArmMode::Short), 20.0);
        assert_eq!(lookup.cytological_to_physical(0.3, ArmMode::Short), 18.0);
    }

    #[test]
    fn test_short_arm_window_closes_at_centromere_row() {
        let t = maize_like();
        let lookup = ArmAwareLookup::new(&t);
        // (0.2, 0.0) is the window that reaches the centromere row
        assert_eq!(lookup.cytological_to_genetic(0.1, ArmMode::Short), 0.0);
        assert_eq!(lookup.cytological_to_physical(0.1, ArmMode::Short), 0.0);
    }

    #[test]
    fn test_centromere_in_second_row_still_opens_long_arm() {
        // The first window already reaches the centromere, so only the
        // long arm can match past it
        let t = table(&[(0.0, 1.0, 0.0), (10.0, 0.0, 4.0), (30.0, 0.5, 9.0), (50.0, 1.0, 14.0)]);
        let lookup = ArmAwareLookup::new(&t);
        assert_eq!(lookup.cytological_to_genetic(0.5, ArmMode::Short), 0.0);
        assert_eq!(lookup.cytological_to_physical(0.5, ArmMode::Short), 0.0);
        assert_eq!(lookup.cytological_to_genetic(0.5, ArmMode::Long), 30.0);
        assert_eq!(lookup.cytological_to_physical(1.0, ArmMode::Long), 14.0);
        assert_eq!(lookup.cytological_to_genetic(0.0, ArmMode::Short), 10.0);
    }

    #[test]
    fn test_arm_aware_centromere_fixed_point() {
        let t = maize_like();
        let lookup = ArmAwareLookup::new(&t);
        for mode in [ArmMode::Short, ArmMode::Long] {
            assert_eq!(lookup.cytological_to_genetic(0.0, mode), 40.0);
            assert_eq!(lookup.cytological_to_physical(0.0, mode), 22.0);
        }
    }

    #[test]
    fn test_arm_aware_defaults() {
        let t = maize_like();
        let lookup = ArmAwareLookup::new(&t);
        assert_eq!(lookup.cytological_to_genetic(1.5, ArmMode::Long), 0.0);
        assert_eq!(lookup.cytological_to_physical(1.5, ArmMode::Long), 0.0);

        let offset = table(&[(3.0, 1.0, 0.0), (9.0, 0.0, 4.0)]);
        assert_eq!(
            ArmAwareLookup::new(&offset).cytological_to_genetic(0.5, ArmMode::Long),
            3.0
        );
    }

    #[test]
    fn test_arm_aware_last_match_wins() {
        let t = table(&[
            (0.0, -1.0, 0.0),
            (50.0, 0.0, 10.0),
            (60.0, 0.5, 12.0),
            (70.0, 0.2, 14.0),
            (80.0, 0.5, 16.0),
        ]);
        let lookup = ArmAwareLookup::new(&t);
        // 0.5 equals the current source in two long-arm windows
        assert_eq!(lookup.cytological_to_genetic(0.5, ArmMode::Long), 80.0);
    }

    #[test]
    fn test_empty_and_single_row_tables() {
        let single = table(&[(5.0, 0.0, 2.0)]);
        let lookup = ArmAwareLookup::new(&single);
        assert_eq!(lookup.cm_to_physical(1.0), DEFAULT_PHYSICAL);
        assert_eq!(lookup.cytological_to_genetic(0.0, ArmMode::Short), 5.0);

        let empty = table(&[]);
        let lookup = ArmAwareLookup::new(&empty);
        assert_eq!(lookup.cytological_to_genetic(0.0, ArmMode::Long), 0.0);
        assert_eq!(lookup.cm_to_cytological(4.0), DEFAULT_CYTOLOGICAL);
    }

    #[test]
    fn test_lookup_dispatch() {
        let t = maize_like();
        let lookup = ArmAwareLookup::new(&t);
        assert_eq!(
            lookup.lookup(LookupVariant::CmToPhysical, 10.0, ArmMode::Long),
            lookup.cm_to_physical(10.0)
        );
        assert_eq!(
            lookup.lookup(LookupVariant::CytologicalToGenetic, 0.7, ArmMode::Long),
            80.0
        );
    }
}
