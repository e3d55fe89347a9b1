//! Property-based tests for ferro-m2mc
//!
//! These tests use proptest to check the conversion invariants across
//! generated anchors, tables and locus lists.

use ferro_m2mc::convert::{AnchorRescaler, ArmAwareLookup, MapAnchors};
use ferro_m2mc::{
    parse_locus_str, Arm, ArmMode, CalibrationRow, CalibrationTable, Direction, Locus,
    LocusBatchConverter,
};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

/// Strictly ordered anchors with a non-empty arm on each side.
fn anchors_strategy() -> impl Strategy<Value = MapAnchors> {
    (-50.0f64..50.0, 1.0f64..100.0, 1.0f64..100.0)
        .prop_map(|(min, short, long)| MapAnchors::new(min, min + short, min + short + long))
}

/// A table whose short arm fractions fall from 1 towards 0, followed by a
/// single centromere row and a long arm rising back to 1.
fn table_strategy() -> impl Strategy<Value = CalibrationTable> {
    (
        prop::collection::vec((0.5f64..20.0, 0.5f64..10.0), 1..8),
        prop::collection::vec((0.5f64..20.0, 0.5f64..10.0), 1..8),
    )
        .prop_map(|(short, long)| {
            let mut rows = Vec::new();
            let (mut genetic, mut physical) = (0.0, 0.0);

            let n_short = short.len() as f64;
            for (i, (dg, dp)) in short.iter().enumerate() {
                rows.push(CalibrationRow::new(genetic, 1.0 - i as f64 / n_short, physical));
                genetic += dg;
                physical += dp;
            }
            rows.push(CalibrationRow::new(genetic, 0.0, physical));

            let n_long = long.len() as f64;
            for (i, (dg, dp)) in long.iter().enumerate() {
                genetic += dg;
                physical += dp;
                rows.push(CalibrationRow::new(genetic, (i + 1) as f64 / n_long, physical));
            }
            CalibrationTable::new("4", rows).unwrap()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Rescaling never reorders two positions on the same arm
    #[test]
    fn rescale_monotonic_within_arm(
        input in anchors_strategy(),
        calibration in anchors_strategy(),
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
        long_arm in any::<bool>(),
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let (start, end) = if long_arm {
            (input.centromere, input.max)
        } else {
            (input.min, input.centromere)
        };
        let x = start + lo * (end - start);
        let y = start + hi * (end - start);
        prop_assume!(long_arm || y < input.centromere);

        let rescaler = AnchorRescaler::new(input, calibration);
        prop_assert!(rescaler.rescale(x).rn_position <= rescaler.rescale(y).rn_position);
    }

    /// The submitted centromere always lands on the calibration centromere
    #[test]
    fn rescale_centromere_to_centromere(
        input in anchors_strategy(),
        calibration in anchors_strategy(),
    ) {
        let r = AnchorRescaler::new(input, calibration).rescale(input.centromere);
        prop_assert_eq!(r.fraction, 0.0);
        prop_assert_eq!(r.rn_position, calibration.centromere);
    }

    /// The map end lands on the calibration end
    #[test]
    fn rescale_max_to_calibration_max(
        input in anchors_strategy(),
        calibration in anchors_strategy(),
    ) {
        let r = AnchorRescaler::new(input, calibration).rescale(input.max);
        prop_assert_eq!(r.fraction, 1.0);
        prop_assert!((r.rn_position - calibration.max).abs() < 1e-9);
    }

    /// A cytological query of 0 returns the centromere row in either arm mode
    #[test]
    fn centromere_is_fixed_point(table in table_strategy(), long in any::<bool>()) {
        let mode = if long { ArmMode::Long } else { ArmMode::Short };
        let centromere = *table.centromere().unwrap();
        let lookup = ArmAwareLookup::new(&table);
        prop_assert_eq!(lookup.cytological_to_genetic(0.0, mode), centromere.genetic);
        prop_assert_eq!(lookup.cytological_to_physical(0.0, mode), centromere.physical);
    }

    /// Lookups return recorded values or a default, never interpolations
    #[test]
    fn lookups_return_table_values(table in table_strategy(), query in -10.0f64..200.0) {
        let lookup = ArmAwareLookup::new(&table);
        let physical = lookup.cm_to_physical(query);
        prop_assert!(physical == 0.0 || table.rows().iter().any(|r| r.physical == physical));
        let cytological = lookup.cm_to_cytological(query);
        prop_assert!(cytological == 1.0 || table.rows().iter().any(|r| r.cytological == cytological));
    }

    /// Centromere-named loci always get the table centromere
    #[test]
    fn centromere_locus_gets_table_values(
        table in table_strategy(),
        before in 1.0f64..50.0,
        after in 1.0f64..50.0,
        suffix in "[0-9]{0,2}",
    ) {
        let name = format!("cent{}", suffix);
        let loci = vec![
            Locus::new("a", 0.0),
            Locus::new(name.as_str(), before),
            Locus::new("b", before + after),
        ];
        let report = LocusBatchConverter::new(&table)
            .convert(&loci, Direction::GeneticToPhysical)
            .unwrap();
        let centromere = table.centromere().unwrap();
        let result = &report.results[1];
        prop_assert_eq!(result.arm, Arm::Centromere);
        prop_assert_eq!(result.cytological_fraction, 0.0);
        prop_assert_eq!(result.physical_position, centromere.physical);
    }

    /// Every submitted locus yields exactly one result, in order
    #[test]
    fn cytological_batch_preserves_order(
        table in table_strategy(),
        short in prop::collection::vec(0.0f64..1.0, 0..10),
        long in prop::collection::vec(0.0f64..1.0, 0..10),
    ) {
        let mut loci: Vec<Locus> = short
            .iter()
            .enumerate()
            .map(|(i, p)| Locus::new(format!("s{}", i), *p))
            .collect();
        loci.push(Locus::new("cent", 0.0));
        loci.extend(long.iter().enumerate().map(|(i, p)| Locus::new(format!("l{}", i), *p)));

        let report = LocusBatchConverter::new(&table)
            .convert(&loci, Direction::CytologicalToGenetic)
            .unwrap();
        prop_assert_eq!(report.len(), loci.len());
        for (locus, result) in loci.iter().zip(&report.results) {
            prop_assert_eq!(&locus.name, &result.name);
        }
        prop_assert!(report.results[..short.len()].iter().all(|r| r.arm == Arm::Short));
        prop_assert!(report.results[short.len() + 1..].iter().all(|r| r.arm == Arm::Long));
    }

    /// Parser never panics on arbitrary input
    #[test]
    fn parse_locus_list_never_panics(s in "\\PC{0,200}") {
        let _ = parse_locus_str(&s);
    }

    /// Well-formed lines always parse
    #[test]
    fn parse_locus_list_accepts_tab_separated(
        name in "[a-z][a-z0-9_]{0,10}",
        position in -1000.0f64..1000.0,
    ) {
        let loci = parse_locus_str(&format!("{}\t{}\n", name, position)).unwrap();
        prop_assert_eq!(loci.len(), 1);
        prop_assert_eq!(&loci[0].name, &name);
        prop_assert_eq!(loci[0].position, position);
    }
}
