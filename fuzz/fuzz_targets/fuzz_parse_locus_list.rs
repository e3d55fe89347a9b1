//! Fuzz target for the locus list parser
//!
//! Feeds arbitrary text to the parser and converts whatever parses against a
//! fixed calibration table.

#![no_main]

use ferro_m2mc::{CalibrationRow, CalibrationTable, Direction, LocusBatchConverter};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if input.len() > 1000 {
            return;
        }

        let Ok(loci) = ferro_m2mc::parse_locus_str(input) else {
            return;
        };

        let Ok(table) = CalibrationTable::new(
            "1",
            vec![
                CalibrationRow::new(0.0, 1.0, 0.0),
                CalibrationRow::new(50.0, 0.0, 10.0),
                CalibrationRow::new(100.0, 1.0, 20.0),
            ],
        ) else {
            return;
        };

        // Conversion may reject the list but must never panic
        let converter = LocusBatchConverter::new(&table);
        let _ = converter.convert(&loci, Direction::GeneticToPhysical);
        let _ = converter.convert(&loci, Direction::CytologicalToGenetic);
    }
});
