//! Fuzz target for the calibration table parser

#![no_main]

use ferro_m2mc::{ArmAwareLookup, ArmMode, CalibrationTable, ColumnLayout};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1000 {
        return;
    }

    for layout in [ColumnLayout::GeneticFirst, ColumnLayout::CytologicalFirst] {
        if let Ok(table) = CalibrationTable::parse("1", data, layout) {
            let _ = table.anchors();
            let lookup = ArmAwareLookup::new(&table);
            let _ = lookup.cm_to_physical(12.5);
            let _ = lookup.cytological_to_genetic(0.0, ArmMode::Short);
            let _ = lookup.cytological_to_physical(0.5, ArmMode::Long);
        }
    }
});
