//! Integration tests for loading a CSV return into the engine.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::calculations::common::round_half_up;
use tax_core::{CellId, TaxEngine, YesNo};
use tax_data::{CsvLoadError, apply, load_from_file, load_from_str};

const SAMPLE_CSV: &str = include_str!("../test-data/sample_return.csv");

fn sample_engine() -> TaxEngine {
    let assignments = load_from_str(SAMPLE_CSV).expect("Failed to parse sample CSV");
    let mut engine = TaxEngine::new();
    apply(&mut engine, &assignments);
    engine
}

fn rounded(
    engine: &TaxEngine,
    cell: &str,
) -> Decimal {
    round_half_up(engine.amount(cell.parse::<CellId>().expect("valid cell")))
}

#[test]
fn test_sample_parses_every_row() {
    let assignments = load_from_str(SAMPLE_CSV).expect("Failed to parse sample CSV");

    assert_eq!(assignments.len(), 20);
    assert_eq!(assignments[0].cell, CellId::total(4));
    assert_eq!(assignments[0].value, "40,000,000");
}

#[test]
fn test_sample_loads_from_disk() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data/sample_return.csv");

    let from_disk = load_from_file(&path).expect("Failed to load sample file");

    assert_eq!(from_disk, load_from_str(SAMPLE_CSV).expect("Failed to parse"));
}

#[test]
fn test_sample_income_statement() {
    let engine = sample_engine();

    assert_eq!(rounded(&engine, "D7"), dec!(0.20));
    assert_eq!(rounded(&engine, "C66"), dec!(30150000));
    assert_eq!(rounded(&engine, "E117"), dec!(1500000));
    assert_eq!(rounded(&engine, "E121"), dec!(25130000));
    assert_eq!(rounded(&engine, "C126"), dec!(31000000));
    assert_eq!(rounded(&engine, "E126"), dec!(24930000));
}

#[test]
fn test_sample_tax_results() {
    let results = sample_engine().get_tax_results();

    assert_eq!(round_half_up(results.normal_tax), dec!(7229700));
    assert_eq!(round_half_up(results.final_tax), dec!(250000));
    assert_eq!(round_half_up(results.alternate_tax), dec!(5125500));
    assert_eq!(results.minimum_tax, dec!(0));
    assert_eq!(round_half_up(results.tax_chargeable), dec!(7479700));
    assert_eq!(round_half_up(results.donation_credit), dec!(75007.02));
    assert_eq!(round_half_up(results.net_tax_liability), dec!(7404692.98));
    assert_eq!(round_half_up(results.admitted_tax), dec!(3904692.98));
    assert_eq!(results.refundable_tax, dec!(0));
    assert_eq!(results.registered, YesNo::Yes);
}

#[test]
fn test_loading_over_existing_state_keeps_unlisted_cells() {
    let mut engine = TaxEngine::new();
    engine.set_value("C18", "1000");

    let assignments = load_from_str(SAMPLE_CSV).expect("Failed to parse");
    apply(&mut engine, &assignments);

    assert_eq!(engine.amount(CellId::total(18)), dec!(1000));
}

#[test]
fn test_invalid_file_leaves_engine_untouched() {
    let mut engine = sample_engine();
    let before = engine.clone();

    let result = load_from_str("cell,value\nC4,1\nE152,2\n");

    assert!(matches!(result, Err(CsvLoadError::DerivedCell { row: 2, .. })));
    if let Ok(assignments) = result {
        apply(&mut engine, &assignments);
    }
    assert_eq!(engine, before);
}
