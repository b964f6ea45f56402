//! Scrap weight conversion tests
//!
//! Properties of the KG conversion engine across every material category.

use proptest::prelude::*;
use shared::conversion::{convert, paper_weight, piece_weight, round_to};
use shared::{ConversionInput, MaterialCategory, SheetCut, Unit};

fn category_strategy() -> impl Strategy<Value = MaterialCategory> {
    prop::sample::select(MaterialCategory::ALL.to_vec())
}

/// Positive measurement with up to two decimals
fn measure_strategy() -> impl Strategy<Value = f64> {
    (1u32..=200_000u32).prop_map(|n| n as f64 / 100.0)
}

// ============================================================================
// Literal Examples
// ============================================================================

#[test]
fn paper_literal_example() {
    let kg = convert(
        MaterialCategory::Paper,
        &ConversionInput::sheets(1000.0, 1000.0, 170.0, 1000.0),
    );
    assert_eq!(round_to(kg, 3), 109.677);
}

#[test]
fn reel_literal_example() {
    let input = ConversionInput {
        width: Some(1000.0),
        gsm: Some(120.0),
        running_length: Some(500.0),
        unit: Some(Unit::Meter),
        ..Default::default()
    };
    assert_eq!(round_to(convert(MaterialCategory::Reel, &input), 2), 38709.68);
}

#[test]
fn production_balance_piece_feeds_paper_formula() {
    let cut = SheetCut {
        size_length: 1000.0,
        size_width: 700.0,
        cut_length: 800.0,
        cut_width: 700.0,
    };
    let (length, width) = cut.balance();
    assert_eq!((length, width), (200.0, 0.0));

    // a zero balance width leaves nothing to weigh
    let kg = paper_weight(Some(width), Some(length), Some(170.0), Some(500.0));
    assert_eq!(kg, 0.0);
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// KG is an identity on the entered quantity for every category
    #[test]
    fn prop_kg_identity(category in category_strategy(), quantity in measure_strategy()) {
        let mut input = ConversionInput::sheets(1000.0, 1000.0, 170.0, 10.0);
        input.unit = Some(Unit::Kg);
        input.direct_quantity = Some(quantity);
        prop_assert_eq!(convert(category, &input), quantity);
    }

    /// Any missing PAPER field yields zero
    #[test]
    fn prop_paper_missing_field_is_zero(
        width in measure_strategy(),
        length in measure_strategy(),
        gsm in measure_strategy(),
        sheets in measure_strategy(),
        missing in 0usize..4,
    ) {
        let mut fields = [Some(width), Some(length), Some(gsm), Some(sheets)];
        fields[missing] = if missing % 2 == 0 { None } else { Some(0.0) };
        let kg = paper_weight(fields[0], fields[1], fields[2], fields[3]);
        prop_assert_eq!(kg, 0.0);
    }

    /// PAPER weight is positive and linear in the sheet count
    #[test]
    fn prop_paper_linear_in_sheets(
        width in measure_strategy(),
        length in measure_strategy(),
        gsm in measure_strategy(),
        sheets in 1u32..1000,
    ) {
        let one = paper_weight(Some(width), Some(length), Some(gsm), Some(1.0));
        let many = paper_weight(Some(width), Some(length), Some(gsm), Some(sheets as f64));
        prop_assert!(one > 0.0);
        prop_assert!((many - one * sheets as f64).abs() <= many.abs() * 1e-9);
    }

    /// PCS uses weight per piece × count regardless of category fields
    #[test]
    fn prop_pcs_precedence(
        category in category_strategy(),
        per_piece in measure_strategy(),
        count in 1u32..10_000,
    ) {
        let mut input = ConversionInput::pieces(per_piece, count as f64);
        input.width = Some(1000.0);
        input.length = Some(1000.0);
        input.gsm = Some(170.0);
        input.running_length = Some(500.0);
        let kg = convert(category, &input);
        prop_assert_eq!(kg, piece_weight(Some(per_piece), Some(count as f64)));
        prop_assert!((kg - per_piece * count as f64).abs() < 1e-9);
    }

    /// The engine never produces a non-finite or negative weight from positive input
    #[test]
    fn prop_weight_is_finite(
        category in category_strategy(),
        width in measure_strategy(),
        length in measure_strategy(),
        gsm in measure_strategy(),
    ) {
        let input = ConversionInput {
            width: Some(width),
            length: Some(length),
            running_length: Some(length),
            gsm: Some(gsm),
            sheet_count: Some(10.0),
            density_g_per_cc: Some(0.91),
            thickness_micron: Some(12.0),
            direct_quantity: Some(width),
            unit: Some(Unit::Meter),
            ..Default::default()
        };
        let kg = convert(category, &input);
        prop_assert!(kg.is_finite());
        prop_assert!(kg >= 0.0);
    }
}
