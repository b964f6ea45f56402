//! Scrap weight conversion
//!
//! Converts the physical measurements entered on the scrap forms into a
//! canonical weight in KG. Every function here is total: input that does not
//! satisfy a formula yields `0.0`, which the forms use to keep submission
//! disabled.

use crate::models::{ConversionInput, MaterialCategory, Unit};

/// PAPER: `(W × L × GSM × Sheets) / 1550 / 1,000,000`
pub const PAPER_DIVISOR: f64 = 1_550_000_000.0;
/// REEL: `(W × GSM × RunningLength) / 1550`
pub const REEL_DIVISOR: f64 = 1550.0;
/// FILM width is divided by this before applying the film formula
pub const FILM_WIDTH_DIVISOR: f64 = 25.4;
/// FILM: `(W/25.4 × L × Density × Thickness) / 1000`
pub const FILM_DIVISOR: f64 = 1000.0;

/// Convert entered measurements into KG.
///
/// Precedence: a KG unit is an identity on `direct_quantity` for every
/// category, then a PCS unit uses `weight_per_piece × piece_count`, then the
/// category formula applies.
pub fn convert(category: MaterialCategory, input: &ConversionInput) -> f64 {
    match input.unit {
        Some(Unit::Kg) => return direct(input),
        Some(Unit::Pcs) => return piece_weight(input.weight_per_piece, input.piece_count),
        _ => {}
    }

    match category {
        MaterialCategory::Paper => paper_weight(input.width, input.length, input.gsm, input.sheet_count),
        MaterialCategory::Reel => reel_weight(input.width, input.gsm, input.running_length),
        MaterialCategory::Film => film_weight(
            input.width,
            input.running_length.filter(|v| usable(*v)).or(input.length),
            input.density_g_per_cc,
            input.thickness_micron,
        ),
        // LITRE is taken 1:1 with KG for ink
        MaterialCategory::Ink => direct(input),
        MaterialCategory::Other => direct(input),
    }
}

/// Sheet paper weight. The production flow passes the balance-piece
/// dimensions here.
pub fn paper_weight(
    width: Option<f64>,
    length: Option<f64>,
    gsm: Option<f64>,
    sheet_count: Option<f64>,
) -> f64 {
    match (required(width), required(length), required(gsm), required(sheet_count)) {
        (Some(w), Some(l), Some(g), Some(s)) => (w * l * g * s) / PAPER_DIVISOR,
        _ => 0.0,
    }
}

pub fn reel_weight(width: Option<f64>, gsm: Option<f64>, running_length: Option<f64>) -> f64 {
    match (required(width), required(gsm), required(running_length)) {
        (Some(w), Some(g), Some(r)) => (w * g * r) / REEL_DIVISOR,
        _ => 0.0,
    }
}

pub fn film_weight(
    width: Option<f64>,
    length: Option<f64>,
    density: Option<f64>,
    thickness_micron: Option<f64>,
) -> f64 {
    match (required(width), required(length), required(density), required(thickness_micron)) {
        (Some(w), Some(l), Some(d), Some(t)) => ((w / FILM_WIDTH_DIVISOR) * l * d * t) / FILM_DIVISOR,
        _ => 0.0,
    }
}

pub fn piece_weight(weight_per_piece: Option<f64>, piece_count: Option<f64>) -> f64 {
    match (required(weight_per_piece), required(piece_count)) {
        (Some(w), Some(n)) => w * n,
        _ => 0.0,
    }
}

/// Round for display only; the engine itself never rounds.
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

fn direct(input: &ConversionInput) -> f64 {
    input.direct_quantity.filter(|q| q.is_finite()).unwrap_or(0.0)
}

fn usable(value: f64) -> bool {
    value.is_finite() && value != 0.0
}

fn required(value: Option<f64>) -> Option<f64> {
    value.filter(|v| usable(*v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_kg_is_identity_for_every_category() {
        let mut input = ConversionInput::sheets(1000.0, 1000.0, 170.0, 1000.0);
        input.unit = Some(Unit::Kg);
        input.direct_quantity = Some(42.5);
        for category in MaterialCategory::ALL {
            assert_eq!(convert(category, &input), 42.5);
        }
    }

    #[test]
    fn test_kg_without_quantity_is_zero() {
        let input = ConversionInput {
            unit: Some(Unit::Kg),
            ..Default::default()
        };
        assert_eq!(convert(MaterialCategory::Paper, &input), 0.0);
    }

    #[test]
    fn test_paper_formula() {
        let input = ConversionInput::sheets(1000.0, 1000.0, 170.0, 1000.0);
        let kg = convert(MaterialCategory::Paper, &input);
        assert!(approx(kg, (1000.0 * 1000.0 * 170.0 * 1000.0) / 1_550_000_000.0));
        assert!((kg - 109.677).abs() < 0.001);
    }

    #[test]
    fn test_paper_missing_field_is_zero() {
        let input = ConversionInput::sheets(700.0, 0.0, 170.0, 10.0);
        assert_eq!(convert(MaterialCategory::Paper, &input), 0.0);

        let mut no_gsm = ConversionInput::sheets(700.0, 1000.0, 170.0, 10.0);
        no_gsm.gsm = None;
        assert_eq!(convert(MaterialCategory::Paper, &no_gsm), 0.0);
    }

    #[test]
    fn test_reel_formula() {
        let input = ConversionInput {
            width: Some(1000.0),
            gsm: Some(120.0),
            running_length: Some(500.0),
            unit: Some(Unit::Meter),
            ..Default::default()
        };
        let kg = convert(MaterialCategory::Reel, &input);
        assert!(approx(kg, (1000.0 * 120.0 * 500.0) / 1550.0));
        assert!((kg - 38709.68).abs() < 0.01);
    }

    #[test]
    fn test_reel_without_unit_uses_formula() {
        let input = ConversionInput {
            width: Some(1000.0),
            gsm: Some(120.0),
            running_length: Some(500.0),
            ..Default::default()
        };
        assert!(convert(MaterialCategory::Reel, &input) > 0.0);
    }

    #[test]
    fn test_film_prefers_running_length() {
        let input = ConversionInput {
            width: Some(254.0),
            running_length: Some(100.0),
            length: Some(999.0),
            density_g_per_cc: Some(0.91),
            thickness_micron: Some(12.0),
            unit: Some(Unit::Meter),
            ..Default::default()
        };
        // (254 / 25.4) × 100 × 0.91 × 12 / 1000
        assert!(approx(convert(MaterialCategory::Film, &input), 10.92));
    }

    #[test]
    fn test_film_falls_back_to_length() {
        let input = ConversionInput {
            width: Some(254.0),
            running_length: Some(0.0),
            length: Some(100.0),
            density_g_per_cc: Some(0.91),
            thickness_micron: Some(12.0),
            unit: Some(Unit::Meter),
            ..Default::default()
        };
        assert!(approx(convert(MaterialCategory::Film, &input), 10.92));
    }

    #[test]
    fn test_film_missing_density_is_zero() {
        let input = ConversionInput {
            width: Some(254.0),
            running_length: Some(100.0),
            thickness_micron: Some(12.0),
            unit: Some(Unit::Meter),
            ..Default::default()
        };
        assert_eq!(convert(MaterialCategory::Film, &input), 0.0);
    }

    #[test]
    fn test_pcs_takes_precedence_over_category() {
        let mut input = ConversionInput::pieces(0.25, 40.0);
        input.width = Some(1000.0);
        input.length = Some(1000.0);
        input.gsm = Some(170.0);
        input.sheet_count = Some(1000.0);
        for category in MaterialCategory::ALL {
            assert!(approx(convert(category, &input), 10.0));
        }
    }

    #[test]
    fn test_pcs_missing_count_is_zero() {
        let input = ConversionInput {
            weight_per_piece: Some(0.25),
            unit: Some(Unit::Pcs),
            ..Default::default()
        };
        assert_eq!(convert(MaterialCategory::Other, &input), 0.0);
    }

    #[test]
    fn test_ink_and_other_pass_through() {
        let litre = ConversionInput {
            direct_quantity: Some(3.5),
            unit: Some(Unit::Litre),
            ..Default::default()
        };
        assert_eq!(convert(MaterialCategory::Ink, &litre), 3.5);

        let each = ConversionInput {
            direct_quantity: Some(8.0),
            unit: Some(Unit::Each),
            ..Default::default()
        };
        assert_eq!(convert(MaterialCategory::Ink, &each), 8.0);
        assert_eq!(convert(MaterialCategory::Other, &each), 8.0);
    }

    #[test]
    fn test_non_finite_input_is_zero() {
        let input = ConversionInput::sheets(f64::NAN, 1000.0, 170.0, 10.0);
        assert_eq!(convert(MaterialCategory::Paper, &input), 0.0);

        let direct = ConversionInput::kg(f64::INFINITY);
        assert_eq!(convert(MaterialCategory::Other, &direct), 0.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(109.677_419_354_8, 3), 109.677);
        assert_eq!(round_to(38709.677_419, 2), 38709.68);
        assert_eq!(round_to(f64::NAN, 2), 0.0);
    }
}
