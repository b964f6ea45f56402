//! Scrap entry models

use serde::{Deserialize, Serialize};

use super::{MaterialCategory, Unit};

/// Raw physical measurements collected by the entry forms.
/// Which fields are required depends on `(category, unit)`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionInput {
    pub width: Option<f64>,
    pub length: Option<f64>,
    pub sheet_count: Option<f64>,
    pub running_length: Option<f64>,
    pub thickness_micron: Option<f64>,
    pub density_g_per_cc: Option<f64>,
    pub gsm: Option<f64>,
    pub direct_quantity: Option<f64>,
    /// KG per piece, PCS flow only
    pub weight_per_piece: Option<f64>,
    /// PCS flow only
    pub piece_count: Option<f64>,
    pub unit: Option<Unit>,
}

impl ConversionInput {
    /// Direct KG entry
    pub fn kg(quantity: f64) -> Self {
        Self {
            direct_quantity: Some(quantity),
            unit: Some(Unit::Kg),
            ..Default::default()
        }
    }

    /// Per-piece entry
    pub fn pieces(weight_per_piece: f64, piece_count: f64) -> Self {
        Self {
            weight_per_piece: Some(weight_per_piece),
            piece_count: Some(piece_count),
            unit: Some(Unit::Pcs),
            ..Default::default()
        }
    }

    /// Sheet entry for paper
    pub fn sheets(width: f64, length: f64, gsm: f64, sheet_count: f64) -> Self {
        Self {
            width: Some(width),
            length: Some(length),
            gsm: Some(gsm),
            sheet_count: Some(sheet_count),
            unit: Some(Unit::Sheet),
            ..Default::default()
        }
    }
}

/// Where a scrap entry originated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScrapSource {
    Production,
    Manual,
}

/// Sheet sizes of a production job, used to derive the balance piece
/// left over after cutting.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SheetCut {
    pub size_length: f64,
    pub size_width: f64,
    pub cut_length: f64,
    pub cut_width: f64,
}

impl SheetCut {
    /// Balance piece `(length, width)` = Size - CutSize, rounded to 4 decimals
    pub fn balance(&self) -> (f64, f64) {
        (
            round4(self.size_length - self.cut_length),
            round4(self.size_width - self.cut_width),
        )
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Formula parameters persisted with an entry
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheets: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wt_per_packing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_pcs: Option<f64>,
}

impl From<&ConversionInput> for EntryParams {
    fn from(input: &ConversionInput) -> Self {
        let is_pcs = input.unit == Some(Unit::Pcs);
        Self {
            width: input.width,
            length: input.length,
            sheets: input.sheet_count,
            running_length: input.running_length,
            thickness: input.thickness_micron,
            density: input.density_g_per_cc,
            wt_per_packing: input.weight_per_piece.filter(|_| is_pcs),
            number_of_pcs: input.piece_count.filter(|_| is_pcs),
        }
    }
}

/// Scrap entry payload sent to the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScrapEntryRequest {
    pub material_id: i64,
    pub input_qty: f64,
    pub input_unit: Unit,
    pub source: ScrapSource,
    pub reason: Option<String>,
    pub warehouse_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_booking_id: Option<i64>,
    pub converted_weight_kg: f64,
    pub params: EntryParams,
}

/// Quantity recorded as `inputQty`: the sheet count for paper sheets, the piece
/// count for PCS entries, and the converted weight otherwise.
pub fn input_quantity(category: MaterialCategory, input: &ConversionInput, weight_kg: f64) -> f64 {
    match input.unit {
        Some(Unit::Sheet) if category == MaterialCategory::Paper => {
            input.sheet_count.unwrap_or_default()
        }
        Some(Unit::Pcs) => input.piece_count.unwrap_or_default(),
        _ => weight_kg,
    }
}

/// Reasons offered by the manual entry form
pub const SCRAP_REASONS: &[&str] = &[
    "Machine Setup Waste",
    "Color Mismatch",
    "Registration Error",
    "Damaged Raw Material",
    "Trimming Waste",
    "Used",
    "Other",
];

/// "Other" is replaced by the free-text reason
pub fn resolve_reason(reason: &str, custom_reason: Option<&str>) -> Option<String> {
    let reason = reason.trim();
    if reason.is_empty() {
        return None;
    }
    if reason == "Other" {
        return custom_reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);
    }
    Some(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_cut_balance() {
        let cut = SheetCut {
            size_length: 1000.0,
            size_width: 700.0,
            cut_length: 980.5,
            cut_width: 650.0,
        };
        assert_eq!(cut.balance(), (19.5, 50.0));
    }

    #[test]
    fn test_sheet_cut_balance_rounds_to_four_places() {
        let cut = SheetCut {
            size_length: 0.3,
            size_width: 0.3,
            cut_length: 0.1,
            cut_width: 0.0,
        };
        assert_eq!(cut.balance(), (0.2, 0.3));
    }

    #[test]
    fn test_input_quantity_by_unit() {
        let sheets = ConversionInput::sheets(700.0, 1000.0, 170.0, 25.0);
        assert_eq!(input_quantity(MaterialCategory::Paper, &sheets, 1.9), 25.0);

        let pcs = ConversionInput::pieces(0.25, 40.0);
        assert_eq!(input_quantity(MaterialCategory::Other, &pcs, 10.0), 40.0);

        let kg = ConversionInput::kg(12.5);
        assert_eq!(input_quantity(MaterialCategory::Paper, &kg, 12.5), 12.5);
    }

    #[test]
    fn test_entry_params_drop_piece_fields_outside_pcs() {
        let mut input = ConversionInput::kg(3.0);
        input.weight_per_piece = Some(0.5);
        let params = EntryParams::from(&input);
        assert_eq!(params.wt_per_packing, None);

        let params = EntryParams::from(&ConversionInput::pieces(0.5, 6.0));
        assert_eq!(params.wt_per_packing, Some(0.5));
        assert_eq!(params.number_of_pcs, Some(6.0));
    }

    #[test]
    fn test_resolve_reason() {
        assert_eq!(resolve_reason("Used", None), Some("Used".to_string()));
        assert_eq!(
            resolve_reason("Other", Some("  Forklift damage ")),
            Some("Forklift damage".to_string())
        );
        assert_eq!(resolve_reason("Other", Some("   ")), None);
        assert_eq!(resolve_reason("", None), None);
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = ScrapEntryRequest {
            material_id: 12,
            input_qty: 40.0,
            input_unit: Unit::Pcs,
            source: ScrapSource::Manual,
            reason: Some("Used".to_string()),
            warehouse_id: Some(3),
            job_booking_id: None,
            converted_weight_kg: 10.0,
            params: EntryParams::from(&ConversionInput::pieces(0.25, 40.0)),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["materialId"], 12);
        assert_eq!(json["inputUnit"], "PCS");
        assert_eq!(json["source"], "MANUAL");
        assert_eq!(json["params"]["numberOfPcs"], 40.0);
        assert!(json.get("jobBookingId").is_none());
        assert!(json["params"].get("width").is_none());
    }
}
