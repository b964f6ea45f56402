//! Scrap entry service
//!
//! Turns form input into entry payloads. Weight comes from the conversion
//! engine and nothing is sent unless it is positive and the mandatory fields
//! are filled.

use serde::Serialize;
use serde_json::Value;
use shared::conversion::{convert, paper_weight, round_to};
use shared::normalize::{coerce_f64, coerce_i64, coerce_string, field};
use shared::{
    input_quantity, missing_entry_fields, resolve_reason, validate_positive_weight,
    ConversionInput, EntryParams, MaterialItem, ScrapEntryRequest, ScrapSource, SheetCut,
};

use crate::api::{ApiClient, ApiResponse};
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// Manual scrap form
#[derive(Debug, Clone)]
pub struct ManualEntryForm {
    pub material: MaterialItem,
    pub input: ConversionInput,
    pub warehouse_id: Option<i64>,
    /// One of `SCRAP_REASONS`
    pub reason: String,
    /// Used when `reason` is "Other"
    pub custom_reason: Option<String>,
}

/// A row of the job's production details
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductionDetail {
    pub item_code: String,
    pub quality: String,
    pub gsm: f64,
    pub cut: SheetCut,
    pub item_group_id: i64,
    pub floor_warehouse_id: i64,
    pub warehouse_name: String,
    pub wt_per_packing: f64,
    /// KG issued to the job
    pub issue_quantity: f64,
}

impl ProductionDetail {
    pub fn from_value(value: &Value) -> Self {
        Self {
            item_code: coerce_string(field(value, &["ItemCode", "itemCode"])),
            quality: coerce_string(field(value, &["Quality", "quality"])),
            gsm: coerce_f64(field(value, &["GSM", "gsm"])),
            cut: SheetCut {
                size_length: coerce_f64(field(value, &["SizeL", "sizeL"])),
                size_width: coerce_f64(field(value, &["SizeW", "sizeW"])),
                cut_length: coerce_f64(field(value, &["CutSizeL", "cutSizeL"])),
                cut_width: coerce_f64(field(value, &["CutSizeW", "cutSizeW"])),
            },
            item_group_id: coerce_i64(field(value, &["ItemGroupNameID", "itemGroupId"])),
            floor_warehouse_id: coerce_i64(field(value, &["FloorWarehouseID", "floorWarehouseId"])),
            warehouse_name: coerce_string(field(value, &["WarehouseName", "warehouseName"])),
            wt_per_packing: coerce_f64(field(value, &["WtPerPacking", "wtPerPacking"])),
            issue_quantity: coerce_f64(field(value, &["IssueQuantity", "issueQuantity"])),
        }
    }

    pub fn list_from_value(value: &Value) -> Vec<Self> {
        value
            .as_array()
            .map(|rows| rows.iter().map(Self::from_value).collect())
            .unwrap_or_default()
    }

    /// Reel codes start with `R`; their weight is entered by hand
    pub fn is_reel(&self) -> bool {
        self.item_code.starts_with('R')
    }
}

/// Production scrap item as saved in a batch
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductionScrapItem {
    pub paper_code: String,
    pub quality: String,
    pub gsm: f64,
    pub balance_piece_l: f64,
    pub balance_piece_w: f64,
    pub qty_sheets: f64,
    pub qty_kg: f64,
    pub size_w: f64,
    pub size_l: f64,
    pub item_group_id: i64,
    #[serde(rename = "floorWarehouseID")]
    pub floor_warehouse_id: i64,
    pub warehouse_name: String,
    pub stock_unit: String,
    #[serde(rename = "WtPerPacking")]
    pub wt_per_packing: f64,
    pub job_booking_id: i64,
}

/// Build the entry payload for a manual form
pub fn prepare_manual_entry(form: &ManualEntryForm) -> ClientResult<ScrapEntryRequest> {
    let reason = resolve_reason(&form.reason, form.custom_reason.as_deref());
    let missing = missing_entry_fields(form.input.unit, form.warehouse_id, reason.as_deref());
    let Some(unit) = form.input.unit.filter(|_| missing.is_empty()) else {
        return Err(ClientError::MissingFields(missing));
    };

    let category = form.material.category;
    let weight_kg = convert(category, &form.input);
    validate_positive_weight(weight_kg).map_err(|e| ClientError::Validation(e.to_string()))?;

    Ok(ScrapEntryRequest {
        material_id: form.material.id,
        input_qty: input_quantity(category, &form.input, weight_kg),
        input_unit: unit,
        source: ScrapSource::Manual,
        reason,
        warehouse_id: form.warehouse_id,
        job_booking_id: None,
        converted_weight_kg: weight_kg,
        params: EntryParams::from(&form.input),
    })
}

/// Build a production item from the selected detail row.
///
/// Paper weight comes from the balance piece left after cutting; reels take
/// `manual_kg`. The weight may not exceed what was issued to the job.
pub fn prepare_production_item(
    detail: &ProductionDetail,
    job_booking_id: i64,
    qty_sheets: f64,
    manual_kg: Option<f64>,
) -> ClientResult<ProductionScrapItem> {
    let reel = detail.is_reel();
    let (balance_l, balance_w) = if reel { (0.0, 0.0) } else { detail.cut.balance() };
    let qty_sheets = if reel { 0.0 } else { qty_sheets };

    let qty_kg = match manual_kg {
        Some(kg) => kg,
        None if reel => 0.0,
        None => round_to(
            paper_weight(Some(balance_w), Some(balance_l), Some(detail.gsm), Some(qty_sheets)),
            4,
        ),
    };
    validate_positive_weight(qty_kg).map_err(|e| ClientError::Validation(e.to_string()))?;
    if qty_kg > detail.issue_quantity {
        return Err(ClientError::Validation(format!(
            "Entered quantity ({} KG) cannot exceed issued quantity ({} KG)",
            qty_kg, detail.issue_quantity
        )));
    }

    let stock_unit = if !reel && qty_sheets > 0.0 { "SHEET" } else { "KG" };
    Ok(ProductionScrapItem {
        paper_code: detail.item_code.clone(),
        quality: detail.quality.clone(),
        gsm: detail.gsm,
        balance_piece_l: balance_l,
        balance_piece_w: balance_w,
        qty_sheets,
        qty_kg,
        size_w: detail.cut.size_width,
        size_l: detail.cut.size_length,
        item_group_id: detail.item_group_id,
        floor_warehouse_id: detail.floor_warehouse_id,
        warehouse_name: detail.warehouse_name.clone(),
        stock_unit: stock_unit.to_string(),
        wt_per_packing: detail.wt_per_packing,
        job_booking_id,
    })
}

/// Scrap entry service
#[derive(Clone)]
pub struct EntryService {
    api: ApiClient,
}

impl EntryService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Validate, convert and submit a manual entry
    pub async fn manual_entry(
        &self,
        session: &Session,
        form: &ManualEntryForm,
    ) -> ClientResult<ApiResponse> {
        let request = prepare_manual_entry(form).map_err(|e| {
            tracing::warn!(material_id = form.material.id, error = %e, "Manual entry rejected");
            e
        })?;
        self.api.scrap().create_entry(session, &request).await
    }

    /// Submit a batch of production items
    pub async fn production_entry(
        &self,
        session: &Session,
        items: &[ProductionScrapItem],
    ) -> ClientResult<ApiResponse> {
        if items.is_empty() {
            return Err(ClientError::Validation("Please add at least one item".to_string()));
        }
        self.api
            .scrap()
            .save_production_entries(session, items, session.user_name.as_deref())
            .await
    }

    /// Production detail rows of a job content
    pub async fn production_details(
        &self,
        session: &Session,
        content_id: i64,
    ) -> ClientResult<Vec<ProductionDetail>> {
        let data = self.api.scrap().production_details(session, content_id).await?;
        Ok(ProductionDetail::list_from_value(&data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::{MaterialCategory, Unit};

    fn paper() -> MaterialItem {
        MaterialItem {
            id: 15,
            name: "Art Paper".to_string(),
            category: MaterialCategory::Paper,
            ..Default::default()
        }
    }

    fn form(input: ConversionInput) -> ManualEntryForm {
        ManualEntryForm {
            material: paper(),
            input,
            warehouse_id: Some(2),
            reason: "Trimming Waste".to_string(),
            custom_reason: None,
        }
    }

    #[test]
    fn test_manual_sheet_entry() {
        let request =
            prepare_manual_entry(&form(ConversionInput::sheets(1000.0, 1000.0, 170.0, 1000.0)))
                .unwrap();
        assert_eq!(request.input_unit, Unit::Sheet);
        assert_eq!(request.input_qty, 1000.0);
        assert_eq!(round_to(request.converted_weight_kg, 3), 109.677);
        assert_eq!(request.source, ScrapSource::Manual);
        assert_eq!(request.params.sheets, Some(1000.0));
    }

    #[test]
    fn test_manual_entry_missing_fields() {
        let mut incomplete = form(ConversionInput::kg(5.0));
        incomplete.warehouse_id = None;
        incomplete.reason = "Other".to_string();
        match prepare_manual_entry(&incomplete) {
            Err(ClientError::MissingFields(fields)) => assert_eq!(fields, vec!["Warehouse", "Reason"]),
            other => panic!("expected missing fields, got {:?}", other),
        }
    }

    #[test]
    fn test_manual_entry_zero_weight_blocked() {
        let result = prepare_manual_entry(&form(ConversionInput::sheets(700.0, 0.0, 170.0, 10.0)));
        assert!(matches!(result, Err(ClientError::Validation(_))));
    }

    #[test]
    fn test_custom_reason_replaces_other() {
        let mut other = form(ConversionInput::pieces(0.25, 40.0));
        other.reason = "Other".to_string();
        other.custom_reason = Some("Rain damage".to_string());
        let request = prepare_manual_entry(&other).unwrap();
        assert_eq!(request.reason.as_deref(), Some("Rain damage"));
        assert_eq!(request.input_qty, 40.0);
        assert_eq!(request.converted_weight_kg, 10.0);
        assert_eq!(request.params.number_of_pcs, Some(40.0));
    }

    fn detail(code: &str) -> ProductionDetail {
        ProductionDetail::from_value(&json!({
            "ItemCode": code,
            "Quality": "Art Card",
            "GSM": 300,
            "SizeL": 1000,
            "SizeW": 700,
            "CutSizeL": 800,
            "CutSizeW": 500,
            "ItemGroupNameID": 4,
            "FloorWarehouseID": 9,
            "IssueQuantity": 50
        }))
    }

    #[test]
    fn test_production_paper_item() {
        let item = prepare_production_item(&detail("P-300"), 77, 1000.0, None).unwrap();
        assert_eq!((item.balance_piece_l, item.balance_piece_w), (200.0, 200.0));
        // 200 × 200 × 300 × 1000 / 1,550,000,000
        assert_eq!(item.qty_kg, 7.7419);
        assert_eq!(item.stock_unit, "SHEET");
        assert_eq!(item.job_booking_id, 77);
    }

    #[test]
    fn test_production_reel_takes_manual_weight() {
        let item = prepare_production_item(&detail("R-120"), 77, 500.0, Some(12.5)).unwrap();
        assert_eq!(item.qty_sheets, 0.0);
        assert_eq!(item.balance_piece_l, 0.0);
        assert_eq!(item.qty_kg, 12.5);
        assert_eq!(item.stock_unit, "KG");

        assert!(prepare_production_item(&detail("R-120"), 77, 0.0, None).is_err());
    }

    #[test]
    fn test_production_weight_capped_by_issue() {
        let result = prepare_production_item(&detail("R-120"), 77, 0.0, Some(60.0));
        match result {
            Err(ClientError::Validation(message)) => assert!(message.contains("issued quantity")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
