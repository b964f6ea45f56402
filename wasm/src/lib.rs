//! WebAssembly module for the Scrap ERP
//!
//! Provides client-side computation for:
//! - Scrap weight conversion while a form is being filled
//! - Invoice line and total recalculation
//! - Amount in words
//! - Ledger running balances
//! - GSTIN validation

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use shared::conversion;
use shared::ledger::reconstruct;
use shared::normalize::ledger_transactions_from_value;
use shared::totals::{calculate_line_item as calculate_line, recalculate_totals};
use shared::words::{amount_in_words as words_for, WordsSuffix};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("scrap-erp-wasm ready"));
}

// ============================================================================
// Weight Conversion
// ============================================================================

/// Convert form measurements (JSON) into KG for a material category.
/// A non-empty `unit` replaces the unit carried in the JSON.
#[wasm_bindgen]
pub fn convert_scrap_weight(category: &str, unit: &str, input_json: &str) -> Result<f64, JsValue> {
    convert_weight(category, unit, input_json).map_err(|e| JsValue::from_str(&e))
}

/// Sheet paper weight; NaN or non-positive arguments count as missing
#[wasm_bindgen]
pub fn calculate_paper_weight(width: f64, length: f64, gsm: f64, sheets: f64) -> f64 {
    conversion::paper_weight(Some(width), Some(length), Some(gsm), Some(sheets))
}

#[wasm_bindgen]
pub fn calculate_reel_weight(width: f64, gsm: f64, running_length: f64) -> f64 {
    conversion::reel_weight(Some(width), Some(gsm), Some(running_length))
}

#[wasm_bindgen]
pub fn calculate_film_weight(width: f64, length: f64, density: f64, thickness_micron: f64) -> f64 {
    conversion::film_weight(Some(width), Some(length), Some(density), Some(thickness_micron))
}

#[wasm_bindgen]
pub fn calculate_piece_weight(weight_per_piece: f64, piece_count: f64) -> f64 {
    conversion::piece_weight(Some(weight_per_piece), Some(piece_count))
}

/// Balance piece `[length, width]` left after cutting a sheet
#[wasm_bindgen]
pub fn calculate_balance_piece(size_length: f64, size_width: f64, cut_length: f64, cut_width: f64) -> Vec<f64> {
    let cut = SheetCut {
        size_length,
        size_width,
        cut_length,
        cut_width,
    };
    let (length, width) = cut.balance();
    vec![length, width]
}

#[wasm_bindgen]
pub fn formula_description(category: &str) -> String {
    MaterialCategory::from_group_name(category)
        .formula_description()
        .to_string()
}

/// Round a weight for display
#[wasm_bindgen]
pub fn round_weight(value: f64, places: u32) -> f64 {
    conversion::round_to(value, places)
}

// ============================================================================
// Invoice
// ============================================================================

/// Recalculate the amounts of one invoice line (JSON in, JSON out)
#[wasm_bindgen]
pub fn calculate_line_item(line_json: &str) -> Result<String, JsValue> {
    line_item(line_json).map_err(|e| JsValue::from_str(&e))
}

/// Invoice totals from calculated lines, charges and a TCS percentage
#[wasm_bindgen]
pub fn recalculate_invoice_totals(
    lines_json: &str,
    charges_json: &str,
    tcs_percentage: &str,
) -> Result<String, JsValue> {
    invoice_totals(lines_json, charges_json, tcs_percentage).map_err(|e| JsValue::from_str(&e))
}

/// Split a combined GST rate for the two parties' GSTINs.
/// Returns `{"cgst", "sgst", "igst"}`.
#[wasm_bindgen]
pub fn split_gst_percentage(
    gst_percentage: &str,
    company_gstin: &str,
    client_gstin: &str,
    gst_applicable: bool,
) -> Result<String, JsValue> {
    gst_split(gst_percentage, company_gstin, client_gstin, gst_applicable)
        .map_err(|e| JsValue::from_str(&e))
}

/// Amount in words; `suffix` is `rupees`, `only` or `rupees_only`
#[wasm_bindgen]
pub fn amount_in_words(amount: &str, suffix: &str) -> Result<String, JsValue> {
    words(amount, suffix).map_err(|e| JsValue::from_str(&e))
}

// ============================================================================
// Ledger
// ============================================================================

/// Running balances for a newest-first ledger payload.
/// `order` is `reverse` or `voucher_date`.
#[wasm_bindgen]
pub fn reconstruct_ledger_balances(ledger_json: &str, order: &str) -> Result<String, JsValue> {
    ledger_balances(ledger_json, order).map_err(|e| JsValue::from_str(&e))
}

// ============================================================================
// Validation
// ============================================================================

/// Throws with the reason when the GSTIN is malformed
#[wasm_bindgen]
pub fn validate_gstin(gstin: &str) -> Result<(), JsValue> {
    shared::validate_gstin(gstin).map_err(JsValue::from_str)
}

#[wasm_bindgen]
pub fn is_valid_gstin(gstin: &str) -> bool {
    shared::validate_gstin(gstin).is_ok()
}

/// Financial year label ("24-25") for a calendar date
#[wasm_bindgen]
pub fn financial_year_label(year: i32, month: u32, day: u32) -> Result<String, JsValue> {
    fy_label(year, month, day).map_err(|e| JsValue::from_str(&e))
}

/// Financial year label for the browser's current date
#[wasm_bindgen]
pub fn current_financial_year() -> Result<String, JsValue> {
    let now = js_sys::Date::new_0();
    financial_year_label(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
}

// ============================================================================
// Implementation
// ============================================================================

fn convert_weight(category: &str, unit: &str, input_json: &str) -> Result<f64, String> {
    let mut input: ConversionInput =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid input JSON: {}", e))?;
    if !unit.trim().is_empty() {
        input.unit = Some(Unit::from_str(unit).map_err(|e| e.to_string())?);
    }
    Ok(conversion::convert(MaterialCategory::from_group_name(category), &input))
}

fn line_item(line_json: &str) -> Result<String, String> {
    let line: LineItem =
        serde_json::from_str(line_json).map_err(|e| format!("Invalid line JSON: {}", e))?;
    to_json(&calculate_line(&line))
}

fn invoice_totals(lines_json: &str, charges_json: &str, tcs_percentage: &str) -> Result<String, String> {
    let lines: Vec<LineItem> =
        serde_json::from_str(lines_json).map_err(|e| format!("Invalid lines JSON: {}", e))?;
    let charges: Vec<AdditionalCharge> = if charges_json.trim().is_empty() {
        Vec::new()
    } else {
        serde_json::from_str(charges_json).map_err(|e| format!("Invalid charges JSON: {}", e))?
    };
    let tcs = parse_decimal(tcs_percentage)?;
    shared::validate_percentage(tcs)?;
    to_json(&recalculate_totals(&lines, &charges, tcs))
}

#[derive(Serialize)]
struct GstSplit {
    cgst: Decimal,
    sgst: Decimal,
    igst: Decimal,
}

fn gst_split(
    gst_percentage: &str,
    company_gstin: &str,
    client_gstin: &str,
    gst_applicable: bool,
) -> Result<String, String> {
    let gst = parse_decimal(gst_percentage)?;
    shared::validate_percentage(gst)?;
    let regime = GstRegime::for_gstins(company_gstin, client_gstin, gst_applicable);
    let (cgst, sgst, igst) = regime.split(gst);
    to_json(&GstSplit { cgst, sgst, igst })
}

fn words(amount: &str, suffix: &str) -> Result<String, String> {
    let amount = parse_decimal(amount)?;
    let suffix = if suffix.trim().is_empty() {
        WordsSuffix::default()
    } else {
        WordsSuffix::from_str(suffix)?
    };
    Ok(words_for(amount, suffix))
}

fn ledger_balances(ledger_json: &str, order: &str) -> Result<String, String> {
    let payload: Value =
        serde_json::from_str(ledger_json).map_err(|e| format!("Invalid ledger JSON: {}", e))?;
    // Accept the bare list or the `{success, data}` envelope
    let data = payload.get("data").unwrap_or(&payload);
    let order = if order.trim().is_empty() {
        ReplayOrder::default()
    } else {
        ReplayOrder::from_str(order)?
    };
    let transactions = ledger_transactions_from_value(data);
    to_json(&reconstruct(&transactions, order))
}

fn fy_label(year: i32, month: u32, day: u32) -> Result<String, String> {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| FinancialYear::containing(date).label())
        .ok_or_else(|| format!("Invalid date: {}-{}-{}", year, month, day))
}

/// Empty input is zero
fn parse_decimal(value: &str) -> Result<Decimal, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(value).map_err(|e| format!("Invalid amount '{}': {}", value, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}
