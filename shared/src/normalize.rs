//! Normalization of backend payloads
//!
//! The backend is inconsistent about field casing (`IsScrap` / `isScrap`,
//! `ItemName` / `itemName` / `name`) and about numeric types (numbers, numeric
//! strings, nulls). Everything is mapped onto the typed models here so the
//! calculation engines never see raw JSON. Numeric fields follow
//! `Number(x) || 0`: anything that is not a finite number becomes zero.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::models::{
    LedgerSummary, LedgerTransaction, MaterialCategory, MaterialItem, ScrapStockItem, Unit,
};

/// First non-null value among `keys`
pub fn field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let object: &Map<String, Value> = value.as_object()?;
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|v| !v.is_null())
}

/// `Number(x) || 0`
pub fn coerce_f64(value: Option<&Value>) -> f64 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    number.filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// `Number(x) || 0` into a decimal. Numeric strings are parsed exactly.
pub fn coerce_decimal(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::String(s)) => Decimal::from_str(s.trim())
            .or_else(|_| Decimal::from_scientific(s.trim()))
            .unwrap_or_else(|_| decimal_from_f64(coerce_f64(value))),
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .unwrap_or_else(|_| decimal_from_f64(coerce_f64(value))),
        _ => decimal_from_f64(coerce_f64(value)),
    }
}

/// Optional measurement: absent, null, unparsable or zero → `None`
pub fn optional_f64(value: Option<&Value>) -> Option<f64> {
    value.map(|v| coerce_f64(Some(v))).filter(|n| *n != 0.0)
}

pub fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

pub fn coerce_i64(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n.as_i64().unwrap_or_else(|| coerce_f64(value) as i64),
        _ => coerce_f64(value) as i64,
    }
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS[.fff]`, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD`
pub fn coerce_datetime(value: Option<&Value>) -> Option<NaiveDateTime> {
    let raw = value?.as_str()?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `IsScrap` of `1`, `"1"` or `true` marks an item as scrap by nature.
/// A missing flag means not scrap.
pub fn is_scrap_flag(value: &Value) -> bool {
    match field(value, &["IsScrap", "isScrap"]) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::String(s)) => s.trim() == "1" || s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

pub fn material_from_value(value: &Value) -> MaterialItem {
    let group_name = coerce_string(field(value, &["itemGroup", "ItemGroup", "ItemGroupName", "group"]));
    let category = match field(value, &["category", "Category"]) {
        Some(Value::String(c)) => MaterialCategory::from_group_name(c),
        _ => MaterialCategory::from_group_name(&group_name),
    };
    let stock_unit = coerce_string(field(value, &["stockUnit", "StockUnit", "unit"]))
        .parse::<Unit>()
        .ok();

    MaterialItem {
        id: coerce_i64(field(value, &["id", "Id", "itemId", "ItemID"])),
        code: coerce_string(field(value, &["code", "itemCode", "ItemCode"])),
        name: coerce_string(field(value, &["name", "itemName", "ItemName"])),
        group_name,
        category,
        stock_unit,
        gsm: optional_f64(field(value, &["gsm", "GSM"])),
        width_mm: optional_f64(field(value, &["width", "Width", "SizeW"])),
        density: optional_f64(field(value, &["density", "Density"])),
        thickness_micron: optional_f64(field(value, &["thickness", "Thickness"])),
        wt_per_packing: optional_f64(field(value, &["wtPerPacking", "WtPerPacking"])),
        is_scrap: is_scrap_flag(value),
    }
}

pub fn materials_from_value(value: &Value) -> Vec<MaterialItem> {
    array(value).iter().map(material_from_value).collect()
}

/// Materials offered in the manual entry picker
pub fn non_scrap_materials(materials: &[MaterialItem]) -> Vec<&MaterialItem> {
    materials.iter().filter(|m| !m.is_scrap).collect()
}

/// Case-insensitive match on name, code or group; an empty query matches all
pub fn search_materials<'a>(materials: &[&'a MaterialItem], query: &str) -> Vec<&'a MaterialItem> {
    let needle = query.trim().to_lowercase();
    materials
        .iter()
        .copied()
        .filter(|m| {
            needle.is_empty()
                || m.name.to_lowercase().contains(&needle)
                || m.code.to_lowercase().contains(&needle)
                || m.group_name.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn ledger_transaction_from_value(value: &Value) -> LedgerTransaction {
    let remark = coerce_string(field(value, &["remark", "Remark", "narration"]));
    LedgerTransaction {
        voucher_date: coerce_datetime(field(value, &["voucherDate", "VoucherDate"])),
        voucher_number: coerce_string(field(value, &["voucherNumber", "VoucherNumber", "voucherNo"])),
        transaction_type: coerce_string(field(value, &["transactionType", "TransactionType", "type"])),
        receipt_quantity: coerce_decimal(field(value, &["receiptQuantity", "ReceiptQuantity"])),
        issue_quantity: coerce_decimal(field(value, &["issueQuantity", "IssueQuantity"])),
        sale_amount: coerce_decimal(field(value, &["saleAmount", "SaleAmount"])),
        remark: (!remark.is_empty()).then_some(remark),
    }
}

pub fn ledger_transactions_from_value(value: &Value) -> Vec<LedgerTransaction> {
    array(value).iter().map(ledger_transaction_from_value).collect()
}

pub fn ledger_summary_from_value(value: &Value) -> LedgerSummary {
    LedgerSummary {
        item_id: coerce_i64(field(value, &["itemId", "ItemID", "ItemId"])),
        item_name: coerce_string(field(value, &["itemName", "ItemName"])),
        item_code: coerce_string(field(value, &["itemCode", "ItemCode"])),
        item_group: coerce_string(field(value, &["itemGroup", "ItemGroup", "ItemGroupName"])),
        total_receipt: coerce_decimal(field(value, &["totalReceipt", "TotalReceipt"])),
        total_issue: coerce_decimal(field(value, &["totalIssue", "TotalIssue"])),
        balance: coerce_decimal(field(value, &["balance", "Balance"])),
        stock_unit: coerce_string(field(value, &["stockUnit", "StockUnit"])),
        wt_per_packing: optional_f64(field(value, &["wtPerPacking", "WtPerPacking"])),
    }
}

pub fn ledger_summaries_from_value(value: &Value) -> Vec<LedgerSummary> {
    array(value).iter().map(ledger_summary_from_value).collect()
}

pub fn stock_item_from_value(value: &Value) -> ScrapStockItem {
    ScrapStockItem {
        item_id: coerce_i64(field(value, &["itemId", "ItemID", "ItemId", "id"])),
        item_name: coerce_string(field(value, &["itemName", "ItemName"])),
        item_code: coerce_string(field(value, &["itemCode", "ItemCode"])),
        item_group: coerce_string(field(value, &["itemGroup", "ItemGroup", "ItemGroupName"])),
        stock_unit: coerce_string(field(value, &["stockUnit", "StockUnit"])),
        net_stock: coerce_decimal(field(value, &["netStock", "NetStock", "qty"])),
        wt_per_packing: optional_f64(field(value, &["wtPerPacking", "WtPerPacking"])),
        last_updated: coerce_datetime(field(value, &["lastUpdated", "LastUpdated"])),
    }
}

pub fn stock_items_from_value(value: &Value) -> Vec<ScrapStockItem> {
    array(value).iter().map(stock_item_from_value).collect()
}

/// Non-array payloads are treated as empty lists
fn array(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or(&[])
}

fn decimal_from_f64(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}
