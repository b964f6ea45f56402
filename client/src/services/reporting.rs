//! Reporting service for ledger and stock exports
//! Produces the CSV files offered by the ledger and stock screens

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{LedgerRow, LedgerSummary, ScrapStockItem};

use crate::error::{ClientError, ClientResult};

const DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Ledger detail export row
#[derive(Debug, Serialize)]
pub struct LedgerCsvRow<'a> {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Voucher Number")]
    pub voucher_number: &'a str,
    #[serde(rename = "Type")]
    pub transaction_type: &'a str,
    #[serde(rename = "IN Qty")]
    pub in_qty: Decimal,
    #[serde(rename = "OUT Qty")]
    pub out_qty: Decimal,
    #[serde(rename = "Sale Amount")]
    pub sale_amount: Decimal,
    #[serde(rename = "Balance")]
    pub balance: Decimal,
    #[serde(rename = "Remark")]
    pub remark: &'a str,
}

/// Ledger summary export row
#[derive(Debug, Serialize)]
pub struct SummaryCsvRow<'a> {
    #[serde(rename = "Material")]
    pub material: &'a str,
    #[serde(rename = "Item Code")]
    pub item_code: &'a str,
    #[serde(rename = "Group")]
    pub group: &'a str,
    #[serde(rename = "Total IN")]
    pub total_in: Decimal,
    #[serde(rename = "Total OUT")]
    pub total_out: Decimal,
    #[serde(rename = "Balance")]
    pub balance: Decimal,
    #[serde(rename = "Unit")]
    pub unit: &'a str,
}

/// Stock export row
#[derive(Debug, Serialize)]
pub struct StockCsvRow<'a> {
    #[serde(rename = "Item Name")]
    pub item_name: &'a str,
    #[serde(rename = "Item Code")]
    pub item_code: &'a str,
    #[serde(rename = "Group")]
    pub group: &'a str,
    #[serde(rename = "Net Stock")]
    pub net_stock: Decimal,
    #[serde(rename = "Unit")]
    pub unit: &'a str,
    #[serde(rename = "Last Updated")]
    pub last_updated: String,
}

/// Reporting service
pub struct ReportingService;

impl ReportingService {
    /// Ledger detail rows. An empty ledger exports as an empty string.
    pub fn ledger_csv(rows: &[LedgerRow]) -> ClientResult<String> {
        let records: Vec<LedgerCsvRow<'_>> = rows
            .iter()
            .map(|row| LedgerCsvRow {
                date: format_date_time(row.transaction.voucher_date),
                voucher_number: &row.transaction.voucher_number,
                transaction_type: &row.transaction.transaction_type,
                in_qty: row.transaction.receipt_quantity,
                out_qty: row.transaction.issue_quantity,
                sale_amount: row.transaction.sale_amount,
                balance: row.balance,
                remark: row.transaction.remark.as_deref().unwrap_or_default(),
            })
            .collect();
        Self::export_to_csv(&records)
    }

    pub fn summary_csv(summaries: &[LedgerSummary]) -> ClientResult<String> {
        let records: Vec<SummaryCsvRow<'_>> = summaries
            .iter()
            .map(|s| SummaryCsvRow {
                material: &s.item_name,
                item_code: &s.item_code,
                group: &s.item_group,
                total_in: s.total_receipt,
                total_out: s.total_issue,
                balance: s.balance,
                unit: &s.stock_unit,
            })
            .collect();
        Self::export_to_csv(&records)
    }

    pub fn stock_csv(items: &[ScrapStockItem]) -> ClientResult<String> {
        let records: Vec<StockCsvRow<'_>> = items
            .iter()
            .map(|item| StockCsvRow {
                item_name: &item.item_name,
                item_code: &item.item_code,
                group: &item.item_group,
                net_stock: item.net_stock,
                unit: &item.stock_unit,
                last_updated: format_date_time(item.last_updated),
            })
            .collect();
        Self::export_to_csv(&records)
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> ClientResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| ClientError::Report(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| ClientError::Report(format!("UTF-8 conversion error: {}", e)))
    }
}

fn format_date_time(value: Option<NaiveDateTime>) -> String {
    value
        .map(|dt| dt.format(DATE_TIME_FORMAT).to_string())
        .unwrap_or_default()
}
