//! Scrap ledger models

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stock movement as returned by the ledger endpoint (newest first)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTransaction {
    pub voucher_date: Option<NaiveDateTime>,
    pub voucher_number: String,
    pub transaction_type: String,
    /// IN
    pub receipt_quantity: Decimal,
    /// OUT
    pub issue_quantity: Decimal,
    pub sale_amount: Decimal,
    pub remark: Option<String>,
}

impl LedgerTransaction {
    pub fn net_movement(&self) -> Decimal {
        self.receipt_quantity.saturating_sub(self.issue_quantity)
    }
}

/// A transaction decorated with the running balance after it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRow {
    #[serde(flatten)]
    pub transaction: LedgerTransaction,
    pub balance: Decimal,
}

/// Per-item ledger totals
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub item_id: i64,
    pub item_name: String,
    pub item_code: String,
    pub item_group: String,
    pub total_receipt: Decimal,
    pub total_issue: Decimal,
    pub balance: Decimal,
    pub stock_unit: String,
    pub wt_per_packing: Option<f64>,
}

impl LedgerSummary {
    /// KG equivalent of the balance for PCS-stocked items
    pub fn balance_kg(&self) -> Option<Decimal> {
        if !self.stock_unit.eq_ignore_ascii_case("PCS") {
            return None;
        }
        super::material::piece_weight_decimal(self.wt_per_packing)
            .map(|per_piece| self.balance.saturating_mul(per_piece))
    }
}

/// How the chronological replay order is obtained from the backend's
/// newest-first list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReplayOrder {
    /// Plain reversal; assumes the backend order is exact reverse chronology
    #[default]
    Reverse,
    /// Stable sort on `voucher_date` before replaying
    VoucherDate,
}

impl std::str::FromStr for ReplayOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reverse" => Ok(ReplayOrder::Reverse),
            "voucher_date" | "date" => Ok(ReplayOrder::VoucherDate),
            other => Err(format!("unknown replay order: {}", other)),
        }
    }
}
