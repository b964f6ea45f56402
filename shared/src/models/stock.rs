//! Scrap stock models

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::material::piece_weight_decimal;

/// Current scrap stock for one item
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScrapStockItem {
    pub item_id: i64,
    pub item_name: String,
    pub item_code: String,
    pub item_group: String,
    pub stock_unit: String,
    pub net_stock: Decimal,
    pub wt_per_packing: Option<f64>,
    pub last_updated: Option<NaiveDateTime>,
}

impl ScrapStockItem {
    pub fn kg_equivalent(&self) -> Option<Decimal> {
        if !self.stock_unit.eq_ignore_ascii_case("PCS") {
            return None;
        }
        piece_weight_decimal(self.wt_per_packing).map(|per_piece| self.net_stock * per_piece)
    }

    pub fn is_available(&self) -> bool {
        self.net_stock > Decimal::ZERO
    }
}
