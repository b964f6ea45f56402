//! Material master data models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Material category, assigned by backend master data.
/// Determines which weight conversion formula applies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaterialCategory {
    Paper,
    Reel,
    Film,
    Ink,
    #[default]
    Other,
}

impl MaterialCategory {
    pub const ALL: [MaterialCategory; 5] = [
        MaterialCategory::Paper,
        MaterialCategory::Reel,
        MaterialCategory::Film,
        MaterialCategory::Ink,
        MaterialCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialCategory::Paper => "PAPER",
            MaterialCategory::Reel => "REEL",
            MaterialCategory::Film => "FILM",
            MaterialCategory::Ink => "INK",
            MaterialCategory::Other => "OTHER",
        }
    }

    /// Map a backend item-group name ("Paper Board", "BOPP FILM", ...) onto a category.
    pub fn from_group_name(group: &str) -> Self {
        let upper = group.trim().to_uppercase();
        if upper.contains("PAPER") {
            MaterialCategory::Paper
        } else if upper.contains("REEL") {
            MaterialCategory::Reel
        } else if upper.contains("FILM") {
            MaterialCategory::Film
        } else if upper.contains("INK") {
            MaterialCategory::Ink
        } else {
            MaterialCategory::Other
        }
    }

    /// Formula shown next to the entry form
    pub fn formula_description(&self) -> &'static str {
        match self {
            MaterialCategory::Paper => "KG = (Width × Length × GSM × Sheets) / 1550 / 1,000,000",
            MaterialCategory::Reel => "KG = (Width × GSM × RunningLength) / 1550",
            MaterialCategory::Film => "KG = (Width/25.4 × Length × Density × Thickness) / 1000",
            MaterialCategory::Ink | MaterialCategory::Other => "Direct Weight Entry",
        }
    }
}

impl std::fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Units a scrap quantity can be entered in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Unit {
    Kg,
    Sheet,
    Meter,
    Pcs,
    Litre,
    Roll,
    Each,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "KG",
            Unit::Sheet => "SHEET",
            Unit::Meter => "METER",
            Unit::Pcs => "PCS",
            Unit::Litre => "LITRE",
            Unit::Roll => "ROLL",
            Unit::Each => "EACH",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown unit: {0}")]
pub struct ParseUnitError(pub String);

impl std::str::FromStr for Unit {
    type Err = ParseUnitError;

    /// Case-insensitive; the entry forms send labels such as "Sheet" or "kg".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "KG" | "KGS" => Ok(Unit::Kg),
            "SHEET" | "SHEETS" => Ok(Unit::Sheet),
            "METER" | "METRE" | "MTR" => Ok(Unit::Meter),
            "PCS" | "PC" | "PIECE" | "PIECES" => Ok(Unit::Pcs),
            "LITRE" | "LITER" | "LTR" => Ok(Unit::Litre),
            "ROLL" | "ROLLS" => Ok(Unit::Roll),
            "EACH" | "NOS" => Ok(Unit::Each),
            _ => Err(ParseUnitError(s.to_string())),
        }
    }
}

/// A material from the backend item master
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaterialItem {
    pub id: i64,
    pub code: String,
    pub name: String,
    /// Item-group name as the backend reports it
    pub group_name: String,
    pub category: MaterialCategory,
    pub stock_unit: Option<Unit>,
    pub gsm: Option<f64>,
    /// Width in mm
    pub width_mm: Option<f64>,
    pub density: Option<f64>,
    pub thickness_micron: Option<f64>,
    /// Weight of one piece in KG, for PCS-stocked items
    pub wt_per_packing: Option<f64>,
    /// Items that are scrap by nature are hidden from the manual entry picker
    pub is_scrap: bool,
}

impl MaterialItem {
    pub fn is_pcs(&self) -> bool {
        self.stock_unit == Some(Unit::Pcs)
    }

    /// KG equivalent of a PCS-stocked quantity
    pub fn kg_equivalent(&self, quantity: Decimal) -> Option<Decimal> {
        if !self.is_pcs() {
            return None;
        }
        piece_weight_decimal(self.wt_per_packing)
            .map(|per_piece| quantity.saturating_mul(per_piece))
    }

    /// Unit pre-selected when this material is picked in the entry form
    pub fn default_entry_unit(&self) -> Unit {
        match self.category {
            MaterialCategory::Paper => Unit::Sheet,
            _ => self.stock_unit.unwrap_or(Unit::Kg),
        }
    }
}

pub(crate) fn piece_weight_decimal(wt_per_packing: Option<f64>) -> Option<Decimal> {
    wt_per_packing
        .filter(|w| w.is_finite() && *w > 0.0)
        .and_then(|w| Decimal::try_from(w).ok())
}
