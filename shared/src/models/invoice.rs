//! Sales invoice models (GST regime)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::totals::{calculate_line_item, recalculate_totals};
use crate::validation::gst_state_code;

/// An invoice line. Only `quantity`, `rate`, `discount_percentage` and the
/// GST percentages are inputs; every amount is derived by
/// [`calculate_line_item`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    pub product_code: String,
    pub description: String,
    pub hsn_code: Option<String>,
    pub purchase_unit: Option<String>,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub discount_percentage: Decimal,
    /// Combined GST rate as typed in the grid
    pub gst_percentage: Decimal,
    pub cgst_percentage: Decimal,
    pub sgst_percentage: Decimal,
    pub igst_percentage: Decimal,
    pub basic_amount: Decimal,
    pub discount_amount: Decimal,
    pub taxable_amount: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_amount: Decimal,
    pub igst_amount: Decimal,
    pub gross_amount: Decimal,
    pub net_amount: Decimal,
}

impl LineItem {
    pub fn new(quantity: Decimal, rate: Decimal) -> Self {
        Self {
            quantity,
            rate,
            ..Default::default()
        }
    }

    /// Intra-state shortcut: CGST and SGST each take half, IGST is cleared.
    pub fn set_gst_percentage(&mut self, gst: Decimal) {
        self.apply_gst(gst, GstRegime::IntraState);
    }

    pub fn apply_gst(&mut self, gst: Decimal, regime: GstRegime) {
        self.gst_percentage = gst;
        let (cgst, sgst, igst) = regime.split(gst);
        self.cgst_percentage = cgst;
        self.sgst_percentage = sgst;
        self.igst_percentage = igst;
    }

    pub fn total_tax(&self) -> Decimal {
        self.cgst_amount
            .saturating_add(self.sgst_amount)
            .saturating_add(self.igst_amount)
    }
}

/// Which GST components apply to a sale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GstRegime {
    /// CGST + SGST
    #[default]
    IntraState,
    /// IGST only (inter-state or export)
    InterState,
    Exempt,
}

impl GstRegime {
    /// Same state TIN → intra-state, different → inter-state.
    /// Exempt when either party or the voucher is not GST applicable.
    pub fn for_parties(company_state: u32, client_state: u32, gst_applicable: bool) -> Self {
        if !gst_applicable {
            GstRegime::Exempt
        } else if company_state == client_state {
            GstRegime::IntraState
        } else {
            GstRegime::InterState
        }
    }

    /// Regime for a sale between two GSTINs. Parties whose state code
    /// cannot be read are treated as inter-state.
    pub fn for_gstins(company_gstin: &str, client_gstin: &str, gst_applicable: bool) -> Self {
        match (gst_state_code(company_gstin), gst_state_code(client_gstin)) {
            (Some(company), Some(client)) => Self::for_parties(company, client, gst_applicable),
            _ if !gst_applicable => GstRegime::Exempt,
            _ => GstRegime::InterState,
        }
    }

    /// `(cgst, sgst, igst)` percentages for a combined rate
    pub fn split(&self, gst: Decimal) -> (Decimal, Decimal, Decimal) {
        match self {
            GstRegime::IntraState => {
                let half = gst / Decimal::TWO;
                (half, half, Decimal::ZERO)
            }
            GstRegime::InterState => (Decimal::ZERO, Decimal::ZERO, gst),
            GstRegime::Exempt => (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        }
    }
}

/// Freight, packing and similar charges. Added to the gross total as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AdditionalCharge {
    pub ledger_id: i64,
    pub ledger_name: String,
    pub tax_percentage: Decimal,
    pub amount: Decimal,
}

/// Invoice-level totals
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub total_quantity: Decimal,
    pub total_basic_amount: Decimal,
    pub total_discount_amount: Decimal,
    pub total_taxable_amount: Decimal,
    pub total_cgst_amount: Decimal,
    pub total_sgst_amount: Decimal,
    pub total_igst_amount: Decimal,
    /// Sum of line gross amounts
    pub total_gross_amount: Decimal,
    pub total_charges: Decimal,
    pub tcs_percentage: Decimal,
    pub tcs_amount: Decimal,
    pub round_off: Decimal,
    pub net_amount: Decimal,
}

impl InvoiceTotals {
    pub fn total_tax(&self) -> Decimal {
        self.total_cgst_amount
            .saturating_add(self.total_sgst_amount)
            .saturating_add(self.total_igst_amount)
    }

    /// Gross including additional charges, the TCS base
    pub fn gross_with_charges(&self) -> Decimal {
        self.total_gross_amount.saturating_add(self.total_charges)
    }
}

/// Invoice being authored. Every edit re-derives the touched line and the
/// totals, so the derived fields are never stale. Deserializing reads only
/// the inputs and recalculates the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "DraftInputs")]
pub struct InvoiceDraft {
    lines: Vec<LineItem>,
    charges: Vec<AdditionalCharge>,
    tcs_percentage: Decimal,
    totals: InvoiceTotals,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct DraftInputs {
    lines: Vec<LineItem>,
    charges: Vec<AdditionalCharge>,
    tcs_percentage: Decimal,
}

impl From<DraftInputs> for InvoiceDraft {
    fn from(inputs: DraftInputs) -> Self {
        let mut draft = InvoiceDraft {
            lines: inputs.lines.iter().map(calculate_line_item).collect(),
            charges: inputs.charges,
            tcs_percentage: inputs.tcs_percentage,
            totals: InvoiceTotals::default(),
        };
        draft.refresh();
        draft
    }
}

impl InvoiceDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn charges(&self) -> &[AdditionalCharge] {
        &self.charges
    }

    pub fn totals(&self) -> &InvoiceTotals {
        &self.totals
    }

    pub fn tcs_percentage(&self) -> Decimal {
        self.tcs_percentage
    }

    pub fn add_line(&mut self, line: LineItem) -> usize {
        self.lines.push(calculate_line_item(&line));
        self.refresh();
        self.lines.len() - 1
    }

    /// Edit a line in place. Returns `false` for an unknown index.
    pub fn update_line<F>(&mut self, index: usize, edit: F) -> bool
    where
        F: FnOnce(&mut LineItem),
    {
        let Some(line) = self.lines.get_mut(index) else {
            return false;
        };
        edit(line);
        *line = calculate_line_item(line);
        self.refresh();
        true
    }

    pub fn remove_line(&mut self, index: usize) -> Option<LineItem> {
        if index >= self.lines.len() {
            return None;
        }
        let removed = self.lines.remove(index);
        self.refresh();
        Some(removed)
    }

    pub fn add_charge(&mut self, charge: AdditionalCharge) -> usize {
        self.charges.push(charge);
        self.refresh();
        self.charges.len() - 1
    }

    pub fn set_charge_amount(&mut self, index: usize, amount: Decimal) -> bool {
        let Some(charge) = self.charges.get_mut(index) else {
            return false;
        };
        charge.amount = amount;
        self.refresh();
        true
    }

    pub fn remove_charge(&mut self, index: usize) -> Option<AdditionalCharge> {
        if index >= self.charges.len() {
            return None;
        }
        let removed = self.charges.remove(index);
        self.refresh();
        Some(removed)
    }

    pub fn set_tcs_percentage(&mut self, tcs_percentage: Decimal) {
        self.tcs_percentage = tcs_percentage;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.totals = recalculate_totals(&self.lines, &self.charges, self.tcs_percentage);
    }
}
