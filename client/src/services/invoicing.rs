//! Invoice service
//!
//! Builds the save/update payload from an [`InvoiceDraft`] and a header.
//! Totals, TCS, round-off and amount in words all come from the shared
//! engines so the saved figures match what was shown while editing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::words::{amount_in_words, WordsSuffix};
use shared::{validate_percentage, AdditionalCharge, InvoiceDraft, LineItem};

use crate::api::{ApiClient, ApiResponse};
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// Invoice header fields chosen on the form
#[derive(Debug, Clone, Default)]
pub struct InvoiceHeader {
    /// Set when editing an existing invoice
    pub invoice_id: Option<i64>,
    pub voucher_id: i64,
    pub prefix: String,
    pub voucher_date: Option<NaiveDate>,
    pub client_ledger_id: i64,
    pub consignee_ledger_id: Option<i64>,
    pub invoice_type: String,
    pub vehicle_no: Option<String>,
    pub narration: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceMain {
    #[serde(rename = "invoiceID", skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<i64>,
    #[serde(rename = "voucherID")]
    pub voucher_id: i64,
    pub voucher_date: Option<NaiveDate>,
    #[serde(rename = "ledgerID")]
    pub ledger_id: i64,
    #[serde(rename = "consigneeLedgerID")]
    pub consignee_ledger_id: Option<i64>,
    pub invoice_type: String,
    pub vehicle_no: Option<String>,
    pub narration: Option<String>,
    pub total_quantity: Decimal,
    pub total_basic_amount: Decimal,
    pub total_discount_amount: Decimal,
    pub total_taxable_amount: Decimal,
    #[serde(rename = "totalCGSTAmount")]
    pub total_cgst_amount: Decimal,
    #[serde(rename = "totalSGSTAmount")]
    pub total_sgst_amount: Decimal,
    #[serde(rename = "totalIGSTAmount")]
    pub total_igst_amount: Decimal,
    pub total_gross_amount: Decimal,
    pub total_charges: Decimal,
    pub tcs_percentage: Decimal,
    pub tcs_amount: Decimal,
    pub round_off_tax: Decimal,
    pub net_amount: Decimal,
    pub amount_in_words: String,
}

/// Body of `/api/invoice/save` and `/api/invoice/update`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayload {
    #[serde(rename = "invVoucherID")]
    pub inv_voucher_id: i64,
    pub prefix: String,
    pub invoice_main: InvoiceMain,
    pub invoice_details: Vec<LineItem>,
    pub tax_details: Vec<AdditionalCharge>,
    pub txt_net_amt: Decimal,
}

/// Validate the draft and assemble the payload
pub fn build_payload(header: &InvoiceHeader, draft: &InvoiceDraft) -> ClientResult<InvoicePayload> {
    if header.voucher_id <= 0 {
        return Err(ClientError::Validation("Please select a voucher type".to_string()));
    }
    if header.client_ledger_id <= 0 {
        return Err(ClientError::Validation("Please select a client".to_string()));
    }
    if draft.lines().is_empty() {
        return Err(ClientError::Validation("Please add at least one invoice line".to_string()));
    }
    for line in draft.lines() {
        for percentage in [line.discount_percentage, line.gst_percentage] {
            validate_percentage(percentage).map_err(|e| ClientError::Validation(e.to_string()))?;
        }
    }
    validate_percentage(draft.tcs_percentage())
        .map_err(|e| ClientError::Validation(e.to_string()))?;

    let totals = draft.totals();
    let invoice_main = InvoiceMain {
        invoice_id: header.invoice_id,
        voucher_id: header.voucher_id,
        voucher_date: header.voucher_date,
        ledger_id: header.client_ledger_id,
        consignee_ledger_id: header.consignee_ledger_id,
        invoice_type: header.invoice_type.clone(),
        vehicle_no: header.vehicle_no.clone(),
        narration: header.narration.clone(),
        total_quantity: totals.total_quantity,
        total_basic_amount: totals.total_basic_amount,
        total_discount_amount: totals.total_discount_amount,
        total_taxable_amount: totals.total_taxable_amount,
        total_cgst_amount: totals.total_cgst_amount,
        total_sgst_amount: totals.total_sgst_amount,
        total_igst_amount: totals.total_igst_amount,
        total_gross_amount: totals.total_gross_amount,
        total_charges: totals.total_charges,
        tcs_percentage: totals.tcs_percentage,
        tcs_amount: totals.tcs_amount,
        round_off_tax: totals.round_off,
        net_amount: totals.net_amount,
        amount_in_words: amount_in_words(totals.net_amount, WordsSuffix::RupeesOnly),
    };

    Ok(InvoicePayload {
        inv_voucher_id: header.voucher_id,
        prefix: header.prefix.clone(),
        invoice_main,
        invoice_details: draft.lines().to_vec(),
        tax_details: draft.charges().to_vec(),
        txt_net_amt: totals.net_amount,
    })
}

/// Invoice service
#[derive(Clone)]
pub struct InvoiceService {
    api: ApiClient,
}

impl InvoiceService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Save a new invoice, or update it when the header carries an id
    pub async fn save(
        &self,
        session: &Session,
        header: &InvoiceHeader,
        draft: &InvoiceDraft,
    ) -> ClientResult<ApiResponse> {
        let payload = build_payload(header, draft).map_err(|e| {
            tracing::warn!(error = %e, "Invoice rejected before save");
            e
        })?;
        tracing::info!(
            voucher_id = header.voucher_id,
            net_amount = %payload.txt_net_amt,
            update = header.invoice_id.is_some(),
            "Saving invoice"
        );
        match header.invoice_id {
            Some(_) => self.api.invoice().update(session, &payload).await,
            None => self.api.invoice().save(session, &payload).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn header() -> InvoiceHeader {
        InvoiceHeader {
            voucher_id: 3,
            prefix: "SCR".to_string(),
            client_ledger_id: 120,
            invoice_type: "TAX".to_string(),
            ..Default::default()
        }
    }

    fn draft() -> InvoiceDraft {
        let mut draft = InvoiceDraft::new();
        let mut line = LineItem::new(dec("100"), dec("10"));
        line.discount_percentage = dec("10");
        line.set_gst_percentage(dec("18"));
        draft.add_line(line);
        draft
    }

    #[test]
    fn test_payload_carries_totals_and_words() {
        let payload = build_payload(&header(), &draft()).unwrap();
        assert_eq!(payload.txt_net_amt, dec("1062"));
        assert_eq!(payload.invoice_main.total_cgst_amount, dec("81"));
        assert_eq!(
            payload.invoice_main.amount_in_words,
            "One Thousand Sixty Two Rupees Only"
        );

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["invVoucherID"], 3);
        assert_eq!(json["invoiceMain"]["ledgerID"], 120);
        assert_eq!(json["invoiceMain"]["netAmount"], "1062");
        let round_off = json["invoiceMain"]["roundOffTax"].as_str().unwrap();
        assert_eq!(dec(round_off), Decimal::ZERO);
        assert!(json["invoiceMain"].get("invoiceID").is_none());
        let gross = json["invoiceDetails"][0]["grossAmount"].as_str().unwrap();
        assert_eq!(dec(gross), dec("1062"));
    }

    #[test]
    fn test_payload_requires_header_and_lines() {
        let mut no_voucher = header();
        no_voucher.voucher_id = 0;
        assert!(build_payload(&no_voucher, &draft()).is_err());

        let mut no_client = header();
        no_client.client_ledger_id = 0;
        assert!(build_payload(&no_client, &draft()).is_err());

        assert!(build_payload(&header(), &InvoiceDraft::new()).is_err());
    }

    #[test]
    fn test_payload_rejects_out_of_range_tcs() {
        let mut draft = draft();
        draft.set_tcs_percentage(dec("120"));
        assert!(matches!(
            build_payload(&header(), &draft),
            Err(ClientError::Validation(_))
        ));
    }
}
