//! Sales invoice endpoints

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};

use super::{ApiClient, ApiResponse};
use crate::error::ClientResult;
use crate::session::Session;

/// Filters for the processed invoice list
#[derive(Debug, Clone)]
pub struct ProcessedInvoiceQuery {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub client_id: Option<i64>,
    pub invoice_type: Option<String>,
}

impl ProcessedInvoiceQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("fromDate", self.from_date.format("%Y-%m-%d").to_string()),
            ("toDate", self.to_date.format("%Y-%m-%d").to_string()),
        ];
        if let Some(client_id) = self.client_id.filter(|id| *id != 0) {
            pairs.push(("clientId", client_id.to_string()));
        }
        if let Some(invoice_type) = self.invoice_type.as_deref().filter(|t| !t.is_empty()) {
            pairs.push(("invoiceType", invoice_type.to_string()));
        }
        pairs
    }
}

pub struct InvoiceApi<'a> {
    api: &'a ApiClient,
}

impl<'a> InvoiceApi<'a> {
    pub(super) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn voucher_types(&self, session: &Session) -> ClientResult<Value> {
        self.api.get(session, "/api/invoice/voucher-types").await?.into_data()
    }

    pub async fn clients(&self, session: &Session) -> ClientResult<Value> {
        self.api.get(session, "/api/invoice/clients").await?.into_data()
    }

    pub async fn hsn_groups(&self, session: &Session, item_sales_invoice: bool) -> ClientResult<Value> {
        self.api
            .get_query(
                session,
                "/api/invoice/hsn-groups",
                &[("itemSalesInvoice", item_sales_invoice.to_string())],
            )
            .await?
            .into_data()
    }

    pub async fn tax_ledgers(&self, session: &Session) -> ClientResult<Value> {
        self.api.get(session, "/api/invoice/tax-ledgers").await?.into_data()
    }

    pub async fn save<T: Serialize>(&self, session: &Session, invoice: &T) -> ClientResult<ApiResponse> {
        self.api
            .post(session, "/api/invoice/save", Some(invoice))
            .await?
            .into_result()
    }

    pub async fn update<T: Serialize>(&self, session: &Session, invoice: &T) -> ClientResult<ApiResponse> {
        self.api
            .put(session, "/api/invoice/update", Some(invoice))
            .await?
            .into_result()
    }

    pub async fn details(&self, session: &Session, invoice_id: i64) -> ClientResult<Value> {
        self.api
            .get(session, &format!("/api/invoice/{}/details", invoice_id))
            .await?
            .into_data()
    }

    pub async fn charges(&self, session: &Session, invoice_id: i64) -> ClientResult<Value> {
        self.api
            .get(session, &format!("/api/invoice/{}/charges", invoice_id))
            .await?
            .into_data()
    }

    pub async fn processed_invoices(
        &self,
        session: &Session,
        query: &ProcessedInvoiceQuery,
    ) -> ClientResult<Value> {
        self.api
            .get_query(session, "/api/invoice/processed-invoices", &query.pairs())
            .await?
            .into_data()
    }

    pub async fn approve(&self, session: &Session, invoice_id: i64) -> ClientResult<ApiResponse> {
        tracing::info!(invoice_id, "Approving invoice");
        self.api
            .put(session, &format!("/api/invoice/{}/approve", invoice_id), Some(&json!({})))
            .await?
            .into_result()
    }

    pub async fn cancel(&self, session: &Session, invoice_id: i64) -> ClientResult<ApiResponse> {
        tracing::info!(invoice_id, "Cancelling invoice");
        self.api
            .put(session, &format!("/api/invoice/{}/cancel", invoice_id), Some(&json!({})))
            .await?
            .into_result()
    }

    pub async fn delete(&self, session: &Session, invoice_id: i64) -> ClientResult<ApiResponse> {
        tracing::info!(invoice_id, "Deleting invoice");
        self.api
            .delete(session, &format!("/api/invoice/{}", invoice_id))
            .await?
            .into_result()
    }
}
