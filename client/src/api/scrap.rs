//! Scrap master data, entry, stock and ledger endpoints

use serde::Serialize;
use serde_json::Value;
use shared::normalize::{
    ledger_summaries_from_value, ledger_transactions_from_value, materials_from_value,
    stock_items_from_value,
};
use shared::{
    DateRange, LedgerSummary, LedgerTransaction, MaterialItem, Pagination, ScrapEntryRequest,
    ScrapSource, ScrapStockItem,
};

use super::{ApiClient, ApiResponse};
use crate::error::ClientResult;
use crate::session::Session;

/// Filters for the entry list
#[derive(Debug, Clone, Default)]
pub struct EntryQuery {
    pub range: DateRange,
    pub source: Option<ScrapSource>,
}

impl EntryQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.range.query_pairs();
        if let Some(source) = self.source {
            let source = match source {
                ScrapSource::Production => "PRODUCTION",
                ScrapSource::Manual => "MANUAL",
            };
            pairs.push(("source", source.to_string()));
        }
        pairs
    }
}

/// Filters for the paged stock list
#[derive(Debug, Clone, Default)]
pub struct StockQuery {
    pub item_group_id: Option<i64>,
    pub entry_type: Option<String>,
    pub pagination: Pagination,
}

impl StockQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(group) = self.item_group_id.filter(|id| *id != 0) {
            pairs.push(("itemGroupId", group.to_string()));
        }
        if let Some(entry_type) = self.entry_type.as_deref().filter(|t| !t.is_empty()) {
            pairs.push(("entryType", entry_type.to_string()));
        }
        pairs.push(("page", self.pagination.page.to_string()));
        pairs.push(("pageSize", self.pagination.page_size.to_string()));
        pairs
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductionEntryBody<'a, T: Serialize> {
    items: &'a [T],
    user_name: Option<&'a str>,
}

pub struct ScrapApi<'a> {
    api: &'a ApiClient,
}

impl<'a> ScrapApi<'a> {
    pub(super) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Material master, normalized
    pub async fn materials(&self, session: &Session) -> ClientResult<Vec<MaterialItem>> {
        let data = self.api.get(session, "/api/scrap/materials").await?.into_data()?;
        let materials = materials_from_value(&data);
        tracing::debug!(count = materials.len(), "Loaded materials");
        Ok(materials)
    }

    pub async fn groups(&self, session: &Session) -> ClientResult<Value> {
        self.api.get(session, "/api/scrap/groups").await?.into_data()
    }

    pub async fn warehouses(&self, session: &Session) -> ClientResult<Value> {
        self.api.get(session, "/api/scrap/warehouses").await?.into_data()
    }

    pub async fn create_entry(
        &self,
        session: &Session,
        entry: &ScrapEntryRequest,
    ) -> ClientResult<ApiResponse> {
        tracing::info!(
            material_id = entry.material_id,
            weight_kg = entry.converted_weight_kg,
            "Creating scrap entry"
        );
        self.api
            .post(session, "/api/scrap/entry", Some(entry))
            .await?
            .into_result()
    }

    pub async fn entries(&self, session: &Session, query: &EntryQuery) -> ClientResult<Value> {
        self.api
            .get_query(session, "/api/scrap/entries", &query.pairs())
            .await?
            .into_data()
    }

    pub async fn stock(
        &self,
        session: &Session,
        query: &StockQuery,
    ) -> ClientResult<Vec<ScrapStockItem>> {
        let data = self
            .api
            .get_query(session, "/api/scrap/stock", &query.pairs())
            .await?
            .into_data()?;
        Ok(stock_items_from_value(&data))
    }

    pub async fn item_stock(&self, session: &Session, item_id: i64) -> ClientResult<Value> {
        self.api
            .get(session, &format!("/api/scrap/stock/{}", item_id))
            .await?
            .into_data()
    }

    /// Movements of one item (or all items), newest first
    pub async fn ledger(
        &self,
        session: &Session,
        item_id: Option<i64>,
        range: &DateRange,
    ) -> ClientResult<Vec<LedgerTransaction>> {
        let mut query = Vec::new();
        if let Some(item_id) = item_id {
            query.push(("itemId", item_id.to_string()));
        }
        query.extend(range.query_pairs());
        let data = self
            .api
            .get_query(session, "/api/scrap/ledger", &query)
            .await?
            .into_data()?;
        Ok(ledger_transactions_from_value(&data))
    }

    pub async fn ledger_summary(
        &self,
        session: &Session,
        range: &DateRange,
    ) -> ClientResult<Vec<LedgerSummary>> {
        let data = self
            .api
            .get_query(session, "/api/scrap/ledger/summary", &range.query_pairs())
            .await?
            .into_data()?;
        Ok(ledger_summaries_from_value(&data))
    }

    /// Save a batch of production scrap items
    pub async fn save_production_entries<T: Serialize>(
        &self,
        session: &Session,
        items: &[T],
        user_name: Option<&str>,
    ) -> ClientResult<ApiResponse> {
        tracing::info!(count = items.len(), "Saving production scrap entries");
        let body = ProductionEntryBody { items, user_name };
        self.api
            .post(session, "/api/scrap/production-entry", Some(&body))
            .await?
            .into_result()
    }

    /// Job contents of the session's production unit
    pub async fn job_contents(&self, session: &Session) -> ClientResult<Value> {
        let query: Vec<(&str, String)> = session
            .production_unit_id()
            .map(|unit| vec![("productionUnitId", unit.to_string())])
            .unwrap_or_default();
        self.api
            .get_query(session, "/api/scrap/job-contents", &query)
            .await?
            .into_data()
    }

    pub async fn production_details(
        &self,
        session: &Session,
        content_id: i64,
    ) -> ClientResult<Value> {
        self.api
            .get(
                session,
                &format!("/api/scrap/job-contents/{}/production-details", content_id),
            )
            .await?
            .into_data()
    }
}
