//! Ledger service: running balances and per-item summaries

use shared::ledger::{net_balance, reconstruct};
use shared::{DateRange, LedgerRow, LedgerSummary, ReplayOrder, ScrapStockItem};

use crate::api::{ApiClient, StockQuery};
use crate::error::ClientResult;
use crate::session::Session;

/// Ledger service
#[derive(Clone)]
pub struct LedgerService {
    api: ApiClient,
    replay_order: ReplayOrder,
}

impl LedgerService {
    pub fn new(api: ApiClient, replay_order: ReplayOrder) -> Self {
        Self { api, replay_order }
    }

    pub fn replay_order(&self) -> ReplayOrder {
        self.replay_order
    }

    /// Movements of an item with the balance after each, newest first
    pub async fn item_ledger(
        &self,
        session: &Session,
        item_id: Option<i64>,
        range: &DateRange,
    ) -> ClientResult<Vec<LedgerRow>> {
        let transactions = self.api.scrap().ledger(session, item_id, range).await?;
        let rows = reconstruct(&transactions, self.replay_order);
        tracing::info!(
            ?item_id,
            rows = rows.len(),
            closing_balance = %net_balance(&transactions),
            order = ?self.replay_order,
            "Reconstructed ledger"
        );
        Ok(rows)
    }

    pub async fn summary(
        &self,
        session: &Session,
        range: &DateRange,
    ) -> ClientResult<Vec<LedgerSummary>> {
        let summaries = self.api.scrap().ledger_summary(session, range).await?;
        tracing::debug!(items = summaries.len(), "Loaded ledger summary");
        Ok(summaries)
    }

    pub async fn stock(
        &self,
        session: &Session,
        query: &StockQuery,
    ) -> ClientResult<Vec<ScrapStockItem>> {
        self.api.scrap().stock(session, query).await
    }
}
