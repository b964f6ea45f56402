//! Ledger running-balance reconstruction
//!
//! The ledger endpoint returns movements newest first. Balances are only
//! meaningful when accumulated oldest first, so rows are replayed in
//! chronological order and handed back newest first for display.
//! Balances clamp at the Decimal range rather than overflow.

use rust_decimal::Decimal;

use crate::models::{LedgerRow, LedgerSummary, LedgerTransaction, ReplayOrder};
use crate::totals::saturating_sum;

/// Replay by plain reversal of the backend order.
///
/// Relies on the backend list being exact reverse chronology. Same-day
/// movements returned in any other order produce a wrong intermediate balance
/// sequence; [`reconstruct_balances_by_date`] sorts explicitly instead.
pub fn reconstruct_balances(transactions: &[LedgerTransaction]) -> Vec<LedgerRow> {
    let mut rows = replay(transactions.iter().rev());
    rows.reverse();
    rows
}

/// Replay after a stable sort on `voucher_date`. Ties keep the reversed
/// backend order; rows without a date sort first.
pub fn reconstruct_balances_by_date(transactions: &[LedgerTransaction]) -> Vec<LedgerRow> {
    let mut chronological: Vec<&LedgerTransaction> = transactions.iter().rev().collect();
    chronological.sort_by_key(|t| t.voucher_date);
    let mut rows = replay(chronological.into_iter());
    rows.reverse();
    rows
}

pub fn reconstruct(transactions: &[LedgerTransaction], order: ReplayOrder) -> Vec<LedgerRow> {
    match order {
        ReplayOrder::Reverse => reconstruct_balances(transactions),
        ReplayOrder::VoucherDate => reconstruct_balances_by_date(transactions),
    }
}

/// Σ receipt − Σ issue, independent of order
pub fn net_balance(transactions: &[LedgerTransaction]) -> Decimal {
    saturating_sum(transactions.iter().map(LedgerTransaction::net_movement))
}

/// Fill the IN/OUT totals and balance of a summary from its movements
pub fn summarize(summary: LedgerSummary, transactions: &[LedgerTransaction]) -> LedgerSummary {
    let total_receipt = saturating_sum(transactions.iter().map(|t| t.receipt_quantity));
    let total_issue = saturating_sum(transactions.iter().map(|t| t.issue_quantity));
    LedgerSummary {
        total_receipt,
        total_issue,
        balance: total_receipt.saturating_sub(total_issue),
        ..summary
    }
}

fn replay<'a, I>(chronological: I) -> Vec<LedgerRow>
where
    I: Iterator<Item = &'a LedgerTransaction>,
{
    let mut running = Decimal::ZERO;
    chronological
        .map(|transaction| {
            running = running.saturating_add(transaction.net_movement());
            LedgerRow {
                transaction: transaction.clone(),
                balance: running,
            }
        })
        .collect()
}
