//! Invoice totals calculation
//!
//! discount → taxable amount → CGST/SGST/IGST → charges → TCS → round-off.
//!
//! Arithmetic saturates at `Decimal::MAX` / `Decimal::MIN` instead of
//! panicking, so out-of-range input yields a clamped amount.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{AdditionalCharge, InvoiceTotals, LineItem};

/// Re-derive every amount on a line from its inputs. Idempotent.
pub fn calculate_line_item(line: &LineItem) -> LineItem {
    let basic_amount = line.quantity.saturating_mul(line.rate);
    let discount_amount = percent_of(basic_amount, line.discount_percentage);
    let taxable_amount = basic_amount.saturating_sub(discount_amount);
    let cgst_amount = percent_of(taxable_amount, line.cgst_percentage);
    let sgst_amount = percent_of(taxable_amount, line.sgst_percentage);
    let igst_amount = percent_of(taxable_amount, line.igst_percentage);
    let gross_amount = taxable_amount
        .saturating_add(cgst_amount)
        .saturating_add(sgst_amount)
        .saturating_add(igst_amount);

    LineItem {
        basic_amount,
        discount_amount,
        taxable_amount,
        cgst_amount,
        sgst_amount,
        igst_amount,
        gross_amount,
        net_amount: gross_amount,
        ..line.clone()
    }
}

/// Aggregate already-calculated lines and charges into invoice totals.
///
/// Charges are added to the gross as-is (they are tax-inclusive). TCS is
/// levied on gross plus charges, and the net amount is rounded half away
/// from zero to whole rupees.
pub fn recalculate_totals(
    lines: &[LineItem],
    charges: &[AdditionalCharge],
    tcs_percentage: Decimal,
) -> InvoiceTotals {
    let mut totals = lines.iter().fold(InvoiceTotals::default(), |mut acc, line| {
        acc.total_quantity = acc.total_quantity.saturating_add(line.quantity);
        acc.total_basic_amount = acc.total_basic_amount.saturating_add(line.basic_amount);
        acc.total_discount_amount = acc.total_discount_amount.saturating_add(line.discount_amount);
        acc.total_taxable_amount = acc.total_taxable_amount.saturating_add(line.taxable_amount);
        acc.total_cgst_amount = acc.total_cgst_amount.saturating_add(line.cgst_amount);
        acc.total_sgst_amount = acc.total_sgst_amount.saturating_add(line.sgst_amount);
        acc.total_igst_amount = acc.total_igst_amount.saturating_add(line.igst_amount);
        acc.total_gross_amount = acc.total_gross_amount.saturating_add(line.gross_amount);
        acc
    });
    totals.total_charges = saturating_sum(charges.iter().map(|c| c.amount));

    let gross = totals.gross_with_charges();
    totals.tcs_percentage = tcs_percentage;
    totals.tcs_amount = percent_of(gross, tcs_percentage);

    let before_round = gross.saturating_add(totals.tcs_amount);
    totals.net_amount = round_rupees(before_round);
    totals.round_off = totals.net_amount.saturating_sub(before_round);
    totals
}

/// Whole-rupee rounding, half away from zero
pub fn round_rupees(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum that clamps at the Decimal range
pub(crate) fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, value| acc.saturating_add(value))
}

fn percent_of(amount: Decimal, percentage: Decimal) -> Decimal {
    match amount.checked_mul(percentage) {
        Some(product) => product / Decimal::ONE_HUNDRED,
        // Divide first when the product is out of range
        None => (amount / Decimal::ONE_HUNDRED).saturating_mul(percentage),
    }
}
