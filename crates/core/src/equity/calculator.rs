use rust_decimal::Decimal;
use serde::Serialize;

use crate::founders::Founder;
use crate::investments::InvestmentRecord;
use crate::recognition::RecognitionRecord;

/// Total shares outstanding: founder shares + investment shares + the ESOP
/// reserve + recognition shares where the fee type has an equity component.
/// Missing share fields count as zero. Negative inputs are rejected at
/// validation time, before rows reach this function.
pub fn compute_total_shares(
    founders: &[Founder],
    investments: &[InvestmentRecord],
    esop_reserved: i64,
    recognitions: &[RecognitionRecord],
) -> i64 {
    let founder_shares: i64 = founders.iter().map(|f| f.shares.unwrap_or(0)).sum();
    let investment_shares: i64 = investments.iter().map(|r| r.shares).sum();
    let recognition_shares: i64 = recognitions
        .iter()
        .filter(|r| r.fee_type.has_equity_component())
        .map(|r| r.shares.unwrap_or(0))
        .sum();
    founder_shares + investment_shares + esop_reserved + recognition_shares
}

/// Latest post-money valuation divided by total shares, zero when no shares
/// are outstanding.
pub fn compute_price_per_share(latest_post_money: Decimal, total_shares: i64) -> Decimal {
    if total_shares <= 0 {
        return Decimal::ZERO;
    }
    latest_post_money / Decimal::from(total_shares)
}

/// A holder's percentage of total shares. When total shares are unknown the
/// stored percentage (if any) is the fallback, else zero.
pub fn compute_equity_percentage(
    holder_shares: Option<i64>,
    total_shares: i64,
    stored_percentage: Option<Decimal>,
) -> Decimal {
    if total_shares > 0 {
        return Decimal::from(holder_shares.unwrap_or(0)) * Decimal::ONE_HUNDRED
            / Decimal::from(total_shares);
    }
    stored_percentage.unwrap_or(Decimal::ZERO)
}

/// Fields derived when an investment is entered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentDerived {
    pub amount: Decimal,
    pub equity_percentage: Decimal,
    pub post_money_valuation: Decimal,
}

/// Derive amount, allocated equity and post-money valuation for an investment
/// of `shares` at `price_per_share` on top of `total_shares_before`.
///
/// With no prior shares the formula itself gives the investor 100% and a
/// post-money equal to the amount; no assumed founder:investor ratio is
/// applied.
pub fn compute_investment_derived(
    shares: i64,
    price_per_share: Decimal,
    total_shares_before: i64,
) -> InvestmentDerived {
    let amount = Decimal::from(shares) * price_per_share;
    let total_after = total_shares_before + shares;
    let equity_percentage = if total_after > 0 {
        Decimal::from(shares) * Decimal::ONE_HUNDRED / Decimal::from(total_after)
    } else {
        Decimal::ZERO
    };
    let post_money_valuation = if equity_percentage > Decimal::ZERO {
        amount * Decimal::ONE_HUNDRED / equity_percentage
    } else {
        Decimal::ZERO
    };
    InvestmentDerived {
        amount,
        equity_percentage,
        post_money_valuation,
    }
}

/// Post-money valuation of the latest investment record. "Latest" is the
/// maximum date; same-date records are ordered by creation time then id so
/// the result does not depend on row order.
pub fn latest_post_money(investments: &[InvestmentRecord]) -> Option<Decimal> {
    investments
        .iter()
        .max_by(|a, b| {
            (a.date, a.created_at, a.id.as_str()).cmp(&(b.date, b.created_at, b.id.as_str()))
        })
        .map(|record| record.post_money_valuation)
}
