//! Entry validation for investment records. Every rule fails with the
//! offending field so the form can attach the message; validation always
//! precedes persistence, so a rejected entry writes nothing.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::equity::InvestmentDerived;
use crate::errors::{Error, Result};

use super::model::NewInvestment;

pub fn validate_new_investment(new: &NewInvestment, today: NaiveDate) -> Result<()> {
    let date = new
        .date
        .ok_or_else(|| Error::validation("date", "date is required"))?;
    if date > today {
        return Err(Error::validation("date", "date cannot be in the future"));
    }
    if new.investor_type.is_none() {
        return Err(Error::validation(
            "investorType",
            "investor type is required",
        ));
    }
    if new.round_type.is_none() {
        return Err(Error::validation(
            "roundType",
            "investment round type is required",
        ));
    }
    if new.investor_name.trim().is_empty() {
        return Err(Error::validation(
            "investorName",
            "investor name is required",
        ));
    }
    if new.shares <= 0 {
        return Err(Error::validation(
            "shares",
            "shares must be greater than zero",
        ));
    }
    if new.price_per_share <= Decimal::ZERO {
        return Err(Error::validation(
            "pricePerShare",
            "price per share must be greater than zero",
        ));
    }
    Ok(())
}

/// Checks on the derived fields, after [`validate_new_investment`] passed and
/// the amount, equity allocation and post-money have been computed.
pub fn validate_derived(derived: &InvestmentDerived) -> Result<()> {
    if derived.amount <= Decimal::ZERO {
        return Err(Error::validation(
            "amount",
            "investment amount must be greater than zero",
        ));
    }
    if derived.equity_percentage < Decimal::ZERO {
        return Err(Error::validation(
            "equityAllocated",
            "equity allocation cannot be negative",
        ));
    }
    if derived.post_money_valuation <= Decimal::ZERO {
        return Err(Error::validation(
            "postMoneyValuation",
            "post-money valuation must be greater than zero",
        ));
    }
    Ok(())
}
