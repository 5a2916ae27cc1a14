//! The equity ledger calculator: share totals, equity percentages,
//! price-per-share and the derived fields of a new investment.
//!
//! Every place that needs total shares outstanding goes through
//! [`compute_total_shares`] (or a [`LedgerSnapshot`] built on it). The
//! dashboard this replaces re-derived the sum inline at several call sites,
//! which is how the sites drifted apart.

mod calculator;
mod ledger;

pub use calculator::{
    compute_equity_percentage, compute_investment_derived, compute_price_per_share,
    compute_total_shares, latest_post_money, InvestmentDerived,
};
pub use ledger::{CapTableEntry, HolderKind, Ledger, LedgerSnapshot, LedgerTotals};
