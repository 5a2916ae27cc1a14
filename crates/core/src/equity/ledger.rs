use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::Result;
use crate::founders::{Founder, FounderRepositoryTrait};
use crate::investments::{InvestmentRecord, InvestmentRepositoryTrait};
use crate::recognition::{RecognitionRecord, RecognitionRepositoryTrait};
use crate::retry::{with_retry, RetryPolicy};
use crate::startups::StartupRepositoryTrait;

use super::calculator::{
    compute_equity_percentage, compute_price_per_share, compute_total_shares, latest_post_money,
};

/// Derived totals persisted whenever the ledger changes. Always recomputed
/// from the current rows, never adjusted incrementally.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTotals {
    pub total_funding: Decimal,
    pub total_shares: i64,
    pub esop_reserved_shares: i64,
    pub price_per_share: Decimal,
    pub current_valuation: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HolderKind {
    Founder,
    Investor,
    Esop,
    Program,
}

/// One row of the cap table view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapTableEntry {
    pub holder: String,
    pub kind: HolderKind,
    pub shares: i64,
    pub equity_percentage: Decimal,
}

/// One startup's share-bearing rows, fetched as a unit. All derived values
/// are computed from this snapshot so every call site agrees on the sum.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    pub founders: Vec<Founder>,
    pub investments: Vec<InvestmentRecord>,
    pub recognitions: Vec<RecognitionRecord>,
    pub esop_reserved: i64,
}

impl LedgerSnapshot {
    pub fn total_shares(&self) -> i64 {
        compute_total_shares(
            &self.founders,
            &self.investments,
            self.esop_reserved,
            &self.recognitions,
        )
    }

    /// Sum of all investment amounts, the startup's cumulative funding.
    pub fn total_funding(&self) -> Decimal {
        self.investments.iter().map(|r| r.amount).sum()
    }

    pub fn latest_post_money(&self) -> Option<Decimal> {
        latest_post_money(&self.investments)
    }

    pub fn price_per_share(&self) -> Decimal {
        compute_price_per_share(
            self.latest_post_money().unwrap_or(Decimal::ZERO),
            self.total_shares(),
        )
    }

    /// Totals to persist, with `fallback_valuation` (the startup's stored
    /// valuation) used while no investment has set a post-money yet.
    pub fn totals(&self, fallback_valuation: Decimal) -> LedgerTotals {
        LedgerTotals {
            total_funding: self.total_funding(),
            total_shares: self.total_shares(),
            esop_reserved_shares: self.esop_reserved,
            price_per_share: self.price_per_share(),
            current_valuation: self.latest_post_money().unwrap_or(fallback_valuation),
        }
    }

    /// The cap table view: founders, investors, the ESOP reserve and
    /// equity-bearing program allocations with their percentages.
    pub fn cap_table(&self) -> Vec<CapTableEntry> {
        let total = self.total_shares();
        let mut entries = Vec::new();

        for founder in &self.founders {
            entries.push(CapTableEntry {
                holder: founder.name.clone(),
                kind: HolderKind::Founder,
                shares: founder.shares.unwrap_or(0),
                equity_percentage: compute_equity_percentage(
                    founder.shares,
                    total,
                    founder.equity_percentage,
                ),
            });
        }
        for record in &self.investments {
            entries.push(CapTableEntry {
                holder: record.investor_name.clone(),
                kind: HolderKind::Investor,
                shares: record.shares,
                equity_percentage: compute_equity_percentage(Some(record.shares), total, None),
            });
        }
        if self.esop_reserved > 0 {
            entries.push(CapTableEntry {
                holder: "ESOP reserve".to_string(),
                kind: HolderKind::Esop,
                shares: self.esop_reserved,
                equity_percentage: compute_equity_percentage(Some(self.esop_reserved), total, None),
            });
        }
        for record in &self.recognitions {
            if !record.fee_type.has_equity_component() {
                continue;
            }
            entries.push(CapTableEntry {
                holder: record.facilitator_name.clone(),
                kind: HolderKind::Program,
                shares: record.shares.unwrap_or(0),
                equity_percentage: compute_equity_percentage(record.shares, total, None),
            });
        }
        entries
    }
}

/// Shared snapshot loader. Every service reads ledger state through this so
/// totals are always derived from the same set of rows.
#[derive(Clone)]
pub struct Ledger {
    founders: Arc<dyn FounderRepositoryTrait>,
    investments: Arc<dyn InvestmentRepositoryTrait>,
    recognitions: Arc<dyn RecognitionRepositoryTrait>,
    startups: Arc<dyn StartupRepositoryTrait>,
    retry: RetryPolicy,
}

impl Ledger {
    pub fn new(
        founders: Arc<dyn FounderRepositoryTrait>,
        investments: Arc<dyn InvestmentRepositoryTrait>,
        recognitions: Arc<dyn RecognitionRepositoryTrait>,
        startups: Arc<dyn StartupRepositoryTrait>,
    ) -> Self {
        Self {
            founders,
            investments,
            recognitions,
            startups,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn snapshot(&self, startup_id: &str) -> Result<LedgerSnapshot> {
        let founders = with_retry("Ledger", self.retry, || self.founders.list(startup_id))?;
        let investments = with_retry("Ledger", self.retry, || self.investments.list(startup_id))?;
        let recognitions = with_retry("Ledger", self.retry, || {
            self.recognitions.list(startup_id)
        })?;
        let esop_reserved = with_retry("Ledger", self.retry, || {
            self.startups.get_shares(startup_id)
        })?
        .map(|shares| shares.esop_reserved_shares)
        .unwrap_or(0);

        Ok(LedgerSnapshot {
            founders,
            investments,
            recognitions,
            esop_reserved,
        })
    }
}
