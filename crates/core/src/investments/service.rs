use std::sync::Arc;

use chrono::Utc;
use log::info;
use uuid::Uuid;

use crate::equity::{compute_investment_derived, Ledger, LedgerTotals};
use crate::errors::Result;
use crate::events::{EventBus, LedgerEvent};
use crate::startups::StartupRepositoryTrait;

use super::model::{InvestmentRecord, NewInvestment};
use super::repository::InvestmentRepositoryTrait;
use super::validation;

/// Logs investments and keeps the startup's derived totals consistent with
/// the rows. Totals are recomputed from a fresh snapshot on every write and
/// persisted atomically with the record.
pub struct InvestmentService {
    ledger: Ledger,
    investments: Arc<dyn InvestmentRepositoryTrait>,
    startups: Arc<dyn StartupRepositoryTrait>,
    events: Arc<EventBus>,
}

impl InvestmentService {
    pub fn new(
        ledger: Ledger,
        investments: Arc<dyn InvestmentRepositoryTrait>,
        startups: Arc<dyn StartupRepositoryTrait>,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            ledger,
            investments,
            startups,
            events,
        }
    }

    pub fn list_investments(&self, startup_id: &str) -> Result<Vec<InvestmentRecord>> {
        self.investments.list(startup_id)
    }

    pub fn add_investment(&self, startup_id: &str, new: NewInvestment) -> Result<InvestmentRecord> {
        validation::validate_new_investment(&new, Utc::now().date_naive())?;

        let startup = self.startups.get(startup_id)?;
        let snapshot = self.ledger.snapshot(startup_id)?;
        let derived =
            compute_investment_derived(new.shares, new.price_per_share, snapshot.total_shares());
        validation::validate_derived(&derived)?;

        let record = InvestmentRecord {
            id: Uuid::new_v4().to_string(),
            startup_id: startup_id.to_string(),
            // Presence checked by validation above.
            date: new.date.unwrap_or_default(),
            investor_name: new.investor_name.trim().to_string(),
            investor_code: new.investor_code,
            investor_type: new.investor_type.unwrap_or(super::model::InvestorType::Other),
            round_type: new
                .round_type
                .unwrap_or(super::model::InvestmentRoundType::Equity),
            amount: derived.amount,
            shares: new.shares,
            price_per_share: new.price_per_share,
            equity_allocated: derived.equity_percentage,
            pre_money_valuation: new
                .pre_money_valuation
                .or(Some(derived.post_money_valuation - derived.amount)),
            post_money_valuation: derived.post_money_valuation,
            proof_document: new.proof_document,
            created_at: Utc::now(),
        };

        let mut after = snapshot;
        after.investments.push(record.clone());
        let totals = after.totals(startup.current_valuation);

        let record = self.investments.insert(&record, &totals)?;
        info!(
            "[Investments] logged {} for {} ({} shares at {})",
            record.amount, startup_id, record.shares, record.price_per_share
        );
        self.emit_recomputed(startup_id, &totals);
        self.events.emit(&LedgerEvent::InvestmentAdded {
            startup_id: startup_id.to_string(),
            record_id: record.id.clone(),
        });
        Ok(record)
    }

    /// Deleting a record reverses its contribution to the funding total, by
    /// recomputing the total from the remaining rows.
    pub fn delete_investment(&self, startup_id: &str, record_id: &str) -> Result<()> {
        let record = self.investments.get(startup_id, record_id)?;
        let startup = self.startups.get(startup_id)?;

        let mut snapshot = self.ledger.snapshot(startup_id)?;
        snapshot.investments.retain(|r| r.id != record.id);
        let totals = snapshot.totals(startup.current_valuation);

        self.investments.delete(startup_id, record_id, &totals)?;
        info!(
            "[Investments] deleted {} from {}, funding total now {}",
            record_id, startup_id, totals.total_funding
        );
        self.emit_recomputed(startup_id, &totals);
        self.events.emit(&LedgerEvent::InvestmentDeleted {
            startup_id: startup_id.to_string(),
            record_id: record_id.to_string(),
        });
        Ok(())
    }

    fn emit_recomputed(&self, startup_id: &str, totals: &LedgerTotals) {
        self.events.emit(&LedgerEvent::LedgerRecomputed {
            startup_id: startup_id.to_string(),
            total_funding: totals.total_funding,
            total_shares: totals.total_shares,
            price_per_share: totals.price_per_share,
        });
    }
}
