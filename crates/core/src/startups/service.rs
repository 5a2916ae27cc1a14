use std::sync::Arc;

use chrono::Utc;
use log::info;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::equity::{CapTableEntry, Ledger, LedgerTotals};
use crate::errors::{Error, Result};
use crate::events::{EventBus, LedgerEvent};

use super::model::{ComplianceStatus, NewStartup, Startup, StartupShares};
use super::repository::StartupRepositoryTrait;

pub struct StartupService {
    ledger: Ledger,
    startups: Arc<dyn StartupRepositoryTrait>,
    events: Arc<EventBus>,
}

impl StartupService {
    pub fn new(
        ledger: Ledger,
        startups: Arc<dyn StartupRepositoryTrait>,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            ledger,
            startups,
            events,
        }
    }

    pub fn create_startup(&self, new: NewStartup) -> Result<Startup> {
        if new.name.trim().is_empty() {
            return Err(Error::validation("name", "startup name is required"));
        }
        let startup = Startup {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            sector: new.sector,
            current_valuation: new.current_valuation.unwrap_or(Decimal::ZERO),
            total_funding: Decimal::ZERO,
            total_revenue: new.total_revenue.unwrap_or(Decimal::ZERO),
            compliance_status: ComplianceStatus::Pending,
            registered_at: Utc::now(),
        };
        let startup = self.startups.insert(&startup)?;
        info!("[Startups] registered {} ({})", startup.name, startup.id);
        Ok(startup)
    }

    pub fn get_startup(&self, startup_id: &str) -> Result<Startup> {
        self.startups.get(startup_id)
    }

    /// The shares row, or zeros when nothing has been persisted yet.
    pub fn get_shares_data(&self, startup_id: &str) -> Result<StartupShares> {
        Ok(self
            .startups
            .get_shares(startup_id)?
            .unwrap_or(StartupShares {
                startup_id: startup_id.to_string(),
                total_shares: 0,
                esop_reserved_shares: 0,
                price_per_share: Decimal::ZERO,
                updated_at: Utc::now(),
            }))
    }

    /// Change the ESOP reserve and fold it into the recomputed totals.
    pub fn set_esop_reserved(&self, startup_id: &str, esop_reserved: i64) -> Result<LedgerTotals> {
        if esop_reserved < 0 {
            return Err(Error::validation(
                "esopReservedShares",
                "ESOP reserve cannot be negative",
            ));
        }
        let startup = self.startups.get(startup_id)?;
        let mut snapshot = self.ledger.snapshot(startup_id)?;
        snapshot.esop_reserved = esop_reserved;
        let totals = snapshot.totals(startup.current_valuation);
        self.persist_totals(startup_id, &totals)?;
        Ok(totals)
    }

    /// Manual repair: recompute every derived total from the current rows and
    /// persist. Safe to call at any time, the computation is idempotent.
    pub fn recalculate(&self, startup_id: &str) -> Result<LedgerTotals> {
        let startup = self.startups.get(startup_id)?;
        let snapshot = self.ledger.snapshot(startup_id)?;
        let totals = snapshot.totals(startup.current_valuation);
        self.persist_totals(startup_id, &totals)?;
        info!(
            "[Startups] recalculated ledger for {}: funding {} over {} shares",
            startup_id, totals.total_funding, totals.total_shares
        );
        Ok(totals)
    }

    pub fn cap_table(&self, startup_id: &str) -> Result<Vec<CapTableEntry>> {
        Ok(self.ledger.snapshot(startup_id)?.cap_table())
    }

    fn persist_totals(&self, startup_id: &str, totals: &LedgerTotals) -> Result<()> {
        self.startups.update_totals(startup_id, totals)?;
        self.events.emit(&LedgerEvent::LedgerRecomputed {
            startup_id: startup_id.to_string(),
            total_funding: totals.total_funding,
            total_shares: totals.total_shares,
            price_per_share: totals.price_per_share,
        });
        Ok(())
    }
}
