use std::sync::Arc;

use log::info;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::equity::Ledger;
use crate::errors::{Error, Result};
use crate::events::{EventBus, LedgerEvent};
use crate::startups::StartupRepositoryTrait;

use super::model::{Founder, NewFounder};
use super::repository::FounderRepositoryTrait;

pub struct FounderService {
    ledger: Ledger,
    founders: Arc<dyn FounderRepositoryTrait>,
    startups: Arc<dyn StartupRepositoryTrait>,
    events: Arc<EventBus>,
}

impl FounderService {
    pub fn new(
        ledger: Ledger,
        founders: Arc<dyn FounderRepositoryTrait>,
        startups: Arc<dyn StartupRepositoryTrait>,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            ledger,
            founders,
            startups,
            events,
        }
    }

    pub fn list_founders(&self, startup_id: &str) -> Result<Vec<Founder>> {
        self.founders.list(startup_id)
    }

    /// Saving the founder list replaces it wholesale, then recomputes and
    /// persists the startup's totals in the same transaction.
    pub fn save_founders(
        &self,
        startup_id: &str,
        new_founders: Vec<NewFounder>,
    ) -> Result<Vec<Founder>> {
        for founder in &new_founders {
            validate_founder(founder)?;
        }

        let startup = self.startups.get(startup_id)?;
        let rows: Vec<Founder> = new_founders
            .into_iter()
            .map(|f| Founder {
                id: Uuid::new_v4().to_string(),
                startup_id: startup_id.to_string(),
                name: f.name.trim().to_string(),
                email: f.email.trim().to_string(),
                shares: f.shares,
                equity_percentage: f.equity_percentage,
            })
            .collect();

        let mut snapshot = self.ledger.snapshot(startup_id)?;
        snapshot.founders = rows.clone();
        let totals = snapshot.totals(startup.current_valuation);

        let saved = self.founders.replace_all(startup_id, &rows, &totals)?;
        info!(
            "[Founders] replaced founder list for {} ({} founders, {} total shares)",
            startup_id,
            saved.len(),
            totals.total_shares
        );
        self.events.emit(&LedgerEvent::LedgerRecomputed {
            startup_id: startup_id.to_string(),
            total_funding: totals.total_funding,
            total_shares: totals.total_shares,
            price_per_share: totals.price_per_share,
        });
        self.events.emit(&LedgerEvent::FoundersReplaced {
            startup_id: startup_id.to_string(),
            count: saved.len(),
        });
        Ok(saved)
    }
}

fn validate_founder(founder: &NewFounder) -> Result<()> {
    if founder.name.trim().is_empty() {
        return Err(Error::validation("name", "founder name is required"));
    }
    if founder.email.trim().is_empty() {
        return Err(Error::validation("email", "founder email is required"));
    }
    if let Some(shares) = founder.shares {
        if shares < 0 {
            return Err(Error::validation("shares", "shares cannot be negative"));
        }
    }
    if let Some(pct) = founder.equity_percentage {
        if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
            return Err(Error::validation(
                "equityPercentage",
                "equity percentage must be between 0 and 100",
            ));
        }
    }
    Ok(())
}
