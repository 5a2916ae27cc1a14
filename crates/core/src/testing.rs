//! In-memory storage backend for service unit tests.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rust_decimal::Decimal;

use crate::equity::{Ledger, LedgerTotals};
use crate::errors::{Error, Result};
use crate::founders::{Founder, FounderRepositoryTrait};
use crate::investments::{InvestmentRecord, InvestmentRepositoryTrait};
use crate::recognition::{RecognitionRecord, RecognitionRepositoryTrait};
use crate::startups::{ComplianceStatus, Startup, StartupRepositoryTrait, StartupShares};

#[derive(Default)]
struct State {
    startups: Vec<Startup>,
    shares: Vec<StartupShares>,
    founders: Vec<Founder>,
    investments: Vec<InvestmentRecord>,
    recognitions: Vec<RecognitionRecord>,
}

/// Backs every repository trait with one shared `Vec`-based state, applying
/// totals the same way the SQLite backend does.
#[derive(Default)]
pub(crate) struct InMemoryLedger {
    state: Mutex<State>,
}

impl InMemoryLedger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seed a startup and return its id.
    pub fn seed_startup(&self, name: &str) -> String {
        let startup = Startup {
            id: format!("startup-{}", name),
            name: name.to_string(),
            sector: None,
            current_valuation: Decimal::ZERO,
            total_funding: Decimal::ZERO,
            total_revenue: Decimal::ZERO,
            compliance_status: ComplianceStatus::Pending,
            registered_at: Utc::now(),
        };
        let id = startup.id.clone();
        self.lock().startups.push(startup);
        id
    }

    pub fn ledger(backend: &Arc<Self>) -> Ledger {
        Ledger::new(
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend.clone(),
        )
    }

    pub fn startup(&self, startup_id: &str) -> Startup {
        self.lock()
            .startups
            .iter()
            .find(|s| s.id == startup_id)
            .cloned()
            .unwrap()
    }

    pub fn shares_row(&self, startup_id: &str) -> Option<StartupShares> {
        self.lock()
            .shares
            .iter()
            .find(|s| s.startup_id == startup_id)
            .cloned()
    }

    pub fn investment_count(&self, startup_id: &str) -> usize {
        self.lock()
            .investments
            .iter()
            .filter(|r| r.startup_id == startup_id)
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn apply_totals(state: &mut State, startup_id: &str, totals: &LedgerTotals) {
        if let Some(startup) = state.startups.iter_mut().find(|s| s.id == startup_id) {
            startup.total_funding = totals.total_funding;
            startup.current_valuation = totals.current_valuation;
        }
        state.shares.retain(|s| s.startup_id != startup_id);
        state.shares.push(StartupShares {
            startup_id: startup_id.to_string(),
            total_shares: totals.total_shares,
            esop_reserved_shares: totals.esop_reserved_shares,
            price_per_share: totals.price_per_share,
            updated_at: Utc::now(),
        });
    }
}

impl FounderRepositoryTrait for InMemoryLedger {
    fn list(&self, startup_id: &str) -> Result<Vec<Founder>> {
        Ok(self
            .lock()
            .founders
            .iter()
            .filter(|f| f.startup_id == startup_id)
            .cloned()
            .collect())
    }

    fn replace_all(
        &self,
        startup_id: &str,
        founders: &[Founder],
        totals: &LedgerTotals,
    ) -> Result<Vec<Founder>> {
        let mut state = self.lock();
        state.founders.retain(|f| f.startup_id != startup_id);
        state.founders.extend_from_slice(founders);
        Self::apply_totals(&mut state, startup_id, totals);
        Ok(founders.to_vec())
    }
}

impl InvestmentRepositoryTrait for InMemoryLedger {
    fn list(&self, startup_id: &str) -> Result<Vec<InvestmentRecord>> {
        let mut records: Vec<InvestmentRecord> = self
            .lock()
            .investments
            .iter()
            .filter(|r| r.startup_id == startup_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| (a.date, a.created_at).cmp(&(b.date, b.created_at)));
        Ok(records)
    }

    fn get(&self, startup_id: &str, record_id: &str) -> Result<InvestmentRecord> {
        self.lock()
            .investments
            .iter()
            .find(|r| r.startup_id == startup_id && r.id == record_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("investment record {}", record_id)))
    }

    fn insert(&self, record: &InvestmentRecord, totals: &LedgerTotals) -> Result<InvestmentRecord> {
        let mut state = self.lock();
        state.investments.push(record.clone());
        Self::apply_totals(&mut state, &record.startup_id, totals);
        Ok(record.clone())
    }

    fn delete(&self, startup_id: &str, record_id: &str, totals: &LedgerTotals) -> Result<()> {
        let mut state = self.lock();
        let before = state.investments.len();
        state
            .investments
            .retain(|r| !(r.startup_id == startup_id && r.id == record_id));
        if state.investments.len() == before {
            return Err(Error::NotFound(format!("investment record {}", record_id)));
        }
        Self::apply_totals(&mut state, startup_id, totals);
        Ok(())
    }
}

impl RecognitionRepositoryTrait for InMemoryLedger {
    fn list(&self, startup_id: &str) -> Result<Vec<RecognitionRecord>> {
        Ok(self
            .lock()
            .recognitions
            .iter()
            .filter(|r| r.startup_id == startup_id)
            .cloned()
            .collect())
    }

    fn get(&self, startup_id: &str, record_id: &str) -> Result<RecognitionRecord> {
        self.lock()
            .recognitions
            .iter()
            .find(|r| r.startup_id == startup_id && r.id == record_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("recognition record {}", record_id)))
    }

    fn insert(
        &self,
        record: &RecognitionRecord,
        totals: &LedgerTotals,
    ) -> Result<RecognitionRecord> {
        let mut state = self.lock();
        state.recognitions.push(record.clone());
        Self::apply_totals(&mut state, &record.startup_id, totals);
        Ok(record.clone())
    }

    fn delete(&self, startup_id: &str, record_id: &str, totals: &LedgerTotals) -> Result<()> {
        let mut state = self.lock();
        let before = state.recognitions.len();
        state
            .recognitions
            .retain(|r| !(r.startup_id == startup_id && r.id == record_id));
        if state.recognitions.len() == before {
            return Err(Error::NotFound(format!("recognition record {}", record_id)));
        }
        Self::apply_totals(&mut state, startup_id, totals);
        Ok(())
    }
}

impl StartupRepositoryTrait for InMemoryLedger {
    fn get(&self, startup_id: &str) -> Result<Startup> {
        self.lock()
            .startups
            .iter()
            .find(|s| s.id == startup_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("startup {}", startup_id)))
    }

    fn insert(&self, startup: &Startup) -> Result<Startup> {
        self.lock().startups.push(startup.clone());
        Ok(startup.clone())
    }

    fn get_shares(&self, startup_id: &str) -> Result<Option<StartupShares>> {
        Ok(self.shares_row(startup_id))
    }

    fn update_totals(&self, startup_id: &str, totals: &LedgerTotals) -> Result<()> {
        let mut state = self.lock();
        if !state.startups.iter().any(|s| s.id == startup_id) {
            return Err(Error::NotFound(format!("startup {}", startup_id)));
        }
        Self::apply_totals(&mut state, startup_id, totals);
        Ok(())
    }
}
