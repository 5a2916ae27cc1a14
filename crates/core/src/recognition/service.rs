use std::sync::Arc;

use chrono::Utc;
use log::info;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::equity::{compute_investment_derived, Ledger};
use crate::errors::{Error, Result};
use crate::events::{EventBus, LedgerEvent};
use crate::startups::StartupRepositoryTrait;

use super::model::{NewRecognition, RecognitionRecord};
use super::repository::RecognitionRepositoryTrait;

pub struct RecognitionService {
    ledger: Ledger,
    recognitions: Arc<dyn RecognitionRepositoryTrait>,
    startups: Arc<dyn StartupRepositoryTrait>,
    events: Arc<EventBus>,
}

impl RecognitionService {
    pub fn new(
        ledger: Ledger,
        recognitions: Arc<dyn RecognitionRepositoryTrait>,
        startups: Arc<dyn StartupRepositoryTrait>,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            ledger,
            recognitions,
            startups,
            events,
        }
    }

    pub fn list_records(&self, startup_id: &str) -> Result<Vec<RecognitionRecord>> {
        self.recognitions.list(startup_id)
    }

    pub fn add_record(&self, startup_id: &str, new: NewRecognition) -> Result<RecognitionRecord> {
        validate_recognition(&new)?;

        let startup = self.startups.get(startup_id)?;
        let snapshot = self.ledger.snapshot(startup_id)?;

        // Only equity-bearing fee types carry pricing; for them the amount
        // and allocation are derived exactly like an investment's.
        let (investment_amount, equity_allocated) = if new.fee_type.has_equity_component() {
            let shares = new.shares.unwrap_or(0);
            let price = new.price_per_share.unwrap_or(Decimal::ZERO);
            let derived = compute_investment_derived(shares, price, snapshot.total_shares());
            (Some(derived.amount), Some(derived.equity_percentage))
        } else {
            (None, None)
        };

        let record = RecognitionRecord {
            id: Uuid::new_v4().to_string(),
            startup_id: startup_id.to_string(),
            program_name: new.program_name.trim().to_string(),
            facilitator_name: new.facilitator_name.trim().to_string(),
            facilitator_code: new.facilitator_code,
            fee_type: new.fee_type,
            shares: new.shares,
            price_per_share: new.price_per_share,
            investment_amount,
            equity_allocated,
            agreement_document: new.agreement_document,
            created_at: Utc::now(),
        };

        let mut after = snapshot;
        after.recognitions.push(record.clone());
        let totals = after.totals(startup.current_valuation);

        let record = self.recognitions.insert(&record, &totals)?;
        info!(
            "[Recognition] recorded {} engagement for {} via {}",
            record.fee_type.as_str(),
            startup_id,
            record.facilitator_name
        );
        self.events.emit(&LedgerEvent::LedgerRecomputed {
            startup_id: startup_id.to_string(),
            total_funding: totals.total_funding,
            total_shares: totals.total_shares,
            price_per_share: totals.price_per_share,
        });
        self.events.emit(&LedgerEvent::RecognitionAdded {
            startup_id: startup_id.to_string(),
            record_id: record.id.clone(),
        });
        Ok(record)
    }

    pub fn delete_record(&self, startup_id: &str, record_id: &str) -> Result<()> {
        let record = self.recognitions.get(startup_id, record_id)?;
        let startup = self.startups.get(startup_id)?;

        let mut snapshot = self.ledger.snapshot(startup_id)?;
        snapshot.recognitions.retain(|r| r.id != record.id);
        let totals = snapshot.totals(startup.current_valuation);

        self.recognitions.delete(startup_id, record_id, &totals)?;
        info!(
            "[Recognition] deleted {} from {}, {} shares now outstanding",
            record_id, startup_id, totals.total_shares
        );
        self.events.emit(&LedgerEvent::LedgerRecomputed {
            startup_id: startup_id.to_string(),
            total_funding: totals.total_funding,
            total_shares: totals.total_shares,
            price_per_share: totals.price_per_share,
        });
        self.events.emit(&LedgerEvent::RecognitionDeleted {
            startup_id: startup_id.to_string(),
            record_id: record_id.to_string(),
        });
        Ok(())
    }
}

fn validate_recognition(new: &NewRecognition) -> Result<()> {
    if new.program_name.trim().is_empty() {
        return Err(Error::validation("programName", "program name is required"));
    }
    if new.facilitator_name.trim().is_empty() {
        return Err(Error::validation(
            "facilitatorName",
            "facilitator name is required",
        ));
    }
    if new.fee_type.has_equity_component() {
        match new.shares {
            Some(shares) if shares > 0 => {}
            _ => {
                return Err(Error::validation(
                    "shares",
                    "shares are required for equity and hybrid fee types",
                ))
            }
        }
        match new.price_per_share {
            Some(price) if price > Decimal::ZERO => {}
            _ => {
                return Err(Error::validation(
                    "pricePerShare",
                    "price per share is required for equity and hybrid fee types",
                ))
            }
        }
    } else if new.shares.is_some() || new.price_per_share.is_some() {
        return Err(Error::validation(
            "shares",
            "share fields only apply to equity and hybrid fee types",
        ));
    }
    Ok(())
}
