use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComplianceStatus {
    Pending,
    Compliant,
    NonCompliant,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Pending => "pending",
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::NonCompliant => "non_compliant",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "pending" => Ok(ComplianceStatus::Pending),
            "compliant" => Ok(ComplianceStatus::Compliant),
            "non_compliant" => Ok(ComplianceStatus::NonCompliant),
            other => Err(Error::conversion(format!(
                "unknown compliance status: {}",
                other
            ))),
        }
    }
}

/// Aggregate root. `total_funding` and `current_valuation` are derived from
/// the investment rows and rewritten whenever the ledger is recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Startup {
    pub id: String,
    pub name: String,
    pub sector: Option<String>,
    pub current_valuation: Decimal,
    pub total_funding: Decimal,
    pub total_revenue: Decimal,
    pub compliance_status: ComplianceStatus,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewStartup {
    pub name: String,
    pub sector: Option<String>,
    pub current_valuation: Option<Decimal>,
    pub total_revenue: Option<Decimal>,
}

/// Per-startup singleton holding the share totals and the derived
/// price-per-share. Upserted on every ledger recomputation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StartupShares {
    pub startup_id: String,
    pub total_shares: i64,
    pub esop_reserved_shares: i64,
    pub price_per_share: Decimal,
    pub updated_at: DateTime<Utc>,
}
