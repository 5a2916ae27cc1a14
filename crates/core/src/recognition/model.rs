use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeeType {
    Free,
    Fees,
    Equity,
    Hybrid,
}

impl FeeType {
    /// Whether records with this fee type carry shares that count toward
    /// total shares outstanding.
    pub fn has_equity_component(&self) -> bool {
        matches!(self, FeeType::Equity | FeeType::Hybrid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeeType::Free => "free",
            FeeType::Fees => "fees",
            FeeType::Equity => "equity",
            FeeType::Hybrid => "hybrid",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "free" => Ok(FeeType::Free),
            "fees" => Ok(FeeType::Fees),
            "equity" => Ok(FeeType::Equity),
            "hybrid" => Ok(FeeType::Hybrid),
            other => Err(Error::conversion(format!("unknown fee type: {}", other))),
        }
    }
}

/// A recognition/incubation program engagement. Share and pricing fields are
/// populated only when the fee type includes an equity component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionRecord {
    pub id: String,
    pub startup_id: String,
    pub program_name: String,
    pub facilitator_name: String,
    pub facilitator_code: Option<String>,
    pub fee_type: FeeType,
    pub shares: Option<i64>,
    pub price_per_share: Option<Decimal>,
    pub investment_amount: Option<Decimal>,
    pub equity_allocated: Option<Decimal>,
    pub agreement_document: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewRecognition {
    pub program_name: String,
    pub facilitator_name: String,
    pub facilitator_code: Option<String>,
    pub fee_type: FeeType,
    pub shares: Option<i64>,
    pub price_per_share: Option<Decimal>,
    pub agreement_document: Option<String>,
}
