use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvestmentRoundType {
    Equity,
    Debt,
    Grant,
}

impl InvestmentRoundType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentRoundType::Equity => "equity",
            InvestmentRoundType::Debt => "debt",
            InvestmentRoundType::Grant => "grant",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "equity" => Ok(InvestmentRoundType::Equity),
            "debt" => Ok(InvestmentRoundType::Debt),
            "grant" => Ok(InvestmentRoundType::Grant),
            other => Err(Error::conversion(format!(
                "unknown investment round type: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvestorType {
    Angel,
    VcFirm,
    Corporate,
    FamilyOffice,
    Accelerator,
    Other,
}

impl InvestorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestorType::Angel => "angel",
            InvestorType::VcFirm => "vc_firm",
            InvestorType::Corporate => "corporate",
            InvestorType::FamilyOffice => "family_office",
            InvestorType::Accelerator => "accelerator",
            InvestorType::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "angel" => Ok(InvestorType::Angel),
            "vc_firm" => Ok(InvestorType::VcFirm),
            "corporate" => Ok(InvestorType::Corporate),
            "family_office" => Ok(InvestorType::FamilyOffice),
            "accelerator" => Ok(InvestorType::Accelerator),
            "other" => Ok(InvestorType::Other),
            other => Err(Error::conversion(format!(
                "unknown investor type: {}",
                other
            ))),
        }
    }
}

/// A logged investment with its derived fields persisted alongside the
/// entered ones. `amount`, `equity_allocated` and `post_money_valuation` are
/// computed at entry time from `shares` and `price_per_share`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRecord {
    pub id: String,
    pub startup_id: String,
    pub date: NaiveDate,
    pub investor_name: String,
    pub investor_code: Option<String>,
    pub investor_type: InvestorType,
    pub round_type: InvestmentRoundType,
    pub amount: Decimal,
    pub shares: i64,
    pub price_per_share: Decimal,
    pub equity_allocated: Decimal,
    pub pre_money_valuation: Option<Decimal>,
    pub post_money_valuation: Decimal,
    pub proof_document: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Form input for logging an investment. Required fields are optional here so
/// that validation can report which one is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestment {
    pub date: Option<NaiveDate>,
    pub investor_name: String,
    pub investor_code: Option<String>,
    pub investor_type: Option<InvestorType>,
    pub round_type: Option<InvestmentRoundType>,
    pub shares: i64,
    pub price_per_share: Decimal,
    pub pre_money_valuation: Option<Decimal>,
    pub proof_document: Option<String>,
}
