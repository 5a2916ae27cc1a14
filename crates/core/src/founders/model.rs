use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A founder row as persisted. `shares` is optional because founders created
/// before share allocation carry no count yet; `equity_percentage` is a stored
/// fallback used only while total shares are unknown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Founder {
    pub id: String,
    pub startup_id: String,
    pub name: String,
    pub email: String,
    pub shares: Option<i64>,
    pub equity_percentage: Option<Decimal>,
}

/// Form input for one founder when the founder list is saved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewFounder {
    pub name: String,
    pub email: String,
    pub shares: Option<i64>,
    pub equity_percentage: Option<Decimal>,
}
