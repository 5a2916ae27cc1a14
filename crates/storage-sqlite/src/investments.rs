//! Investment record storage. Every write persists the record together with
//! the recomputed ledger totals, atomically.

use diesel::prelude::*;

use trackmystartup_core::equity::LedgerTotals;
use trackmystartup_core::errors::{Error, Result};
use trackmystartup_core::investments::{
    InvestmentRecord, InvestmentRepositoryTrait, InvestmentRoundType, InvestorType,
};

use crate::db::DbPool;
use crate::schema::investment_records;
use crate::startups::update_ledger_totals;
use crate::text::{
    encode_date, encode_decimal, encode_timestamp, parse_date, parse_decimal, parse_opt_decimal,
    parse_timestamp,
};
use crate::{run_in_transaction, storage_err};

#[derive(Queryable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = investment_records)]
pub struct InvestmentRecordDB {
    pub id: String,
    pub startup_id: String,
    pub date: String,
    pub investor_name: String,
    pub investor_code: Option<String>,
    pub investor_type: String,
    pub round_type: String,
    pub amount: String,
    pub shares: i64,
    pub price_per_share: String,
    pub equity_allocated: String,
    pub pre_money_valuation: Option<String>,
    pub post_money_valuation: String,
    pub proof_document: Option<String>,
    pub created_at: String,
}

impl InvestmentRecordDB {
    fn from_domain(record: &InvestmentRecord) -> Self {
        Self {
            id: record.id.clone(),
            startup_id: record.startup_id.clone(),
            date: encode_date(record.date),
            investor_name: record.investor_name.clone(),
            investor_code: record.investor_code.clone(),
            investor_type: record.investor_type.as_str().to_string(),
            round_type: record.round_type.as_str().to_string(),
            amount: encode_decimal(record.amount),
            shares: record.shares,
            price_per_share: encode_decimal(record.price_per_share),
            equity_allocated: encode_decimal(record.equity_allocated),
            pre_money_valuation: record.pre_money_valuation.map(encode_decimal),
            post_money_valuation: encode_decimal(record.post_money_valuation),
            proof_document: record.proof_document.clone(),
            created_at: encode_timestamp(record.created_at),
        }
    }

    fn into_domain(self) -> Result<InvestmentRecord> {
        Ok(InvestmentRecord {
            date: parse_date("date", &self.date)?,
            investor_type: InvestorType::parse(&self.investor_type)?,
            round_type: InvestmentRoundType::parse(&self.round_type)?,
            amount: parse_decimal("amount", &self.amount)?,
            price_per_share: parse_decimal("price_per_share", &self.price_per_share)?,
            equity_allocated: parse_decimal("equity_allocated", &self.equity_allocated)?,
            pre_money_valuation: parse_opt_decimal(
                "pre_money_valuation",
                self.pre_money_valuation.as_deref(),
            )?,
            post_money_valuation: parse_decimal(
                "post_money_valuation",
                &self.post_money_valuation,
            )?,
            created_at: parse_timestamp("created_at", &self.created_at)?,
            id: self.id,
            startup_id: self.startup_id,
            investor_name: self.investor_name,
            investor_code: self.investor_code,
            shares: self.shares,
            proof_document: self.proof_document,
        })
    }
}

pub struct InvestmentRepository {
    pool: DbPool,
}

impl InvestmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl InvestmentRepositoryTrait for InvestmentRepository {
    fn list(&self, startup_id: &str) -> Result<Vec<InvestmentRecord>> {
        let mut conn = self.pool.get().map_err(storage_err)?;
        investment_records::table
            .filter(investment_records::startup_id.eq(startup_id))
            .order((
                investment_records::date.asc(),
                investment_records::created_at.asc(),
            ))
            .load::<InvestmentRecordDB>(&mut conn)
            .map_err(storage_err)?
            .into_iter()
            .map(InvestmentRecordDB::into_domain)
            .collect()
    }

    fn get(&self, startup_id: &str, record_id: &str) -> Result<InvestmentRecord> {
        let mut conn = self.pool.get().map_err(storage_err)?;
        investment_records::table
            .filter(investment_records::startup_id.eq(startup_id))
            .filter(investment_records::id.eq(record_id))
            .first::<InvestmentRecordDB>(&mut conn)
            .optional()
            .map_err(storage_err)?
            .ok_or_else(|| Error::NotFound(format!("investment record {}", record_id)))?
            .into_domain()
    }

    fn insert(&self, record: &InvestmentRecord, totals: &LedgerTotals) -> Result<InvestmentRecord> {
        let mut conn = self.pool.get().map_err(storage_err)?;
        let row = InvestmentRecordDB::from_domain(record);
        run_in_transaction(&mut conn, |conn| {
            diesel::insert_into(investment_records::table)
                .values(&row)
                .execute(conn)
                .map_err(storage_err)?;
            update_ledger_totals(conn, &record.startup_id, totals)
        })?;
        Ok(record.clone())
    }

    fn delete(&self, startup_id: &str, record_id: &str, totals: &LedgerTotals) -> Result<()> {
        let mut conn = self.pool.get().map_err(storage_err)?;
        run_in_transaction(&mut conn, |conn| {
            let deleted = diesel::delete(
                investment_records::table
                    .filter(investment_records::startup_id.eq(startup_id))
                    .filter(investment_records::id.eq(record_id)),
            )
            .execute(conn)
            .map_err(storage_err)?;
            if deleted == 0 {
                return Err(Error::NotFound(format!("investment record {}", record_id)));
            }
            update_ledger_totals(conn, startup_id, totals)
        })
    }
}
