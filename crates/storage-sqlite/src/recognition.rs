//! Recognition record storage.

use diesel::prelude::*;

use trackmystartup_core::equity::LedgerTotals;
use trackmystartup_core::errors::{Error, Result};
use trackmystartup_core::recognition::{FeeType, RecognitionRecord, RecognitionRepositoryTrait};

use crate::db::DbPool;
use crate::schema::recognition_records;
use crate::startups::update_ledger_totals;
use crate::text::{encode_decimal, encode_timestamp, parse_opt_decimal, parse_timestamp};
use crate::{run_in_transaction, storage_err};

#[derive(Queryable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = recognition_records)]
pub struct RecognitionRecordDB {
    pub id: String,
    pub startup_id: String,
    pub program_name: String,
    pub facilitator_name: String,
    pub facilitator_code: Option<String>,
    pub fee_type: String,
    pub shares: Option<i64>,
    pub price_per_share: Option<String>,
    pub investment_amount: Option<String>,
    pub equity_allocated: Option<String>,
    pub agreement_document: Option<String>,
    pub created_at: String,
}

impl RecognitionRecordDB {
    fn from_domain(record: &RecognitionRecord) -> Self {
        Self {
            id: record.id.clone(),
            startup_id: record.startup_id.clone(),
            program_name: record.program_name.clone(),
            facilitator_name: record.facilitator_name.clone(),
            facilitator_code: record.facilitator_code.clone(),
            fee_type: record.fee_type.as_str().to_string(),
            shares: record.shares,
            price_per_share: record.price_per_share.map(encode_decimal),
            investment_amount: record.investment_amount.map(encode_decimal),
            equity_allocated: record.equity_allocated.map(encode_decimal),
            agreement_document: record.agreement_document.clone(),
            created_at: encode_timestamp(record.created_at),
        }
    }

    fn into_domain(self) -> Result<RecognitionRecord> {
        Ok(RecognitionRecord {
            fee_type: FeeType::parse(&self.fee_type)?,
            price_per_share: parse_opt_decimal("price_per_share", self.price_per_share.as_deref())?,
            investment_amount: parse_opt_decimal(
                "investment_amount",
                self.investment_amount.as_deref(),
            )?,
            equity_allocated: parse_opt_decimal(
                "equity_allocated",
                self.equity_allocated.as_deref(),
            )?,
            created_at: parse_timestamp("created_at", &self.created_at)?,
            id: self.id,
            startup_id: self.startup_id,
            program_name: self.program_name,
            facilitator_name: self.facilitator_name,
            facilitator_code: self.facilitator_code,
            shares: self.shares,
            agreement_document: self.agreement_document,
        })
    }
}

pub struct RecognitionRepository {
    pool: DbPool,
}

impl RecognitionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl RecognitionRepositoryTrait for RecognitionRepository {
    fn list(&self, startup_id: &str) -> Result<Vec<RecognitionRecord>> {
        let mut conn = self.pool.get().map_err(storage_err)?;
        recognition_records::table
            .filter(recognition_records::startup_id.eq(startup_id))
            .order(recognition_records::created_at.asc())
            .load::<RecognitionRecordDB>(&mut conn)
            .map_err(storage_err)?
            .into_iter()
            .map(RecognitionRecordDB::into_domain)
            .collect()
    }

    fn get(&self, startup_id: &str, record_id: &str) -> Result<RecognitionRecord> {
        let mut conn = self.pool.get().map_err(storage_err)?;
        recognition_records::table
            .filter(recognition_records::startup_id.eq(startup_id))
            .filter(recognition_records::id.eq(record_id))
            .first::<RecognitionRecordDB>(&mut conn)
            .optional()
            .map_err(storage_err)?
            .ok_or_else(|| Error::NotFound(format!("recognition record {}", record_id)))?
            .into_domain()
    }

    fn insert(
        &self,
        record: &RecognitionRecord,
        totals: &LedgerTotals,
    ) -> Result<RecognitionRecord> {
        let mut conn = self.pool.get().map_err(storage_err)?;
        let row = RecognitionRecordDB::from_domain(record);
        run_in_transaction(&mut conn, |conn| {
            diesel::insert_into(recognition_records::table)
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
                recognition_records::table
                    .filter(recognition_records::startup_id.eq(startup_id))
                    .filter(recognition_records::id.eq(record_id)),
            )
            .execute(conn)
            .map_err(storage_err)?;
            if deleted == 0 {
                return Err(Error::NotFound(format!("recognition record {}", record_id)));
            }
            update_ledger_totals(conn, startup_id, totals)
        })
    }
}
