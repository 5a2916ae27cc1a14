//! Founder row storage. Saving the founder list is a full replacement,
//! persisted with the recomputed totals in one transaction.

use diesel::prelude::*;

use trackmystartup_core::equity::LedgerTotals;
use trackmystartup_core::errors::Result;
use trackmystartup_core::founders::{Founder, FounderRepositoryTrait};

use crate::db::DbPool;
use crate::schema::founders;
use crate::startups::update_ledger_totals;
use crate::text::{encode_decimal, parse_opt_decimal};
use crate::{run_in_transaction, storage_err};

#[derive(Queryable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = founders)]
pub struct FounderDB {
    pub id: String,
    pub startup_id: String,
    pub name: String,
    pub email: String,
    pub shares: Option<i64>,
    pub equity_percentage: Option<String>,
}

impl FounderDB {
    fn from_domain(founder: &Founder) -> Self {
        Self {
            id: founder.id.clone(),
            startup_id: founder.startup_id.clone(),
            name: founder.name.clone(),
            email: founder.email.clone(),
            shares: founder.shares,
            equity_percentage: founder.equity_percentage.map(encode_decimal),
        }
    }

    fn into_domain(self) -> Result<Founder> {
        Ok(Founder {
            equity_percentage: parse_opt_decimal(
                "equity_percentage",
                self.equity_percentage.as_deref(),
            )?,
            id: self.id,
            startup_id: self.startup_id,
            name: self.name,
            email: self.email,
            shares: self.shares,
        })
    }
}

pub struct FounderRepository {
    pool: DbPool,
}

impl FounderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl FounderRepositoryTrait for FounderRepository {
    fn list(&self, startup_id: &str) -> Result<Vec<Founder>> {
        let mut conn = self.pool.get().map_err(storage_err)?;
        founders::table
            .filter(founders::startup_id.eq(startup_id))
            .order(founders::name.asc())
            .load::<FounderDB>(&mut conn)
            .map_err(storage_err)?
            .into_iter()
            .map(FounderDB::into_domain)
            .collect()
    }

    fn replace_all(
        &self,
        startup_id: &str,
        rows: &[Founder],
        totals: &LedgerTotals,
    ) -> Result<Vec<Founder>> {
        let mut conn = self.pool.get().map_err(storage_err)?;
        let db_rows: Vec<FounderDB> = rows.iter().map(FounderDB::from_domain).collect();
        run_in_transaction(&mut conn, |conn| {
            diesel::delete(founders::table.filter(founders::startup_id.eq(startup_id)))
                .execute(conn)
                .map_err(storage_err)?;
            diesel::insert_into(founders::table)
                .values(&db_rows)
                .execute(conn)
                .map_err(storage_err)?;
            update_ledger_totals(conn, startup_id, totals)
        })?;
        Ok(rows.to_vec())
    }
}
