//! Startup aggregate and shares-singleton storage.

use diesel::prelude::*;

use trackmystartup_core::equity::LedgerTotals;
use trackmystartup_core::errors::{Error, Result};
use trackmystartup_core::startups::{
    ComplianceStatus, Startup, StartupRepositoryTrait, StartupShares,
};

use crate::db::DbPool;
use crate::schema::{startup_shares, startups};
use crate::text::{
    encode_decimal, encode_timestamp, parse_decimal, parse_timestamp,
};
use crate::{run_in_transaction, storage_err};

#[derive(Queryable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = startups)]
pub struct StartupDB {
    pub id: String,
    pub name: String,
    pub sector: Option<String>,
    pub current_valuation: String,
    pub total_funding: String,
    pub total_revenue: String,
    pub compliance_status: String,
    pub registered_at: String,
}

impl StartupDB {
    fn from_domain(startup: &Startup) -> Self {
        Self {
            id: startup.id.clone(),
            name: startup.name.clone(),
            sector: startup.sector.clone(),
            current_valuation: encode_decimal(startup.current_valuation),
            total_funding: encode_decimal(startup.total_funding),
            total_revenue: encode_decimal(startup.total_revenue),
            compliance_status: startup.compliance_status.as_str().to_string(),
            registered_at: encode_timestamp(startup.registered_at),
        }
    }

    fn into_domain(self) -> Result<Startup> {
        Ok(Startup {
            current_valuation: parse_decimal("current_valuation", &self.current_valuation)?,
            total_funding: parse_decimal("total_funding", &self.total_funding)?,
            total_revenue: parse_decimal("total_revenue", &self.total_revenue)?,
            compliance_status: ComplianceStatus::parse(&self.compliance_status)?,
            registered_at: parse_timestamp("registered_at", &self.registered_at)?,
            id: self.id,
            name: self.name,
            sector: self.sector,
        })
    }
}

#[derive(Queryable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = startup_shares)]
pub struct StartupSharesDB {
    pub startup_id: String,
    pub total_shares: i64,
    pub esop_reserved_shares: i64,
    pub price_per_share: String,
    pub updated_at: String,
}

impl StartupSharesDB {
    fn into_domain(self) -> Result<StartupShares> {
        Ok(StartupShares {
            price_per_share: parse_decimal("price_per_share", &self.price_per_share)?,
            updated_at: parse_timestamp("updated_at", &self.updated_at)?,
            startup_id: self.startup_id,
            total_shares: self.total_shares,
            esop_reserved_shares: self.esop_reserved_shares,
        })
    }
}

/// Persist recomputed totals: rewrite the startup's derived columns and
/// upsert the shares row. Callers run this inside the same transaction as
/// the write that changed the rows.
pub(crate) fn update_ledger_totals(
    conn: &mut diesel::SqliteConnection,
    startup_id: &str,
    totals: &LedgerTotals,
) -> Result<()> {
    let updated = diesel::update(startups::table.find(startup_id))
        .set((
            startups::total_funding.eq(encode_decimal(totals.total_funding)),
            startups::current_valuation.eq(encode_decimal(totals.current_valuation)),
        ))
        .execute(conn)
        .map_err(storage_err)?;
    if updated == 0 {
        return Err(Error::NotFound(format!("startup {}", startup_id)));
    }

    let row = StartupSharesDB {
        startup_id: startup_id.to_string(),
        total_shares: totals.total_shares,
        esop_reserved_shares: totals.esop_reserved_shares,
        price_per_share: encode_decimal(totals.price_per_share),
        updated_at: encode_timestamp(chrono::Utc::now()),
    };
    diesel::replace_into(startup_shares::table)
        .values(&row)
        .execute(conn)
        .map_err(storage_err)?;
    Ok(())
}

pub struct StartupRepository {
    pool: DbPool,
}

impl StartupRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl StartupRepositoryTrait for StartupRepository {
    fn get(&self, startup_id: &str) -> Result<Startup> {
        let mut conn = self.pool.get().map_err(storage_err)?;
        startups::table
            .find(startup_id)
            .first::<StartupDB>(&mut conn)
            .optional()
            .map_err(storage_err)?
            .ok_or_else(|| Error::NotFound(format!("startup {}", startup_id)))?
            .into_domain()
    }

    fn insert(&self, startup: &Startup) -> Result<Startup> {
        let mut conn = self.pool.get().map_err(storage_err)?;
        diesel::insert_into(startups::table)
            .values(&StartupDB::from_domain(startup))
            .execute(&mut conn)
            .map_err(storage_err)?;
        Ok(startup.clone())
    }

    fn get_shares(&self, startup_id: &str) -> Result<Option<StartupShares>> {
        let mut conn = self.pool.get().map_err(storage_err)?;
        startup_shares::table
            .find(startup_id)
            .first::<StartupSharesDB>(&mut conn)
            .optional()
            .map_err(storage_err)?
            .map(StartupSharesDB::into_domain)
            .transpose()
    }

    fn update_totals(&self, startup_id: &str, totals: &LedgerTotals) -> Result<()> {
        let mut conn = self.pool.get().map_err(storage_err)?;
        run_in_transaction(&mut conn, |conn| {
            update_ledger_totals(conn, startup_id, totals)
        })
    }
}
