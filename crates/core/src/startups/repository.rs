use crate::equity::LedgerTotals;
use crate::errors::Result;

use super::model::{Startup, StartupShares};

/// Storage port for the startup aggregate and its shares singleton.
pub trait StartupRepositoryTrait: Send + Sync {
    fn get(&self, startup_id: &str) -> Result<Startup>;

    fn insert(&self, startup: &Startup) -> Result<Startup>;

    fn get_shares(&self, startup_id: &str) -> Result<Option<StartupShares>>;

    /// Rewrite the startup's derived totals and upsert the shares row in one
    /// transaction. Used by the manual recalculation path and by ESOP edits.
    fn update_totals(&self, startup_id: &str, totals: &LedgerTotals) -> Result<()>;
}
