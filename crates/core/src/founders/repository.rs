use crate::equity::LedgerTotals;
use crate::errors::Result;

use super::model::Founder;

/// Storage port for founder rows. Implemented by the SQLite backend.
pub trait FounderRepositoryTrait: Send + Sync {
    fn list(&self, startup_id: &str) -> Result<Vec<Founder>>;

    /// Saving the founder list is a full replacement: delete every founder
    /// row for the startup and reinsert, together with the recomputed ledger
    /// totals, in one transaction.
    fn replace_all(
        &self,
        startup_id: &str,
        founders: &[Founder],
        totals: &LedgerTotals,
    ) -> Result<Vec<Founder>>;
}
