use crate::equity::LedgerTotals;
use crate::errors::Result;

use super::model::InvestmentRecord;

/// Storage port for investment rows.
///
/// Writes carry the recomputed [`LedgerTotals`] so the backend can persist the
/// record and the derived startup totals in a single transaction. The old
/// incremental add/subtract side effects could drift when one step failed;
/// totals are now always recomputed from the rows and written atomically.
pub trait InvestmentRepositoryTrait: Send + Sync {
    /// Rows for a startup ordered by date then creation time.
    fn list(&self, startup_id: &str) -> Result<Vec<InvestmentRecord>>;

    fn get(&self, startup_id: &str, record_id: &str) -> Result<InvestmentRecord>;

    fn insert(&self, record: &InvestmentRecord, totals: &LedgerTotals) -> Result<InvestmentRecord>;

    fn delete(&self, startup_id: &str, record_id: &str, totals: &LedgerTotals) -> Result<()>;
}
