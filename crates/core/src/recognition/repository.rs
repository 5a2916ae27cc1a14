use crate::equity::LedgerTotals;
use crate::errors::Result;

use super::model::RecognitionRecord;

/// Storage port for recognition rows. Writes carry recomputed totals so the
/// backend persists the row and the derived startup totals atomically.
pub trait RecognitionRepositoryTrait: Send + Sync {
    fn list(&self, startup_id: &str) -> Result<Vec<RecognitionRecord>>;

    fn get(&self, startup_id: &str, record_id: &str) -> Result<RecognitionRecord>;

    fn insert(&self, record: &RecognitionRecord, totals: &LedgerTotals)
        -> Result<RecognitionRecord>;

    fn delete(&self, startup_id: &str, record_id: &str, totals: &LedgerTotals) -> Result<()>;
}
