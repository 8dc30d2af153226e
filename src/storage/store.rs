use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{Percent, Voucher};

/// Persistence contract the voucher service depends on.
///
/// Implementations own any atomicity guarantees: the service performs a
/// lookup followed by at most one write and does no locking of its own.
#[async_trait]
pub trait VoucherStore: Send + Sync {
    /// Looks up a voucher by code. A missing voucher is `Ok(None)`, not an error.
    async fn get_voucher_by_code(&self, code: &str) -> Result<Option<Voucher>>;

    /// Inserts a new, unused voucher and returns it.
    ///
    /// Fails if the store rejects the record (duplicate code, out-of-range discount).
    async fn create_voucher(&self, code: &str, discount: Percent) -> Result<Voucher>;

    /// Marks the voucher as used and returns the updated record.
    async fn use_voucher(&self, code: &str) -> Result<Voucher>;
}
