use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Percent, Voucher, VoucherId, is_valid_discount};

use super::VoucherStore;

#[derive(Default)]
struct Inner {
    vouchers: HashMap<String, Voucher>,
    last_id: VoucherId,
}

/// In-memory voucher store.
///
/// Mirrors the constraints of the SQLite schema (unique code, discount range)
/// so it can stand in for it in tests. Clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryVoucherStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryVoucherStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored vouchers.
    pub async fn len(&self) -> usize {
        self.inner.read().await.vouchers.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl VoucherStore for InMemoryVoucherStore {
    async fn get_voucher_by_code(&self, code: &str) -> Result<Option<Voucher>> {
        Ok(self.inner.read().await.vouchers.get(code).cloned())
    }

    async fn create_voucher(&self, code: &str, discount: Percent) -> Result<Voucher> {
        if !is_valid_discount(discount) {
            anyhow::bail!("CHECK constraint failed: discount {}", discount);
        }

        let mut inner = self.inner.write().await;
        if inner.vouchers.contains_key(code) {
            anyhow::bail!("UNIQUE constraint failed: vouchers.code ({})", code);
        }

        inner.last_id += 1;
        let voucher = Voucher::new(inner.last_id, code, discount);
        inner.vouchers.insert(code.to_string(), voucher.clone());
        Ok(voucher)
    }

    async fn use_voucher(&self, code: &str) -> Result<Voucher> {
        let mut inner = self.inner.write().await;
        let voucher = inner
            .vouchers
            .get_mut(code)
            .ok_or_else(|| anyhow::anyhow!("Voucher not found: {}", code))?;
        voucher.used = true;
        Ok(voucher.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_code_is_none() {
        let store = InMemoryVoucherStore::new();
        assert!(store.get_voucher_by_code("NOPE").await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = InMemoryVoucherStore::new();
        let a = store.create_voucher("A", 10).await.unwrap();
        let b = store.create_voucher("B", 20).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(!a.used);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_duplicate_code_is_rejected() {
        let store = InMemoryVoucherStore::new();
        store.create_voucher("DUP", 10).await.unwrap();
        assert!(store.create_voucher("DUP", 30).await.is_err());

        let kept = store.get_voucher_by_code("DUP").await.unwrap().unwrap();
        assert_eq!(kept.discount, 10);
    }

    #[tokio::test]
    async fn test_out_of_range_discount_is_rejected() {
        let store = InMemoryVoucherStore::new();
        assert!(store.create_voucher("BAD", 0).await.is_err());
        assert!(store.create_voucher("BAD", 101).await.is_err());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_use_voucher_sets_flag() {
        let store = InMemoryVoucherStore::new();
        store.create_voucher("ONCE", 25).await.unwrap();

        let updated = store.use_voucher("ONCE").await.unwrap();
        assert!(updated.used);
        assert!(store.get_voucher_by_code("ONCE").await.unwrap().unwrap().used);
    }

    #[tokio::test]
    async fn test_use_unknown_voucher_fails() {
        let store = InMemoryVoucherStore::new();
        assert!(store.use_voucher("GHOST").await.is_err());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryVoucherStore::new();
        let handle = store.clone();
        store.create_voucher("SHARED", 5).await.unwrap();
        assert!(handle.get_voucher_by_code("SHARED").await.unwrap().is_some());
    }
}
