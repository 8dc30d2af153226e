use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::domain::{Percent, Voucher};

use super::{MIGRATION_001_VOUCHERS, VoucherStore};

/// SQLite-backed voucher store.
///
/// Uniqueness of `code` and the discount range are enforced by the schema,
/// so concurrent inserts of the same code cannot both succeed.
#[derive(Clone)]
pub struct SqliteVoucherStore {
    pool: SqlitePool,
}

impl SqliteVoucherStore {
    /// Create a new store with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_VOUCHERS)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let store = Self::connect(database_url).await?;
        store.migrate().await?;
        Ok(store)
    }

    fn row_to_voucher(row: &sqlx::sqlite::SqliteRow) -> Result<Voucher> {
        Ok(Voucher {
            id: row.try_get("id").context("Invalid voucher id")?,
            code: row.try_get("code").context("Invalid voucher code")?,
            discount: row.try_get("discount").context("Invalid voucher discount")?,
            used: row.try_get::<i32, _>("used").context("Invalid used flag")? != 0,
        })
    }

    async fn fetch_existing(&self, code: &str) -> Result<Voucher> {
        self.get_voucher_by_code(code)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Voucher {} vanished after write", code))
    }
}

#[async_trait]
impl VoucherStore for SqliteVoucherStore {
    async fn get_voucher_by_code(&self, code: &str) -> Result<Option<Voucher>> {
        let row = sqlx::query("SELECT id, code, discount, used FROM vouchers WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch voucher by code")?;

        row.as_ref().map(Self::row_to_voucher).transpose()
    }

    async fn create_voucher(&self, code: &str, discount: Percent) -> Result<Voucher> {
        sqlx::query("INSERT INTO vouchers (code, discount, used) VALUES (?, ?, 0)")
            .bind(code)
            .bind(discount)
            .execute(&self.pool)
            .await
            .context("Failed to save voucher")?;

        tracing::debug!(code, discount, "voucher row inserted");
        self.fetch_existing(code).await
    }

    async fn use_voucher(&self, code: &str) -> Result<Voucher> {
        let result = sqlx::query("UPDATE vouchers SET used = 1 WHERE code = ?")
            .bind(code)
            .execute(&self.pool)
            .await
            .context("Failed to mark voucher as used")?;

        if result.rows_affected() == 0 {
            anyhow::bail!("Voucher not found: {}", code);
        }

        tracing::debug!(code, "voucher row marked used");
        self.fetch_existing(code).await
    }
}
