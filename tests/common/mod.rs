// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use tempfile::TempDir;
use vouchers::application::VoucherService;
use vouchers::storage::SqliteVoucherStore;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(VoucherService<SqliteVoucherStore>, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = VoucherService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Test fixture: a few vouchers covering the discount range
pub struct StandardVouchers;

impl StandardVouchers {
    pub async fn create(service: &VoucherService<SqliteVoucherStore>) -> Result<()> {
        service.create_voucher("SAVE10", 10).await?;
        service.create_voucher("SAVE50", 50).await?;
        service.create_voucher("FREE", 100).await?;
        Ok(())
    }
}
