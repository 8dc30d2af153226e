use crate::domain::{Percent, VoucherApplyResult, is_valid_discount};
use crate::storage::{SqliteVoucherStore, VoucherStore};

use super::VoucherError;

/// Minimum order amount for a voucher to be applicable.
pub const MIN_VALUE_FOR_DISCOUNT: f64 = 100.0;

/// Application service for issuing and redeeming vouchers.
/// Holds no state of its own beyond the injected store.
pub struct VoucherService<S> {
    store: S,
}

impl VoucherService<SqliteVoucherStore> {
    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, VoucherError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let store = SqliteVoucherStore::init(&db_url).await?;
        Ok(Self::new(store))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, VoucherError> {
        let db_url = format!("sqlite:{}", database_path);
        let store = SqliteVoucherStore::connect(&db_url).await?;
        Ok(Self::new(store))
    }
}

impl<S: VoucherStore> VoucherService<S> {
    /// Create a new voucher service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Issue a new voucher with a percentage discount.
    pub async fn create_voucher(&self, code: &str, discount: Percent) -> Result<(), VoucherError> {
        if !is_valid_discount(discount) {
            tracing::warn!(code, discount, "rejected voucher with invalid discount");
            return Err(VoucherError::invalid_argument("Discount value is invalid."));
        }

        if self.store.get_voucher_by_code(code).await?.is_some() {
            tracing::warn!(code, "rejected duplicate voucher");
            return Err(VoucherError::conflict("Voucher already exist."));
        }

        self.store.create_voucher(code, discount).await?;
        tracing::info!(code, discount, "voucher created");
        Ok(())
    }

    /// Redeem a voucher against an amount.
    ///
    /// Checks run in a fixed order: existence, then amount eligibility, then
    /// whether the voucher was already used. The first failing check decides
    /// the error. Nothing is written until all three pass.
    pub async fn apply_voucher(
        &self,
        code: &str,
        amount: f64,
    ) -> Result<VoucherApplyResult, VoucherError> {
        let voucher = self.store.get_voucher_by_code(code).await?.ok_or_else(|| {
            tracing::warn!(code, "voucher not found");
            VoucherError::conflict("Voucher does not exist.")
        })?;

        if !is_amount_valid_for_discount(amount) {
            tracing::warn!(code, amount, "amount below discount threshold");
            return Err(VoucherError::invalid_argument("Amount value is invalid."));
        }

        if voucher.used {
            tracing::warn!(code, "voucher already used");
            return Err(VoucherError::conflict("Voucher was already used."));
        }

        self.store.use_voucher(code).await?;
        let final_amount = apply_discount(amount, voucher.discount);
        tracing::info!(code, amount, final_amount, "voucher applied");

        Ok(VoucherApplyResult::new(amount, voucher.discount, final_amount))
    }
}

fn is_amount_valid_for_discount(amount: f64) -> bool {
    amount >= MIN_VALUE_FOR_DISCOUNT
}

fn apply_discount(value: f64, discount: Percent) -> f64 {
    value - value * (f64::from(discount) / 100.0)
}
