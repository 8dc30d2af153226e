use serde::{Deserialize, Serialize};

pub type VoucherId = i64;

/// Discount percentage, valid range 1..=100.
pub type Percent = i32;

/// Smallest accepted discount percentage.
pub const MIN_DISCOUNT: Percent = 1;

/// Largest accepted discount percentage.
pub const MAX_DISCOUNT: Percent = 100;

/// A persisted discount code.
///
/// `code` and `discount` never change after creation. `used` starts out
/// false and flips to true once, when the voucher is redeemed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: VoucherId,
    pub code: String,
    pub discount: Percent,
    pub used: bool,
}

impl Voucher {
    pub fn new(id: VoucherId, code: impl Into<String>, discount: Percent) -> Self {
        Self {
            id,
            code: code.into(),
            discount,
            used: false,
        }
    }

    pub fn is_used(&self) -> bool {
        self.used
    }
}

/// Returns true if `discount` is an acceptable voucher percentage.
pub fn is_valid_discount(discount: Percent) -> bool {
    (MIN_DISCOUNT..=MAX_DISCOUNT).contains(&discount)
}

/// Payload for creating a voucher, as received from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoucherCreateData {
    pub code: String,
    pub discount: Percent,
}

/// Payload for applying a voucher to an amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoucherApplyData {
    pub code: String,
    pub amount: f64,
}

/// Outcome of applying a voucher. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherApplyResult {
    pub amount: f64,
    pub discount: Percent,
    pub final_amount: f64,
    pub applied: bool,
}

impl VoucherApplyResult {
    pub fn new(amount: f64, discount: Percent, final_amount: f64) -> Self {
        Self {
            amount,
            discount,
            final_amount,
            applied: final_amount != amount,
        }
    }

    /// Amount taken off the original total.
    pub fn savings(&self) -> f64 {
        self.amount - self.final_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_voucher_is_unused() {
        let voucher = Voucher::new(1, "SAVE10", 10);
        assert!(!voucher.is_used());
        assert_eq!(voucher.code, "SAVE10");
        assert_eq!(voucher.discount, 10);
    }

    #[test]
    fn test_discount_bounds() {
        assert!(is_valid_discount(1));
        assert!(is_valid_discount(50));
        assert!(is_valid_discount(100));
        assert!(!is_valid_discount(0));
        assert!(!is_valid_discount(-5));
        assert!(!is_valid_discount(101));
    }

    #[test]
    fn test_apply_result_flags_applied_only_when_amount_changes() {
        let applied = VoucherApplyResult::new(120.0, 50, 60.0);
        assert!(applied.applied);
        assert_eq!(applied.savings(), 60.0);

        let untouched = VoucherApplyResult::new(120.0, 50, 120.0);
        assert!(!untouched.applied);
    }

    #[test]
    fn test_apply_result_serializes_camel_case() {
        let result = VoucherApplyResult::new(120.0, 50, 60.0);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["finalAmount"], 60.0);
        assert_eq!(json["applied"], true);
        assert!(json.get("final_amount").is_none());
    }

    #[test]
    fn test_apply_data_deserializes_from_json() {
        let data: VoucherApplyData =
            serde_json::from_str(r#"{"code":"SAVE50","amount":120}"#).unwrap();
        assert_eq!(data.code, "SAVE50");
        assert_eq!(data.amount, 120.0);
    }
}
