mod memory;
mod repository;
mod store;

pub use memory::*;
pub use repository::*;
pub use store::*;

/// SQL migration for the vouchers table
pub const MIGRATION_001_VOUCHERS: &str = include_str!("migrations/001_vouchers.sql");
