// Application layer - voucher use cases.
// Business rules live here; storage is reached only through `VoucherStore`.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
