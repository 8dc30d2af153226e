mod voucher;

pub use voucher::*;
