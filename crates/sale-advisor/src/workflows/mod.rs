pub mod disposition;
pub mod money;
pub mod valuation;
