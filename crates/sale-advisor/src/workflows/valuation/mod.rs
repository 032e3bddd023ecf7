//! Market value estimation from basic property attributes.
//!
//! The estimate is a per-area price-per-square-foot base value plus four signed
//! adjustments (structure, condition, bedrooms, bathrooms), floored at zero.

pub mod domain;
mod engine;
pub mod pricing;

pub use domain::{
    AdjustmentKind, ConditionTier, ConfidenceTier, InvalidInput, PropertyDescription,
    StructureCategory, ValuationBreakdown, ValuationResult, ValueAdjustment, ValueRange,
};
pub use engine::{estimate, ValuationEngine};
pub use pricing::{AreaPricingTable, PriceLookup, PricingImportError};
