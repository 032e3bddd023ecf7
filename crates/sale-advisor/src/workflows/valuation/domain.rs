use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureCategory {
    DetachedHouse,
    Condominium,
    Townhouse,
    MultiUnit,
}

impl StructureCategory {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::DetachedHouse,
            Self::Condominium,
            Self::Townhouse,
            Self::MultiUnit,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DetachedHouse => "Single-Family Home",
            Self::Condominium => "Condominium",
            Self::Townhouse => "Townhouse",
            Self::MultiUnit => "Multi-Family",
        }
    }

    /// Signed share of base value, in basis points.
    pub(crate) const fn adjustment_bps(self) -> i64 {
        match self {
            Self::DetachedHouse => 0,
            Self::Condominium => -1_000,
            Self::Townhouse => -500,
            Self::MultiUnit => 800,
        }
    }

    pub(crate) const fn baseline_bedrooms(self) -> u8 {
        match self {
            Self::DetachedHouse => 3,
            Self::Condominium => 2,
            Self::Townhouse => 3,
            Self::MultiUnit => 4,
        }
    }

    pub(crate) const fn baseline_half_baths(self) -> u32 {
        match self {
            Self::DetachedHouse => 4,
            Self::Condominium => 3,
            Self::Townhouse => 5,
            Self::MultiUnit => 6,
        }
    }

    /// Inclusive living-area range, in square feet, that the price table models well.
    pub(crate) const fn typical_area(self) -> (u32, u32) {
        match self {
            Self::DetachedHouse => (1_000, 4_500),
            Self::Condominium => (450, 2_200),
            Self::Townhouse => (900, 3_000),
            Self::MultiUnit => (1_600, 7_000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ConditionTier {
    pub const fn ordered() -> [Self; 4] {
        [Self::Excellent, Self::Good, Self::Fair, Self::Poor]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }

    pub(crate) const fn adjustment_bps(self) -> i64 {
        match self {
            Self::Excellent => 1_000,
            Self::Good => 0,
            Self::Fair => -800,
            Self::Poor => -2_000,
        }
    }
}

/// Attributes submitted by the lead-capture front end for a single property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescription {
    pub postal_code: String,
    pub structure: StructureCategory,
    pub living_area_sqft: u32,
    pub bedrooms: u8,
    pub bathrooms: f32,
    pub condition: ConditionTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_balance: Option<Decimal>,
}

impl PropertyDescription {
    pub fn validate_attributes(&self) -> Result<(), InvalidInput> {
        if self.living_area_sqft == 0 {
            return Err(InvalidInput::NonPositiveArea);
        }
        if self.bedrooms == 0 {
            return Err(InvalidInput::NonPositiveBedrooms);
        }
        if !self.bathrooms.is_finite() || self.bathrooms <= 0.0 {
            return Err(InvalidInput::NonPositiveBathrooms(self.bathrooms));
        }
        if (self.bathrooms * 2.0).fract() != 0.0 {
            return Err(InvalidInput::FractionalBathrooms(self.bathrooms));
        }
        Ok(())
    }

    pub(crate) fn half_baths(&self) -> u32 {
        (self.bathrooms * 2.0).round() as u32
    }
}

/// Rejections surfaced synchronously to the requester.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    #[error("living area must be greater than zero")]
    NonPositiveArea,
    #[error("bedroom count must be greater than zero")]
    NonPositiveBedrooms,
    #[error("bathroom count must be greater than zero (received {0})")]
    NonPositiveBathrooms(f32),
    #[error("bathroom count must be a multiple of 0.5 (received {0})")]
    FractionalBathrooms(f32),
    #[error("property value must be greater than zero (received {0})")]
    NonPositivePropertyValue(Decimal),
    #[error("loan balance cannot be negative (received {0})")]
    NegativeLoanBalance(Decimal),
    #[error("estimated value came out at $0 after adjustments; the property is too small to price")]
    ZeroEstimate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValueRange {
    pub low: Decimal,
    pub mid: Decimal,
    pub high: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    Structure,
    Condition,
    Bedrooms,
    Bathrooms,
}

impl AdjustmentKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Structure => "Property type",
            Self::Condition => "Condition",
            Self::Bedrooms => "Bedrooms",
            Self::Bathrooms => "Bathrooms",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueAdjustment {
    pub kind: AdjustmentKind,
    pub label: &'static str,
    pub amount: Decimal,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValuationBreakdown {
    pub price_per_sqft: Decimal,
    pub base_value: Decimal,
    pub adjustments: Vec<ValueAdjustment>,
}

impl ValuationBreakdown {
    pub fn adjustment_total(&self) -> Decimal {
        self.adjustments.iter().map(|adjustment| adjustment.amount).sum()
    }

    pub fn adjustment(&self, kind: AdjustmentKind) -> Option<&ValueAdjustment> {
        self.adjustments
            .iter()
            .find(|adjustment| adjustment.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValuationResult {
    pub estimated_value: Decimal,
    pub confidence: ConfidenceTier,
    pub range: ValueRange,
    pub breakdown: ValuationBreakdown,
    pub area_data_found: bool,
}
