use rust_decimal::Decimal;
use tracing::debug;

use super::domain::{
    AdjustmentKind, ConditionTier, ConfidenceTier, InvalidInput, PropertyDescription,
    StructureCategory, ValuationBreakdown, ValuationResult, ValueAdjustment, ValueRange,
};
use super::pricing::AreaPricingTable;
use crate::workflows::money::{percent_of, to_cents};

/// Half-width of the value range, in basis points of the estimate.
const VALUE_BAND_BPS: i64 = 800;
const BEDROOM_STEP: i64 = 10_000;
const HALF_BATH_STEP: i64 = 3_750;

/// Stateless estimator applying the area price table and attribute adjustments.
#[derive(Debug, Clone, Default)]
pub struct ValuationEngine {
    pricing: AreaPricingTable,
}

impl ValuationEngine {
    pub fn new(pricing: AreaPricingTable) -> Self {
        Self { pricing }
    }

    pub fn pricing(&self) -> &AreaPricingTable {
        &self.pricing
    }

    pub fn estimate(
        &self,
        description: &PropertyDescription,
    ) -> Result<ValuationResult, InvalidInput> {
        description.validate_attributes()?;

        let lookup = self.pricing.lookup(&description.postal_code);
        let price_per_sqft = lookup.price_per_sqft();
        let area_data_found = lookup.area_data_found();
        let base_value = to_cents(Decimal::from(description.living_area_sqft) * price_per_sqft);

        let adjustments = vec![
            structure_adjustment(description.structure, base_value),
            condition_adjustment(description.condition, base_value),
            bedroom_adjustment(description.structure, description.bedrooms),
            bathroom_adjustment(description.structure, description.half_baths()),
        ];

        let breakdown = ValuationBreakdown {
            price_per_sqft,
            base_value,
            adjustments,
        };
        let estimated_value = (base_value + breakdown.adjustment_total()).max(Decimal::ZERO);

        let (min_area, max_area) = description.structure.typical_area();
        let typical_size = (min_area..=max_area).contains(&description.living_area_sqft);
        let confidence = match (area_data_found, typical_size) {
            (true, true) => ConfidenceTier::High,
            (true, false) | (false, true) => ConfidenceTier::Medium,
            (false, false) => ConfidenceTier::Low,
        };

        debug!(
            postal_code = %description.postal_code,
            area_data_found,
            %estimated_value,
            confidence = confidence.label(),
            "property valuation estimated"
        );

        Ok(ValuationResult {
            estimated_value,
            confidence,
            range: value_range(estimated_value),
            breakdown,
            area_data_found,
        })
    }
}

/// Estimates with the built-in price table.
pub fn estimate(description: &PropertyDescription) -> Result<ValuationResult, InvalidInput> {
    ValuationEngine::default().estimate(description)
}

fn value_range(estimate: Decimal) -> ValueRange {
    let band = percent_of(estimate, VALUE_BAND_BPS);
    ValueRange {
        low: estimate - band,
        mid: estimate,
        high: estimate + band,
    }
}

fn structure_adjustment(structure: StructureCategory, base_value: Decimal) -> ValueAdjustment {
    let bps = structure.adjustment_bps();
    ValueAdjustment {
        kind: AdjustmentKind::Structure,
        label: AdjustmentKind::Structure.label(),
        amount: percent_of(base_value, bps),
        note: format!("{} ({})", structure.label(), signed_percent(bps)),
    }
}

fn condition_adjustment(condition: ConditionTier, base_value: Decimal) -> ValueAdjustment {
    let bps = condition.adjustment_bps();
    ValueAdjustment {
        kind: AdjustmentKind::Condition,
        label: AdjustmentKind::Condition.label(),
        amount: percent_of(base_value, bps),
        note: format!("{} condition ({})", condition.label(), signed_percent(bps)),
    }
}

fn bedroom_adjustment(structure: StructureCategory, bedrooms: u8) -> ValueAdjustment {
    let baseline = structure.baseline_bedrooms();
    let deviation = i64::from(bedrooms) - i64::from(baseline);
    ValueAdjustment {
        kind: AdjustmentKind::Bedrooms,
        label: AdjustmentKind::Bedrooms.label(),
        amount: Decimal::from(deviation * BEDROOM_STEP),
        note: format!("{bedrooms} vs. {baseline} typical"),
    }
}

fn bathroom_adjustment(structure: StructureCategory, half_baths: u32) -> ValueAdjustment {
    let baseline = structure.baseline_half_baths();
    let deviation = i64::from(half_baths) - i64::from(baseline);
    ValueAdjustment {
        kind: AdjustmentKind::Bathrooms,
        label: AdjustmentKind::Bathrooms.label(),
        amount: Decimal::from(deviation * HALF_BATH_STEP),
        note: format!(
            "{} vs. {} typical",
            half_bath_label(half_baths),
            half_bath_label(baseline)
        ),
    }
}

fn half_bath_label(half_baths: u32) -> String {
    if half_baths % 2 == 0 {
        format!("{}", half_baths / 2)
    } else {
        format!("{}.5", half_baths / 2)
    }
}

fn signed_percent(bps: i64) -> String {
    let whole = bps / 100;
    if bps > 0 {
        format!("+{whole}%")
    } else {
        format!("{whole}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn description() -> PropertyDescription {
        PropertyDescription {
            postal_code: "75201".to_string(),
            structure: StructureCategory::DetachedHouse,
            living_area_sqft: 2_000,
            bedrooms: 3,
            bathrooms: 2.0,
            condition: ConditionTier::Good,
            loan_balance: None,
        }
    }

    #[test]
    fn baseline_home_has_no_adjustments() {
        let result = estimate(&description()).expect("valid description");
        assert_eq!(result.breakdown.base_value, Decimal::from(620_000));
        assert_eq!(result.breakdown.adjustment_total(), Decimal::ZERO);
        assert_eq!(result.estimated_value, Decimal::from(620_000));
        assert_eq!(result.confidence, ConfidenceTier::High);
        assert!(result.area_data_found);
    }

    #[test]
    fn ceiling_price_on_huge_area_stays_in_range() {
        let csv = format!(
            "postal_code,price_per_sqft\n75201,{}\n",
            crate::workflows::valuation::pricing::MAX_PRICE_PER_SQFT
        );
        let table = AreaPricingTable::from_reader(std::io::Cursor::new(csv)).expect("import");
        let mut property = description();
        property.living_area_sqft = u32::MAX;

        let result = ValuationEngine::new(table)
            .estimate(&property)
            .expect("estimate succeeds");
        assert_eq!(
            result.breakdown.base_value,
            Decimal::from(u32::MAX) * Decimal::from(100_000)
        );
        assert!(result.range.high > result.estimated_value);
    }

    #[test]
    fn half_bath_labels_render_fractions() {
        assert_eq!(half_bath_label(3), "1.5");
        assert_eq!(half_bath_label(4), "2");
    }

    #[test]
    fn signed_percent_marks_premiums() {
        assert_eq!(signed_percent(800), "+8%");
        assert_eq!(signed_percent(-1_000), "-10%");
        assert_eq!(signed_percent(0), "0%");
    }

    #[test]
    fn range_brackets_estimate_by_eight_percent() {
        let range = value_range(Decimal::from(500_000));
        assert_eq!(range.low, Decimal::from(460_000));
        assert_eq!(range.mid, Decimal::from(500_000));
        assert_eq!(range.high, Decimal::from(540_000));
    }
}
