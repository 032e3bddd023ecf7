use std::io::Cursor;

use rust_decimal::Decimal;
use sale_advisor::workflows::valuation::{
    estimate, AdjustmentKind, AreaPricingTable, ConditionTier, ConfidenceTier, InvalidInput,
    PricingImportError, PropertyDescription, StructureCategory, ValuationEngine,
};

fn property(
    postal_code: &str,
    structure: StructureCategory,
    living_area_sqft: u32,
    bedrooms: u8,
    bathrooms: f32,
    condition: ConditionTier,
) -> PropertyDescription {
    PropertyDescription {
        postal_code: postal_code.to_string(),
        structure,
        living_area_sqft,
        bedrooms,
        bathrooms,
        condition,
        loan_balance: None,
    }
}

fn dallas_baseline() -> PropertyDescription {
    property(
        "75201",
        StructureCategory::DetachedHouse,
        2_000,
        3,
        2.0,
        ConditionTier::Good,
    )
}

#[test]
fn estimate_is_pure_for_identical_input() {
    let description = property(
        "78704",
        StructureCategory::Townhouse,
        1_725,
        2,
        2.5,
        ConditionTier::Fair,
    );

    let first = estimate(&description).expect("valid description");
    let second = estimate(&description).expect("valid description");

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("serializes"),
        serde_json::to_string(&second).expect("serializes")
    );
}

#[test]
fn baseline_home_is_priced_from_area_table() {
    let result = estimate(&dallas_baseline()).expect("valid description");

    assert_eq!(result.breakdown.price_per_sqft, Decimal::from(310));
    assert_eq!(result.estimated_value, Decimal::from(620_000));
    assert_eq!(result.range.low, Decimal::from(570_400));
    assert_eq!(result.range.high, Decimal::from(669_600));
    assert_eq!(result.confidence, ConfidenceTier::High);
    assert_eq!(result.breakdown.adjustments.len(), 4);
}

#[test]
fn structure_condition_and_room_adjustments_combine() {
    let description = property(
        "76102",
        StructureCategory::MultiUnit,
        3_000,
        5,
        3.0,
        ConditionTier::Fair,
    );
    let result = estimate(&description).expect("valid description");
    let breakdown = &result.breakdown;

    assert_eq!(breakdown.base_value, Decimal::from(720_000));
    let amount = |kind| {
        breakdown
            .adjustment(kind)
            .map(|adjustment| adjustment.amount)
            .expect("adjustment present")
    };
    assert_eq!(amount(AdjustmentKind::Structure), Decimal::from(57_600));
    assert_eq!(amount(AdjustmentKind::Condition), Decimal::from(-57_600));
    assert_eq!(amount(AdjustmentKind::Bedrooms), Decimal::from(10_000));
    assert_eq!(amount(AdjustmentKind::Bathrooms), Decimal::ZERO);
    assert_eq!(result.estimated_value, Decimal::from(730_000));
}

#[test]
fn bathroom_deviation_is_priced_per_half_bath() {
    let description = property(
        "75201",
        StructureCategory::DetachedHouse,
        2_000,
        3,
        3.5,
        ConditionTier::Good,
    );
    let result = estimate(&description).expect("valid description");
    let bathrooms = result
        .breakdown
        .adjustment(AdjustmentKind::Bathrooms)
        .expect("bathroom adjustment");

    assert_eq!(bathrooms.amount, Decimal::from(11_250));
    assert_eq!(bathrooms.note, "3.5 vs. 2 typical");
}

#[test]
fn estimate_never_goes_negative() {
    let description = property(
        "75201",
        StructureCategory::Condominium,
        1,
        1,
        0.5,
        ConditionTier::Poor,
    );
    let result = estimate(&description).expect("valid description");

    assert!(result.breakdown.adjustment_total() < Decimal::ZERO);
    assert_eq!(result.estimated_value, Decimal::ZERO);
    assert_eq!(result.range.low, Decimal::ZERO);
    assert_eq!(result.range.high, Decimal::ZERO);
}

#[test]
fn unknown_area_falls_back_to_regional_price() {
    let typical = estimate(&property(
        "99999",
        StructureCategory::DetachedHouse,
        2_000,
        3,
        2.0,
        ConditionTier::Good,
    ))
    .expect("valid description");
    assert!(!typical.area_data_found);
    assert_eq!(typical.breakdown.price_per_sqft, Decimal::from(185));
    assert_eq!(typical.confidence, ConfidenceTier::Medium);

    let oversized = estimate(&property(
        "99999",
        StructureCategory::DetachedHouse,
        9_000,
        3,
        2.0,
        ConditionTier::Good,
    ))
    .expect("valid description");
    assert_eq!(oversized.confidence, ConfidenceTier::Low);
}

#[test]
fn zip_plus_four_matches_area_data() {
    let mut description = dallas_baseline();
    description.postal_code = " 75201-4410 ".to_string();
    let result = estimate(&description).expect("valid description");
    assert!(result.area_data_found);
    assert_eq!(result.estimated_value, Decimal::from(620_000));
}

#[test]
fn invalid_attributes_are_rejected() {
    let mut zero_area = dallas_baseline();
    zero_area.living_area_sqft = 0;
    assert_eq!(estimate(&zero_area), Err(InvalidInput::NonPositiveArea));

    let mut zero_bedrooms = dallas_baseline();
    zero_bedrooms.bedrooms = 0;
    assert_eq!(estimate(&zero_bedrooms), Err(InvalidInput::NonPositiveBedrooms));

    let mut zero_baths = dallas_baseline();
    zero_baths.bathrooms = 0.0;
    assert_eq!(
        estimate(&zero_baths),
        Err(InvalidInput::NonPositiveBathrooms(0.0))
    );

    let mut quarter_bath = dallas_baseline();
    quarter_bath.bathrooms = 2.25;
    assert_eq!(
        estimate(&quarter_bath),
        Err(InvalidInput::FractionalBathrooms(2.25))
    );
}

#[test]
fn imported_pricing_overrides_standard_table() {
    let csv = "postal_code,price_per_sqft\n99999, 200\n75201,325.50\n";
    let table = AreaPricingTable::from_reader(Cursor::new(csv)).expect("table imports");
    let engine = ValuationEngine::new(table);

    let mut description = dallas_baseline();
    let dallas = engine.estimate(&description).expect("valid description");
    assert_eq!(dallas.estimated_value, Decimal::from(651_000));

    description.postal_code = "99999".to_string();
    let imported = engine.estimate(&description).expect("valid description");
    assert!(imported.area_data_found);
    assert_eq!(imported.estimated_value, Decimal::from(400_000));

    description.postal_code = "78701".to_string();
    let untouched = engine.estimate(&description).expect("valid description");
    assert_eq!(untouched.breakdown.price_per_sqft, Decimal::from(455));
}

#[test]
fn pricing_import_rejects_bad_rows() {
    let negative = "postal_code,price_per_sqft\n75201,-5\n";
    assert!(matches!(
        AreaPricingTable::from_reader(Cursor::new(negative)),
        Err(PricingImportError::InvalidPrice { .. })
    ));

    let garbage = "postal_code,price_per_sqft\n75201,cheap\n";
    assert!(matches!(
        AreaPricingTable::from_reader(Cursor::new(garbage)),
        Err(PricingImportError::InvalidPrice { .. })
    ));

    let empty = "postal_code,price_per_sqft\n";
    assert!(matches!(
        AreaPricingTable::from_reader(Cursor::new(empty)),
        Err(PricingImportError::Empty)
    ));
}
