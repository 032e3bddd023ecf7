use crate::infra::{build_advisory_service, parse_amount, parse_condition, parse_structure};
use chrono::Utc;
use clap::Args;
use rust_decimal::Decimal;
use sale_advisor::config::AppConfig;
use sale_advisor::error::AppError;
use sale_advisor::workflows::disposition::{
    AdvisoryService, AnalysisRequest, ContactDetails, Evaluation, HttpMessagingGateway,
    ReportAssembler,
};
use sale_advisor::workflows::money::{
    format_currency, format_percentage, format_quantity, format_signed_currency,
};
use sale_advisor::workflows::valuation::{
    ConditionTier, PropertyDescription, StructureCategory, ValuationEngine,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Postal code of the property
    #[arg(long)]
    pub(crate) postal_code: String,
    /// Property type: detached_house, condominium, townhouse or multi_unit
    #[arg(long, value_parser = parse_structure)]
    pub(crate) structure: StructureCategory,
    /// Finished living area in square feet
    #[arg(long)]
    pub(crate) sqft: u32,
    #[arg(long)]
    pub(crate) bedrooms: u8,
    /// Bathroom count in half-bath steps, e.g. 2.5
    #[arg(long)]
    pub(crate) bathrooms: f32,
    /// Condition: excellent, good, fair or poor
    #[arg(long, value_parser = parse_condition, default_value = "good")]
    pub(crate) condition: ConditionTier,
    /// Outstanding mortgage payoff; equity is assumed to be 100% when omitted
    #[arg(long, value_parser = parse_amount)]
    pub(crate) loan_balance: Option<Decimal>,
    /// Write the PDF report to this path
    #[arg(long)]
    pub(crate) report_out: Option<PathBuf>,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let EstimateArgs {
        postal_code,
        structure,
        sqft,
        bedrooms,
        bathrooms,
        condition,
        loan_balance,
        report_out,
    } = args;

    let config = AppConfig::load()?;
    let service = build_advisory_service(&config)?;
    let property = PropertyDescription {
        postal_code,
        structure,
        living_area_sqft: sqft,
        bedrooms,
        bathrooms,
        condition,
        loan_balance,
    };

    let evaluation = service.evaluate(&property)?;
    render_evaluation(&property, &evaluation);

    if let Some(path) = report_out {
        let report = service.render(&property, &evaluation, Utc::now())?;
        std::fs::write(&path, &report.bytes)?;
        println!(
            "\nReport written to {} ({} pages)",
            path.display(),
            report.page_count
        );
    }

    Ok(())
}

pub(crate) async fn run_demo() -> Result<(), AppError> {
    let service = AdvisoryService::new(
        ValuationEngine::default(),
        ReportAssembler::default(),
        Arc::new(HttpMessagingGateway::disabled()),
    );

    println!("Home sale advisor demo (delivery disabled)");
    for (label, property) in demo_properties() {
        println!("\n=== {label} ===");
        let request = AnalysisRequest {
            property: property.clone(),
            contact: ContactDetails::default(),
        };
        let outcome = service.analyze(request, Utc::now()).await?;
        render_evaluation(&property, &outcome.evaluation);
        println!(
            "Report: {} ({} pages, {} bytes)",
            outcome.report.filename,
            outcome.report.page_count,
            outcome.report.bytes.len()
        );
    }

    Ok(())
}

fn demo_properties() -> Vec<(&'static str, PropertyDescription)> {
    vec![
        (
            "Strong equity",
            PropertyDescription {
                postal_code: "78704".to_string(),
                structure: StructureCategory::DetachedHouse,
                living_area_sqft: 1_850,
                bedrooms: 3,
                bathrooms: 2.0,
                condition: ConditionTier::Good,
                loan_balance: Some(Decimal::from(240_000)),
            },
        ),
        (
            "Thin equity",
            PropertyDescription {
                postal_code: "76107".to_string(),
                structure: StructureCategory::Townhouse,
                living_area_sqft: 1_600,
                bedrooms: 2,
                bathrooms: 2.5,
                condition: ConditionTier::Fair,
                loan_balance: Some(Decimal::from(320_000)),
            },
        ),
        (
            "Underwater, no local data",
            PropertyDescription {
                postal_code: "99999".to_string(),
                structure: StructureCategory::Condominium,
                living_area_sqft: 900,
                bedrooms: 2,
                bathrooms: 1.0,
                condition: ConditionTier::Poor,
                loan_balance: Some(Decimal::from(160_000)),
            },
        ),
    ]
}

fn render_evaluation(property: &PropertyDescription, evaluation: &Evaluation) {
    let Evaluation {
        valuation,
        equity,
        comparison,
    } = evaluation;

    println!(
        "{} | {} sq ft | {} bd / {} ba | {} condition | {}",
        property.structure.label(),
        format_quantity(u64::from(property.living_area_sqft)),
        property.bedrooms,
        property.bathrooms,
        property.condition.label(),
        property.postal_code
    );
    println!(
        "Estimated value: {} (range {} - {}, {} confidence)",
        format_currency(valuation.estimated_value),
        format_currency(valuation.range.low),
        format_currency(valuation.range.high),
        valuation.confidence.label()
    );
    println!(
        "Base: {}/sq ft -> {}",
        format_currency(valuation.breakdown.price_per_sqft),
        format_currency(valuation.breakdown.base_value)
    );
    for adjustment in &valuation.breakdown.adjustments {
        println!(
            "  - {}: {} ({})",
            adjustment.label,
            format_signed_currency(adjustment.amount),
            adjustment.note
        );
    }

    match equity {
        Some(position) => println!(
            "Equity: {} ({}) | {}",
            format_currency(position.equity),
            format_percentage(position.equity_percentage),
            position.message
        ),
        None => println!("Equity: no loan balance provided, assuming the home is owned outright"),
    }

    println!("\nSale options");
    for option in &comparison.options {
        let marker = if option.recommended { " [recommended]" } else { "" };
        println!(
            "- {}{}: net {} | gross {} | costs {} | {}",
            option.name,
            marker,
            format_currency(option.net_proceeds),
            format_currency(option.gross_proceeds),
            format_currency(option.costs.total),
            option.timeline_label
        );
    }
}
