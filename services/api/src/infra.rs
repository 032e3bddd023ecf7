use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use sale_advisor::config::AppConfig;
use sale_advisor::error::AppError;
use sale_advisor::workflows::disposition::{AdvisoryService, HttpMessagingGateway, ReportAssembler};
use sale_advisor::workflows::valuation::{ConditionTier, StructureCategory, ValuationEngine};
use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wires the engine, report assembler and gateway from loaded configuration.
pub(crate) fn build_advisory_service(config: &AppConfig) -> Result<AdvisoryService, AppError> {
    let pricing = config.pricing.load_table()?;
    if let Some(path) = &config.pricing.table_path {
        info!(path = %path.display(), areas = pricing.len(), "pricing table imported");
    }

    let gateway = HttpMessagingGateway::new(config.gateway.clone());
    if !gateway.is_configured() {
        warn!("messaging gateway not configured; report delivery will be skipped");
    }

    Ok(AdvisoryService::new(
        ValuationEngine::new(pricing),
        ReportAssembler::default(),
        Arc::new(gateway),
    ))
}

pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '_'))
        .collect();
    Decimal::from_str(&cleaned).map_err(|err| format!("failed to parse '{raw}' as an amount ({err})"))
}

pub(crate) fn parse_structure(raw: &str) -> Result<StructureCategory, String> {
    let key = slug(raw);
    StructureCategory::ordered()
        .into_iter()
        .find(|category| {
            slug(category.label()) == key || serde_key(category).as_deref() == Some(key.as_str())
        })
        .ok_or_else(|| {
            format!("unknown property type '{raw}' (expected detached_house, condominium, townhouse or multi_unit)")
        })
}

pub(crate) fn parse_condition(raw: &str) -> Result<ConditionTier, String> {
    let key = slug(raw);
    ConditionTier::ordered()
        .into_iter()
        .find(|tier| slug(tier.label()) == key)
        .ok_or_else(|| format!("unknown condition '{raw}' (expected excellent, good, fair or poor)"))
}

fn serde_key<T: serde::Serialize>(value: &T) -> Option<String> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(key)) => Some(key),
        _ => None,
    }
}

fn slug(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_amounts_with_currency_punctuation() {
        assert_eq!(parse_amount("$412,500").expect("amount"), Decimal::from(412_500));
        assert_eq!(parse_amount("1_000.50").expect("amount"), Decimal::new(100_050, 2));
        assert!(parse_amount("lots").is_err());
    }

    #[test]
    fn parses_structure_by_key_or_label() {
        assert_eq!(
            parse_structure("detached_house").expect("key"),
            StructureCategory::DetachedHouse
        );
        assert_eq!(
            parse_structure("Single-Family Home").expect("label"),
            StructureCategory::DetachedHouse
        );
        assert_eq!(
            parse_structure("multi-unit").expect("key"),
            StructureCategory::MultiUnit
        );
        assert!(parse_structure("castle").is_err());
    }

    #[test]
    fn parses_condition_case_insensitively() {
        assert_eq!(parse_condition("FAIR").expect("tier"), ConditionTier::Fair);
        assert!(parse_condition("mint").is_err());
    }
}
