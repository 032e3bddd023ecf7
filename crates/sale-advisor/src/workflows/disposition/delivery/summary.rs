use rust_decimal::Decimal;

use super::super::domain::{ComparisonResult, SaleOptionKind};
use crate::workflows::money::{format_currency, format_percentage};

/// Figures both channels report, pulled from one comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverySummary {
    pub property_value: Decimal,
    pub equity: Decimal,
    pub equity_percentage: Decimal,
    pub recommended: SaleOptionKind,
    pub recommended_name: &'static str,
    pub recommended_net: Decimal,
    pub nets: [(SaleOptionKind, &'static str, Decimal); 3],
}

impl DeliverySummary {
    pub fn from_comparison(comparison: &ComparisonResult) -> Self {
        let recommended = comparison.recommended();
        Self {
            property_value: comparison.property_value,
            equity: comparison.equity,
            equity_percentage: comparison.equity_percentage,
            recommended: recommended.kind,
            recommended_name: recommended.name,
            recommended_net: recommended.net_proceeds,
            nets: comparison
                .options
                .each_ref()
                .map(|option| (option.kind, option.name, option.net_proceeds)),
        }
    }

    pub fn value_line(&self) -> String {
        format!("Estimated value: {}", format_currency(self.property_value))
    }

    pub fn equity_line(&self) -> String {
        format!(
            "Estimated equity: {} ({})",
            format_currency(self.equity),
            format_percentage(self.equity_percentage)
        )
    }

    pub fn recommendation_line(&self) -> String {
        format!(
            "Recommended: {} (net {})",
            self.recommended_name,
            format_currency(self.recommended_net)
        )
    }

    /// Compact single-line form used in delivery logs.
    pub fn log_line(&self) -> String {
        format!(
            "value={} equity={} recommended={} net={}",
            format_currency(self.property_value),
            format_currency(self.equity),
            self.recommended.label(),
            format_currency(self.recommended_net)
        )
    }
}
