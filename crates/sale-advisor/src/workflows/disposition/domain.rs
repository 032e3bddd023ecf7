use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleOptionKind {
    OpenMarket,
    FastCash,
    ShortSale,
}

impl SaleOptionKind {
    pub const fn ordered() -> [Self; 3] {
        [Self::OpenMarket, Self::FastCash, Self::ShortSale]
    }

    /// Position within [`SaleOptionKind::ordered`].
    pub const fn index(self) -> usize {
        match self {
            Self::OpenMarket => 0,
            Self::FastCash => 1,
            Self::ShortSale => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenMarket => "Traditional Listing",
            Self::FastCash => "Cash Offer",
            Self::ShortSale => "Short Sale",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    pub agent_commission: Decimal,
    pub closing_costs: Decimal,
    pub repairs_and_staging: Decimal,
    pub total: Decimal,
}

impl CostBreakdown {
    pub fn new(agent_commission: Decimal, closing_costs: Decimal, repairs_and_staging: Decimal) -> Self {
        Self {
            agent_commission,
            closing_costs,
            repairs_and_staging,
            total: agent_commission + closing_costs + repairs_and_staging,
        }
    }
}

/// One projected disposition strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleOption {
    pub kind: SaleOptionKind,
    pub name: &'static str,
    pub description: &'static str,
    pub timeline_label: &'static str,
    pub timeline_days: u16,
    pub gross_proceeds: Decimal,
    pub costs: CostBreakdown,
    pub net_proceeds: Decimal,
    pub advantages: &'static [&'static str],
    pub trade_offs: &'static [&'static str],
    pub recommended: bool,
}

/// Aggregate handed to the report assembler and delivery adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    pub property_value: Decimal,
    pub loan_balance: Decimal,
    pub equity: Decimal,
    pub equity_percentage: Decimal,
    pub options: [SaleOption; 3],
}

impl ComparisonResult {
    /// The single option flagged by the equity threshold rule.
    pub fn recommended(&self) -> &SaleOption {
        let mut flagged = self.options.iter().filter(|option| option.recommended);
        let first = flagged.next();
        debug_assert!(
            first.is_some() && flagged.next().is_none(),
            "comparison must flag exactly one option"
        );
        first.unwrap_or(&self.options[0])
    }

    /// Options are stored in [`SaleOptionKind::ordered`] order.
    pub fn option(&self, kind: SaleOptionKind) -> &SaleOption {
        let option = &self.options[kind.index()];
        debug_assert_eq!(option.kind, kind, "options out of order");
        option
    }

    pub fn is_underwater(&self) -> bool {
        self.equity < Decimal::ZERO
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EquityRecommendation {
    OpenMarketFavorable,
    FastCashFavorable,
    ConsultationAdvised,
}

impl EquityRecommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenMarketFavorable => "Open market favorable",
            Self::FastCashFavorable => "Cash offer favorable",
            Self::ConsultationAdvised => "Consultation advised",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::OpenMarketFavorable => "You have strong equity. A traditional listing is likely to net the most after costs.",
            Self::FastCashFavorable => "Your equity is moderate. A cash offer avoids commissions and repairs while still leaving you with proceeds.",
            Self::ConsultationAdvised => "Your equity is limited or negative. Talk with a specialist about a short sale or lender options before listing.",
        }
    }
}

/// Quick equity read-out for presentation when a loan balance is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquityPosition {
    pub property_value: Decimal,
    pub loan_balance: Decimal,
    pub equity: Decimal,
    pub equity_percentage: Decimal,
    pub closing_cost_reserve: Decimal,
    pub net_proceeds_estimate: Decimal,
    pub recommendation: EquityRecommendation,
    pub message: &'static str,
}
