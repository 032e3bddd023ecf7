use rust_decimal::Decimal;

use super::comparator::{equity_percentage, recommend_for, validate_amounts};
use super::domain::{EquityPosition, EquityRecommendation, SaleOptionKind};
use crate::workflows::money::percent_of;
use crate::workflows::valuation::InvalidInput;

/// Transaction cost reserve held back from equity, in basis points of value.
const CLOSING_COST_RESERVE_BPS: i64 = 800;

impl EquityPosition {
    pub fn assess(property_value: Decimal, loan_balance: Decimal) -> Result<Self, InvalidInput> {
        validate_amounts(property_value, loan_balance)?;

        let equity = property_value - loan_balance;
        let equity_percentage = equity_percentage(property_value, equity);
        let closing_cost_reserve = percent_of(property_value, CLOSING_COST_RESERVE_BPS);
        let recommendation = match recommend_for(equity_percentage) {
            SaleOptionKind::OpenMarket => EquityRecommendation::OpenMarketFavorable,
            SaleOptionKind::FastCash => EquityRecommendation::FastCashFavorable,
            SaleOptionKind::ShortSale => EquityRecommendation::ConsultationAdvised,
        };

        Ok(Self {
            property_value,
            loan_balance,
            equity,
            equity_percentage,
            closing_cost_reserve,
            net_proceeds_estimate: equity - closing_cost_reserve,
            recommendation,
            message: recommendation.message(),
        })
    }
}
