use rust_decimal::Decimal;
use tracing::debug;

use super::catalog::profile;
use super::domain::{ComparisonResult, CostBreakdown, SaleOption, SaleOptionKind};
use crate::workflows::money::percent_of;
use crate::workflows::valuation::InvalidInput;

/// Equity percentage above which an open-market listing is recommended.
pub const OPEN_MARKET_THRESHOLD_PCT: i64 = 20;
/// Equity percentage at or above which a cash offer is recommended.
pub const FAST_CASH_THRESHOLD_PCT: i64 = 5;

pub(crate) fn validate_amounts(
    property_value: Decimal,
    loan_balance: Decimal,
) -> Result<(), InvalidInput> {
    if property_value <= Decimal::ZERO {
        return Err(InvalidInput::NonPositivePropertyValue(property_value));
    }
    if loan_balance < Decimal::ZERO {
        return Err(InvalidInput::NegativeLoanBalance(loan_balance));
    }
    Ok(())
}

pub(crate) fn equity_percentage(property_value: Decimal, equity: Decimal) -> Decimal {
    equity / property_value * Decimal::ONE_HUNDRED
}

/// Threshold rule. Exactly 20% and exactly 5% both land on the cash offer.
pub fn recommend_for(equity_percentage: Decimal) -> SaleOptionKind {
    if equity_percentage > Decimal::from(OPEN_MARKET_THRESHOLD_PCT) {
        SaleOptionKind::OpenMarket
    } else if equity_percentage >= Decimal::from(FAST_CASH_THRESHOLD_PCT) {
        SaleOptionKind::FastCash
    } else {
        SaleOptionKind::ShortSale
    }
}

/// Projects all three sale strategies for the given value and payoff.
pub fn compare(
    property_value: Decimal,
    loan_balance: Decimal,
) -> Result<ComparisonResult, InvalidInput> {
    validate_amounts(property_value, loan_balance)?;

    let equity = property_value - loan_balance;
    let equity_percentage = equity_percentage(property_value, equity);
    let recommended = recommend_for(equity_percentage);

    let options = SaleOptionKind::ordered()
        .map(|kind| project_option(kind, property_value, loan_balance, kind == recommended));

    debug!(
        %property_value,
        %loan_balance,
        %equity_percentage,
        recommended = recommended.label(),
        "sale options compared"
    );

    Ok(ComparisonResult {
        property_value,
        loan_balance,
        equity,
        equity_percentage,
        options,
    })
}

fn project_option(
    kind: SaleOptionKind,
    property_value: Decimal,
    loan_balance: Decimal,
    recommended: bool,
) -> SaleOption {
    let profile = profile(kind);
    let gross_proceeds = percent_of(property_value, profile.gross_bps);
    let costs = CostBreakdown::new(
        percent_of(property_value, profile.commission_bps),
        percent_of(property_value, profile.closing_bps),
        percent_of(property_value, profile.repairs_bps),
    );

    SaleOption {
        kind,
        name: profile.name,
        description: profile.description,
        timeline_label: profile.timeline_label,
        timeline_days: profile.timeline_days,
        gross_proceeds,
        costs,
        net_proceeds: gross_proceeds - loan_balance - costs.total,
        advantages: profile.advantages,
        trade_offs: profile.trade_offs,
        recommended,
    }
}
