use super::domain::SaleOptionKind;

/// Fixed pricing model and copy for a sale strategy. Rates are basis points of
/// property value.
#[derive(Debug)]
pub(crate) struct OptionProfile {
    pub name: &'static str,
    pub description: &'static str,
    pub timeline_label: &'static str,
    pub timeline_days: u16,
    pub gross_bps: i64,
    pub commission_bps: i64,
    pub closing_bps: i64,
    pub repairs_bps: i64,
    pub advantages: &'static [&'static str],
    pub trade_offs: &'static [&'static str],
}

static OPEN_MARKET: OptionProfile = OptionProfile {
    name: "Traditional Listing",
    description: "List with an agent on the open market and sell to a financed buyer at full market value.",
    timeline_label: "60-90 days",
    timeline_days: 75,
    gross_bps: 10_000,
    commission_bps: 600,
    closing_bps: 300,
    repairs_bps: 500,
    advantages: &[
        "Highest potential sale price",
        "Competitive offers from multiple buyers",
        "Full market exposure through the MLS",
    ],
    trade_offs: &[
        "Longest timeline to closing",
        "Agent commission and seller closing costs",
        "Repairs, staging, and showings required",
        "Buyer financing can fall through",
    ],
};

static FAST_CASH: OptionProfile = OptionProfile {
    name: "Cash Offer",
    description: "Sell as-is to a cash buyer with no repairs, no showings, and a closing date you choose.",
    timeline_label: "7-10 days",
    timeline_days: 8,
    gross_bps: 8_500,
    commission_bps: 0,
    closing_bps: 200,
    repairs_bps: 0,
    advantages: &[
        "Close in about a week",
        "No agent commission",
        "Sell as-is with no repairs or staging",
        "No financing contingencies",
    ],
    trade_offs: &[
        "Offer is below full market value",
        "Fewer buyers to negotiate against",
    ],
};

static SHORT_SALE: OptionProfile = OptionProfile {
    name: "Short Sale",
    description: "Sell with lender approval for less than the loan balance to avoid foreclosure.",
    timeline_label: "90-180 days",
    timeline_days: 135,
    gross_bps: 7_500,
    commission_bps: 600,
    closing_bps: 200,
    repairs_bps: 0,
    advantages: &[
        "Avoids foreclosure on your record",
        "Lender may forgive the remaining balance",
        "Less credit damage than foreclosure",
    ],
    trade_offs: &[
        "Requires lender approval",
        "Longest and least predictable timeline",
        "Credit score impact",
        "Possible tax consequences on forgiven debt",
    ],
};

pub(crate) fn profile(kind: SaleOptionKind) -> &'static OptionProfile {
    match kind {
        SaleOptionKind::OpenMarket => &OPEN_MARKET,
        SaleOptionKind::FastCash => &FAST_CASH,
        SaleOptionKind::ShortSale => &SHORT_SALE,
    }
}
