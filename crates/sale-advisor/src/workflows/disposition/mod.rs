//! Equity assessment, sale strategy comparison, reporting and delivery.

mod catalog;
pub mod comparator;
pub mod delivery;
pub mod domain;
mod equity;
pub mod report;
pub mod router;
pub mod service;

pub use comparator::{compare, recommend_for, FAST_CASH_THRESHOLD_PCT, OPEN_MARKET_THRESHOLD_PCT};
pub use delivery::{
    normalize_phone, DeliveryFailure, EmailReportAdapter, HttpMessagingGateway, MessagingGateway,
    SmsSummaryAdapter,
};
pub use domain::{
    ComparisonResult, CostBreakdown, EquityPosition, EquityRecommendation, SaleOption,
    SaleOptionKind,
};
pub use report::{RenderFailure, RenderedReport, ReportAssembler, ValueHeadline};
pub use router::advisory_router;
pub use service::{
    AdvisoryError, AdvisoryService, AnalysisOutcome, AnalysisRequest, ContactDetails,
    DeliveryReceipt, Evaluation,
};
