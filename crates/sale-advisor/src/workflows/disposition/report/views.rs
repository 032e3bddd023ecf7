use rust_decimal::Decimal;
use serde::Serialize;

use crate::workflows::valuation::ValuationResult;

/// Value shown in the report headline: a full estimate or a bare amount.
#[derive(Debug, Clone, Copy)]
pub enum ValueHeadline<'a> {
    Estimate(&'a ValuationResult),
    Amount(Decimal),
}

impl<'a> From<&'a ValuationResult> for ValueHeadline<'a> {
    fn from(value: &'a ValuationResult) -> Self {
        Self::Estimate(value)
    }
}

impl From<Decimal> for ValueHeadline<'_> {
    fn from(value: Decimal) -> Self {
        Self::Amount(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedReport {
    pub filename: String,
    pub content_type: String,
    pub page_count: usize,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderFailure {
    #[error("report layout produced no pages")]
    Empty,
    #[error("failed to encode report page {page}: {detail}")]
    Encode { page: usize, detail: String },
    #[error("failed to write report document: {0}")]
    Write(String),
}
