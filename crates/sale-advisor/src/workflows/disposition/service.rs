use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::comparator::compare;
use super::delivery::{EmailReportAdapter, MessagingGateway, SmsSummaryAdapter};
use super::domain::{ComparisonResult, EquityPosition};
use super::report::{RenderFailure, RenderedReport, ReportAssembler};
use crate::workflows::valuation::{
    InvalidInput, PropertyDescription, ValuationEngine, ValuationResult,
};

/// Where to send the results. Blank values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl ContactDetails {
    fn email(&self) -> Option<&str> {
        non_blank(self.email.as_deref())
    }

    fn phone(&self) -> Option<&str> {
        non_blank(self.phone.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub property: PropertyDescription,
    #[serde(default)]
    pub contact: ContactDetails,
}

/// Which channels were attempted. A dispatched channel may still have failed;
/// failures only show up in the logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    pub email_dispatched: bool,
    pub sms_dispatched: bool,
}

/// Synchronous part of an analysis: everything except rendering and delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub valuation: ValuationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity: Option<EquityPosition>,
    pub comparison: ComparisonResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    #[serde(flatten)]
    pub evaluation: Evaluation,
    pub report: RenderedReport,
    pub delivery: DeliveryReceipt,
}

#[derive(Debug, thiserror::Error)]
pub enum AdvisoryError {
    #[error(transparent)]
    Input(#[from] InvalidInput),
    #[error(transparent)]
    Render(#[from] RenderFailure),
}

/// Runs estimate, comparison, rendering and delivery for a single request.
#[derive(Debug)]
pub struct AdvisoryService {
    engine: ValuationEngine,
    assembler: ReportAssembler,
    email: EmailReportAdapter,
    sms: SmsSummaryAdapter,
}

impl AdvisoryService {
    pub fn new(
        engine: ValuationEngine,
        assembler: ReportAssembler,
        gateway: Arc<dyn MessagingGateway>,
    ) -> Self {
        Self {
            engine,
            assembler,
            email: EmailReportAdapter::new(Arc::clone(&gateway)),
            sms: SmsSummaryAdapter::new(gateway),
        }
    }

    pub fn engine(&self) -> &ValuationEngine {
        &self.engine
    }

    /// Estimate, then compare against the loan balance (zero when absent).
    pub fn evaluate(&self, property: &PropertyDescription) -> Result<Evaluation, InvalidInput> {
        let valuation = self.engine.estimate(property)?;
        if valuation.estimated_value.is_zero() {
            return Err(InvalidInput::ZeroEstimate);
        }
        let loan_balance = property.loan_balance.unwrap_or_default();
        let comparison = compare(valuation.estimated_value, loan_balance)?;
        let equity = match property.loan_balance {
            Some(balance) => Some(EquityPosition::assess(valuation.estimated_value, balance)?),
            None => None,
        };

        Ok(Evaluation {
            valuation,
            equity,
            comparison,
        })
    }

    pub fn report(
        &self,
        property: &PropertyDescription,
        generated_at: DateTime<Utc>,
    ) -> Result<RenderedReport, AdvisoryError> {
        let evaluation = self.evaluate(property)?;
        self.render(property, &evaluation, generated_at)
    }

    pub async fn analyze(
        &self,
        request: AnalysisRequest,
        generated_at: DateTime<Utc>,
    ) -> Result<AnalysisOutcome, AdvisoryError> {
        let AnalysisRequest { property, contact } = request;
        let evaluation = self.evaluate(&property)?;
        let report = self.render(&property, &evaluation, generated_at)?;
        let comparison = &evaluation.comparison;

        let email_job = async {
            match contact.email() {
                Some(address) => {
                    self.email.deliver(address, comparison, Some(&report)).await;
                    true
                }
                None => false,
            }
        };
        let sms_job = async {
            match contact.phone() {
                Some(number) => {
                    self.sms.deliver(number, comparison, None).await;
                    true
                }
                None => false,
            }
        };
        let (email_dispatched, sms_dispatched) = tokio::join!(email_job, sms_job);

        info!(
            postal_code = %property.postal_code,
            estimated_value = %evaluation.valuation.estimated_value,
            recommended = comparison.recommended().kind.label(),
            email_dispatched,
            sms_dispatched,
            "sale options analysis completed"
        );

        Ok(AnalysisOutcome {
            evaluation,
            report,
            delivery: DeliveryReceipt {
                email_dispatched,
                sms_dispatched,
            },
        })
    }

    /// Renders the report for an evaluation that has already been computed.
    pub fn render(
        &self,
        property: &PropertyDescription,
        evaluation: &Evaluation,
        generated_at: DateTime<Utc>,
    ) -> Result<RenderedReport, AdvisoryError> {
        Ok(self.assembler.render(
            &evaluation.valuation,
            property,
            &evaluation.comparison,
            generated_at,
        )?)
    }
}
