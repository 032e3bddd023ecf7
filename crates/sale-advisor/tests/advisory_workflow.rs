use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sale_advisor::workflows::disposition::delivery::{Channel, OutboundMessage};
use sale_advisor::workflows::disposition::{
    AdvisoryError, AdvisoryService, AnalysisRequest, ContactDetails, DeliveryFailure,
    MessagingGateway, ReportAssembler, SaleOptionKind,
};
use sale_advisor::workflows::valuation::{
    ConditionTier, InvalidInput, PropertyDescription, StructureCategory, ValuationEngine,
};

#[derive(Debug, Default)]
struct RecordingGateway {
    fail: bool,
    sent: Mutex<Vec<OutboundMessage>>,
}

impl RecordingGateway {
    fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().expect("sent mutex").clone()
    }
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn submit(&self, message: &OutboundMessage) -> Result<(), DeliveryFailure> {
        self.sent.lock().expect("sent mutex").push(message.clone());
        if self.fail {
            Err(DeliveryFailure::Rejected {
                status: 503,
                body: "unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

fn service_with(gateway: Arc<RecordingGateway>) -> AdvisoryService {
    AdvisoryService::new(
        ValuationEngine::default(),
        ReportAssembler::default(),
        gateway,
    )
}

fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn property(loan_balance: Option<i64>) -> PropertyDescription {
    PropertyDescription {
        postal_code: "77006".to_string(),
        structure: StructureCategory::Townhouse,
        living_area_sqft: 1_800,
        bedrooms: 3,
        bathrooms: 2.5,
        condition: ConditionTier::Good,
        loan_balance: loan_balance.map(Decimal::from),
    }
}

fn full_contact() -> ContactDetails {
    ContactDetails {
        email: Some("owner@example.com".to_string()),
        phone: Some("713-555-0142".to_string()),
    }
}

#[tokio::test]
async fn analysis_dispatches_both_channels() {
    let gateway = Arc::new(RecordingGateway::default());
    let service = service_with(Arc::clone(&gateway));

    let outcome = service
        .analyze(
            AnalysisRequest {
                property: property(Some(400_000)),
                contact: full_contact(),
            },
            generated_at(),
        )
        .await
        .expect("analysis succeeds");

    // 1,800 sq ft at $290 with a -5% townhouse adjustment.
    assert_eq!(outcome.evaluation.valuation.estimated_value, Decimal::from(495_900));
    assert!(outcome.delivery.email_dispatched);
    assert!(outcome.delivery.sms_dispatched);
    assert_eq!(outcome.report.page_count, 5);
    assert_eq!(outcome.report.filename, "sale-options-77006-20261016.pdf");

    let sent = gateway.sent();
    assert_eq!(sent.len(), 2);
    let email = sent
        .iter()
        .find(|message| message.channel == Channel::Email)
        .expect("email sent");
    assert_eq!(email.attachments.len(), 1);
    assert_eq!(email.attachments[0].bytes, outcome.report.bytes);
    let sms = sent
        .iter()
        .find(|message| message.channel == Channel::Sms)
        .expect("sms sent");
    assert_eq!(sms.destination, "+17135550142");
    assert!(sms.attachments.is_empty());
}

#[tokio::test]
async fn failed_delivery_still_returns_results() {
    let gateway = Arc::new(RecordingGateway::failing());
    let service = service_with(Arc::clone(&gateway));

    let outcome = service
        .analyze(
            AnalysisRequest {
                property: property(Some(400_000)),
                contact: full_contact(),
            },
            generated_at(),
        )
        .await
        .expect("delivery failures are not surfaced");

    assert!(outcome.delivery.email_dispatched);
    assert!(outcome.delivery.sms_dispatched);
    assert_eq!(gateway.sent().len(), 2);
    assert_eq!(
        outcome.evaluation.comparison.recommended().kind,
        SaleOptionKind::FastCash
    );
}

#[tokio::test]
async fn blank_contact_skips_delivery() {
    let gateway = Arc::new(RecordingGateway::default());
    let service = service_with(Arc::clone(&gateway));

    let outcome = service
        .analyze(
            AnalysisRequest {
                property: property(None),
                contact: ContactDetails {
                    email: Some("   ".to_string()),
                    phone: None,
                },
            },
            generated_at(),
        )
        .await
        .expect("analysis succeeds");

    assert!(!outcome.delivery.email_dispatched);
    assert!(!outcome.delivery.sms_dispatched);
    assert!(gateway.sent().is_empty());
    assert!(outcome.evaluation.equity.is_none());
    assert_eq!(outcome.evaluation.comparison.loan_balance, Decimal::ZERO);
    assert_eq!(
        outcome.evaluation.comparison.recommended().kind,
        SaleOptionKind::OpenMarket
    );
}

#[tokio::test]
async fn invalid_property_fails_before_delivery() {
    let gateway = Arc::new(RecordingGateway::default());
    let service = service_with(Arc::clone(&gateway));
    let mut invalid = property(Some(100_000));
    invalid.bathrooms = 1.3;

    let err = service
        .analyze(
            AnalysisRequest {
                property: invalid,
                contact: full_contact(),
            },
            generated_at(),
        )
        .await
        .expect_err("invalid bathrooms rejected");

    assert!(matches!(
        err,
        AdvisoryError::Input(InvalidInput::FractionalBathrooms(_))
    ));
    assert!(gateway.sent().is_empty());
}

#[test]
fn report_renders_without_delivery() {
    let gateway = Arc::new(RecordingGateway::default());
    let service = service_with(Arc::clone(&gateway));

    let report = service
        .report(&property(Some(250_000)), generated_at())
        .expect("report renders");

    assert_eq!(report.page_count, 5);
    assert!(gateway.sent().is_empty());
}

#[test]
fn analysis_request_accepts_missing_contact() {
    let request: AnalysisRequest = serde_json::from_value(serde_json::json!({
        "property": {
            "postal_code": "75205",
            "structure": "condominium",
            "living_area_sqft": 1100,
            "bedrooms": 2,
            "bathrooms": 2.0,
            "condition": "excellent"
        }
    }))
    .expect("request deserializes");

    assert_eq!(request.contact, ContactDetails::default());
    assert_eq!(request.property.structure, StructureCategory::Condominium);
    assert!(request.property.loan_balance.is_none());
}

#[test]
fn tiny_property_reports_zero_estimate() {
    let service = service_with(Arc::new(RecordingGateway::default()));
    let tiny = PropertyDescription {
        postal_code: "99999".to_string(),
        structure: StructureCategory::Condominium,
        living_area_sqft: 1,
        bedrooms: 1,
        bathrooms: 0.5,
        condition: ConditionTier::Poor,
        loan_balance: None,
    };

    let err = service.evaluate(&tiny).expect_err("zero estimate rejected");
    assert_eq!(err, InvalidInput::ZeroEstimate);
    assert!(err.to_string().contains("estimated value came out at $0"));
}

#[test]
fn render_reuses_existing_evaluation() {
    let service = service_with(Arc::new(RecordingGateway::default()));
    let property = property(Some(250_000));

    let evaluation = service.evaluate(&property).expect("evaluation succeeds");
    let rendered = service
        .render(&property, &evaluation, generated_at())
        .expect("report renders");

    assert_eq!(
        rendered,
        service
            .report(&property, generated_at())
            .expect("report renders")
    );
}
