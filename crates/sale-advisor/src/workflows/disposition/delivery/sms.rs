use std::sync::Arc;

use tracing::{info, warn};

use super::gateway::{Channel, MessagingGateway, OutboundMessage};
use super::phone::normalize_phone;
use super::summary::DeliverySummary;
use super::super::domain::ComparisonResult;
use super::super::report::RenderedReport;
use crate::workflows::money::format_currency;

/// Sends a plain-text digest. The rendered report is never attached.
#[derive(Debug, Clone)]
pub struct SmsSummaryAdapter {
    gateway: Arc<dyn MessagingGateway>,
}

impl SmsSummaryAdapter {
    pub fn new(gateway: Arc<dyn MessagingGateway>) -> Self {
        Self { gateway }
    }

    pub fn compose(&self, destination: &str, comparison: &ComparisonResult) -> OutboundMessage {
        let summary = DeliverySummary::from_comparison(comparison);
        OutboundMessage {
            channel: Channel::Sms,
            destination: normalize_phone(destination),
            subject: None,
            body: render_sms_text(&summary),
            attachments: Vec::new(),
        }
    }

    /// Same contract as the email adapter; `_attachment` is accepted and ignored.
    pub async fn deliver(
        &self,
        destination: &str,
        comparison: &ComparisonResult,
        _attachment: Option<&RenderedReport>,
    ) {
        let message = self.compose(destination, comparison);
        let summary = DeliverySummary::from_comparison(comparison).log_line();

        match self.gateway.submit(&message).await {
            Ok(()) => info!(
                channel = Channel::Sms.label(),
                destination = %message.destination,
                "sale options text delivered"
            ),
            Err(err) => warn!(
                channel = Channel::Sms.label(),
                destination = %message.destination,
                payload = %summary,
                error = %err,
                "sale options text not delivered"
            ),
        }
    }
}

fn render_sms_text(summary: &DeliverySummary) -> String {
    let mut lines = vec![
        "Your home sale options:".to_string(),
        summary.value_line(),
        summary.equity_line(),
        summary.recommendation_line(),
    ];
    lines.extend(
        summary
            .nets
            .iter()
            .map(|(_, name, net)| format!("{name}: {}", format_currency(*net))),
    );
    lines.push("Reply CALL and a specialist will call you back.".to_string());
    lines.join("\n")
}
