use std::sync::Arc;

use tracing::{info, warn};

use super::gateway::{Channel, MessageAttachment, MessagingGateway, OutboundMessage};
use super::summary::DeliverySummary;
use super::super::domain::ComparisonResult;
use super::super::report::RenderedReport;
use crate::workflows::money::format_currency;

const SUBJECT: &str = "Your Home Sale Options Report";

/// Sends the HTML summary with the rendered report attached.
#[derive(Debug, Clone)]
pub struct EmailReportAdapter {
    gateway: Arc<dyn MessagingGateway>,
}

impl EmailReportAdapter {
    pub fn new(gateway: Arc<dyn MessagingGateway>) -> Self {
        Self { gateway }
    }

    pub fn compose(
        &self,
        destination: &str,
        comparison: &ComparisonResult,
        attachment: Option<&RenderedReport>,
    ) -> OutboundMessage {
        let summary = DeliverySummary::from_comparison(comparison);
        OutboundMessage {
            channel: Channel::Email,
            destination: destination.trim().to_string(),
            subject: Some(SUBJECT.to_string()),
            body: render_email_html(&summary, attachment.is_some()),
            attachments: attachment
                .map(|report| MessageAttachment {
                    filename: report.filename.clone(),
                    content_type: report.content_type.clone(),
                    bytes: report.bytes.clone(),
                })
                .into_iter()
                .collect(),
        }
    }

    /// Best effort. Failures are logged here and never reach the caller.
    pub async fn deliver(
        &self,
        destination: &str,
        comparison: &ComparisonResult,
        attachment: Option<&RenderedReport>,
    ) {
        let message = self.compose(destination, comparison, attachment);
        let summary = DeliverySummary::from_comparison(comparison).log_line();

        match self.gateway.submit(&message).await {
            Ok(()) => info!(
                channel = Channel::Email.label(),
                destination = %message.destination,
                attachments = message.attachments.len(),
                "sale options email delivered"
            ),
            Err(err) => warn!(
                channel = Channel::Email.label(),
                destination = %message.destination,
                payload = %summary,
                error = %err,
                "sale options email not delivered"
            ),
        }
    }
}

fn render_email_html(summary: &DeliverySummary, has_attachment: bool) -> String {
    let mut html = String::new();
    html.push_str("<h1>Your Home Sale Options</h1>\n");
    html.push_str(&format!(
        "<p>{}</p>\n",
        escape_html(&summary.value_line())
    ));
    html.push_str(&format!(
        "<p>{}</p>\n",
        escape_html(&summary.equity_line())
    ));
    html.push_str(&format!(
        "<h2>Recommended: {}</h2>\n<p>Estimated net proceeds: <strong>{}</strong></p>\n",
        escape_html(summary.recommended_name),
        escape_html(&format_currency(summary.recommended_net))
    ));

    html.push_str("<ul>\n");
    for (_, name, net) in &summary.nets {
        html.push_str(&format!(
            "<li>{}: {}</li>\n",
            escape_html(name),
            escape_html(&format_currency(*net))
        ));
    }
    html.push_str("</ul>\n");

    if has_attachment {
        html.push_str("<p>Your full report is attached as a PDF.</p>\n");
    }
    html.push_str(
        "<p>Reply to this email or call us to schedule a free consultation about your options.</p>\n",
    );
    html
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
