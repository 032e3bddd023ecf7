use std::fmt::Debug;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;

use crate::config::GatewayConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Email,
    Sms,
}

impl Channel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
        }
    }

    const fn wire_type(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Sms => "SMS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageAttachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A single message handed to the provider; email bodies are HTML, SMS bodies plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub channel: Channel,
    pub destination: String,
    pub subject: Option<String>,
    pub body: String,
    pub attachments: Vec<MessageAttachment>,
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryFailure {
    #[error("messaging gateway is not configured")]
    NotConfigured,
    #[error("messaging gateway unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("messaging gateway rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[async_trait]
pub trait MessagingGateway: Send + Sync + Debug {
    async fn submit(&self, message: &OutboundMessage) -> Result<(), DeliveryFailure>;
}

/// Posts messages to the CRM conversations endpoint. With no configuration every
/// submission fails with [`DeliveryFailure::NotConfigured`].
#[derive(Debug, Clone)]
pub struct HttpMessagingGateway {
    client: reqwest::Client,
    config: Option<GatewayConfig>,
}

impl HttpMessagingGateway {
    pub fn new(config: Option<GatewayConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MessagePayload<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    location_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<AttachmentPayload<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AttachmentPayload<'a> {
    filename: &'a str,
    content_type: &'a str,
    content: String,
}

fn build_payload<'a>(location_id: &'a str, message: &'a OutboundMessage) -> MessagePayload<'a> {
    let destination = message.destination.as_str();
    let body = message.body.as_str();
    let (email, phone, html, text) = match message.channel {
        Channel::Email => (Some(destination), None, Some(body), None),
        Channel::Sms => (None, Some(destination), None, Some(body)),
    };

    MessagePayload {
        kind: message.channel.wire_type(),
        location_id,
        email,
        phone,
        subject: message.subject.as_deref(),
        html,
        message: text,
        attachments: message
            .attachments
            .iter()
            .map(|attachment| AttachmentPayload {
                filename: &attachment.filename,
                content_type: &attachment.content_type,
                content: STANDARD.encode(&attachment.bytes),
            })
            .collect(),
    }
}

#[async_trait]
impl MessagingGateway for HttpMessagingGateway {
    async fn submit(&self, message: &OutboundMessage) -> Result<(), DeliveryFailure> {
        let config = self.config.as_ref().ok_or(DeliveryFailure::NotConfigured)?;
        let payload = build_payload(&config.location_id, message);

        let response = self
            .client
            .post(config.messages_endpoint())
            .bearer_auth(&config.api_key)
            .header("Version", config.api_version.as_str())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(DeliveryFailure::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_message() -> OutboundMessage {
        OutboundMessage {
            channel: Channel::Email,
            destination: "owner@example.com".to_string(),
            subject: Some("Your options".to_string()),
            body: "<p>Hello</p>".to_string(),
            attachments: vec![MessageAttachment {
                filename: "report.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                bytes: b"%PDF".to_vec(),
            }],
        }
    }

    #[test]
    fn email_payload_carries_html_and_encoded_attachment() {
        let message = email_message();
        let value = serde_json::to_value(build_payload("loc-1", &message)).expect("serializes");

        assert_eq!(value["type"], "Email");
        assert_eq!(value["locationId"], "loc-1");
        assert_eq!(value["email"], "owner@example.com");
        assert_eq!(value["html"], "<p>Hello</p>");
        assert!(value.get("phone").is_none());
        assert!(value.get("message").is_none());
        assert_eq!(value["attachments"][0]["contentType"], "application/pdf");
        assert_eq!(value["attachments"][0]["content"], "JVBERg==");
    }

    #[test]
    fn sms_payload_uses_phone_and_plain_message() {
        let message = OutboundMessage {
            channel: Channel::Sms,
            destination: "+15125550100".to_string(),
            subject: None,
            body: "Estimated value $500,000".to_string(),
            attachments: Vec::new(),
        };
        let value = serde_json::to_value(build_payload("loc-1", &message)).expect("serializes");

        assert_eq!(value["type"], "SMS");
        assert_eq!(value["phone"], "+15125550100");
        assert_eq!(value["message"], "Estimated value $500,000");
        assert!(value.get("attachments").is_none());
        assert!(value.get("subject").is_none());
    }

    #[tokio::test]
    async fn unconfigured_gateway_refuses_to_send() {
        let gateway = HttpMessagingGateway::disabled();
        let err = gateway
            .submit(&email_message())
            .await
            .expect_err("no configuration");
        assert!(matches!(err, DeliveryFailure::NotConfigured));
    }
}
