//! Outbound notification adapters. Every adapter swallows its own failures.

mod email;
pub mod gateway;
mod phone;
mod sms;
mod summary;

pub use email::EmailReportAdapter;
pub use gateway::{
    Channel, DeliveryFailure, HttpMessagingGateway, MessageAttachment, MessagingGateway,
    OutboundMessage,
};
pub use phone::normalize_phone;
pub use sms::SmsSummaryAdapter;
pub use summary::DeliverySummary;
