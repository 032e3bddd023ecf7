mod layout;
mod pdf;
pub mod views;

pub use layout::{LineStyle, ReportDocument, ReportLine, ReportPage};
pub use views::{RenderFailure, RenderedReport, ValueHeadline};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::domain::ComparisonResult;
use crate::workflows::valuation::PropertyDescription;

const DEFAULT_CONTACT_LINE: &str =
    "Reply to the message that delivered this report, or call or text us to speak with a local specialist.";

/// Renders a comparison into a paginated PDF. Output is a pure function of the
/// inputs, including `generated_at`.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    contact_line: String,
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self {
            contact_line: DEFAULT_CONTACT_LINE.to_string(),
        }
    }
}

impl ReportAssembler {
    pub fn with_contact_line(contact_line: impl Into<String>) -> Self {
        Self {
            contact_line: contact_line.into(),
        }
    }

    pub fn layout<'a>(
        &self,
        value: impl Into<ValueHeadline<'a>>,
        details: &PropertyDescription,
        comparison: &ComparisonResult,
        generated_at: DateTime<Utc>,
    ) -> ReportDocument {
        layout::build_document(
            &value.into(),
            details,
            comparison,
            generated_at,
            &self.contact_line,
        )
    }

    pub fn render<'a>(
        &self,
        value: impl Into<ValueHeadline<'a>>,
        details: &PropertyDescription,
        comparison: &ComparisonResult,
        generated_at: DateTime<Utc>,
    ) -> Result<RenderedReport, RenderFailure> {
        let document = self.layout(value, details, comparison, generated_at);
        let bytes = pdf::encode(&document)?;
        let filename = report_filename(&details.postal_code, generated_at);

        debug!(
            %filename,
            pages = document.pages.len(),
            size = bytes.len(),
            "sale options report rendered"
        );

        Ok(RenderedReport {
            filename,
            content_type: mime::APPLICATION_PDF.to_string(),
            page_count: document.pages.len(),
            bytes,
        })
    }
}

fn report_filename(postal_code: &str, generated_at: DateTime<Utc>) -> String {
    let slug: String = postal_code
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let slug = if slug.is_empty() {
        "property".to_string()
    } else {
        slug
    };
    format!(
        "sale-options-{}-{}.pdf",
        slug,
        generated_at.format("%Y%m%d")
    )
}
