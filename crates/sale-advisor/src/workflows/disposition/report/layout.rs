use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::super::domain::{ComparisonResult, SaleOption};
use super::views::ValueHeadline;
use crate::workflows::money::{
    format_currency, format_percentage, format_quantity, format_signed_currency,
};
use crate::workflows::valuation::{ConfidenceTier, PropertyDescription};

/// Vertical space available below a page title, in points.
pub(crate) const PAGE_CONTENT_HEIGHT: i64 = 640;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Heading,
    Badge,
    Body,
    Bullet,
    Fine,
    Spacer,
}

impl LineStyle {
    pub(crate) const fn font(self) -> &'static str {
        match self {
            Self::Title | Self::Heading | Self::Badge => "F2",
            Self::Body | Self::Bullet | Self::Fine | Self::Spacer => "F1",
        }
    }

    pub(crate) const fn font_size(self) -> i64 {
        match self {
            Self::Title => 18,
            Self::Heading => 13,
            Self::Badge => 12,
            Self::Body | Self::Bullet => 11,
            Self::Fine => 8,
            Self::Spacer => 0,
        }
    }

    pub(crate) const fn leading(self) -> i64 {
        match self {
            Self::Title => 28,
            Self::Heading => 22,
            Self::Badge => 18,
            Self::Body | Self::Bullet => 15,
            Self::Fine => 11,
            Self::Spacer => 8,
        }
    }

    const fn wrap_width(self) -> usize {
        match self {
            Self::Title => 48,
            Self::Heading => 68,
            Self::Badge => 72,
            Self::Body => 92,
            Self::Bullet => 88,
            Self::Fine => 124,
            Self::Spacer => usize::MAX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub style: LineStyle,
    pub text: String,
}

impl ReportLine {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    fn spacer() -> Self {
        Self::new(LineStyle::Spacer, "")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPage {
    pub title: String,
    pub lines: Vec<ReportLine>,
}

/// Paginated, wrapped text ready for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    pub title: String,
    pub footer: String,
    pub generated_at: DateTime<Utc>,
    pub pages: Vec<ReportPage>,
}

impl ReportDocument {
    pub fn text(&self) -> String {
        let mut text = String::new();
        for page in &self.pages {
            text.push_str(&page.title);
            text.push('\n');
            for line in &page.lines {
                text.push_str(&line.text);
                text.push('\n');
            }
        }
        text
    }
}

const REPORT_TITLE: &str = "Home Sale Options Report";

const NEXT_STEPS: [&str; 3] = [
    "Review the option marked as recommended and compare its net proceeds with your goals and timeline.",
    "Gather your most recent mortgage statement so the payoff figure can be confirmed.",
    "Schedule a no-obligation call with a local specialist to walk through these numbers together.",
];

const DISCLAIMER: &str = "This report is an automated estimate based on the information you provided and general market averages. It is not an appraisal, a broker price opinion, or a guaranteed offer. Actual sale prices, costs, timelines, and lender decisions vary. Consult a licensed real estate professional, your lender, and a tax advisor before making any decision about your property.";

pub(crate) fn build_document(
    value: &ValueHeadline<'_>,
    details: &PropertyDescription,
    comparison: &ComparisonResult,
    generated_at: DateTime<Utc>,
    contact_line: &str,
) -> ReportDocument {
    let mut pages = Vec::new();
    pages.extend(paginate(
        REPORT_TITLE,
        summary_lines(value, details, comparison, generated_at),
    ));
    for option in &comparison.options {
        pages.extend(paginate(option.name, option_lines(option, comparison)));
    }
    pages.extend(paginate("Next Steps", closing_lines(contact_line)));

    ReportDocument {
        title: REPORT_TITLE.to_string(),
        footer: format!(
            "Prepared {} | Estimates only, not an appraisal",
            generated_at.format("%B %d, %Y")
        ),
        generated_at,
        pages,
    }
}

fn summary_lines(
    value: &ValueHeadline<'_>,
    details: &PropertyDescription,
    comparison: &ComparisonResult,
    generated_at: DateTime<Utc>,
) -> Vec<ReportLine> {
    let mut lines = vec![
        ReportLine::new(
            LineStyle::Fine,
            format!("Prepared {}", generated_at.format("%B %d, %Y at %H:%M UTC")),
        ),
        ReportLine::spacer(),
        ReportLine::new(LineStyle::Heading, "Property Details"),
        ReportLine::new(
            LineStyle::Body,
            format!("Postal code: {}", details.postal_code.trim()),
        ),
        ReportLine::new(
            LineStyle::Body,
            format!("Property type: {}", details.structure.label()),
        ),
        ReportLine::new(
            LineStyle::Body,
            format!(
                "Living area: {} sq ft",
                format_quantity(u64::from(details.living_area_sqft))
            ),
        ),
        ReportLine::new(
            LineStyle::Body,
            format!(
                "Bedrooms: {} | Bathrooms: {}",
                details.bedrooms, details.bathrooms
            ),
        ),
        ReportLine::new(
            LineStyle::Body,
            format!("Condition: {}", details.condition.label()),
        ),
        ReportLine::new(
            LineStyle::Body,
            match details.loan_balance {
                Some(balance) => format!("Outstanding loan balance: {}", format_currency(balance)),
                None => "Outstanding loan balance: not provided".to_string(),
            },
        ),
        ReportLine::spacer(),
        ReportLine::new(LineStyle::Heading, "Estimated Market Value"),
    ];

    match value {
        ValueHeadline::Estimate(valuation) => {
            lines.push(ReportLine::new(
                LineStyle::Badge,
                format_currency(valuation.estimated_value),
            ));
            lines.push(ReportLine::new(
                LineStyle::Body,
                format!(
                    "Likely range: {} - {}",
                    format_currency(valuation.range.low),
                    format_currency(valuation.range.high)
                ),
            ));
            lines.push(ReportLine::new(
                LineStyle::Body,
                format!(
                    "Confidence: {} ({})",
                    valuation.confidence.label(),
                    confidence_note(valuation.confidence, valuation.area_data_found)
                ),
            ));
            lines.push(ReportLine::new(
                LineStyle::Body,
                format!(
                    "Base value: {} sq ft x {}/sq ft = {}",
                    format_quantity(u64::from(details.living_area_sqft)),
                    format_currency(valuation.breakdown.price_per_sqft),
                    format_currency(valuation.breakdown.base_value)
                ),
            ));
            for adjustment in &valuation.breakdown.adjustments {
                lines.push(ReportLine::new(
                    LineStyle::Bullet,
                    format!(
                        "{}: {} ({})",
                        adjustment.label,
                        format_signed_currency(adjustment.amount),
                        adjustment.note
                    ),
                ));
            }
        }
        ValueHeadline::Amount(amount) => {
            lines.push(ReportLine::new(LineStyle::Badge, format_currency(*amount)));
            lines.push(ReportLine::new(
                LineStyle::Body,
                "Value supplied with the request; no automated estimate was run.",
            ));
        }
    }

    lines.push(ReportLine::spacer());
    lines.push(ReportLine::new(LineStyle::Heading, "Equity Summary"));
    lines.push(ReportLine::new(
        LineStyle::Body,
        format!("Property value: {}", format_currency(comparison.property_value)),
    ));
    lines.push(ReportLine::new(
        LineStyle::Body,
        format!("Loan balance: {}", format_currency(comparison.loan_balance)),
    ));
    lines.push(ReportLine::new(
        LineStyle::Body,
        format!(
            "Estimated equity: {} ({})",
            format_currency(comparison.equity),
            format_percentage(comparison.equity_percentage)
        ),
    ));
    lines.push(ReportLine::new(
        LineStyle::Badge,
        format!("Recommended strategy: {}", comparison.recommended().name),
    ));
    if comparison.is_underwater() {
        lines.push(ReportLine::new(
            LineStyle::Body,
            "Your loan balance exceeds the property value, so every option below requires funds at closing or lender approval.",
        ));
    }

    lines
}

fn confidence_note(confidence: ConfidenceTier, area_data_found: bool) -> &'static str {
    match (confidence, area_data_found) {
        (ConfidenceTier::High, _) => "local pricing data for your area",
        (_, true) => "local pricing data, but an unusual size for this property type",
        (_, false) => "regional average pricing; no local data for your area",
    }
}

fn option_lines(option: &SaleOption, comparison: &ComparisonResult) -> Vec<ReportLine> {
    let mut lines = Vec::new();
    if option.recommended {
        lines.push(ReportLine::new(
            LineStyle::Badge,
            "RECOMMENDED FOR YOUR SITUATION",
        ));
    }
    lines.push(ReportLine::new(LineStyle::Body, option.description));
    lines.push(ReportLine::new(
        LineStyle::Body,
        format!(
            "Timeline: {} (about {} days)",
            option.timeline_label, option.timeline_days
        ),
    ));
    lines.push(ReportLine::spacer());
    lines.push(ReportLine::new(LineStyle::Heading, "Proceeds"));

    let costs = &option.costs;
    for (label, amount) in [
        ("Gross sale price", option.gross_proceeds),
        ("Loan payoff", -comparison.loan_balance),
        ("Agent commission", -costs.agent_commission),
        ("Closing costs", -costs.closing_costs),
        ("Repairs and staging", -costs.repairs_and_staging),
        ("Total costs", -costs.total),
    ] {
        lines.push(ReportLine::new(
            LineStyle::Body,
            format!("{label}: {}", format_currency(amount)),
        ));
    }

    lines.push(ReportLine::new(
        LineStyle::Badge,
        format!(
            "Estimated net proceeds: {}",
            format_currency(option.net_proceeds)
        ),
    ));
    if option.net_proceeds < Decimal::ZERO {
        lines.push(ReportLine::new(
            LineStyle::Body,
            "A negative amount means you would need to bring funds to closing.",
        ));
    }

    lines.push(ReportLine::spacer());
    lines.push(ReportLine::new(LineStyle::Heading, "Advantages"));
    lines.extend(
        option
            .advantages
            .iter()
            .map(|item| ReportLine::new(LineStyle::Bullet, *item)),
    );
    lines.push(ReportLine::spacer());
    lines.push(ReportLine::new(LineStyle::Heading, "Trade-offs"));
    lines.extend(
        option
            .trade_offs
            .iter()
            .map(|item| ReportLine::new(LineStyle::Bullet, *item)),
    );

    lines
}

fn closing_lines(contact_line: &str) -> Vec<ReportLine> {
    let mut lines = vec![ReportLine::new(
        LineStyle::Body,
        "Every situation is different. These projections are a starting point for a conversation, not a final answer.",
    )];
    lines.push(ReportLine::spacer());
    lines.extend(
        NEXT_STEPS
            .iter()
            .map(|step| ReportLine::new(LineStyle::Bullet, *step)),
    );
    lines.push(ReportLine::spacer());
    lines.push(ReportLine::new(LineStyle::Heading, "Contact"));
    lines.push(ReportLine::new(LineStyle::Body, contact_line));
    lines.push(ReportLine::spacer());
    lines.push(ReportLine::new(LineStyle::Heading, "Disclaimer"));
    lines.push(ReportLine::new(LineStyle::Fine, DISCLAIMER));
    lines
}

/// Wraps lines to their style width and splits them across pages by height.
fn paginate(title: &str, lines: Vec<ReportLine>) -> Vec<ReportPage> {
    let mut pages = vec![ReportPage {
        title: title.to_string(),
        lines: Vec::new(),
    }];
    let mut used = 0;

    for line in lines.into_iter().flat_map(wrap_line) {
        if used + line.style.leading() > PAGE_CONTENT_HEIGHT {
            pages.push(ReportPage {
                title: format!("{title} (continued)"),
                lines: Vec::new(),
            });
            used = 0;
        }
        used += line.style.leading();
        if let Some(page) = pages.last_mut() {
            page.lines.push(line);
        }
    }

    pages
}

fn wrap_line(line: ReportLine) -> Vec<ReportLine> {
    let style = line.style;
    if style == LineStyle::Spacer {
        return vec![line];
    }

    let (width, first_prefix, rest_prefix) = match style {
        LineStyle::Bullet => (style.wrap_width() - 2, "- ", "  "),
        _ => (style.wrap_width(), "", ""),
    };

    wrap_text(&line.text, width)
        .into_iter()
        .enumerate()
        .map(|(index, segment)| {
            let prefix = if index == 0 { first_prefix } else { rest_prefix };
            ReportLine::new(style, format!("{prefix}{segment}"))
        })
        .collect()
}

pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split_at = word
                .char_indices()
                .nth(width)
                .map(|(index, _)| index)
                .unwrap_or(word.len());
            lines.push(word[..split_at].to_string());
            word = &word[split_at..];
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_text_breaks_on_word_boundaries() {
        let wrapped = wrap_text("one two three four five", 9);
        assert_eq!(wrapped, vec!["one two", "three", "four five"]);
    }

    #[test]
    fn wrap_text_hard_splits_long_words() {
        let wrapped = wrap_text("abcdefghij xy", 4);
        assert_eq!(wrapped, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn wrap_text_keeps_empty_input_as_single_line() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[test]
    fn bullets_indent_continuation_lines() {
        let long = "word ".repeat(40);
        let wrapped = wrap_line(ReportLine::new(LineStyle::Bullet, long.trim()));
        assert!(wrapped.len() > 1);
        assert!(wrapped[0].text.starts_with("- "));
        assert!(wrapped[1].text.starts_with("  "));
    }

    #[test]
    fn paginate_continues_overflowing_sections() {
        let lines = (0..100)
            .map(|index| ReportLine::new(LineStyle::Body, format!("line {index}")))
            .collect();
        let pages = paginate("Overflow", lines);

        assert!(pages.len() > 1);
        assert_eq!(pages[0].title, "Overflow");
        assert_eq!(pages[1].title, "Overflow (continued)");
        let total: usize = pages.iter().map(|page| page.lines.len()).sum();
        assert_eq!(total, 100);
    }
}
