use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use super::layout::{LineStyle, ReportDocument, ReportPage};
use super::views::RenderFailure;

const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 54;

pub(crate) fn encode(document: &ReportDocument) -> Result<Vec<u8>, RenderFailure> {
    if document.pages.is_empty() {
        return Err(RenderFailure::Empty);
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let total = document.pages.len();
    let mut kids = Vec::with_capacity(total);
    for (index, page) in document.pages.iter().enumerate() {
        let number = index + 1;
        let content = page_content(page, number, total, &document.footer);
        let encoded = content.encode().map_err(|err| RenderFailure::Encode {
            page: number,
            detail: err.to_string(),
        })?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(total as i64),
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH),
            Object::Integer(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(pdf_text(&document.title)),
        "Producer" => Object::string_literal("sale-advisor"),
        "CreationDate" => Object::string_literal(format!(
            "D:{}Z",
            document.generated_at.format("%Y%m%d%H%M%S")
        )),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|err| RenderFailure::Write(err.to_string()))?;
    Ok(bytes)
}

fn page_content(page: &ReportPage, number: usize, total: usize, footer: &str) -> Content {
    let mut operations = vec![Operation::new("BT", vec![])];
    let mut cursor = PAGE_HEIGHT - MARGIN;

    cursor -= LineStyle::Title.leading();
    push_text(&mut operations, LineStyle::Title, MARGIN, cursor, &page.title);

    for line in &page.lines {
        cursor -= line.style.leading();
        if line.style == LineStyle::Spacer || line.text.is_empty() {
            continue;
        }
        push_text(&mut operations, line.style, MARGIN, cursor, &line.text);
    }

    push_text(
        &mut operations,
        LineStyle::Fine,
        MARGIN,
        MARGIN / 2,
        &format!("Page {number} of {total} | {footer}"),
    );
    operations.push(Operation::new("ET", vec![]));

    Content { operations }
}

fn push_text(operations: &mut Vec<Operation>, style: LineStyle, x: i64, y: i64, text: &str) {
    operations.push(Operation::new(
        "Tf",
        vec![style.font().into(), Object::Integer(style.font_size())],
    ));
    operations.push(Operation::new(
        "Tm",
        vec![
            Object::Integer(1),
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(1),
            Object::Integer(x),
            Object::Integer(y),
        ],
    ));
    operations.push(Operation::new(
        "Tj",
        vec![Object::string_literal(pdf_text(text))],
    ));
}

/// Standard Type1 fonts only cover single-byte text; fold the rest to ASCII.
fn pdf_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201c}' | '\u{201d}' => '"',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_text_folds_typography_to_ascii() {
        assert_eq!(pdf_text("60\u{2013}90 days"), "60-90 days");
        assert_eq!(pdf_text("owner\u{2019}s caf\u{e9}"), "owner's caf?");
        assert_eq!(pdf_text("tab\there"), "tab?here");
    }
}
