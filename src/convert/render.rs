// Layout of the PDF documents.

use genpdf::elements::{Break, LinearLayout, Paragraph};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::render::Area;
use genpdf::style::{Color, Style};
use genpdf::{Alignment, Context, Element, Margins, Mm, PageDecorator, Position, RenderResult, Size};
use log::debug;
use std::path::Path;

use snafu::prelude::*;

use crate::convert::document::SubmissionDocument;
use crate::convert::*;

// Page margins, in millimeters.
const MARGIN_TOP: f64 = 18.0;
const MARGIN_SIDE: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 10.0;
// Height reserved at the bottom of each page for the footer.
const FOOTER_HEIGHT: f64 = 8.0;

const QUESTION_COLOR: Color = Color::Rgb(0x33, 0x33, 0x33);
const TITLE_RULE_COLOR: Color = Color::Rgb(0x88, 0x88, 0x88);
const SECTION_RULE_COLOR: Color = Color::Rgb(0xBB, 0xBB, 0xBB);

fn title_style() -> Style {
    Style::new().bold().with_font_size(16)
}

fn section_style() -> Style {
    Style::new().bold().with_font_size(13)
}

fn question_style() -> Style {
    Style::new().with_font_size(10).with_color(QUESTION_COLOR)
}

fn answer_style() -> Style {
    Style::new().with_font_size(11)
}

/// Prints `<title> - Page <n>` at the bottom right of every page.
struct FooterDecorator {
    title: String,
    page: usize,
}

impl FooterDecorator {
    fn new(title: &str) -> FooterDecorator {
        FooterDecorator {
            title: title.to_string(),
            page: 0,
        }
    }
}

impl PageDecorator for FooterDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &Context,
        mut area: Area<'a>,
        style: Style,
    ) -> Result<Area<'a>, genpdf::error::Error> {
        self.page += 1;
        area.add_margins(Margins::trbl(
            MARGIN_TOP,
            MARGIN_SIDE,
            MARGIN_BOTTOM,
            MARGIN_SIDE,
        ));

        let mut footer_area = area.clone();
        footer_area.add_offset(Position::new(
            0,
            area.size().height - Mm::from(FOOTER_HEIGHT),
        ));
        let mut footer = Paragraph::new(footer_text(&self.title, self.page))
            .aligned(Alignment::Right)
            .styled(Style::new().with_font_size(9));
        footer.render(context, footer_area, style)?;

        area.add_margins(Margins::trbl(0, 0, FOOTER_HEIGHT, 0));
        Ok(area)
    }
}

/// The footer of a page, `page` counting from 1.
pub fn footer_text(title: &str, page: usize) -> String {
    format!("{} - Page {}", title, page)
}

/// A horizontal line across the page.
struct Rule {
    color: Color,
}

impl Rule {
    fn new(color: Color) -> Rule {
        Rule { color }
    }
}

impl Element for Rule {
    fn render(
        &mut self,
        _context: &Context,
        area: Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, genpdf::error::Error> {
        let width = area.size().width;
        let line_style = Style::new().with_color(self.color);
        area.draw_line(
            vec![Position::new(0, 1), Position::new(width, 1)],
            line_style,
        );
        Ok(RenderResult {
            size: Size::new(width, 2),
            has_more: false,
        })
    }
}

/// A text that may span several lines.
fn text_block(text: &str, style: Style) -> LinearLayout {
    let mut layout = LinearLayout::vertical();
    for line in text.lines() {
        layout.push(Paragraph::new(line.to_string()).styled(style));
    }
    layout
}

fn push_items(doc: &mut genpdf::Document, items: &[(String, String)]) {
    for (question, answer) in items {
        doc.push(text_block(question, question_style()).padded(Margins::trbl(2, 0, 0.5, 0)));
        doc.push(text_block(answer, answer_style()).padded(Margins::trbl(0, 0, 2, 2)));
    }
}

/// A section of a document, below the metadata.
#[derive(Debug, PartialEq)]
pub struct SectionPlan<'a> {
    pub heading: String,
    pub items: &'a [(String, String)],
    /// A rule is drawn under the heading.
    pub rule: bool,
}

/// The sections of a document, in order: one `File <n>` per file block,
/// `General` unless it is empty, and always `Data Quality`.
pub fn section_plan(document: &SubmissionDocument) -> Vec<SectionPlan<'_>> {
    let mut plan: Vec<SectionPlan> = document
        .files
        .iter()
        .enumerate()
        .map(|(idx, block)| SectionPlan {
            heading: format!("File {}", idx + 1),
            items: block,
            rule: true,
        })
        .collect();
    if !document.general.is_empty() {
        plan.push(SectionPlan {
            heading: "General".to_string(),
            items: &document.general,
            rule: false,
        });
    }
    plan.push(SectionPlan {
        heading: "Data Quality".to_string(),
        items: &document.data_quality,
        rule: true,
    });
    plan
}

fn push_section(doc: &mut genpdf::Document, section: &SectionPlan) {
    doc.push(Break::new(0.5));
    doc.push(Paragraph::new(section.heading.clone()).styled(section_style()));
    if section.rule {
        doc.push(Rule::new(SECTION_RULE_COLOR));
    }
    push_items(doc, section.items);
}

/// Builds the layout of a document.
pub fn layout_document(
    document: &SubmissionDocument,
    fonts: &FontFamily<FontData>,
) -> genpdf::Document {
    let mut doc = genpdf::Document::new(fonts.clone());
    doc.set_title(document.title.clone());
    doc.set_paper_size(genpdf::PaperSize::A4);
    doc.set_font_size(11);
    doc.set_page_decorator(FooterDecorator::new(&document.title));

    doc.push(text_block(&document.title, title_style()));
    doc.push(Rule::new(TITLE_RULE_COLOR));
    doc.push(Break::new(0.5));

    push_items(&mut doc, &document.metadata);

    for section in section_plan(document) {
        push_section(&mut doc, &section);
    }
    doc
}

/// Writes the document to `path`.
pub fn render_pdf(
    document: &SubmissionDocument,
    fonts: &FontFamily<FontData>,
    path: &Path,
) -> ConvertResult<()> {
    debug!("render_pdf: {:?} -> {:?}", document.title, path);
    let doc = layout_document(document, fonts);
    doc.render_to_file(path).context(RenderingSnafu {
        path: path.display().to_string(),
    })
}
