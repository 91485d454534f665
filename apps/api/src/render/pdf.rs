//! Paginated PDF export.
//!
//! Geometry is A4 in millimetres with a 10 mm margin; content breaks onto a new
//! page 20 mm above the bottom edge. Text uses the standard Type1 fonts with
//! WinAnsi encoding, so nothing is embedded. The document carries no dates or
//! ids, so the same data always yields the same bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use tracing::debug;

use crate::layout::font_metrics::MM_PER_PT;
use crate::layout::{get_metrics, layout_profile, wrap_text, Align, FontMetricTable, LayoutProfile, PdfFont};
use crate::models::resume::ResumeData;
use crate::render::{contact_line, export_sections, validate_for_export, ExportError, RenderError};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const BREAK_MARGIN_MM: f32 = 20.0;
/// Horizontal padding inside a text cell.
const CELL_PADDING_MM: f32 = 1.0;
const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

const TITLE_RGB: (f32, f32, f32) = (0.0, 0.0, 0.5);
const BODY_RGB: (f32, f32, f32) = (0.0, 0.0, 0.0);
const RULE_GRAY: f32 = 0.6;

const REGULAR_FONT_KEY: &str = "F1";
const BOLD_FONT_KEY: &str = "F2";

/// Validates `data` and renders it to PDF bytes.
pub fn export_pdf(data: &ResumeData) -> Result<Vec<u8>, ExportError> {
    validate_for_export(data)?;
    let bytes = write_document(data)?;
    debug!("Rendered PDF: {} bytes", bytes.len());
    Ok(bytes)
}

fn write_document(data: &ResumeData) -> Result<Vec<u8>, RenderError> {
    let profile = layout_profile(data.style.template);
    let font = PdfFont::resolve(data.style.font);
    let accent = data.style.theme.accent_rgb();
    let mut writer = PdfWriter::new(font);

    // Header
    writer.set_font(true, profile.title_size_pt);
    writer.set_text_color(TITLE_RGB);
    writer.cell(profile.title_cell_mm, data.contact.name.trim(), profile.header_align, "name")?;

    writer.set_font(false, profile.body_size_pt);
    writer.set_text_color(BODY_RGB);
    writer.multi_cell(
        profile.contact_line_mm,
        &contact_line(&data.contact),
        profile.header_align,
        "contact",
    )?;
    if profile.header_rule {
        writer.rule();
    }
    writer.ln(profile.header_gap_mm);

    // Sections, fixed order, empty ones skipped
    for (heading, content) in export_sections(data) {
        if content.trim().is_empty() {
            continue;
        }
        write_section(&mut writer, &profile, accent, heading, &content)?;
    }

    writer.finish()
}

fn write_section(
    writer: &mut PdfWriter,
    profile: &LayoutProfile,
    accent: (f32, f32, f32),
    heading: &'static str,
    content: &str,
) -> Result<(), RenderError> {
    writer.set_font(true, profile.heading_size_pt);
    writer.set_text_color(if profile.heading_accent { accent } else { BODY_RGB });
    writer.cell(profile.heading_cell_mm, heading, Align::Left, heading)?;

    writer.set_font(false, profile.body_size_pt);
    writer.set_text_color(BODY_RGB);
    writer.multi_cell(profile.body_line_mm, content, Align::Left, heading)?;
    writer.ln(profile.section_gap_mm);
    Ok(())
}

fn pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

// ────────────────────────────────────────────────────────────────────────────
// Writer
// ────────────────────────────────────────────────────────────────────────────

/// Cursor-based page builder: cells advance `y` downward from the top margin.
struct PdfWriter {
    font: PdfFont,
    metrics: &'static FontMetricTable,
    pages: Vec<Vec<Operation>>,
    /// Distance from the top edge, in mm.
    y: f32,
    bold: bool,
    size_pt: f32,
    color: (f32, f32, f32),
}

impl PdfWriter {
    fn new(font: PdfFont) -> Self {
        Self {
            font,
            metrics: get_metrics(font),
            pages: vec![Vec::new()],
            y: MARGIN_MM,
            bold: false,
            size_pt: 12.0,
            color: BODY_RGB,
        }
    }

    fn set_font(&mut self, bold: bool, size_pt: f32) {
        self.bold = bold;
        self.size_pt = size_pt;
    }

    fn set_text_color(&mut self, rgb: (f32, f32, f32)) {
        self.color = rgb;
    }

    fn ln(&mut self, h: f32) {
        self.y += h;
    }

    fn ensure_room(&mut self, h: f32) {
        if self.y + h > PAGE_HEIGHT_MM - BREAK_MARGIN_MM {
            self.pages.push(Vec::new());
            self.y = MARGIN_MM;
        }
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        // `pages` starts with one page and only grows.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// One line of text in a cell of height `h`.
    fn cell(&mut self, h: f32, text: &str, align: Align, section: &'static str) -> Result<(), RenderError> {
        self.ensure_room(h);
        if !text.is_empty() {
            self.draw_text(h, text, align, section)?;
        }
        self.y += h;
        Ok(())
    }

    /// Wrapped text, one cell of height `h` per line.
    fn multi_cell(&mut self, h: f32, text: &str, align: Align, section: &'static str) -> Result<(), RenderError> {
        let max_width = CONTENT_WIDTH_MM - 2.0 * CELL_PADDING_MM;
        for line in wrap_text(text, self.metrics, self.size_pt, max_width) {
            self.cell(h, &line, align, section)?;
        }
        Ok(())
    }

    fn draw_text(&mut self, h: f32, text: &str, align: Align, section: &'static str) -> Result<(), RenderError> {
        let encoded = encode_win_ansi(text, section)?;
        let width = self.metrics.measure_mm(text, self.size_pt);
        let x = match align {
            Align::Left => MARGIN_MM + CELL_PADDING_MM,
            Align::Center => MARGIN_MM + ((CONTENT_WIDTH_MM - width) / 2.0).max(CELL_PADDING_MM),
        };
        let baseline = self.y + 0.5 * h + 0.3 * self.size_pt * MM_PER_PT;
        let font_key = if self.bold { BOLD_FONT_KEY } else { REGULAR_FONT_KEY };
        let (r, g, b) = self.color;
        let size_pt = self.size_pt;

        self.ops().extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font_key.into(), size_pt.into()]),
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new("Td", vec![pt(x).into(), pt(PAGE_HEIGHT_MM - baseline).into()]),
            Operation::new("Tj", vec![Object::String(encoded, StringFormat::Literal)]),
            Operation::new("ET", vec![]),
        ]);
        Ok(())
    }

    /// Thin gray rule across the content width at the current position.
    fn rule(&mut self) {
        let y = pt(PAGE_HEIGHT_MM - self.y - 1.0);
        self.ops().extend([
            Operation::new("q", vec![]),
            Operation::new("w", vec![0.5f32.into()]),
            Operation::new("RG", vec![RULE_GRAY.into(), RULE_GRAY.into(), RULE_GRAY.into()]),
            Operation::new("m", vec![pt(MARGIN_MM).into(), y.into()]),
            Operation::new("l", vec![pt(PAGE_WIDTH_MM - MARGIN_MM).into(), y.into()]),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    fn finish(self) -> Result<Vec<u8>, RenderError> {
        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => self.font.base_font(false),
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => self.font.base_font(true),
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                REGULAR_FONT_KEY => regular_id,
                BOLD_FONT_KEY => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    pt(PAGE_WIDTH_MM).into(),
                    pt(PAGE_HEIGHT_MM).into(),
                ],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Producer" => Object::string_literal("resume-api"),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Text encoding
// ────────────────────────────────────────────────────────────────────────────

/// Encodes `text` for a WinAnsi-encoded standard font.
///
/// Latin-1 maps straight through; the typographic characters WinAnsi places in
/// 0x80..=0x9F (curly quotes, dashes, bullet, euro, ...) are translated. Tabs and
/// line breaks left in single-line cells print as spaces. Anything else cannot be
/// drawn and fails the whole export.
fn encode_win_ansi(text: &str, section: &'static str) -> Result<Vec<u8>, RenderError> {
    text.chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' => Ok(b' '),
            '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => Ok(c as u8),
            _ => win_ansi_high_byte(c).ok_or(RenderError::Unencodable {
                section,
                character: c,
            }),
        })
        .collect()
}

fn win_ansi_high_byte(c: char) -> Option<u8> {
    let byte = match c {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
