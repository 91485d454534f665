//! Per-template layout profiles for the PDF writer.
//!
//! All templates share one section flow. A profile only varies typography,
//! header alignment, spacing and whether headings pick up the theme accent.

use crate::models::resume::Template;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Sizes are in points, heights and gaps in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutProfile {
    pub title_size_pt: f32,
    pub title_cell_mm: f32,
    pub header_align: Align,
    pub contact_line_mm: f32,
    /// Gap between the header block and the first section.
    pub header_gap_mm: f32,
    /// Draw a thin rule under the header block.
    pub header_rule: bool,
    pub heading_size_pt: f32,
    pub heading_cell_mm: f32,
    /// Section headings use the theme accent instead of body black.
    pub heading_accent: bool,
    pub body_size_pt: f32,
    pub body_line_mm: f32,
    pub section_gap_mm: f32,
}

/// Centred header, 14 pt headings over a 12 pt body.
const MODERN: LayoutProfile = LayoutProfile {
    title_size_pt: 16.0,
    title_cell_mm: 10.0,
    header_align: Align::Center,
    contact_line_mm: 8.0,
    header_gap_mm: 10.0,
    header_rule: false,
    heading_size_pt: 14.0,
    heading_cell_mm: 10.0,
    heading_accent: false,
    body_size_pt: 12.0,
    body_line_mm: 7.0,
    section_gap_mm: 5.0,
};

pub fn layout_profile(template: Template) -> LayoutProfile {
    match template {
        Template::Modern => MODERN,
        Template::Classic => LayoutProfile {
            header_rule: true,
            ..MODERN
        },
        Template::Creative => LayoutProfile {
            title_size_pt: 20.0,
            title_cell_mm: 12.0,
            heading_accent: true,
            ..MODERN
        },
        Template::Minimalist => LayoutProfile {
            title_size_pt: 14.0,
            header_align: Align::Left,
            header_gap_mm: 6.0,
            heading_size_pt: 12.0,
            heading_cell_mm: 8.0,
            body_size_pt: 11.0,
            body_line_mm: 6.0,
            section_gap_mm: 3.0,
            ..MODERN
        },
    }
}
