//! Font resolution and static glyph-width tables for the PDF writer.
//!
//! The PDF side only uses the standard Type1 fonts every viewer ships
//! (Helvetica and Times), so nothing is embedded. Widths are the regular-weight
//! AFM advances in 1/1000 em, covering ASCII 0x20..=0x7E. Index = (char as usize) - 32.
//! Bold text is measured with the regular table; headings never wrap, so the
//! small difference only shifts centred titles by a fraction of a millimetre.

use crate::models::resume::FontChoice;

/// Millimetres per PDF point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

/// Font families the PDF engine can draw without embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PdfFont {
    Helvetica,
    Times,
}

impl PdfFont {
    /// Maps the user's logical font onto a PDF-safe family.
    ///
    /// Fixed lookup: Arial and Calibri have no standard PDF face and fall back to
    /// Helvetica, the Arial-metric equivalent.
    pub fn resolve(choice: FontChoice) -> Self {
        match choice {
            FontChoice::Arial => PdfFont::Helvetica,
            FontChoice::TimesNewRoman => PdfFont::Times,
            FontChoice::Helvetica => PdfFont::Helvetica,
            FontChoice::Calibri => PdfFont::Helvetica,
        }
    }

    /// The `/BaseFont` name written into the font dictionary.
    pub fn base_font(self, bold: bool) -> &'static str {
        match (self, bold) {
            (PdfFont::Helvetica, false) => "Helvetica",
            (PdfFont::Helvetica, true) => "Helvetica-Bold",
            (PdfFont::Times, false) => "Times-Roman",
            (PdfFont::Times, true) => "Times-Bold",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font family.
///
/// `widths[i]` = advance of ASCII character `(i + 32)` in 1/1000 em.
pub struct FontMetricTable {
    widths: [u16; 95],
    /// Fallback advance for Latin-1 characters above 0x7E.
    pub average_char_width: u16,
}

impl FontMetricTable {
    /// Width of `s` in em units.
    pub fn measure_em(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                let w = if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                };
                f32::from(w) / 1000.0
            })
            .sum()
    }

    /// Width of `s` in millimetres when set at `size_pt`.
    pub fn measure_mm(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_em(s) * size_pt * MM_PER_PT
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    average_char_width: 556,
};

static TIMES_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
        // 0    1    2    3    4    5    6    7    8    9
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        // :    ;    <    =    >    ?    @
        278, 278, 564, 564, 564, 444, 921,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 469, 500, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
        // {    |    }    ~
        480, 200, 480, 541,
    ],
    average_char_width: 500,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(font: PdfFont) -> &'static FontMetricTable {
    match font {
        PdfFont::Helvetica => &HELVETICA_TABLE,
        PdfFont::Times => &TIMES_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibri_resolves_to_arial_equivalent() {
        assert_eq!(PdfFont::resolve(FontChoice::Calibri), PdfFont::Helvetica);
        assert_eq!(
            PdfFont::resolve(FontChoice::Calibri),
            PdfFont::resolve(FontChoice::Arial)
        );
    }

    #[test]
    fn test_every_choice_resolves_to_a_standard_font() {
        let standard = ["Helvetica", "Helvetica-Bold", "Times-Roman", "Times-Bold"];
        for choice in [
            FontChoice::Arial,
            FontChoice::TimesNewRoman,
            FontChoice::Helvetica,
            FontChoice::Calibri,
        ] {
            let font = PdfFont::resolve(choice);
            assert!(standard.contains(&font.base_font(false)));
            assert!(standard.contains(&font.base_font(true)));
        }
    }

    #[test]
    fn test_times_new_roman_resolves_to_times() {
        assert_eq!(PdfFont::resolve(FontChoice::TimesNewRoman), PdfFont::Times);
        assert_eq!(PdfFont::Times.base_font(false), "Times-Roman");
    }

    #[test]
    fn test_measure_em_empty_returns_zero() {
        assert_eq!(get_metrics(PdfFont::Helvetica).measure_em(""), 0.0);
    }

    #[test]
    fn test_measure_em_ascii() {
        // "Rust" = R(722) + u(556) + s(500) + t(278) = 2.056em
        let width = get_metrics(PdfFont::Helvetica).measure_em("Rust");
        assert!((width - 2.056).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_measure_non_ascii_falls_back_to_average() {
        let metrics = get_metrics(PdfFont::Times);
        let width = metrics.measure_em("é");
        assert!((width - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_measure_mm_scales_with_size() {
        let metrics = get_metrics(PdfFont::Helvetica);
        let small = metrics.measure_mm("Experience", 12.0);
        let large = metrics.measure_mm("Experience", 24.0);
        assert!((large - 2.0 * small).abs() < 1e-3);
    }

    #[test]
    fn test_times_narrower_than_helvetica() {
        let text = "Built distributed systems";
        assert!(
            get_metrics(PdfFont::Times).measure_em(text)
                < get_metrics(PdfFont::Helvetica).measure_em(text)
        );
    }
}
