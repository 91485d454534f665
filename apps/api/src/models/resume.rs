use serde::{Deserialize, Serialize};

/// Input bounds for the repeatable form sections.
pub const MIN_EXPERIENCES: usize = 1;
pub const MAX_EXPERIENCES: usize = 5;
pub const MIN_EDUCATIONS: usize = 1;
pub const MAX_EDUCATIONS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
}

/// One work-history slot. Every field is optional; an all-empty slot still counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub job_title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub university: String,
    pub duration: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Template {
    #[default]
    Modern,
    Classic,
    Creative,
    Minimalist,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Blue,
    Black,
    Green,
    Professional,
}

impl Theme {
    /// CSS colour keyword for the preview heading.
    ///
    /// `professional` is not a CSS colour, so it maps onto `navy`.
    pub fn css_color(self) -> &'static str {
        match self {
            Theme::Blue => "blue",
            Theme::Black => "black",
            Theme::Green => "green",
            Theme::Professional => "navy",
        }
    }

    /// Accent colour as RGB components in 0.0..=1.0, used by the PDF writer.
    pub fn accent_rgb(self) -> (f32, f32, f32) {
        match self {
            Theme::Blue => (0.0, 0.0, 0.80),
            Theme::Black => (0.0, 0.0, 0.0),
            Theme::Green => (0.0, 0.50, 0.0),
            Theme::Professional => (0.0, 0.0, 0.50),
        }
    }
}

/// Logical font family picked by the user. Not every name exists in the PDF engine,
/// see `layout::font_metrics::PdfFont::resolve`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontChoice {
    #[default]
    Arial,
    #[serde(rename = "Times New Roman")]
    TimesNewRoman,
    Helvetica,
    Calibri,
}

impl FontChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            FontChoice::Arial => "Arial",
            FontChoice::TimesNewRoman => "Times New Roman",
            FontChoice::Helvetica => "Helvetica",
            FontChoice::Calibri => "Calibri",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub template: Template,
    pub theme: Theme,
    pub font: FontChoice,
}

/// The single source of truth for every rendered output (preview, PDF, text).
///
/// Assembled fresh from the session on each render; renderers only borrow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    pub contact: Contact,
    /// Comma-separated free text, kept verbatim.
    pub skills: String,
    /// Empty, generated text, or fallback text carrying `summary::FALLBACK_MARKER`.
    pub summary: String,
    pub experiences: Vec<Experience>,
    pub educations: Vec<Education>,
    pub projects: String,
    pub cover_letter: String,
    pub style: Style,
}

impl Default for ResumeData {
    fn default() -> Self {
        Self {
            contact: Contact::default(),
            skills: String::new(),
            summary: String::new(),
            experiences: vec![Experience::default()],
            educations: vec![Education::default()],
            projects: String::new(),
            cover_letter: String::new(),
            style: Style::default(),
        }
    }
}
