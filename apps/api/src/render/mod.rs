//! Resume document renderer.
//!
//! One `ResumeData` in, three artifacts out: HTML preview, PDF bytes, plain text.
//! Every output is a pure function of the same borrowed data, so they cannot
//! drift apart. Section and contact-line assembly lives here and is shared.

pub mod html;
pub mod pdf;
pub mod text;

use std::fmt;

use thiserror::Error;

use crate::models::resume::{Contact, ResumeData};
use crate::summary::strip_fallback_marker;

pub use html::{preview_html, PreviewOptions};
pub use pdf::export_pdf;
pub use text::export_text;

pub const PDF_MIME: &str = "application/pdf";
pub const TEXT_MIME: &str = "text/plain";

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// A field that must be present before anything can be exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Name,
    Email,
    Summary,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequiredField::Name => "name",
            RequiredField::Email => "email",
            RequiredField::Summary => "summary",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required field(s): {}", join_fields(.missing))]
pub struct ValidationError {
    pub missing: Vec<RequiredField>,
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("the {section} text contains '{character}', which the PDF fonts cannot encode")]
    Unencodable {
        section: &'static str,
        character: char,
    },

    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF serialization failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

// ────────────────────────────────────────────────────────────────────────────
// Shared assembly
// ────────────────────────────────────────────────────────────────────────────

/// Checks the fields both export paths require.
pub fn validate_for_export(data: &ResumeData) -> Result<(), ValidationError> {
    let mut missing = Vec::new();
    if data.contact.name.trim().is_empty() {
        missing.push(RequiredField::Name);
    }
    if data.contact.email.trim().is_empty() {
        missing.push(RequiredField::Email);
    }
    // A bare fallback marker prints as nothing.
    if strip_fallback_marker(&data.summary).is_empty() {
        missing.push(RequiredField::Summary);
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { missing })
    }
}

/// `LinkedIn: …` / `GitHub: …` labels, only for fields that are filled in.
pub fn social_links(contact: &Contact) -> Vec<String> {
    let mut links = Vec::new();
    if !contact.linkedin.trim().is_empty() {
        links.push(format!("LinkedIn: {}", contact.linkedin.trim()));
    }
    if !contact.github.trim().is_empty() {
        links.push(format!("GitHub: {}", contact.github.trim()));
    }
    links
}

/// `email | phone | location`, followed by any social links.
pub fn contact_line(contact: &Contact) -> String {
    let mut line = format!("{} | {} | {}", contact.email, contact.phone, contact.location);
    for link in social_links(contact) {
        line.push_str(" | ");
        line.push_str(&link);
    }
    line
}

/// Document sections in their fixed export order, with content as it will be printed.
/// Empty content is kept here; writers skip it.
pub fn export_sections(data: &ResumeData) -> [(&'static str, String); 6] {
    let experience = data
        .experiences
        .iter()
        .map(|exp| {
            format!(
                "{} at {} ({})\n{}",
                exp.job_title, exp.company, exp.duration, exp.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let education = data
        .educations
        .iter()
        .map(|edu| format!("{} from {} ({})", edu.degree, edu.university, edu.duration))
        .collect::<Vec<_>>()
        .join("\n");

    [
        ("Summary", strip_fallback_marker(&data.summary).to_string()),
        ("Skills", data.skills.clone()),
        ("Experience", experience),
        ("Education", education),
        ("Projects", data.projects.clone()),
        ("Cover Letter", data.cover_letter.clone()),
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Entry points
// ────────────────────────────────────────────────────────────────────────────

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RenderedResume {
    pub html: String,
    pub pdf_bytes: Vec<u8>,
    pub text: String,
}

/// Renders all three artifacts from the same data.
#[allow(dead_code)]
pub fn render(data: &ResumeData) -> Result<RenderedResume, ExportError> {
    validate_for_export(data)?;
    Ok(RenderedResume {
        html: preview_html(data, PreviewOptions::default()),
        pdf_bytes: export_pdf(data)?,
        text: export_text(data)?,
    })
}

/// `Jane Doe` → `Jane_Doe_Resume`.
fn artifact_stem(name: &str) -> String {
    format!("{}_Resume", name.trim().replace(' ', "_"))
}

pub fn pdf_file_name(name: &str) -> String {
    format!("{}.pdf", artifact_stem(name))
}

pub fn text_file_name(name: &str) -> String {
    format!("{}.txt", artifact_stem(name))
}


#[cfg(test)]
mod tests {
    use super::test_support::sample_resume;
    use super::*;
    use crate::summary::fallback_summary;

    #[test]
    fn test_render_produces_all_outputs() {
        let rendered = render(&sample_resume()).unwrap();
        assert!(!rendered.html.is_empty());
        assert!(!rendered.pdf_bytes.is_empty());
        assert!(!rendered.text.is_empty());
    }

    #[test]
    fn test_render_is_deterministic() {
        let data = sample_resume();
        let first = render(&data).unwrap();
        let second = render(&data).unwrap();
        assert_eq!(first.pdf_bytes, second.pdf_bytes);
        assert_eq!(first.html, second.html);
        assert_eq!(first.text, second.text);
    }

    #[test]
    fn test_render_does_not_mutate_input() {
        let data = sample_resume();
        let before = data.clone();
        let _ = render(&data).unwrap();
        assert_eq!(data, before);
    }

    #[test]
    fn test_validation_lists_every_missing_field() {
        let data = ResumeData::default();
        let err = validate_for_export(&data).unwrap_err();
        assert_eq!(
            err.missing,
            vec![RequiredField::Name, RequiredField::Email, RequiredField::Summary]
        );
        assert_eq!(
            err.to_string(),
            "missing required field(s): name, email, summary"
        );
    }

    #[test]
    fn test_empty_summary_blocks_render() {
        let mut data = sample_resume();
        data.summary = String::new();
        match render(&data) {
            Err(ExportError::Validation(e)) => assert_eq!(e.missing, vec![RequiredField::Summary]),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_marker_only_summary_counts_as_missing() {
        let mut data = sample_resume();
        data.summary = " (Fallback) ".to_string();
        let err = validate_for_export(&data).unwrap_err();
        assert_eq!(err.missing, vec![RequiredField::Summary]);
        assert!(matches!(render(&data), Err(ExportError::Validation(_))));
    }

    #[test]
    fn test_contact_line_only_includes_present_links() {
        let data = sample_resume();
        let line = contact_line(&data.contact);
        assert_eq!(
            line,
            "jane@example.com | +1 123-456-7890 | New York, USA | GitHub: https://github.com/x"
        );
        assert!(!line.contains("LinkedIn:"));
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let names: Vec<&str> = export_sections(&sample_resume())
            .iter()
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(
            names,
            vec!["Summary", "Skills", "Experience", "Education", "Projects", "Cover Letter"]
        );
    }

    #[test]
    fn test_experience_section_joins_title_line_and_description() {
        let sections = export_sections(&sample_resume());
        assert_eq!(sections[2].1, "Engineer at Acme (2020-2022)\nBuilt things");
        assert_eq!(
            sections[3].1,
            "BSc Computer Science from State University (2016-2020)"
        );
    }

    #[test]
    fn test_summary_section_strips_fallback_marker() {
        let mut data = sample_resume();
        data.summary = fallback_summary("Python, SQL");
        let sections = export_sections(&data);
        assert_eq!(
            sections[0].1,
            "A skilled professional with expertise in Python, SQL."
        );
    }

    #[test]
    fn test_artifact_file_names() {
        assert_eq!(pdf_file_name("Jane Q Doe"), "Jane_Q_Doe_Resume.pdf");
        assert_eq!(text_file_name("Jane Doe"), "Jane_Doe_Resume.txt");
    }
}
