//! Plain-text export: name, email and summary only. Other sections are PDF-only.

use crate::models::resume::ResumeData;
use crate::render::{validate_for_export, ExportError};
use crate::summary::strip_fallback_marker;

pub fn export_text(data: &ResumeData) -> Result<String, ExportError> {
    validate_for_export(data)?;
    Ok(format!(
        "Name: {}\nEmail: {}\n\nSummary:\n{}",
        data.contact.name,
        data.contact.email,
        strip_fallback_marker(&data.summary)
    ))
}
