//! HTML preview. Renders without any required fields; all user text is escaped.

use std::borrow::Cow;

use serde::Deserialize;

use crate::models::resume::ResumeData;
use crate::render::social_links;

pub const EMPTY_SUMMARY_PLACEHOLDER: &str = "No summary generated yet.";

/// Preview-only switches. Nothing here reaches the exported artifacts.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PreviewOptions {
    #[serde(default)]
    pub dark_mode: bool,
}

pub fn preview_html(data: &ResumeData, options: PreviewOptions) -> String {
    let contact = &data.contact;
    let mut html = String::with_capacity(1024);

    let palette = if options.dark_mode {
        " background-color: #1e1e1e; color: white;"
    } else {
        ""
    };
    html.push_str(&format!(
        "<div class=\"resume-preview\" style=\"border: 1px solid #ccc; padding: 20px; \
         border-radius: 10px; font-family: {};{palette}\">\n",
        data.style.font.as_str()
    ));
    html.push_str(&format!(
        "<h1 style=\"color: {};\">{}</h1>\n",
        data.style.theme.css_color(),
        html_escape(&contact.name)
    ));
    html.push_str(&format!(
        "<p>{} | {} | {}</p>\n",
        html_escape(&contact.email),
        html_escape(&contact.phone),
        html_escape(&contact.location)
    ));

    let links = social_links(contact);
    if !links.is_empty() {
        let escaped: Vec<Cow<'_, str>> = links.iter().map(|l| html_escape(l)).collect();
        html.push_str(&format!("<p>{}</p>\n", escaped.join(" | ")));
    }

    let summary = if data.summary.trim().is_empty() {
        Cow::Borrowed(EMPTY_SUMMARY_PLACEHOLDER)
    } else {
        html_escape(&data.summary)
    };
    html.push_str("<h3>Summary</h3>\n");
    html.push_str(&format!("<p>{summary}</p>\n"));

    html.push_str("<h3>Experience</h3>\n<ul>\n");
    for exp in &data.experiences {
        html.push_str(&format!(
            "<li><b>{}</b> at {} ({})<br>{}</li>\n",
            html_escape(&exp.job_title),
            html_escape(&exp.company),
            html_escape(&exp.duration),
            html_escape(&exp.description)
        ));
    }
    html.push_str("</ul>\n</div>\n");

    html
}

#[inline]
fn html_escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['<', '>', '&', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}
