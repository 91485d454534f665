//! Templated cover letter. The candidate's name is the only substituted value;
//! the bracketed fields are left for the user to edit.

const COVER_LETTER_TEMPLATE: &str = "Dear Hiring Manager,\n\n\
    I am excited to apply for the [Job Title] position at [Company]. With my background in \
    [Field], I am confident in my ability to contribute to your team.\n\n\
    Sincerely,\n{name}";

pub fn templated_cover_letter(name: &str) -> String {
    COVER_LETTER_TEMPLATE.replace("{name}", name.trim())
}
