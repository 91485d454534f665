// Prompt text for the professional-summary request.

/// Summary prompt template. Replace `{skills}` before sending.
pub const SUMMARY_PROMPT_TEMPLATE: &str = "Write a professional resume summary for a candidate \
    with the following skills: {skills}. Keep it concise, ATS-optimized, avoid first person \
    and do not open with the candidate's name.";

/// Fallback summary template. Replace `{skills}` before use.
pub const FALLBACK_SUMMARY_TEMPLATE: &str = "A skilled professional with expertise in {skills}.";
