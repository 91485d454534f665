//! ATS score indicator. A fixed placeholder, not a scoring algorithm.

use serde::Serialize;

pub const PLACEHOLDER_SCORE: u32 = 85;
pub const MAX_SCORE: u32 = 100;
pub const ADVISORY_TIP: &str = "Add more keywords from the job description!";

#[derive(Debug, Clone, Serialize)]
pub struct AtsReport {
    pub score: u32,
    pub max_score: u32,
    pub tip: &'static str,
    pub message: String,
}

pub fn placeholder_report() -> AtsReport {
    AtsReport {
        score: PLACEHOLDER_SCORE,
        max_score: MAX_SCORE,
        tip: ADVISORY_TIP,
        message: format!("ATS Score: {PLACEHOLDER_SCORE}/{MAX_SCORE}. Tip: {ADVISORY_TIP}"),
    }
}
