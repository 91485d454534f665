// Page layout primitives for the PDF writer: font tables, line wrapping and
// template profiles. Pure and synchronous.

pub mod font_metrics;
pub mod template;
pub mod wrap;

pub use font_metrics::{get_metrics, FontMetricTable, PdfFont};
pub use template::{layout_profile, Align, LayoutProfile};
pub use wrap::wrap_text;
