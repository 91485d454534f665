//! Greedy word-wrap into fixed-width lines.
//!
//! Explicit newlines always break; a blank input line stays a blank output line.
//! Spacing inside a line and leading indentation are kept as typed; the gap at
//! a break is dropped, as is trailing whitespace. A word wider than the line is
//! split by characters.

use crate::layout::font_metrics::FontMetricTable;

/// Wraps `text` so that no line measures wider than `max_width_mm` at `size_pt`.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_mm: f32,
) -> Vec<String> {
    let measure = |s: &str| metrics.measure_mm(s, size_pt);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let words = spaced_words(paragraph.trim_end());
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for (gap, word) in words {
            let word_w = measure(word);
            let gap_w = measure(gap);

            if word_w > max_width_mm {
                // Flush what we have, then hard-split the long word.
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let (mut pieces, rest) = split_long_word(word, max_width_mm, &measure);
                lines.append(&mut pieces);
                current_width = measure(&rest);
                current = rest;
                continue;
            }

            if current.is_empty() {
                // Only the first word of a paragraph lands here; keep its indent if it fits.
                if gap_w + word_w <= max_width_mm {
                    current.push_str(gap);
                    current_width = gap_w + word_w;
                } else {
                    current_width = word_w;
                }
                current.push_str(word);
            } else if current_width + gap_w + word_w > max_width_mm {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push_str(gap);
                current.push_str(word);
                current_width += gap_w + word_w;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Splits a line into `(whitespace before, word)` pairs.
fn spaced_words(line: &str) -> Vec<(&str, &str)> {
    let mut pairs = Vec::new();
    let mut rest = line;
    while let Some(start) = rest.find(|c: char| !c.is_whitespace()) {
        let (gap, tail) = rest.split_at(start);
        let end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        let (word, next) = tail.split_at(end);
        pairs.push((gap, word));
        rest = next;
    }
    pairs
}

/// Splits a word into full-width pieces plus the trailing remainder.
fn split_long_word(
    word: &str,
    max_width_mm: f32,
    measure: &impl Fn(&str) -> f32,
) -> (Vec<String>, String) {
    let mut pieces = Vec::new();
    let mut current = String::new();

    for c in word.chars() {
        current.push(c);
        if measure(&current) > max_width_mm && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        }
    }

    (pieces, current)
}
