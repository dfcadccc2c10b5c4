//! Free-text option parsing
//!
//! One option per line, letters assigned by line position. Anything past the
//! fifth line is silently discarded — a documented limitation of the input
//! format, not something to repair here.

use std::collections::BTreeMap;

use crate::models::question::OptionLetter;

/// Parse option lines into a lettered option map
///
/// Splits on newlines, keeps the first five lines, trims surrounding
/// whitespace, and assigns `A..E` by line index. Blank lines keep their
/// letter slot (an empty option text is legal), so empty input yields a
/// single blank `A` entry exactly as splitting produces it.
pub fn parse_options(raw_text: &str) -> BTreeMap<OptionLetter, String> {
    let mut parsed = BTreeMap::new();

    for (idx, line) in raw_text
        .split('\n')
        .take(OptionLetter::MAX_OPTIONS)
        .enumerate()
    {
        if let Some(letter) = OptionLetter::from_index(idx) {
            parsed.insert(letter, line.trim().to_string());
        }
    }

    parsed
}

/// Render an option map back to the one-option-per-line form shown in the
/// editor, letter order
pub fn options_to_text(options: &BTreeMap<OptionLetter, String>) -> String {
    options
        .values()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
