// Lexical Helpers
//
// This file is part of asm24.
// Copyright (C) 2026 Jeff Sharp
//
// asm24 is free software: you can redistribute it and/or modify it
// under the terms of the GNU General Public License as published
// by the Free Software Foundation, either version 3 of the License,
// or (at your option) any later version.
//
// asm24 is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See
// the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with asm24.  If not, see <http://www.gnu.org/licenses/>.

//! Small text primitives shared by the pre-processor and both passes (§4.1,
//! §4.2): trimming, word splitting, name validation, and integer parsing
//! with the machine's range checks.

use crate::word::{MAX_21BIT, MAX_24BIT, MIN_21BIT, MIN_24BIT};

pub const MAX_LINE_LENGTH: usize = 80;
pub const MAX_LABEL_LENGTH: usize = 31;

/// Splits `line` into its first whitespace-delimited token and the
/// (trimmed) remainder. Returns `None` for a blank line.
pub fn first_word(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.find(char::is_whitespace) {
        Some(idx) => Some((&trimmed[..idx], trimmed[idx..].trim_start())),
        None => Some((trimmed, "")),
    }
}

/// True if `line`, once trimmed, is exactly `word` with nothing else on it.
pub fn is_standalone_word(line: &str, word: &str) -> bool {
    line.trim() == word
}

/// True if `line`'s first token is `word` (used to detect `mcro`/`mcroend`
/// prefixes that carry trailing garbage, which is itself an error).
pub fn starts_with_word(line: &str, word: &str) -> bool {
    first_word(line).map(|(w, _)| w == word).unwrap_or(false)
}

/// True if `line` is empty/whitespace-only, once trimmed.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// True if `line`'s first non-whitespace character starts a full-line
/// comment.
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with(';')
}

/// Name validity per §3: 1..=31 characters, first alphabetic, the rest
/// alphanumeric (plus underscore when `allow_underscore`, reserved for
/// macro names).
pub fn is_valid_name_shape(name: &str, allow_underscore: bool) -> bool {
    if name.is_empty() || name.len() > MAX_LABEL_LENGTH {
        return false;
    }
    let mut chars = name.chars();
    let first = chars.next().unwrap();
    if !first.is_ascii_alphabetic() {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || (allow_underscore && c == '_'))
}

/// Strips a trailing `:` from a candidate label token, if present.
pub fn strip_label_colon(token: &str) -> Option<&str> {
    token.strip_suffix(':')
}

#[derive(Debug, PartialEq, Eq)]
pub enum IntParseError {
    NotANumber,
    OutOfRange,
}

/// Parses a single signed decimal integer and checks it against the 24-bit
/// `.data` range.
pub fn parse_data_integer(token: &str) -> Result<i32, IntParseError> {
    parse_ranged_integer(token, MIN_24BIT, MAX_24BIT)
}

/// Parses a single signed decimal integer and checks it against the 21-bit
/// immediate/relative range.
pub fn parse_immediate_integer(token: &str) -> Result<i32, IntParseError> {
    parse_ranged_integer(token, MIN_21BIT, MAX_21BIT)
}

fn parse_ranged_integer(token: &str, min: i32, max: i32) -> Result<i32, IntParseError> {
    let value: i32 = token.parse().map_err(|_| IntParseError::NotANumber)?;
    if value < min || value > max {
        return Err(IntParseError::OutOfRange);
    }
    Ok(value)
}

#[derive(Debug, PartialEq, Eq)]
pub enum IntListError {
    Empty,
    LeadingComma,
    TrailingComma,
    DoubleComma,
    Item { index: usize, error: IntParseError },
}

/// Splits a `.data` argument list on commas, rejecting leading, trailing,
/// and doubled commas, then parses and range-checks every item.
pub fn parse_data_integer_list(text: &str) -> Result<Vec<i32>, IntListError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(IntListError::Empty);
    }
    if text.starts_with(',') {
        return Err(IntListError::LeadingComma);
    }
    if text.ends_with(',') {
        return Err(IntListError::TrailingComma);
    }

    let mut values = Vec::new();
    for (index, raw) in text.split(',').enumerate() {
        let item = raw.trim();
        if item.is_empty() {
            return Err(IntListError::DoubleComma);
        }
        let value = parse_data_integer(item).map_err(|error| IntListError::Item { index, error })?;
        values.push(value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_word_splits_on_whitespace() {
        assert_eq!(Some(("mov", "r1, r2")), first_word("  mov   r1, r2"));
        assert_eq!(Some(("stop", "")), first_word("stop"));
        assert_eq!(None, first_word("   "));
    }

    #[test]
    fn standalone_word_detection() {
        assert!(is_standalone_word("  mcroend  ", "mcroend"));
        assert!(!is_standalone_word("mcroend extra", "mcroend"));
    }

    #[test]
    fn name_shape_rules() {
        assert!(is_valid_name_shape("LOOP", false));
        assert!(is_valid_name_shape("a1", false));
        assert!(!is_valid_name_shape("1a", false));
        assert!(!is_valid_name_shape("", false));
        assert!(!is_valid_name_shape("under_score", false));
        assert!(is_valid_name_shape("under_score", true));
        assert!(!is_valid_name_shape(&"x".repeat(32), false));
    }

    #[test]
    fn label_colon_stripping() {
        assert_eq!(Some("LOOP"), strip_label_colon("LOOP:"));
        assert_eq!(None, strip_label_colon("LOOP"));
    }

    #[test]
    fn data_integer_range_checks() {
        assert_eq!(Ok(8_388_607), parse_data_integer("8388607"));
        assert_eq!(Err(IntParseError::OutOfRange), parse_data_integer("8388608"));
        assert_eq!(Err(IntParseError::OutOfRange), parse_data_integer("-8388609"));
        assert_eq!(Err(IntParseError::NotANumber), parse_data_integer("abc"));
    }

    #[test]
    fn immediate_integer_range_checks() {
        assert_eq!(Ok(1_048_575), parse_immediate_integer("1048575"));
        assert_eq!(Err(IntParseError::OutOfRange), parse_immediate_integer("1048576"));
        assert_eq!(Err(IntParseError::OutOfRange), parse_immediate_integer("-1048577"));
    }

    #[test]
    fn data_list_rejects_malformed_commas() {
        assert_eq!(Err(IntListError::LeadingComma), parse_data_integer_list(",1,2"));
        assert_eq!(Err(IntListError::TrailingComma), parse_data_integer_list("1,2,"));
        assert_eq!(Err(IntListError::DoubleComma), parse_data_integer_list("1,,2"));
        assert_eq!(Err(IntListError::Empty), parse_data_integer_list("   "));
    }

    #[test]
    fn data_list_happy_path() {
        assert_eq!(Ok(vec![7, -1, 3]), parse_data_integer_list("7, -1, 3"));
    }

    #[test]
    fn data_list_reports_offending_index() {
        let err = parse_data_integer_list("1, abc, 3").unwrap_err();
        assert_eq!(IntListError::Item { index: 1, error: IntParseError::NotANumber }, err);
    }
}
