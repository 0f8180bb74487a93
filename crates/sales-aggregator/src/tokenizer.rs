//! Line and field splitting for the sales log.
//!
//! Rows end at `\n` and fields end at `,`. There is no quoting: a comma inside
//! an item name shifts every later column of that row.

use crate::record::Record;

/// Whitespace as understood by field trimming, byte-order mark included
fn is_trim_char(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Splits `text` into lines on `\n`.
///
/// A final line without a terminator is kept; a trailing `\n` does not produce
/// an extra empty line. `\r` is left in place.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split_terminator('\n')
}

/// Splits one line on `,` and trims each field.
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split(',')
        .map(|field| field.trim_matches(is_trim_char))
        .collect()
}

/// Tokenizes the whole log, dropping the header line.
///
/// Every remaining line becomes a [`Record`], short ones included.
pub fn parse_records(text: &str) -> Vec<Record<'_>> {
    split_lines(text)
        .enumerate()
        .skip(1)
        .map(|(index, line)| Record::new(index + 1, split_fields(line)))
        .collect()
}
