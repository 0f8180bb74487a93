use crate::error::ReportError;
use crate::record::Record;

/// Derives the `"<year>-<month>"` bucket for a `YYYY-MM-DD` date.
///
/// The year is copied verbatim; the month is the integer prefix of the second
/// part, printed without zero padding (`"2024-03-15"` -> `"2024-3"`). Returns
/// `None` when there is no second part or it does not start with an integer.
pub fn derive_month_key(date: &str) -> Option<String> {
    let mut parts = date.split('-');
    let year = parts.next()?;
    let month = leading_integer(parts.next()?)?;

    Some(format!("{year}-{month}"))
}

/// Month key of a record, failing on dates [`derive_month_key`] rejects.
pub fn month_key(record: &Record<'_>) -> Result<String, ReportError> {
    derive_month_key(record.date()).ok_or_else(|| ReportError::MalformedDate {
        line: record.line,
        date: record.date().to_owned(),
    })
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['+', '-']));
    let digits = text[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digits == 0 {
        return None;
    }

    text[..sign_len + digits].parse().ok()
}
