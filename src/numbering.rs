//! Sequential invoice numbering per Indian financial year
//!
//! Invoice numbers take the form `NNN/YYYY-YY`, where the suffix is the
//! financial year label (April 1 to March 31) and the prefix is a
//! zero-padded sequence that restarts every financial year.

use chrono::{Datelike, NaiveDate};

/// Minimum width of the zero-padded sequence prefix
const SEQUENCE_WIDTH: usize = 3;

/// Financial year label for a date, e.g. `2024-25`
///
/// The Indian financial year runs April 1 to March 31: April onward belongs
/// to the year that starts in it, January through March to the year that
/// ends in it.
pub fn financial_year_label(date: NaiveDate) -> String {
    let start_year = if date.month() >= 4 {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{}-{:02}", start_year, (start_year + 1) % 100)
}

/// Compute the next invoice number for the financial year containing `today`
///
/// Existing numbers whose suffix matches the current financial year are
/// scanned for their trailing-digit sequence; the maximum is incremented and
/// re-padded. With no match the sequence starts at `001/<label>`.
///
/// Numbers for other financial years never contribute. Malformed numbers
/// (no trailing digits before the suffix) are skipped rather than rejected,
/// so a history consisting only of malformed numbers restarts at 001.
pub fn next_invoice_number<'a, I>(existing: I, today: NaiveDate) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let label = financial_year_label(today);
    let suffix = format!("/{}", label);

    let mut max_sequence: Option<u32> = None;
    let mut width = SEQUENCE_WIDTH;

    for number in existing {
        let Some(prefix) = number.strip_suffix(&suffix) else {
            continue;
        };

        let digits = trailing_digits(prefix);
        if digits.is_empty() {
            tracing::debug!(number, "skipping malformed invoice number");
            continue;
        }

        match digits.parse::<u32>() {
            Ok(sequence) => {
                width = width.max(digits.len());
                max_sequence = Some(max_sequence.map_or(sequence, |max| max.max(sequence)));
            }
            Err(_) => {
                tracing::debug!(number, "skipping unparseable invoice sequence");
            }
        }
    }

    let next = max_sequence.map_or(1, |max| max + 1);
    format!("{:0width$}/{}", next, label, width = width)
}

/// Longest run of ASCII digits at the end of `text`
fn trailing_digits(text: &str) -> &str {
    let head = text.trim_end_matches(|c: char| c.is_ascii_digit());
    &text[head.len()..]
}
